use std::sync::Arc;
use std::time::Duration;
use tokio::time::Instant;
use vidcast_client::PlaybackSession;
use vidcast_core::{IceCandidate, SessionDescription, SignalEvent, SignalMessage, TrackId};

use crate::integration::init_tracing;
use crate::utils::{
    InboundFrame, MockServer, RecordingSink, SIGNAL_TIMEOUT_MS, SinkCall, TestOfferer,
    wait_for_event,
};

/// Media needs ICE to connect before the first packet; allow more than a
/// plain signalling round trip.
const MEDIA_TIMEOUT_MS: u64 = 4 * SIGNAL_TIMEOUT_MS;

/// Waits for the answer, keeping any candidates trickled before it.
async fn wait_for_answer(server: &mut MockServer) -> (SessionDescription, Vec<IceCandidate>) {
    let deadline = Instant::now() + Duration::from_millis(SIGNAL_TIMEOUT_MS);
    let mut early = Vec::new();

    loop {
        let frame = tokio::time::timeout_at(deadline, server.inbound_rx.recv())
            .await
            .expect("Timeout waiting for answer")
            .expect("Signal channel closed");
        match frame.message {
            SignalMessage::Answer(answer) => return (answer, early),
            SignalMessage::Candidate(candidate) => early.push(candidate),
            _ => {}
        }
    }
}

#[tokio::test]
async fn test_delivered_track_is_attached_then_removed() {
    init_tracing();
    let mut server = MockServer::start(&[]).await;
    let sink = Arc::new(RecordingSink::default());
    let session = PlaybackSession::init(&server.client_config(), sink.clone())
        .await
        .expect("Failed to init session");

    let offerer = TestOfferer::new().await.expect("Failed to create offerer");
    let offer_sdp = offerer
        .create_gathered_offer()
        .await
        .expect("Failed to create offer");
    server.send_signal(&SignalMessage::Offer(SessionDescription::offer(offer_sdp)));

    let (answer, early) = wait_for_answer(&mut server).await;
    offerer
        .set_remote_answer(answer.sdp)
        .await
        .expect("Answer was not acceptable to the offerer");
    for candidate in early {
        offerer.add_candidate(candidate).await.expect("Bad early candidate");
    }
    let sender = offerer.start_sending();

    let track_id = TrackId::from(offerer.track_id.clone());
    let deadline = Instant::now() + Duration::from_millis(MEDIA_TIMEOUT_MS);
    while !sink.calls().contains(&SinkCall::Attach(track_id.clone())) {
        assert!(Instant::now() < deadline, "track never attached: {:?}", sink.calls());
        match tokio::time::timeout(Duration::from_millis(50), server.inbound_rx.recv()).await {
            Ok(Some(InboundFrame {
                message: SignalMessage::Candidate(candidate),
                ..
            })) => offerer.add_candidate(candidate).await.expect("Bad candidate"),
            Ok(Some(_)) | Err(_) => {}
            Ok(None) => panic!("Signal channel closed"),
        }
    }

    session
        .remove_video_by_track_id(track_id.clone())
        .await
        .expect("Failed to remove track");

    let frame = wait_for_event(&mut server.inbound_rx, SignalEvent::Remove)
        .await
        .expect("No remove received");
    assert_eq!(
        frame.raw,
        format!(r#"{{"event":"remove","data":"{}"}}"#, offerer.track_id)
    );

    let calls = sink.calls();
    let attached = calls
        .iter()
        .position(|c| *c == SinkCall::Attach(track_id.clone()))
        .expect("attach missing");
    let detached = calls
        .iter()
        .position(|c| *c == SinkCall::Detach(track_id.clone()))
        .expect("detach missing");
    assert!(attached < detached);

    sender.abort();
    offerer.close().await.unwrap();
    session.dispose().await;
}
