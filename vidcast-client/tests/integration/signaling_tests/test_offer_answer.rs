use std::sync::Arc;
use vidcast_client::PlaybackSession;
use vidcast_core::session::SessionPhase;
use vidcast_core::{IceCandidate, SessionDescription, SdpType, SignalEvent, SignalMessage};

use crate::integration::init_tracing;
use crate::utils::{MockServer, RecordingSink, TestOfferer, drain_events, wait_for_event};

fn loopback_candidate() -> IceCandidate {
    IceCandidate {
        candidate: "candidate:1 1 udp 2130706431 127.0.0.1 50000 typ host".to_string(),
        sdp_mid: Some("0".to_string()),
        sdp_m_line_index: Some(0),
        username_fragment: None,
    }
}

#[tokio::test]
async fn test_offer_is_answered_exactly_once() {
    init_tracing();
    let mut server = MockServer::start(&[]).await;
    let session = PlaybackSession::init(&server.client_config(), Arc::new(RecordingSink::default()))
        .await
        .expect("Failed to init session");

    let offerer = TestOfferer::new().await.expect("Failed to create offerer");
    let offer_sdp = offerer.create_offer().await.expect("Failed to create offer");

    server.send_signal(&SignalMessage::Offer(SessionDescription::offer(offer_sdp)));
    server.send_signal(&SignalMessage::Candidate(loopback_candidate()));

    let frame = wait_for_event(&mut server.inbound_rx, SignalEvent::Answer)
        .await
        .expect("No answer received");
    let SignalMessage::Answer(answer) = frame.message else {
        panic!("expected answer, got {:?}", frame.message);
    };
    assert_eq!(answer.sdp_type, SdpType::Answer);
    assert!(answer.sdp.starts_with("v=0"));

    offerer
        .set_remote_answer(answer.sdp)
        .await
        .expect("Answer was not acceptable to the offerer");

    let extra = drain_events(&mut server.inbound_rx, SignalEvent::Answer).await;
    assert!(extra.is_empty(), "more than one answer sent");
    assert_eq!(session.phase(), SessionPhase::Stable);

    offerer.close().await.unwrap();
    session.dispose().await;
}

#[tokio::test]
async fn test_malformed_offer_is_ignored() {
    init_tracing();
    let mut server = MockServer::start(&[]).await;
    let session = PlaybackSession::init(&server.client_config(), Arc::new(RecordingSink::default()))
        .await
        .expect("Failed to init session");

    server.send_raw(r#"{"event":"offer","data":"{not json"}"#.to_string());
    server.send_raw("garbage".to_string());

    let answers = drain_events(&mut server.inbound_rx, SignalEvent::Answer).await;
    assert!(answers.is_empty());
    assert_eq!(session.phase(), SessionPhase::Idle);

    session.dispose().await;
}
