use std::sync::Arc;
use vidcast_client::PlaybackSession;
use vidcast_core::{SignalEvent, SignalMessage, TrackId};

use crate::integration::init_tracing;
use crate::utils::{MockServer, RecordingSink, wait_for_event};

#[tokio::test]
async fn test_remove_sends_bare_track_id() {
    init_tracing();
    let mut server = MockServer::start(&[]).await;
    let sink = Arc::new(RecordingSink::default());
    let session = PlaybackSession::init(&server.client_config(), sink.clone())
        .await
        .expect("Failed to init session");

    session
        .remove_video_by_track_id(TrackId::from("3f1c-track"))
        .await
        .expect("Failed to remove track");

    let frame = wait_for_event(&mut server.inbound_rx, SignalEvent::Remove)
        .await
        .expect("No remove received");
    assert_eq!(frame.raw, r#"{"event":"remove","data":"3f1c-track"}"#);
    assert_eq!(frame.message, SignalMessage::Remove(TrackId::from("3f1c-track")));

    // Nothing was rendered under that id, so nothing is detached.
    assert!(sink.calls().is_empty());

    session.dispose().await;
}
