use std::sync::Arc;
use vidcast_client::PlaybackSession;
use vidcast_core::{SignalEvent, SignalMessage, VideoName};

use crate::integration::init_tracing;
use crate::utils::{MockServer, RecordingSink, drain_events, wait_for_event};

#[tokio::test]
async fn test_start_video_stream_sends_one_publish() {
    init_tracing();
    let mut server = MockServer::start(&["clip.mp4"]).await;
    let session = PlaybackSession::init(&server.client_config(), Arc::new(RecordingSink::default()))
        .await
        .expect("Failed to init session");

    session
        .start_video_stream(VideoName::from("clip.mp4"))
        .await
        .expect("Failed to publish");

    let frame = wait_for_event(&mut server.inbound_rx, SignalEvent::Publish)
        .await
        .expect("No publish received");
    assert_eq!(frame.raw, r#"{"event":"publish","data":"\"clip.mp4\""}"#);
    assert_eq!(frame.message, SignalMessage::Publish(VideoName::from("clip.mp4")));

    let extra = drain_events(&mut server.inbound_rx, SignalEvent::Publish).await;
    assert!(extra.is_empty());

    session.dispose().await;
}
