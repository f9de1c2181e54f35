use anyhow::Result;
use std::time::Duration;
use tokio::sync::mpsc;
use vidcast_core::{SignalEvent, SignalMessage};

use super::mock_server::InboundFrame;

/// Timeout for a single signalling round trip (ms).
pub const SIGNAL_TIMEOUT_MS: u64 = 5000;

/// Window used to make sure nothing else arrives (ms).
pub const QUIET_WINDOW_MS: u64 = 500;

/// Wait for the next frame with the given event, skipping others
/// (the client trickles its own candidates in between).
pub async fn wait_for_event(
    inbound_rx: &mut mpsc::UnboundedReceiver<InboundFrame>,
    event: SignalEvent,
) -> Result<InboundFrame> {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(SIGNAL_TIMEOUT_MS);

    loop {
        match tokio::time::timeout_at(deadline, inbound_rx.recv()).await {
            Ok(Some(frame)) if frame.message.event() == event => return Ok(frame),
            Ok(Some(_)) => continue,
            Ok(None) => anyhow::bail!("Signal channel closed"),
            Err(_) => anyhow::bail!("Timeout waiting for {:?}", event),
        }
    }
}

/// Collect every frame with the given event seen during the quiet window.
pub async fn drain_events(
    inbound_rx: &mut mpsc::UnboundedReceiver<InboundFrame>,
    event: SignalEvent,
) -> Vec<SignalMessage> {
    let deadline = tokio::time::Instant::now() + Duration::from_millis(QUIET_WINDOW_MS);
    let mut seen = Vec::new();

    while let Ok(Some(frame)) = tokio::time::timeout_at(deadline, inbound_rx.recv()).await {
        if frame.message.event() == event {
            seen.push(frame.message);
        }
    }
    seen
}
