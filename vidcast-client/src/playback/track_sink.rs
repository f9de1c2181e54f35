use dashmap::DashMap;
use std::time::Instant;
use tracing::{info, warn};
use vidcast_core::{RenderedTrack, TrackId};

/// Native stand-in for the page's `remoteVideos` container.
pub trait TrackSink: Send + Sync {
    fn attach(&self, track: &RenderedTrack);

    /// No-op when the track is not attached.
    fn detach(&self, id: &TrackId);

    fn replay(&self, id: &TrackId);

    /// The signalling socket closed; the session will not recover.
    fn closed(&self);
}

/// Sink that records attached tracks and logs their lifetime.
#[derive(Default)]
pub struct LoggingSink {
    attached: DashMap<TrackId, (RenderedTrack, Instant)>,
}

impl LoggingSink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_attached(&self, id: &TrackId) -> bool {
        self.attached.contains_key(id)
    }

    pub fn attached_ids(&self) -> Vec<TrackId> {
        let mut ids: Vec<TrackId> = self.attached.iter().map(|e| e.key().clone()).collect();
        ids.sort();
        ids
    }
}

impl TrackSink for LoggingSink {
    fn attach(&self, track: &RenderedTrack) {
        info!("Rendering track {} (stream {})", track.id, track.stream_id);
        self.attached
            .insert(track.id.clone(), (track.clone(), Instant::now()));
    }

    fn detach(&self, id: &TrackId) {
        if let Some((_, (_, since))) = self.attached.remove(id) {
            info!("Track {} detached after {:?}", id, since.elapsed());
        }
    }

    fn replay(&self, id: &TrackId) {
        info!("Track {} muted, resuming playback", id);
    }

    fn closed(&self) {
        warn!("WebSocket has closed");
    }
}
