use crate::model::{RenderedTrack, TrackId};
use std::collections::HashMap;

/// Tracks that currently have an element rendering them, keyed by track id.
#[derive(Debug, Default, Clone)]
pub struct TrackRegistry {
    tracks: HashMap<TrackId, RenderedTrack>,
}

impl TrackRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `false` when the id is already rendered.
    pub fn insert(&mut self, track: RenderedTrack) -> bool {
        if self.tracks.contains_key(&track.id) {
            return false;
        }
        self.tracks.insert(track.id.clone(), track);
        true
    }

    pub fn remove(&mut self, id: &TrackId) -> Option<RenderedTrack> {
        self.tracks.remove(id)
    }

    pub fn contains(&self, id: &TrackId) -> bool {
        self.tracks.contains_key(id)
    }

    pub fn len(&self) -> usize {
        self.tracks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tracks.is_empty()
    }
}
