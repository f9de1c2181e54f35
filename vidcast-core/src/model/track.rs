use serde::{Deserialize, Serialize};
use std::fmt;

#[derive(Debug, Serialize, Deserialize, Clone, Hash, Eq, PartialEq, Ord, PartialOrd)]
#[serde(transparent)]
pub struct TrackId(pub String);

impl TrackId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl From<&str> for TrackId {
    fn from(s: &str) -> Self {
        Self(s.to_owned())
    }
}

impl From<String> for TrackId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl fmt::Display for TrackId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TrackKind {
    Audio,
    Video,
}

/// A remote track announced by the peer connection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteTrack {
    pub id: TrackId,
    pub kind: TrackKind,
    /// Id of the remote stream the track belongs to.
    pub stream_id: String,
}

/// A video track that currently has an element (or sink entry) rendering it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedTrack {
    pub id: TrackId,
    pub stream_id: String,
}
