use crate::model::SignalEvent;
use thiserror::Error;

/// Failures decoding or encoding a signalling frame.
#[derive(Debug, Error)]
pub enum CodecError {
    #[error("failed to parse msg: {0}")]
    Envelope(#[source] serde_json::Error),

    #[error("failed to parse {event:?} payload: {source}")]
    Payload {
        event: SignalEvent,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode {event:?} payload: {source}")]
    Encode {
        event: SignalEvent,
        #[source]
        source: serde_json::Error,
    },
}

#[derive(Debug, Error)]
pub enum SessionError {
    #[error(transparent)]
    Codec(#[from] CodecError),

    #[error("signalling socket is closed")]
    Closed,
}

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("request failed: {0}")]
    Transport(String),

    #[error("server answered {status}")]
    Status { status: u16 },

    #[error("invalid video list: {0}")]
    Decode(String),

    /// The change went through but re-listing the catalog failed.
    #[error("Error fetching video list: {0}")]
    Refresh(#[source] Box<CatalogError>),
}

impl CatalogError {
    pub fn transport(err: impl std::fmt::Display) -> Self {
        Self::Transport(err.to_string())
    }

    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }
}
