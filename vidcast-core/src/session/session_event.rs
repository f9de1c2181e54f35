use crate::model::{IceCandidate, RemoteTrack, SessionDescription, TrackId, VideoName};

/// Everything a driver feeds into [`crate::session::SessionState::handle`].
#[derive(Debug, Clone)]
pub enum SessionEvent {
    /// Text frame received on the signalling socket.
    Inbound(String),

    /// Remote offer applied and the local answer set; carries that answer.
    OfferApplied { answer: SessionDescription },

    /// Applying the remote offer or producing the answer failed.
    OfferFailed,

    /// ICE candidate gathered by the local peer connection.
    LocalCandidate(IceCandidate),

    TrackArrived(RemoteTrack),

    TrackMuted(TrackId),

    /// The remote stream dropped the track.
    StreamTrackRemoved(TrackId),

    SocketClosed,

    /// User picked a video from the catalog.
    Publish(VideoName),

    /// User pressed the remove control of a rendered track.
    RemoveTrack(TrackId),

    /// The driver could not render an attached track.
    RenderFailed(TrackId),
}
