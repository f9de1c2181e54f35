use crate::model::{IceCandidate, RenderedTrack, SessionDescription, SignalMessage, TrackId};

/// Side effects the session asks its driver to perform, in order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    /// Write a frame to the signalling socket.
    Send(SignalMessage),

    /// Set the remote description, create an answer and set it locally,
    /// then report back with `SessionEvent::OfferApplied` or `OfferFailed`.
    ApplyOffer(SessionDescription),

    AddCandidate(IceCandidate),

    /// Create an auto-playing element with a remove control for the track.
    Attach(RenderedTrack),

    /// Remove the element rendering the track, if it is still attached.
    Detach(TrackId),

    /// Kick the element back into playing.
    Replay(TrackId),

    /// Tell the user the signalling socket has closed.
    NotifyClosed,
}
