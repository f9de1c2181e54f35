mod signaling;
mod track;
mod video;

pub use signaling::{
    IceCandidate, SdpType, SessionDescription, SignalEnvelope, SignalEvent, SignalMessage,
};
pub use track::{RemoteTrack, RenderedTrack, TrackId, TrackKind};
pub use video::VideoName;
