pub mod catalog;
pub mod playback;
pub mod signaling;
pub mod transport;

pub use catalog::{HttpCatalog, read_upload};
pub use playback::{LoggingSink, PlaybackSession, TrackSink};
pub use signaling::SignalingSocket;
pub use transport::{PeerTransport, TransportConfig};
