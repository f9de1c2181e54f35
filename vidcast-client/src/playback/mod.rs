mod playback_session;
mod track_sink;

pub use playback_session::*;
pub use track_sink::*;
