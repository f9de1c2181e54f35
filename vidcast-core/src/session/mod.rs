mod session_command;
mod session_event;
mod session_state;
mod track_registry;

pub use session_command::*;
pub use session_event::*;
pub use session_state::*;
pub use track_registry::*;
