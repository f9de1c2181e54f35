mod signaling_socket;

pub use signaling_socket::*;
