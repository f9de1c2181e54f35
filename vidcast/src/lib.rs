pub use vidcast_core::{ClientConfig, TrackId, VideoName};

pub mod model {
    pub use vidcast_core::model::*;
}

pub mod catalog {
    pub use vidcast_core::catalog::*;
}

pub mod session {
    pub use vidcast_core::session::*;
}

#[cfg(feature = "native")]
pub mod client {
    pub use vidcast_client::*;
}

#[cfg(feature = "web")]
pub mod web {
    pub use vidcast_web::*;
}
