pub mod catalog;
pub mod codec;
pub mod config;
pub mod error;
pub mod model;
pub mod session;

pub use config::ClientConfig;
pub use error::{CatalogError, CodecError, SessionError};
pub use model::*;
