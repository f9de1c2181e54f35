mod catalog_api;
mod catalog_controller;
mod catalog_rows;
mod endpoints;

pub use catalog_api::*;
pub use catalog_controller::*;
pub use catalog_rows::*;
pub use endpoints::*;
