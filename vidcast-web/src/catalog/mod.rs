mod dom_catalog_view;
mod fetch_catalog;

pub use dom_catalog_view::*;
pub use fetch_catalog::*;
