//! Browser build of the vidcast control panel.
//!
//! Exposes [`VidcastPage`] to JavaScript; everything else stays internal.

mod catalog;
mod engine;
mod logger;
mod page;

pub use page::VidcastPage;
