pub mod signaling_tests;

use std::cell::RefCell;
use tracing::Level;
use vidcast_core::catalog::{CatalogRows, CatalogView};

pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_max_level(Level::DEBUG)
        .with_test_writer()
        .try_init();
}

/// CatalogView that remembers what it was asked to draw.
#[derive(Default)]
pub struct RecordingView {
    pub renders: RefCell<Vec<Vec<String>>>,
    pub resets: RefCell<usize>,
}

impl CatalogView for RecordingView {
    fn render(&self, rows: &CatalogRows) {
        self.renders
            .borrow_mut()
            .push(rows.names().iter().map(|n| n.to_string()).collect());
    }

    fn reset_upload_input(&self) {
        *self.resets.borrow_mut() += 1;
    }
}
