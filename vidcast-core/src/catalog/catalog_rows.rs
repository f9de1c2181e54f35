use crate::model::VideoName;

/// Part of a catalog row that received a click.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RowTarget {
    /// Anywhere on the row outside the delete control.
    Row,
    DeleteControl,
}

impl RowTarget {
    /// Clicks on the delete control must not bubble up to the row.
    pub fn stops_propagation(self) -> bool {
        matches!(self, RowTarget::DeleteControl)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogAction {
    Play(VideoName),
    Delete(VideoName),
}

/// Rows currently shown, in server order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CatalogRows {
    names: Vec<VideoName>,
}

impl CatalogRows {
    pub fn new(names: Vec<VideoName>) -> Self {
        Self { names }
    }

    pub fn names(&self) -> &[VideoName] {
        &self.names
    }

    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Exactly one action per click: a delete click never plays.
    pub fn on_click(&self, index: usize, target: RowTarget) -> Option<CatalogAction> {
        let name = self.names.get(index)?.clone();
        Some(match target {
            RowTarget::Row => CatalogAction::Play(name),
            RowTarget::DeleteControl => CatalogAction::Delete(name),
        })
    }
}
