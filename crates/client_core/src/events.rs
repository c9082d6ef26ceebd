//! Events emitted by the rendering surface and the page-size input.

use shared::domain::Record;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViewEvent {
    PageRequested(u32),
    RowSelected(Record),
    RowUnselected(Record),
    /// Rows the surface reports as selected in one multi-select gesture.
    BulkSelectionChanged(Vec<Record>),
    PageSizeDraftChanged(String),
    PageSizeConfirmRequested,
}

impl ViewEvent {
    pub fn name(&self) -> &'static str {
        match self {
            Self::PageRequested(_) => "page_requested",
            Self::RowSelected(_) => "row_selected",
            Self::RowUnselected(_) => "row_unselected",
            Self::BulkSelectionChanged(_) => "bulk_selection_changed",
            Self::PageSizeDraftChanged(_) => "page_size_draft_changed",
            Self::PageSizeConfirmRequested => "page_size_confirm_requested",
        }
    }
}
