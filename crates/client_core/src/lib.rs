//! Cross-page selection and fetch orchestration for a paginated remote catalog.

pub mod catalog;
pub mod config;
pub mod controller;
pub mod error;
pub mod events;
pub mod page_size;
pub mod pagination;
pub mod selection;
pub mod session;

pub use catalog::{CatalogClient, CatalogPage, CatalogSource};
pub use config::Settings;
pub use controller::{
    FetchOutcome, FetchTicket, LoadPhase, PageView, PageViewController, PaginationSummary,
    RenderedRow,
};
pub use error::{FetchError, InvalidPageSize, PaginationError};
pub use events::ViewEvent;
pub use page_size::PageSizeProposal;
pub use pagination::{PageRequest, PaginationState};
pub use selection::SelectionRegistry;
pub use session::PageSession;

/// Builds a controller from loaded settings with an empty selection.
pub fn controller_from_settings(settings: &Settings) -> PageViewController {
    PageViewController::new(
        PaginationState::new(settings.page_size),
        SelectionRegistry::new(),
    )
    .with_page_link_window(settings.page_link_window)
}
