//! Page view state machine: pagination, fetch tickets and the selection join.

use std::num::NonZeroU32;

use serde::Serialize;
use shared::domain::Record;
use tracing::{debug, info, warn};

use crate::{
    catalog::CatalogPage,
    error::{FetchError, InvalidPageSize},
    events::ViewEvent,
    page_size::PageSizeProposal,
    pagination::{PageRequest, PaginationState, DEFAULT_PAGE_LINK_WINDOW},
    selection::SelectionRegistry,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum LoadPhase {
    Idle,
    Loading,
    Loaded,
    Failed,
}

/// Tag attached to one issued fetch.
///
/// Only the most recently issued ticket can be applied.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    seq: u64,
    request: PageRequest,
}

impl FetchTicket {
    pub fn seq(&self) -> u64 {
        self.seq
    }

    pub fn request(&self) -> PageRequest {
        self.request
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchOutcome {
    Loaded,
    Failed,
    /// The ticket was superseded before its result arrived; nothing changed.
    Stale,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RenderedRow {
    pub record: Record,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PaginationSummary {
    pub page: u32,
    pub page_size: u32,
    pub total_count: u64,
    pub page_count: u32,
    pub first_row: u64,
    pub last_row: u64,
    pub page_links: Vec<u32>,
}

impl PaginationSummary {
    pub fn report(&self) -> String {
        format!(
            "Showing {} to {} of {} records",
            self.first_row, self.last_row, self.total_count
        )
    }
}

/// Everything the rendering surface needs for one frame.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PageView {
    pub rows: Vec<RenderedRow>,
    pub loading: bool,
    pub phase: LoadPhase,
    pub pagination: PaginationSummary,
    pub error: Option<String>,
    pub page_size_draft: String,
}

pub struct PageViewController {
    pagination: PaginationState,
    selection: SelectionRegistry,
    proposal: PageSizeProposal,
    page_link_window: u32,
    phase: LoadPhase,
    records: Vec<Record>,
    /// Request whose records are on screen.
    loaded: Option<PageRequest>,
    last_error: Option<FetchError>,
    latest_seq: u64,
}

impl Default for PageViewController {
    fn default() -> Self {
        Self::new(PaginationState::default(), SelectionRegistry::new())
    }
}

impl PageViewController {
    pub fn new(pagination: PaginationState, selection: SelectionRegistry) -> Self {
        let proposal = PageSizeProposal::new(
            NonZeroU32::new(pagination.page_size()).unwrap_or(NonZeroU32::MIN),
        );
        Self {
            pagination,
            selection,
            proposal,
            page_link_window: DEFAULT_PAGE_LINK_WINDOW,
            phase: LoadPhase::Idle,
            records: Vec::new(),
            loaded: None,
            last_error: None,
            latest_seq: 0,
        }
    }

    pub fn with_page_link_window(mut self, window: u32) -> Self {
        self.page_link_window = window;
        self
    }

    pub fn pagination(&self) -> &PaginationState {
        &self.pagination
    }

    pub fn selection(&self) -> &SelectionRegistry {
        &self.selection
    }

    pub fn phase(&self) -> LoadPhase {
        self.phase
    }

    pub fn is_loading(&self) -> bool {
        self.phase == LoadPhase::Loading
    }

    pub fn records(&self) -> &[Record] {
        &self.records
    }

    pub fn last_error(&self) -> Option<&FetchError> {
        self.last_error.as_ref()
    }

    pub fn page_size_draft(&self) -> &str {
        self.proposal.draft()
    }

    /// Issues the initial fetch for the current page and size.
    pub fn start(&mut self) -> FetchTicket {
        self.issue()
    }

    pub fn navigate_to(&mut self, page: u32) -> Option<FetchTicket> {
        let before = self.pagination.request();
        if let Err(err) = self.pagination.set_page(page) {
            warn!(page, "navigation: {err}");
            return None;
        }
        self.issue_if_changed(before)
    }

    pub fn next_page(&mut self) -> Option<FetchTicket> {
        let shown = self.displayed();
        if !shown.has_next() {
            return None;
        }
        self.navigate_to(shown.page() + 1)
    }

    pub fn previous_page(&mut self) -> Option<FetchTicket> {
        let shown = self.displayed();
        if !shown.has_previous() {
            return None;
        }
        self.navigate_to(shown.page() - 1)
    }

    pub fn first_page(&mut self) -> Option<FetchTicket> {
        self.navigate_to(1)
    }

    pub fn last_page(&mut self) -> Option<FetchTicket> {
        self.navigate_to(self.pagination.last_page())
    }

    pub fn edit_page_size(&mut self, raw: impl Into<String>) {
        self.proposal.set(raw);
    }

    /// Applies the page-size draft, restarting from page 1.
    ///
    /// A rejected draft stays editable and leaves pagination untouched.
    pub fn confirm_page_size(&mut self) -> Result<Option<FetchTicket>, InvalidPageSize> {
        let page_size = self.proposal.confirm()?;
        let before = self.pagination.request();
        self.pagination.set_page_size_and_reset(page_size);
        info!(page_size = page_size.get(), "pagination: page size applied");
        Ok(self.issue_if_changed(before))
    }

    /// Re-issues the current request after a failed fetch.
    pub fn retry(&mut self) -> Option<FetchTicket> {
        if self.phase != LoadPhase::Failed {
            return None;
        }
        Some(self.issue())
    }

    pub fn apply_fetch(
        &mut self,
        ticket: FetchTicket,
        result: Result<CatalogPage, FetchError>,
    ) -> FetchOutcome {
        if ticket.seq != self.latest_seq || ticket.request != self.pagination.request() {
            debug!(
                seq = ticket.seq,
                latest_seq = self.latest_seq,
                page = ticket.request.page,
                page_size = ticket.request.page_size,
                "fetch: discarding stale response"
            );
            return FetchOutcome::Stale;
        }

        match result {
            Ok(page) => {
                info!(
                    page = ticket.request.page,
                    records = page.records.len(),
                    total = page.total_count,
                    "fetch: page loaded"
                );
                self.pagination.apply_fetch_result(page.total_count);
                self.records = page.records;
                self.loaded = Some(ticket.request);
                self.last_error = None;
                self.phase = LoadPhase::Loaded;
                FetchOutcome::Loaded
            }
            Err(err) => {
                warn!(page = err.page(), "fetch: {err}");
                self.last_error = Some(err);
                self.phase = LoadPhase::Failed;
                FetchOutcome::Failed
            }
        }
    }

    pub fn on_row_select(&mut self, record: &Record) {
        self.selection.add(record.identity());
    }

    pub fn on_row_unselect(&mut self, record: &Record) {
        self.selection.remove(record.identity().as_str());
    }

    pub fn on_bulk_selection_change(&mut self, records: &[Record]) {
        self.selection
            .add_many(records.iter().map(Record::identity));
    }

    pub fn handle_event(
        &mut self,
        event: ViewEvent,
    ) -> Result<Option<FetchTicket>, InvalidPageSize> {
        match event {
            ViewEvent::PageRequested(page) => Ok(self.navigate_to(page)),
            ViewEvent::RowSelected(record) => {
                self.on_row_select(&record);
                Ok(None)
            }
            ViewEvent::RowUnselected(record) => {
                self.on_row_unselect(&record);
                Ok(None)
            }
            ViewEvent::BulkSelectionChanged(records) => {
                self.on_bulk_selection_change(&records);
                Ok(None)
            }
            ViewEvent::PageSizeDraftChanged(raw) => {
                self.edit_page_size(raw);
                Ok(None)
            }
            ViewEvent::PageSizeConfirmRequested => self.confirm_page_size(),
        }
    }

    pub fn view(&self) -> PageView {
        let rows = self
            .records
            .iter()
            .map(|record| RenderedRow {
                selected: self.selection.has(record.identity().as_str()),
                record: record.clone(),
            })
            .collect();
        let shown = self.displayed();
        PageView {
            rows,
            loading: self.is_loading(),
            phase: self.phase,
            pagination: PaginationSummary {
                page: shown.page(),
                page_size: shown.page_size(),
                total_count: shown.total_count(),
                page_count: shown.page_count(),
                first_row: shown.first_row(),
                last_row: shown.last_row(),
                page_links: shown.page_links(self.page_link_window),
            },
            error: self.last_error.as_ref().map(ToString::to_string),
            page_size_draft: self.proposal.draft().to_string(),
        }
    }

    /// Pagination matching the rows on screen.
    ///
    /// After a failed fetch the rows still belong to the last loaded request,
    /// so the summary and the step helpers work from that request.
    fn displayed(&self) -> PaginationState {
        match (self.phase, self.loaded) {
            (LoadPhase::Failed, Some(loaded)) => self.pagination.positioned_at(loaded),
            _ => self.pagination.clone(),
        }
    }

    /// Issues a fetch when the request moved, or when the last attempt failed.
    fn issue_if_changed(&mut self, before: PageRequest) -> Option<FetchTicket> {
        if self.pagination.request() == before && self.phase != LoadPhase::Failed {
            return None;
        }
        Some(self.issue())
    }

    fn issue(&mut self) -> FetchTicket {
        self.latest_seq += 1;
        self.phase = LoadPhase::Loading;
        let ticket = FetchTicket {
            seq: self.latest_seq,
            request: self.pagination.request(),
        };
        debug!(
            seq = ticket.seq,
            page = ticket.request.page,
            page_size = ticket.request.page_size,
            "fetch: issued"
        );
        ticket
    }
}

#[cfg(test)]
#[path = "tests/controller_tests.rs"]
mod tests;
