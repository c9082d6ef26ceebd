//! Page index, page size and the advisory total reported by the catalog.

use std::num::NonZeroU32;

use serde::Serialize;

use crate::error::PaginationError;

/// Page size used when nothing else is configured.
pub const DEFAULT_PAGE_SIZE: NonZeroU32 = match NonZeroU32::new(12) {
    Some(size) => size,
    None => unreachable!(),
};

/// Number of page links shown around the current page.
pub const DEFAULT_PAGE_LINK_WINDOW: u32 = 5;

/// Parameters of one catalog fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub struct PageRequest {
    pub page: u32,
    pub page_size: u32,
}

impl PageRequest {
    pub fn new(page: u32, page_size: u32) -> Self {
        Self { page, page_size }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaginationState {
    page: u32,
    page_size: NonZeroU32,
    total_count: u64,
}

impl Default for PaginationState {
    fn default() -> Self {
        Self::new(DEFAULT_PAGE_SIZE)
    }
}

impl PaginationState {
    pub fn new(page_size: NonZeroU32) -> Self {
        Self {
            page: 1,
            page_size,
            total_count: 0,
        }
    }

    pub fn page(&self) -> u32 {
        self.page
    }

    pub fn page_size(&self) -> u32 {
        self.page_size.get()
    }

    pub fn total_count(&self) -> u64 {
        self.total_count
    }

    pub fn request(&self) -> PageRequest {
        PageRequest::new(self.page, self.page_size.get())
    }

    pub fn set_page(&mut self, page: u32) -> Result<(), PaginationError> {
        if page < 1 {
            return Err(PaginationError::PageOutOfRange { page });
        }
        self.page = page;
        Ok(())
    }

    /// Changes density and restarts browsing from the first page in one step.
    pub fn set_page_size_and_reset(&mut self, page_size: NonZeroU32) {
        self.page_size = page_size;
        self.page = 1;
    }

    /// Same total, positioned at `request` instead of the current page.
    pub fn positioned_at(&self, request: PageRequest) -> Self {
        Self {
            page: request.page.max(1),
            page_size: NonZeroU32::new(request.page_size).unwrap_or(self.page_size),
            total_count: self.total_count,
        }
    }

    pub fn apply_fetch_result(&mut self, total_count: u64) {
        self.total_count = total_count;
    }

    /// Zero-based index of the first row on the current page.
    pub fn offset(&self) -> u64 {
        u64::from(self.page - 1) * u64::from(self.page_size.get())
    }

    pub fn page_count(&self) -> u32 {
        let pages = self.total_count.div_ceil(u64::from(self.page_size.get()));
        u32::try_from(pages).unwrap_or(u32::MAX)
    }

    /// Last navigable page; 1 while the total is still unknown or zero.
    pub fn last_page(&self) -> u32 {
        self.page_count().max(1)
    }

    pub fn has_previous(&self) -> bool {
        self.page > 1
    }

    pub fn has_next(&self) -> bool {
        self.page < self.page_count()
    }

    /// One-based position of the first row shown, or 0 when there is nothing to show.
    pub fn first_row(&self) -> u64 {
        if self.total_count == 0 {
            0
        } else {
            (self.offset() + 1).min(self.total_count)
        }
    }

    pub fn last_row(&self) -> u64 {
        (self.offset() + u64::from(self.page_size.get())).min(self.total_count)
    }

    /// Contiguous run of at most `window` page numbers containing the current page,
    /// centred on it where the page count allows.
    pub fn page_links(&self, window: u32) -> Vec<u32> {
        let page_count = self.page_count();
        if page_count == 0 || window == 0 {
            return Vec::new();
        }
        let visible = window.min(page_count);
        let current = self.page.min(page_count);
        let start = current
            .saturating_sub(visible / 2)
            .max(1)
            .min(page_count - visible + 1);
        (start..start + visible).collect()
    }
}

#[cfg(test)]
#[path = "tests/pagination_tests.rs"]
mod tests;
