//! Unconfirmed page-size input.

use std::num::NonZeroU32;

use crate::error::InvalidPageSize;

/// Raw page-size text as typed by the user; only [`PageSizeProposal::confirm`]
/// turns it into a usable size.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageSizeProposal {
    draft: String,
}

impl PageSizeProposal {
    pub fn new(initial: NonZeroU32) -> Self {
        Self {
            draft: initial.to_string(),
        }
    }

    pub fn set(&mut self, raw: impl Into<String>) {
        self.draft = raw.into();
    }

    pub fn draft(&self) -> &str {
        &self.draft
    }

    pub fn confirm(&self) -> Result<NonZeroU32, InvalidPageSize> {
        let trimmed = self.draft.trim();
        let invalid = || InvalidPageSize {
            draft: self.draft.clone(),
        };
        if trimmed.is_empty() || !trimmed.bytes().all(|byte| byte.is_ascii_digit()) {
            return Err(invalid());
        }
        trimmed
            .parse::<u32>()
            .ok()
            .and_then(NonZeroU32::new)
            .ok_or_else(invalid)
    }
}

#[cfg(test)]
#[path = "tests/page_size_tests.rs"]
mod tests;
