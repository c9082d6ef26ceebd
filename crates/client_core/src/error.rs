use thiserror::Error;

/// A page fetch that did not produce a usable page.
#[derive(Debug, Error)]
pub enum FetchError {
    #[error("page {page} is not a valid page number")]
    InvalidPage { page: u32 },
    #[error("failed to reach catalog for page {page}: {source}")]
    Transport {
        page: u32,
        #[source]
        source: reqwest::Error,
    },
    #[error("catalog returned status {status} for page {page}{}", detail_suffix(.detail))]
    Status {
        page: u32,
        status: u16,
        detail: Option<String>,
    },
    #[error("malformed catalog response for page {page}: {source}")]
    Decode {
        page: u32,
        #[source]
        source: serde_json::Error,
    },
    #[error("fetch for page {page} stopped before completing: {reason}")]
    Aborted { page: u32, reason: String },
}

fn detail_suffix(detail: &Option<String>) -> String {
    match detail {
        Some(detail) => format!(": {detail}"),
        None => String::new(),
    }
}

impl FetchError {
    /// Page number the failed request was issued for.
    pub fn page(&self) -> u32 {
        match self {
            Self::InvalidPage { page }
            | Self::Transport { page, .. }
            | Self::Status { page, .. }
            | Self::Decode { page, .. }
            | Self::Aborted { page, .. } => *page,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("page size must be a positive whole number, got {draft:?}")]
pub struct InvalidPageSize {
    pub draft: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum PaginationError {
    #[error("page {page} is out of range; pages start at 1")]
    PageOutOfRange { page: u32 },
}
