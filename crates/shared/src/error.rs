use serde::{Deserialize, Serialize};

/// Error body the catalog service returns alongside a non-success status.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ServiceErrorBody {
    #[serde(default)]
    pub status: Option<u16>,
    #[serde(default)]
    pub error: Option<String>,
    #[serde(default)]
    pub detail: Option<String>,
}

impl ServiceErrorBody {
    pub fn parse(bytes: &[u8]) -> Option<Self> {
        serde_json::from_slice(bytes).ok()
    }

    /// Most specific human-readable message in the body, if any.
    pub fn message(&self) -> Option<&str> {
        self.detail
            .as_deref()
            .or(self.error.as_deref())
            .filter(|message| !message.trim().is_empty())
    }
}
