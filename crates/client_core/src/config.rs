use std::{fs, num::NonZeroU32, path::Path, time::Duration};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::pagination::{DEFAULT_PAGE_LINK_WINDOW, DEFAULT_PAGE_SIZE};

pub const DEFAULT_CATALOG_URL: &str = "https://api.artic.edu/api/v1/artworks";
pub const DEFAULT_CONFIG_FILE: &str = "catalog.toml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub catalog_url: String,
    pub page_size: NonZeroU32,
    pub page_link_window: u32,
    pub request_timeout: Option<Duration>,
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            catalog_url: DEFAULT_CATALOG_URL.into(),
            page_size: DEFAULT_PAGE_SIZE,
            page_link_window: DEFAULT_PAGE_LINK_WINDOW,
            request_timeout: None,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
struct FileSettings {
    catalog_url: Option<String>,
    page_size: Option<u32>,
    page_link_window: Option<u32>,
    request_timeout_secs: Option<u64>,
}

/// Defaults, then the TOML file at `path`, then environment.
///
/// A missing file is not an error; an unreadable or invalid one is.
pub fn load_settings_from(
    path: &Path,
    env: impl Fn(&str) -> Option<String>,
) -> Result<Settings> {
    let mut settings = Settings::default();

    if path.exists() {
        let raw = fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        let file_cfg: FileSettings = toml::from_str(&raw)
            .with_context(|| format!("failed to parse {}", path.display()))?;
        apply_file_settings(&mut settings, file_cfg)?;
    }

    if let Some(v) = env("CATALOG_URL") {
        settings.catalog_url = v;
    }
    if let Some(v) = env("APP__CATALOG_URL") {
        settings.catalog_url = v;
    }
    if let Some(v) = env("APP__PAGE_SIZE") {
        settings.page_size = parse_page_size(&v).context("invalid APP__PAGE_SIZE")?;
    }
    if let Some(v) = env("APP__PAGE_LINK_WINDOW") {
        settings.page_link_window = v
            .trim()
            .parse()
            .with_context(|| format!("invalid APP__PAGE_LINK_WINDOW '{v}'"))?;
    }
    if let Some(v) = env("APP__REQUEST_TIMEOUT_SECS") {
        let secs: u64 = v
            .trim()
            .parse()
            .with_context(|| format!("invalid APP__REQUEST_TIMEOUT_SECS '{v}'"))?;
        settings.request_timeout = timeout_from_secs(secs);
    }

    Ok(settings)
}

fn apply_file_settings(settings: &mut Settings, file_cfg: FileSettings) -> Result<()> {
    if let Some(v) = file_cfg.catalog_url {
        settings.catalog_url = v;
    }
    if let Some(v) = file_cfg.page_size {
        settings.page_size = NonZeroU32::new(v).context("page_size must be at least 1")?;
    }
    if let Some(v) = file_cfg.page_link_window {
        settings.page_link_window = v;
    }
    if let Some(secs) = file_cfg.request_timeout_secs {
        settings.request_timeout = timeout_from_secs(secs);
    }
    Ok(())
}

pub fn parse_page_size(raw: &str) -> Result<NonZeroU32> {
    let value: u32 = raw
        .trim()
        .parse()
        .with_context(|| format!("'{raw}' is not a whole number"))?;
    NonZeroU32::new(value).context("page size must be at least 1")
}

/// Zero disables the timeout.
fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

#[cfg(test)]
#[path = "tests/config_tests.rs"]
mod tests;
