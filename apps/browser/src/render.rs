//! Plain-text rendering of a [`PageView`].

use std::fmt::Write as _;

use client_core::{PageView, SelectionRegistry};

const TITLE_WIDTH: usize = 36;
const ORIGIN_WIDTH: usize = 16;
const ARTIST_WIDTH: usize = 30;

pub fn render_page(view: &PageView) -> String {
    let mut out = String::new();
    let summary = &view.pagination;
    let _ = write!(
        out,
        "Page {} of {} | {}",
        summary.page,
        summary.page_count.max(1),
        summary.report()
    );
    if view.loading {
        out.push_str(" | loading...");
    }
    out.push('\n');

    if let Some(error) = &view.error {
        let _ = writeln!(out, "! {error}");
    }

    let _ = writeln!(
        out,
        "{:>3}  {:3}  {:TITLE_WIDTH$}  {:ORIGIN_WIDTH$}  {:ARTIST_WIDTH$}  {:>6}  {:>6}",
        "#", "sel", "Title", "Origin", "Artist", "Start", "End"
    );
    for (index, row) in view.rows.iter().enumerate() {
        let record = &row.record;
        let _ = writeln!(
            out,
            "{:>3}  {:3}  {:TITLE_WIDTH$}  {:ORIGIN_WIDTH$}  {:ARTIST_WIDTH$}  {:>6}  {:>6}",
            index + 1,
            if row.selected { "[x]" } else { "[ ]" },
            clip(record.title.as_deref().unwrap_or(""), TITLE_WIDTH),
            clip(record.place_of_origin.as_deref().unwrap_or(""), ORIGIN_WIDTH),
            clip(first_line(record.artist_display.as_deref()), ARTIST_WIDTH),
            year(record.date_start),
            year(record.date_end),
        );
    }
    if view.rows.is_empty() && !view.loading {
        out.push_str("  (no records)\n");
    }

    let links: Vec<String> = summary
        .page_links
        .iter()
        .map(|page| {
            if *page == summary.page {
                format!("[{page}]")
            } else {
                page.to_string()
            }
        })
        .collect();
    let _ = writeln!(
        out,
        "Pages: {} | rows per page: {} (draft: {})",
        links.join(" "),
        summary.page_size,
        view.page_size_draft
    );
    out
}

pub fn render_selection(selection: &SelectionRegistry) -> String {
    let mut out = format!("{} selected\n", selection.len());
    for identity in selection.identities() {
        let label = if identity.as_str().is_empty() {
            "(untitled)"
        } else {
            identity.as_str()
        };
        let _ = writeln!(out, "  - {label}");
    }
    out
}

fn first_line(value: Option<&str>) -> &str {
    value.and_then(|value| value.lines().next()).unwrap_or("")
}

fn year(value: Option<i32>) -> String {
    value.map(|year| year.to_string()).unwrap_or_default()
}

/// Truncates to `width` characters, marking the cut with `~`.
fn clip(value: &str, width: usize) -> String {
    if value.chars().count() <= width {
        return value.to_string();
    }
    let mut clipped: String = value.chars().take(width.saturating_sub(1)).collect();
    clipped.push('~');
    clipped
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
