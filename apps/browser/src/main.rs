use std::{num::NonZeroU32, path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use clap::Parser;
use client_core::{
    config::{load_settings_from, DEFAULT_CONFIG_FILE},
    controller_from_settings, CatalogClient, FetchOutcome, PageSession, ViewEvent,
};
use shared::domain::Record;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing_subscriber::EnvFilter;

mod commands;
mod render;

use commands::{parse_command, Command, HELP};

#[derive(Parser, Debug)]
#[command(about = "Browse a paginated artwork catalog and pick records across pages")]
struct Args {
    /// Listing endpoint; overrides the config file and environment.
    #[arg(long)]
    catalog_url: Option<String>,
    #[arg(long)]
    page_size: Option<NonZeroU32>,
    #[arg(long, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// Print each page as one JSON object per line instead of a table.
    #[arg(long)]
    json: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_writer(std::io::stderr)
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings_from(&args.config, |key| std::env::var(key).ok())?;
    if let Some(url) = args.catalog_url {
        settings.catalog_url = url;
    }
    if let Some(page_size) = args.page_size {
        settings.page_size = page_size;
    }
    tracing::info!(
        catalog_url = %settings.catalog_url,
        page_size = settings.page_size.get(),
        "browser: starting"
    );

    let client = CatalogClient::new(&settings.catalog_url, settings.request_timeout)?;
    let mut session = PageSession::new(Arc::new(client), controller_from_settings(&settings));
    let terminal = Terminal { json: args.json };

    session.open();
    println!("type 'help' for commands");

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    loop {
        tokio::select! {
            line = lines.next_line() => {
                let Some(line) = line.context("failed to read stdin")? else {
                    break;
                };
                if line.trim().is_empty() {
                    continue;
                }
                match parse_command(&line) {
                    Ok(Command::Quit) => break,
                    Ok(command) => run_command(&mut session, &terminal, command)?,
                    Err(err) => eprintln!("{err:#}"),
                }
            }
            Some(outcome) = session.next_completion(), if session.has_in_flight() => {
                if outcome != FetchOutcome::Stale {
                    terminal.page(&session)?;
                }
            }
        }
    }

    let selected = session.controller().selection();
    tracing::info!(selected = selected.len(), "browser: session ended");
    print!("{}", render::render_selection(selected));
    Ok(())
}

struct Terminal {
    json: bool,
}

impl Terminal {
    fn page(&self, session: &PageSession) -> Result<()> {
        let view = session.view();
        if self.json {
            println!("{}", serde_json::to_string(&view)?);
        } else {
            print!("{}", render::render_page(&view));
        }
        Ok(())
    }
}

fn run_command(session: &mut PageSession, terminal: &Terminal, command: Command) -> Result<()> {
    match command {
        Command::Page(page) => send(session, ViewEvent::PageRequested(page)),
        Command::Next => session.next_page(),
        Command::Previous => session.previous_page(),
        Command::First => session.first_page(),
        Command::Last => session.last_page(),
        Command::Select(rows) => {
            for record in rows_at(session, &rows) {
                send(session, ViewEvent::RowSelected(record));
            }
        }
        Command::Unselect(rows) => {
            for record in rows_at(session, &rows) {
                send(session, ViewEvent::RowUnselected(record));
            }
        }
        Command::SelectAll => {
            let visible = session.controller().records().to_vec();
            send(session, ViewEvent::BulkSelectionChanged(visible));
        }
        Command::Size(raw) => send(session, ViewEvent::PageSizeDraftChanged(raw)),
        Command::Apply => send(session, ViewEvent::PageSizeConfirmRequested),
        Command::Retry => session.retry(),
        Command::Selection => {
            print!("{}", render::render_selection(session.controller().selection()));
            return Ok(());
        }
        Command::Show => {}
        Command::Help => {
            println!("{HELP}");
            return Ok(());
        }
        Command::Quit => return Ok(()),
    }
    terminal.page(session)
}

fn send(session: &mut PageSession, event: ViewEvent) {
    if let Err(err) = session.handle_event(event) {
        eprintln!("{err}");
    }
}

/// Records at one-based positions; positions past the end are reported and skipped.
fn rows_at(session: &PageSession, rows: &[usize]) -> Vec<Record> {
    let records = session.controller().records();
    rows.iter()
        .filter_map(|row| {
            let record = records.get(row - 1).cloned();
            if record.is_none() {
                eprintln!("no row {row} on this page");
            }
            record
        })
        .collect()
}
