//! Async driver that runs fetches for a [`PageViewController`].
//!
//! Fetch tasks only call the catalog and hand the result back; every state
//! change happens on the task that owns the session.

use std::sync::Arc;

use tokio::task::JoinSet;
use tracing::{debug, error};

use crate::{
    catalog::{CatalogPage, CatalogSource},
    controller::{FetchOutcome, FetchTicket, LoadPhase, PageView, PageViewController},
    error::{FetchError, InvalidPageSize},
    events::ViewEvent,
};

type FetchCompletion = (FetchTicket, Result<CatalogPage, FetchError>);

pub struct PageSession {
    source: Arc<dyn CatalogSource>,
    controller: PageViewController,
    in_flight: JoinSet<FetchCompletion>,
}

impl PageSession {
    pub fn new(source: Arc<dyn CatalogSource>, controller: PageViewController) -> Self {
        Self {
            source,
            controller,
            in_flight: JoinSet::new(),
        }
    }

    pub fn controller(&self) -> &PageViewController {
        &self.controller
    }

    pub fn view(&self) -> PageView {
        self.controller.view()
    }

    pub fn has_in_flight(&self) -> bool {
        !self.in_flight.is_empty()
    }

    /// Starts loading the initial page.
    pub fn open(&mut self) {
        let ticket = self.controller.start();
        self.dispatch(ticket);
    }

    pub fn handle_event(&mut self, event: ViewEvent) -> Result<(), InvalidPageSize> {
        debug!(event = event.name(), "session: view event");
        if let Some(ticket) = self.controller.handle_event(event)? {
            self.dispatch(ticket);
        }
        Ok(())
    }

    pub fn next_page(&mut self) {
        let ticket = self.controller.next_page();
        self.dispatch_opt(ticket);
    }

    pub fn previous_page(&mut self) {
        let ticket = self.controller.previous_page();
        self.dispatch_opt(ticket);
    }

    pub fn first_page(&mut self) {
        let ticket = self.controller.first_page();
        self.dispatch_opt(ticket);
    }

    pub fn last_page(&mut self) {
        let ticket = self.controller.last_page();
        self.dispatch_opt(ticket);
    }

    pub fn retry(&mut self) {
        let ticket = self.controller.retry();
        self.dispatch_opt(ticket);
    }

    /// Waits for the next finished fetch and applies it.
    ///
    /// Returns `None` once nothing is in flight.
    pub async fn next_completion(&mut self) -> Option<FetchOutcome> {
        loop {
            match self.in_flight.join_next().await? {
                Ok((ticket, result)) => return Some(self.controller.apply_fetch(ticket, result)),
                Err(err) => error!("session: fetch task failed: {err}"),
            }
        }
    }

    /// Applies completions until the current request has resolved.
    pub async fn settle(&mut self) -> LoadPhase {
        while self.controller.is_loading() {
            if self.next_completion().await.is_none() {
                break;
            }
        }
        self.controller.phase()
    }

    fn dispatch_opt(&mut self, ticket: Option<FetchTicket>) {
        if let Some(ticket) = ticket {
            self.dispatch(ticket);
        }
    }

    fn dispatch(&mut self, ticket: FetchTicket) {
        let source = Arc::clone(&self.source);
        self.in_flight.spawn(async move {
            let request = ticket.request();
            // A panicking source must still hand its ticket back, or the
            // controller would wait on this request forever.
            let result = tokio::spawn(async move { source.fetch_page(request).await })
                .await
                .unwrap_or_else(|err| {
                    error!(page = request.page, "session: fetch task failed: {err}");
                    Err(FetchError::Aborted {
                        page: request.page,
                        reason: err.to_string(),
                    })
                });
            (ticket, result)
        });
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
