//! Selected date, loaded liturgy and loading flag.
//!
//! All three live in one container whose only mutators are
//! [`SelectionState::select_date`] and [`SelectionState::on_fetch_settled`],
//! so the loading bracket and the "newest selection wins" rule are enforced
//! in a single place regardless of the order fetches complete in.

use chrono::NaiveDate;

use crate::error::{Error, Result};
use crate::liturgy::LiturgyDocument;

/// Issued by [`SelectionState::select_date`]; identifies one fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchTicket {
    /// Monotonically increasing per selection.
    pub seq: u64,
    /// Date the fetch is for.
    pub date: NaiveDate,
}

/// What happened when a fetch settled.
#[derive(Debug)]
pub enum Settlement {
    /// The document replaced the previous one.
    Applied,
    /// The newest fetch failed; the previous document stays.
    Failed(Error),
    /// A newer selection was made meanwhile; the result was discarded.
    Stale,
}

/// Date selection state shared by the front-end.
#[derive(Debug, Clone)]
pub struct SelectionState {
    selected_date: NaiveDate,
    document: Option<LiturgyDocument>,
    in_flight: usize,
    issued: u64,
}

impl SelectionState {
    /// Start with `date` selected and nothing loaded.
    pub const fn new(date: NaiveDate) -> Self {
        Self {
            selected_date: date,
            document: None,
            in_flight: 0,
            issued: 0,
        }
    }

    /// Currently selected date.
    pub const fn selected_date(&self) -> NaiveDate {
        self.selected_date
    }

    /// True exactly while at least one fetch is in flight.
    pub const fn is_loading(&self) -> bool {
        self.in_flight > 0
    }

    /// Last successfully loaded document, if any.
    pub const fn document(&self) -> Option<&LiturgyDocument> {
        self.document.as_ref()
    }

    /// Select a date and open a fetch for it. Every call opens exactly one
    /// fetch, even when the date does not change (that is how reloads work).
    pub fn select_date(&mut self, date: NaiveDate) -> FetchTicket {
        self.selected_date = date;
        self.issued += 1;
        self.in_flight += 1;
        tracing::debug!(seq = self.issued, %date, "fetch opened");
        FetchTicket { seq: self.issued, date }
    }

    /// Close the fetch identified by `ticket`. Always clears its share of the
    /// loading flag; only the newest selection's success replaces the
    /// document.
    pub fn on_fetch_settled(
        &mut self,
        ticket: FetchTicket,
        result: Result<LiturgyDocument>,
    ) -> Settlement {
        self.in_flight = self.in_flight.saturating_sub(1);

        if ticket.seq != self.issued {
            match &result {
                Ok(_) => tracing::debug!(seq = ticket.seq, date = %ticket.date, "discarding stale liturgy"),
                Err(e) => tracing::warn!(seq = ticket.seq, date = %ticket.date, "stale fetch failed: {e}"),
            }
            return Settlement::Stale;
        }

        match result {
            Ok(document) => {
                tracing::info!(date = %ticket.date, liturgy = %document.name, "liturgy loaded");
                self.document = Some(document);
                Settlement::Applied
            }
            Err(e) => {
                tracing::error!(date = %ticket.date, "failed to fetch liturgy: {e}");
                Settlement::Failed(e)
            }
        }
    }
}
