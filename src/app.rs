//! Application state and event handling.
//!
//! `App` owns the selection, the view state (tab, scroll, calendar cursor,
//! help, status line) and the channel fetch tasks report back on.

use std::sync::Arc;

use arboard::Clipboard;
use chrono::{Local, NaiveDate};
use crossterm::event::KeyEvent;
use tokio::sync::mpsc;

use crate::config::Config;
use crate::constants::async_tasks::CHANNEL_BUFFER_SIZE;
use crate::error::{Error, Result};
use crate::input::{self, Action, AppMode, InputContext};
use crate::liturgy::{LiturgyClient, LiturgyDocument, LiturgySource, Passage, PassageKind};
use crate::selection::{FetchTicket, SelectionState, Settlement};
use crate::services::dates;
use crate::services::formatter::{self, Segment};

/// Messages sent back from spawned fetch tasks
#[derive(Debug)]
pub enum AppUpdate {
    /// A fetch settled, successfully or not.
    LiturgyLoaded {
        /// Ticket issued when the fetch started.
        ticket: FetchTicket,
        /// Outcome of the fetch.
        result: Result<LiturgyDocument>,
    },
}

/// Main application state.
pub struct App {
    /// Browsing passages or picking a date.
    pub mode: AppMode,
    selection: SelectionState,
    /// Index into `tabs()`
    pub tab_index: usize,
    /// Lines scrolled in the passage body.
    pub scroll: u16,
    /// Date highlighted in the picker.
    pub calendar_cursor: NaiveDate,
    /// Help modal visibility.
    pub show_help: bool,
    /// Dismissable message in the command bar.
    pub status_message: Option<String>,
    /// Set when the user asked to leave.
    pub should_quit: bool,
    /// Loaded configuration.
    pub config: Config,
    source: Arc<dyn LiturgySource>,
    async_task_tx: mpsc::Sender<AppUpdate>,
    async_task_rx: mpsc::Receiver<AppUpdate>,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

impl App {
    /// Create an app talking to the configured liturgy service. Starts on
    /// `LITURGIA_DATE` or today; nothing is fetched until [`App::start`].
    pub fn new(config: Config) -> Self {
        let source: Arc<dyn LiturgySource> = Arc::new(LiturgyClient::new(&config));
        let date = config.initial_date.unwrap_or_else(today);
        Self::with_source(config, source, date)
    }

    /// Create an app over any liturgy source, starting on `date`.
    pub fn with_source(config: Config, source: Arc<dyn LiturgySource>, date: NaiveDate) -> Self {
        let (async_task_tx, async_task_rx) = mpsc::channel(CHANNEL_BUFFER_SIZE);
        Self {
            mode: AppMode::Browse,
            selection: SelectionState::new(date),
            tab_index: 0,
            scroll: 0,
            calendar_cursor: date,
            show_help: false,
            status_message: None,
            should_quit: false,
            config,
            source,
            async_task_tx,
            async_task_rx,
        }
    }

    /// Initial load for the starting date.
    pub fn start(&mut self) {
        self.select_date(self.selection.selected_date());
    }

    /// Whether the main loop should exit.
    pub const fn should_quit(&self) -> bool {
        self.should_quit
    }

    /// Selection state (date, document, loading).
    pub const fn selection(&self) -> &SelectionState {
        &self.selection
    }

    /// Whether any fetch is outstanding.
    pub const fn is_loading(&self) -> bool {
        self.selection.is_loading()
    }

    /// Most recently applied document.
    pub const fn document(&self) -> Option<&LiturgyDocument> {
        self.selection.document()
    }

    /// Date the user last selected.
    pub const fn selected_date(&self) -> NaiveDate {
        self.selection.selected_date()
    }

    /// Select a date and fetch its liturgy in the background. The loading
    /// flag is raised before this returns.
    pub fn select_date(&mut self, date: NaiveDate) {
        let ticket = self.selection.select_date(date);
        self.calendar_cursor = date;

        let source = Arc::clone(&self.source);
        let tx = self.async_task_tx.clone();
        tokio::spawn(async move {
            // The fetch runs in its own task so a panic still settles the ticket
            let fetch = tokio::spawn(async move { source.fetch_liturgy(ticket.date).await });
            let result = fetch.await.unwrap_or_else(|e| {
                tracing::error!(seq = ticket.seq, "liturgy fetch task failed: {e}");
                Err(Error::Msg(format!("Fetch for {} did not complete: {e}", ticket.date)))
            });
            if tx.send(AppUpdate::LiturgyLoaded { ticket, result }).await.is_err() {
                tracing::debug!(seq = ticket.seq, "app gone before fetch settled");
            }
        });
    }

    /// Drain results of background fetches
    pub fn handle_updates(&mut self) {
        loop {
            match self.async_task_rx.try_recv() {
                Ok(update) => self.apply_update(update),
                Err(mpsc::error::TryRecvError::Empty | mpsc::error::TryRecvError::Disconnected) => break,
            }
        }
    }

    fn apply_update(&mut self, update: AppUpdate) {
        match update {
            AppUpdate::LiturgyLoaded { ticket, result } => {
                match self.selection.on_fetch_settled(ticket, result) {
                    Settlement::Applied => {
                        // New document, new tab set
                        self.tab_index = 0;
                        self.scroll = 0;
                        self.status_message = None;
                    }
                    Settlement::Failed(_) => {
                        self.status_message = Some(format!(
                            "Não foi possível carregar a liturgia de {}",
                            dates::format_long_date(ticket.date)
                        ));
                    }
                    Settlement::Stale => {}
                }
            }
        }
    }

    /// Map a key press to an action for the current mode and apply it.
    pub fn handle_key(&mut self, key: KeyEvent) {
        let ctx = InputContext {
            mode: self.mode,
            show_help: self.show_help,
            has_message: self.status_message.is_some(),
        };
        if let Some(action) = input::dispatch(key, &ctx) {
            self.apply(action);
        }
    }

    /// Apply one user action.
    pub fn apply(&mut self, action: Action) {
        match action {
            Action::Quit => self.should_quit = true,
            Action::Dismiss => {
                if self.show_help {
                    self.show_help = false;
                } else {
                    self.status_message = None;
                }
            }
            Action::ToggleHelp => self.show_help = !self.show_help,
            Action::NextTab => self.cycle_tab(true),
            Action::PrevTab => self.cycle_tab(false),
            Action::Scroll(delta) => {
                let next = i32::from(self.scroll) + delta;
                self.scroll = u16::try_from(next.max(0)).unwrap_or(u16::MAX);
            }
            Action::ShiftDay(days) => {
                self.select_date(dates::shift_days(self.selected_date(), days));
            }
            Action::Today => self.select_date(today()),
            Action::Reload => self.select_date(self.selected_date()),
            Action::OpenCalendar => {
                self.calendar_cursor = self.selected_date();
                self.mode = AppMode::Calendar;
            }
            Action::CopyPassage => self.copy_current_passage(),
            Action::CalendarDays(days) => {
                self.calendar_cursor = dates::shift_days(self.calendar_cursor, days);
            }
            Action::CalendarMonths(months) => {
                self.calendar_cursor = dates::shift_months(self.calendar_cursor, months);
            }
            Action::CalendarConfirm => {
                self.mode = AppMode::Browse;
                self.select_date(self.calendar_cursor);
            }
            Action::CalendarCancel => self.mode = AppMode::Browse,
        }
    }

    fn cycle_tab(&mut self, forward: bool) {
        let count = self.tabs().len();
        if count == 0 {
            return;
        }
        self.tab_index = if forward {
            (self.tab_index + 1) % count
        } else {
            (self.tab_index + count - 1) % count
        };
        self.scroll = 0;
    }

    /// Passage tabs for the loaded document. The second reading only shows
    /// up when the day has one.
    pub fn tabs(&self) -> Vec<PassageKind> {
        self.document()
            .map(|doc| doc.passages().into_iter().map(|(kind, _)| kind).collect())
            .unwrap_or_default()
    }

    /// Passage of the selected tab, clamped to the tabs available.
    pub fn current_passage(&self) -> Option<(PassageKind, &Passage)> {
        let doc = self.document()?;
        let passages = doc.passages();
        let index = self.tab_index.min(passages.len().checked_sub(1)?);
        passages.get(index).copied()
    }

    /// Display segments for a passage. The psalm is left raw when
    /// configured to show it unformatted.
    pub fn passage_segments(&self, kind: PassageKind, passage: &Passage) -> Vec<Segment> {
        if kind == PassageKind::Psalm && self.config.raw_psalm {
            if passage.text.is_empty() {
                return Vec::new();
            }
            return vec![Segment::plain(passage.text.clone())];
        }
        formatter::format_segments(&passage.text)
    }

    /// Plain text of the visible passage, as copied to the clipboard.
    pub fn current_passage_text(&self) -> Option<String> {
        let (kind, passage) = self.current_passage()?;
        let body = formatter::to_plain(&self.passage_segments(kind, passage));
        let header: Vec<&str> = [passage.title.as_str(), passage.reference.as_str()]
            .into_iter()
            .filter(|s| !s.is_empty())
            .collect();
        Some(format!("{}\n\n{body}", header.join("\n")))
    }

    fn copy_current_passage(&mut self) {
        let Some(text) = self.current_passage_text() else {
            return;
        };
        match Clipboard::new().and_then(|mut cb| cb.set_text(text)) {
            Ok(()) => self.status_message = Some("Texto copiado".to_string()),
            Err(e) => {
                tracing::warn!("clipboard unavailable: {e}");
                self.status_message = Some("Área de transferência indisponível".to_string());
            }
        }
    }
}
