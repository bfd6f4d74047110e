//! Input handling abstractions.
//!
//! This module maps key events to application actions, with one handler per
//! mode so each can be tested without a terminal.

use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

/// Something the user asked the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    /// Leave the application.
    Quit,
    /// Close the help modal or clear the status message.
    Dismiss,
    /// Show or hide the help modal.
    ToggleHelp,
    /// Next passage tab.
    NextTab,
    /// Previous passage tab.
    PrevTab,
    /// Scroll the passage by this many lines (negative is up).
    Scroll(i32),
    /// Select the day before / after the current one.
    ShiftDay(i64),
    /// Select today.
    Today,
    /// Open the date picker.
    OpenCalendar,
    /// Fetch the selected date again.
    Reload,
    /// Copy the visible passage to the clipboard.
    CopyPassage,
    /// Move the picker cursor by days.
    CalendarDays(i64),
    /// Move the picker cursor by months.
    CalendarMonths(i32),
    /// Pick the date under the cursor.
    CalendarConfirm,
    /// Close the picker without changing the date.
    CalendarCancel,
}

/// Result of processing an input event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputResult {
    /// The key maps to an action.
    Action(Action),
    /// The input was ignored (not applicable to this handler).
    Ignored,
}

/// Application modes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AppMode {
    /// Reading the day's passages.
    #[default]
    Browse,
    /// Date picker open.
    Calendar,
}

/// Context passed to input handlers.
#[derive(Debug, Clone, Copy)]
pub struct InputContext {
    /// Current application mode.
    pub mode: AppMode,
    /// Whether help is currently shown.
    pub show_help: bool,
    /// Whether a status message is displayed.
    pub has_message: bool,
}

/// Trait for handling keyboard input.
pub trait InputHandler {
    /// Handle a key event.
    fn handle(&self, key: KeyEvent, ctx: &InputContext) -> InputResult;

    /// Get the name of this handler (for debugging).
    fn name(&self) -> &'static str;
}

/// Handler for global shortcuts (help, quit, dismiss).
#[derive(Debug, Default)]
pub struct GlobalHandler;

impl InputHandler for GlobalHandler {
    fn handle(&self, key: KeyEvent, ctx: &InputContext) -> InputResult {
        if key.modifiers.contains(KeyModifiers::CONTROL) && key.code == KeyCode::Char('c') {
            return InputResult::Action(Action::Quit);
        }

        if key.code == KeyCode::F(1) || key.code == KeyCode::Char('?') {
            return InputResult::Action(Action::ToggleHelp);
        }

        // While a modal or message is up, Esc only closes it.
        if key.code == KeyCode::Esc && (ctx.show_help || ctx.has_message) {
            return InputResult::Action(Action::Dismiss);
        }

        InputResult::Ignored
    }

    fn name(&self) -> &'static str {
        "GlobalHandler"
    }
}

/// Handler for the passage view.
#[derive(Debug, Default)]
pub struct BrowseHandler;

impl InputHandler for BrowseHandler {
    fn handle(&self, key: KeyEvent, _ctx: &InputContext) -> InputResult {
        use crate::constants::ui::{PAGE_STEP, SCROLL_STEP};

        let action = match key.code {
            KeyCode::Char('q') | KeyCode::Esc => Action::Quit,
            KeyCode::Right | KeyCode::Char('l') | KeyCode::Tab => Action::NextTab,
            KeyCode::Left | KeyCode::Char('h') | KeyCode::BackTab => Action::PrevTab,
            KeyCode::Down | KeyCode::Char('j') => Action::Scroll(i32::from(SCROLL_STEP)),
            KeyCode::Up | KeyCode::Char('k') => Action::Scroll(-i32::from(SCROLL_STEP)),
            KeyCode::PageDown => Action::Scroll(i32::from(PAGE_STEP)),
            KeyCode::PageUp => Action::Scroll(-i32::from(PAGE_STEP)),
            KeyCode::Char('[') => Action::ShiftDay(-1),
            KeyCode::Char(']') => Action::ShiftDay(1),
            KeyCode::Char('t') => Action::Today,
            KeyCode::Char('c') | KeyCode::Enter => Action::OpenCalendar,
            KeyCode::Char('r') => Action::Reload,
            KeyCode::Char('y') => Action::CopyPassage,
            _ => return InputResult::Ignored,
        };
        InputResult::Action(action)
    }

    fn name(&self) -> &'static str {
        "BrowseHandler"
    }
}

/// Handler for the date picker.
#[derive(Debug, Default)]
pub struct CalendarHandler;

impl InputHandler for CalendarHandler {
    fn handle(&self, key: KeyEvent, _ctx: &InputContext) -> InputResult {
        let action = match key.code {
            KeyCode::Left | KeyCode::Char('h') => Action::CalendarDays(-1),
            KeyCode::Right | KeyCode::Char('l') => Action::CalendarDays(1),
            KeyCode::Up | KeyCode::Char('k') => Action::CalendarDays(-7),
            KeyCode::Down | KeyCode::Char('j') => Action::CalendarDays(7),
            KeyCode::PageUp | KeyCode::Char('[') => Action::CalendarMonths(-1),
            KeyCode::PageDown | KeyCode::Char(']') => Action::CalendarMonths(1),
            KeyCode::Enter | KeyCode::Char(' ') => Action::CalendarConfirm,
            KeyCode::Esc | KeyCode::Char('q') => Action::CalendarCancel,
            _ => return InputResult::Ignored,
        };
        InputResult::Action(action)
    }

    fn name(&self) -> &'static str {
        "CalendarHandler"
    }
}

/// Run the global handler, then the one for the current mode.
pub fn dispatch(key: KeyEvent, ctx: &InputContext) -> Option<Action> {
    let mode_handler: &dyn InputHandler = match ctx.mode {
        AppMode::Browse => &BrowseHandler,
        AppMode::Calendar => &CalendarHandler,
    };

    [&GlobalHandler as &dyn InputHandler, mode_handler]
        .into_iter()
        .find_map(|handler| match handler.handle(key, ctx) {
            InputResult::Action(action) => {
                tracing::trace!(handler = handler.name(), ?action, "key handled");
                Some(action)
            }
            InputResult::Ignored => None,
        })
}
