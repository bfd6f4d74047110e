//! Application constants.
//!
//! Centralizes magic numbers and fixed display strings.

/// Community branding shown in the header and footer.
pub mod branding {
    /// Community name in the header.
    pub const COMMUNITY_NAME: &str = "Grupo Sião";

    /// Subtitle under the community name.
    pub const COMMUNITY_SUBTITLE: &str = "Comunidade Católica Shalom";

    /// Title of the liturgy card.
    pub const CARD_TITLE: &str = "Liturgia Diária";

    /// Label before the liturgical color.
    pub const COLOR_LABEL: &str = "COR LITÚRGICA";
}

/// Async task constants.
pub mod async_tasks {
    /// Channel buffer size for async task communication.
    pub const CHANNEL_BUFFER_SIZE: usize = 64;
}

/// UI layout and timing constants.
pub mod ui {
    /// How long to wait for a terminal event per loop iteration.
    pub const POLL_INTERVAL_MS: u64 = 50;

    /// Sleep between idle iterations so spawned fetches get scheduled.
    pub const IDLE_SLEEP_MS: u64 = 5;

    /// Lines moved per scroll step.
    pub const SCROLL_STEP: u16 = 1;

    /// Lines moved per page scroll.
    pub const PAGE_STEP: u16 = 10;

    /// Calendar popup width (7 cells of 4 columns plus borders).
    pub const CALENDAR_WIDTH: u16 = 32;

    /// Calendar popup height (title, weekday row, six weeks, hint, borders).
    pub const CALENDAR_HEIGHT: u16 = 12;
}

/// Calendar constants.
pub mod calendar {
    /// Weekday column headings, Sunday first.
    pub const WEEKDAY_LABELS: [&str; 7] = ["D", "S", "T", "Q", "Q", "S", "S"];
}
