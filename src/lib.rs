//! `Liturgia` - daily Catholic liturgy reader.
//!
//! Fetches the readings of the day from the public liturgy service and
//! renders them in the terminal with verse numbers highlighted.

// Re-export public modules for use in integration tests and the binaries
pub mod app;
pub mod config;
pub mod constants;
pub mod error;
pub mod input;
pub mod liturgy;
pub mod logging;
pub mod selection;
pub mod services;
pub mod ui;
