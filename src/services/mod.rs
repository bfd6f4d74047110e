//! Service modules for extracted functionality.
//!
//! This module contains the pure transformations used by the front-end,
//! kept apart from the App struct so they can be tested on their own.

pub mod dates;
pub mod formatter;
