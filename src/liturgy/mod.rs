//! Liturgy service integration.
//!
//! Provides the data model of one day's liturgy and the client that fetches
//! it from the remote liturgy service.

/// API client for liturgy service requests
pub mod api;
/// Data types representing the liturgy service payload
pub mod types;

// Re-export key components
pub use api::{liturgy_query, LiturgyClient, LiturgySource};
pub use types::{LiturgicalColor, LiturgyDocument, Passage, PassageKind};
