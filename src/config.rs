//! Application configuration.
//!
//! Handles loading configuration from environment variables and .env files.

use chrono::NaiveDate;
use dotenv::dotenv;
use std::env;
use std::path::PathBuf;
use std::time::Duration;
use crate::error::{Error, Result};

/// Default liturgy service endpoint.
pub const DEFAULT_API_URL: &str = "https://liturgia.up.railway.app/";

/// Configuration for the application.
#[derive(Debug, Clone)]
pub struct Config {
    /// The application name
    app_name: String,
    /// The application version
    app_version: String,
    /// Base URL of the liturgy service
    pub api_url: String,
    /// Request timeout; `None` waits for the service indefinitely
    pub request_timeout: Option<Duration>,
    /// Show the psalm exactly as received instead of formatting it
    pub raw_psalm: bool,
    /// Date to open on instead of today
    pub initial_date: Option<NaiveDate>,
    /// Where to write the log file, if anywhere
    pub log_path: Option<PathBuf>,
}

impl Config {
    /// Get the application name.
    #[must_use]
    pub fn app_name(&self) -> &str {
        &self.app_name
    }

    /// Get the application version.
    #[must_use]
    pub fn app_version(&self) -> &str {
        &self.app_version
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_name: env!("CARGO_PKG_NAME").to_string(),
            app_version: env!("CARGO_PKG_VERSION").to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            request_timeout: None,
            raw_psalm: false,
            initial_date: None,
            log_path: None,
        }
    }
}

impl Config {
    /// Load configuration from environment variables
    pub fn load() -> Result<Self> {
        // Try to load .env file if present
        dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build configuration from an arbitrary variable source.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup("LITURGIA_API_URL").filter(|u| !u.trim().is_empty()) {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(Error::config(
                    format!("LITURGIA_API_URL must be an http(s) URL, got {url:?}"),
                    "Use a value like https://liturgia.up.railway.app/",
                ));
            }
            config.api_url = url.to_string();
        }

        if let Some(secs) = lookup("LITURGIA_TIMEOUT_SECS") {
            let secs: u64 = secs.trim().parse().map_err(|_| {
                Error::config(
                    format!("LITURGIA_TIMEOUT_SECS is not a number: {secs:?}"),
                    "Set it to a whole number of seconds, or unset it to wait indefinitely",
                )
            })?;
            config.request_timeout = (secs > 0).then(|| Duration::from_secs(secs));
        }

        if let Some(flag) = lookup("LITURGIA_RAW_PSALM") {
            config.raw_psalm = parse_flag(&flag);
        }

        if let Some(date) = lookup("LITURGIA_DATE").filter(|d| !d.trim().is_empty()) {
            let parsed = NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d").map_err(|_| {
                Error::config(
                    format!("LITURGIA_DATE is not a valid date: {date:?}"),
                    "Use the YYYY-MM-DD format, e.g. 2024-12-25",
                )
            })?;
            config.initial_date = Some(parsed);
        }

        config.log_path = lookup("LITURGIA_LOG")
            .filter(|p| !p.trim().is_empty())
            .map(|p| PathBuf::from(shellexpand::tilde(p.trim()).to_string()));

        Ok(config)
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(
        value.trim().to_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

#[cfg(test)]
mod tests {
    #![allow(clippy::expect_used, clippy::unwrap_used, clippy::panic)]

    use super::*;
    use std::collections::HashMap;

    fn load(vars: &[(&str, &str)]) -> Result<Config> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect();
        Config::from_lookup(|key| map.get(key).cloned())
    }

    #[test]
    fn defaults_without_environment() {
        let config = load(&[]).unwrap();
        assert_eq!(config.api_url, DEFAULT_API_URL);
        assert!(config.request_timeout.is_none());
        assert!(!config.raw_psalm);
        assert!(config.initial_date.is_none());
        assert!(config.log_path.is_none());
        assert_eq!(config.app_name(), "liturgia");
    }

    #[test]
    fn reads_all_overrides() {
        let config = load(&[
            ("LITURGIA_API_URL", "http://localhost:8080/"),
            ("LITURGIA_TIMEOUT_SECS", "15"),
            ("LITURGIA_RAW_PSALM", "yes"),
            ("LITURGIA_DATE", "2024-12-25"),
            ("LITURGIA_LOG", "/tmp/liturgia.log"),
        ])
        .unwrap();

        assert_eq!(config.api_url, "http://localhost:8080/");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(15)));
        assert!(config.raw_psalm);
        assert_eq!(config.initial_date, NaiveDate::from_ymd_opt(2024, 12, 25));
        assert_eq!(config.log_path, Some(PathBuf::from("/tmp/liturgia.log")));
    }

    #[test]
    fn zero_timeout_means_none() {
        let config = load(&[("LITURGIA_TIMEOUT_SECS", "0")]).unwrap();
        assert!(config.request_timeout.is_none());
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(
            load(&[("LITURGIA_DATE", "25/12/2024")]),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            load(&[("LITURGIA_TIMEOUT_SECS", "soon")]),
            Err(Error::Config { .. })
        ));
        assert!(matches!(
            load(&[("LITURGIA_API_URL", "liturgia.up.railway.app")]),
            Err(Error::Config { .. })
        ));
    }

    #[test]
    fn flag_parsing() {
        assert!(parse_flag("TRUE"));
        assert!(parse_flag(" 1 "));
        assert!(!parse_flag("0"));
        assert!(!parse_flag("nope"));
    }
}
