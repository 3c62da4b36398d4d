use std::env;
use std::time::Duration;

use crate::modules::integrations::openlibrary::DEFAULT_BASE_URL;
use crate::services::SearchSettings;

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Config {
    pub catalog_base_url: String,
    pub debounce_ms: u64,
    pub min_query_chars: usize,
    pub display_limit: usize,
    pub catalog_timeout_secs: Option<u64>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_BASE_URL.to_string(),
            debounce_ms: 500,
            min_query_chars: 3,
            display_limit: 20,
            catalog_timeout_secs: None,
        }
    }
}

impl Config {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Build a config from any key lookup. Missing or unparseable values
    /// fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();

        Self {
            catalog_base_url: lookup("CATALOG_BASE_URL")
                .map(|s| s.trim().to_string())
                .filter(|s| !s.is_empty())
                .unwrap_or(defaults.catalog_base_url),
            debounce_ms: lookup("SEARCH_DEBOUNCE_MS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.debounce_ms),
            min_query_chars: lookup("SEARCH_MIN_CHARS")
                .and_then(|v| v.trim().parse().ok())
                .unwrap_or(defaults.min_query_chars),
            display_limit: lookup("SEARCH_DISPLAY_LIMIT")
                .and_then(|v| v.trim().parse().ok())
                .filter(|limit| *limit > 0)
                .unwrap_or(defaults.display_limit),
            catalog_timeout_secs: lookup("CATALOG_TIMEOUT_SECS")
                .and_then(|v| v.trim().parse().ok())
                .filter(|secs| *secs > 0),
        }
    }

    pub fn catalog_timeout(&self) -> Option<Duration> {
        self.catalog_timeout_secs.map(Duration::from_secs)
    }

    pub fn search_settings(&self) -> SearchSettings {
        SearchSettings {
            debounce: Duration::from_millis(self.debounce_ms),
            min_query_chars: self.min_query_chars,
            display_limit: self.display_limit,
            link_base: self.catalog_base_url.clone(),
        }
    }
}
