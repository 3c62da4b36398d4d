//! Domain error types
//!
//! These errors are framework-agnostic and describe why a catalog lookup
//! failed. The controller folds every variant into a single user-facing
//! message; the distinction only matters for logging and tests.

use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogError {
    /// The HTTP client could not be built
    Client(String),
    /// The request never produced a response (DNS, connect, reset...)
    Transport(String),
    /// The catalog answered with a non-success status code
    Status(u16),
    /// The response body was not the expected JSON document
    Parse(String),
}

impl fmt::Display for CatalogError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CatalogError::Client(msg) => write!(f, "Failed to build HTTP client: {}", msg),
            CatalogError::Transport(msg) => write!(f, "Failed to send request: {}", msg),
            CatalogError::Status(code) => write!(f, "Open Library API returned status: {}", code),
            CatalogError::Parse(msg) => write!(f, "Failed to parse JSON: {}", msg),
        }
    }
}

impl std::error::Error for CatalogError {}

impl From<reqwest::Error> for CatalogError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_decode() {
            CatalogError::Parse(e.to_string())
        } else if let Some(status) = e.status() {
            CatalogError::Status(status.as_u16())
        } else {
            CatalogError::Transport(e.to_string())
        }
    }
}

impl From<serde_json::Error> for CatalogError {
    fn from(e: serde_json::Error) -> Self {
        CatalogError::Parse(e.to_string())
    }
}
