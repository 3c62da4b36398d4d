//! Infrastructure layer - process-level wiring

pub mod config;

pub use config::Config;
