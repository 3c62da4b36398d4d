pub mod domain;
pub mod infrastructure;
pub mod modules;
pub mod services;
pub mod ui;

pub use infrastructure::config;
pub use modules::integrations::openlibrary;
