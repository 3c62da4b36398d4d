//! External catalog integrations

pub mod openlibrary;
