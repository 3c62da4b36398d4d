//! Domain layer - Pure business abstractions
//!
//! This layer contains NO framework dependencies beyond the error
//! conversions. Only the catalog contract and its error type.

pub mod catalog;
pub mod errors;

pub use catalog::{BookCatalog, BookDoc};
pub use errors::CatalogError;
