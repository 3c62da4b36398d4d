//! Catalog trait definition
//!
//! The search controller only knows this contract. The Open Library client
//! lives in the integrations module; tests plug in their own implementations.

use async_trait::async_trait;
use serde::{Deserialize, Deserializer};
use serde_json::Value;

use super::CatalogError;

/// One catalog record as returned by the search endpoint.
///
/// Every field is optional on the wire, and a malformed field never rejects
/// the record: a missing or null title becomes an empty string, null author
/// entries are skipped, and a year that is not a usable integer is dropped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookDoc {
    #[serde(default, deserialize_with = "null_as_default")]
    pub title: String,
    #[serde(default, deserialize_with = "names_skipping_nulls")]
    pub author_name: Option<Vec<String>>,
    #[serde(default, deserialize_with = "lenient_year")]
    pub first_publish_year: Option<i32>,
    /// Catalog path such as `/works/OL45804W`
    #[serde(default)]
    pub key: Option<String>,
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

fn names_skipping_nulls<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let names: Option<Vec<Option<String>>> = Option::deserialize(deserializer)?;
    Ok(names.map(|names| names.into_iter().flatten().collect()))
}

fn lenient_year<'de, D>(deserializer: D) -> Result<Option<i32>, D::Error>
where
    D: Deserializer<'de>,
{
    let year = match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Number(n)) => n.as_i64().and_then(|y| i32::try_from(y).ok()),
        Some(Value::String(s)) => s.trim().parse().ok(),
        _ => None,
    };
    Ok(year)
}

/// Title search against a remote book catalog
#[async_trait]
pub trait BookCatalog: Send + Sync {
    /// Search the catalog by title, returning matches in catalog order
    async fn search_by_title(&self, title: &str) -> Result<Vec<BookDoc>, CatalogError>;
}
