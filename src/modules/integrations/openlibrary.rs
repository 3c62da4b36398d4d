use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;

use crate::domain::{BookCatalog, BookDoc, CatalogError};

pub const DEFAULT_BASE_URL: &str = "https://openlibrary.org";

const USER_AGENT: &str = "BookFinder/0.1 (+https://openlibrary.org/developers/api)";

#[derive(Debug, Deserialize)]
struct OpenLibrarySearchResponse {
    docs: Vec<BookDoc>,
}

/// Client for the Open Library title search (`/search.json?title=...`)
#[derive(Debug, Clone)]
pub struct OpenLibraryClient {
    client: reqwest::Client,
    base_url: String,
}

impl OpenLibraryClient {
    /// Create a client against `base_url` (no trailing slash needed).
    ///
    /// `timeout` is optional: without one the request resolves whenever the
    /// transport does.
    pub fn new(base_url: &str, timeout: Option<Duration>) -> Result<Self, CatalogError> {
        let mut builder = reqwest::Client::builder().user_agent(USER_AGENT);
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let client = builder
            .build()
            .map_err(|e| CatalogError::Client(e.to_string()))?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request URL for a title search. The title is percent-encoded.
    pub fn search_url(&self, title: &str) -> String {
        format!(
            "{}/search.json?title={}",
            self.base_url,
            urlencoding::encode(title)
        )
    }
}

/// Join the catalog base URL and a record key such as `/works/OL1W`
pub fn detail_url(base_url: &str, key: &str) -> String {
    format!("{}{}", base_url.trim_end_matches('/'), key)
}

#[async_trait]
impl BookCatalog for OpenLibraryClient {
    async fn search_by_title(&self, title: &str) -> Result<Vec<BookDoc>, CatalogError> {
        let url = self.search_url(title);
        tracing::debug!("Open Library search: {}", url);

        let resp = self.client.get(&url).send().await?;

        if !resp.status().is_success() {
            return Err(CatalogError::Status(resp.status().as_u16()));
        }

        let body = resp.text().await?;
        let parsed: OpenLibrarySearchResponse = serde_json::from_str(&body)?;

        Ok(parsed.docs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn client() -> OpenLibraryClient {
        OpenLibraryClient::new(DEFAULT_BASE_URL, None).unwrap()
    }

    #[test]
    fn test_search_url_encodes_title() {
        assert_eq!(
            client().search_url("the lord of the rings"),
            "https://openlibrary.org/search.json?title=the%20lord%20of%20the%20rings"
        );
        assert_eq!(
            client().search_url("war&peace?"),
            "https://openlibrary.org/search.json?title=war%26peace%3F"
        );
    }

    #[test]
    fn test_base_url_trailing_slash_is_dropped() {
        let client = OpenLibraryClient::new("http://localhost:9000/", None).unwrap();
        assert_eq!(client.base_url(), "http://localhost:9000");
        assert_eq!(
            client.search_url("dune"),
            "http://localhost:9000/search.json?title=dune"
        );
    }

    #[test]
    fn test_detail_url() {
        assert_eq!(
            detail_url(client().base_url(), "/works/OL1"),
            "https://openlibrary.org/works/OL1"
        );
        assert_eq!(
            detail_url("https://openlibrary.org/", "/works/OL2"),
            "https://openlibrary.org/works/OL2"
        );
    }

    #[test]
    fn test_docs_with_missing_fields() {
        let body = r#"{"numFound": 2, "docs": [
            {"title": "Dune", "author_name": ["Frank Herbert"], "first_publish_year": 1965, "key": "/works/OL1"},
            {"key": "/works/OL2", "cover_i": 42}
        ]}"#;
        let parsed: OpenLibrarySearchResponse = serde_json::from_str(body).unwrap();
        assert_eq!(parsed.docs.len(), 2);
        assert_eq!(parsed.docs[0].title, "Dune");
        assert_eq!(parsed.docs[1].title, "");
        assert_eq!(parsed.docs[1].author_name, None);
        assert_eq!(parsed.docs[1].first_publish_year, None);
    }

    #[test]
    fn test_body_without_docs_is_rejected() {
        let parsed = serde_json::from_str::<OpenLibrarySearchResponse>(r#"{"error": "boom"}"#);
        assert!(parsed.is_err());
    }
}
