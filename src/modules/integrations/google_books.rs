//! Google Books volume lookup by ISBN

use std::time::Duration;

use async_trait::async_trait;
use serde::Deserialize;

use crate::domain::{BookMetadata, DomainError, MetadataProvider};

#[derive(Debug, Deserialize)]
struct GoogleBooksResponse {
    // Only the first item is ever read, so the rest stay untyped
    items: Option<Vec<serde_json::Value>>,
}

#[derive(Debug, Deserialize)]
struct GoogleBookItem {
    #[serde(rename = "volumeInfo")]
    volume_info: GoogleVolumeInfo,
}

#[derive(Debug, Deserialize)]
struct GoogleVolumeInfo {
    title: Option<String>,
    authors: Option<Vec<String>>,
    #[serde(rename = "pageCount")]
    page_count: Option<i64>,
    #[serde(rename = "averageRating")]
    average_rating: Option<f64>,
    #[serde(rename = "imageLinks")]
    image_links: Option<GoogleImageLinks>,
}

#[derive(Debug, Deserialize)]
struct GoogleImageLinks {
    thumbnail: Option<String>,
}

impl From<GoogleVolumeInfo> for BookMetadata {
    fn from(info: GoogleVolumeInfo) -> Self {
        Self {
            title: info.title,
            authors: info.authors,
            page_count: info.page_count,
            average_rating: info.average_rating,
            thumbnail: info.image_links.and_then(|links| links.thumbnail),
        }
    }
}

/// Parse a `volumes` response body into the metadata of its first item
pub fn parse_volumes(body: &str) -> Result<Option<BookMetadata>, DomainError> {
    let parsed: GoogleBooksResponse = serde_json::from_str(body)
        .map_err(|e| DomainError::MalformedResponse(format!("Failed to parse JSON: {}", e)))?;

    let Some(first) = parsed.items.unwrap_or_default().into_iter().next() else {
        return Ok(None);
    };

    let item: GoogleBookItem = serde_json::from_value(first)
        .map_err(|e| DomainError::MalformedResponse(e.to_string()))?;

    Ok(Some(item.volume_info.into()))
}

pub struct GoogleBooksClient {
    client: reqwest::Client,
    base_url: String,
}

impl GoogleBooksClient {
    /// `base_url` is the API root, e.g. `https://www.googleapis.com/books/v1`
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, reqwest::Error> {
        let client = reqwest::Client::builder().timeout(timeout).build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn volumes_url(&self, isbn: &str) -> String {
        format!(
            "{}/volumes?q=isbn:{}",
            self.base_url,
            urlencoding::encode(isbn)
        )
    }
}

#[async_trait]
impl MetadataProvider for GoogleBooksClient {
    async fn lookup_isbn(&self, isbn: &str) -> Result<Option<BookMetadata>, DomainError> {
        let url = self.volumes_url(isbn);
        tracing::debug!(%isbn, "Querying Google Books");

        let resp = self
            .client
            .get(&url)
            .send()
            .await
            .and_then(|r| r.error_for_status())
            .map_err(|e| {
                tracing::warn!(%isbn, error = %e, "Google Books request failed");
                // The URL repeats the ISBN, keep it out of the notification
                DomainError::ProviderUnreachable(e.without_url().to_string())
            })?;

        let body = resp
            .text()
            .await
            .map_err(|e| DomainError::ProviderUnreachable(e.without_url().to_string()))?;

        parse_volumes(&body)
    }
}
