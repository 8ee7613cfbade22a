// Content fetchers: turn a locator (Google Doc URL or public URL) into raw
// text for the agent to plan slides from.
//
// Both readers implement `ContentFetcher` so the agent layer can treat them
// the same way. Errors come back as `ToolError`, never as panics.

use std::sync::OnceLock;

use async_trait::async_trait;
use regex::Regex;

use super::content_models::Document;
use crate::core::tools::{AccessToken, ApiError, ToolError, ToolResult};

// ============================================================================
// PORTS
// ============================================================================

#[async_trait]
pub trait DocsApi: Send + Sync {
    async fn get_document(
        &self,
        token: &AccessToken,
        document_id: &str,
    ) -> Result<Document, ApiError>;
}

/// Plain unauthenticated GET returning the body as text.
#[async_trait]
pub trait PageFetcher: Send + Sync {
    async fn fetch(&self, url: &str) -> Result<String, ApiError>;
}

/// "Produce text given a locator."
#[async_trait]
pub trait ContentFetcher: Send + Sync {
    async fn fetch_text(&self, locator: &str, token: Option<&AccessToken>) -> ToolResult;
}

// ============================================================================
// GOOGLE DOC READER
// ============================================================================

fn document_id_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    PATTERN.get_or_init(|| {
        Regex::new(r"/document/d/([a-zA-Z0-9\-_]+)").expect("document id pattern is valid")
    })
}

/// Extracts the document id from a `.../document/d/{id}/...` URL.
pub fn extract_document_id(url: &str) -> Option<&str> {
    document_id_pattern()
        .captures(url)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

pub struct GoogleDocReader<D: DocsApi> {
    docs: D,
}

impl<D: DocsApi> GoogleDocReader<D> {
    pub fn new(docs: D) -> Self {
        Self { docs }
    }
}

#[async_trait]
impl<D: DocsApi> ContentFetcher for GoogleDocReader<D> {
    async fn fetch_text(&self, locator: &str, token: Option<&AccessToken>) -> ToolResult {
        let document_id = extract_document_id(locator).ok_or(ToolError::InvalidDocumentUrl)?;
        let token = token.ok_or(ToolError::MissingCredential)?;

        let document = self
            .docs
            .get_document(token, document_id)
            .await
            .map_err(ToolError::Remote)?;

        let text = document.plain_text();
        tracing::info!(
            "Read Google Doc '{}' ({}): {} chars",
            document.title,
            document_id,
            text.len()
        );
        Ok(text)
    }
}

// ============================================================================
// PUBLIC URL READER
// ============================================================================

pub struct PublicUrlReader<F: PageFetcher> {
    fetcher: F,
}

impl<F: PageFetcher> PublicUrlReader<F> {
    pub fn new(fetcher: F) -> Self {
        Self { fetcher }
    }
}

#[async_trait]
impl<F: PageFetcher> ContentFetcher for PublicUrlReader<F> {
    async fn fetch_text(&self, locator: &str, _token: Option<&AccessToken>) -> ToolResult {
        let text = self.fetcher.fetch(locator).await.map_err(ToolError::Fetch)?;
        tracing::debug!("Fetched {}: {} chars", locator, text.len());
        Ok(text)
    }
}
