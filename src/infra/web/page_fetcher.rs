// Plain HTTP GET for public content (e.g. a Cloud Storage public link).
// No auth header, no HTML processing: the body text is returned as-is.

use async_trait::async_trait;
use reqwest::Client;

use crate::core::content::PageFetcher;
use crate::core::tools::ApiError;
use crate::infra::google::google_api::check_status;

pub struct HttpPageFetcher {
    client: Client,
}

impl HttpPageFetcher {
    pub fn new() -> Self {
        Self {
            client: Client::new(),
        }
    }
}

impl Default for HttpPageFetcher {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PageFetcher for HttpPageFetcher {
    async fn fetch(&self, url: &str) -> Result<String, ApiError> {
        tracing::debug!("Fetching public URL: {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        let response = check_status(url, response).await?;

        response
            .text()
            .await
            .map_err(|e| ApiError::Decode(e.to_string()))
    }
}
