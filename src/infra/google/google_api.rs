// =============================================================================
// SHARED GOOGLE REST PLUMBING
// =============================================================================
//
// Drive, Docs and Slides all speak the same dialect: JSON bodies, a bearer
// token in the `Authorization` header, and errors shaped like
//
//   { "error": { "code": 404, "message": "...", "status": "NOT_FOUND" } }
//
// This module wraps a reqwest `Client` with those conventions so each API
// client only describes its own endpoints and payloads.
//
// The base URL is configurable so tests can point a client at a local mock
// server instead of googleapis.com.

use std::borrow::Cow;

use reqwest::{Client, Response, StatusCode};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

use crate::core::tools::{AccessToken, ApiError};

#[derive(Debug, Deserialize)]
struct GoogleErrorDetail {
    message: String,
    #[allow(dead_code)]
    status: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GoogleErrorResponse {
    error: GoogleErrorDetail,
}

/// A reqwest client bound to one Google API host.
#[derive(Clone)]
pub struct GoogleApi {
    client: Client,
    base_url: String,
}

impl GoogleApi {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    /// GET `path` and decode the JSON body.
    pub async fn get_json<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<T, ApiError> {
        let (url, response) = self.get(token, path, query).await?;
        decode(&url, check_status(&url, response).await?).await
    }

    /// Like `get_json`, but a 404 is `Ok(None)` instead of an error.
    pub async fn get_json_optional<T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<Option<T>, ApiError> {
        let (url, response) = self.get(token, path, query).await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }
        decode(&url, check_status(&url, response).await?)
            .await
            .map(Some)
    }

    /// POST a JSON body to `path` and decode the JSON reply.
    pub async fn post_json<B: Serialize + ?Sized, T: DeserializeOwned>(
        &self,
        token: &AccessToken,
        path: &str,
        query: &[(&str, &str)],
        body: &B,
    ) -> Result<T, ApiError> {
        let url = self.url(path);

        let response = self
            .client
            .post(&url)
            .header("Authorization", token.bearer())
            .query(query)
            .json(body)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        decode(&url, check_status(&url, response).await?).await
    }

    async fn get(
        &self,
        token: &AccessToken,
        path: &str,
        query: &[(&str, &str)],
    ) -> Result<(String, Response), ApiError> {
        let url = self.url(path);

        let response = self
            .client
            .get(&url)
            .header("Authorization", token.bearer())
            .query(query)
            .send()
            .await
            .map_err(|e| ApiError::Transport(e.to_string()))?;

        Ok((url, response))
    }
}

/// Percent-encodes an id for use as a single path segment, so `/`, `?` or
/// `#` inside an id can't change which endpoint is called.
pub fn path_segment(id: &str) -> Cow<'_, str> {
    urlencoding::encode(id)
}

/// Turns a non-success response into `ApiError::Status`, preferring Google's
/// own error message over the raw body.
pub async fn check_status(url: &str, response: Response) -> Result<Response, ApiError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let text = response.text().await.unwrap_or_default();
    let message = match serde_json::from_str::<GoogleErrorResponse>(&text) {
        Ok(parsed) => parsed.error.message,
        Err(_) if text.trim().is_empty() => status
            .canonical_reason()
            .unwrap_or("Unknown error")
            .to_string(),
        Err(_) => text,
    };

    tracing::warn!("Google API call failed ({}): {}", status, message);

    Err(ApiError::Status {
        status: status.as_u16(),
        url: url.to_string(),
        message,
    })
}

async fn decode<T: DeserializeOwned>(url: &str, response: Response) -> Result<T, ApiError> {
    response
        .json::<T>()
        .await
        .map_err(|e| ApiError::Decode(format!("{} ({})", e, url)))
}
