// Google Drive client: only `files.copy`, used to clone the deck template.
// Requires the `drive` scope.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use super::google_api::{path_segment, GoogleApi};
use crate::core::slides::DriveApi;
use crate::core::tools::{AccessToken, ApiError};

pub const DEFAULT_DRIVE_API_BASE: &str = "https://www.googleapis.com";

#[derive(Debug, Serialize)]
struct CopyRequest<'a> {
    name: &'a str,
}

#[derive(Debug, Deserialize)]
struct ApiFile {
    id: Option<String>,
}

pub struct GoogleDriveClient {
    api: GoogleApi,
}

impl GoogleDriveClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: GoogleApi::new(base_url),
        }
    }
}

impl Default for GoogleDriveClient {
    fn default() -> Self {
        Self::new(DEFAULT_DRIVE_API_BASE)
    }
}

#[async_trait]
impl DriveApi for GoogleDriveClient {
    async fn copy_file(
        &self,
        token: &AccessToken,
        file_id: &str,
        name: &str,
    ) -> Result<String, ApiError> {
        tracing::debug!("Copying Drive file {} as '{}'", file_id, name);

        let file: ApiFile = self
            .api
            .post_json(
                token,
                &format!("/drive/v3/files/{}/copy", path_segment(file_id)),
                &[("supportsAllDrives", "true")],
                &CopyRequest { name },
            )
            .await?;

        file.id
            .ok_or_else(|| ApiError::Decode("files.copy response has no id".to_string()))
    }
}
