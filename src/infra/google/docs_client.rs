// =============================================================================
// GOOGLE DOCS CLIENT
// =============================================================================
//
// Fetches a document through the Docs API (`documents.get`) with the user's
// OAuth token, then maps the response into the core `Document` model.
//
// Only `body.content` is read: paragraphs and their text runs. Tables,
// section breaks, inline objects and the like are kept as `Other` so the core
// can drop them without caring about their shape.
//
// Requires the `documents.readonly` scope.

use async_trait::async_trait;
use serde::Deserialize;

use super::google_api::{path_segment, GoogleApi};
use crate::core::content::{DocsApi, Document, ParagraphElement, StructuralElement};
use crate::core::tools::{AccessToken, ApiError};

pub const DEFAULT_DOCS_API_BASE: &str = "https://docs.googleapis.com";

// =============================================================================
// GOOGLE DOCS API RESPONSE STRUCTURES
// =============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiDocument {
    #[allow(dead_code)]
    document_id: Option<String>,
    #[serde(default)]
    title: String,
    body: Option<ApiBody>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiBody {
    #[serde(default)]
    content: Vec<ApiStructuralElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiStructuralElement {
    paragraph: Option<ApiParagraph>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiParagraph {
    #[serde(default)]
    elements: Vec<ApiParagraphElement>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiParagraphElement {
    text_run: Option<ApiTextRun>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct ApiTextRun {
    content: Option<String>,
}

impl From<ApiDocument> for Document {
    fn from(api: ApiDocument) -> Self {
        let content = api
            .body
            .map(|body| body.content)
            .unwrap_or_default()
            .into_iter()
            .map(|element| match element.paragraph {
                Some(paragraph) => StructuralElement::Paragraph(
                    paragraph
                        .elements
                        .into_iter()
                        .map(|e| match e.text_run {
                            Some(run) => ParagraphElement::TextRun(run.content.unwrap_or_default()),
                            None => ParagraphElement::Other,
                        })
                        .collect(),
                ),
                None => StructuralElement::Other,
            })
            .collect();

        Document {
            title: api.title,
            content,
        }
    }
}

// =============================================================================
// CLIENT
// =============================================================================

pub struct GoogleDocsClient {
    api: GoogleApi,
}

impl GoogleDocsClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            api: GoogleApi::new(base_url),
        }
    }
}

impl Default for GoogleDocsClient {
    fn default() -> Self {
        Self::new(DEFAULT_DOCS_API_BASE)
    }
}

#[async_trait]
impl DocsApi for GoogleDocsClient {
    async fn get_document(
        &self,
        token: &AccessToken,
        document_id: &str,
    ) -> Result<Document, ApiError> {
        tracing::debug!("Fetching Google Doc via API: {}", document_id);

        let document: ApiDocument = self
            .api
            .get_json(
                token,
                &format!("/v1/documents/{}", path_segment(document_id)),
                &[],
            )
            .await?;

        Ok(document.into())
    }
}
