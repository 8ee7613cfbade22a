// =============================================================================
// SLIDE TOOLS - the function surface exposed to the agent runtime
// =============================================================================
//
// Four tools, each taking string arguments plus the access token the runtime
// injects after the OAuth flow:
//
// - `create_presentation_from_template(title)`            (auth)
// - `read_google_doc(doc_url)`                            (auth)
// - `read_content_from_public_url(url)`                   (no auth)
// - `create_slide(presentation_id, title, body)`          (auth)
//
// Every call returns a plain string. Internally the services return typed
// `ToolResult`s; this is the one place they get rendered into text.

use async_trait::async_trait;
use serde_json::Value;

use crate::config::AgentConfig;
use crate::core::ai::models::{FunctionDef, FunctionParameters};
use crate::core::ai::FunctionCallHandler;
use crate::core::content::{ContentFetcher, GoogleDocReader, PublicUrlReader};
use crate::core::slides::{DriveApi, PresentationInitializer, SlideComposer, SlidesApi};
use crate::core::tools::{render, AccessToken, ToolError, ToolResult};
use crate::infra::google::{GoogleDocsClient, GoogleDriveClient, GoogleSlidesClient};
use crate::infra::web::HttpPageFetcher;

pub const CREATE_PRESENTATION: &str = "create_presentation_from_template";
pub const READ_GOOGLE_DOC: &str = "read_google_doc";
pub const READ_PUBLIC_URL: &str = "read_content_from_public_url";
pub const CREATE_SLIDE: &str = "create_slide";

pub struct SlideToolHandler<D: DriveApi, S: SlidesApi> {
    initializer: PresentationInitializer<D>,
    composer: SlideComposer<S>,
    doc_reader: Box<dyn ContentFetcher>,
    url_reader: Box<dyn ContentFetcher>,
}

impl<D: DriveApi, S: SlidesApi> SlideToolHandler<D, S> {
    pub fn new(
        initializer: PresentationInitializer<D>,
        composer: SlideComposer<S>,
        doc_reader: Box<dyn ContentFetcher>,
        url_reader: Box<dyn ContentFetcher>,
    ) -> Self {
        Self {
            initializer,
            composer,
            doc_reader,
            url_reader,
        }
    }

    async fn dispatch(
        &self,
        name: &str,
        args: &Value,
        credential: Option<&AccessToken>,
    ) -> ToolResult {
        match name {
            CREATE_PRESENTATION => {
                let title = string_arg(args, "title")?;
                let token = credential.ok_or(ToolError::MissingCredential)?;
                self.initializer
                    .create_from_template(title, token)
                    .await
                    .map(|created| created.to_string())
            }
            READ_GOOGLE_DOC => {
                let doc_url = string_arg(args, "doc_url")?;
                self.doc_reader.fetch_text(doc_url, credential).await
            }
            READ_PUBLIC_URL => {
                let url = string_arg(args, "url")?;
                self.url_reader.fetch_text(url, None).await
            }
            CREATE_SLIDE => {
                let presentation_id = string_arg(args, "presentation_id")?;
                let title = string_arg(args, "title")?;
                let body = string_arg(args, "body")?;
                let token = credential.ok_or(ToolError::MissingCredential)?;
                self.composer
                    .create_slide(presentation_id, title, body, token)
                    .await
                    .map(|slide| slide.to_string())
            }
            other => Err(ToolError::UnknownTool(other.to_string())),
        }
    }
}

impl SlideToolHandler<GoogleDriveClient, GoogleSlidesClient> {
    /// Wires the tools to the real Google APIs.
    pub fn from_config(config: &AgentConfig) -> Self {
        Self::new(
            PresentationInitializer::new(
                GoogleDriveClient::new(config.endpoints.drive.as_str()),
                config.template_id.as_str(),
            ),
            SlideComposer::new(GoogleSlidesClient::new(config.endpoints.slides.as_str())),
            Box::new(GoogleDocReader::new(GoogleDocsClient::new(
                config.endpoints.docs.as_str(),
            ))),
            Box::new(PublicUrlReader::new(HttpPageFetcher::new())),
        )
    }
}

fn string_arg<'a>(args: &'a Value, name: &str) -> ToolResult<&'a str> {
    args.get(name)
        .and_then(|v| v.as_str())
        .ok_or_else(|| ToolError::MissingArgument(name.to_string()))
}

#[async_trait]
impl<D: DriveApi, S: SlidesApi> FunctionCallHandler for SlideToolHandler<D, S> {
    async fn handle_function_call(
        &self,
        name: &str,
        args: &Value,
        credential: Option<&AccessToken>,
    ) -> String {
        tracing::info!("Tool call: {}", name);

        let result = self.dispatch(name, args, credential).await;
        if let Err(e) = &result {
            tracing::warn!("Tool {} failed ({:?}): {}", name, e.kind(), e);
        }

        render(result)
    }

    fn declarations(&self) -> Vec<FunctionDef> {
        tool_declarations()
    }
}

/// JSON-schema declarations of the four tools, in the order the agent's
/// workflow uses them.
pub fn tool_declarations() -> Vec<FunctionDef> {
    vec![
        FunctionDef {
            name: CREATE_PRESENTATION.to_string(),
            description: "Creates a new Google Slides presentation by copying a predefined \
                          template. Returns the new presentation's ID and URL."
                .to_string(),
            parameters: FunctionParameters::required_strings(&[(
                "title",
                "Title of the new presentation.",
            )]),
            requires_auth: true,
        },
        FunctionDef {
            name: READ_GOOGLE_DOC.to_string(),
            description: "Reads the text content of a Google Doc given its docs.google.com URL."
                .to_string(),
            parameters: FunctionParameters::required_strings(&[(
                "doc_url",
                "Full Google Doc URL, e.g. https://docs.google.com/document/d/<id>/edit.",
            )]),
            requires_auth: true,
        },
        FunctionDef {
            name: READ_PUBLIC_URL.to_string(),
            description: "Reads text content from a public URL, like a Google Cloud Storage \
                          public link."
                .to_string(),
            parameters: FunctionParameters::required_strings(&[(
                "url",
                "Publicly readable http(s) URL.",
            )]),
            requires_auth: false,
        },
        FunctionDef {
            name: CREATE_SLIDE.to_string(),
            description: "Creates a new slide with a title and body, dynamically finding a \
                          suitable layout in the presentation."
                .to_string(),
            parameters: FunctionParameters::required_strings(&[
                ("presentation_id", "ID returned by create_presentation_from_template."),
                ("title", "Slide title."),
                ("body", "Slide body text; use newlines for bullet points."),
            ]),
            requires_auth: true,
        },
    ]
}
