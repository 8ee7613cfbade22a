// Shared types for every tool the agent can call.
//
// Tools never raise past their own boundary. Inside the crate they return a
// typed `ToolResult`; the agent layer renders it into the plain string the
// agent runtime understands. The `Display` impls below ARE the user-facing
// messages, so changing one changes what the end user reads.

use std::fmt;
use thiserror::Error;

// ============================================================================
// CREDENTIAL
// ============================================================================

/// Opaque OAuth bearer token supplied by the agent runtime for a single call.
///
/// Acquisition and refresh happen outside this crate. `Debug` is redacted so
/// the token never ends up in logs.
#[derive(Clone, PartialEq, Eq)]
pub struct AccessToken(String);

impl AccessToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    /// Value for the `Authorization` header.
    pub fn bearer(&self) -> String {
        format!("Bearer {}", self.0)
    }
}

impl fmt::Debug for AccessToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("AccessToken(***)")
    }
}

// ============================================================================
// ERRORS
// ============================================================================

/// Failure talking to a remote service (Drive, Docs, Slides, or a public URL).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The request never produced a response (DNS, TLS, connection reset...).
    #[error("{0}")]
    Transport(String),

    /// The service answered with a non-success status.
    #[error("HTTP {status} when requesting {url}: {message}")]
    Status {
        status: u16,
        url: String,
        message: String,
    },

    /// The response body did not have the expected shape.
    #[error("Unexpected response: {0}")]
    Decode(String),
}

/// Coarse classification so callers can branch without parsing strings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// Missing credentials or an unset template id.
    Configuration,
    /// The caller passed something unusable (bad URL, missing argument).
    Input,
    /// Transport, authorization or API-level failure.
    Remote,
    /// The remote data lacked an expected structure (layout, placeholder).
    Logical,
}

#[derive(Debug, Error)]
pub enum ToolError {
    #[error("Error: The template presentation ID has not been configured.")]
    TemplateNotConfigured,

    #[error("Error: This tool requires Google authorization, but no access token was supplied.")]
    MissingCredential,

    #[error("Error: Invalid Google Doc URL.")]
    InvalidDocumentUrl,

    #[error("Error: Missing '{0}' argument.")]
    MissingArgument(String),

    #[error("Error: Unknown tool '{0}'.")]
    UnknownTool(String),

    /// Drive or Docs call failed.
    #[error("Error: {0}")]
    Remote(#[source] ApiError),

    /// Public URL fetch failed.
    #[error("Error fetching content from URL: {0}")]
    Fetch(#[source] ApiError),

    /// Any Slides call inside the slide composer failed.
    #[error("An unexpected error occurred: {0}")]
    Unexpected(#[source] ApiError),

    #[error("Error: Could not find a suitable layout with both a title and a body placeholder in the presentation template.")]
    NoSuitableLayout,

    #[error("Error: Could not find elements on the newly created slide '{slide_id}'.")]
    SlideHasNoElements { slide_id: String },

    #[error("Error: Could not find title or body placeholders on the new slide using layout '{layout_id}'.")]
    MissingPlaceholders { layout_id: String },
}

impl ToolError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ToolError::TemplateNotConfigured | ToolError::MissingCredential => {
                ErrorKind::Configuration
            }
            ToolError::InvalidDocumentUrl
            | ToolError::MissingArgument(_)
            | ToolError::UnknownTool(_) => ErrorKind::Input,
            ToolError::Remote(_) | ToolError::Fetch(_) | ToolError::Unexpected(_) => {
                ErrorKind::Remote
            }
            ToolError::NoSuitableLayout
            | ToolError::SlideHasNoElements { .. }
            | ToolError::MissingPlaceholders { .. } => ErrorKind::Logical,
        }
    }
}

/// What every tool returns before it is rendered for the agent runtime.
pub type ToolResult<T = String> = Result<T, ToolError>;

/// Collapses a tool outcome into the text handed back to the agent runtime.
pub fn render<T: fmt::Display>(result: ToolResult<T>) -> String {
    match result {
        Ok(value) => value.to_string(),
        Err(e) => e.to_string(),
    }
}
