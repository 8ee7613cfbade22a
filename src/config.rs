// Startup configuration.
//
// Everything the tools need is gathered into one `AgentConfig` at startup and
// handed to each component when it is built; nothing reads the environment
// after that. Defaults cover the common case, environment variables (usually
// from `.env`) override them:
//
// - `SLIDEGEN_CREDENTIALS_PATH` - OAuth web-client JSON (default `credentials.json`)
// - `SLIDEGEN_TEMPLATE_ID`      - presentation to clone for every new deck
// - `SLIDEGEN_MODEL`            - model name handed to the agent runtime
// - `SLIDEGEN_DRIVE_API_BASE`, `SLIDEGEN_DOCS_API_BASE`, `SLIDEGEN_SLIDES_API_BASE`
//                               - API hosts (for proxies and tests)

use std::fmt;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::infra::google::docs_client::DEFAULT_DOCS_API_BASE;
use crate::infra::google::drive_client::DEFAULT_DRIVE_API_BASE;
use crate::infra::google::slides_client::DEFAULT_SLIDES_API_BASE;

pub const DEFAULT_CREDENTIALS_PATH: &str = "credentials.json";
pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";

/// The template deck cloned for each new presentation. The id is the long
/// string in the URL: `.../presentation/d/{TEMPLATE_ID}/edit`.
pub const DEFAULT_TEMPLATE_ID: &str = "1CHFtSGAvm-XdHX3RSDjM7RabFG5MDeq9kKgfcsEYyRI";

pub const SCOPES: &[&str] = &[
    "https://www.googleapis.com/auth/presentations",
    "https://www.googleapis.com/auth/drive",
    "https://www.googleapis.com/auth/documents.readonly",
];

pub const AUTHORIZATION_URL: &str = "https://accounts.google.com/o/oauth2/auth";
pub const TOKEN_URL: &str = "https://oauth2.googleapis.com/token";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error(
        "{0} not found. Create an OAuth web client in the Google Cloud console \
         and save its JSON there (or set SLIDEGEN_CREDENTIALS_PATH)."
    )]
    CredentialsNotFound(String),

    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{path} is not valid JSON: {source}")]
    Malformed {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("client_id and/or client_secret not found in {0}.")]
    MissingClientFields(String),
}

// ============================================================================
// OAUTH CLIENT CREDENTIALS
// ============================================================================

#[derive(Debug, Deserialize, Default)]
struct CredentialsFile {
    #[serde(default)]
    web: WebClientSection,
}

#[derive(Debug, Deserialize, Default)]
struct WebClientSection {
    client_id: Option<String>,
    client_secret: Option<String>,
}

/// OAuth client id and secret of a "web application" client.
#[derive(Clone, PartialEq, Eq)]
pub struct OAuthClientCredentials {
    pub client_id: String,
    pub client_secret: String,
}

impl fmt::Debug for OAuthClientCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OAuthClientCredentials")
            .field("client_id", &self.client_id)
            .field("client_secret", &"***")
            .finish()
    }
}

impl OAuthClientCredentials {
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let display = path.display().to_string();

        if !path.exists() {
            return Err(ConfigError::CredentialsNotFound(display));
        }

        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: display.clone(),
            source,
        })?;

        Self::from_json(&text, &display)
    }

    fn from_json(json: &str, origin: &str) -> Result<Self, ConfigError> {
        let file: CredentialsFile =
            serde_json::from_str(json).map_err(|source| ConfigError::Malformed {
                path: origin.to_string(),
                source,
            })?;

        match (file.web.client_id, file.web.client_secret) {
            (Some(client_id), Some(client_secret))
                if !client_id.is_empty() && !client_secret.is_empty() =>
            {
                Ok(Self {
                    client_id,
                    client_secret,
                })
            }
            _ => Err(ConfigError::MissingClientFields(origin.to_string())),
        }
    }
}

// ============================================================================
// AGENT CONFIG
// ============================================================================

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GoogleEndpoints {
    pub drive: String,
    pub docs: String,
    pub slides: String,
}

impl Default for GoogleEndpoints {
    fn default() -> Self {
        Self {
            drive: DEFAULT_DRIVE_API_BASE.to_string(),
            docs: DEFAULT_DOCS_API_BASE.to_string(),
            slides: DEFAULT_SLIDES_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct AgentConfig {
    pub template_id: String,
    pub model: String,
    pub scopes: Vec<String>,
    pub oauth: OAuthClientCredentials,
    pub endpoints: GoogleEndpoints,
}

impl AgentConfig {
    /// Config with the built-in defaults and the given OAuth client.
    pub fn new(oauth: OAuthClientCredentials) -> Self {
        Self {
            template_id: DEFAULT_TEMPLATE_ID.to_string(),
            model: DEFAULT_MODEL.to_string(),
            scopes: SCOPES.iter().map(|s| s.to_string()).collect(),
            oauth,
            endpoints: GoogleEndpoints::default(),
        }
    }

    /// Loads the credentials file and applies environment overrides.
    /// A missing or malformed credentials file is fatal.
    pub fn from_env() -> Result<Self, ConfigError> {
        let credentials_path: PathBuf = std::env::var("SLIDEGEN_CREDENTIALS_PATH")
            .unwrap_or_else(|_| DEFAULT_CREDENTIALS_PATH.to_string())
            .into();

        let oauth = OAuthClientCredentials::from_file(&credentials_path)?;
        let mut config = Self::new(oauth);

        if let Ok(template_id) = std::env::var("SLIDEGEN_TEMPLATE_ID") {
            config.template_id = template_id;
        }
        if let Ok(model) = std::env::var("SLIDEGEN_MODEL") {
            config.model = model;
        }
        if let Ok(base) = std::env::var("SLIDEGEN_DRIVE_API_BASE") {
            config.endpoints.drive = base;
        }
        if let Ok(base) = std::env::var("SLIDEGEN_DOCS_API_BASE") {
            config.endpoints.docs = base;
        }
        if let Ok(base) = std::env::var("SLIDEGEN_SLIDES_API_BASE") {
            config.endpoints.slides = base;
        }

        tracing::info!(
            "Loaded config: model={}, template={}, credentials={}",
            config.model,
            config.template_id,
            credentials_path.display()
        );

        Ok(config)
    }
}
