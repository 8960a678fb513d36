use std::env;
use thiserror::Error;

/// OpenAI-compatible endpoint used when `COMPLETION_BASE_URL` is not provided.
pub const DEFAULT_COMPLETION_BASE_URL: &str =
    "https://generativelanguage.googleapis.com/v1beta/openai/";
/// Model requested when `COMPLETION_MODEL` is not provided.
pub const DEFAULT_COMPLETION_MODEL: &str = "gemini-2.0-flash";
/// Port used when `PORT` is not provided.
pub const DEFAULT_PORT: u16 = 5000;
/// Request body cap used when `MAX_UPLOAD_BYTES` is not provided.
pub const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Errors encountered while loading configuration from environment variables.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Required environment variable was not provided.
    #[error("Missing environment variable: {0}")]
    MissingVariable(String),
    /// Environment variable contained a value that could not be parsed.
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),
}

/// Runtime configuration for the ClearClause gateway.
///
/// Built once at process start and handed to the components that need it; nothing reads the
/// environment after startup.
#[derive(Clone)]
pub struct Config {
    /// Credential sent as a bearer token to the completion API.
    pub api_key: String,
    /// Base URL of the OpenAI-compatible completion API.
    pub completion_base_url: String,
    /// Model identifier passed with every completion request.
    pub completion_model: String,
    /// Optional extra origin allowed by the CORS layer.
    pub frontend_url: Option<String>,
    /// Port the HTTP server listens on.
    pub server_port: u16,
    /// Maximum accepted request body size in bytes.
    pub max_upload_bytes: usize,
}

impl std::fmt::Debug for Config {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Config")
            .field("api_key", &"<redacted>")
            .field("completion_base_url", &self.completion_base_url)
            .field("completion_model", &self.completion_model)
            .field("frontend_url", &self.frontend_url)
            .field("server_port", &self.server_port)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .finish()
    }
}

impl Config {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration through an arbitrary key lookup, treating blank values as unset.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let load_optional = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_string())
                .filter(|value| !value.is_empty())
        };

        Ok(Self {
            api_key: load_optional("OPENAI_API_KEY")
                .ok_or_else(|| ConfigError::MissingVariable("OPENAI_API_KEY".to_string()))?,
            completion_base_url: load_optional("COMPLETION_BASE_URL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_BASE_URL.to_string()),
            completion_model: load_optional("COMPLETION_MODEL")
                .unwrap_or_else(|| DEFAULT_COMPLETION_MODEL.to_string()),
            frontend_url: load_optional("FRONTEND_URL"),
            server_port: load_optional("PORT")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("PORT".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_PORT),
            max_upload_bytes: load_optional("MAX_UPLOAD_BYTES")
                .map(|value| {
                    value
                        .parse()
                        .map_err(|_| ConfigError::InvalidValue("MAX_UPLOAD_BYTES".into()))
                })
                .transpose()?
                .unwrap_or(DEFAULT_MAX_UPLOAD_BYTES),
        })
    }
}

/// Read `.env` (when present) and build the configuration from the resulting environment.
pub fn load_config() -> Result<Config, ConfigError> {
    dotenvy::dotenv().ok();
    let config = Config::from_env()?;
    tracing::debug!(
        completion_base_url = %config.completion_base_url,
        completion_model = %config.completion_model,
        frontend_url = ?config.frontend_url,
        server_port = config.server_port,
        max_upload_bytes = config.max_upload_bytes,
        "Loaded configuration"
    );
    Ok(config)
}
