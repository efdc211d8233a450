//! CLI error types with miette diagnostics.
//!
//! Maps `CoreError` and `ConfigError` into user-facing errors with actionable
//! help text.

use miette::Diagnostic;
use thiserror::Error;

use podcast_config::ConfigError;
use podcast_core::{CoreError, RefreshFailure};

/// Process exit codes.
pub mod exit_code {
    pub const GENERAL: i32 = 1;
    pub const USAGE: i32 = 2;
    pub const NOT_FOUND: i32 = 4;
    pub const CONNECTION: i32 = 7;
    pub const TIMEOUT: i32 = 8;
}

#[derive(Debug, Error, Diagnostic)]
pub enum CliError {
    // ── Connection ───────────────────────────────────────────────────
    #[error("Could not connect to the backend at {url}")]
    #[diagnostic(
        code(podcasts::connection_failed),
        help(
            "Check that the backend is running and reachable.\n\
             URL: {url}\n\
             Set another one with --base-url or `api_base_url` in the config file."
        )
    )]
    ConnectionFailed {
        url: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },

    #[error("Request timed out")]
    #[diagnostic(
        code(podcasts::timeout),
        help("Increase timeout with --timeout or check backend responsiveness.")
    )]
    Timeout,

    // ── Backend responses ────────────────────────────────────────────
    #[error("Resource not found: {path}")]
    #[diagnostic(
        code(podcasts::not_found),
        help("Check that --base-url points at the backend root, not a sub-path.")
    )]
    NotFound { path: String },

    #[error("Backend returned data that could not be read: {message}")]
    #[diagnostic(code(podcasts::malformed_response))]
    MalformedResponse { message: String },

    #[error("API error{}: {message}", status.map(|s| format!(" ({s})")).unwrap_or_default())]
    #[diagnostic(code(podcasts::api_error))]
    ApiError {
        status: Option<u16>,
        message: String,
    },

    #[error("Internal error: {message}")]
    #[diagnostic(
        code(podcasts::internal),
        help("This is a bug; rerun with -vv and report the log output.")
    )]
    Internal { message: String },

    // ── Validation ───────────────────────────────────────────────────
    #[error("Invalid value for {field}: {reason}")]
    #[diagnostic(code(podcasts::validation))]
    Validation { field: String, reason: String },

    // ── Configuration ────────────────────────────────────────────────
    #[error("Config file already exists at {path}")]
    #[diagnostic(
        code(podcasts::config_exists),
        help("Use `podcasts config init --force` to overwrite it.")
    )]
    ConfigExists { path: String },

    #[error(transparent)]
    #[diagnostic(
        code(podcasts::config),
        help("Inspect the resolved values with: podcasts config show")
    )]
    Config(#[from] ConfigError),

    // ── IO / Serialization ───────────────────────────────────────────
    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Failed to render JSON: {0}")]
    #[diagnostic(code(podcasts::json))]
    Json(#[from] serde_json::Error),

    #[error("Failed to render YAML: {0}")]
    #[diagnostic(code(podcasts::yaml))]
    Yaml(#[from] serde_yaml::Error),
}

impl CliError {
    /// Map this error to an exit code for process termination.
    pub fn exit_code(&self) -> i32 {
        match self {
            Self::ConnectionFailed { .. } => exit_code::CONNECTION,
            Self::Timeout => exit_code::TIMEOUT,
            Self::NotFound { .. } => exit_code::NOT_FOUND,
            Self::Validation { .. } | Self::ConfigExists { .. } | Self::Config(_) => {
                exit_code::USAGE
            }
            _ => exit_code::GENERAL,
        }
    }
}

// ── CoreError → CliError mapping ─────────────────────────────────────

impl From<CoreError> for CliError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ConnectionFailed { url, reason } => CliError::ConnectionFailed {
                url,
                source: reason.into(),
            },

            CoreError::Timeout => CliError::Timeout,

            CoreError::NotFound { path } => CliError::NotFound { path },

            CoreError::MalformedResponse { message } => CliError::MalformedResponse { message },

            CoreError::Api { message, status } => CliError::ApiError { status, message },

            CoreError::Refresh(failure) => failure.into(),

            CoreError::Config { message } => CliError::Validation {
                field: "config".into(),
                reason: message,
            },

            CoreError::Internal { message } => CliError::Internal { message },
        }
    }
}

impl From<RefreshFailure> for CliError {
    fn from(failure: RefreshFailure) -> Self {
        failure.cause().into()
    }
}
