//! Error types for the Jira MCP server.

use thiserror::Error;

/// Errors that can occur in the Jira MCP server.
#[derive(Debug, Error)]
pub enum Error {
    /// Invalid argument value provided to a tool.
    #[error("Invalid {field}: '{value}'. {reason}")]
    InvalidArgument {
        /// The parameter name that had an invalid value.
        field: &'static str,
        /// The invalid value that was provided.
        value: String,
        /// What a valid value looks like.
        reason: &'static str,
    },

    /// A required configuration value was not set anywhere.
    #[error("Missing configuration: {0}. Set it in the environment or the config file.")]
    MissingConfig(&'static str),

    /// A configuration value was set but is not usable.
    #[error("Configuration error: {0}")]
    Config(String),

    /// The config file could not be read or parsed.
    #[error("Failed to load config from {path}: {reason}")]
    ConfigLoad {
        /// Path of the config file.
        path: String,
        /// Why loading failed.
        reason: String,
    },

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Jira answered with a non-success status.
    #[error("Jira API error (status {status}): {message}")]
    Api {
        /// HTTP status code.
        status: u16,
        /// Response body, or a placeholder when it could not be read.
        message: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// MCP protocol error.
    #[error("MCP error: {0}")]
    Mcp(String),
}

impl Error {
    /// Whether the error was caused by the caller's parameters rather than
    /// by Jira or the transport.
    #[must_use]
    pub fn is_invalid_params(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

/// Result type for Jira MCP operations.
pub type Result<T> = std::result::Result<T, Error>;
