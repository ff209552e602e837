//! Connection settings for the Jira instance.
//!
//! Settings come from an optional YAML file, then the environment. Later
//! sources win. Environment access goes through a lookup closure so tests
//! can supply variables without touching the process environment.
//!
//! ```yaml
//! base-url: https://example.atlassian.net
//! email: me@example.com
//! api-token: xxxx
//! timeout-secs: 30
//! ```

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;
use std::time::Duration;
use tokio::fs;
use tracing::debug;

/// Environment variable holding the config file path.
pub const CONFIG_PATH_ENV: &str = "JIRA_MCP_CONFIG";
/// Environment variable holding the site URL.
pub const BASE_URL_ENV: &str = "JIRA_BASE_URL";
/// Environment variable holding the account email for Basic auth.
pub const EMAIL_ENV: &str = "JIRA_EMAIL";
/// Environment variable holding the API token.
pub const API_TOKEN_ENV: &str = "JIRA_API_TOKEN";
/// Environment variable holding the request timeout in seconds.
pub const TIMEOUT_ENV: &str = "JIRA_TIMEOUT_SECS";

/// Request timeout when none is configured.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Raw settings as read from a file or the environment. Every field is optional.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "kebab-case")]
pub struct ConfigFile {
    /// Jira site URL.
    pub base_url: Option<String>,

    /// Account email. Selects Basic auth when present.
    pub email: Option<String>,

    /// API token or personal access token.
    pub api_token: Option<String>,

    /// Request timeout in seconds.
    pub timeout_secs: Option<u64>,
}

impl ConfigFile {
    /// Load settings from a YAML file.
    ///
    /// # Errors
    ///
    /// Returns [`Error::ConfigLoad`] if the file cannot be read or parsed.
    pub async fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)
            .await
            .map_err(|e| Error::ConfigLoad {
                path: path.display().to_string(),
                reason: e.to_string(),
            })?;
        serde_yaml::from_str(&content).map_err(|e| Error::ConfigLoad {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Overlay environment variables on top of these settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the timeout variable is not a number.
    pub fn with_env<F>(mut self, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(url) = lookup(BASE_URL_ENV) {
            self.base_url = Some(url);
        }
        if let Some(email) = lookup(EMAIL_ENV) {
            self.email = Some(email);
        }
        if let Some(token) = lookup(API_TOKEN_ENV) {
            self.api_token = Some(token);
        }
        if let Some(timeout) = lookup(TIMEOUT_ENV) {
            let secs = timeout.trim().parse().map_err(|_| {
                Error::Config(format!("{TIMEOUT_ENV} must be a number, got '{timeout}'"))
            })?;
            self.timeout_secs = Some(secs);
        }
        Ok(self)
    }
}

/// Validated connection settings.
#[derive(Clone, PartialEq, Eq)]
pub struct JiraConfig {
    /// Site URL without a trailing slash.
    pub base_url: String,

    /// Account email for Basic auth. `None` means Bearer auth.
    pub email: Option<String>,

    /// API token or personal access token.
    pub api_token: String,

    /// Per-request timeout.
    pub timeout: Duration,
}

impl JiraConfig {
    /// Read the optional config file, overlay the environment and validate.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be loaded or required values are
    /// missing or malformed.
    pub async fn load<F>(path: Option<&Path>, lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let file = match path {
            Some(path) => {
                debug!(path = %path.display(), "Loading config file");
                ConfigFile::load(path).await?
            }
            None => ConfigFile::default(),
        };
        Self::resolve(file.with_env(lookup)?)
    }

    /// Validate raw settings.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] when the URL or token is absent and
    /// [`Error::Config`] when the URL has no http(s) scheme.
    pub fn resolve(file: ConfigFile) -> Result<Self> {
        let base_url = non_blank(file.base_url).ok_or(Error::MissingConfig(BASE_URL_ENV))?;
        let api_token = non_blank(file.api_token).ok_or(Error::MissingConfig(API_TOKEN_ENV))?;

        if !(base_url.starts_with("https://") || base_url.starts_with("http://")) {
            return Err(Error::Config(format!(
                "base URL must start with http:// or https://, got '{base_url}'"
            )));
        }

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            email: non_blank(file.email),
            api_token,
            timeout: Duration::from_secs(file.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        })
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

impl fmt::Debug for JiraConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("JiraConfig")
            .field("base_url", &self.base_url)
            .field("email", &self.email)
            .field("api_token", &"<redacted>")
            .field("timeout", &self.timeout)
            .finish()
    }
}
