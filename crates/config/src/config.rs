//! Core configuration struct, loading and environment overrides.

use std::path::Path;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{ConfigError, Result};
use crate::persistence::{find_config_file, read_config_file, write_config_file};

/// Overrides [`Config::jira_url`].
pub const ENV_JIRA_URL: &str = "FERRY_JIRA_URL";
/// Overrides [`Config::project`].
pub const ENV_JIRA_PROJECT: &str = "FERRY_JIRA_PROJECT";
/// Overrides [`Config::username`].
pub const ENV_JIRA_USERNAME: &str = "FERRY_JIRA_USERNAME";
/// Overrides [`Config::jql`].
pub const ENV_JIRA_JQL: &str = "FERRY_JIRA_JQL";
/// Overrides [`Config::state`].
pub const ENV_JIRA_STATE: &str = "FERRY_JIRA_STATE";
/// Overrides [`Config::prefix`].
pub const ENV_PREFIX: &str = "FERRY_PREFIX";

/// Accepted values for [`Config::state`].
pub const VALID_STATES: &[&str] = &["open", "closed", "all"];

/// Import configuration.
///
/// Every field is optional in the file; missing values fall back to
/// environment variables (see [`Config::apply_env`]) or to built-in
/// defaults at the point of use.
///
/// # Examples
///
/// ```
/// use ferry_config::Config;
///
/// let config = Config {
///     jira_url: Some("https://company.atlassian.net".to_string()),
///     project: Some("PROJ".to_string()),
///     username: Some("me@company.com".to_string()),
///     ..Default::default()
/// };
/// assert!(config.validate().is_ok());
/// assert_eq!(config.state(), "open");
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Jira instance URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jira_url: Option<String>,

    /// Project key used when no JQL is configured.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub project: Option<String>,

    /// Email (Cloud) or username (Server/DC).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub username: Option<String>,

    /// API token or personal access token.
    ///
    /// Prefer the `FERRY_JIRA_TOKEN` environment variable over storing the
    /// token on disk.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_token: Option<String>,

    /// Custom JQL query, used verbatim.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub jql: Option<String>,

    /// State filter for the synthesized query: `open`, `closed` or `all`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub state: Option<String>,

    /// Prefix for generated issue identifiers.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub prefix: Option<String>,
}

impl Config {
    /// Loads configuration from the default file locations.
    ///
    /// Returns a default configuration if no file exists. Environment
    /// overrides are not applied; see [`Config::apply_env`].
    ///
    /// # Errors
    ///
    /// Returns an error if a configuration file is found but cannot be read,
    /// parsed, or validated.
    ///
    /// # Examples
    ///
    /// ```no_run
    /// use ferry_config::Config;
    ///
    /// # fn example() -> ferry_config::Result<()> {
    /// let mut config = Config::load()?;
    /// config.apply_env();
    /// config.validate()?;
    /// # Ok(())
    /// # }
    /// ```
    pub fn load() -> Result<Self> {
        match find_config_file() {
            Some(path) => Self::load_from(path),
            None => {
                debug!("no config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Loads configuration from a specific file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, parsed, or validated.
    pub fn load_from(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let config: Config = read_config_file(path)?;
        config.validate()?;
        debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Saves the configuration to a file as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be written.
    pub fn save_to(&self, path: impl AsRef<Path>) -> Result<()> {
        write_config_file(path, self)
    }

    /// Validates the configuration.
    ///
    /// # Errors
    ///
    /// - [`ConfigError::InvalidState`] if `state` is not `open`, `closed` or
    ///   `all` (case-insensitive)
    /// - [`ConfigError::InvalidUrl`] if `jira_url` is set without an
    ///   `http://` or `https://` scheme
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry_config::Config;
    ///
    /// let config = Config {
    ///     state: Some("pending".to_string()),
    ///     ..Default::default()
    /// };
    /// assert!(config.validate().is_err());
    /// ```
    pub fn validate(&self) -> Result<()> {
        if let Some(state) = &self.state {
            let normalized = state.trim().to_ascii_lowercase();
            if !VALID_STATES.contains(&normalized.as_str()) {
                return Err(ConfigError::InvalidState {
                    value: state.clone(),
                });
            }
        }

        if let Some(url) = &self.jira_url {
            let url = url.trim();
            if !(url.starts_with("http://") || url.starts_with("https://")) {
                return Err(ConfigError::InvalidUrl {
                    url: url.to_string(),
                });
            }
        }

        Ok(())
    }

    /// Overlays values from the process environment.
    pub fn apply_env(&mut self) {
        self.apply_env_with(|name| std::env::var(name).ok());
    }

    /// Overlays values from `lookup`, which maps a variable name to its value.
    ///
    /// Set, non-blank variables replace the corresponding field. The token is
    /// not read here; see [`crate::auth::resolve_token`].
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry_config::Config;
    ///
    /// let mut config = Config::default();
    /// config.apply_env_with(|name| match name {
    ///     "FERRY_JIRA_PROJECT" => Some("OPS".to_string()),
    ///     _ => None,
    /// });
    /// assert_eq!(config.project.as_deref(), Some("OPS"));
    /// ```
    pub fn apply_env_with<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let overrides: [(&str, &mut Option<String>); 6] = [
            (ENV_JIRA_URL, &mut self.jira_url),
            (ENV_JIRA_PROJECT, &mut self.project),
            (ENV_JIRA_USERNAME, &mut self.username),
            (ENV_JIRA_JQL, &mut self.jql),
            (ENV_JIRA_STATE, &mut self.state),
            (ENV_PREFIX, &mut self.prefix),
        ];

        for (name, field) in overrides {
            if let Some(value) = lookup(name).filter(|v| !v.trim().is_empty()) {
                debug!(variable = name, "config overridden from environment");
                *field = Some(value);
            }
        }
    }

    /// Returns the state filter, defaulting to `open`.
    #[must_use]
    pub fn state(&self) -> &str {
        self.state.as_deref().map_or("open", str::trim)
    }
}
