//! Jira token resolution.
//!
//! Tokens are resolved in the following order:
//!
//! 1. `api_token` from the configuration file
//! 2. `FERRY_JIRA_TOKEN`
//! 3. `JIRA_API_TOKEN`
//!
//! Blank values are skipped at every step.

use tracing::debug;

/// Preferred environment variable for the token.
pub const ENV_FERRY_TOKEN: &str = "FERRY_JIRA_TOKEN";

/// Fallback environment variable shared with other Jira tooling.
pub const ENV_JIRA_TOKEN: &str = "JIRA_API_TOKEN";

/// Resolves the Jira token from the config value or the process
/// environment.
///
/// Returns `None` if no source provides a token.
///
/// # Examples
///
/// ```no_run
/// use ferry_config::{Config, auth::resolve_token};
///
/// # fn example() -> ferry_config::Result<()> {
/// let config = Config::load()?;
/// match resolve_token(config.api_token.as_deref()) {
///     Some(_) => println!("token found"),
///     None => println!("set FERRY_JIRA_TOKEN"),
/// }
/// # Ok(())
/// # }
/// ```
#[must_use]
pub fn resolve_token(config_token: Option<&str>) -> Option<String> {
    resolve_token_with(config_token, |name| std::env::var(name).ok())
}

/// Resolves the Jira token using `lookup` for environment variables.
///
/// # Examples
///
/// ```
/// use ferry_config::auth::resolve_token_with;
///
/// let token = resolve_token_with(None, |name| {
///     (name == "JIRA_API_TOKEN").then(|| "from-env".to_string())
/// });
/// assert_eq!(token.as_deref(), Some("from-env"));
/// ```
#[must_use]
pub fn resolve_token_with<F>(config_token: Option<&str>, lookup: F) -> Option<String>
where
    F: Fn(&str) -> Option<String>,
{
    if let Some(token) = config_token.filter(|t| !t.trim().is_empty()) {
        debug!("using token from config file");
        return Some(token.to_string());
    }

    [ENV_FERRY_TOKEN, ENV_JIRA_TOKEN].into_iter().find_map(|name| {
        let token = lookup(name).filter(|t| !t.trim().is_empty())?;
        debug!(variable = name, "using token from environment");
        Some(token)
    })
}
