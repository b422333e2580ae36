//! Jira API client implementation.
//!
//! This module provides the [`JiraClient`] struct, which authenticates
//! against a Jira Cloud or Server/DC instance and pages through search
//! results.

use std::time::Duration;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use percent_encoding::{NON_ALPHANUMERIC, utf8_percent_encode};
use reqwest::header::{ACCEPT, AUTHORIZATION, CONTENT_TYPE};
use secrecy::{ExposeSecret, SecretString};
use tokio_util::sync::CancellationToken;
use tracing::{debug, instrument, warn};

use crate::error::{Error, Result};
use crate::query::{FetchOptions, build_jql};
use crate::types::{RawIssue, SearchResponse};

/// Search endpoint, relative to the base URL.
///
/// API v2's `/search` answers 410 Gone on Cloud, so v3 is used everywhere.
pub const SEARCH_PATH: &str = "/rest/api/3/search/jql";

/// Number of issues requested per page.
pub const PAGE_SIZE: u64 = 100;

/// Upper bound on a single round-trip, independent of cancellation.
pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

const USER_AGENT: &str = concat!("ferry/", env!("CARGO_PKG_VERSION"));

/// The flavour of Jira deployment a client talks to.
///
/// Detected once from the base URL; it decides which credentials are
/// mandatory and which authentication hints are shown on 401.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Deployment {
    /// Atlassian-hosted (`*.atlassian.net`).
    Cloud,
    /// Jira Server or Data Center.
    SelfHosted,
}

impl Deployment {
    /// Detects the deployment kind from a base URL.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry_jira::Deployment;
    ///
    /// assert_eq!(Deployment::detect("https://acme.atlassian.net"), Deployment::Cloud);
    /// assert_eq!(Deployment::detect("https://jira.acme.com"), Deployment::SelfHosted);
    /// ```
    #[must_use]
    pub fn detect(url: &str) -> Self {
        if url.contains("atlassian.net") {
            Self::Cloud
        } else {
            Self::SelfHosted
        }
    }
}

/// Connection settings for a [`JiraClient`].
#[derive(Debug)]
pub struct ConnectionConfig {
    /// Instance URL, for example `https://company.atlassian.net`.
    pub url: String,
    /// Project key used when no JQL is given.
    pub project: Option<String>,
    /// Email (Cloud) or username (Server/DC).
    pub username: Option<String>,
    /// API token (Cloud), or personal access token / password (Server/DC).
    pub api_token: SecretString,
}

/// Jira REST API client.
///
/// With a username the client authenticates with HTTP Basic
/// (`username:token`); without one it sends the token as a Bearer personal
/// access token, which only Server/DC accepts.
///
/// # Security
///
/// The token is stored as a [`SecretString`] and never appears in `Debug`
/// output or tracing spans.
///
/// # Examples
///
/// ```no_run
/// use ferry_jira::{ConnectionConfig, FetchOptions, JiraClient};
/// use secrecy::SecretString;
/// use tokio_util::sync::CancellationToken;
///
/// # async fn example() -> ferry_jira::Result<()> {
/// let client = JiraClient::new(ConnectionConfig {
///     url: "https://company.atlassian.net".to_string(),
///     project: Some("PROJ".to_string()),
///     username: Some("me@company.com".to_string()),
///     api_token: SecretString::from("token".to_string()),
/// })?;
///
/// let issues = client
///     .search_issues(&FetchOptions::default(), &CancellationToken::new())
///     .await?;
/// println!("Fetched {} issues", issues.len());
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct JiraClient {
    http: reqwest::Client,
    base_url: String,
    project: Option<String>,
    username: Option<String>,
    api_token: SecretString,
    deployment: Deployment,
}

impl JiraClient {
    /// Creates a client after validating the connection settings.
    ///
    /// Trailing slashes are stripped from the URL and the deployment kind
    /// is detected from it.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Config`] if the URL or token is empty, or if the URL
    /// points at Jira Cloud and no username was given. Returns
    /// [`Error::Http`] if the HTTP client cannot be built.
    #[instrument(skip(config), fields(url = %config.url, has_username = config.username.is_some()))]
    pub fn new(config: ConnectionConfig) -> Result<Self> {
        let base_url = config.url.trim().trim_end_matches('/').to_string();
        if base_url.is_empty() {
            return Err(Error::config("jira URL is required"));
        }
        if config.api_token.expose_secret().is_empty() {
            return Err(Error::config("jira API token is required"));
        }

        let deployment = Deployment::detect(&base_url);
        let username = non_empty(config.username);
        if deployment == Deployment::Cloud && username.is_none() {
            return Err(Error::config("username (email) is required for Jira Cloud"));
        }

        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(USER_AGENT)
            .build()?;

        debug!(?deployment, "created Jira client");
        Ok(Self {
            http,
            base_url,
            project: non_empty(config.project),
            username,
            api_token: config.api_token,
            deployment,
        })
    }

    /// Returns the normalized base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Returns the detected deployment kind.
    #[must_use]
    pub fn deployment(&self) -> Deployment {
        self.deployment
    }

    /// Returns the `Authorization` header value for the next request.
    #[must_use]
    pub fn auth_header(&self) -> String {
        let token = self.api_token.expose_secret();
        match &self.username {
            Some(username) => {
                let credentials = format!("{username}:{token}");
                format!("Basic {}", STANDARD.encode(credentials))
            }
            None => format!("Bearer {token}"),
        }
    }

    /// Fetches every issue matching `options`, following pagination.
    ///
    /// Pages are requested one at a time, [`PAGE_SIZE`] issues each, and
    /// concatenated in the order Jira returns them. Paging stops once the
    /// running offset reaches the `total` Jira reports, or as soon as a
    /// page comes back empty, whichever happens first.
    ///
    /// # Errors
    ///
    /// - [`Error::Config`] if neither a JQL query nor a project is available
    /// - [`Error::Api`] for non-success responses
    /// - [`Error::Decode`] for malformed response bodies
    /// - [`Error::Http`] for transport failures and timeouts
    /// - [`Error::Cancelled`] if `cancel` fires mid-fetch
    ///
    /// On any error the pages fetched so far are discarded.
    #[instrument(skip(self, options, cancel), fields(base_url = %self.base_url, state = %options.state))]
    pub async fn search_issues(
        &self,
        options: &FetchOptions,
        cancel: &CancellationToken,
    ) -> Result<Vec<RawIssue>> {
        let jql = build_jql(&options.jql, self.project.as_deref(), options.state)?;
        debug!(%jql, "searching issues");

        let mut issues = Vec::new();
        let mut start_at = 0;
        loop {
            let page = self.fetch_page(&jql, start_at, cancel).await?;
            let count = page.issues.len() as u64;
            debug!(start_at, count, total = page.total, "fetched page");

            issues.extend(page.issues);
            start_at += count;
            if count == 0 || start_at >= page.total {
                break;
            }
        }

        debug!(count = issues.len(), "search complete");
        Ok(issues)
    }

    async fn fetch_page(
        &self,
        jql: &str,
        start_at: u64,
        cancel: &CancellationToken,
    ) -> Result<SearchResponse> {
        let url = format!(
            "{}{SEARCH_PATH}?jql={}&startAt={start_at}&maxResults={PAGE_SIZE}&expand=changelog",
            self.base_url,
            utf8_percent_encode(jql, NON_ALPHANUMERIC),
        );

        let exchange = async {
            let response = self
                .http
                .get(&url)
                .header(AUTHORIZATION, self.auth_header())
                .header(ACCEPT, "application/json")
                .header(CONTENT_TYPE, "application/json")
                .send()
                .await?;

            let status = response.status();
            let body = response.text().await?;
            if !status.is_success() {
                warn!(status = status.as_u16(), "Jira returned an error");
                return Err(Error::from_status(self.deployment, status.as_u16(), &body));
            }

            serde_json::from_str::<SearchResponse>(&body).map_err(Error::Decode)
        };

        tokio::select! {
            biased;
            () = cancel.cancelled() => {
                debug!(start_at, "search cancelled");
                Err(Error::Cancelled)
            }
            result = exchange => result,
        }
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(url: &str, username: Option<&str>, token: &str) -> ConnectionConfig {
        ConnectionConfig {
            url: url.to_string(),
            project: Some("PROJ".to_string()),
            username: username.map(str::to_string),
            api_token: SecretString::from(token.to_string()),
        }
    }

    #[test]
    fn cloud_client_uses_basic_auth() {
        let client =
            JiraClient::new(config("https://test.atlassian.net/", Some("me@test.com"), "secret"))
                .unwrap();

        assert_eq!(client.deployment(), Deployment::Cloud);
        assert_eq!(client.base_url(), "https://test.atlassian.net");
        let expected = format!("Basic {}", STANDARD.encode("me@test.com:secret"));
        assert_eq!(client.auth_header(), expected);
    }

    #[test]
    fn self_hosted_without_username_uses_bearer() {
        let client = JiraClient::new(config("https://jira.example.com", None, "pat")).unwrap();
        assert_eq!(client.deployment(), Deployment::SelfHosted);
        assert_eq!(client.auth_header(), "Bearer pat");
    }

    #[test]
    fn self_hosted_with_username_uses_basic() {
        let client =
            JiraClient::new(config("https://jira.example.com", Some("jdoe"), "pw")).unwrap();
        assert!(client.auth_header().starts_with("Basic "));
    }

    #[test]
    fn blank_username_counts_as_missing() {
        let client = JiraClient::new(config("https://jira.example.com", Some("  "), "pat")).unwrap();
        assert_eq!(client.auth_header(), "Bearer pat");
    }

    #[test]
    fn missing_url_is_rejected() {
        let err = JiraClient::new(config("", Some("me"), "secret")).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("URL is required"));
    }

    #[test]
    fn missing_token_is_rejected() {
        let err = JiraClient::new(config("https://jira.example.com", None, "")).unwrap_err();
        assert!(err.to_string().contains("API token is required"));
    }

    #[test]
    fn cloud_without_username_is_rejected() {
        let err = JiraClient::new(config("https://test.atlassian.net", None, "secret")).unwrap_err();
        assert!(err.to_string().contains("required for Jira Cloud"));
    }

    #[test]
    fn debug_output_hides_token() {
        let client =
            JiraClient::new(config("https://jira.example.com", None, "super-secret")).unwrap();
        assert!(!format!("{client:?}").contains("super-secret"));
    }

    #[tokio::test]
    async fn search_without_project_or_jql_fails_before_network() {
        let mut cfg = config("http://127.0.0.1:9", None, "pat");
        cfg.project = None;
        let client = JiraClient::new(cfg).unwrap();

        let err = client
            .search_issues(&FetchOptions::default(), &CancellationToken::new())
            .await
            .unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
    }
}
