//! Jira API client for ferry.
//!
//! This crate imports issues from Jira Cloud and Jira Server/Data Center
//! and converts them into [`ferry_protocol::Issue`] values.
//!
//! # Overview
//!
//! The crate provides:
//!
//! - [`JiraClient`] and [`ConnectionConfig`]: Authenticated, paginated search
//! - [`FetchOptions`] and [`IssueState`]: What to search for
//! - [`RawIssue`] and friends: The Jira wire records
//! - [`extract_text`]: Plain text from Atlassian Document Format descriptions
//! - [`Converter`]: Raw Jira records to ferry issues
//! - [`Error`]: Error types for every operation above
//!
//! # Authentication
//!
//! The deployment kind is detected from the URL:
//!
//! - **Cloud** (`*.atlassian.net`): email plus API token, sent as HTTP Basic
//! - **Server/DC**: username plus password or token as HTTP Basic, or a
//!   personal access token alone, sent as Bearer
//!
//! Tokens are held in [`secrecy::SecretString`] so they never end up in logs.
//!
//! # Cancellation
//!
//! [`JiraClient::search_issues`] takes a
//! [`CancellationToken`](tokio_util::sync::CancellationToken). Every request
//! races against it, and a cancelled search returns [`Error::Cancelled`]
//! without partial results.
//!
//! # Examples
//!
//! Fetching and converting open issues:
//!
//! ```no_run
//! use ferry_jira::{ConnectionConfig, Converter, ConverterConfig, FetchOptions, JiraClient};
//! use secrecy::SecretString;
//! use tokio_util::sync::CancellationToken;
//!
//! # async fn example() -> ferry_jira::Result<()> {
//! let client = JiraClient::new(ConnectionConfig {
//!     url: "https://company.atlassian.net".to_string(),
//!     project: Some("PROJ".to_string()),
//!     username: Some("me@company.com".to_string()),
//!     api_token: SecretString::from("token".to_string()),
//! })?;
//!
//! let raw = client
//!     .search_issues(&FetchOptions::default(), &CancellationToken::new())
//!     .await?;
//!
//! let converter = Converter::new(ConverterConfig::new(client.base_url()));
//! for issue in converter.convert(&raw)? {
//!     println!("{} {}", issue.id, issue.title);
//! }
//! # Ok(())
//! # }
//! ```

pub mod adf;
pub mod client;
pub mod convert;
pub mod error;
pub mod mapping;
pub mod query;
pub mod reference;
pub mod types;

pub use adf::{AdfNode, extract_text};
pub use client::{ConnectionConfig, Deployment, JiraClient};
pub use convert::{
    Converter, ConverterConfig, DEFAULT_PREFIX, IdGenerator, PrefixIdGenerator, display_name,
};
pub use error::{BoxError, Error, Result};
pub use query::{FetchOptions, IssueState, build_jql};
pub use reference::{browse_url, extract_key_from_url};
pub use types::{
    Description, JiraIssueLink, JiraIssueType, JiraLinkType, JiraLinkedIssue, JiraParent,
    JiraPriority, JiraResolution, JiraStatus, JiraUser, RawIssue, RawIssueFields, SearchResponse,
};
