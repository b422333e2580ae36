//! Error types for Jira import operations.
//!
//! This module defines the errors that can occur while talking to the Jira
//! API and while converting the records it returns. Every variant carries
//! enough context (status code, response body, offending input) to diagnose
//! a failure without re-running the import.

use crate::client::Deployment;

/// Boxed error returned by pluggable identifier generators.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Errors that can occur during Jira import operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The connection configuration is invalid or incomplete.
    ///
    /// Raised before any network call is made.
    #[error("invalid Jira configuration: {reason}")]
    Config {
        /// What is missing or wrong.
        reason: String,
    },

    /// Jira answered with a non-success status code.
    #[error("Jira API error {status}\n{message}")]
    Api {
        /// The HTTP status code.
        status: u16,
        /// Remediation hint, followed by the response body where useful.
        message: String,
    },

    /// A response body did not have the expected JSON shape.
    #[error("failed to decode Jira response: {0}")]
    Decode(#[source] serde_json::Error),

    /// The request could not be sent or the response could not be read.
    #[error("HTTP error talking to Jira: {0}")]
    Http(#[from] reqwest::Error),

    /// The caller cancelled the fetch.
    #[error("Jira request cancelled")]
    Cancelled,

    /// A timestamp did not match any of the accepted formats.
    #[error("unrecognized Jira timestamp: {input:?}")]
    Parse {
        /// The string that failed to parse.
        input: String,
    },

    /// The identifier generator rejected an issue.
    #[error("failed to generate an identifier for {key}: {source}")]
    IdGeneration {
        /// Key of the raw issue being converted.
        key: String,
        /// The generator's error.
        #[source]
        source: BoxError,
    },
}

impl Error {
    /// Builds a configuration error.
    pub(crate) fn config(reason: impl Into<String>) -> Self {
        Self::Config {
            reason: reason.into(),
        }
    }

    /// Classifies a non-success response into an [`Error::Api`] with a hint.
    ///
    /// Authentication guidance differs between cloud and self-hosted
    /// deployments; 403 and 400 include the raw body after the hint.
    pub(crate) fn from_status(deployment: Deployment, status: u16, body: &str) -> Self {
        let message = match status {
            401 => {
                let guidance = match deployment {
                    Deployment::Cloud => {
                        "For Jira Cloud, use your email as username and an API token.\n\
                         Create a token at: https://id.atlassian.com/manage-profile/security/api-tokens"
                    }
                    Deployment::SelfHosted => {
                        "For Jira Server/DC, use a Personal Access Token or username/password."
                    }
                };
                format!("Authentication failed. Check your credentials.\n{guidance}")
            }
            403 => format!("Access forbidden. Check permissions for project.\n{body}"),
            400 => format!("Bad request (invalid JQL?): {body}"),
            _ => body.to_string(),
        };
        Self::Api { status, message }
    }

    /// Returns the HTTP status code for [`Error::Api`] errors.
    #[must_use]
    pub fn status(&self) -> Option<u16> {
        match self {
            Self::Api { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// A specialized Result type for Jira import operations.
pub type Result<T> = std::result::Result<T, Error>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unauthorized_cloud_mentions_api_token_page() {
        let err = Error::from_status(Deployment::Cloud, 401, "ignored");
        let text = err.to_string();
        assert!(text.starts_with("Jira API error 401\nAuthentication failed."));
        assert!(text.contains("id.atlassian.com"));
        assert!(!text.contains("ignored"));
    }

    #[test]
    fn unauthorized_self_hosted_mentions_personal_access_token() {
        let err = Error::from_status(Deployment::SelfHosted, 401, "");
        let text = err.to_string();
        assert!(text.contains("Personal Access Token"));
        assert!(!text.contains("id.atlassian.com"));
    }

    #[test]
    fn forbidden_includes_body() {
        let err = Error::from_status(Deployment::Cloud, 403, r#"{"errorMessages":["nope"]}"#);
        assert_eq!(err.status(), Some(403));
        assert!(err.to_string().contains("Access forbidden"));
        assert!(err.to_string().contains(r#"{"errorMessages":["nope"]}"#));
    }

    #[test]
    fn bad_request_points_at_query() {
        let err = Error::from_status(Deployment::SelfHosted, 400, "Field 'foo' does not exist");
        assert_eq!(
            err.to_string(),
            "Jira API error 400\nBad request (invalid JQL?): Field 'foo' does not exist"
        );
    }

    #[test]
    fn other_status_carries_raw_body() {
        let err = Error::from_status(Deployment::Cloud, 503, "maintenance");
        assert_eq!(err.to_string(), "Jira API error 503\nmaintenance");
    }

    #[test]
    fn parse_error_quotes_input() {
        let err = Error::Parse {
            input: "yesterday".to_string(),
        };
        assert_eq!(err.to_string(), r#"unrecognized Jira timestamp: "yesterday""#);
    }

    #[test]
    fn status_is_none_for_non_api_errors() {
        assert_eq!(Error::Cancelled.status(), None);
    }
}
