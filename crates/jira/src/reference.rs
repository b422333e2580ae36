//! External references to Jira issues.
//!
//! Imported issues point back at their source through a browse URL. The
//! same URL is later used to recover the Jira key, for example when a
//! re-import needs to match stored issues against fresh search results.

use std::sync::LazyLock;

use regex::Regex;

static BROWSE_KEY: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"/browse/([A-Z]+-\d+)").expect("browse key pattern is valid"));

/// Builds the browse URL for an issue key.
///
/// `base_url` is used as given apart from trailing slashes.
///
/// # Examples
///
/// ```
/// use ferry_jira::browse_url;
///
/// assert_eq!(
///     browse_url("https://test.atlassian.net/", "PROJ-123"),
///     "https://test.atlassian.net/browse/PROJ-123"
/// );
/// ```
#[must_use]
pub fn browse_url(base_url: &str, key: &str) -> String {
    format!("{}/browse/{key}", base_url.trim_end_matches('/'))
}

/// Extracts a Jira issue key from a browse URL.
///
/// Returns an empty string when the URL does not contain a
/// `/browse/KEY-123` segment.
///
/// # Examples
///
/// ```
/// use ferry_jira::extract_key_from_url;
///
/// assert_eq!(extract_key_from_url("https://company.atlassian.net/browse/PROJ-123"), "PROJ-123");
/// assert_eq!(extract_key_from_url("https://example.com/not-a-jira-url"), "");
/// ```
#[must_use]
pub fn extract_key_from_url(external_ref: &str) -> String {
    BROWSE_KEY
        .captures(external_ref)
        .and_then(|captures| captures.get(1))
        .map(|key| key.as_str().to_string())
        .unwrap_or_default()
}
