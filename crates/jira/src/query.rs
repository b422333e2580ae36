//! Search options and JQL construction.
//!
//! - [`FetchOptions`]: What to search for
//! - [`IssueState`]: Open/closed filter used when no JQL is given
//! - [`build_jql`]: Turns the options into the query sent to Jira

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Options for searching Jira issues.
///
/// # Example
///
/// ```
/// use ferry_jira::{FetchOptions, IssueState};
///
/// // Everything still open in the configured project.
/// let options = FetchOptions::default();
/// assert_eq!(options.state, IssueState::Open);
///
/// // An explicit query wins over the state filter.
/// let options = FetchOptions {
///     jql: "assignee = currentUser() ORDER BY updated DESC".to_string(),
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FetchOptions {
    /// JQL filter. When empty, one is built from the project and `state`.
    pub jql: String,
    /// State filter applied to the synthesized query (default: open).
    pub state: IssueState,
}

/// Issue state filter for synthesized queries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum IssueState {
    /// Anything not Done or Closed (default).
    #[default]
    Open,
    /// Only Done or Closed issues.
    Closed,
    /// No status restriction.
    All,
}

impl IssueState {
    /// Returns the JQL clause appended to the project filter.
    #[must_use]
    pub const fn jql_clause(self) -> &'static str {
        match self {
            Self::Open => " AND status != Done AND status != Closed",
            Self::Closed => " AND (status = Done OR status = Closed)",
            Self::All => "",
        }
    }

    /// Returns the lowercase name used in configuration.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Open => "open",
            Self::Closed => "closed",
            Self::All => "all",
        }
    }
}

impl fmt::Display for IssueState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for IssueState {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.to_ascii_lowercase().as_str() {
            "open" => Ok(Self::Open),
            "closed" => Ok(Self::Closed),
            "all" => Ok(Self::All),
            other => Err(Error::config(format!(
                "unknown issue state {other:?} (expected open, closed or all)"
            ))),
        }
    }
}

/// Builds the JQL query for a search.
///
/// A non-empty `jql` is used verbatim, even if it is only whitespace.
/// Otherwise the query is `project = KEY` followed by the state clause.
///
/// # Errors
///
/// Returns [`Error::Config`] when both `jql` and `project` are empty.
///
/// # Examples
///
/// ```
/// use ferry_jira::{IssueState, build_jql};
///
/// assert_eq!(
///     build_jql("", Some("PROJ"), IssueState::Closed).unwrap(),
///     "project = PROJ AND (status = Done OR status = Closed)"
/// );
/// assert_eq!(build_jql("labels = urgent", None, IssueState::Open).unwrap(), "labels = urgent");
/// assert!(build_jql("", None, IssueState::All).is_err());
/// ```
pub fn build_jql(jql: &str, project: Option<&str>, state: IssueState) -> Result<String> {
    if !jql.is_empty() {
        return Ok(jql.to_string());
    }

    let project = project
        .map(str::trim)
        .filter(|p| !p.is_empty())
        .ok_or_else(|| Error::config("either project or JQL query is required"))?;

    Ok(format!("project = {project}{}", state.jql_clause()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fetch_options_default() {
        let opts = FetchOptions::default();
        assert!(opts.jql.is_empty());
        assert_eq!(opts.state, IssueState::Open);
    }

    #[test]
    fn open_query_excludes_done_and_closed() {
        assert_eq!(
            build_jql("", Some("PROJ"), IssueState::Open).unwrap(),
            "project = PROJ AND status != Done AND status != Closed"
        );
    }

    #[test]
    fn all_query_has_no_status_clause() {
        assert_eq!(
            build_jql("", Some("PROJ"), IssueState::All).unwrap(),
            "project = PROJ"
        );
    }

    #[test]
    fn explicit_jql_ignores_project_and_state() {
        assert_eq!(
            build_jql("key = OPS-1", Some("PROJ"), IssueState::Closed).unwrap(),
            "key = OPS-1"
        );
    }

    #[test]
    fn missing_project_and_jql_is_config_error() {
        let err = build_jql("", Some(""), IssueState::Open).unwrap_err();
        assert!(matches!(err, Error::Config { .. }));
        assert!(err.to_string().contains("either project or JQL query is required"));
    }

    #[test]
    fn only_empty_jql_falls_back_to_project() {
        assert_eq!(build_jql(" ", Some("PROJ"), IssueState::All).unwrap(), " ");
    }

    #[test]
    fn issue_state_parses_case_insensitively() {
        assert_eq!("open".parse::<IssueState>().unwrap(), IssueState::Open);
        assert_eq!("CLOSED".parse::<IssueState>().unwrap(), IssueState::Closed);
        assert_eq!("All".parse::<IssueState>().unwrap(), IssueState::All);
        assert!("pending".parse::<IssueState>().is_err());
    }

    #[test]
    fn issue_state_display_roundtrips() {
        for state in [IssueState::Open, IssueState::Closed, IssueState::All] {
            assert_eq!(state.to_string().parse::<IssueState>().unwrap(), state);
        }
    }
}
