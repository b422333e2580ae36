//! Jira vocabulary mapping.
//!
//! Jira workflows are configurable per instance, so status, type and
//! priority names vary. These functions fold the common names onto ferry's
//! closed vocabulary, case-insensitively, and fall back to a fixed default
//! for anything they do not recognize.
//!
//! | Jira names | ferry value |
//! |------------|-------------|
//! | to do, open, backlog | [`Status::Open`] (default) |
//! | in progress, in review | [`Status::InProgress`] |
//! | blocked, on hold | [`Status::Blocked`] |
//! | done, closed, resolved | [`Status::Closed`] |
//! | bug, defect | [`IssueType::Bug`] |
//! | story, feature, enhancement | [`IssueType::Feature`] |
//! | task, sub-task | [`IssueType::Task`] (default) |
//! | epic | [`IssueType::Epic`] |
//! | technical task | [`IssueType::Chore`] |
//! | highest, critical | priority 0 |
//! | high, major | priority 1 |
//! | medium, normal | priority 2 (default) |
//! | low, minor | priority 3 |
//! | lowest, trivial | priority 4 |

use chrono::{DateTime, FixedOffset, Utc};
use ferry_protocol::{IssueType, Priority, Status};

use crate::error::{Error, Result};

/// Maps a Jira status name to a [`Status`].
///
/// # Examples
///
/// ```
/// use ferry_jira::mapping::map_status;
/// use ferry_protocol::Status;
///
/// assert_eq!(map_status("In Review"), Status::InProgress);
/// assert_eq!(map_status("RESOLVED"), Status::Closed);
/// assert_eq!(map_status("Waiting for customer"), Status::Open);
/// ```
#[must_use]
pub fn map_status(name: &str) -> Status {
    match name.to_lowercase().as_str() {
        "to do" | "open" | "backlog" => Status::Open,
        "in progress" | "in review" => Status::InProgress,
        "blocked" | "on hold" => Status::Blocked,
        "done" | "closed" | "resolved" => Status::Closed,
        _ => Status::default(),
    }
}

/// Maps a Jira issue type name to an [`IssueType`].
#[must_use]
pub fn map_issue_type(name: &str) -> IssueType {
    match name.to_lowercase().as_str() {
        "bug" | "defect" => IssueType::Bug,
        "story" | "feature" | "enhancement" => IssueType::Feature,
        "task" | "sub-task" => IssueType::Task,
        "epic" => IssueType::Epic,
        "technical task" => IssueType::Chore,
        _ => IssueType::default(),
    }
}

/// Maps a Jira priority name to a [`Priority`].
///
/// # Examples
///
/// ```
/// use ferry_jira::mapping::map_priority;
/// use ferry_protocol::Priority;
///
/// assert_eq!(map_priority("Critical"), Priority::HIGHEST);
/// assert_eq!(map_priority("minor"), Priority::LOW);
/// assert_eq!(map_priority("P3"), Priority::MEDIUM);
/// ```
#[must_use]
pub fn map_priority(name: &str) -> Priority {
    match name.to_lowercase().as_str() {
        "highest" | "critical" => Priority::HIGHEST,
        "high" | "major" => Priority::HIGH,
        "medium" | "normal" => Priority::MEDIUM,
        "low" | "minor" => Priority::LOW,
        "lowest" | "trivial" => Priority::LOWEST,
        _ => Priority::default(),
    }
}

/// `strftime` formats tried after RFC 3339, in order.
///
/// `%.f` accepts an absent fraction and `%z` covers `+HHMM`, which is what
/// Jira Server emits (`2024-01-15T10:30:00.000+0000`).
const OFFSET_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f%z"];

/// Parses a Jira timestamp into UTC.
///
/// Accepted shapes, tried in order (first match wins):
///
/// 1. RFC 3339: `2024-01-15T10:30:00.000Z`, `2024-01-15T10:30:00.000+00:00`
/// 2. Compact offset: `2024-01-15T10:30:00.000-0500`, `2024-01-15T10:30:00+0000`
///
/// # Errors
///
/// Returns [`Error::Parse`] for an empty or unrecognized string.
///
/// # Examples
///
/// ```
/// use ferry_jira::mapping::parse_timestamp;
///
/// let ts = parse_timestamp("2024-01-15T10:30:00.000-0500").unwrap();
/// assert_eq!(ts.to_rfc3339(), "2024-01-15T15:30:00+00:00");
/// assert!(parse_timestamp("").is_err());
/// ```
pub fn parse_timestamp(input: &str) -> Result<DateTime<Utc>> {
    let parse_error = || Error::Parse {
        input: input.to_string(),
    };
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(parse_error());
    }

    DateTime::parse_from_rfc3339(trimmed)
        .ok()
        .or_else(|| {
            OFFSET_FORMATS
                .iter()
                .find_map(|format| DateTime::<FixedOffset>::parse_from_str(trimmed, format).ok())
        })
        .map(|parsed| parsed.with_timezone(&Utc))
        .ok_or_else(parse_error)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    #[test]
    fn status_table() {
        let cases = [
            ("To Do", Status::Open),
            ("todo", Status::Open),
            ("Open", Status::Open),
            ("Backlog", Status::Open),
            ("In Progress", Status::InProgress),
            ("In Review", Status::InProgress),
            ("Blocked", Status::Blocked),
            ("On Hold", Status::Blocked),
            ("Done", Status::Closed),
            ("Closed", Status::Closed),
            ("Resolved", Status::Closed),
            ("Unknown Status", Status::Open),
        ];
        for (name, expected) in cases {
            assert_eq!(map_status(name), expected, "status {name:?}");
        }
    }

    #[test]
    fn issue_type_table() {
        let cases = [
            ("Bug", IssueType::Bug),
            ("bug", IssueType::Bug),
            ("Defect", IssueType::Bug),
            ("Story", IssueType::Feature),
            ("Feature", IssueType::Feature),
            ("Enhancement", IssueType::Feature),
            ("Task", IssueType::Task),
            ("Sub-task", IssueType::Task),
            ("Epic", IssueType::Epic),
            ("Technical Task", IssueType::Chore),
            ("Unknown", IssueType::Task),
        ];
        for (name, expected) in cases {
            assert_eq!(map_issue_type(name), expected, "type {name:?}");
        }
    }

    #[test]
    fn priority_table() {
        let cases = [
            ("Highest", 0),
            ("Critical", 0),
            ("High", 1),
            ("Major", 1),
            ("Medium", 2),
            ("Normal", 2),
            ("Low", 3),
            ("Minor", 3),
            ("Lowest", 4),
            ("Trivial", 4),
            ("Unknown", 2),
        ];
        for (name, expected) in cases {
            assert_eq!(map_priority(name).value(), expected, "priority {name:?}");
        }
    }

    #[test]
    fn timestamp_formats() {
        let expected = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
        for input in [
            "2024-01-15T10:30:00.000Z",
            "2024-01-15T10:30:00.000+0000",
            "2024-01-15T10:30:00.000+00:00",
            "2024-01-15T10:30:00+0000",
            "2024-01-15T10:30:00Z",
        ] {
            assert_eq!(parse_timestamp(input).unwrap(), expected, "input {input:?}");
        }
    }

    #[test]
    fn timestamp_negative_offset_normalizes_to_utc() {
        let parsed = parse_timestamp("2024-01-15T10:30:00.000-0500").unwrap();
        assert_eq!(parsed, Utc.with_ymd_and_hms(2024, 1, 15, 15, 30, 0).unwrap());
    }

    #[test]
    fn timestamp_keeps_fraction() {
        let parsed = parse_timestamp("2024-01-15T10:30:00.250+0000").unwrap();
        assert_eq!(parsed.timestamp_subsec_millis(), 250);
    }

    #[test]
    fn timestamp_rejects_empty_and_garbage() {
        for input in ["", "   ", "yesterday", "2024-01-15", "15/01/2024 10:30"] {
            let err = parse_timestamp(input).unwrap_err();
            assert!(
                matches!(&err, Error::Parse { input: got } if got == input),
                "input {input:?} gave {err:?}"
            );
        }
    }
}
