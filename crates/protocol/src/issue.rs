//! The internal issue record and its closed vocabularies.
//!
//! Importers map whatever the remote tracker calls things onto the enums in
//! this module. The mapping is lossy by design of the vocabulary: every
//! remote status lands in one of four [`Status`] buckets, every remote type
//! in one of five [`IssueType`]s, and priorities are squeezed into `0..=4`.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{ProtocolError, Result};

/// Identifier of an imported issue.
///
/// Identifiers are assigned by the importer (or a caller-supplied
/// generator) and are opaque to this crate.
pub type IssueId = String;

/// Normalized workflow status.
///
/// # Examples
///
/// ```
/// use ferry_protocol::Status;
///
/// assert_eq!(Status::default(), Status::Open);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum Status {
    /// Not started yet.
    #[default]
    Open,
    /// Someone is working on it, or it is under review.
    InProgress,
    /// Work cannot proceed.
    Blocked,
    /// Finished, resolved or otherwise closed.
    Closed,
}

/// Normalized issue type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum IssueType {
    /// A defect.
    Bug,
    /// New user-facing behaviour.
    Feature,
    /// A unit of work (the fallback for unknown remote types).
    #[default]
    Task,
    /// A container for related work.
    Epic,
    /// Maintenance work with no user-facing change.
    Chore,
}

/// Issue priority, `0` being the most urgent and `4` the least.
///
/// # Examples
///
/// ```
/// use ferry_protocol::Priority;
///
/// let p = Priority::new(1).unwrap();
/// assert_eq!(p, Priority::HIGH);
/// assert_eq!(p.value(), 1);
/// assert!(Priority::new(5).is_err());
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Priority(u8);

impl Priority {
    /// Priority 0.
    pub const HIGHEST: Self = Self(0);
    /// Priority 1.
    pub const HIGH: Self = Self(1);
    /// Priority 2, used when the remote priority is unknown.
    pub const MEDIUM: Self = Self(2);
    /// Priority 3.
    pub const LOW: Self = Self(3);
    /// Priority 4.
    pub const LOWEST: Self = Self(4);

    /// Creates a priority, rejecting values above 4.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::PriorityOutOfRange`] for values above 4.
    pub const fn new(value: u8) -> Result<Self> {
        if value <= 4 {
            Ok(Self(value))
        } else {
            Err(ProtocolError::PriorityOutOfRange { value })
        }
    }

    /// Returns the numeric priority.
    #[must_use]
    pub const fn value(self) -> u8 {
        self.0
    }
}

impl Default for Priority {
    fn default() -> Self {
        Self::MEDIUM
    }
}

impl TryFrom<u8> for Priority {
    type Error = ProtocolError;

    fn try_from(value: u8) -> Result<Self> {
        Self::new(value)
    }
}

impl From<Priority> for u8 {
    fn from(priority: Priority) -> Self {
        priority.0
    }
}

/// How an issue relates to another one.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DependencyKind {
    /// The target is this issue's parent.
    ParentChild,
    /// A blocking relationship between the two issues.
    Blocks,
    /// Any other link.
    Related,
}

/// An edge from an imported issue to another remote record.
///
/// The target is kept as the remote key (for example `PROJ-42`) because the
/// target may not have been imported yet; resolving it to an [`IssueId`] is
/// the consumer's job.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    /// The kind of relationship.
    pub kind: DependencyKind,
    /// Remote key of the other issue.
    pub target_key: String,
}

impl Dependency {
    /// Creates a dependency on the given remote key.
    #[must_use]
    pub fn new(kind: DependencyKind, target_key: impl Into<String>) -> Self {
        Self {
            kind,
            target_key: target_key.into(),
        }
    }
}

/// An imported issue in ferry's vocabulary.
///
/// Values are built once by an importer and never mutated afterwards.
///
/// # Examples
///
/// ```
/// use ferry_protocol::Issue;
///
/// let issue = Issue::new("jira-00000001", "Write docs", "https://jira.example.com/browse/DOC-1");
/// assert_eq!(issue.title, "Write docs");
/// assert!(issue.labels.is_empty());
/// assert!(issue.closed_at.is_none());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Issue {
    /// Identifier assigned at import time.
    pub id: IssueId,
    /// One-line summary.
    pub title: String,
    /// Plain-text description.
    pub description: String,
    /// Workflow status.
    pub status: Status,
    /// Kind of work.
    pub issue_type: IssueType,
    /// Urgency.
    pub priority: Priority,
    /// Display name of the reporter, empty when unknown.
    pub created_by: String,
    /// Display name of the assignee, empty when unassigned.
    pub assignee: String,
    /// Labels copied from the source record.
    #[serde(default)]
    pub labels: Vec<String>,
    /// Deep link back to the source record.
    pub external_ref: String,
    /// When the source record was created.
    pub created_at: DateTime<Utc>,
    /// When the source record was last modified.
    pub updated_at: DateTime<Utc>,
    /// When the source record was resolved, if it was.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub closed_at: Option<DateTime<Utc>>,
    /// Links to other remote records.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub dependencies: Vec<Dependency>,
}

impl Issue {
    /// Creates an open, medium-priority task with both timestamps set to now.
    #[must_use]
    pub fn new(
        id: impl Into<IssueId>,
        title: impl Into<String>,
        external_ref: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            title: title.into(),
            description: String::new(),
            status: Status::default(),
            issue_type: IssueType::default(),
            priority: Priority::default(),
            created_by: String::new(),
            assignee: String::new(),
            labels: Vec::new(),
            external_ref: external_ref.into(),
            created_at: now,
            updated_at: now,
            closed_at: None,
            dependencies: Vec::new(),
        }
    }
}


#[cfg(test)]
mod proptest_tests {
    use super::*;
    use proptest::prelude::*;

    fn arb_status() -> impl Strategy<Value = Status> {
        prop_oneof![
            Just(Status::Open),
            Just(Status::InProgress),
            Just(Status::Blocked),
            Just(Status::Closed),
        ]
    }

    fn arb_issue_type() -> impl Strategy<Value = IssueType> {
        prop_oneof![
            Just(IssueType::Bug),
            Just(IssueType::Feature),
            Just(IssueType::Task),
            Just(IssueType::Epic),
            Just(IssueType::Chore),
        ]
    }

    fn arb_dependency() -> impl Strategy<Value = Dependency> {
        (
            prop_oneof![
                Just(DependencyKind::ParentChild),
                Just(DependencyKind::Blocks),
                Just(DependencyKind::Related),
            ],
            "[A-Z]{2,5}-[1-9][0-9]{0,4}",
        )
            .prop_map(|(kind, key)| Dependency::new(kind, key))
    }

    prop_compose! {
        fn arb_issue()(
            title in "[a-zA-Z][a-zA-Z0-9 ]{0,50}",
            description in "[a-zA-Z0-9 .,!?\n]{0,200}",
            status in arb_status(),
            issue_type in arb_issue_type(),
            priority in 0u8..=4,
            labels in proptest::collection::vec("[a-z-]{1,12}", 0..4),
            dependencies in proptest::collection::vec(arb_dependency(), 0..3),
        ) -> Issue {
            let mut issue = Issue::new("jira-0000abcd", title, "https://jira.example.com/browse/P-1");
            issue.description = description;
            issue.status = status;
            issue.issue_type = issue_type;
            issue.priority = Priority::new(priority).expect("in range");
            issue.labels = labels;
            issue.dependencies = dependencies;
            issue
        }
    }

    proptest! {
        /// Priorities in range are accepted, everything else is rejected.
        #[test]
        fn priority_range(value in any::<u8>()) {
            prop_assert_eq!(Priority::new(value).is_ok(), value <= 4);
        }

        /// Issues survive a JSON round trip unchanged.
        #[test]
        fn issue_roundtrip(issue in arb_issue()) {
            let json = serde_json::to_string(&issue).expect("serialize");
            let parsed: Issue = serde_json::from_str(&json).expect("deserialize");
            prop_assert_eq!(issue, parsed);
        }
    }
}
