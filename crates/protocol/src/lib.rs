//! Shared protocol types for the ferry importer.
//!
//! This crate defines the internal issue model that importers produce and
//! downstream consumers persist. It knows nothing about any particular
//! remote tracker: every value here is already normalized into ferry's
//! fixed vocabulary.
//!
//! # Overview
//!
//! - [`issue`]: The [`Issue`] record and its closed vocabularies
//!   ([`Status`], [`IssueType`], [`Priority`]) plus [`Dependency`] edges
//! - [`error`]: Error types for protocol operations
//!
//! # Examples
//!
//! ```
//! use ferry_protocol::{Issue, IssueType, Priority, Status};
//!
//! let issue = Issue::new("jira-1a2b3c4d", "Fix login", "https://example.atlassian.net/browse/PROJ-1");
//! assert_eq!(issue.status, Status::Open);
//! assert_eq!(issue.issue_type, IssueType::Task);
//! assert_eq!(issue.priority, Priority::MEDIUM);
//! ```

pub mod error;
pub mod issue;

// Re-export primary types at crate root for convenience
pub use error::{ProtocolError, Result};
pub use issue::{Dependency, DependencyKind, Issue, IssueId, IssueType, Priority, Status};
