//! Conversion of raw Jira issues into ferry issues.
//!
//! The [`Converter`] is a pure function over [`RawIssue`] values: it maps
//! vocabularies with [`crate::mapping`], flattens descriptions, parses
//! timestamps, assigns identifiers and builds the browse URL that links an
//! imported issue back to Jira.
//!
//! A batch converts atomically: the first record that fails (bad timestamp,
//! identifier generator error) fails the whole batch and nothing is
//! returned.
//!
//! # Example
//!
//! ```
//! use ferry_jira::{Converter, ConverterConfig, RawIssue};
//!
//! # fn example(raw: Vec<RawIssue>) -> ferry_jira::Result<()> {
//! let converter = Converter::new(ConverterConfig {
//!     base_url: "https://company.atlassian.net".to_string(),
//!     prefix: Some("proj".to_string()),
//!     ..Default::default()
//! });
//! let issues = converter.convert(&raw)?;
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use ferry_protocol::{Dependency, DependencyKind, Issue, IssueId, IssueType, Priority, Status};
use tracing::{debug, instrument};
use uuid::Uuid;

use crate::error::{BoxError, Error, Result};
use crate::mapping::{map_issue_type, map_priority, map_status, parse_timestamp};
use crate::reference::browse_url;
use crate::types::{JiraIssueLink, JiraUser, RawIssue};

/// Prefix used when the configuration does not name one.
pub const DEFAULT_PREFIX: &str = "jira";

/// UUID namespace for identifiers derived from issue title and creation time.
const JIRA_ISSUE_NAMESPACE: Uuid = Uuid::from_u128(0x3b2f_9c1e_7a45_4d0b_9e61_c8d2_5f0a_7e14);

/// Assigns identifiers to converted issues.
///
/// Implemented for any `Fn(&str, DateTime<Utc>) -> Result<IssueId, BoxError>`
/// closure, so callers can plug in deterministic or collision-checked
/// schemes without a dedicated type.
pub trait IdGenerator: Send + Sync {
    /// Returns the identifier for an issue with the given title and
    /// creation time.
    ///
    /// # Errors
    ///
    /// Any error aborts the conversion batch.
    fn generate(
        &self,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> std::result::Result<IssueId, BoxError>;
}

impl<F> IdGenerator for F
where
    F: Fn(&str, DateTime<Utc>) -> std::result::Result<IssueId, BoxError> + Send + Sync,
{
    fn generate(
        &self,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> std::result::Result<IssueId, BoxError> {
        self(title, created_at)
    }
}

/// The default identifier scheme: `{prefix}-{8 hex digits}`.
///
/// The digits come from a UUID v5 of the title and the RFC 3339 creation
/// time, so re-importing the same issue yields the same identifier.
///
/// # Examples
///
/// ```
/// use chrono::{TimeZone, Utc};
/// use ferry_jira::{IdGenerator, PrefixIdGenerator};
///
/// let generator = PrefixIdGenerator::new("proj");
/// let created = Utc.with_ymd_and_hms(2024, 1, 15, 10, 30, 0).unwrap();
/// let id = generator.generate("Fix login", created).unwrap();
/// assert!(id.starts_with("proj-"));
/// assert_eq!(id.len(), "proj-".len() + 8);
/// assert_eq!(id, generator.generate("Fix login", created).unwrap());
/// ```
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrefixIdGenerator {
    prefix: String,
}

impl PrefixIdGenerator {
    /// Creates a generator for the given prefix.
    #[must_use]
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }
}

impl IdGenerator for PrefixIdGenerator {
    fn generate(
        &self,
        title: &str,
        created_at: DateTime<Utc>,
    ) -> std::result::Result<IssueId, BoxError> {
        let seed = format!("{title}\n{}", created_at.to_rfc3339());
        let digest = Uuid::new_v5(&JIRA_ISSUE_NAMESPACE, seed.as_bytes()).simple().to_string();
        Ok(format!("{}-{}", self.prefix, &digest[..8]))
    }
}

/// Options for a [`Converter`].
#[derive(Clone, Default)]
pub struct ConverterConfig {
    /// Jira base URL used to build external references.
    pub base_url: String,
    /// Identifier prefix for the default scheme (default: `jira`).
    pub prefix: Option<String>,
    /// Custom identifier generator; replaces the default scheme entirely.
    pub id_generator: Option<Arc<dyn IdGenerator>>,
}

impl ConverterConfig {
    /// Creates a configuration for the given base URL with default
    /// identifier assignment.
    #[must_use]
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            ..Default::default()
        }
    }

    /// Replaces identifier assignment with `generator`.
    #[must_use]
    pub fn with_id_generator(mut self, generator: impl IdGenerator + 'static) -> Self {
        self.id_generator = Some(Arc::new(generator));
        self
    }
}

impl fmt::Debug for ConverterConfig {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ConverterConfig")
            .field("base_url", &self.base_url)
            .field("prefix", &self.prefix)
            .field("id_generator", &self.id_generator.as_ref().map(|_| "custom"))
            .finish()
    }
}

/// Maps [`RawIssue`] records onto ferry [`Issue`]s.
#[derive(Clone)]
pub struct Converter {
    base_url: String,
    id_generator: Arc<dyn IdGenerator>,
}

impl Converter {
    /// Creates a converter from its configuration.
    #[must_use]
    pub fn new(config: ConverterConfig) -> Self {
        let id_generator = config.id_generator.unwrap_or_else(|| {
            let prefix = config.prefix.as_deref().unwrap_or(DEFAULT_PREFIX);
            Arc::new(PrefixIdGenerator::new(prefix))
        });
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            id_generator,
        }
    }

    /// Converts a batch of raw issues, preserving order.
    ///
    /// # Errors
    ///
    /// Returns the first per-issue error; no partial batch is returned.
    #[instrument(skip(self, issues), fields(count = issues.len()))]
    pub fn convert(&self, issues: &[RawIssue]) -> Result<Vec<Issue>> {
        let converted = issues
            .iter()
            .map(|raw| self.convert_issue(raw))
            .collect::<Result<Vec<_>>>()?;
        debug!(count = converted.len(), "converted issues");
        Ok(converted)
    }

    /// Converts a single raw issue.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Parse`] if `created` or `updated` (or a present
    /// `resolutiondate`) cannot be parsed, and [`Error::IdGeneration`] if
    /// the identifier generator fails.
    pub fn convert_issue(&self, raw: &RawIssue) -> Result<Issue> {
        let fields = &raw.fields;

        let created_at = parse_timestamp(&fields.created)?;
        let updated_at = parse_timestamp(&fields.updated)?;
        let closed_at = fields
            .resolution_date
            .as_deref()
            .filter(|date| !date.trim().is_empty())
            .map(parse_timestamp)
            .transpose()?;

        let id = self
            .id_generator
            .generate(&fields.summary, created_at)
            .map_err(|source| Error::IdGeneration {
                key: raw.key.clone(),
                source,
            })?;

        let status = fields
            .status
            .as_ref()
            .map_or_else(Status::default, |s| map_status(&s.name));
        let issue_type = fields
            .issue_type
            .as_ref()
            .map_or_else(IssueType::default, |t| map_issue_type(&t.name));
        let priority = fields
            .priority
            .as_ref()
            .map_or_else(Priority::default, |p| map_priority(&p.name));

        debug!(key = %raw.key, %id, ?status, "converted issue");

        Ok(Issue {
            id,
            title: fields.summary.clone(),
            description: fields.description_text(),
            status,
            issue_type,
            priority,
            created_by: display_name(fields.reporter.as_ref()).to_string(),
            assignee: display_name(fields.assignee.as_ref()).to_string(),
            labels: fields.labels.clone(),
            external_ref: browse_url(&self.base_url, &raw.key),
            created_at,
            updated_at,
            closed_at,
            dependencies: dependencies(raw),
        })
    }
}

impl fmt::Debug for Converter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Converter")
            .field("base_url", &self.base_url)
            .finish_non_exhaustive()
    }
}

/// Returns the best available name for an optional user, or `""`.
#[must_use]
pub fn display_name(user: Option<&JiraUser>) -> &str {
    user.map_or("", JiraUser::best_name)
}

fn dependencies(raw: &RawIssue) -> Vec<Dependency> {
    let parent = raw
        .fields
        .parent
        .iter()
        .map(|parent| Dependency::new(DependencyKind::ParentChild, parent.key.clone()));
    let links = raw.fields.issue_links.iter().filter_map(link_dependency);
    parent.chain(links).collect()
}

fn link_dependency(link: &JiraIssueLink) -> Option<Dependency> {
    let key = link.other_key()?;
    let kind = match &link.link_type {
        Some(link_type) if link_type.name.eq_ignore_ascii_case("blocks") => DependencyKind::Blocks,
        _ => DependencyKind::Related,
    };
    Some(Dependency::new(kind, key))
}
