//! Raw Jira API types.
//!
//! These mirror the JSON returned by the search endpoint closely. Every
//! field is optional on the wire and defaults when absent, so a sparse
//! `fields` object still decodes.

use serde::{Deserialize, Deserializer};

use crate::adf::{AdfNode, extract_text};

/// One page of results from the search endpoint.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SearchResponse {
    /// Offset of the first issue in this page.
    #[serde(default)]
    pub start_at: u64,
    /// Page size the server applied.
    #[serde(default)]
    pub max_results: u64,
    /// Total number of matches the server reports.
    #[serde(default)]
    pub total: u64,
    /// The issues in this page.
    #[serde(default)]
    pub issues: Vec<RawIssue>,
}

/// An issue as returned by the Jira API, before normalization.
#[derive(Debug, Clone, Deserialize)]
pub struct RawIssue {
    /// Project-prefixed key, for example `PROJ-123`.
    pub key: String,
    /// The issue's field values.
    #[serde(default)]
    pub fields: RawIssueFields,
}

/// Field values of a [`RawIssue`].
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RawIssueFields {
    /// One-line summary.
    #[serde(default)]
    pub summary: String,
    /// Plain text on Server/DC, an ADF document on Cloud.
    #[serde(default)]
    pub description: Description,
    #[serde(default)]
    pub status: Option<JiraStatus>,
    #[serde(default)]
    pub priority: Option<JiraPriority>,
    #[serde(default, rename = "issuetype")]
    pub issue_type: Option<JiraIssueType>,
    #[serde(default)]
    pub assignee: Option<JiraUser>,
    #[serde(default)]
    pub reporter: Option<JiraUser>,
    #[serde(default)]
    pub labels: Vec<String>,
    /// Creation timestamp, in one of several Jira formats.
    #[serde(default)]
    pub created: String,
    /// Last-update timestamp.
    #[serde(default)]
    pub updated: String,
    #[serde(default)]
    pub resolution: Option<JiraResolution>,
    /// Resolution timestamp, `None` for unresolved issues.
    #[serde(default, rename = "resolutiondate")]
    pub resolution_date: Option<String>,
    #[serde(default)]
    pub parent: Option<JiraParent>,
    #[serde(default, rename = "issuelinks")]
    pub issue_links: Vec<JiraIssueLink>,
}

impl RawIssueFields {
    /// Returns the description as plain text.
    ///
    /// Plain-text descriptions are returned unchanged, ADF documents are
    /// flattened with [`extract_text`], and a missing description yields an
    /// empty string.
    ///
    /// # Examples
    ///
    /// ```
    /// use ferry_jira::{Description, RawIssueFields};
    ///
    /// let fields = RawIssueFields {
    ///     description: Description::PlainText("As written".to_string()),
    ///     ..Default::default()
    /// };
    /// assert_eq!(fields.description_text(), "As written");
    /// assert_eq!(RawIssueFields::default().description_text(), "");
    /// ```
    #[must_use]
    pub fn description_text(&self) -> String {
        match &self.description {
            Description::PlainText(text) => text.clone(),
            Description::Document(doc) => extract_text(doc),
            Description::Absent => String::new(),
        }
    }
}

/// The polymorphic `description` field.
///
/// The same field carries a string on self-hosted deployments and an ADF
/// document on Cloud. The shape is resolved once, when the response is
/// decoded: strings become [`Description::PlainText`], objects become
/// [`Description::Document`], and anything else is [`Description::Absent`].
#[derive(Debug, Clone, Default, PartialEq)]
pub enum Description {
    /// A plain string.
    PlainText(String),
    /// A structured ADF document.
    Document(AdfNode),
    /// No usable description.
    #[default]
    Absent,
}

impl<'de> Deserialize<'de> for Description {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = serde_json::Value::deserialize(deserializer)?;
        Ok(match value {
            serde_json::Value::String(text) => Self::PlainText(text),
            object @ serde_json::Value::Object(_) => serde_json::from_value(object)
                .map(Self::Document)
                .unwrap_or(Self::Absent),
            _ => Self::Absent,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraStatus {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraPriority {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraIssueType {
    pub name: String,
    #[serde(default)]
    pub subtask: bool,
}

/// A Jira user reference.
///
/// Server/DC populates `name`; Cloud populates `displayName` and hides the
/// username. `emailAddress` depends on the user's privacy settings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraUser {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub display_name: String,
    #[serde(default)]
    pub email_address: String,
}

impl JiraUser {
    /// Returns the best available name: display name, then username, then
    /// email address.
    #[must_use]
    pub fn best_name(&self) -> &str {
        [&self.display_name, &self.name, &self.email_address]
            .into_iter()
            .find(|candidate| !candidate.is_empty())
            .map_or("", String::as_str)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraResolution {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraParent {
    pub key: String,
}

/// A typed link between two issues.
///
/// Exactly one of `inward_issue` / `outward_issue` is normally set,
/// depending on which side of the link the current issue sits.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JiraIssueLink {
    #[serde(default, rename = "type")]
    pub link_type: Option<JiraLinkType>,
    #[serde(default)]
    pub inward_issue: Option<JiraLinkedIssue>,
    #[serde(default)]
    pub outward_issue: Option<JiraLinkedIssue>,
}

impl JiraIssueLink {
    /// Returns the key of the issue on the other end of the link.
    #[must_use]
    pub fn other_key(&self) -> Option<&str> {
        self.outward_issue
            .as_ref()
            .or(self.inward_issue.as_ref())
            .map(|linked| linked.key.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraLinkType {
    pub name: String,
    #[serde(default)]
    pub inward: String,
    #[serde(default)]
    pub outward: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct JiraLinkedIssue {
    pub key: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn fields(value: serde_json::Value) -> RawIssueFields {
        serde_json::from_value(value).expect("fields should decode")
    }

    #[test]
    fn string_description_is_plain_text() {
        let f = fields(json!({ "description": "Plain text description" }));
        assert_eq!(
            f.description,
            Description::PlainText("Plain text description".to_string())
        );
        assert_eq!(f.description_text(), "Plain text description");
    }

    #[test]
    fn null_description_is_absent() {
        let f = fields(json!({ "description": null }));
        assert_eq!(f.description, Description::Absent);
        assert_eq!(f.description_text(), "");
    }

    #[test]
    fn missing_description_is_absent() {
        let f = fields(json!({}));
        assert_eq!(f.description, Description::Absent);
    }

    #[test]
    fn unexpected_description_shape_is_absent() {
        let f = fields(json!({ "description": 42 }));
        assert_eq!(f.description, Description::Absent);
        let f = fields(json!({ "description": ["a", "b"] }));
        assert_eq!(f.description, Description::Absent);
    }

    #[test]
    fn adf_description_is_extracted() {
        let f = fields(json!({
            "description": {
                "type": "doc",
                "content": [{
                    "type": "paragraph",
                    "content": [{ "type": "text", "text": "ADF content" }]
                }]
            }
        }));
        assert!(matches!(f.description, Description::Document(_)));
        assert_eq!(f.description_text(), "ADF content");
    }

    #[test]
    fn best_name_fallback_order() {
        let user = JiraUser {
            name: "jdoe".to_string(),
            display_name: "John Doe".to_string(),
            email_address: "john@example.com".to_string(),
        };
        assert_eq!(user.best_name(), "John Doe");

        let user = JiraUser {
            display_name: String::new(),
            ..user
        };
        assert_eq!(user.best_name(), "jdoe");

        let user = JiraUser {
            name: String::new(),
            ..user
        };
        assert_eq!(user.best_name(), "john@example.com");

        assert_eq!(JiraUser::default().best_name(), "");
    }

    #[test]
    fn issue_link_prefers_outward_key() {
        let link: JiraIssueLink = serde_json::from_value(json!({
            "type": { "name": "Blocks", "inward": "is blocked by", "outward": "blocks" },
            "outwardIssue": { "key": "PROJ-2" }
        }))
        .unwrap();
        assert_eq!(link.other_key(), Some("PROJ-2"));

        let link: JiraIssueLink = serde_json::from_value(json!({
            "type": { "name": "Relates" },
            "inwardIssue": { "key": "PROJ-3" }
        }))
        .unwrap();
        assert_eq!(link.other_key(), Some("PROJ-3"));
    }

    #[test]
    fn search_response_tolerates_missing_counts() {
        let page: SearchResponse = serde_json::from_value(json!({
            "issues": [{ "key": "PROJ-1", "fields": { "summary": "Only one" } }]
        }))
        .unwrap();
        assert_eq!(page.total, 0);
        assert_eq!(page.issues.len(), 1);
        assert_eq!(page.issues[0].fields.summary, "Only one");
    }

    #[test]
    fn full_issue_decodes() {
        let issue: RawIssue = serde_json::from_value(json!({
            "key": "PROJ-123",
            "fields": {
                "summary": "Test issue",
                "status": { "name": "In Progress" },
                "priority": { "name": "High" },
                "issuetype": { "name": "Sub-task", "subtask": true },
                "assignee": { "displayName": "Jane Smith" },
                "reporter": { "name": "jdoe" },
                "labels": ["label1", "label2"],
                "created": "2024-01-15T10:30:00.000+0000",
                "updated": "2024-01-16T11:00:00.000+0000",
                "resolutiondate": null,
                "parent": { "key": "PROJ-100" },
                "issuelinks": []
            }
        }))
        .unwrap();

        assert_eq!(issue.key, "PROJ-123");
        let issue_type = issue.fields.issue_type.unwrap();
        assert!(issue_type.subtask);
        assert_eq!(issue.fields.parent.unwrap().key, "PROJ-100");
        assert!(issue.fields.resolution_date.is_none());
        assert_eq!(issue.fields.reporter.unwrap().best_name(), "jdoe");
    }
}
