//! Plain-text extraction from Atlassian Document Format.
//!
//! Jira Cloud returns rich-text fields as ADF: a tree of typed nodes where
//! leaves are `text` nodes and everything else groups children. This module
//! flattens that tree into readable text, putting line breaks between block
//! nodes and nowhere else.

use serde::{Deserialize, Deserializer};

/// Node types that start a new line.
const BLOCK_NODES: &[&str] = &[
    "paragraph",
    "heading",
    "bulletList",
    "orderedList",
    "listItem",
    "codeBlock",
];

/// A node of an ADF document.
///
/// Only the parts needed for text extraction are kept; attributes and marks
/// are dropped on decode. Decoding never rejects a node object: a `type` or
/// `text` that is not a string reads as absent, a `content` that is not an
/// array reads as empty, and children that are not JSON objects are skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct AdfNode {
    /// The node type tag, empty if the node had none.
    #[serde(default, rename = "type", deserialize_with = "lenient_string")]
    pub node_type: String,
    /// Payload of `text` nodes.
    #[serde(default, deserialize_with = "lenient_text")]
    pub text: Option<String>,
    /// Child nodes, in document order.
    #[serde(default, deserialize_with = "object_children")]
    pub content: Vec<AdfNode>,
}

impl AdfNode {
    /// Creates a `text` leaf.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self {
            node_type: "text".to_string(),
            text: Some(text.into()),
            content: Vec::new(),
        }
    }

    /// Creates a container node of the given type.
    #[must_use]
    pub fn container(node_type: impl Into<String>, content: Vec<AdfNode>) -> Self {
        Self {
            node_type: node_type.into(),
            text: None,
            content,
        }
    }

    fn is_block(&self) -> bool {
        BLOCK_NODES.contains(&self.node_type.as_str())
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    Ok(match serde_json::Value::deserialize(deserializer)? {
        serde_json::Value::String(text) => Some(text),
        _ => None,
    })
}

fn lenient_string<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    lenient_text(deserializer).map(Option::unwrap_or_default)
}

fn object_children<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<AdfNode>, D::Error> {
    let serde_json::Value::Array(values) = serde_json::Value::deserialize(deserializer)? else {
        return Ok(Vec::new());
    };
    Ok(values
        .into_iter()
        .filter(serde_json::Value::is_object)
        .filter_map(|value| serde_json::from_value(value).ok())
        .collect())
}

/// Flattens an ADF document into plain text.
///
/// The tree is walked depth-first in document order. `text` nodes emit
/// their payload verbatim. Block nodes emit a newline before their content
/// unless the output is empty or already ends with one, so empty blocks
/// never stack up blank lines. Unknown node types are transparent. The
/// result is trimmed.
///
/// # Examples
///
/// ```
/// use ferry_jira::adf::{AdfNode, extract_text};
///
/// let doc = AdfNode::container("doc", vec![
///     AdfNode::container("paragraph", vec![AdfNode::text("Hello "), AdfNode::text("World")]),
///     AdfNode::container("paragraph", vec![AdfNode::text("Second line")]),
/// ]);
/// assert_eq!(extract_text(&doc), "Hello World\nSecond line");
/// ```
#[must_use]
pub fn extract_text(doc: &AdfNode) -> String {
    let mut out = String::new();
    write_node(doc, &mut out);
    out.trim().to_string()
}

fn write_node(node: &AdfNode, out: &mut String) {
    if node.node_type == "text" {
        if let Some(text) = &node.text {
            out.push_str(text);
        }
        return;
    }

    if node.is_block() && !out.is_empty() && !out.ends_with('\n') {
        out.push('\n');
    }

    for child in &node.content {
        write_node(child, out);
    }
}
