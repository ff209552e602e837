//! ADF node model.
//!
//! The node set is closed: every kind the converter understands has its own
//! variant, and everything else lands in [`Node::Other`] with its children
//! kept and its attributes dropped. Conversion from JSON never fails, so a
//! response body with an unexpected shape still yields a usable tree.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value, json};

/// Version written on every document the encoder produces.
pub const ADF_VERSION: u64 = 1;

/// A single ADF node below the document root.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub enum Node {
    /// One paragraph of inline content.
    Paragraph(Vec<Node>),

    /// A literal run of text. A missing `text` field is read as empty.
    Text(String),

    /// Forced line break inside a paragraph.
    HardBreak,

    /// Reference to a user.
    Mention {
        /// Account id of the mentioned user.
        id: Option<String>,
        /// Display text, rendered after an `@`.
        text: Option<String>,
    },

    /// Section heading.
    Heading {
        /// Heading level, normally 1 to 6.
        level: Option<usize>,
        /// Inline content.
        content: Vec<Node>,
    },

    /// Unordered list of [`Node::ListItem`]s.
    BulletList(Vec<Node>),

    /// Ordered list of [`Node::ListItem`]s.
    OrderedList(Vec<Node>),

    /// One list entry holding block content.
    ListItem(Vec<Node>),

    /// Quoted block content.
    Blockquote(Vec<Node>),

    /// Fenced code.
    CodeBlock {
        /// Language hint for the fence.
        language: Option<String>,
        /// Text runs making up the code.
        content: Vec<Node>,
    },

    /// Any kind not listed above.
    Other {
        /// The original `type` tag (empty when the node had none).
        kind: String,
        /// Child nodes, rendered without a wrapper.
        content: Vec<Node>,
    },
}

impl Node {
    /// Create a text node.
    #[must_use]
    pub fn text(text: impl Into<String>) -> Self {
        Self::Text(text.into())
    }

    /// The `type` tag this node serializes with.
    #[must_use]
    pub fn kind(&self) -> &str {
        match self {
            Self::Paragraph(_) => "paragraph",
            Self::Text(_) => "text",
            Self::HardBreak => "hardBreak",
            Self::Mention { .. } => "mention",
            Self::Heading { .. } => "heading",
            Self::BulletList(_) => "bulletList",
            Self::OrderedList(_) => "orderedList",
            Self::ListItem(_) => "listItem",
            Self::Blockquote(_) => "blockquote",
            Self::CodeBlock { .. } => "codeBlock",
            Self::Other { kind, .. } => kind,
        }
    }

    /// Child nodes, empty for leaf kinds.
    #[must_use]
    pub fn children(&self) -> &[Node] {
        match self {
            Self::Paragraph(content)
            | Self::BulletList(content)
            | Self::OrderedList(content)
            | Self::ListItem(content)
            | Self::Blockquote(content)
            | Self::Heading { content, .. }
            | Self::CodeBlock { content, .. }
            | Self::Other { content, .. } => content,
            Self::Text(_) | Self::HardBreak | Self::Mention { .. } => &[],
        }
    }
}

/// The `doc` root of an ADF tree.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "Value", into = "Value")]
pub struct Document {
    /// Format version. Always [`ADF_VERSION`] for encoded documents.
    pub version: u64,

    /// Top-level block nodes.
    pub content: Vec<Node>,
}

impl Document {
    /// Create a version 1 document from block nodes.
    #[must_use]
    pub fn new(content: Vec<Node>) -> Self {
        Self {
            version: ADF_VERSION,
            content,
        }
    }
}

fn string_attr(attrs: Option<&Map<String, Value>>, key: &str) -> Option<String> {
    attrs
        .and_then(|a| a.get(key))
        .and_then(Value::as_str)
        .map(str::to_string)
}

fn children_of(object: &Map<String, Value>) -> Vec<Node> {
    object
        .get("content")
        .and_then(Value::as_array)
        .map(|items| items.iter().map(Node::from).collect())
        .unwrap_or_default()
}

impl From<&Value> for Node {
    fn from(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::Other {
                kind: String::new(),
                content: Vec::new(),
            };
        };
        let kind = object.get("type").and_then(Value::as_str).unwrap_or("");
        let attrs = object.get("attrs").and_then(Value::as_object);

        match kind {
            "paragraph" => Self::Paragraph(children_of(object)),
            "text" => Self::Text(
                object
                    .get("text")
                    .and_then(Value::as_str)
                    .unwrap_or_default()
                    .to_string(),
            ),
            "hardBreak" => Self::HardBreak,
            "mention" => Self::Mention {
                id: string_attr(attrs, "id"),
                text: string_attr(attrs, "text"),
            },
            "heading" => Self::Heading {
                level: attrs
                    .and_then(|a| a.get("level"))
                    .and_then(Value::as_u64)
                    .and_then(|level| usize::try_from(level).ok()),
                content: children_of(object),
            },
            "bulletList" => Self::BulletList(children_of(object)),
            "orderedList" => Self::OrderedList(children_of(object)),
            "listItem" => Self::ListItem(children_of(object)),
            "blockquote" => Self::Blockquote(children_of(object)),
            "codeBlock" => Self::CodeBlock {
                language: string_attr(attrs, "language"),
                content: children_of(object),
            },
            other => Self::Other {
                kind: other.to_string(),
                content: children_of(object),
            },
        }
    }
}

impl From<Value> for Node {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

fn container(kind: &str, content: Vec<Node>) -> Value {
    json!({
        "type": kind,
        "content": content.into_iter().map(Value::from).collect::<Vec<_>>(),
    })
}

impl From<Node> for Value {
    fn from(node: Node) -> Self {
        match node {
            Node::Paragraph(content) => container("paragraph", content),
            Node::Text(text) => json!({ "type": "text", "text": text }),
            Node::HardBreak => json!({ "type": "hardBreak" }),
            Node::Mention { id, text } => {
                let mut attrs = Map::new();
                if let Some(id) = id {
                    attrs.insert("id".into(), Value::String(id));
                }
                if let Some(text) = text {
                    attrs.insert("text".into(), Value::String(text));
                }
                json!({ "type": "mention", "attrs": attrs })
            }
            Node::Heading { level, content } => {
                let mut value = container("heading", content);
                value["attrs"] = json!({ "level": level.unwrap_or(1) });
                value
            }
            Node::BulletList(content) => container("bulletList", content),
            Node::OrderedList(content) => container("orderedList", content),
            Node::ListItem(content) => container("listItem", content),
            Node::Blockquote(content) => container("blockquote", content),
            Node::CodeBlock { language, content } => {
                let mut value = container("codeBlock", content);
                if let Some(language) = language {
                    value["attrs"] = json!({ "language": language });
                }
                value
            }
            Node::Other { kind, content } => container(&kind, content),
        }
    }
}

impl From<&Value> for Document {
    fn from(value: &Value) -> Self {
        let version = value
            .get("version")
            .and_then(Value::as_u64)
            .unwrap_or(ADF_VERSION);
        let content = value.as_object().map(children_of).unwrap_or_default();
        Self { version, content }
    }
}

impl From<Value> for Document {
    fn from(value: Value) -> Self {
        Self::from(&value)
    }
}

impl From<Document> for Value {
    fn from(doc: Document) -> Self {
        json!({
            "type": "doc",
            "version": doc.version,
            "content": doc.content.into_iter().map(Value::from).collect::<Vec<_>>(),
        })
    }
}
