//! ADF to plain text.
//!
//! Rendering rules:
//!
//! | Node | Output |
//! |---|---|
//! | `text` | the literal text |
//! | `hardBreak` | `\n` |
//! | `mention` | `@` + display text (`@user` when missing) |
//! | `codeBlock` | a fenced block with the language hint |
//! | `heading` | `#` per level (clamped to 1-6), a space, the content |
//! | `listItem` | `• ` + the content |
//! | `blockquote` | every line prefixed with `> ` |
//! | anything else | the concatenated children |
//!
//! Top-level blocks are joined with a blank line. Children inside a block
//! are concatenated with no separator, which also applies to list items:
//! `• A• B`. Callers rely on that exact output, so keep it.

use crate::encode::PARAGRAPH_SEPARATOR;
use crate::node::{Document, Node};
use serde_json::Value;

const FENCE: &str = "```";
const BULLET: &str = "• ";
const QUOTE_PREFIX: &str = "> ";
const DEFAULT_MENTION: &str = "user";
const MAX_HEADING_LEVEL: usize = 6;

/// Decode a document to plain text. `None` decodes to the empty string.
#[must_use]
pub fn decode(doc: Option<&Document>) -> String {
    doc.map(Document::to_plain_text).unwrap_or_default()
}

/// Decode a raw JSON field to plain text.
///
/// Accepts whatever the API returned: a missing field, `null`, an object
/// without `content`, or a full document. None of these is an error.
#[must_use]
pub fn decode_value(value: Option<&Value>) -> String {
    match value {
        Some(value) if value.get("content").is_some_and(Value::is_array) => {
            Document::from(value).to_plain_text()
        }
        _ => String::new(),
    }
}

impl Document {
    /// Render top-level blocks separated by blank lines.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        self.content
            .iter()
            .map(Node::to_plain_text)
            .collect::<Vec<_>>()
            .join(PARAGRAPH_SEPARATOR)
    }
}

impl Node {
    /// Render this node and its children.
    #[must_use]
    pub fn to_plain_text(&self) -> String {
        match self {
            Self::Text(text) => text.clone(),
            Self::HardBreak => "\n".to_string(),
            Self::Mention { text, .. } => {
                format!("@{}", text.as_deref().unwrap_or(DEFAULT_MENTION))
            }
            Self::CodeBlock { language, content } => {
                let code: String = content
                    .iter()
                    .map(|child| match child {
                        Self::Text(text) => text.as_str(),
                        _ => "",
                    })
                    .collect();
                format!(
                    "{FENCE}{}\n{code}\n{FENCE}",
                    language.as_deref().unwrap_or_default()
                )
            }
            _ => {
                let children = self.children();
                // No prefix alone: an empty heading or item renders as nothing.
                if children.is_empty() {
                    return String::new();
                }
                let inner: String = children.iter().map(Self::to_plain_text).collect();
                self.wrap(inner)
            }
        }
    }

    fn wrap(&self, inner: String) -> String {
        match self {
            Self::Heading { level, .. } => {
                let level = level.unwrap_or(1).clamp(1, MAX_HEADING_LEVEL);
                format!("{} {inner}", "#".repeat(level))
            }
            Self::ListItem(_) => format!("{BULLET}{inner}"),
            Self::Blockquote(_) => inner
                .split('\n')
                .map(|line| format!("{QUOTE_PREFIX}{line}"))
                .collect::<Vec<_>>()
                .join("\n"),
            _ => inner,
        }
    }
}
