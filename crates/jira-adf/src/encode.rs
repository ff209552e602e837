//! Plain text to ADF.

use crate::node::{Document, Node};

/// Separator between paragraphs.
pub const PARAGRAPH_SEPARATOR: &str = "\n\n";

/// Separator between lines inside a paragraph.
pub const LINE_SEPARATOR: char = '\n';

/// Encode plain text as a version 1 ADF document.
///
/// Blank lines (`"\n\n"`) start a new paragraph and single newlines become
/// hard breaks. Every line, including an empty one, produces a text node, so
/// the empty string encodes to one paragraph holding one empty text node.
/// Carriage returns and markup characters are kept as literal text.
#[must_use]
pub fn encode(text: &str) -> Document {
    Document::new(text.split(PARAGRAPH_SEPARATOR).map(paragraph).collect())
}

fn paragraph(text: &str) -> Node {
    let mut inline = Vec::new();
    for (i, line) in text.split(LINE_SEPARATOR).enumerate() {
        if i > 0 {
            inline.push(Node::HardBreak);
        }
        inline.push(Node::text(line));
    }
    Node::Paragraph(inline)
}

impl Document {
    /// Encode plain text. See [`encode`].
    #[must_use]
    pub fn from_plain_text(text: &str) -> Self {
        encode(text)
    }
}

impl From<&str> for Document {
    fn from(text: &str) -> Self {
        encode(text)
    }
}
