//! Conversion between plain text and the Atlassian Document Format (ADF).
//!
//! Jira stores descriptions, comments and worklog notes as ADF documents:
//! a JSON tree of typed nodes (`doc`, `paragraph`, `text`, `heading`, ...).
//! This crate maps that tree to and from the plain text an AI assistant
//! reads and writes.
//!
//! # Encoding
//!
//! [`encode`] splits on blank lines into paragraphs and on single newlines
//! into hard breaks. Nothing else is interpreted: backtick fences, `#`
//! prefixes and bullets stay literal text.
//!
//! # Decoding
//!
//! [`decode`] and [`decode_value`] render every known node kind and fall
//! back to rendering the children of anything unrecognized. Both are total:
//! malformed, empty or missing documents produce a (possibly empty) string.
//!
//! ```
//! let doc = jira_adf::encode("Hello\nworld");
//! assert_eq!(jira_adf::decode(Some(&doc)), "Hello\nworld");
//! ```

#![forbid(unsafe_code)]
#![warn(missing_docs)]

pub mod decode;
pub mod encode;
pub mod node;

pub use decode::{decode, decode_value};
pub use encode::encode;
pub use node::{Document, Node};
