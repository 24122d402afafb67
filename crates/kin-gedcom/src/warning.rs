//! Parse diagnostics.
//!
//! The decoder absorbs malformed input silently as far as the document is
//! concerned, but records what it skipped so callers can surface it for
//! debugging. Warnings never fail a parse.

use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum ParseWarning {
  #[error("line {line}: skipped malformed line {text:?}")]
  MalformedLine { line: usize, text: String },

  #[error("line {line}: skipped {tag} record without an xref")]
  MissingXref { line: usize, tag: String },

  #[error("line {line}: unparsable date {value:?}")]
  UnparsableDate { line: usize, value: String },

  #[error("family {family}: pointer to unknown individual {xref}")]
  DanglingPointer { family: String, xref: String },
}
