//! GEDCOM 5.5 decoder for Kin.
//!
//! Converts raw GEDCOM file bytes into [`kin_core`]-flavoured individual
//! and family records. Pure and synchronous; no HTTP or database
//! dependencies.
//!
//! The decoder is deliberately lenient: the format has decades of
//! non-conformant producers, so malformed lines, unknown tags, and
//! unparsable dates degrade to warnings instead of failing the parse.
//!
//! # Quick start
//!
//! ```no_run
//! let bytes = std::fs::read("tree.ged").unwrap();
//! let report = kin_gedcom::parse(&bytes);
//! println!(
//!   "{} individuals, {} families, {} warnings",
//!   report.document.individuals.len(),
//!   report.document.families.len(),
//!   report.warnings.len(),
//! );
//! ```

pub mod date;
mod decode;
mod parse;
pub mod record;
pub mod warning;

pub use record::{Family, GedcomDocument, Individual};
pub use warning::ParseWarning;

// ─── Public types ────────────────────────────────────────────────────────────

/// The result of parsing one GEDCOM file: the decoded document plus any
/// diagnostics collected along the way.
///
/// Parsing never fails. Total structural corruption (or an empty file)
/// yields an empty document, which is a valid, non-error result.
#[derive(Debug, Clone)]
pub struct ParseReport {
  pub document: GedcomDocument,
  pub warnings: Vec<ParseWarning>,
}

// ─── Public API ──────────────────────────────────────────────────────────────

/// Parse a GEDCOM file from raw bytes.
///
/// The byte stream is normalised to UTF-8 first (BOM stripped; legacy
/// Windows-1252/Latin-1 exports transliterated, undecodable bytes
/// dropped), then folded line by line into individual and family records.
pub fn parse(bytes: &[u8]) -> ParseReport {
  parse_str(&decode::decode_bytes(bytes))
}

/// Parse GEDCOM content that is already valid UTF-8.
pub fn parse_str(input: &str) -> ParseReport {
  parse::parse_document(input)
}
