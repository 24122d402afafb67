//! GEDCOM line parser.
//!
//! Pipeline:
//!   decoded &str
//!     └─ split_line()          → SourceLine { level, xref, tag, value }
//!          └─ Parser::line()   → fold into the open record
//!               └─ Parser::finish() → ParseReport
//!
//! The grammar is `LEVEL [XREF] TAG [VALUE]`. Level 0 opens a record,
//! level 1 sets the subtag context, level 2 attaches `DATE`/`PLAC` to the
//! nearest enclosing level-1 event. Lines that don't fit are skipped with
//! a warning; the parser itself never fails.

use kin_core::person::Gender;

use crate::{
  ParseReport,
  date::normalize_date,
  record::{Family, GedcomDocument, Individual},
  warning::ParseWarning,
};

// ─── Line representation ─────────────────────────────────────────────────────

struct SourceLine<'a> {
  level: u32,
  xref:  Option<&'a str>,
  tag:   &'a str,
  value: &'a str,
}

/// Split one trimmed, non-empty line into its `LEVEL [XREF] TAG [VALUE]`
/// parts. Returns `None` for anything that doesn't fit the grammar.
fn split_line(line: &str) -> Option<SourceLine<'_>> {
  // Level: a run of digits followed by whitespace.
  let digits = line
    .find(|c: char| !c.is_ascii_digit())
    .unwrap_or(line.len());
  if digits == 0 {
    return None;
  }
  let level: u32 = line[..digits].parse().ok()?;
  let rest = line[digits..].trim_start();
  if rest.len() == line.len() - digits {
    // No whitespace after the level.
    return None;
  }

  // Optional xref: `@...@` followed by whitespace, kept verbatim.
  let (xref, rest) = match rest.strip_prefix('@') {
    Some(inner) => {
      let close = inner.find('@')?;
      if close == 0 {
        return None;
      }
      let tail = inner[close + 1..].trim_start();
      if tail.len() == inner.len() - close - 1 {
        // An xref must be separated from its tag.
        return None;
      }
      (Some(&rest[..close + 2]), tail)
    }
    None => (None, rest),
  };

  // Tag: a run of word characters.
  let tag_end = rest
    .find(|c: char| !(c.is_ascii_alphanumeric() || c == '_'))
    .unwrap_or(rest.len());
  if tag_end == 0 {
    return None;
  }
  let tag = &rest[..tag_end];

  // Value: everything after the whitespace following the tag.
  let after_tag = &rest[tag_end..];
  let value = if after_tag.is_empty() {
    ""
  } else {
    let v = after_tag.trim_start();
    if v.len() == after_tag.len() {
      // The tag ran into a non-word character with no separator.
      return None;
    }
    v
  };

  Some(SourceLine {
    level,
    xref,
    tag,
    value,
  })
}

// ─── Parser state ────────────────────────────────────────────────────────────

/// The level-1 event a level-2 `DATE`/`PLAC` attaches to.
#[derive(Clone, Copy, PartialEq)]
enum IndiEvent {
  Birth,
  Death,
}

#[derive(Clone, Copy, PartialEq)]
enum FamEvent {
  Marriage,
}

enum OpenRecord {
  Individual {
    record: Individual,
    subtag: Option<IndiEvent>,
  },
  Family {
    record: Family,
    subtag: Option<FamEvent>,
  },
}

/// Explicit parser state, threaded through each line.
struct Parser {
  individuals: Vec<Individual>,
  families:    Vec<Family>,
  warnings:    Vec<ParseWarning>,
  current:     Option<OpenRecord>,
}

impl Parser {
  fn new() -> Self {
    Self {
      individuals: Vec::new(),
      families:    Vec::new(),
      warnings:    Vec::new(),
      current:     None,
    }
  }

  /// Fold one raw line into the state. `number` is 1-based.
  fn line(&mut self, number: usize, raw: &str) {
    let line = raw.trim();
    if line.is_empty() {
      return;
    }

    let Some(src) = split_line(line) else {
      self.warnings.push(ParseWarning::MalformedLine {
        line: number,
        text: line.to_string(),
      });
      return;
    };

    if src.level == 0 {
      self.flush_current();
      match src.tag {
        "INDI" => match src.xref {
          Some(xref) => {
            self.current = Some(OpenRecord::Individual {
              record: Individual::new(xref),
              subtag: None,
            });
          }
          None => self.warnings.push(ParseWarning::MissingXref {
            line: number,
            tag:  src.tag.to_string(),
          }),
        },
        "FAM" => match src.xref {
          Some(xref) => {
            self.current = Some(OpenRecord::Family {
              record: Family::new(xref),
              subtag: None,
            });
          }
          None => self.warnings.push(ParseWarning::MissingXref {
            line: number,
            tag:  src.tag.to_string(),
          }),
        },
        // HEAD, TRLR, SUBM, SOUR, NOTE, … — expected envelope records,
        // closed over without a warning.
        _ => {}
      }
      return;
    }

    match &mut self.current {
      Some(OpenRecord::Individual { record, subtag }) => {
        indi_line(&mut self.warnings, record, subtag, number, &src);
      }
      Some(OpenRecord::Family { record, subtag }) => {
        fam_line(&mut self.warnings, record, subtag, number, &src);
      }
      // A level-1+ line outside any record: skipped (common inside HEAD).
      None => {}
    }
  }

  /// Move the open record into its collection. A record that re-declares
  /// an earlier xref replaces it in place.
  fn flush_current(&mut self) {
    match self.current.take() {
      Some(OpenRecord::Individual { record, .. }) => {
        match self.individuals.iter_mut().find(|i| i.xref == record.xref) {
          Some(existing) => *existing = record,
          None => self.individuals.push(record),
        }
      }
      Some(OpenRecord::Family { record, .. }) => {
        match self.families.iter_mut().find(|f| f.xref == record.xref) {
          Some(existing) => *existing = record,
          None => self.families.push(record),
        }
      }
      None => {}
    }
  }

  fn finish(mut self) -> ParseReport {
    self.flush_current();

    // Family pointers that resolve to no parsed individual are tolerated
    // downstream; surface them here for debugging.
    for family in &self.families {
      let pointers = family
        .husband
        .iter()
        .chain(family.wife.iter())
        .chain(family.children.iter());
      for xref in pointers {
        if !self.individuals.iter().any(|i| &i.xref == xref) {
          self.warnings.push(ParseWarning::DanglingPointer {
            family: family.xref.clone(),
            xref:   xref.clone(),
          });
        }
      }
    }

    ParseReport {
      document: GedcomDocument {
        individuals: self.individuals,
        families:    self.families,
      },
      warnings: self.warnings,
    }
  }
}

// ─── Record folding ──────────────────────────────────────────────────────────

fn indi_line(
  warnings: &mut Vec<ParseWarning>,
  record: &mut Individual,
  subtag: &mut Option<IndiEvent>,
  number: usize,
  src: &SourceLine<'_>,
) {
  match src.level {
    1 => {
      *subtag = match src.tag {
        "BIRT" => Some(IndiEvent::Birth),
        "DEAT" => Some(IndiEvent::Death),
        _ => None,
      };
      match src.tag {
        "NAME" => set_name(record, src.value),
        "SEX" => {
          record.sex = match src.value {
            "M" => Gender::Male,
            "F" => Gender::Female,
            _ => Gender::Unknown,
          };
        }
        _ => {}
      }
    }
    2 => match (src.tag, *subtag) {
      ("DATE", Some(event)) => match normalize_date(src.value) {
        Some(d) => match event {
          IndiEvent::Birth => record.birth_date = Some(d),
          IndiEvent::Death => record.death_date = Some(d),
        },
        None => push_date_warning(warnings, number, src.value),
      },
      ("PLAC", Some(event)) => {
        if let Some(place) = non_empty(src.value) {
          match event {
            IndiEvent::Birth => record.birth_place = Some(place),
            IndiEvent::Death => record.death_place = Some(place),
          }
        }
      }
      _ => {}
    },
    // Deeper levels carry notes and sources we don't model.
    _ => {}
  }
}

fn fam_line(
  warnings: &mut Vec<ParseWarning>,
  record: &mut Family,
  subtag: &mut Option<FamEvent>,
  number: usize,
  src: &SourceLine<'_>,
) {
  match src.level {
    1 => {
      *subtag = match src.tag {
        "MARR" => Some(FamEvent::Marriage),
        _ => None,
      };
      match src.tag {
        "HUSB" => record.husband = non_empty(src.value),
        "WIFE" => record.wife = non_empty(src.value),
        "CHIL" => {
          if let Some(child) = non_empty(src.value) {
            record.children.push(child);
          }
        }
        _ => {}
      }
    }
    2 if *subtag == Some(FamEvent::Marriage) => match src.tag {
      "DATE" => match normalize_date(src.value) {
        Some(d) => record.marriage_date = Some(d),
        None => push_date_warning(warnings, number, src.value),
      },
      "PLAC" => record.marriage_place = non_empty(src.value),
      _ => {}
    },
    _ => {}
  }
}

/// Fold a `NAME` value: `Jean /Dupont/` → name "Jean Dupont",
/// surname "Dupont", given name "Jean".
fn set_name(record: &mut Individual, value: &str) {
  record.name = value.replace('/', "").trim().to_string();

  if let Some(open) = value.find('/') {
    record.given_name = value[..open].trim().to_string();
    if let Some(len) = value[open + 1..].find('/')
      && len > 0
    {
      record.surname = value[open + 1..open + 1 + len].to_string();
    }
  }
}

fn non_empty(value: &str) -> Option<String> {
  let v = value.trim();
  if v.is_empty() { None } else { Some(v.to_string()) }
}

fn push_date_warning(
  warnings: &mut Vec<ParseWarning>,
  number: usize,
  value: &str,
) {
  if !value.trim().is_empty() {
    warnings.push(ParseWarning::UnparsableDate {
      line:  number,
      value: value.trim().to_string(),
    });
  }
}

// ─── Entry point ─────────────────────────────────────────────────────────────

pub(crate) fn parse_document(input: &str) -> ParseReport {
  let mut parser = Parser::new();
  for (index, raw) in input.lines().enumerate() {
    parser.line(index + 1, raw);
  }
  parser.finish()
}

// ─── Tests ───────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use chrono::NaiveDate;

  use super::*;
  use crate::parse_str;

  fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
  }

  // ── Individuals ───────────────────────────────────────────────────────

  #[test]
  fn single_individual_with_birth() {
    let input = "0 HEAD\n\
                 0 @I001@ INDI\n\
                 1 NAME Jean /Dupont/\n\
                 1 SEX M\n\
                 1 BIRT\n\
                 2 DATE 15 MAR 1950\n\
                 2 PLAC Paris, France\n\
                 0 TRLR";
    let report = parse_str(input);
    assert_eq!(report.document.individuals.len(), 1);

    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.name, "Jean Dupont");
    assert_eq!(indi.given_name, "Jean");
    assert_eq!(indi.surname, "Dupont");
    assert_eq!(indi.sex, Gender::Male);
    assert_eq!(indi.birth_date, Some(date(1950, 3, 15)));
    assert_eq!(indi.birth_place.as_deref(), Some("Paris, France"));
    assert!(indi.death_date.is_none());
  }

  #[test]
  fn death_event_attaches_to_deat_subtag() {
    let input = "0 @I001@ INDI\n\
                 1 BIRT\n\
                 2 DATE 1950\n\
                 1 DEAT\n\
                 2 DATE 12 JUN 2001\n\
                 2 PLAC Lyon";
    let report = parse_str(input);
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.birth_date, Some(date(1950, 1, 1)));
    assert_eq!(indi.death_date, Some(date(2001, 6, 12)));
    assert_eq!(indi.death_place.as_deref(), Some("Lyon"));
  }

  #[test]
  fn date_outside_event_context_ignored() {
    // A NAME line resets the subtag; the stray DATE attaches to nothing.
    let input = "0 @I001@ INDI\n\
                 1 BIRT\n\
                 1 NAME Jean /Dupont/\n\
                 2 DATE 15 MAR 1950";
    let report = parse_str(input);
    let indi = report.document.individual("@I001@").unwrap();
    assert!(indi.birth_date.is_none());
  }

  #[test]
  fn missing_name_yields_empty_string() {
    let report = parse_str("0 @I001@ INDI\n1 SEX F");
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.name, "");
    assert_eq!(indi.sex, Gender::Female);
  }

  #[test]
  fn lowercase_sex_is_unknown() {
    let report = parse_str("0 @I001@ INDI\n1 SEX m");
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.sex, Gender::Unknown);
  }

  #[test]
  fn final_record_is_flushed_without_trailer() {
    let report = parse_str("0 @I001@ INDI\n1 NAME Ada /Lovelace/");
    assert_eq!(report.document.individuals.len(), 1);
  }

  #[test]
  fn redeclared_xref_replaces_in_place() {
    let input = "0 @I001@ INDI\n\
                 1 NAME First /Version/\n\
                 0 @I002@ INDI\n\
                 1 NAME Other /Person/\n\
                 0 @I001@ INDI\n\
                 1 NAME Second /Version/";
    let report = parse_str(input);
    assert_eq!(report.document.individuals.len(), 2);
    assert_eq!(report.document.individuals[0].name, "Second Version");
    assert_eq!(report.document.individuals[0].xref, "@I001@");
  }

  // ── Name edge cases ───────────────────────────────────────────────────

  #[test]
  fn name_without_slashes() {
    let report = parse_str("0 @I001@ INDI\n1 NAME Cher");
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.name, "Cher");
    assert_eq!(indi.given_name, "");
    assert_eq!(indi.surname, "");
  }

  #[test]
  fn name_with_unclosed_slash() {
    let report = parse_str("0 @I001@ INDI\n1 NAME Jean /Dupont");
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.name, "Jean Dupont");
    assert_eq!(indi.given_name, "Jean");
    assert_eq!(indi.surname, "");
  }

  #[test]
  fn surname_only_name() {
    let report = parse_str("0 @I001@ INDI\n1 NAME /Dupont/");
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.name, "Dupont");
    assert_eq!(indi.given_name, "");
    assert_eq!(indi.surname, "Dupont");
  }

  #[test]
  fn multi_word_surname() {
    let report = parse_str("0 @I001@ INDI\n1 NAME Ana /De La Cruz/");
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.surname, "De La Cruz");
    assert_eq!(indi.name, "Ana De La Cruz");
  }

  // ── Families ──────────────────────────────────────────────────────────

  #[test]
  fn family_block() {
    let input = "0 @F001@ FAM\n\
                 1 HUSB @I001@\n\
                 1 WIFE @I002@\n\
                 1 CHIL @I003@\n\
                 1 MARR\n\
                 2 DATE 20 JUN 1975\n\
                 2 PLAC Marseille";
    let report = parse_str(input);
    let fam = report.document.family("@F001@").unwrap();
    assert_eq!(fam.husband.as_deref(), Some("@I001@"));
    assert_eq!(fam.wife.as_deref(), Some("@I002@"));
    assert_eq!(fam.children, vec!["@I003@".to_string()]);
    assert_eq!(fam.marriage_date, Some(date(1975, 6, 20)));
    assert_eq!(fam.marriage_place.as_deref(), Some("Marseille"));
  }

  #[test]
  fn duplicate_children_tolerated() {
    let input = "0 @F001@ FAM\n\
                 1 CHIL @I003@\n\
                 1 CHIL @I003@";
    let report = parse_str(input);
    let fam = report.document.family("@F001@").unwrap();
    assert_eq!(fam.children.len(), 2);
  }

  #[test]
  fn marriage_date_requires_marr_context() {
    let input = "0 @F001@ FAM\n\
                 1 HUSB @I001@\n\
                 2 DATE 20 JUN 1975";
    let report = parse_str(input);
    let fam = report.document.family("@F001@").unwrap();
    assert!(fam.marriage_date.is_none());
  }

  #[test]
  fn dangling_pointer_warns_but_parses() {
    let input = "0 @I001@ INDI\n\
                 1 NAME Jean /Dupont/\n\
                 0 @F001@ FAM\n\
                 1 HUSB @I001@\n\
                 1 WIFE @I999@";
    let report = parse_str(input);
    assert_eq!(report.document.families.len(), 1);
    assert!(report.warnings.iter().any(|w| matches!(
      w,
      ParseWarning::DanglingPointer { family, xref }
        if family == "@F001@" && xref == "@I999@"
    )));
  }

  // ── Leniency ──────────────────────────────────────────────────────────

  #[test]
  fn malformed_lines_skipped_with_warning() {
    let input = "0 @I001@ INDI\n\
                 this is not a gedcom line\n\
                 1 SEX M";
    let report = parse_str(input);
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.sex, Gender::Male);
    assert!(report.warnings.iter().any(|w| matches!(
      w,
      ParseWarning::MalformedLine { line: 2, .. }
    )));
  }

  #[test]
  fn record_without_xref_skipped() {
    let report = parse_str("0 INDI\n1 NAME Ghost /Record/");
    assert!(report.document.individuals.is_empty());
    assert!(report.warnings.iter().any(|w| matches!(
      w,
      ParseWarning::MissingXref { tag, .. } if tag == "INDI"
    )));
  }

  #[test]
  fn unparsable_date_warns() {
    let input = "0 @I001@ INDI\n\
                 1 BIRT\n\
                 2 DATE sometime in spring";
    let report = parse_str(input);
    let indi = report.document.individual("@I001@").unwrap();
    assert!(indi.birth_date.is_none());
    assert!(report.warnings.iter().any(|w| matches!(
      w,
      ParseWarning::UnparsableDate { .. }
    )));
  }

  #[test]
  fn unknown_tags_ignored() {
    let input = "0 @I001@ INDI\n\
                 1 OCCU Engineer\n\
                 1 RESI\n\
                 2 ADDR 1 Main St\n\
                 1 SEX F";
    let report = parse_str(input);
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.sex, Gender::Female);
  }

  #[test]
  fn empty_input_is_valid_and_empty() {
    let report = parse_str("");
    assert!(report.document.is_empty());
    assert!(report.warnings.is_empty());
  }

  #[test]
  fn level_one_line_outside_record_ignored() {
    let report = parse_str("1 NAME Orphan /Line/");
    assert!(report.document.is_empty());
  }

  // ── split_line ────────────────────────────────────────────────────────

  #[test]
  fn split_line_grammar() {
    let l = split_line("0 @I001@ INDI").unwrap();
    assert_eq!(l.level, 0);
    assert_eq!(l.xref, Some("@I001@"));
    assert_eq!(l.tag, "INDI");
    assert_eq!(l.value, "");

    let l = split_line("2 DATE 15 MAR 1950").unwrap();
    assert_eq!(l.level, 2);
    assert_eq!(l.xref, None);
    assert_eq!(l.tag, "DATE");
    assert_eq!(l.value, "15 MAR 1950");

    assert!(split_line("NAME no level").is_none());
    assert!(split_line("1").is_none());
    assert!(split_line("1 @I001@").is_none());
    assert!(split_line("1 @unclosed INDI").is_none());
  }

  // ── Byte-level entry point ────────────────────────────────────────────

  #[test]
  fn parse_decodes_latin1_places() {
    let mut bytes = Vec::new();
    bytes.extend_from_slice(b"0 @I001@ INDI\n1 BIRT\n2 PLAC Orl");
    bytes.push(0xE9); // é in Latin-1
    bytes.extend_from_slice(b"ans");
    let report = crate::parse(&bytes);
    let indi = report.document.individual("@I001@").unwrap();
    assert_eq!(indi.birth_place.as_deref(), Some("Orléans"));
  }
}
