//! Parsed GEDCOM records.
//!
//! Xrefs (`@I001@`, `@F001@`) are kept verbatim, `@` signs included, so
//! family pointers compare directly against individual xrefs. They are
//! only unique within one file and never stable across files.

use chrono::NaiveDate;
use kin_core::person::Gender;
use serde::{Deserialize, Serialize};

/// One `INDI` record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Individual {
  pub xref:        String,
  /// Display name with the surname slashes stripped. Never absent — an
  /// individual without a `NAME` line gets an empty string.
  pub name:        String,
  pub given_name:  String,
  pub surname:     String,
  pub sex:         Gender,
  pub birth_date:  Option<NaiveDate>,
  pub birth_place: Option<String>,
  pub death_date:  Option<NaiveDate>,
  pub death_place: Option<String>,
}

impl Individual {
  pub(crate) fn new(xref: &str) -> Self {
    Self {
      xref:        xref.to_string(),
      name:        String::new(),
      given_name:  String::new(),
      surname:     String::new(),
      sex:         Gender::Unknown,
      birth_date:  None,
      birth_place: None,
      death_date:  None,
      death_place: None,
    }
  }
}

/// One `FAM` record — a conjugal unit.
///
/// Pointers may reference individuals missing from the file (dangling);
/// consumers must resolve them tolerantly. `children` preserves file
/// order and tolerates duplicates from malformed producers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Family {
  pub xref:           String,
  pub husband:        Option<String>,
  pub wife:           Option<String>,
  pub children:       Vec<String>,
  pub marriage_date:  Option<NaiveDate>,
  pub marriage_place: Option<String>,
}

impl Family {
  pub(crate) fn new(xref: &str) -> Self {
    Self {
      xref:           xref.to_string(),
      husband:        None,
      wife:           None,
      children:       Vec::new(),
      marriage_date:  None,
      marriage_place: None,
    }
  }
}

/// Everything decoded from one GEDCOM file, in parse order.
///
/// Xrefs are unique within each collection: a record that re-declares an
/// earlier xref replaces it in place.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GedcomDocument {
  pub individuals: Vec<Individual>,
  pub families:    Vec<Family>,
}

impl GedcomDocument {
  /// Look up an individual by xref.
  pub fn individual(&self, xref: &str) -> Option<&Individual> {
    self.individuals.iter().find(|i| i.xref == xref)
  }

  /// Look up a family by xref.
  pub fn family(&self, xref: &str) -> Option<&Family> {
    self.families.iter().find(|f| f.xref == xref)
  }

  pub fn is_empty(&self) -> bool {
    self.individuals.is_empty() && self.families.is_empty()
  }
}
