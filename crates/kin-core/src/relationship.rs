//! Relationships between two people in the same tree.
//!
//! A relationship row is keyed on the *unordered* pair of people plus a
//! kind. The pair is stored in canonical order (`person_a < person_b`) so
//! that one row exists per couple regardless of which direction it was
//! recorded from.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The kind of a relationship row.
///
/// The GEDCOM importer only ever creates `Spouse` links; parent/child
/// links are columns on [`crate::person::Person`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RelationshipKind {
  Spouse,
}

/// A relationship between two people, in canonical pair order.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Relationship {
  pub relationship_id: Uuid,
  pub person_a:        Uuid,
  pub person_b:        Uuid,
  pub kind:            RelationshipKind,
  pub start_date:      Option<NaiveDate>,
  pub end_date:        Option<NaiveDate>,
  pub start_place:     Option<String>,
  pub recorded_at:     DateTime<Utc>,
}

/// Input to [`crate::store::PersonStore::ensure_relationship`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewRelationship {
  pub person_a:    Uuid,
  pub person_b:    Uuid,
  pub kind:        RelationshipKind,
  pub start_date:  Option<NaiveDate>,
  pub end_date:    Option<NaiveDate>,
  pub start_place: Option<String>,
}

impl NewRelationship {
  /// Build a spouse link with the pair in canonical order.
  pub fn spouse(
    a: Uuid,
    b: Uuid,
    start_date: Option<NaiveDate>,
    start_place: Option<String>,
  ) -> Self {
    let (person_a, person_b) = if a <= b { (a, b) } else { (b, a) };
    Self {
      person_a,
      person_b,
      kind: RelationshipKind::Spouse,
      start_date,
      end_date: None,
      start_place,
    }
  }
}
