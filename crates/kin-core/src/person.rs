//! Person — the unit of a user's family tree.
//!
//! A person row carries its own fields plus two parent pointers. Spousal
//! links live in a separate table (see [`crate::relationship`]); parent
//! links are plain columns because each person has at most one father and
//! one mother slot.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A person's recorded gender.
#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum Gender {
  Male,
  Female,
  #[default]
  Unknown,
}

impl Gender {
  pub fn is_known(self) -> bool { !matches!(self, Self::Unknown) }
}

/// A person in a user's tree.
///
/// The import engine reads these as an immutable snapshot and expresses
/// changes through [`PersonUpdate`]; it never mutates a `Person` in place.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Person {
  pub person_id:   Uuid,
  /// The user whose tree this person belongs to.
  pub owner_id:    Uuid,
  pub name:        String,
  pub gender:      Gender,
  pub birth_date:  Option<NaiveDate>,
  pub birth_place: Option<String>,
  pub death_date:  Option<NaiveDate>,
  pub death_place: Option<String>,
  pub father_id:   Option<Uuid>,
  pub mother_id:   Option<Uuid>,
  /// The xref this person was imported from or matched to, if any.
  /// Not stable across files; kept for traceability only.
  pub gedcom_xref: Option<String>,
  pub created_at:  DateTime<Utc>,
}

/// Input to [`crate::store::PersonStore::create_person`].
/// `person_id` and `created_at` are assigned by the store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NewPerson {
  pub owner_id:    Uuid,
  pub name:        String,
  pub gender:      Gender,
  pub birth_date:  Option<NaiveDate>,
  pub birth_place: Option<String>,
  pub death_date:  Option<NaiveDate>,
  pub death_place: Option<String>,
  pub gedcom_xref: Option<String>,
}

/// A partial update: only `Some` fields are written.
///
/// Callers that want fill-if-empty semantics must read the current row and
/// set only the fields that are currently absent; the store applies the
/// patch verbatim.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PersonUpdate {
  pub name:        Option<String>,
  pub gender:      Option<Gender>,
  pub birth_date:  Option<NaiveDate>,
  pub birth_place: Option<String>,
  pub death_date:  Option<NaiveDate>,
  pub death_place: Option<String>,
  pub father_id:   Option<Uuid>,
  pub mother_id:   Option<Uuid>,
  pub gedcom_xref: Option<String>,
}

impl PersonUpdate {
  /// True when the patch would write nothing.
  pub fn is_empty(&self) -> bool {
    self.name.is_none()
      && self.gender.is_none()
      && self.birth_date.is_none()
      && self.birth_place.is_none()
      && self.death_date.is_none()
      && self.death_place.is_none()
      && self.father_id.is_none()
      && self.mother_id.is_none()
      && self.gedcom_xref.is_none()
  }

  /// Apply the patch to `person`, overwriting each field present in the
  /// patch.
  pub fn apply(&self, person: &mut Person) {
    if let Some(name) = &self.name {
      person.name = name.clone();
    }
    if let Some(gender) = self.gender {
      person.gender = gender;
    }
    if let Some(d) = self.birth_date {
      person.birth_date = Some(d);
    }
    if let Some(p) = &self.birth_place {
      person.birth_place = Some(p.clone());
    }
    if let Some(d) = self.death_date {
      person.death_date = Some(d);
    }
    if let Some(p) = &self.death_place {
      person.death_place = Some(p.clone());
    }
    if let Some(id) = self.father_id {
      person.father_id = Some(id);
    }
    if let Some(id) = self.mother_id {
      person.mother_id = Some(id);
    }
    if let Some(x) = &self.gedcom_xref {
      person.gedcom_xref = Some(x.clone());
    }
  }
}
