//! [`MemoryStore`] — an in-memory implementation of
//! [`kin_core::store::PersonStore`].
//!
//! Backs the test suites and the CLI's dry-run import mode. Nothing
//! persists; real deployments supply their own backend.

use std::sync::{Arc, Mutex, MutexGuard};

use chrono::Utc;
use kin_core::{
  Error, Result,
  person::{NewPerson, Person, PersonUpdate},
  relationship::{NewRelationship, Relationship},
  store::PersonStore,
};
use uuid::Uuid;

#[cfg(test)]
mod tests;

// ─── Store ───────────────────────────────────────────────────────────────────

/// A person store held entirely in memory.
///
/// Cloning is cheap — the inner state is reference-counted. People keep
/// insertion order, so snapshots read back deterministically.
#[derive(Clone, Default)]
pub struct MemoryStore {
  inner: Arc<Mutex<Inner>>,
}

#[derive(Default)]
struct Inner {
  people:        Vec<Person>,
  relationships: Vec<Relationship>,
}

impl MemoryStore {
  pub fn new() -> Self { Self::default() }

  fn lock(&self) -> MutexGuard<'_, Inner> {
    self.inner.lock().expect("store mutex poisoned")
  }

  /// Insert a fully-built person verbatim, keeping its id. Used to load
  /// snapshots in tests and dry runs.
  pub fn seed(&self, person: Person) {
    self.lock().people.push(person);
  }

  /// Every person in the store, in insertion order.
  pub fn people(&self) -> Vec<Person> {
    self.lock().people.clone()
  }

  /// Every relationship in the store, in insertion order.
  pub fn relationships(&self) -> Vec<Relationship> {
    self.lock().relationships.clone()
  }
}

// ─── PersonStore ─────────────────────────────────────────────────────────────

impl PersonStore for MemoryStore {
  type Error = Error;

  async fn create_person(&self, input: NewPerson) -> Result<Person> {
    let person = Person {
      person_id:   Uuid::new_v4(),
      owner_id:    input.owner_id,
      name:        input.name,
      gender:      input.gender,
      birth_date:  input.birth_date,
      birth_place: input.birth_place,
      death_date:  input.death_date,
      death_place: input.death_place,
      father_id:   None,
      mother_id:   None,
      gedcom_xref: input.gedcom_xref,
      created_at:  Utc::now(),
    };
    self.lock().people.push(person.clone());
    Ok(person)
  }

  async fn get_person(&self, id: Uuid) -> Result<Option<Person>> {
    Ok(
      self
        .lock()
        .people
        .iter()
        .find(|p| p.person_id == id)
        .cloned(),
    )
  }

  async fn update_person(
    &self,
    id: Uuid,
    update: PersonUpdate,
  ) -> Result<Person> {
    let mut inner = self.lock();
    let person = inner
      .people
      .iter_mut()
      .find(|p| p.person_id == id)
      .ok_or(Error::PersonNotFound(id))?;
    update.apply(person);
    Ok(person.clone())
  }

  async fn list_people(&self, owner_id: Uuid) -> Result<Vec<Person>> {
    Ok(
      self
        .lock()
        .people
        .iter()
        .filter(|p| p.owner_id == owner_id)
        .cloned()
        .collect(),
    )
  }

  async fn ensure_relationship(
    &self,
    input: NewRelationship,
  ) -> Result<(Relationship, bool)> {
    if input.person_a == input.person_b {
      return Err(Error::SelfRelationship(input.person_a));
    }

    // Normalise the pair so lookups are order-independent even for
    // callers that skipped NewRelationship::spouse.
    let (a, b) = if input.person_a <= input.person_b {
      (input.person_a, input.person_b)
    } else {
      (input.person_b, input.person_a)
    };

    let mut inner = self.lock();
    if let Some(existing) = inner
      .relationships
      .iter()
      .find(|r| r.person_a == a && r.person_b == b && r.kind == input.kind)
    {
      return Ok((existing.clone(), false));
    }

    let relationship = Relationship {
      relationship_id: Uuid::new_v4(),
      person_a:        a,
      person_b:        b,
      kind:            input.kind,
      start_date:      input.start_date,
      end_date:        input.end_date,
      start_place:     input.start_place,
      recorded_at:     Utc::now(),
    };
    inner.relationships.push(relationship.clone());
    Ok((relationship, true))
  }
}
