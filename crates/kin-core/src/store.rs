//! The `PersonStore` trait.
//!
//! The trait is implemented by storage backends (e.g. `kin-store-memory`).
//! The import engine (`kin-import`) depends on this abstraction, not on
//! any concrete backend, and expects the caller to wrap one import's
//! writes in a single transaction where the backend supports it.

use std::future::Future;

use uuid::Uuid;

use crate::{
  person::{NewPerson, Person, PersonUpdate},
  relationship::{NewRelationship, Relationship},
};

/// Abstraction over a Kin person store backend.
///
/// All methods return `Send` futures so the trait can be used in
/// multi-threaded async runtimes.
pub trait PersonStore: Send + Sync {
  type Error: std::error::Error + Send + Sync + 'static;

  // ── People ────────────────────────────────────────────────────────────

  /// Create and persist a new person. The store assigns `person_id` and
  /// `created_at`.
  fn create_person(
    &self,
    input: NewPerson,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Retrieve a person by id. Returns `None` if not found.
  fn get_person(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Apply `update` to an existing person and return the new row.
  /// Returns an error if the person does not exist.
  fn update_person(
    &self,
    id: Uuid,
    update: PersonUpdate,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// List every person in `owner_id`'s tree. Callers use this to build
  /// the read-only snapshot that match scoring runs against.
  fn list_people(
    &self,
    owner_id: Uuid,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  // ── Relationships ─────────────────────────────────────────────────────

  /// First-or-create keyed on `(person_a, person_b, kind)`.
  ///
  /// When a row for the pair already exists it is returned untouched —
  /// its dates and place are never updated. The bool reports whether a
  /// row was created.
  fn ensure_relationship(
    &self,
    input: NewRelationship,
  ) -> impl Future<Output = Result<(Relationship, bool), Self::Error>> + Send + '_;
}
