//! Tests for `MemoryStore` against the `PersonStore` contract.

use chrono::NaiveDate;
use kin_core::{
  Error,
  person::{Gender, NewPerson, PersonUpdate},
  relationship::NewRelationship,
  store::PersonStore,
};
use uuid::Uuid;

use crate::MemoryStore;

fn new_person(owner_id: Uuid, name: &str) -> NewPerson {
  NewPerson {
    owner_id,
    name: name.to_string(),
    gender: Gender::Unknown,
    birth_date: None,
    birth_place: None,
    death_date: None,
    death_place: None,
    gedcom_xref: None,
  }
}

// ─── People ──────────────────────────────────────────────────────────────────

#[tokio::test]
async fn create_and_get_person() {
  let store = MemoryStore::new();
  let owner = Uuid::new_v4();

  let created = store
    .create_person(new_person(owner, "Jean Dupont"))
    .await
    .unwrap();
  assert_eq!(created.owner_id, owner);
  assert!(created.father_id.is_none());

  let fetched = store.get_person(created.person_id).await.unwrap();
  assert_eq!(fetched.unwrap().name, "Jean Dupont");
}

#[tokio::test]
async fn get_person_missing_returns_none() {
  let store = MemoryStore::new();
  assert!(store.get_person(Uuid::new_v4()).await.unwrap().is_none());
}

#[tokio::test]
async fn update_person_applies_patch() {
  let store = MemoryStore::new();
  let owner = Uuid::new_v4();
  let person = store
    .create_person(new_person(owner, "Jean Dupont"))
    .await
    .unwrap();

  let updated = store
    .update_person(person.person_id, PersonUpdate {
      birth_date: NaiveDate::from_ymd_opt(1950, 3, 15),
      ..Default::default()
    })
    .await
    .unwrap();
  assert_eq!(
    updated.birth_date,
    NaiveDate::from_ymd_opt(1950, 3, 15)
  );
  assert_eq!(updated.name, "Jean Dupont");
}

#[tokio::test]
async fn update_missing_person_errors() {
  let store = MemoryStore::new();
  let result = store
    .update_person(Uuid::new_v4(), PersonUpdate::default())
    .await;
  assert!(matches!(result, Err(Error::PersonNotFound(_))));
}

#[tokio::test]
async fn list_people_filters_by_owner() {
  let store = MemoryStore::new();
  let alice = Uuid::new_v4();
  let bob = Uuid::new_v4();

  store.create_person(new_person(alice, "A1")).await.unwrap();
  store.create_person(new_person(bob, "B1")).await.unwrap();
  store.create_person(new_person(alice, "A2")).await.unwrap();

  let people = store.list_people(alice).await.unwrap();
  assert_eq!(people.len(), 2);
  // Insertion order is preserved.
  assert_eq!(people[0].name, "A1");
  assert_eq!(people[1].name, "A2");
}

// ─── Relationships ───────────────────────────────────────────────────────────

#[tokio::test]
async fn ensure_relationship_is_first_or_create() {
  let store = MemoryStore::new();
  let a = Uuid::new_v4();
  let b = Uuid::new_v4();
  let married = NaiveDate::from_ymd_opt(1975, 6, 20);

  let (first, created) = store
    .ensure_relationship(NewRelationship::spouse(a, b, married, None))
    .await
    .unwrap();
  assert!(created);
  assert_eq!(first.start_date, married);

  // The reversed pair resolves to the same row, dates untouched.
  let (second, created) = store
    .ensure_relationship(NewRelationship::spouse(
      b,
      a,
      NaiveDate::from_ymd_opt(1999, 1, 1),
      Some("elsewhere".to_string()),
    ))
    .await
    .unwrap();
  assert!(!created);
  assert_eq!(second.relationship_id, first.relationship_id);
  assert_eq!(second.start_date, married);
  assert_eq!(store.relationships().len(), 1);
}

#[tokio::test]
async fn self_relationship_rejected() {
  let store = MemoryStore::new();
  let a = Uuid::new_v4();
  let result = store
    .ensure_relationship(NewRelationship::spouse(a, a, None, None))
    .await;
  assert!(matches!(result, Err(Error::SelfRelationship(_))));
}
