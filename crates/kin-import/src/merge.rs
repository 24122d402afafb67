//! The two-phase merge: resolve identities, then wire families.
//!
//! Phase A walks individuals in parse order and turns each decision into
//! a create, a fill-if-empty update, or nothing, building the
//! xref → person-id map Phase B resolves pointers through. Phase B sets
//! parent columns on children (only when empty) and first-or-creates one
//! spouse row per couple.
//!
//! A store failure aborts the merge and propagates; writes already
//! applied are left in place. Callers wanting atomicity must wrap the
//! whole call in one backend transaction.

use std::collections::{BTreeMap, HashMap};

use kin_core::{
  person::{NewPerson, Person, PersonUpdate},
  relationship::NewRelationship,
  store::PersonStore,
};
use kin_gedcom::{GedcomDocument, Individual};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  decision::Decision,
  error::{Error, Result},
};

/// What one executed import did.
#[derive(
  Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize,
)]
pub struct ImportStats {
  pub created: usize,
  pub matched: usize,
  pub skipped: usize,
}

/// Execute one import against `store`.
///
/// `decisions` maps individual xrefs to choices; individuals without an
/// entry are skipped. Match decisions referencing a person missing from
/// the store or owned by someone else are ignored without failing the
/// batch.
pub async fn execute_import<S: PersonStore>(
  store: &S,
  owner_id: Uuid,
  document: &GedcomDocument,
  decisions: &BTreeMap<String, Decision>,
) -> Result<ImportStats> {
  let mut stats = ImportStats::default();
  let mut resolved: HashMap<&str, Uuid> = HashMap::new();

  // ── Phase A: resolve identities ───────────────────────────────────────

  for individual in &document.individuals {
    let decision = decisions
      .get(&individual.xref)
      .copied()
      .unwrap_or(Decision::Skip);

    match decision {
      Decision::Skip => stats.skipped += 1,

      Decision::Create => {
        let person = store
          .create_person(NewPerson {
            owner_id,
            name: individual.name.clone(),
            gender: individual.sex,
            birth_date: individual.birth_date,
            birth_place: individual.birth_place.clone(),
            death_date: individual.death_date,
            death_place: individual.death_place.clone(),
            gedcom_xref: Some(individual.xref.clone()),
          })
          .await
          .map_err(store_error)?;
        resolved.insert(&individual.xref, person.person_id);
        stats.created += 1;
      }

      Decision::Match(person_id) => {
        let person =
          store.get_person(person_id).await.map_err(store_error)?;
        let Some(person) =
          person.filter(|p| p.owner_id == owner_id)
        else {
          tracing::warn!(
            xref = %individual.xref,
            %person_id,
            "match decision references a person outside this tree; ignored"
          );
          continue;
        };

        let update = fill_if_empty(&person, individual);
        if !update.is_empty() {
          store
            .update_person(person.person_id, update)
            .await
            .map_err(store_error)?;
        }
        resolved.insert(&individual.xref, person.person_id);
        stats.matched += 1;
      }
    }
  }

  // ── Phase B: wire families ────────────────────────────────────────────

  for family in &document.families {
    let father = family
      .husband
      .as_deref()
      .and_then(|xref| resolved.get(xref))
      .copied();
    let mother = family
      .wife
      .as_deref()
      .and_then(|xref| resolved.get(xref))
      .copied();

    for child_xref in &family.children {
      let Some(&child_id) = resolved.get(child_xref.as_str()) else {
        continue;
      };
      let Some(child) =
        store.get_person(child_id).await.map_err(store_error)?
      else {
        continue;
      };

      // Fill-if-empty keeps re-imports from rewriting manual links; the
      // id comparison keeps a person from becoming their own parent.
      let mut update = PersonUpdate::default();
      if let Some(father_id) = father
        && child.father_id.is_none()
        && father_id != child_id
      {
        update.father_id = Some(father_id);
      }
      if let Some(mother_id) = mother
        && child.mother_id.is_none()
        && mother_id != child_id
      {
        update.mother_id = Some(mother_id);
      }
      if !update.is_empty() {
        store
          .update_person(child_id, update)
          .await
          .map_err(store_error)?;
      }
    }

    if let (Some(a), Some(b)) = (father, mother)
      && a != b
    {
      store
        .ensure_relationship(NewRelationship::spouse(
          a,
          b,
          family.marriage_date,
          family.marriage_place.clone(),
        ))
        .await
        .map_err(store_error)?;
    }
  }

  Ok(stats)
}

/// Build the update for a matched person: parsed values flow in only
/// where the target field is currently empty.
fn fill_if_empty(person: &Person, individual: &Individual) -> PersonUpdate {
  let mut update = PersonUpdate::default();

  if person.birth_date.is_none() {
    update.birth_date = individual.birth_date;
  }
  if person.death_date.is_none() {
    update.death_date = individual.death_date;
  }
  if person.birth_place.is_none() {
    update.birth_place = individual.birth_place.clone();
  }
  if person.death_place.is_none() {
    update.death_place = individual.death_place.clone();
  }
  if !person.gender.is_known() && individual.sex.is_known() {
    update.gender = Some(individual.sex);
  }
  if person.gedcom_xref.is_none() {
    update.gedcom_xref = Some(individual.xref.clone());
  }

  update
}

fn store_error<E>(e: E) -> Error
where
  E: std::error::Error + Send + Sync + 'static,
{
  Error::Store(Box::new(e))
}
