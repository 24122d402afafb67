//! Match suggestions — the reviewable output of the matching phase.
//!
//! Suggestion generation is a pure function of the parsed document and
//! the people snapshot; it is safely re-callable (used both right after
//! parsing and whenever a session is re-opened for review).

use chrono::NaiveDate;
use kin_core::person::{Gender, Person};
use kin_gedcom::GedcomDocument;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{decision::Decision, score::match_score};

/// Candidates are truncated to this many per individual.
pub const MAX_CANDIDATES: usize = 5;

/// One existing person proposed as a match.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchCandidate {
  pub person_id:  Uuid,
  pub name:       String,
  pub birth_date: Option<NaiveDate>,
  pub death_date: Option<NaiveDate>,
  pub score:      u32,
}

/// One imported individual with its ranked match candidates.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MatchSuggestion {
  pub xref:       String,
  pub name:       String,
  pub sex:        Gender,
  pub birth_date: Option<NaiveDate>,
  pub death_date: Option<NaiveDate>,
  /// Sorted by descending score, ties in snapshot order, at most
  /// [`MAX_CANDIDATES`]. Empty when nothing scored above zero.
  pub candidates: Vec<MatchCandidate>,
  /// The human's decision; `None` until one is recorded.
  pub decision:   Option<Decision>,
}

/// Build one suggestion per parsed individual, in parse order.
///
/// Individuals with no candidate still get an entry (with an empty
/// list), so the caller can render a complete review screen.
pub fn generate_suggestions(
  document: &GedcomDocument,
  people: &[Person],
) -> Vec<MatchSuggestion> {
  document
    .individuals
    .iter()
    .map(|individual| {
      let mut candidates: Vec<MatchCandidate> = people
        .iter()
        .filter_map(|person| {
          let score = match_score(individual, person);
          (score > 0).then(|| MatchCandidate {
            person_id:  person.person_id,
            name:       person.name.clone(),
            birth_date: person.birth_date,
            death_date: person.death_date,
            score,
          })
        })
        .collect();

      // Vec::sort_by is stable; ties keep snapshot order.
      candidates.sort_by(|a, b| b.score.cmp(&a.score));
      candidates.truncate(MAX_CANDIDATES);

      MatchSuggestion {
        xref:       individual.xref.clone(),
        name:       individual.name.clone(),
        sex:        individual.sex,
        birth_date: individual.birth_date,
        death_date: individual.death_date,
        candidates,
        decision:   None,
      }
    })
    .collect()
}

// ─── Tests ───────────────────────────────────────────────────────────────────
