//! Match scoring between an imported individual and an existing person.
//!
//! The score is additive. Exactly one name branch fires, in precedence
//! order, then the date evidence is added independently:
//!
//! - exact full-name match: +60
//! - one name contains the other: +40
//! - surname equals the last token of the person's name: +25
//! - Levenshtein distance under 30% of the longer name: +20
//! - equal birth dates: +30; same birth year: +15
//! - equal death dates: +10
//!
//! Zero means "not a candidate"; such pairs are excluded from
//! suggestions entirely rather than ranked last.

use chrono::Datelike as _;
use kin_core::person::Person;
use kin_gedcom::Individual;

/// Score `individual` against `person`. Name comparison is
/// case-insensitive and whitespace-trimmed.
pub fn match_score(individual: &Individual, person: &Person) -> u32 {
  let mut score = 0;

  let imported = individual.name.trim().to_lowercase();
  let known = person.name.trim().to_lowercase();

  // An empty string is a substring of everything, so a nameless record
  // stays out of every name branch.
  if !imported.is_empty() && !known.is_empty() {
    if imported == known {
      score += 60;
    } else if imported.contains(&known) || known.contains(&imported) {
      score += 40;
    } else if surname_matches(&individual.surname, &known) {
      score += 25;
    } else {
      let distance = strsim::levenshtein(&imported, &known);
      let longer = imported.chars().count().max(known.chars().count());
      if (distance as f64) / (longer as f64) < 0.30 {
        score += 20;
      }
    }
  }

  if let (Some(parsed), Some(recorded)) =
    (individual.birth_date, person.birth_date)
  {
    if parsed == recorded {
      score += 30;
    } else if parsed.year() == recorded.year() {
      score += 15;
    }
  }

  if let (Some(parsed), Some(recorded)) =
    (individual.death_date, person.death_date)
    && parsed == recorded
  {
    score += 10;
  }

  score
}

/// The surname heuristic: the parsed surname against the last
/// whitespace-separated token of the (already lowercased) person name.
fn surname_matches(surname: &str, known: &str) -> bool {
  let surname = surname.trim().to_lowercase();
  !surname.is_empty()
    && known
      .split_whitespace()
      .next_back()
      .is_some_and(|last| last == surname)
}

// ─── Tests ───────────────────────────────────────────────────────────────────
