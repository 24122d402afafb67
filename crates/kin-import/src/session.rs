//! Import sessions — one parse result plus its reconciliation lifecycle.
//!
//! A session is created directly in `matching` (parsing and suggestion
//! generation both happen before the caller sees it). Submitting
//! decisions moves it through `importing` to `completed`, or to `failed`
//! with the error captured. Terminal sessions reject resubmission.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use kin_core::{person::Person, store::PersonStore};
use kin_gedcom::{GedcomDocument, ParseReport, ParseWarning};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
  decision::Decision,
  error::{Error, Result},
  merge::{ImportStats, execute_import},
  suggest::{MatchSuggestion, generate_suggestions},
};

// ─── State ───────────────────────────────────────────────────────────────────

#[derive(
  Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize,
)]
#[serde(rename_all = "lowercase")]
pub enum SessionState {
  /// Awaiting per-individual decisions.
  Matching,
  /// Decisions submitted; the merge is running.
  Importing,
  Completed,
  Failed,
}

impl SessionState {
  pub fn as_str(self) -> &'static str {
    match self {
      Self::Matching => "matching",
      Self::Importing => "importing",
      Self::Completed => "completed",
      Self::Failed => "failed",
    }
  }

  pub fn is_terminal(self) -> bool {
    matches!(self, Self::Completed | Self::Failed)
  }
}

impl std::fmt::Display for SessionState {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    f.write_str(self.as_str())
  }
}

// ─── Session ─────────────────────────────────────────────────────────────────

/// One import of one GEDCOM file into one user's tree.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ImportSession {
  pub session_id:        Uuid,
  pub owner_id:          Uuid,
  pub filename:          String,
  pub state:             SessionState,
  pub document:          GedcomDocument,
  pub warnings:          Vec<ParseWarning>,
  /// Recorded on successful execution.
  pub decisions:         Option<BTreeMap<String, Decision>>,
  pub individuals_count: usize,
  pub families_count:    usize,
  /// Created plus matched, set on completion.
  pub imported_count:    usize,
  pub error:             Option<String>,
  pub created_at:        DateTime<Utc>,
}

impl ImportSession {
  /// Open a session over a parse result, ready for matching.
  pub fn new(
    owner_id: Uuid,
    filename: impl Into<String>,
    report: ParseReport,
  ) -> Self {
    let individuals_count = report.document.individuals.len();
    let families_count = report.document.families.len();
    Self {
      session_id: Uuid::new_v4(),
      owner_id,
      filename: filename.into(),
      state: SessionState::Matching,
      document: report.document,
      warnings: report.warnings,
      decisions: None,
      individuals_count,
      families_count,
      imported_count: 0,
      error: None,
      created_at: Utc::now(),
    }
  }

  /// Score this session's individuals against a people snapshot.
  ///
  /// Only people in the session owner's tree are considered. Pure;
  /// callable any number of times while the session is reviewed.
  pub fn suggestions(&self, people: &[Person]) -> Vec<MatchSuggestion> {
    let own: Vec<Person> = people
      .iter()
      .filter(|p| p.owner_id == self.owner_id)
      .cloned()
      .collect();
    generate_suggestions(&self.document, &own)
  }

  /// Submit decisions and run the merge.
  ///
  /// Rejects any session that already left `matching`. On success the
  /// session is `completed`; on a store failure it is `failed` with the
  /// error captured, and the error is returned. Writes applied before a
  /// failure are not rolled back here (the store transaction, if any, is
  /// the caller's).
  pub async fn execute<S: PersonStore>(
    &mut self,
    store: &S,
    decisions: BTreeMap<String, Decision>,
  ) -> Result<ImportStats> {
    if self.state != SessionState::Matching {
      return Err(Error::AlreadyProcessed(self.state));
    }

    self.state = SessionState::Importing;
    tracing::info!(
      session = %self.session_id,
      individuals = self.individuals_count,
      families = self.families_count,
      "executing import"
    );

    match execute_import(store, self.owner_id, &self.document, &decisions)
      .await
    {
      Ok(stats) => {
        self.state = SessionState::Completed;
        self.imported_count = stats.created + stats.matched;
        self.decisions = Some(decisions);
        tracing::info!(
          session = %self.session_id,
          created = stats.created,
          matched = stats.matched,
          skipped = stats.skipped,
          "import completed"
        );
        Ok(stats)
      }
      Err(e) => {
        self.state = SessionState::Failed;
        self.error = Some(e.to_string());
        tracing::error!(session = %self.session_id, error = %e, "import failed");
        Err(e)
      }
    }
  }
}
