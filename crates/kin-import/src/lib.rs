//! GEDCOM import and reconciliation for Kin.
//!
//! The pipeline runs in three steps, each owned by one module:
//!
//! 1. [`suggest`] — score every parsed individual against the user's
//!    existing people and propose match candidates.
//! 2. A human confirms per-individual [`Decision`]s (create, skip, or
//!    match an existing person).
//! 3. [`merge`] — resolve identities, then wire parent and spouse
//!    relationships from the family records, through any
//!    [`kin_core::store::PersonStore`].
//!
//! [`session::ImportSession`] ties the steps together behind a small
//! state machine (`matching → importing → completed | failed`).
//!
//! The caller owns transactionality: the merge does not roll back
//! already-applied writes when a later store call fails, so backends
//! that can should wrap [`ImportSession::execute`] in one transaction.

pub mod decision;
pub mod error;
pub mod merge;
pub mod score;
pub mod session;
pub mod suggest;


pub use decision::Decision;
pub use error::{Error, Result};
pub use merge::{ImportStats, execute_import};
pub use score::match_score;
pub use session::{ImportSession, SessionState};
pub use suggest::{
  MAX_CANDIDATES, MatchCandidate, MatchSuggestion, generate_suggestions,
};
