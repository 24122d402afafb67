//! Per-individual reconciliation decisions.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// The human's choice for one imported individual.
///
/// Individuals with no recorded decision default to [`Decision::Skip`]
/// at execution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Decision {
  /// Create a new person from the parsed fields.
  Create,
  /// Leave this individual out of the import entirely.
  Skip,
  /// Merge the parsed fields into an existing person.
  Match(Uuid),
}
