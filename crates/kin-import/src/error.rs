//! Error types for `kin-import`.

use thiserror::Error;

use crate::session::SessionState;

#[derive(Debug, Error)]
pub enum Error {
  /// The session already left the `matching` state; decisions cannot be
  /// submitted twice.
  #[error("import session already processed (state: {0})")]
  AlreadyProcessed(SessionState),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
