//! Error types for `kin-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("person not found: {0}")]
  PersonNotFound(Uuid),

  #[error("cannot relate a person to themselves: {0}")]
  SelfRelationship(Uuid),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
