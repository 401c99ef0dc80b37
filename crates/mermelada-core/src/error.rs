//! Error types for `mermelada-core`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("contact name must not be empty")]
  EmptyName,

  #[error("contact not found: {0}")]
  ContactNotFound(i64),

  #[error("follow-up not found: {0}")]
  FollowUpNotFound(i64),

  #[error("unknown interest level: {0:?}")]
  UnknownInterestLevel(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
