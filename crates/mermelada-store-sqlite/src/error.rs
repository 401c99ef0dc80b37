//! Error type for `mermelada-store-sqlite`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("core error: {0}")]
  Core(#[from] mermelada_core::Error),

  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date/time parse error: {0}")]
  DateParse(String),

  /// Attempted to attach an interest or follow-up to a missing contact.
  #[error("contact not found: {0}")]
  ContactNotFound(i64),

  #[error("follow-up not found: {0}")]
  FollowUpNotFound(i64),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
