//! Error type for `mermelada-mailer`.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid mailbox address: {0}")]
  Address(#[from] lettre::address::AddressError),

  #[error("could not build message: {0}")]
  Message(#[from] lettre::error::Error),

  #[error("smtp transport error: {0}")]
  Transport(#[from] lettre::transport::smtp::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
