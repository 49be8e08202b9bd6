//! Error type for `arcana-store` media.

use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] rusqlite::Error),

  #[error("storage lock poisoned")]
  Poisoned,

  #[error("storage unavailable: {0}")]
  Unavailable(String),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
