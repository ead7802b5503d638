//! Error type for `roster-store-sqlite`.

use roster_core::{RegistryError, store::BackendError};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("date parse error: {0}")]
  DateParse(String),
}

impl BackendError for Error {
  /// Another connection holding the write lock is the only conflict SQLite
  /// can report.
  fn is_conflict(&self) -> bool {
    let Error::Database(tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(e, _))) =
      self
    else {
      return false;
    };
    matches!(
      e.code,
      rusqlite::ErrorCode::DatabaseBusy | rusqlite::ErrorCode::DatabaseLocked
    )
  }
}

impl From<Error> for RegistryError {
  fn from(e: Error) -> Self {
    if e.is_conflict() {
      RegistryError::update("database is locked by another writer", e)
    } else {
      RegistryError::unexpected(e)
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
