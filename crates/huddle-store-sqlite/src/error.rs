//! Error type for `huddle-store-sqlite`.
//!
//! Constraint failures reported by SQLite are classified into the core
//! taxonomy on conversion, so callers never need to inspect result codes.

use huddle_core::AsCoreError;
use rusqlite::ffi;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error(transparent)]
  Core(#[from] huddle_core::Error),

  #[error("database error: {0}")]
  Database(tokio_rusqlite::Error),
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

impl From<rusqlite::Error> for Error {
  fn from(e: rusqlite::Error) -> Self {
    match classify(&e) {
      Some(core) => Error::Core(core),
      None => Error::Database(tokio_rusqlite::Error::Rusqlite(e)),
    }
  }
}

impl From<tokio_rusqlite::Error> for Error {
  fn from(e: tokio_rusqlite::Error) -> Self {
    match e {
      tokio_rusqlite::Error::Rusqlite(inner) => Error::from(inner),
      other => Error::Database(other),
    }
  }
}

impl AsCoreError for Error {
  fn as_core(&self) -> Option<&huddle_core::Error> {
    match self {
      Error::Core(e) => Some(e),
      Error::Database(_) => None,
    }
  }
}

/// Map a constraint failure onto the core taxonomy by its extended code.
fn classify(e: &rusqlite::Error) -> Option<huddle_core::Error> {
  let rusqlite::Error::SqliteFailure(failure, message) = e else {
    return None;
  };
  let detail = message.clone().unwrap_or_else(|| failure.to_string());
  match failure.extended_code {
    ffi::SQLITE_CONSTRAINT_UNIQUE | ffi::SQLITE_CONSTRAINT_PRIMARYKEY => {
      Some(huddle_core::Error::DuplicateKey(detail))
    }
    ffi::SQLITE_CONSTRAINT_FOREIGNKEY => {
      Some(huddle_core::Error::ConstraintViolation(detail))
    }
    _ => None,
  }
}
