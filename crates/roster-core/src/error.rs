//! Error taxonomy for the registry service layer.

use std::{convert::Infallible, error::Error as StdError};

use thiserror::Error;

type BoxError = Box<dyn StdError + Send + Sync>;

/// The coarse category of a [`RegistryError`].
///
/// The transport layer maps these onto status codes: `NotFound` → 404,
/// `Validation` → 400, everything else → 500.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
  NotFound,
  Validation,
  Update,
  Unexpected,
}

/// The first required-field check a person failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationError {
  #[error("first name required")]
  FirstNameRequired,
  #[error("last name required")]
  LastNameRequired,
  #[error("email required")]
  EmailRequired,
  #[error("date of birth required")]
  DateOfBirthRequired,
  #[error("valid department id required")]
  DepartmentIdRequired,
}

#[derive(Debug, Error)]
pub enum RegistryError {
  #[error("{entity} {id} not found")]
  NotFound { entity: &'static str, id: i64 },

  #[error(transparent)]
  Validation(#[from] ValidationError),

  /// The store rejected a write (constraint violation, concurrency conflict).
  #[error("{message}")]
  Update {
    message: String,
    #[source]
    source:  BoxError,
  },

  #[error("unexpected failure: {0}")]
  Unexpected(#[source] BoxError),
}

impl RegistryError {
  pub fn person_not_found(id: i64) -> Self {
    Self::NotFound { entity: "person", id }
  }

  pub fn department_not_found(id: i64) -> Self {
    Self::NotFound { entity: "department", id }
  }

  pub fn update(
    message: impl Into<String>,
    source: impl StdError + Send + Sync + 'static,
  ) -> Self {
    Self::Update { message: message.into(), source: Box::new(source) }
  }

  pub fn unexpected(source: impl StdError + Send + Sync + 'static) -> Self {
    Self::Unexpected(Box::new(source))
  }

  pub fn kind(&self) -> ErrorKind {
    match self {
      Self::NotFound { .. } => ErrorKind::NotFound,
      Self::Validation(_) => ErrorKind::Validation,
      Self::Update { .. } => ErrorKind::Update,
      Self::Unexpected(_) => ErrorKind::Unexpected,
    }
  }
}

/// Implementations that never fail (the remote client) use `Infallible`.
impl From<Infallible> for RegistryError {
  fn from(e: Infallible) -> Self { match e {} }
}

pub type Result<T, E = RegistryError> = std::result::Result<T, E>;
