//! The operation surface shared by every backend.
//!
//! [`PersonRegistry`](crate::registry::PersonRegistry) implements
//! [`PersonService`] against a local store; the remote client in
//! `roster-client` implements both traits over HTTP. Callers pick one at
//! composition time and are otherwise indifferent to which is wired in.
//!
//! The return shapes are the union of both implementations: a direct
//! registry reports a missing person as [`RegistryError::NotFound`], while the
//! remote client, whose error type is [`Infallible`](std::convert::Infallible),
//! collapses every failure into `None`, an empty list or `false`.
//!
//! [`RegistryError::NotFound`]: crate::error::RegistryError::NotFound

use std::future::Future;

use crate::{department::Department, error::RegistryError, person::Person};

pub trait PersonService: Send + Sync {
  type Error: std::error::Error + Into<RegistryError> + Send + Sync + 'static;

  /// All persons, ordered by last name.
  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Store a new person and return it with its assigned id.
  fn add_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Replace every scalar field of an existing person.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}

/// Read-only department lookup.
pub trait DepartmentCatalog: Send + Sync {
  type Error: std::error::Error + Into<RegistryError> + Send + Sync + 'static;

  /// All departments, ordered by id.
  fn list_departments(
    &self,
  ) -> impl Future<Output = Result<Vec<Department>, Self::Error>> + Send + '_;

  /// A missing department is `Ok(None)`, never an error.
  fn get_department(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Department>, Self::Error>> + Send + '_;
}
