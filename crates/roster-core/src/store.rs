//! The `PersonStore` trait — the persistence contract the registry consumes.
//!
//! The trait is implemented by storage backends (e.g. `roster-store-sqlite`).
//! [`PersonRegistry`](crate::registry::PersonRegistry) depends on this
//! abstraction, not on any concrete backend.

use std::future::Future;

use crate::person::Person;

/// An error raised by a [`PersonStore`].
///
/// Concurrency conflicts are distinguished from every other failure because
/// the registry reports them as update errors rather than unexpected ones.
pub trait BackendError: std::error::Error + Send + Sync + 'static {
  fn is_conflict(&self) -> bool;
}

/// Abstraction over a person storage backend.
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait PersonStore: Send + Sync {
  type Error: BackendError;

  /// All persons ordered by last name, with their department resolved.
  ///
  /// This is a read-only query; nothing it returns is tracked for writing.
  fn list_people(
    &self,
  ) -> impl Future<Output = Result<Vec<Person>, Self::Error>> + Send + '_;

  /// Retrieve a person by id with its department resolved. Returns `None` if
  /// not found.
  fn get_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Persist a new person. The store assigns the id; the input id is ignored.
  fn add_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Person, Self::Error>> + Send + '_;

  /// Overwrite the scalar fields of the record matching `person.id`.
  ///
  /// The resolved department on the input is ignored. Returns `None` if no
  /// such record exists.
  fn update_person(
    &self,
    person: Person,
  ) -> impl Future<Output = Result<Option<Person>, Self::Error>> + Send + '_;

  /// Remove a person permanently. Returns whether a record was removed.
  fn delete_person(
    &self,
    id: i64,
  ) -> impl Future<Output = Result<bool, Self::Error>> + Send + '_;
}
