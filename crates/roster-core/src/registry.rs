//! [`PersonRegistry`] — validation and orchestration of person CRUD against a
//! [`PersonStore`].
//!
//! Every expected outcome is a typed [`RegistryError`]; nothing is collapsed.
//! The registry does no locking or versioning of its own: concurrent writes
//! to the same id are arbitrated by the store, whose conflicts surface as
//! [`RegistryError::Update`].

use tracing::{error, info, warn};

use crate::{
  error::{RegistryError, Result, ValidationError},
  person::Person,
  service::PersonService,
  store::{BackendError, PersonStore},
};

/// Check the required fields of `person` in a fixed order, stopping at the
/// first violation.
///
/// Department existence is not checked, only that the id is positive.
pub fn validate(person: &Person) -> Result<(), ValidationError> {
  if person.first_name.trim().is_empty() {
    return Err(ValidationError::FirstNameRequired);
  }
  if person.last_name.trim().is_empty() {
    return Err(ValidationError::LastNameRequired);
  }
  if person.email.trim().is_empty() {
    return Err(ValidationError::EmailRequired);
  }
  if person.date_of_birth.is_none() {
    return Err(ValidationError::DateOfBirthRequired);
  }
  if person.department_id <= 0 {
    return Err(ValidationError::DepartmentIdRequired);
  }
  Ok(())
}

/// The direct backend: a registry co-located with its store.
#[derive(Debug, Clone)]
pub struct PersonRegistry<S> {
  store: S,
}

impl<S: PersonStore> PersonRegistry<S> {
  pub fn new(store: S) -> Self { Self { store } }

  fn check(&self, person: &Person) -> Result<()> {
    validate(person).map_err(|e| {
      warn!(person_id = person.id, reason = %e, "person failed validation");
      RegistryError::from(e)
    })
  }

  /// Fail with `NotFound` unless a person with `id` is stored.
  async fn require_person(&self, id: i64) -> Result<Person> {
    match self.store.get_person(id).await {
      Ok(Some(person)) => Ok(person),
      Ok(None) => {
        warn!(person_id = id, "person not found");
        Err(RegistryError::person_not_found(id))
      }
      Err(e) => Err(RegistryError::unexpected(e)),
    }
  }
}

impl<S: PersonStore> PersonService for PersonRegistry<S> {
  type Error = RegistryError;

  async fn list_people(&self) -> Result<Vec<Person>> {
    info!("listing people");
    let people = self
      .store
      .list_people()
      .await
      .map_err(RegistryError::unexpected)?;
    info!(count = people.len(), "listed people");
    Ok(people)
  }

  /// Never returns `Ok(None)`: a missing person is `NotFound`.
  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    info!(person_id = id, "fetching person");
    self.require_person(id).await.map(Some)
  }

  async fn add_person(&self, person: Person) -> Result<Option<Person>> {
    info!(email = %person.email, "adding person");
    self.check(&person)?;

    match self.store.add_person(person).await {
      Ok(added) => {
        info!(person_id = added.id, "person added");
        Ok(Some(added))
      }
      Err(e) => {
        error!(error = %e, "store rejected new person");
        Err(RegistryError::update("failed to add person due to a storage error", e))
      }
    }
  }

  async fn update_person(&self, person: Person) -> Result<Option<Person>> {
    let id = person.id;
    info!(person_id = id, "updating person");
    self.check(&person)?;
    self.require_person(id).await?;

    match self.store.update_person(person).await {
      Ok(Some(updated)) => {
        info!(person_id = id, "person updated");
        Ok(Some(updated))
      }
      // Removed between the existence check and the write.
      Ok(None) => {
        warn!(person_id = id, "person vanished before update");
        Err(RegistryError::person_not_found(id))
      }
      Err(e) if e.is_conflict() => {
        error!(person_id = id, error = %e, "concurrency conflict while updating person");
        Err(RegistryError::update(
          format!("failed to update person {id} due to a concurrency conflict"),
          e,
        ))
      }
      Err(e) => Err(RegistryError::unexpected(e)),
    }
  }

  async fn delete_person(&self, id: i64) -> Result<bool> {
    info!(person_id = id, "deleting person");
    self.require_person(id).await?;

    match self.store.delete_person(id).await {
      Ok(deleted) => {
        if deleted {
          info!(person_id = id, "person deleted");
        }
        Ok(deleted)
      }
      Err(e) if e.is_conflict() => {
        error!(person_id = id, error = %e, "concurrency conflict while deleting person");
        Err(RegistryError::update(
          format!("failed to delete person {id} due to a concurrency conflict"),
          e,
        ))
      }
      Err(e) => Err(RegistryError::unexpected(e)),
    }
  }
}
