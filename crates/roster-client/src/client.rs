//! Async HTTP client wrapping the Roster JSON API.
//!
//! Unlike [`PersonRegistry`](roster_core::PersonRegistry), nothing here
//! returns an error: a transport failure, a non-success status or an
//! undecodable body is logged and becomes an empty list, `None` or `false`.
//! Callers cannot tell "no data" from "service unreachable".

use std::{convert::Infallible, sync::Arc, time::Duration};

use anyhow::{Context, Result};
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use roster_core::{
  department::Department,
  person::{Person, PersonRecord},
  service::{DepartmentCatalog, PersonService},
};
use serde::de::DeserializeOwned;
use tracing::{debug, error, warn};

use crate::cache::DepartmentCache;

/// Connection settings for the Roster API.
#[derive(Debug, Clone)]
pub struct ClientConfig {
  pub base_url: String,
  pub timeout:  Duration,
}

impl ClientConfig {
  pub fn new(base_url: impl Into<String>) -> Self {
    Self { base_url: base_url.into(), timeout: Duration::from_secs(30) }
  }
}

/// Remote implementation of the registry contracts.
///
/// Cheap to clone — the inner [`reqwest::Client`] is `Arc`-based and clones
/// share one [`DepartmentCache`].
#[derive(Clone)]
pub struct RemoteRegistryClient {
  client:      Client,
  config:      ClientConfig,
  departments: DepartmentCache,
}

impl RemoteRegistryClient {
  pub fn new(config: ClientConfig) -> Result<Self> {
    let client = Client::builder()
      .timeout(config.timeout)
      .build()
      .context("failed to build HTTP client")?;
    Ok(Self { client, config, departments: DepartmentCache::new() })
  }

  /// Build a client and load the department cache before returning it.
  pub async fn connect(config: ClientConfig) -> Result<Self> {
    let client = Self::new(config)?;
    client.departments().await;
    Ok(client)
  }

  pub fn cache(&self) -> &DepartmentCache { &self.departments }

  fn url(&self, path: &str) -> String {
    format!(
      "{}/api{}",
      self.config.base_url.trim_end_matches('/'),
      path
    )
  }

  async fn get_json<T: DeserializeOwned>(&self, path: &str) -> reqwest::Result<T> {
    self
      .client
      .get(self.url(path))
      .send()
      .await?
      .error_for_status()?
      .json()
      .await
  }

  /// Send a write request; `None` if it failed or came back non-success.
  async fn send_write(&self, req: RequestBuilder, what: &str) -> Option<Response> {
    match req.send().await {
      Ok(resp) if resp.status().is_success() => Some(resp),
      Ok(resp) => {
        warn!(status = %resp.status(), "failed to {what}");
        None
      }
      Err(e) => {
        error!(error = %e, "error trying to {what}");
        None
      }
    }
  }

  /// The cached department list, fetched on first use.
  ///
  /// A failed fetch is logged and yields an empty list without populating
  /// the cache.
  pub async fn departments(&self) -> Arc<Vec<Department>> {
    let loaded = self
      .departments
      .get_or_try_load(|| self.get_json::<Vec<Department>>("/department"))
      .await;
    match loaded {
      Ok(departments) => departments,
      Err(e) => {
        error!(error = %e, "failed to retrieve departments");
        Arc::new(Vec::new())
      }
    }
  }

  /// Attach the cached department matching each person's `department_id`,
  /// keeping whatever name the service sent when the cache has no match.
  async fn resolve(&self, people: &mut [Person]) {
    let departments = self.departments().await;
    for person in people {
      attach_department(person, &departments);
    }
  }

  async fn decode_person(&self, resp: Response, what: &str) -> Option<Person> {
    match resp.json::<PersonRecord>().await {
      Ok(record) => {
        let mut person = Person::from(record);
        attach_department(&mut person, &self.departments().await);
        Some(person)
      }
      Err(e) => {
        error!(error = %e, "unreadable response trying to {what}");
        None
      }
    }
  }

  /// Add a new person or update an existing one (`id != 0`), then re-fetch
  /// it so the returned record has its department resolved.
  pub async fn save_person(&self, person: Person) -> Option<Person> {
    let saved = if person.is_new() {
      self.add_person(person).await
    } else {
      self.update_person(person).await
    };
    let Ok(saved) = saved;
    let Ok(fetched) = self.get_person(saved?.id).await;
    fetched
  }
}

fn attach_department(person: &mut Person, departments: &[Department]) {
  if let Some(d) = departments.iter().find(|d| d.id == person.department_id) {
    person.department = Some(d.clone());
  }
}

// ─── PersonService impl ──────────────────────────────────────────────────────

impl PersonService for RemoteRegistryClient {
  type Error = Infallible;

  async fn list_people(&self) -> Result<Vec<Person>, Infallible> {
    let records = match self.get_json::<Vec<PersonRecord>>("/person").await {
      Ok(records) => records,
      Err(e) => {
        error!(error = %e, "failed to retrieve people");
        return Ok(Vec::new());
      }
    };
    let mut people: Vec<Person> = records.into_iter().map(Person::from).collect();
    self.resolve(&mut people).await;
    Ok(people)
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>, Infallible> {
    let record = match self.get_json::<PersonRecord>(&format!("/person/{id}")).await {
      Ok(record) => record,
      Err(e) => {
        error!(person_id = id, error = %e, "failed to retrieve person");
        return Ok(None);
      }
    };
    let mut person = Person::from(record);
    attach_department(&mut person, &self.departments().await);
    Ok(Some(person))
  }

  async fn add_person(&self, person: Person) -> Result<Option<Person>, Infallible> {
    let req = self
      .client
      .post(self.url("/person"))
      .json(&PersonRecord::from(person));
    let Some(resp) = self.send_write(req, "add person").await else {
      return Ok(None);
    };
    Ok(self.decode_person(resp, "add person").await)
  }

  async fn update_person(&self, person: Person) -> Result<Option<Person>, Infallible> {
    let id = person.id;
    let req = self
      .client
      .put(self.url(&format!("/person/{id}")))
      .json(&PersonRecord::from(person));
    let Some(resp) = self.send_write(req, &format!("update person {id}")).await else {
      return Ok(None);
    };
    Ok(self.decode_person(resp, &format!("update person {id}")).await)
  }

  /// `true` on any success status; the response body is not inspected.
  async fn delete_person(&self, id: i64) -> Result<bool, Infallible> {
    let req = self.client.delete(self.url(&format!("/person/{id}")));
    Ok(self.send_write(req, &format!("delete person {id}")).await.is_some())
  }
}

// ─── DepartmentCatalog impl ──────────────────────────────────────────────────

impl DepartmentCatalog for RemoteRegistryClient {
  type Error = Infallible;

  /// Served from the cache after the first successful fetch.
  async fn list_departments(&self) -> Result<Vec<Department>, Infallible> {
    Ok(self.departments().await.as_ref().clone())
  }

  async fn get_department(&self, id: i64) -> Result<Option<Department>, Infallible> {
    match self.get_json::<Department>(&format!("/department/{id}")).await {
      Ok(department) => Ok(Some(department)),
      Err(e) if e.status() == Some(StatusCode::NOT_FOUND) => {
        debug!(department_id = id, "department not found");
        Ok(None)
      }
      Err(e) => {
        error!(department_id = id, error = %e, "failed to retrieve department");
        Ok(None)
      }
    }
  }
}
