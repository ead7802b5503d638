//! Tests for `RemoteRegistryClient` against live axum servers on loopback.

use std::sync::{
  Arc, Mutex,
  atomic::{AtomicUsize, Ordering},
};

use axum::{Json, Router, extract::State, routing::get};
use chrono::NaiveDate;
use roster_core::{
  PersonRegistry,
  department::Department,
  person::Person,
  service::{DepartmentCatalog, PersonService},
};
use roster_store_sqlite::SqliteStore;
use tokio::net::TcpListener;

use crate::{ClientConfig, RemoteRegistryClient};

// ─── Fixtures ────────────────────────────────────────────────────────────────

async fn serve(router: Router) -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  tokio::spawn(async move { axum::serve(listener, router).await.unwrap() });
  format!("http://{addr}")
}

/// The real API over an in-memory store with Sales and Marketing seeded.
async fn live_api() -> String {
  let store = SqliteStore::open_in_memory().await.unwrap();
  store
    .seed_departments(vec![Department::new(1, "Sales"), Department::new(2, "Marketing")])
    .await
    .unwrap();
  let registry = PersonRegistry::new(store.clone());
  let api = roster_api::api_router(Arc::new(registry), Arc::new(store));
  serve(Router::new().nest("/api", api)).await
}

/// A department endpoint whose data can change and which counts its hits.
#[derive(Clone, Default)]
struct DepartmentSource {
  departments: Arc<Mutex<Vec<Department>>>,
  hits:        Arc<AtomicUsize>,
}

impl DepartmentSource {
  fn set(&self, departments: Vec<Department>) {
    *self.departments.lock().unwrap() = departments;
  }

  fn hits(&self) -> usize { self.hits.load(Ordering::SeqCst) }
}

async fn list_source(State(source): State<DepartmentSource>) -> Json<Vec<Department>> {
  source.hits.fetch_add(1, Ordering::SeqCst);
  Json(source.departments.lock().unwrap().clone())
}

async fn counting_api(source: DepartmentSource) -> String {
  let router = Router::new()
    .route("/api/department", get(list_source))
    .with_state(source);
  serve(router).await
}

/// An address nothing is listening on.
async fn dead_address() -> String {
  let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
  let addr = listener.local_addr().unwrap();
  drop(listener);
  format!("http://{addr}")
}

fn client(base_url: String) -> RemoteRegistryClient {
  RemoteRegistryClient::new(ClientConfig::new(base_url)).unwrap()
}

fn alice() -> Person {
  Person::new(
    "Alice",
    "Anderson",
    NaiveDate::from_ymd_opt(1990, 1, 1).unwrap(),
    1,
    "alice@example.com",
  )
}

// ─── Department cache ────────────────────────────────────────────────────────

#[tokio::test]
async fn department_list_is_fetched_once() {
  let source = DepartmentSource::default();
  source.set(vec![Department::new(1, "Sales"), Department::new(2, "Marketing")]);
  let c = client(counting_api(source.clone()).await);

  let first = c.departments().await;
  source.set(vec![Department::new(3, "Finance")]);
  let second = c.departments().await;
  let listed = c.list_departments().await.unwrap();

  assert_eq!(source.hits(), 1);
  assert!(Arc::ptr_eq(&first, &second));
  assert_eq!(listed, vec![Department::new(1, "Sales"), Department::new(2, "Marketing")]);
}

#[tokio::test]
async fn connect_primes_the_cache_shared_by_clones() {
  let source = DepartmentSource::default();
  source.set(vec![Department::new(1, "Sales")]);
  let url = counting_api(source.clone()).await;

  let c = RemoteRegistryClient::connect(ClientConfig::new(url)).await.unwrap();
  assert_eq!(source.hits(), 1);
  assert!(c.cache().is_populated());

  let other = c.clone();
  assert_eq!(other.list_departments().await.unwrap().len(), 1);
  assert_eq!(source.hits(), 1);
}

#[tokio::test]
async fn failed_department_fetch_is_retried_later() {
  let c = client(dead_address().await);
  assert!(c.list_departments().await.unwrap().is_empty());
  assert!(!c.cache().is_populated());
}

// ─── People over the live API ────────────────────────────────────────────────

#[tokio::test]
async fn crud_round_trip_through_the_api() {
  let c = client(live_api().await);

  let created = c.add_person(alice()).await.unwrap().unwrap();
  assert_eq!(created.id, 1);
  assert!(created.same_fields(&alice()));
  assert_eq!(created.department_name(), Some("Sales"));

  let fetched = c.get_person(1).await.unwrap().unwrap();
  assert!(fetched.same_fields(&alice()));
  assert_eq!(fetched.department_name(), Some("Sales"));

  let mut changed = fetched.clone();
  changed.department_id = 2;
  let updated = c.update_person(changed).await.unwrap().unwrap();
  assert_eq!(updated.department_name(), Some("Marketing"));

  assert!(c.delete_person(1).await.unwrap());
  assert!(c.get_person(1).await.unwrap().is_none());
}

#[tokio::test]
async fn list_people_resolves_departments() {
  let c = client(live_api().await);
  c.add_person(alice()).await.unwrap();
  let mut bob = Person::new(
    "Bob",
    "Baker",
    NaiveDate::from_ymd_opt(1985, 12, 15).unwrap(),
    2,
    "bob@example.com",
  );
  bob = c.add_person(bob).await.unwrap().unwrap();

  let people = c.list_people().await.unwrap();
  assert_eq!(people.len(), 2);
  assert_eq!(people[0].last_name, "Anderson");
  assert_eq!(people[1].id, bob.id);
  assert_eq!(people[1].department_name(), Some("Marketing"));
}

#[tokio::test]
async fn save_person_adds_then_updates() {
  let c = client(live_api().await);

  let saved = c.save_person(alice()).await.unwrap();
  assert_eq!(saved.id, 1);

  let mut edited = saved.clone();
  edited.first_name = "Alicia".into();
  let saved_again = c.save_person(edited).await.unwrap();
  assert_eq!(saved_again.id, 1);
  assert_eq!(saved_again.first_name, "Alicia");
  assert_eq!(saved_again.department_name(), Some("Sales"));
}

#[tokio::test]
async fn rejected_writes_collapse_to_none_or_false() {
  let c = client(live_api().await);

  let mut invalid = alice();
  invalid.email = String::new();
  assert!(c.add_person(invalid).await.unwrap().is_none());

  let mut missing = alice();
  missing.id = 42;
  assert!(c.update_person(missing).await.unwrap().is_none());
  assert!(!c.delete_person(42).await.unwrap());
  assert!(c.get_person(42).await.unwrap().is_none());
}

#[tokio::test]
async fn department_lookup_misses_are_none() {
  let c = client(live_api().await);
  assert_eq!(
    c.get_department(2).await.unwrap(),
    Some(Department::new(2, "Marketing"))
  );
  assert!(c.get_department(99).await.unwrap().is_none());
}

#[tokio::test]
async fn unreachable_service_collapses_every_operation() {
  let c = client(dead_address().await);

  assert!(c.list_people().await.unwrap().is_empty());
  assert!(c.get_person(1).await.unwrap().is_none());
  assert!(c.add_person(alice()).await.unwrap().is_none());
  let mut existing = alice();
  existing.id = 1;
  assert!(c.update_person(existing).await.unwrap().is_none());
  assert!(!c.delete_person(1).await.unwrap());
  assert!(c.get_department(1).await.unwrap().is_none());
}
