//! JSON REST API for Roster.
//!
//! Exposes an axum [`Router`] backed by any [`PersonService`] and
//! [`DepartmentCatalog`]. Registry errors map onto status codes: not found →
//! 404, validation → 400, storage failures → 500.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", roster_api::api_router(registry, store))
//! ```

pub mod departments;
pub mod error;
pub mod people;

use std::{path::PathBuf, sync::Arc};

use axum::{Router, routing::get};
use roster_core::service::{DepartmentCatalog, PersonService};
use serde::Deserialize;

pub use error::{ApiError, ApiJson};

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `ROSTER_*` environment variables.
#[derive(Debug, Deserialize, Clone)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  /// SQLite file, or `:memory:` for a throwaway store.
  pub store_path: PathBuf,
  /// Seed default departments and people into empty tables on start-up.
  pub seed:       bool,
}

// ─── Application state ────────────────────────────────────────────────────────

/// Shared state threaded through all handlers.
pub struct ApiState<P, D> {
  pub people:      Arc<P>,
  pub departments: Arc<D>,
}

impl<P, D> Clone for ApiState<P, D> {
  fn clone(&self) -> Self {
    Self { people: self.people.clone(), departments: self.departments.clone() }
  }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the API router over a person backend and a department catalog.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<P, D>(people: Arc<P>, departments: Arc<D>) -> Router<()>
where
  P: PersonService + 'static,
  D: DepartmentCatalog + 'static,
{
  Router::new()
    .route("/person", get(people::list::<P, D>).post(people::create::<P, D>))
    .route(
      "/person/{id}",
      get(people::get_one::<P, D>)
        .put(people::update_one::<P, D>)
        .delete(people::delete_one::<P, D>),
    )
    .route("/department", get(departments::list::<P, D>))
    .route("/department/{id}", get(departments::get_one::<P, D>))
    .with_state(ApiState { people, departments })
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use roster_core::{PersonRegistry, department::Department};
  use roster_store_sqlite::SqliteStore;
  use serde_json::{Value, json};
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    store
      .seed_departments(vec![Department::new(1, "Sales"), Department::new(2, "Marketing")])
      .await
      .unwrap();
    let registry = PersonRegistry::new(store.clone());
    api_router(Arc::new(registry), Arc::new(store))
  }

  async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(v) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(v.to_string())
      }
      None => Body::empty(),
    };
    app.clone().oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn json_body(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX).await.unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  fn alice() -> Value {
    json!({
      "firstName": "Alice",
      "lastName": "Anderson",
      "dateOfBirth": "1990-01-01",
      "departmentId": 1,
      "email": "alice@example.com",
    })
  }

  // ── People ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn create_returns_201_then_get_resolves_department() {
    let app = app().await;

    let resp = send(&app, "POST", "/person", Some(alice())).await;
    assert_eq!(resp.status(), StatusCode::CREATED);
    let created = json_body(resp).await;
    assert_eq!(created["id"], 1);

    let resp = send(&app, "GET", "/person/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let fetched = json_body(resp).await;
    assert_eq!(fetched["firstName"], "Alice");
    assert_eq!(fetched["lastName"], "Anderson");
    assert_eq!(fetched["dateOfBirth"], "1990-01-01");
    assert_eq!(fetched["departmentId"], 1);
    assert_eq!(fetched["email"], "alice@example.com");
    assert_eq!(fetched["departmentName"], "Sales");
  }

  #[tokio::test]
  async fn missing_person_is_404_with_error_body() {
    let app = app().await;
    let resp = send(&app, "GET", "/person/9", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    assert_eq!(json_body(resp).await["error"], "person 9 not found");
  }

  #[tokio::test]
  async fn invalid_person_is_400_naming_the_field() {
    let app = app().await;
    let mut body = alice();
    body["firstName"] = json!("  ");

    let resp = send(&app, "POST", "/person", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "first name required");

    let resp = send(&app, "GET", "/person", None).await;
    assert_eq!(json_body(resp).await, json!([]));
  }

  #[tokio::test]
  async fn missing_date_of_birth_is_400() {
    let app = app().await;
    let mut body = alice();
    body["dateOfBirth"] = Value::Null;

    let resp = send(&app, "POST", "/person", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(resp).await["error"], "date of birth required");
  }

  #[tokio::test]
  async fn unparseable_body_is_400_with_error_body() {
    let app = app().await;
    let mut body = alice();
    body["dateOfBirth"] = json!("garbage");

    let resp = send(&app, "POST", "/person", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());

    let mut body = alice();
    body["id"] = Value::Null;
    let resp = send(&app, "PUT", "/person/1", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    assert!(json_body(resp).await["error"].is_string());
  }

  #[tokio::test]
  async fn duplicate_email_is_500() {
    let app = app().await;
    send(&app, "POST", "/person", Some(alice())).await;
    let resp = send(&app, "POST", "/person", Some(alice())).await;
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
  }

  #[tokio::test]
  async fn list_is_ordered_by_last_name() {
    let app = app().await;
    let mut bob = alice();
    bob["firstName"] = json!("Bob");
    bob["lastName"] = json!("Baker");
    bob["email"] = json!("bob@example.com");
    send(&app, "POST", "/person", Some(bob)).await;
    send(&app, "POST", "/person", Some(alice())).await;

    let people = json_body(send(&app, "GET", "/person", None).await).await;
    assert_eq!(people[0]["lastName"], "Anderson");
    assert_eq!(people[1]["lastName"], "Baker");
  }

  #[tokio::test]
  async fn update_replaces_fields() {
    let app = app().await;
    send(&app, "POST", "/person", Some(alice())).await;

    let mut body = alice();
    body["id"] = json!(1);
    body["departmentId"] = json!(2);
    let resp = send(&app, "PUT", "/person/1", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let updated = json_body(resp).await;
    assert_eq!(updated["id"], 1);
    assert_eq!(updated["departmentName"], "Marketing");
  }

  #[tokio::test]
  async fn update_with_mismatched_id_is_400() {
    let app = app().await;
    send(&app, "POST", "/person", Some(alice())).await;

    let mut body = alice();
    body["id"] = json!(2);
    let resp = send(&app, "PUT", "/person/1", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn update_missing_person_is_404_but_invalid_is_400() {
    let app = app().await;

    let mut body = alice();
    body["id"] = json!(5);
    let resp = send(&app, "PUT", "/person/5", Some(body.clone())).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    body["email"] = json!("");
    let resp = send(&app, "PUT", "/person/5", Some(body)).await;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
  }

  #[tokio::test]
  async fn delete_returns_true_then_404() {
    let app = app().await;
    send(&app, "POST", "/person", Some(alice())).await;

    let resp = send(&app, "DELETE", "/person/1", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(json_body(resp).await, json!(true));

    let resp = send(&app, "DELETE", "/person/1", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }

  // ── Departments ────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn departments_list_and_lookup() {
    let app = app().await;

    let resp = send(&app, "GET", "/department", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
      json_body(resp).await,
      json!([{ "id": 1, "name": "Sales" }, { "id": 2, "name": "Marketing" }])
    );

    let resp = send(&app, "GET", "/department/2", None).await;
    assert_eq!(json_body(resp).await, json!({ "id": 2, "name": "Marketing" }));

    let resp = send(&app, "GET", "/department/9", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
