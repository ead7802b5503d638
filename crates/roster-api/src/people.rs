//! Handlers for `/person` endpoints.
//!
//! | Method   | Path           | Notes |
//! |----------|----------------|-------|
//! | `GET`    | `/person`      | Ordered by last name |
//! | `POST`   | `/person`      | Body: [`PersonRecord`]; returns 201 + stored record |
//! | `GET`    | `/person/{id}`  | 404 if not found |
//! | `PUT`    | `/person/{id}`  | Body id must match the path id |
//! | `DELETE` | `/person/{id}`  | Returns `true` |

use axum::{
  Json,
  extract::{Path, State},
  http::StatusCode,
  response::IntoResponse,
};
use roster_core::{
  RegistryError,
  person::{Person, PersonRecord},
  service::{DepartmentCatalog, PersonService},
};

use crate::{
  ApiState,
  error::{ApiError, ApiJson},
};

// ─── List ─────────────────────────────────────────────────────────────────────

/// `GET /person`
pub async fn list<P, D>(
  State(state): State<ApiState<P, D>>,
) -> Result<Json<Vec<PersonRecord>>, ApiError>
where
  P: PersonService,
  D: DepartmentCatalog,
{
  let people = state
    .people
    .list_people()
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(people.into_iter().map(PersonRecord::from).collect()))
}

// ─── Get one ──────────────────────────────────────────────────────────────────

/// `GET /person/{id}`
pub async fn get_one<P, D>(
  State(state): State<ApiState<P, D>>,
  Path(id): Path<i64>,
) -> Result<Json<PersonRecord>, ApiError>
where
  P: PersonService,
  D: DepartmentCatalog,
{
  let person = state
    .people
    .get_person(id)
    .await
    .map_err(ApiError::from_service)?
    .ok_or_else(|| RegistryError::person_not_found(id))?;
  Ok(Json(person.into()))
}

// ─── Create ───────────────────────────────────────────────────────────────────

/// `POST /person`
pub async fn create<P, D>(
  State(state): State<ApiState<P, D>>,
  ApiJson(body): ApiJson<PersonRecord>,
) -> Result<impl IntoResponse, ApiError>
where
  P: PersonService,
  D: DepartmentCatalog,
{
  let person = state
    .people
    .add_person(Person::from(body))
    .await
    .map_err(ApiError::from_service)?
    .ok_or_else(|| ApiError::BadRequest("person could not be saved".into()))?;
  Ok((StatusCode::CREATED, Json(PersonRecord::from(person))))
}

// ─── Update ───────────────────────────────────────────────────────────────────

/// `PUT /person/{id}`
pub async fn update_one<P, D>(
  State(state): State<ApiState<P, D>>,
  Path(id): Path<i64>,
  ApiJson(body): ApiJson<PersonRecord>,
) -> Result<Json<PersonRecord>, ApiError>
where
  P: PersonService,
  D: DepartmentCatalog,
{
  if body.id != id {
    return Err(ApiError::BadRequest(format!(
      "id mismatch between path ({id}) and body ({})",
      body.id
    )));
  }

  let person = state
    .people
    .update_person(Person::from(body))
    .await
    .map_err(ApiError::from_service)?
    .ok_or_else(|| ApiError::BadRequest(format!("person {id} could not be saved")))?;
  Ok(Json(person.into()))
}

// ─── Delete ───────────────────────────────────────────────────────────────────

/// `DELETE /person/{id}`
pub async fn delete_one<P, D>(
  State(state): State<ApiState<P, D>>,
  Path(id): Path<i64>,
) -> Result<Json<bool>, ApiError>
where
  P: PersonService,
  D: DepartmentCatalog,
{
  let deleted = state
    .people
    .delete_person(id)
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(deleted))
}
