//! Handlers for `/department` endpoints. Read-only.

use axum::{
  Json,
  extract::{Path, State},
};
use roster_core::{
  RegistryError,
  department::Department,
  service::{DepartmentCatalog, PersonService},
};

use crate::{ApiState, error::ApiError};

/// `GET /department`
pub async fn list<P, D>(
  State(state): State<ApiState<P, D>>,
) -> Result<Json<Vec<Department>>, ApiError>
where
  P: PersonService,
  D: DepartmentCatalog,
{
  let departments = state
    .departments
    .list_departments()
    .await
    .map_err(ApiError::from_service)?;
  Ok(Json(departments))
}

/// `GET /department/{id}`
pub async fn get_one<P, D>(
  State(state): State<ApiState<P, D>>,
  Path(id): Path<i64>,
) -> Result<Json<Department>, ApiError>
where
  P: PersonService,
  D: DepartmentCatalog,
{
  let department = state
    .departments
    .get_department(id)
    .await
    .map_err(ApiError::from_service)?
    .ok_or_else(|| RegistryError::department_not_found(id))?;
  Ok(Json(department))
}
