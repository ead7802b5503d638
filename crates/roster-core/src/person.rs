//! Person — the record the registry manages — and its JSON wire shape.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::department::Department;

/// A person in the register.
///
/// `id` is assigned by the backend; `0` means the record has not been stored
/// yet. `department` is a resolved, derived reference: `department_id` stays
/// the source of truth and the two may disagree if a caller edits one.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Person {
  pub id:            i64,
  pub first_name:    String,
  pub last_name:     String,
  pub date_of_birth: Option<NaiveDate>,
  pub department_id: i64,
  pub email:         String,
  pub department:    Option<Department>,
}

impl Person {
  /// A person that has not been stored yet.
  pub fn new(
    first_name: impl Into<String>,
    last_name: impl Into<String>,
    date_of_birth: NaiveDate,
    department_id: i64,
    email: impl Into<String>,
  ) -> Self {
    Self {
      id: 0,
      first_name: first_name.into(),
      last_name: last_name.into(),
      date_of_birth: Some(date_of_birth),
      department_id,
      email: email.into(),
      department: None,
    }
  }

  pub fn is_new(&self) -> bool { self.id == 0 }

  pub fn department_name(&self) -> Option<&str> {
    self.department.as_ref().map(|d| d.name.as_str())
  }

  /// Attach `department` if it matches `department_id`.
  pub fn resolve_department<'a>(
    &mut self,
    mut departments: impl Iterator<Item = &'a Department>,
  ) {
    self.department = departments.find(|d| d.id == self.department_id).cloned();
  }

  /// The scalar fields only, for comparing a stored record with its input.
  pub fn same_fields(&self, other: &Person) -> bool {
    self.first_name == other.first_name
      && self.last_name == other.last_name
      && self.date_of_birth == other.date_of_birth
      && self.department_id == other.department_id
      && self.email == other.email
  }
}

// ─── Wire shape ──────────────────────────────────────────────────────────────

/// JSON representation of a [`Person`], shared by the API and the remote
/// client.
///
/// String fields default to empty so an incomplete body still reaches
/// validation rather than failing deserialisation.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonRecord {
  #[serde(default)]
  pub id:              i64,
  #[serde(default)]
  pub first_name:      String,
  #[serde(default)]
  pub last_name:       String,
  #[serde(default)]
  pub date_of_birth:   Option<NaiveDate>,
  #[serde(default)]
  pub department_id:   i64,
  #[serde(default)]
  pub email:           String,
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub department_name: Option<String>,
}

impl From<Person> for PersonRecord {
  fn from(p: Person) -> Self {
    let department_name = p.department.map(|d| d.name);
    Self {
      id: p.id,
      first_name: p.first_name,
      last_name: p.last_name,
      date_of_birth: p.date_of_birth,
      department_id: p.department_id,
      email: p.email,
      department_name,
    }
  }
}

impl From<PersonRecord> for Person {
  fn from(r: PersonRecord) -> Self {
    let department = r
      .department_name
      .map(|name| Department { id: r.department_id, name });
    Self {
      id: r.id,
      first_name: r.first_name,
      last_name: r.last_name,
      date_of_birth: r.date_of_birth,
      department_id: r.department_id,
      email: r.email,
      department,
    }
  }
}
