//! Encoding and decoding helpers between Rust domain types and the plain-text
//! representations stored in SQLite columns.
//!
//! Dates of birth are stored as `YYYY-MM-DD` strings.

use chrono::NaiveDate;
use roster_core::{department::Department, person::Person};

use crate::{Error, Result};

const DATE_FORMAT: &str = "%Y-%m-%d";

// ─── NaiveDate ───────────────────────────────────────────────────────────────

pub fn encode_date(d: NaiveDate) -> String { d.format(DATE_FORMAT).to_string() }

pub fn decode_date(s: &str) -> Result<NaiveDate> {
  NaiveDate::parse_from_str(s, DATE_FORMAT)
    .map_err(|e| Error::DateParse(format!("{s:?}: {e}")))
}

// ─── Row types ───────────────────────────────────────────────────────────────

/// Column list matching [`RawPerson::from_row`]; `p` is `people`, `d` is the
/// left-joined `departments`.
pub const PERSON_COLUMNS: &str = "p.id, p.first_name, p.last_name, p.date_of_birth, \
                                  p.department_id, p.email, d.name";

/// Raw values read directly from a `people` row joined with its department.
pub struct RawPerson {
  pub id:              i64,
  pub first_name:      String,
  pub last_name:       String,
  pub date_of_birth:   String,
  pub department_id:   i64,
  pub email:           String,
  // departments join
  pub department_name: Option<String>,
}

impl RawPerson {
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      id:              row.get(0)?,
      first_name:      row.get(1)?,
      last_name:       row.get(2)?,
      date_of_birth:   row.get(3)?,
      department_id:   row.get(4)?,
      email:           row.get(5)?,
      department_name: row.get(6)?,
    })
  }

  pub fn into_person(self) -> Result<Person> {
    let date_of_birth = decode_date(&self.date_of_birth)?;
    let department = self
      .department_name
      .map(|name| Department { id: self.department_id, name });

    Ok(Person {
      id: self.id,
      first_name: self.first_name,
      last_name: self.last_name,
      date_of_birth: Some(date_of_birth),
      department_id: self.department_id,
      email: self.email,
      department,
    })
  }
}

pub fn department_from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Department> {
  Ok(Department { id: row.get(0)?, name: row.get(1)? })
}
