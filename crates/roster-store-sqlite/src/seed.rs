//! Start-up seeding. Departments have no write operations elsewhere, so this
//! is the only way they get into a store.

use chrono::NaiveDate;
use roster_core::{department::Department, person::Person};
use tracing::info;

use crate::{Result, SqliteStore, encode::encode_date};

/// Departments a fresh store starts with.
pub fn default_departments() -> Vec<Department> {
  vec![
    Department::new(1, "Sales"),
    Department::new(2, "Marketing"),
    Department::new(3, "Finance"),
    Department::new(4, "HR"),
  ]
}

/// People a fresh store starts with.
pub fn default_people() -> Vec<Person> {
  let dob = |y, m, d| NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default();
  vec![
    Person::new("Alice", "Anderson", dob(1990, 1, 1), 1, "alice@example.com"),
    Person::new("Bob", "Baker", dob(1985, 12, 15), 2, "bob@example.com"),
  ]
}

impl SqliteStore {
  /// Insert `departments` (with their ids) in one transaction.
  pub async fn seed_departments(&self, departments: Vec<Department>) -> Result<usize> {
    let inserted = self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;
        for d in &departments {
          tx.execute(
            "INSERT INTO departments (id, name) VALUES (?1, ?2)",
            rusqlite::params![d.id, d.name],
          )?;
        }
        tx.commit()?;
        Ok(departments.len())
      })
      .await?;
    Ok(inserted)
  }

  /// Seed [`default_departments`] and [`default_people`] into whichever of the
  /// two tables is empty. Safe to call on every start-up.
  pub async fn seed_defaults(&self) -> Result<()> {
    let departments = default_departments();
    let people: Vec<(String, String, String, i64, String)> = default_people()
      .into_iter()
      .map(|p| {
        let dob = p.date_of_birth.map(encode_date).unwrap_or_default();
        (p.first_name, p.last_name, dob, p.department_id, p.email)
      })
      .collect();

    let (departments_added, people_added) = self
      .conn()
      .call(move |conn| {
        let tx = conn.transaction()?;

        let no_departments: bool =
          tx.query_row("SELECT NOT EXISTS (SELECT 1 FROM departments)", [], |r| r.get(0))?;
        if no_departments {
          for d in &departments {
            tx.execute(
              "INSERT INTO departments (id, name) VALUES (?1, ?2)",
              rusqlite::params![d.id, d.name],
            )?;
          }
        }

        let no_people: bool =
          tx.query_row("SELECT NOT EXISTS (SELECT 1 FROM people)", [], |r| r.get(0))?;
        if no_people {
          for (first, last, dob, department_id, email) in &people {
            tx.execute(
              "INSERT INTO people (first_name, last_name, date_of_birth, department_id, email)
               VALUES (?1, ?2, ?3, ?4, ?5)",
              rusqlite::params![first, last, dob, department_id, email],
            )?;
          }
        }

        tx.commit()?;
        Ok((
          if no_departments { departments.len() } else { 0 },
          if no_people { people.len() } else { 0 },
        ))
      })
      .await?;

    info!(departments = departments_added, people = people_added, "store seeded");
    Ok(())
  }
}
