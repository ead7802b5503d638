//! [`SqliteStore`] — the SQLite implementation of [`PersonStore`] and
//! [`DepartmentCatalog`].

use std::path::Path;

use rusqlite::OptionalExtension as _;

use roster_core::{
  department::Department,
  person::Person,
  service::DepartmentCatalog,
  store::PersonStore,
};

use crate::{
  Result,
  encode::{PERSON_COLUMNS, RawPerson, department_from_row, encode_date},
  schema::SCHEMA,
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Roster store backed by a single SQLite file.
///
/// Cloning is cheap — the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store — useful for testing.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  pub(crate) fn conn(&self) -> &tokio_rusqlite::Connection { &self.conn }
}

/// Read one person with its department resolved, on the connection thread.
fn select_person(
  conn: &rusqlite::Connection,
  id: i64,
) -> rusqlite::Result<Option<RawPerson>> {
  conn
    .query_row(
      &format!(
        "SELECT {PERSON_COLUMNS}
         FROM people p
         LEFT JOIN departments d ON d.id = p.department_id
         WHERE p.id = ?1"
      ),
      rusqlite::params![id],
      RawPerson::from_row,
    )
    .optional()
}

// ─── PersonStore impl ────────────────────────────────────────────────────────

impl PersonStore for SqliteStore {
  type Error = crate::Error;

  async fn list_people(&self) -> Result<Vec<Person>> {
    let raws: Vec<RawPerson> = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(&format!(
          "SELECT {PERSON_COLUMNS}
           FROM people p
           LEFT JOIN departments d ON d.id = p.department_id
           ORDER BY p.last_name COLLATE NOCASE ASC, p.id ASC"
        ))?;
        let rows = stmt
          .query_map([], RawPerson::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawPerson::into_person).collect()
  }

  async fn get_person(&self, id: i64) -> Result<Option<Person>> {
    let raw = self
      .conn
      .call(move |conn| Ok(select_person(conn, id)?))
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn add_person(&self, person: Person) -> Result<Person> {
    let dob_str = person.date_of_birth.map(encode_date);

    let raw = self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO people (first_name, last_name, date_of_birth, department_id, email)
           VALUES (?1, ?2, ?3, ?4, ?5)",
          rusqlite::params![
            person.first_name,
            person.last_name,
            dob_str,
            person.department_id,
            person.email,
          ],
        )?;
        let id = conn.last_insert_rowid();
        Ok(select_person(conn, id)?.ok_or(rusqlite::Error::QueryReturnedNoRows)?)
      })
      .await?;

    raw.into_person()
  }

  async fn update_person(&self, person: Person) -> Result<Option<Person>> {
    let dob_str = person.date_of_birth.map(encode_date);

    let raw = self
      .conn
      .call(move |conn| {
        let tx = conn.transaction()?;
        let changed = tx.execute(
          "UPDATE people
           SET first_name = ?1, last_name = ?2, date_of_birth = ?3,
               department_id = ?4, email = ?5
           WHERE id = ?6",
          rusqlite::params![
            person.first_name,
            person.last_name,
            dob_str,
            person.department_id,
            person.email,
            person.id,
          ],
        )?;
        if changed == 0 {
          return Ok(None);
        }
        let raw = select_person(&tx, person.id)?;
        tx.commit()?;
        Ok(raw)
      })
      .await?;

    raw.map(RawPerson::into_person).transpose()
  }

  async fn delete_person(&self, id: i64) -> Result<bool> {
    let removed = self
      .conn
      .call(move |conn| {
        Ok(conn.execute("DELETE FROM people WHERE id = ?1", rusqlite::params![id])?)
      })
      .await?;
    Ok(removed > 0)
  }
}

// ─── DepartmentCatalog impl ──────────────────────────────────────────────────

impl DepartmentCatalog for SqliteStore {
  type Error = crate::Error;

  async fn list_departments(&self) -> Result<Vec<Department>> {
    let departments = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT id, name FROM departments ORDER BY id ASC")?;
        let rows = stmt
          .query_map([], department_from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(departments)
  }

  async fn get_department(&self, id: i64) -> Result<Option<Department>> {
    let department = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              "SELECT id, name FROM departments WHERE id = ?1",
              rusqlite::params![id],
              department_from_row,
            )
            .optional()?,
        )
      })
      .await?;
    Ok(department)
  }
}
