//! Department — a read-only lookup record.

use serde::{Deserialize, Serialize};

/// A department people are assigned to. Seeded once; never mutated through
/// the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Department {
  pub id:   i64,
  pub name: String,
}

impl Department {
  pub fn new(id: i64, name: impl Into<String>) -> Self {
    Self { id, name: name.into() }
  }
}
