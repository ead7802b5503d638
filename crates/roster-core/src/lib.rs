//! Core types and trait definitions for the Roster personnel register.
//!
//! This crate is deliberately free of HTTP and database dependencies. The
//! SQLite store, the JSON API and the remote client all depend on it.

// We intentionally use native `async fn` in traits (stabilised in Rust 1.75).
// Suppress the advisory lint about `Send` bounds on the returned futures.
#![allow(async_fn_in_trait)]

pub mod department;
pub mod error;
pub mod person;
pub mod registry;
pub mod service;
pub mod store;

pub use error::{ErrorKind, RegistryError, Result, ValidationError};
pub use registry::PersonRegistry;
