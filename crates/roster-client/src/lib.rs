//! HTTP client for the Roster JSON API.
//!
//! [`RemoteRegistryClient`] implements the same
//! [`PersonService`](roster_core::service::PersonService) and
//! [`DepartmentCatalog`](roster_core::service::DepartmentCatalog) contracts as
//! the direct registry, but every failure is logged and collapsed into an
//! empty or absent result.

pub mod cache;
pub mod client;

pub use cache::DepartmentCache;
pub use client::{ClientConfig, RemoteRegistryClient};

#[cfg(test)]
mod tests;
