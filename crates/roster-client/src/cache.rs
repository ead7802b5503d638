//! [`DepartmentCache`] — a load-once snapshot of the department list.
//!
//! The first successful load is kept for the lifetime of the cache and is
//! never refreshed. Loading is single-flight: callers racing on an empty
//! cache wait for one load instead of each issuing their own. A failed load
//! stores nothing, so the next caller tries again.

use std::{future::Future, sync::Arc};

use roster_core::department::Department;
use tokio::sync::OnceCell;

/// Shared department snapshot. Clones share the same slot.
#[derive(Debug, Clone, Default)]
pub struct DepartmentCache {
  slot: Arc<OnceCell<Arc<Vec<Department>>>>,
}

impl DepartmentCache {
  pub fn new() -> Self { Self::default() }

  /// The snapshot, if one has been loaded.
  pub fn get(&self) -> Option<Arc<Vec<Department>>> { self.slot.get().cloned() }

  pub fn is_populated(&self) -> bool { self.slot.initialized() }

  /// Return the snapshot, running `load` first if the cache is empty.
  pub async fn get_or_try_load<F, Fut, E>(&self, load: F) -> Result<Arc<Vec<Department>>, E>
  where
    F: FnOnce() -> Fut,
    Fut: Future<Output = Result<Vec<Department>, E>>,
  {
    self
      .slot
      .get_or_try_init(|| async move { load().await.map(Arc::new) })
      .await
      .cloned()
  }
}
