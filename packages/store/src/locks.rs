//! Per-collection exclusive locks.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

/// Hands out one exclusive lock per collection name.
///
/// Locks are created lazily and never removed; the registry grows with the
/// number of distinct collections ever touched. Owned by a store instance,
/// so independent stores never share locks.
pub(crate) struct LockRegistry {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl LockRegistry {
    pub(crate) fn new() -> Self {
        Self {
            locks: Mutex::new(HashMap::new()),
        }
    }

    /// The lock guarding `collection`, created on first access.
    ///
    /// The registry's own lock is held only for this lookup-or-insert,
    /// never across the caller's critical section, so contention on one
    /// collection cannot stall lookups for another.
    pub(crate) fn collection(&self, collection: &str) -> Arc<Mutex<()>> {
        let mut locks = self
            .locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        Arc::clone(
            locks
                .entry(collection.to_string())
                .or_insert_with(|| Arc::new(Mutex::new(()))),
        )
    }
}
