//! Keyed mutex table
//!
//! Serialises mutating operations that touch the same cloud object (a VPC, a
//! route table, ...) from concurrently running resource handlers. One lock per
//! key is created on first use and reused afterwards.

use std::collections::HashMap;
use std::sync::{Arc, LazyLock, Mutex, PoisonError};
use tokio::sync::OwnedMutexGuard;

#[derive(Debug, Default)]
pub struct MutexKv {
    locks: Mutex<HashMap<String, Arc<tokio::sync::Mutex<()>>>>,
}

impl MutexKv {
    pub fn new() -> Self {
        Self::default()
    }

    /// Wait for and take the lock for `key`
    ///
    /// The lock is released when the returned guard is dropped.
    pub async fn lock(&self, key: &str) -> OwnedMutexGuard<()> {
        let mutex = self.entry(key);
        tracing::debug!("Locking {:?}", key);
        let guard = mutex.lock_owned().await;
        tracing::debug!("Locked {:?}", key);
        guard
    }

    fn entry(&self, key: &str) -> Arc<tokio::sync::Mutex<()>> {
        // The map is only ever inserted into; a poisoned guard still holds a valid map.
        let mut locks = self.locks.lock().unwrap_or_else(PoisonError::into_inner);
        locks.entry(key.to_string()).or_default().clone()
    }

    /// Number of keys seen so far
    pub fn len(&self) -> usize {
        self.locks
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

static GLOBAL: LazyLock<MutexKv> = LazyLock::new(MutexKv::new);

/// Process-wide mutex table shared by all resource handlers
pub fn global() -> &'static MutexKv {
    &GLOBAL
}
