//! Holdings store abstraction

use crate::core::error::Result;
use crate::core::holding::Holding;
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex, OwnedMutexGuard};
use tracing::debug;

/// Held for the duration of a read-modify-write on a single symbol.
pub type KeyGuard = OwnedMutexGuard<()>;

/// Keyed store of holdings. Keys are uppercase symbols.
///
/// Implementations serialize access per key through [`HoldingStore::lock`];
/// callers that read a holding and write it back must hold the guard for the
/// whole sequence.
#[async_trait]
pub trait HoldingStore: Send + Sync {
    async fn exists(&self, symbol: &str) -> Result<bool>;
    async fn get(&self, symbol: &str) -> Result<Option<Holding>>;
    async fn put(&self, holding: &Holding) -> Result<()>;
    async fn delete(&self, symbol: &str) -> Result<()>;
    async fn list_all(&self) -> Result<Vec<Holding>>;
    async fn lock(&self, symbol: &str) -> KeyGuard;
}

/// Registry of per-symbol locks shared by the store back ends.
#[derive(Default)]
pub struct KeyLocks {
    locks: Mutex<HashMap<String, Arc<Mutex<()>>>>,
}

impl KeyLocks {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn acquire(&self, key: &str) -> KeyGuard {
        let lock = {
            let mut locks = self.locks.lock().await;
            // Entries only referenced by the registry have no holder or waiter
            locks.retain(|_, lock| Arc::strong_count(lock) > 1);
            Arc::clone(locks.entry(key.to_string()).or_default())
        };
        debug!("Acquiring lock for {}", key);
        lock.lock_owned().await
    }
}
