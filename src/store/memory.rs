use crate::core::error::Result;
use crate::core::holding::Holding;
use crate::core::store::{HoldingStore, KeyGuard, KeyLocks};
use async_trait::async_trait;
use std::collections::BTreeMap;
use std::sync::Arc;
use tokio::sync::Mutex;
use tracing::debug;

/// In-memory holdings store. Contents live as long as the process.
#[derive(Default)]
pub struct MemoryHoldingStore {
    inner: Arc<Mutex<BTreeMap<String, Holding>>>,
    locks: KeyLocks,
}

impl MemoryHoldingStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl HoldingStore for MemoryHoldingStore {
    async fn exists(&self, symbol: &str) -> Result<bool> {
        Ok(self.inner.lock().await.contains_key(symbol))
    }

    async fn get(&self, symbol: &str) -> Result<Option<Holding>> {
        let holdings = self.inner.lock().await;
        let holding = holdings.get(symbol).cloned();
        if holding.is_some() {
            debug!("Store HIT for symbol: {}", symbol);
        } else {
            debug!("Store MISS for symbol: {}", symbol);
        }
        Ok(holding)
    }

    async fn put(&self, holding: &Holding) -> Result<()> {
        let mut holdings = self.inner.lock().await;
        debug!("Store PUT for symbol: {}", holding.symbol);
        holdings.insert(holding.symbol.clone(), holding.clone());
        Ok(())
    }

    async fn delete(&self, symbol: &str) -> Result<()> {
        let mut holdings = self.inner.lock().await;
        holdings.remove(symbol);
        debug!("Store DELETE for symbol: {}", symbol);
        Ok(())
    }

    async fn list_all(&self) -> Result<Vec<Holding>> {
        Ok(self.inner.lock().await.values().cloned().collect())
    }

    async fn lock(&self, symbol: &str) -> KeyGuard {
        self.locks.acquire(symbol).await
    }
}
