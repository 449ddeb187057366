use crate::core::error::{PortfolioError, Result};
use crate::core::holding::Holding;
use crate::core::store::{HoldingStore, KeyGuard, KeyLocks};
use async_trait::async_trait;
use fjall::{Config, Keyspace, PartitionCreateOptions, PartitionHandle, PersistMode};
use std::path::Path;
use tracing::debug;

const PARTITION: &str = "holdings";

fn storage_err(e: impl std::fmt::Display) -> PortfolioError {
    PortfolioError::Storage(e.to_string())
}

/// Holdings persisted in a fjall keyspace, one JSON value per symbol.
pub struct DiskHoldingStore {
    keyspace: Keyspace,
    partition: PartitionHandle,
    locks: KeyLocks,
}

impl DiskHoldingStore {
    pub fn open(path: &Path) -> Result<Self> {
        std::fs::create_dir_all(path).map_err(storage_err)?;

        let keyspace = Config::new(path).open().map_err(storage_err)?;
        let partition = keyspace
            .open_partition(PARTITION, PartitionCreateOptions::default())
            .map_err(storage_err)?;
        debug!("Opened holdings store at {}", path.display());

        Ok(Self {
            keyspace,
            partition,
            locks: KeyLocks::new(),
        })
    }

    fn persist(&self) -> Result<()> {
        self.keyspace
            .persist(PersistMode::SyncAll)
            .map_err(storage_err)
    }
}

#[async_trait]
impl HoldingStore for DiskHoldingStore {
    async fn exists(&self, symbol: &str) -> Result<bool> {
        self.partition.contains_key(symbol).map_err(storage_err)
    }

    async fn get(&self, symbol: &str) -> Result<Option<Holding>> {
        match self.partition.get(symbol).map_err(storage_err)? {
            Some(value) => {
                debug!("Store HIT for symbol: {}", symbol);
                let holding = serde_json::from_slice(&value).map_err(storage_err)?;
                Ok(Some(holding))
            }
            None => {
                debug!("Store MISS for symbol: {}", symbol);
                Ok(None)
            }
        }
    }

    async fn put(&self, holding: &Holding) -> Result<()> {
        let value = serde_json::to_vec(holding).map_err(storage_err)?;
        self.partition
            .insert(holding.symbol.as_str(), value)
            .map_err(storage_err)?;
        debug!("Store PUT for symbol: {}", holding.symbol);
        self.persist()
    }

    async fn delete(&self, symbol: &str) -> Result<()> {
        self.partition.remove(symbol).map_err(storage_err)?;
        debug!("Store DELETE for symbol: {}", symbol);
        self.persist()
    }

    async fn list_all(&self) -> Result<Vec<Holding>> {
        self.partition
            .iter()
            .map(|entry| {
                let (_, value) = entry.map_err(storage_err)?;
                serde_json::from_slice(&value).map_err(storage_err)
            })
            .collect()
    }

    async fn lock(&self, symbol: &str) -> KeyGuard {
        self.locks.acquire(symbol).await
    }
}
