pub mod disk;
pub mod memory;

use crate::core::config::{AppConfig, StorageKind};
use crate::core::store::HoldingStore;
use anyhow::{Context, Result};
use disk::DiskHoldingStore;
use memory::MemoryHoldingStore;
use std::sync::Arc;
use tracing::debug;

/// Opens the holdings store selected by `config`.
pub fn open_store(config: &AppConfig) -> Result<Arc<dyn HoldingStore>> {
    match config.storage {
        StorageKind::Memory => {
            debug!("Using in-memory holdings store");
            Ok(Arc::new(MemoryHoldingStore::new()))
        }
        StorageKind::Disk => {
            let path = config.default_data_path()?.join("holdings");
            let store = DiskHoldingStore::open(&path)
                .with_context(|| format!("Failed to open holdings store at {}", path.display()))?;
            Ok(Arc::new(store))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::holding::Holding;
    use tempfile::tempdir;

    #[tokio::test]
    async fn test_open_disk_store_under_data_path() {
        let dir = tempdir().unwrap();
        let config = AppConfig {
            data_path: Some(dir.path().to_string_lossy().into_owned()),
            ..AppConfig::default()
        };

        {
            let store = open_store(&config).unwrap();
            store.put(&Holding::new("AAPL", 3)).await.unwrap();
        }

        assert!(dir.path().join("holdings").exists());
        let reopened = open_store(&config).unwrap();
        assert_eq!(
            reopened.get("AAPL").await.unwrap(),
            Some(Holding::new("AAPL", 3))
        );
    }

    #[tokio::test]
    async fn test_open_memory_store() {
        let config = AppConfig {
            storage: StorageKind::Memory,
            ..AppConfig::default()
        };
        let store = open_store(&config).unwrap();
        assert!(store.list_all().await.unwrap().is_empty());
    }
}
