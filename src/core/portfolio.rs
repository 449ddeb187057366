//! Whole-portfolio analytics: snapshot the store, price it, delegate to
//! [`analytics`].

use crate::core::analytics;
use crate::core::error::Result;
use crate::core::holding::{Holding, PortfolioSummary, StockValue};
use crate::core::price::{PriceBook, PriceProvider};
use crate::core::store::HoldingStore;
use std::sync::Arc;
use tracing::debug;

/// Receives progress while a snapshot is taken.
pub trait SnapshotProgress: Sync {
    /// Called once the holdings are read, with the number to be priced.
    fn listed(&self, _count: usize) {}
    /// Called once per priced symbol.
    fn priced(&self) {}
}

impl SnapshotProgress for () {}

#[derive(Clone)]
pub struct PortfolioService {
    store: Arc<dyn HoldingStore>,
    prices: Arc<dyn PriceProvider>,
}

impl PortfolioService {
    pub fn new(store: Arc<dyn HoldingStore>, prices: Arc<dyn PriceProvider>) -> Self {
        Self { store, prices }
    }

    /// Reads all holdings and prices them, reporting to `progress`.
    pub async fn snapshot(
        &self,
        progress: &dyn SnapshotProgress,
    ) -> Result<(Vec<Holding>, PriceBook)> {
        let holdings = self.store.list_all().await?;
        progress.listed(holdings.len());
        let prices =
            PriceBook::fetch(&holdings, self.prices.as_ref(), &|| progress.priced()).await;
        debug!(
            "Snapshot of {} holdings with {} prices",
            holdings.len(),
            prices.len()
        );
        Ok((holdings, prices))
    }

    pub async fn total_value(&self) -> Result<f64> {
        let (holdings, prices) = self.snapshot(&()).await?;
        Ok(analytics::total_value(Some(&holdings), &prices))
    }

    pub async fn average_price_per_share(&self) -> Result<f64> {
        let (holdings, prices) = self.snapshot(&()).await?;
        Ok(analytics::average_price_per_share(Some(&holdings), &prices))
    }

    pub async fn summary(&self, progress: &dyn SnapshotProgress) -> Result<PortfolioSummary> {
        let (holdings, prices) = self.snapshot(progress).await?;
        Ok(analytics::summary(Some(&holdings), &prices))
    }

    pub async fn highest_value(&self) -> Result<Option<StockValue>> {
        let (holdings, prices) = self.snapshot(&()).await?;
        Ok(analytics::find_highest_value(Some(&holdings), &prices))
    }
}
