//! Buy/sell/create/update/delete rules for the holdings collection.
//!
//! Every mutation holds the store's per-symbol lock across its
//! read-modify-write, so concurrent trades on one symbol are serialized by
//! the store rather than by this service.

use crate::core::analytics;
use crate::core::error::{PortfolioError, Result};
use crate::core::holding::{Holding, StockValue, normalize_symbol};
use crate::core::price::{PriceBook, PriceProvider};
use crate::core::store::HoldingStore;
use std::sync::Arc;
use tracing::{debug, info};

#[derive(Clone)]
pub struct HoldingService {
    store: Arc<dyn HoldingStore>,
    prices: Arc<dyn PriceProvider>,
}

impl HoldingService {
    pub fn new(store: Arc<dyn HoldingStore>, prices: Arc<dyn PriceProvider>) -> Self {
        Self { store, prices }
    }

    pub async fn create(&self, symbol: &str, quantity: u32) -> Result<Holding> {
        let symbol = normalize_symbol(symbol);
        let _guard = self.store.lock(&symbol).await;

        if self.store.exists(&symbol).await? {
            return Err(PortfolioError::DuplicateSymbol(symbol));
        }

        let holding = Holding { symbol, quantity };
        self.store.put(&holding).await?;
        info!("Created new holding: {}", holding.symbol);
        Ok(holding)
    }

    pub async fn list_all(&self) -> Result<Vec<Holding>> {
        self.store.list_all().await
    }

    pub async fn get_by_symbol(&self, symbol: &str) -> Result<Holding> {
        let symbol = normalize_symbol(symbol);
        self.store
            .get(&symbol)
            .await?
            .ok_or(PortfolioError::NotFound(symbol))
    }

    /// Replaces the quantity of an existing holding. A quantity of zero is
    /// stored as is; only `sell` removes holdings.
    pub async fn update(&self, symbol: &str, quantity: u32) -> Result<Holding> {
        let symbol = normalize_symbol(symbol);
        let _guard = self.store.lock(&symbol).await;

        let mut holding = self.get_by_symbol(&symbol).await?;
        holding.quantity = quantity;
        self.store.put(&holding).await?;
        info!("Updated quantity for holding: {}", symbol);
        Ok(holding)
    }

    pub async fn delete(&self, symbol: &str) -> Result<()> {
        let symbol = normalize_symbol(symbol);
        let _guard = self.store.lock(&symbol).await;

        if !self.store.exists(&symbol).await? {
            return Err(PortfolioError::NotFound(symbol));
        }
        self.store.delete(&symbol).await?;
        info!("Deleted holding: {}", symbol);
        Ok(())
    }

    /// Adds `quantity` shares, creating the holding on first purchase.
    pub async fn buy(&self, symbol: &str, quantity: u32) -> Result<Holding> {
        if quantity == 0 {
            return Err(PortfolioError::InvalidQuantity(quantity));
        }

        let symbol = normalize_symbol(symbol);
        let price = self.prices.fetch_price(&symbol).await;
        let _guard = self.store.lock(&symbol).await;

        let held = self
            .store
            .get(&symbol)
            .await?
            .map_or(0, |holding| holding.quantity);
        let total = held
            .checked_add(quantity)
            .ok_or_else(|| PortfolioError::QuantityOverflow {
                symbol: symbol.clone(),
                held,
                requested: quantity,
            })?;

        let holding = Holding {
            symbol,
            quantity: total,
        };
        self.store.put(&holding).await?;

        info!(
            "Bought {} shares of {} at price {} (total: {})",
            quantity, holding.symbol, price, holding.quantity
        );
        Ok(holding)
    }

    /// Removes `quantity` shares. Returns `None` when the holding was sold
    /// down to zero and deleted.
    pub async fn sell(&self, symbol: &str, quantity: u32) -> Result<Option<Holding>> {
        if quantity == 0 {
            return Err(PortfolioError::InvalidQuantity(quantity));
        }

        let symbol = normalize_symbol(symbol);
        let _guard = self.store.lock(&symbol).await;

        let mut holding = self.get_by_symbol(&symbol).await?;
        if holding.quantity < quantity {
            return Err(PortfolioError::InsufficientQuantity {
                symbol,
                available: holding.quantity,
                requested: quantity,
            });
        }

        holding.quantity -= quantity;
        if holding.quantity == 0 {
            self.store.delete(&symbol).await?;
            info!(
                "Sold all {} shares of {} - holding removed",
                quantity, symbol
            );
            return Ok(None);
        }

        self.store.put(&holding).await?;
        let price = self.prices.fetch_price(&symbol).await;
        info!(
            "Sold {} shares of {} at price {} (remaining: {})",
            quantity, symbol, price, holding.quantity
        );
        Ok(Some(holding))
    }

    /// Current market value of the holding for `symbol`.
    pub async fn calculate_investment(&self, symbol: &str) -> Result<f64> {
        let holding = self.get_by_symbol(symbol).await?;
        let price = self.prices.fetch_price(&holding.symbol).await;
        debug!("Investment in {}: {} x {}", holding.symbol, holding.quantity, price);
        Ok(StockValue::new(&holding, price).total_value)
    }

    /// All holdings valued at current prices, highest value first. Equal
    /// values keep the store's listing order.
    pub async fn list_by_value_descending(&self) -> Result<Vec<StockValue>> {
        let holdings = self.store.list_all().await?;
        let prices = PriceBook::fetch(&holdings, self.prices.as_ref(), &|| ()).await;
        Ok(analytics::rank_by_value(Some(&holdings), &prices))
    }
}
