//! Pricing abstractions and core types

use crate::core::error::Result;
use crate::core::holding::Holding;
use async_trait::async_trait;
use futures::future::join_all;
use std::collections::{HashMap, HashSet};
use tracing::debug;

/// Resolves a symbol to its current unit price.
///
/// Callers should not assume two calls for the same symbol agree. Prices may
/// be overridden or synthesized between calls.
#[async_trait]
pub trait PriceProvider: Send + Sync {
    async fn fetch_price(&self, symbol: &str) -> f64;

    /// Overrides the price of `symbol`. Fails with `InvalidPrice` unless
    /// `price` is finite and positive.
    async fn update_price(&self, symbol: &str, price: f64) -> Result<()>;
}

/// Synchronous price lookup used by the analytics functions.
pub trait PriceLookup {
    fn price_of(&self, symbol: &str) -> f64;
}

impl<F> PriceLookup for F
where
    F: Fn(&str) -> f64,
{
    fn price_of(&self, symbol: &str) -> f64 {
        self(symbol)
    }
}

/// Prices fetched for one analytics pass.
#[derive(Debug, Clone, Default)]
pub struct PriceBook {
    prices: HashMap<String, f64>,
}

impl PriceBook {
    /// Fetches the price of every distinct symbol in `holdings` concurrently.
    /// `update_callback` is invoked once per fetched symbol.
    pub async fn fetch(
        holdings: &[Holding],
        provider: &dyn PriceProvider,
        update_callback: &(dyn Fn() + Sync),
    ) -> Self {
        let symbols: HashSet<&str> = holdings.iter().map(|h| h.symbol.as_str()).collect();
        let price_futures = symbols.into_iter().map(|symbol| async move {
            let price = provider.fetch_price(symbol).await;
            update_callback();
            (symbol.to_string(), price)
        });

        let prices: HashMap<String, f64> = join_all(price_futures).await.into_iter().collect();
        debug!("Fetched {} prices", prices.len());
        Self { prices }
    }

    pub fn get(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    pub fn len(&self) -> usize {
        self.prices.len()
    }
}

impl FromIterator<(String, f64)> for PriceBook {
    fn from_iter<T: IntoIterator<Item = (String, f64)>>(iter: T) -> Self {
        Self {
            prices: iter.into_iter().collect(),
        }
    }
}

impl PriceLookup for PriceBook {
    /// Symbols outside the snapshot are valued at zero.
    fn price_of(&self, symbol: &str) -> f64 {
        match self.prices.get(symbol) {
            Some(price) => *price,
            None => {
                debug!("No price in snapshot for {}", symbol);
                0.0
            }
        }
    }
}
