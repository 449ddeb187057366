use crate::core::config::PricingConfig;
use crate::core::error::{PortfolioError, Result};
use crate::core::holding::normalize_symbol;
use crate::core::price::PriceProvider;
use async_trait::async_trait;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

struct PriceState {
    prices: HashMap<String, f64>,
    rng: StdRng,
}

/// Price source backed by an in-process price table.
///
/// Known symbols are seeded from config. Unknown symbols get a random price in
/// `[random_min, random_max)` on first lookup, which is then kept for the
/// lifetime of the provider.
pub struct SimulatedPriceProvider {
    state: Mutex<PriceState>,
    random_min: f64,
    random_max: f64,
}

impl SimulatedPriceProvider {
    pub fn new(config: &PricingConfig) -> Self {
        Self::with_rng(config, StdRng::from_entropy())
    }

    /// Deterministic variant for tests.
    pub fn with_seed(config: &PricingConfig, seed: u64) -> Self {
        Self::with_rng(config, StdRng::seed_from_u64(seed))
    }

    fn with_rng(config: &PricingConfig, rng: StdRng) -> Self {
        let prices = config
            .seed_prices
            .iter()
            .map(|(symbol, price)| (normalize_symbol(symbol), *price))
            .collect();
        let (random_min, random_max) = if !(config.random_min.is_finite()
            && config.random_max.is_finite())
        {
            let defaults = PricingConfig::default();
            warn!(
                "Random price range {}..{} is not finite, using {}..{}",
                config.random_min, config.random_max, defaults.random_min, defaults.random_max
            );
            (defaults.random_min, defaults.random_max)
        } else if config.random_min < config.random_max {
            (config.random_min, config.random_max)
        } else {
            (config.random_max, config.random_min)
        };

        Self {
            state: Mutex::new(PriceState { prices, rng }),
            random_min,
            random_max,
        }
    }
}

#[async_trait]
impl PriceProvider for SimulatedPriceProvider {
    async fn fetch_price(&self, symbol: &str) -> f64 {
        let symbol = normalize_symbol(symbol);
        let mut state = self.state.lock().await;
        if let Some(price) = state.prices.get(&symbol) {
            debug!("Price HIT for {}: {}", symbol, price);
            return *price;
        }

        let price = if self.random_min < self.random_max {
            state.rng.gen_range(self.random_min..self.random_max)
        } else {
            self.random_min
        };
        info!("Generated random price for {}: {}", symbol, price);
        state.prices.insert(symbol, price);
        price
    }

    async fn update_price(&self, symbol: &str, price: f64) -> Result<()> {
        let symbol = normalize_symbol(symbol);
        if !price.is_finite() || price <= 0.0 {
            return Err(PortfolioError::InvalidPrice { symbol, price });
        }

        let mut state = self.state.lock().await;
        info!("Updated price for {} to {}", symbol, price);
        state.prices.insert(symbol, price);
        Ok(())
    }
}
