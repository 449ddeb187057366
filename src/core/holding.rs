//! Holding records and the value-annotated views derived from them.

use serde::{Deserialize, Serialize};

/// Normalizes a ticker to its canonical store key.
pub fn normalize_symbol(symbol: &str) -> String {
    symbol.to_uppercase()
}

/// A single symbol's current quantity held in the portfolio.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Holding {
    pub symbol: String,
    pub quantity: u32,
}

impl Holding {
    pub fn new(symbol: &str, quantity: u32) -> Self {
        Self {
            symbol: normalize_symbol(symbol),
            quantity,
        }
    }
}

/// A holding annotated with the price it was valued at.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StockValue {
    pub symbol: String,
    pub quantity: u32,
    pub current_price: f64,
    pub total_value: f64,
}

impl StockValue {
    pub fn new(holding: &Holding, current_price: f64) -> Self {
        Self {
            symbol: holding.symbol.clone(),
            quantity: holding.quantity,
            current_price,
            total_value: current_price * f64::from(holding.quantity),
        }
    }
}

/// Aggregate report over all current holdings, derived fresh on every query.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PortfolioSummary {
    pub total_value: f64,
    pub average_price_per_share: f64,
    pub total_stocks: usize,
    pub total_quantity: u64,
    pub stock_details: Vec<StockValue>,
}
