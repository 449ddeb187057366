//! Core business logic abstractions

pub mod analytics;
pub mod config;
pub mod error;
pub mod holding;
pub mod holdings;
pub mod log;
pub mod portfolio;
pub mod price;
pub mod store;

// Re-export main types for cleaner imports
pub use error::{PortfolioError, Result};
pub use holding::{Holding, PortfolioSummary, StockValue};
pub use holdings::HoldingService;
pub use portfolio::{PortfolioService, SnapshotProgress};
pub use price::{PriceBook, PriceLookup, PriceProvider};
pub use store::HoldingStore;
