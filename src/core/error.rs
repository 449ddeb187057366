//! Error kinds surfaced by the holding lifecycle, the price source and the
//! holdings store.

use thiserror::Error;

/// Type alias for Result using [`PortfolioError`].
pub type Result<T> = std::result::Result<T, PortfolioError>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum PortfolioError {
    #[error("Holding '{0}' not found")]
    NotFound(String),

    #[error("Holding '{0}' already exists")]
    DuplicateSymbol(String),

    #[error("Insufficient quantity for '{symbol}': available {available}, requested {requested}")]
    InsufficientQuantity {
        symbol: String,
        available: u32,
        requested: u32,
    },

    #[error("Quantity must be positive, got {0}")]
    InvalidQuantity(u32),

    #[error("Price must be positive, got {price} for '{symbol}'")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("Buying {requested} shares of '{symbol}' would overflow the held quantity {held}")]
    QuantityOverflow {
        symbol: String,
        held: u32,
        requested: u32,
    },

    /// Back-end failures, stringified so the core stays storage-agnostic.
    #[error("Storage operation failed: {0}")]
    Storage(String),
}
