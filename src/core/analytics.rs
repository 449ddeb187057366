//! Provides functions for performing financial calculations on portfolios.
//!
//! All functions are pure over a holdings snapshot and a [`PriceLookup`]. An
//! absent or empty snapshot is valid input and yields zeroed results rather
//! than an error. No rounding is applied here.
use crate::core::holding::{Holding, PortfolioSummary, StockValue};
use crate::core::price::PriceLookup;

fn holdings_or_empty(holdings: Option<&[Holding]>) -> &[Holding] {
    holdings.unwrap_or_default()
}

/// Values a single holding at its current price.
pub fn stock_value(holding: &Holding, prices: &impl PriceLookup) -> StockValue {
    StockValue::new(holding, prices.price_of(&holding.symbol))
}

/// Sum of quantities; widened so large portfolios cannot overflow.
pub fn total_quantity(holdings: Option<&[Holding]>) -> u64 {
    holdings_or_empty(holdings)
        .iter()
        .map(|h| u64::from(h.quantity))
        .sum()
}

/// Σ price × quantity over all holdings.
pub fn total_value(holdings: Option<&[Holding]>, prices: &impl PriceLookup) -> f64 {
    holdings_or_empty(holdings)
        .iter()
        .map(|h| stock_value(h, prices).total_value)
        .sum()
}

/// Total value divided by total quantity, or zero when nothing is held.
pub fn average_price_per_share(holdings: Option<&[Holding]>, prices: &impl PriceLookup) -> f64 {
    let quantity = total_quantity(holdings);
    if quantity == 0 {
        return 0.0;
    }
    total_value(holdings, prices) / quantity as f64
}

pub fn summary(holdings: Option<&[Holding]>, prices: &impl PriceLookup) -> PortfolioSummary {
    let holdings = holdings_or_empty(holdings);
    if holdings.is_empty() {
        return PortfolioSummary::default();
    }

    let stock_details: Vec<StockValue> = holdings.iter().map(|h| stock_value(h, prices)).collect();
    let total_quantity = total_quantity(Some(holdings));
    // Reuse the per-holding values instead of pricing everything twice
    let total_value: f64 = stock_details.iter().map(|d| d.total_value).sum();
    let average_price_per_share = if total_quantity > 0 {
        total_value / total_quantity as f64
    } else {
        0.0
    };

    PortfolioSummary {
        total_value,
        average_price_per_share,
        total_stocks: holdings.len(),
        total_quantity,
        stock_details,
    }
}

/// The holding with the highest price × quantity. On exact ties the first
/// holding in input order wins.
pub fn find_highest_value(
    holdings: Option<&[Holding]>,
    prices: &impl PriceLookup,
) -> Option<StockValue> {
    holdings_or_empty(holdings)
        .iter()
        .map(|h| stock_value(h, prices))
        .reduce(|best, candidate| {
            if candidate.total_value > best.total_value {
                candidate
            } else {
                best
            }
        })
}

/// Holdings valued and ordered by descending total value. The sort is
/// stable, so equal values keep their input order.
pub fn rank_by_value(holdings: Option<&[Holding]>, prices: &impl PriceLookup) -> Vec<StockValue> {
    let mut values: Vec<StockValue> = holdings_or_empty(holdings)
        .iter()
        .map(|h| stock_value(h, prices))
        .collect();
    values.sort_by(|a, b| b.total_value.total_cmp(&a.total_value));
    values
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::price::PriceBook;

    fn prices(entries: &[(&str, f64)]) -> PriceBook {
        entries
            .iter()
            .map(|(symbol, price)| (symbol.to_string(), *price))
            .collect()
    }

    #[test]
    fn test_total_value_of_nothing_is_zero() {
        let book = prices(&[]);
        assert_eq!(total_value(None, &book), 0.0);
        assert_eq!(total_value(Some(&[]), &book), 0.0);
    }

    #[test]
    fn test_total_value() {
        let book = prices(&[("AAPL", 150.0), ("GOOGL", 2800.0)]);
        let holdings = vec![Holding::new("AAPL", 10), Holding::new("GOOGL", 5)];
        assert_eq!(total_value(Some(&holdings), &book), 15500.0);
    }

    #[test]
    fn test_average_price_never_divides_by_zero() {
        let book = prices(&[("AAPL", 150.0)]);
        assert_eq!(average_price_per_share(None, &book), 0.0);
        assert_eq!(average_price_per_share(Some(&[]), &book), 0.0);

        // A zero-quantity holding can exist after an update to zero
        let holdings = vec![Holding::new("AAPL", 0)];
        assert_eq!(average_price_per_share(Some(&holdings), &book), 0.0);
    }

    #[test]
    fn test_average_price_per_share() {
        let book = prices(&[("AAPL", 100.0), ("MSFT", 400.0)]);
        let holdings = vec![Holding::new("AAPL", 3), Holding::new("MSFT", 1)];
        assert_eq!(average_price_per_share(Some(&holdings), &book), 175.0);
    }

    #[test]
    fn test_summary() {
        let book = prices(&[("AAPL", 150.0), ("GOOGL", 2800.0)]);
        let holdings = vec![Holding::new("AAPL", 10), Holding::new("GOOGL", 5)];

        let summary = summary(Some(&holdings), &book);

        assert_eq!(summary.total_value, 15500.0);
        assert_eq!(summary.total_quantity, 15);
        assert_eq!(summary.total_stocks, 2);
        assert_eq!(summary.average_price_per_share, 15500.0 / 15.0);
        assert_eq!(summary.stock_details.len(), 2);
        assert_eq!(summary.stock_details[0].symbol, "AAPL");
        assert_eq!(summary.stock_details[0].current_price, 150.0);
        assert_eq!(summary.stock_details[0].total_value, 1500.0);
        assert_eq!(summary.stock_details[1].symbol, "GOOGL");
        assert_eq!(summary.stock_details[1].total_value, 14000.0);
    }

    #[test]
    fn test_summary_with_uniform_prices() {
        let book = prices(&[("AAPL", 1000.0), ("GOOGL", 1000.0)]);
        let holdings = vec![Holding::new("AAPL", 10), Holding::new("GOOGL", 5)];

        let summary = summary(Some(&holdings), &book);

        assert_eq!(summary.total_value, 15000.0);
        assert_eq!(summary.total_quantity, 15);
        assert_eq!(summary.average_price_per_share, 1000.0);
    }

    #[test]
    fn test_summary_of_nothing_is_zeroed() {
        let book = prices(&[]);
        for summary in [summary(None, &book), summary(Some(&[]), &book)] {
            assert_eq!(summary, PortfolioSummary::default());
            assert_eq!(summary.total_value, 0.0);
            assert_eq!(summary.total_stocks, 0);
            assert!(summary.stock_details.is_empty());
        }
    }

    #[test]
    fn test_find_highest_value() {
        let book = prices(&[("AAPL", 150.0), ("GOOGL", 2800.0)]);
        let holdings = vec![Holding::new("AAPL", 10), Holding::new("GOOGL", 1)];

        let highest = find_highest_value(Some(&holdings), &book).unwrap();

        assert_eq!(highest.symbol, "GOOGL");
        assert_eq!(highest.total_value, 2800.0);
    }

    #[test]
    fn test_find_highest_value_of_nothing() {
        let book = prices(&[]);
        assert!(find_highest_value(None, &book).is_none());
        assert!(find_highest_value(Some(&[]), &book).is_none());
    }

    #[test]
    fn test_find_highest_value_tie_keeps_first() {
        let book = prices(&[("AAPL", 100.0), ("MSFT", 50.0)]);
        let holdings = vec![Holding::new("AAPL", 1), Holding::new("MSFT", 2)];

        let highest = find_highest_value(Some(&holdings), &book).unwrap();

        assert_eq!(highest.total_value, 100.0);
        assert_eq!(highest.symbol, "AAPL");
    }

    #[test]
    fn test_rank_by_value() {
        let book = prices(&[("AAPL", 10.0), ("GOOGL", 1000.0)]);
        let holdings = vec![Holding::new("AAPL", 10), Holding::new("GOOGL", 1)];

        let ranked = rank_by_value(Some(&holdings), &book);

        let symbols: Vec<&str> = ranked.iter().map(|v| v.symbol.as_str()).collect();
        assert_eq!(symbols, vec!["GOOGL", "AAPL"]);
    }

    #[test]
    fn test_rank_by_value_is_stable() {
        let book = prices(&[("A", 10.0), ("B", 5.0), ("C", 20.0), ("D", 1.0)]);
        let holdings = vec![
            Holding::new("A", 1),
            Holding::new("B", 2),
            Holding::new("C", 1),
            Holding::new("D", 10),
        ];

        for _ in 0..3 {
            let ranked = rank_by_value(Some(&holdings), &book);
            let symbols: Vec<&str> = ranked.iter().map(|v| v.symbol.as_str()).collect();
            assert_eq!(symbols, vec!["C", "A", "B", "D"]);
        }
    }

    #[test]
    fn test_closure_lookup() {
        let holdings = vec![Holding::new("AAPL", 2)];
        let value = total_value(Some(&holdings), &|_: &str| 7.5);
        assert_eq!(value, 15.0);
    }
}
