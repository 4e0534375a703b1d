//! Caller-owned cache of last-observed prices
//!
//! The fetch collaborator records prices as it sees them; the application
//! passes the cache wherever a recent price is wanted without another
//! provider round trip. Last write wins, no eviction: entries are small
//! and the symbol universe is bounded.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

/// Map of ticker symbol to last-observed price
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PriceCache {
    prices: HashMap<String, f64>,
}

impl PriceCache {
    /// Create an empty cache
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an observed price, replacing any previous observation
    pub fn record(&mut self, symbol: impl Into<String>, price: f64) {
        self.prices.insert(symbol.into(), price);
    }

    /// Last observed price for a symbol
    pub fn last_price(&self, symbol: &str) -> Option<f64> {
        self.prices.get(symbol).copied()
    }

    /// Number of symbols observed
    pub fn len(&self) -> usize {
        self.prices.len()
    }

    /// Whether no price has been observed yet
    pub fn is_empty(&self) -> bool {
        self.prices.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_write_wins() {
        let mut cache = PriceCache::new();
        cache.record("AAPL", 180.0);
        cache.record("AAPL", 182.5);

        assert_eq!(cache.last_price("AAPL"), Some(182.5));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_unknown_symbol() {
        let cache = PriceCache::new();
        assert_eq!(cache.last_price("MSFT"), None);
        assert!(cache.is_empty());
    }
}
