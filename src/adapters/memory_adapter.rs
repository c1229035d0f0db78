//! In-memory quote source.
//!
//! Serves canned bars and price overrides from maps; the provider used by
//! the test suites and by embedders that feed their own data.

use std::collections::HashMap;

use crate::domain::error::TraderError;
use crate::domain::ohlcv::{self, PriceBar};
use crate::ports::quote_port::{BarInterval, HistoryRange, QuotePort};

#[derive(Debug, Default)]
pub struct MemoryQuoteAdapter {
    bars: HashMap<String, Vec<PriceBar>>,
    prices: HashMap<String, f64>,
}

impl MemoryQuoteAdapter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a symbol's bar history (assumed chronological).
    pub fn with_bars(mut self, symbol: &str, bars: Vec<PriceBar>) -> Self {
        self.bars.insert(symbol.to_uppercase(), bars);
        self
    }

    /// Seed a current-price override. Without one, the current price falls
    /// back to the symbol's latest bar close.
    pub fn with_price(mut self, symbol: &str, price: f64) -> Self {
        self.prices.insert(symbol.to_uppercase(), price);
        self
    }

    pub fn set_price(&mut self, symbol: &str, price: f64) {
        self.prices.insert(symbol.to_uppercase(), price);
    }
}

impl QuotePort for MemoryQuoteAdapter {
    fn current_price(&self, symbol: &str) -> Result<Option<f64>, TraderError> {
        let symbol = symbol.to_uppercase();
        if let Some(&price) = self.prices.get(&symbol) {
            return Ok(Some(price));
        }
        Ok(self
            .bars
            .get(&symbol)
            .and_then(|bars| ohlcv::latest_close(bars)))
    }

    fn price_history(
        &self,
        symbol: &str,
        _range: HistoryRange,
        _interval: BarInterval,
    ) -> Result<Vec<PriceBar>, TraderError> {
        // Seeded data is served as-is; callers curate the window themselves.
        Ok(self
            .bars
            .get(&symbol.to_uppercase())
            .cloned()
            .unwrap_or_default())
    }
}
