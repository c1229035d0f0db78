#![allow(dead_code)]

use chrono::{Days, NaiveDate};
pub use papertrader::adapters::memory_adapter::MemoryQuoteAdapter;
use papertrader::domain::error::TraderError;
pub use papertrader::domain::ohlcv::PriceBar;
use papertrader::ports::quote_port::{BarInterval, HistoryRange, QuotePort};

pub fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).unwrap()
}

pub fn make_bar(symbol: &str, day_offset: u64, close: f64) -> PriceBar {
    PriceBar {
        symbol: symbol.to_string(),
        date: date(2024, 1, 1) + Days::new(day_offset),
        open: close - 1.0,
        high: close + 1.0,
        low: close - 2.0,
        close,
        volume: 1000,
    }
}

pub fn make_bars(symbol: &str, closes: &[f64]) -> Vec<PriceBar> {
    closes
        .iter()
        .enumerate()
        .map(|(i, &close)| make_bar(symbol, i as u64, close))
        .collect()
}

/// `count` bars stepping from `start` by `step` per bar.
pub fn trending_bars(symbol: &str, count: usize, start: f64, step: f64) -> Vec<PriceBar> {
    let closes: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
    make_bars(symbol, &closes)
}

/// Quote source that fails every call, for exercising provider-outage
/// handling.
pub struct FailingQuotes;

impl QuotePort for FailingQuotes {
    fn current_price(&self, _symbol: &str) -> Result<Option<f64>, TraderError> {
        Err(TraderError::QuoteSource {
            reason: "simulated outage".into(),
        })
    }

    fn price_history(
        &self,
        _symbol: &str,
        _range: HistoryRange,
        _interval: BarInterval,
    ) -> Result<Vec<PriceBar>, TraderError> {
        Err(TraderError::QuoteSource {
            reason: "simulated outage".into(),
        })
    }
}
