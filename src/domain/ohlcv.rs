//! Daily OHLCV bar representation.

use chrono::NaiveDate;

/// One day of trading for a symbol. Sequences of bars are chronological and
/// immutable once fetched from a quote source.
#[derive(Debug, Clone, PartialEq)]
pub struct PriceBar {
    pub symbol: String,
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: i64,
}

/// Closing-price series of a bar sequence, in bar order.
pub fn closes(bars: &[PriceBar]) -> Vec<f64> {
    bars.iter().map(|b| b.close).collect()
}

/// Close of the most recent bar, if any.
pub fn latest_close(bars: &[PriceBar]) -> Option<f64> {
    bars.last().map(|b| b.close)
}
