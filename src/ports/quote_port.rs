//! Market-data access port.

use std::fmt;

use crate::domain::error::TraderError;
use crate::domain::ohlcv::PriceBar;

/// How far back a history request reaches.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HistoryRange {
    OneMonth,
    ThreeMonths,
    SixMonths,
    OneYear,
}

impl HistoryRange {
    /// Calendar days covered by the range.
    pub fn days(&self) -> i64 {
        match self {
            HistoryRange::OneMonth => 30,
            HistoryRange::ThreeMonths => 90,
            HistoryRange::SixMonths => 180,
            HistoryRange::OneYear => 365,
        }
    }
}

impl fmt::Display for HistoryRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            HistoryRange::OneMonth => "1mo",
            HistoryRange::ThreeMonths => "3mo",
            HistoryRange::SixMonths => "6mo",
            HistoryRange::OneYear => "1y",
        };
        f.write_str(s)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BarInterval {
    Daily,
    Weekly,
}

impl fmt::Display for BarInterval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BarInterval::Daily => f.write_str("1d"),
            BarInterval::Weekly => f.write_str("1wk"),
        }
    }
}

/// Source of current prices and historical bars.
///
/// "No data" is an explicit `None`/empty result, never a zero sentinel.
/// Implementations may also fail outright; callers in the core normalize
/// those failures to their own no-data outcomes.
pub trait QuotePort {
    /// Latest traded price, or `None` when the source has no quote for the
    /// symbol.
    fn current_price(&self, symbol: &str) -> Result<Option<f64>, TraderError>;

    /// Chronologically ordered bars covering `range`; empty when the symbol
    /// is unknown.
    fn price_history(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: BarInterval,
    ) -> Result<Vec<PriceBar>, TraderError>;
}
