//! Strategy registry and signal evaluation.
//!
//! Strategies are a closed tagged variant rather than name-matched strings:
//! the boundary parses a wire name into a [`StrategyKind`] once, and
//! everything past that point dispatches on the enum.

pub mod sma_crossover;
pub mod rsi;
pub mod macd;
pub mod bollinger;

use std::fmt;

use super::error::TraderError;
use super::ohlcv::{self, PriceBar};
use super::signal::Signal;
use crate::ports::quote_port::{BarInterval, HistoryRange, QuotePort};

/// Minimum bars of history a strategy needs before it will produce a signal.
pub const MIN_HISTORY_BARS: usize = 30;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StrategyKind {
    SmaCrossover,
    Rsi,
    Macd,
    BollingerBands,
}

impl StrategyKind {
    pub const ALL: [StrategyKind; 4] = [
        StrategyKind::SmaCrossover,
        StrategyKind::Rsi,
        StrategyKind::Macd,
        StrategyKind::BollingerBands,
    ];

    /// Parse a wire name. Unknown names are a `None`, surfaced by the
    /// caller as [`TraderError::UnknownStrategy`].
    pub fn parse(name: &str) -> Option<StrategyKind> {
        match name.trim().to_lowercase().as_str() {
            "sma_crossover" | "sma-crossover" | "sma" => Some(StrategyKind::SmaCrossover),
            "rsi" => Some(StrategyKind::Rsi),
            "macd" => Some(StrategyKind::Macd),
            "bollinger_bands" | "bollinger-bands" | "bollinger" => {
                Some(StrategyKind::BollingerBands)
            }
            _ => None,
        }
    }

    /// Stable identifier used in configuration and on the wire.
    pub fn id(&self) -> &'static str {
        match self {
            StrategyKind::SmaCrossover => "sma_crossover",
            StrategyKind::Rsi => "rsi",
            StrategyKind::Macd => "macd",
            StrategyKind::BollingerBands => "bollinger_bands",
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StrategyKind::SmaCrossover => "SMA Crossover",
            StrategyKind::Rsi => "RSI",
            StrategyKind::Macd => "MACD",
            StrategyKind::BollingerBands => "Bollinger Bands",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            StrategyKind::SmaCrossover => {
                "Buys when the short-term average crosses above the long-term \
                 average, sells on the opposite cross"
            }
            StrategyKind::Rsi => {
                "Buys below the oversold level (30), sells above the \
                 overbought level (70)"
            }
            StrategyKind::Macd => "Trades crossings of the MACD line and its signal line",
            StrategyKind::BollingerBands => {
                "Buys at the lower band, sells at the upper band"
            }
        }
    }
}

impl fmt::Display for StrategyKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Evaluate one strategy against a chronological bar history. Pure: the
/// same history always produces the same signal.
pub fn evaluate(
    kind: StrategyKind,
    symbol: &str,
    bars: &[PriceBar],
) -> Result<Signal, TraderError> {
    let insufficient = || TraderError::InsufficientHistory {
        symbol: symbol.to_string(),
        bars: bars.len(),
        minimum: MIN_HISTORY_BARS,
    };

    if bars.len() < MIN_HISTORY_BARS {
        return Err(insufficient());
    }

    let closes = ohlcv::closes(bars);
    let signal = match kind {
        StrategyKind::SmaCrossover => sma_crossover::evaluate(symbol, &closes),
        StrategyKind::Rsi => rsi::evaluate(symbol, &closes),
        StrategyKind::Macd => macd::evaluate(symbol, &closes),
        StrategyKind::BollingerBands => bollinger::evaluate(symbol, &closes),
    };
    signal.ok_or_else(insufficient)
}

/// Fetch three months of daily history through the quote port and evaluate.
///
/// Provider failures and empty histories both come back as
/// [`TraderError::NoData`]; a flaky price source must never take down a
/// whole poll.
pub fn evaluate_latest(
    quotes: &dyn QuotePort,
    symbol: &str,
    kind: StrategyKind,
) -> Result<Signal, TraderError> {
    let symbol = symbol.trim().to_uppercase();

    let bars = match quotes.price_history(&symbol, HistoryRange::ThreeMonths, BarInterval::Daily)
    {
        Ok(bars) => bars,
        Err(err) => {
            log::debug!("price history for {symbol} unavailable: {err}");
            return Err(TraderError::NoData { symbol });
        }
    };
    if bars.is_empty() {
        return Err(TraderError::NoData { symbol });
    }

    evaluate(kind, &symbol, &bars)
}
