//! MACD strategy.
//!
//! Fixed-confidence signals on crossings of the MACD line and its signal
//! line; a HOLD leaning with the histogram sign otherwise.

use std::collections::BTreeMap;

use crate::domain::indicator::macd::macd_series;
use crate::domain::signal::{Signal, SignalKind};

use super::StrategyKind;

pub const FAST_PERIOD: usize = 12;
pub const SLOW_PERIOD: usize = 26;
pub const SIGNAL_PERIOD: usize = 9;

pub(super) fn evaluate(symbol: &str, closes: &[f64]) -> Option<Signal> {
    let series = macd_series(closes, FAST_PERIOD, SLOW_PERIOD, SIGNAL_PERIOD);
    let last = series.len().checked_sub(1)?;
    let cur = series[last];
    let prev = if last > 0 { series[last - 1] } else { return None };

    let (kind, confidence) = if prev.line <= prev.signal && cur.line > cur.signal {
        (SignalKind::Buy, 0.7)
    } else if prev.line >= prev.signal && cur.line < cur.signal {
        (SignalKind::Sell, 0.7)
    } else if cur.line > cur.signal {
        (SignalKind::HoldBullish, 0.5)
    } else {
        (SignalKind::HoldBearish, 0.5)
    };

    let metrics = BTreeMap::from([
        ("macd".to_string(), cur.line),
        ("signal_line".to_string(), cur.signal),
        ("histogram".to_string(), cur.histogram),
    ]);

    Some(Signal::new(
        symbol,
        kind,
        StrategyKind::Macd,
        confidence,
        *closes.last()?,
        metrics,
    ))
}
