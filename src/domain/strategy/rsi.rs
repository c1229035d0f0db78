//! RSI strategy.
//!
//! BUY below the oversold level, SELL above the overbought level, otherwise
//! a fixed-confidence HOLD leaning with the midline. A zero average loss
//! pins RSI at its limit of 100, which lands in the SELL branch.

use std::collections::BTreeMap;

use crate::domain::indicator::rsi::rolling_rsi;
use crate::domain::signal::{Signal, SignalKind};

use super::StrategyKind;

pub const PERIOD: usize = 14;
pub const OVERSOLD: f64 = 30.0;
pub const OVERBOUGHT: f64 = 70.0;

pub(super) fn evaluate(symbol: &str, closes: &[f64]) -> Option<Signal> {
    let series = rolling_rsi(closes, PERIOD);
    let last = closes.len().checked_sub(1)?;
    let rsi = series[last]?;

    let (kind, confidence) = if rsi < OVERSOLD {
        (SignalKind::Buy, 0.5 + (OVERSOLD - rsi) / OVERSOLD * 0.4)
    } else if rsi > OVERBOUGHT {
        (
            SignalKind::Sell,
            0.5 + (rsi - OVERBOUGHT) / (100.0 - OVERBOUGHT) * 0.4,
        )
    } else if rsi < 50.0 {
        (SignalKind::HoldBullish, 0.4)
    } else {
        (SignalKind::HoldBearish, 0.4)
    };

    let metrics = BTreeMap::from([
        ("rsi".to_string(), rsi),
        ("oversold_level".to_string(), OVERSOLD),
        ("overbought_level".to_string(), OVERBOUGHT),
    ]);

    Some(Signal::new(
        symbol,
        kind,
        StrategyKind::Rsi,
        confidence,
        *closes.last()?,
        metrics,
    ))
}
