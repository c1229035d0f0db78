//! Bollinger Bands strategy.
//!
//! BUY when the latest close touches the lower band, SELL at the upper
//! band, otherwise a HOLD leaning away from the middle band (a price below
//! the mean is read as room to revert upward).

use std::collections::BTreeMap;

use crate::domain::indicator::bollinger::bollinger_series;
use crate::domain::signal::{Signal, SignalKind};

use super::StrategyKind;

pub const PERIOD: usize = 20;
pub const STDDEV_MULTIPLIER: f64 = 2.0;

pub(super) fn evaluate(symbol: &str, closes: &[f64]) -> Option<Signal> {
    let series = bollinger_series(closes, PERIOD, STDDEV_MULTIPLIER);
    let last = closes.len().checked_sub(1)?;
    let band = series[last]?;
    let price = *closes.last()?;

    let (kind, confidence) = if price <= band.lower {
        (SignalKind::Buy, 0.7)
    } else if price >= band.upper {
        (SignalKind::Sell, 0.7)
    } else if price < band.middle {
        (SignalKind::HoldBullish, 0.4)
    } else {
        (SignalKind::HoldBearish, 0.4)
    };

    let metrics = BTreeMap::from([
        ("upper_band".to_string(), band.upper),
        ("lower_band".to_string(), band.lower),
        ("middle_band".to_string(), band.middle),
    ]);

    Some(Signal::new(
        symbol,
        kind,
        StrategyKind::BollingerBands,
        confidence,
        price,
        metrics,
    ))
}
