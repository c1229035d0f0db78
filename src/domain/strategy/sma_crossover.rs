//! SMA crossover strategy.
//!
//! Compares the latest short/long rolling-mean pair against the previous
//! pair. A fresh cross is a BUY/SELL scaled by the relative spread; no
//! cross is a HOLD leaning toward whichever average is on top. During the
//! long average's warmup the previous pair is undefined and no cross can
//! fire.

use std::collections::BTreeMap;

use crate::domain::indicator::sma::rolling_mean;
use crate::domain::signal::{Signal, SignalKind};

use super::StrategyKind;

pub const SHORT_PERIOD: usize = 10;
pub const LONG_PERIOD: usize = 30;

pub(super) fn evaluate(symbol: &str, closes: &[f64]) -> Option<Signal> {
    let short = rolling_mean(closes, SHORT_PERIOD);
    let long = rolling_mean(closes, LONG_PERIOD);

    let last = closes.len().checked_sub(1)?;
    let cur_short = short[last]?;
    let cur_long = long[last]?;
    let (prev_short, prev_long) = if last > 0 {
        (short[last - 1], long[last - 1])
    } else {
        (None, None)
    };

    let crossed_up = matches!((prev_short, prev_long), (Some(ps), Some(pl)) if ps <= pl)
        && cur_short > cur_long;
    let crossed_down = matches!((prev_short, prev_long), (Some(ps), Some(pl)) if ps >= pl)
        && cur_short < cur_long;

    let (kind, confidence) = if crossed_up {
        let conf = 0.5 + (cur_short - cur_long) / cur_long * 10.0;
        (SignalKind::Buy, conf.min(0.9))
    } else if crossed_down {
        let conf = 0.5 + (cur_long - cur_short) / cur_long * 10.0;
        (SignalKind::Sell, conf.min(0.9))
    } else if cur_short > cur_long {
        (SignalKind::HoldBullish, 0.5 + (cur_short - cur_long) / cur_long * 5.0)
    } else {
        (SignalKind::HoldBearish, 0.5 + (cur_long - cur_short) / cur_long * 5.0)
    };

    let metrics = BTreeMap::from([
        ("short_sma".to_string(), cur_short),
        ("long_sma".to_string(), cur_long),
        ("short_period".to_string(), SHORT_PERIOD as f64),
        ("long_period".to_string(), LONG_PERIOD as f64),
    ]);

    Some(Signal::new(
        symbol,
        kind,
        StrategyKind::SmaCrossover,
        confidence,
        *closes.last()?,
        metrics,
    ))
}
