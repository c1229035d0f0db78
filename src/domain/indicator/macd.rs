//! MACD (Moving Average Convergence Divergence).
//!
//! Line = EMA(fast) − EMA(slow); signal = EMA of the line over
//! `signal_period`; histogram = line − signal. Because the EMAs are seeded
//! with the first value, the whole series is defined from index 0.

use super::ema::ema_series;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MacdPoint {
    pub line: f64,
    pub signal: f64,
    pub histogram: f64,
}

pub fn macd_series(
    values: &[f64],
    fast: usize,
    slow: usize,
    signal_period: usize,
) -> Vec<MacdPoint> {
    if values.is_empty() || fast == 0 || slow == 0 || signal_period == 0 {
        return Vec::new();
    }

    let ema_fast = ema_series(values, fast);
    let ema_slow = ema_series(values, slow);
    let line: Vec<f64> = ema_fast
        .iter()
        .zip(&ema_slow)
        .map(|(f, s)| f - s)
        .collect();
    let signal = ema_series(&line, signal_period);

    line.iter()
        .zip(&signal)
        .map(|(&line, &signal)| MacdPoint {
            line,
            signal,
            histogram: line - signal,
        })
        .collect()
}
