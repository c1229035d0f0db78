//! Exponential moving average.
//!
//! k = 2/(period+1); the series is seeded with the first value, so every
//! element is defined: EMA[0] = V[0], EMA[i] = V[i]*k + EMA[i-1]*(1-k).

pub fn ema_series(values: &[f64], period: usize) -> Vec<f64> {
    if values.is_empty() || period == 0 {
        return Vec::new();
    }

    let k = 2.0 / (period as f64 + 1.0);
    let mut out = Vec::with_capacity(values.len());
    let mut ema = values[0];
    out.push(ema);

    for &value in &values[1..] {
        ema = value * k + ema * (1.0 - k);
        out.push(ema);
    }
    out
}
