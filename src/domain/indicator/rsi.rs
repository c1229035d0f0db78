//! Relative Strength Index.
//!
//! Average gain/loss are plain rolling means of the positive/negative
//! one-bar changes over the trailing `period` changes (no Wilder
//! smoothing). RS = avg_gain/avg_loss, RSI = 100 − 100/(1+RS).
//!
//! A window with zero average loss has an undefined RS ratio; the limiting
//! value RSI = 100 is returned instead, including for a perfectly flat
//! window.

pub fn rolling_rsi(values: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if period == 0 {
        return out;
    }

    // index i needs `period` changes, i.e. values[i-period..=i]
    for i in period..values.len() {
        let mut gain_sum = 0.0;
        let mut loss_sum = 0.0;
        for j in (i + 1 - period)..=i {
            let change = values[j] - values[j - 1];
            if change > 0.0 {
                gain_sum += change;
            } else {
                loss_sum -= change;
            }
        }

        let avg_gain = gain_sum / period as f64;
        let avg_loss = loss_sum / period as f64;
        let rsi = if avg_loss == 0.0 {
            100.0
        } else {
            100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
        };
        out[i] = Some(rsi);
    }
    out
}
