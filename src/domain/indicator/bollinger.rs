//! Bollinger Bands.
//!
//! Middle band is the rolling mean; upper/lower bands sit `multiplier`
//! rolling standard deviations away. `None` during warmup.

use super::sma::rolling_mean;
use super::stddev::rolling_stddev;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BollingerPoint {
    pub upper: f64,
    pub middle: f64,
    pub lower: f64,
}

pub fn bollinger_series(
    values: &[f64],
    period: usize,
    multiplier: f64,
) -> Vec<Option<BollingerPoint>> {
    let means = rolling_mean(values, period);
    let stddevs = rolling_stddev(values, period);

    means
        .into_iter()
        .zip(stddevs)
        .map(|(mean, stddev)| {
            let middle = mean?;
            let stddev = stddev?;
            Some(BollingerPoint {
                upper: middle + stddev * multiplier,
                middle,
                lower: middle - stddev * multiplier,
            })
        })
        .collect()
}
