//! Trading signals produced by the strategy engine.

use std::collections::BTreeMap;
use std::fmt;

use super::strategy::StrategyKind;

/// Recommendation attached to a signal. The HOLD variants carry the lean of
/// the market without recommending action.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SignalKind {
    Buy,
    Sell,
    HoldBullish,
    HoldBearish,
}

impl SignalKind {
    pub fn is_hold(&self) -> bool {
        matches!(self, SignalKind::HoldBullish | SignalKind::HoldBearish)
    }
}

impl fmt::Display for SignalKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            SignalKind::Buy => "BUY",
            SignalKind::Sell => "SELL",
            SignalKind::HoldBullish => "HOLD_BULLISH",
            SignalKind::HoldBearish => "HOLD_BEARISH",
        };
        f.write_str(s)
    }
}

/// One strategy's recommendation for one symbol, computed fresh from price
/// history on every evaluation and never mutated afterwards.
#[derive(Debug, Clone)]
pub struct Signal {
    pub symbol: String,
    pub kind: SignalKind,
    pub strategy: StrategyKind,
    /// Strength of the recommendation, always in [0, 1].
    pub confidence: f64,
    /// Last close of the evaluated history; the price orders derived from
    /// this signal execute at.
    pub reference_price: f64,
    pub metrics: BTreeMap<String, f64>,
}

impl Signal {
    /// Builds a signal, clamping confidence into [0, 1].
    pub fn new(
        symbol: &str,
        kind: SignalKind,
        strategy: StrategyKind,
        confidence: f64,
        reference_price: f64,
        metrics: BTreeMap<String, f64>,
    ) -> Self {
        Signal {
            symbol: symbol.to_string(),
            kind,
            strategy,
            confidence: confidence.clamp(0.0, 1.0),
            reference_price,
            metrics,
        }
    }
}
