//! Executed-trade records.

use chrono::{DateTime, Utc};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeAction {
    Buy,
    Sell,
}

impl fmt::Display for TradeAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TradeAction::Buy => f.write_str("BUY"),
            TradeAction::Sell => f.write_str("SELL"),
        }
    }
}

/// A filled virtual order. Immutable once appended to the ledger's trade
/// log; `price` and `total_value` are stored rounded to cents.
#[derive(Debug, Clone, PartialEq)]
pub struct Trade {
    pub id: Uuid,
    pub symbol: String,
    pub action: TradeAction,
    pub quantity: u32,
    pub price: f64,
    pub total_value: f64,
    pub executed_at: DateTime<Utc>,
}
