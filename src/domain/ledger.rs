//! Paper-trading ledger: cash balance, open positions, and the trade log.
//!
//! Order execution is all-or-nothing: every check runs before the first
//! mutation, so a rejected order leaves cash, positions, and the trade log
//! exactly as they were. The trade log is append-only in execution order.

use chrono::Utc;
use std::collections::HashMap;
use uuid::Uuid;

use super::error::TraderError;
use super::position::Position;
use super::trade::{Trade, TradeAction};
use crate::ports::quote_port::QuotePort;

pub const DEFAULT_INITIAL_CASH: f64 = 100_000.0;

/// Round a monetary value to cents.
pub fn round_cents(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// A held position valued at the current market, for presentation. All
/// monetary fields are rounded to cents.
#[derive(Debug, Clone, PartialEq)]
pub struct PositionView {
    pub symbol: String,
    pub quantity: u32,
    pub average_cost: f64,
    pub current_price: f64,
    pub market_value: f64,
    pub unrealized_pnl: f64,
    pub unrealized_pnl_percent: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct PortfolioSnapshot {
    pub cash_balance: f64,
    pub total_value: f64,
    pub positions: Vec<PositionView>,
    pub total_unrealized_pnl: f64,
}

#[derive(Debug)]
pub struct PaperLedger {
    cash: f64,
    positions: HashMap<String, Position>,
    trades: Vec<Trade>,
}

impl PaperLedger {
    pub fn new(initial_cash: f64) -> Self {
        PaperLedger {
            cash: initial_cash,
            positions: HashMap::new(),
            trades: Vec::new(),
        }
    }

    /// Internal full-precision cash balance.
    pub fn cash_balance(&self) -> f64 {
        self.cash
    }

    pub fn position(&self, symbol: &str) -> Option<&Position> {
        self.positions.get(&symbol.trim().to_uppercase())
    }

    pub fn trades(&self) -> &[Trade] {
        &self.trades
    }

    pub fn trade_count(&self) -> usize {
        self.trades.len()
    }

    /// Full reinitialization: replaces cash, clears positions and the trade
    /// log.
    pub fn reset(&mut self, initial_cash: f64) {
        self.cash = initial_cash;
        self.positions.clear();
        self.trades.clear();
    }

    /// Execute a virtual order and append it to the trade log.
    ///
    /// The execution price is `explicit_price` when given, otherwise the
    /// provider's current quote. Cash is debited/credited at full
    /// precision; the returned record carries cent-rounded price/value.
    pub fn execute_trade(
        &mut self,
        quotes: &dyn QuotePort,
        symbol: &str,
        action: TradeAction,
        quantity: u32,
        explicit_price: Option<f64>,
    ) -> Result<Trade, TraderError> {
        let symbol = symbol.trim().to_uppercase();

        if quantity == 0 {
            return Err(TraderError::InvalidQuantity { symbol });
        }

        let price = match explicit_price {
            Some(price) if price > 0.0 => price,
            Some(price) => return Err(TraderError::InvalidPrice { symbol, price }),
            None => match quotes.current_price(&symbol) {
                Ok(Some(price)) if price > 0.0 => price,
                _ => return Err(TraderError::UnpricedOrder { symbol }),
            },
        };
        let total_value = price * quantity as f64;

        match action {
            TradeAction::Buy => {
                if total_value > self.cash {
                    return Err(TraderError::InsufficientFunds {
                        required: total_value,
                        available: self.cash,
                    });
                }
                self.cash -= total_value;
                self.positions
                    .entry(symbol.clone())
                    .and_modify(|held| {
                        let combined_cost = held.cost_basis() + total_value;
                        held.quantity += quantity;
                        held.average_cost = combined_cost / held.quantity as f64;
                    })
                    .or_insert_with(|| Position {
                        symbol: symbol.clone(),
                        quantity,
                        average_cost: price,
                    });
            }
            TradeAction::Sell => {
                let held = match self.positions.get_mut(&symbol) {
                    Some(held) => held,
                    None => return Err(TraderError::NoPosition { symbol }),
                };
                if held.quantity < quantity {
                    return Err(TraderError::InsufficientShares {
                        symbol,
                        requested: quantity,
                        held: held.quantity,
                    });
                }
                held.quantity -= quantity;
                if held.quantity == 0 {
                    self.positions.remove(&symbol);
                }
                self.cash += total_value;
            }
        }

        let trade = Trade {
            id: Uuid::new_v4(),
            symbol,
            action,
            quantity,
            price: round_cents(price),
            total_value: round_cents(total_value),
            executed_at: Utc::now(),
        };
        self.trades.push(trade.clone());
        Ok(trade)
    }

    /// Value the portfolio at current market prices. Positions whose quote
    /// is unavailable are marked at cost rather than failing the call.
    /// Rounding to cents happens here, at the presentation boundary.
    pub fn snapshot(&self, quotes: &dyn QuotePort) -> PortfolioSnapshot {
        let mut symbols: Vec<&String> = self.positions.keys().collect();
        symbols.sort();

        let mut views = Vec::with_capacity(symbols.len());
        let mut total_market_value = 0.0;
        let mut total_unrealized = 0.0;

        for symbol in symbols {
            let held = &self.positions[symbol];
            let current_price = match quotes.current_price(symbol) {
                Ok(Some(price)) => price,
                _ => held.average_cost,
            };

            let market_value = held.market_value(current_price);
            let cost_basis = held.cost_basis();
            let unrealized = market_value - cost_basis;
            let unrealized_percent = if cost_basis > 0.0 {
                unrealized / cost_basis * 100.0
            } else {
                0.0
            };
            total_market_value += market_value;
            total_unrealized += unrealized;

            views.push(PositionView {
                symbol: held.symbol.clone(),
                quantity: held.quantity,
                average_cost: round_cents(held.average_cost),
                current_price: round_cents(current_price),
                market_value: round_cents(market_value),
                unrealized_pnl: round_cents(unrealized),
                unrealized_pnl_percent: round_cents(unrealized_percent),
            });
        }

        PortfolioSnapshot {
            cash_balance: round_cents(self.cash),
            total_value: round_cents(self.cash + total_market_value),
            positions: views,
            total_unrealized_pnl: round_cents(total_unrealized),
        }
    }
}
