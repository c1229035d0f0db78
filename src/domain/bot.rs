//! Autonomous bot controller: run/stop lifecycle, watch-list, and the
//! signal-check poll that conditionally drives the ledger.
//!
//! The controller holds no timer; each poll is one externally triggered
//! call to [`TradingBot::check_signals`].

use chrono::{DateTime, Utc};

use super::ledger::PaperLedger;
use super::signal::{Signal, SignalKind};
use super::strategy::{self, StrategyKind};
use super::trade::{Trade, TradeAction};
use crate::ports::quote_port::QuotePort;

/// Confidence a signal must reach before the bot acts on it.
pub const AUTO_TRADE_CONFIDENCE: f64 = 0.6;
pub const DEFAULT_TRADE_AMOUNT: f64 = 1_000.0;

/// Per-symbol result of one poll: the signal and the trade it triggered,
/// if any.
#[derive(Debug, Clone)]
pub struct PollOutcome {
    pub symbol: String,
    pub signal: Signal,
    pub trade: Option<Trade>,
}

#[derive(Debug, Clone)]
pub struct BotStatus {
    pub running: bool,
    /// Present only while running.
    pub strategy: Option<StrategyKind>,
    pub watched_symbols: Vec<String>,
    pub last_poll: Option<DateTime<Utc>>,
    /// Read from the ledger's trade log; the bot is not authoritative over
    /// trade count.
    pub total_trades: usize,
}

#[derive(Debug)]
pub struct TradingBot {
    running: bool,
    strategy: StrategyKind,
    watched: Vec<String>,
    auto_trade: bool,
    trade_amount: f64,
    last_poll: Option<DateTime<Utc>>,
}

impl Default for TradingBot {
    fn default() -> Self {
        Self::new()
    }
}

impl TradingBot {
    pub fn new() -> Self {
        TradingBot {
            running: false,
            strategy: StrategyKind::SmaCrossover,
            watched: Vec::new(),
            auto_trade: false,
            trade_amount: DEFAULT_TRADE_AMOUNT,
            last_poll: None,
        }
    }

    /// Transition to Running with a fresh configuration. Symbols are
    /// uppercased and deduplicated, keeping first-seen order so polls walk
    /// the watch-list deterministically.
    pub fn start(
        &mut self,
        symbols: &[String],
        strategy: StrategyKind,
        auto_trade: bool,
        trade_amount: f64,
    ) {
        self.watched.clear();
        for symbol in symbols {
            let symbol = normalize(symbol);
            if !symbol.is_empty() && !self.watched.contains(&symbol) {
                self.watched.push(symbol);
            }
        }
        self.strategy = strategy;
        self.auto_trade = auto_trade;
        self.trade_amount = trade_amount;
        self.running = true;
        self.last_poll = Some(Utc::now());
    }

    /// Transition to Stopped. Watch-list and configuration are retained so
    /// a later start resumes where it left off.
    pub fn stop(&mut self) {
        self.running = false;
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn strategy(&self) -> StrategyKind {
        self.strategy
    }

    pub fn watched_symbols(&self) -> &[String] {
        &self.watched
    }

    /// Idempotent; usable whether running or stopped.
    pub fn add_symbol(&mut self, symbol: &str) {
        let symbol = normalize(symbol);
        if !symbol.is_empty() && !self.watched.contains(&symbol) {
            self.watched.push(symbol);
        }
    }

    /// Removing an absent symbol is a no-op.
    pub fn remove_symbol(&mut self, symbol: &str) {
        let symbol = normalize(symbol);
        self.watched.retain(|watched| *watched != symbol);
    }

    pub fn set_strategy(&mut self, strategy: StrategyKind) {
        self.strategy = strategy;
    }

    pub fn status(&self, ledger: &PaperLedger) -> BotStatus {
        BotStatus {
            running: self.running,
            strategy: self.running.then_some(self.strategy),
            watched_symbols: self.watched.clone(),
            last_poll: self.last_poll,
            total_trades: ledger.trade_count(),
        }
    }

    /// Poll every watched symbol once. A no-op while stopped. Symbols the
    /// engine has no signal for are skipped; a failing quote source never
    /// aborts the rest of the poll.
    pub fn check_signals(
        &mut self,
        quotes: &dyn QuotePort,
        ledger: &mut PaperLedger,
    ) -> Vec<PollOutcome> {
        if !self.running {
            return Vec::new();
        }
        self.last_poll = Some(Utc::now());

        let mut outcomes = Vec::with_capacity(self.watched.len());
        for symbol in &self.watched {
            let signal = match strategy::evaluate_latest(quotes, symbol, self.strategy) {
                Ok(signal) => signal,
                Err(err) => {
                    log::debug!("skipping {symbol}: {err}");
                    continue;
                }
            };

            let trade = if self.auto_trade && signal.confidence >= AUTO_TRADE_CONFIDENCE {
                execute_signal(quotes, ledger, symbol, &signal, self.trade_amount)
            } else {
                None
            };

            if let Some(trade) = &trade {
                log::info!(
                    "{symbol}: {} {} @ {:.2} ({})",
                    trade.action,
                    trade.quantity,
                    trade.price,
                    signal.strategy,
                );
            }
            outcomes.push(PollOutcome {
                symbol: symbol.clone(),
                signal,
                trade,
            });
        }
        outcomes
    }
}

/// Derive and place an order for an actionable signal. BUY sizes the order
/// by the configured trade amount; SELL liquidates the whole position.
/// Returns `None` when the signal does not translate into a trade.
fn execute_signal(
    quotes: &dyn QuotePort,
    ledger: &mut PaperLedger,
    symbol: &str,
    signal: &Signal,
    trade_amount: f64,
) -> Option<Trade> {
    let (action, quantity) = match signal.kind {
        SignalKind::Buy => {
            if signal.reference_price <= 0.0 {
                return None;
            }
            let quantity = (trade_amount / signal.reference_price).floor();
            if quantity < 1.0 || quantity > u32::MAX as f64 {
                return None;
            }
            (TradeAction::Buy, quantity as u32)
        }
        SignalKind::Sell => {
            let held = ledger.position(symbol)?.quantity;
            (TradeAction::Sell, held)
        }
        SignalKind::HoldBullish | SignalKind::HoldBearish => return None,
    };

    match ledger.execute_trade(
        quotes,
        symbol,
        action,
        quantity,
        Some(signal.reference_price),
    ) {
        Ok(trade) => Some(trade),
        Err(err) => {
            log::warn!("{action} order for {symbol} rejected: {err}");
            None
        }
    }
}

fn normalize(symbol: &str) -> String {
    symbol.trim().to_uppercase()
}
