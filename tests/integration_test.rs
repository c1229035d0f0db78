//! Integration tests.
//!
//! Covers the observable guarantees of the crate end to end:
//! - ledger accounting: solvency under random order sequences, weighted
//!   cost basis, all-or-nothing rejections, sell-to-zero removal
//! - strategy determinism and confidence bounds across all strategies
//! - bot lifecycle: stopped polls, auto-trade gating, watch-list edits
//! - portfolio valuation with and without a live quote source
//! - the full CSV-to-trade pipeline through the file adapter

mod common;

use common::*;
use papertrader::adapters::csv_adapter::CsvQuoteAdapter;
use papertrader::domain::bot::{TradingBot, AUTO_TRADE_CONFIDENCE};
use papertrader::domain::error::TraderError;
use papertrader::domain::ledger::PaperLedger;
use papertrader::domain::signal::SignalKind;
use papertrader::domain::strategy::{self, StrategyKind, MIN_HISTORY_BARS};
use papertrader::domain::trade::TradeAction;
use proptest::prelude::*;

mod ledger_accounting {
    use super::*;

    #[test]
    fn weighted_cost_basis() {
        let quotes = MemoryQuoteAdapter::new();
        let mut ledger = PaperLedger::new(10_000.0);
        ledger
            .execute_trade(&quotes, "ACME", TradeAction::Buy, 10, Some(100.0))
            .unwrap();
        ledger
            .execute_trade(&quotes, "ACME", TradeAction::Buy, 10, Some(200.0))
            .unwrap();

        let position = ledger.position("ACME").unwrap();
        assert_eq!(position.quantity, 20);
        assert!((position.average_cost - 150.0).abs() < 1e-9);
    }

    #[test]
    fn overdraw_rejection_is_atomic() {
        let quotes = MemoryQuoteAdapter::new().with_price("ACME", 1.0);
        let mut ledger = PaperLedger::new(100.0);

        let cash_before = ledger.cash_balance();
        let err = ledger
            .execute_trade(&quotes, "ACME", TradeAction::Buy, 1000, None)
            .unwrap_err();

        assert!(matches!(err, TraderError::InsufficientFunds { .. }));
        assert_eq!(ledger.cash_balance(), cash_before);
        assert!(ledger.position("ACME").is_none());
        assert!(ledger.trades().is_empty());
    }

    #[test]
    fn sell_down_removes_position_and_further_sells_fail() {
        let quotes = MemoryQuoteAdapter::new();
        let mut ledger = PaperLedger::new(10_000.0);
        ledger
            .execute_trade(&quotes, "ACME", TradeAction::Buy, 5, Some(50.0))
            .unwrap();
        ledger
            .execute_trade(&quotes, "ACME", TradeAction::Sell, 5, Some(55.0))
            .unwrap();

        assert!(ledger.position("ACME").is_none());

        let err = ledger
            .execute_trade(&quotes, "ACME", TradeAction::Sell, 1, Some(55.0))
            .unwrap_err();
        assert!(matches!(err, TraderError::NoPosition { .. }));
    }

    proptest! {
        /// Cash never goes negative and no zero-quantity position survives,
        /// whatever sequence of orders is thrown at the ledger.
        #[test]
        fn solvency_invariant(
            orders in prop::collection::vec(
                (any::<bool>(), 1u32..=25, 1.0f64..200.0),
                1..60,
            )
        ) {
            let quotes = MemoryQuoteAdapter::new();
            let mut ledger = PaperLedger::new(1_000.0);

            for (is_buy, quantity, price) in orders {
                let action = if is_buy { TradeAction::Buy } else { TradeAction::Sell };
                // rejections are expected; the invariant must hold either way
                let _ = ledger.execute_trade(&quotes, "ACME", action, quantity, Some(price));

                prop_assert!(ledger.cash_balance() >= 0.0);
                if let Some(position) = ledger.position("ACME") {
                    prop_assert!(position.quantity > 0);
                    prop_assert!(position.average_cost > 0.0);
                }
            }
        }
    }
}

mod strategy_signals {
    use super::*;

    /// 39 flat bars then a jump to 130: the short average crosses above the
    /// long average on the final bar with hand-computable values.
    #[test]
    fn sma_crossover_determinism() {
        let mut closes = vec![100.0; 39];
        closes.push(130.0);
        let bars = make_bars("ACME", &closes);

        let signal = strategy::evaluate(StrategyKind::SmaCrossover, "ACME", &bars).unwrap();

        assert_eq!(signal.kind, SignalKind::Buy);
        // short SMA = (9*100 + 130)/10 = 103, long SMA = (29*100 + 130)/30 = 101
        assert!((signal.metrics["short_sma"] - 103.0).abs() < 0.01);
        assert!((signal.metrics["long_sma"] - 101.0).abs() < 0.01);
        // confidence = 0.5 + (103 - 101)/101 * 10
        assert!((signal.confidence - 0.698).abs() < 0.01);
        assert_eq!(signal.reference_price, 130.0);
    }

    #[test]
    fn same_history_same_signal() {
        let bars = trending_bars("ACME", 45, 80.0, 1.5);
        for kind in StrategyKind::ALL {
            let a = strategy::evaluate(kind, "ACME", &bars).unwrap();
            let b = strategy::evaluate(kind, "ACME", &bars).unwrap();
            assert_eq!(a.kind, b.kind);
            assert_eq!(a.confidence, b.confidence);
            assert_eq!(a.metrics, b.metrics);
        }
    }

    #[test]
    fn short_history_is_rejected_for_all_strategies() {
        let bars = trending_bars("ACME", MIN_HISTORY_BARS - 1, 100.0, 1.0);
        for kind in StrategyKind::ALL {
            let err = strategy::evaluate(kind, "ACME", &bars).unwrap_err();
            assert!(matches!(err, TraderError::InsufficientHistory { .. }));
        }
    }

    #[test]
    fn rsi_zero_loss_takes_the_limit() {
        // monotone climb: average loss is zero, RSI pinned at 100 → SELL
        let bars = trending_bars("ACME", 40, 100.0, 2.0);
        let signal = strategy::evaluate(StrategyKind::Rsi, "ACME", &bars).unwrap();
        assert_eq!(signal.kind, SignalKind::Sell);
        assert!((signal.metrics["rsi"] - 100.0).abs() < 1e-9);
        assert!((signal.confidence - 0.9).abs() < 1e-9);
    }

    #[test]
    fn provider_failure_normalizes_to_no_data() {
        let err = strategy::evaluate_latest(&FailingQuotes, "ACME", StrategyKind::Rsi)
            .unwrap_err();
        assert!(matches!(err, TraderError::NoData { .. }));
    }

    #[test]
    fn empty_history_is_no_data() {
        let quotes = MemoryQuoteAdapter::new();
        let err = strategy::evaluate_latest(&quotes, "GHOST", StrategyKind::Macd).unwrap_err();
        assert!(matches!(err, TraderError::NoData { .. }));
    }

    proptest! {
        /// Confidence stays in [0, 1] for every strategy over arbitrary
        /// positive price histories.
        #[test]
        fn confidence_bounds(
            closes in prop::collection::vec(1.0f64..500.0, MIN_HISTORY_BARS..80)
        ) {
            let bars = make_bars("ACME", &closes);
            for kind in StrategyKind::ALL {
                let signal = strategy::evaluate(kind, "ACME", &bars).unwrap();
                prop_assert!(
                    (0.0..=1.0).contains(&signal.confidence),
                    "{kind}: confidence {} out of range",
                    signal.confidence,
                );
            }
        }
    }
}

mod bot_lifecycle {
    use super::*;

    fn buy_everything_quotes() -> MemoryQuoteAdapter {
        // steady decline: RSI 0 → BUY at confidence 0.9
        MemoryQuoteAdapter::new().with_bars("ACME", trending_bars("ACME", 40, 200.0, -1.0))
    }

    #[test]
    fn stopped_bot_polls_empty_without_touching_the_provider() {
        let mut bot = TradingBot::new();
        bot.add_symbol("ACME");
        let mut ledger = PaperLedger::new(10_000.0);

        // FailingQuotes would surface as skipped symbols; a stopped bot
        // must not even get that far
        let outcomes = bot.check_signals(&FailingQuotes, &mut ledger);
        assert!(outcomes.is_empty());
        assert_eq!(ledger.trade_count(), 0);
    }

    #[test]
    fn auto_trade_disabled_never_executes() {
        let quotes = buy_everything_quotes();
        let mut bot = TradingBot::new();
        let mut ledger = PaperLedger::new(10_000.0);
        bot.start(&["ACME".to_string()], StrategyKind::Rsi, false, 1_000.0);

        for _ in 0..3 {
            let outcomes = bot.check_signals(&quotes, &mut ledger);
            assert_eq!(outcomes.len(), 1);
            assert!(outcomes[0].signal.confidence >= AUTO_TRADE_CONFIDENCE);
            assert!(outcomes[0].trade.is_none());
        }
        assert_eq!(ledger.trade_count(), 0);
    }

    #[test]
    fn auto_trade_round_trip() {
        let mut quotes = MemoryQuoteAdapter::new()
            .with_bars("ACME", trending_bars("ACME", 40, 200.0, -1.0));
        let mut bot = TradingBot::new();
        let mut ledger = PaperLedger::new(10_000.0);
        bot.start(&["ACME".to_string()], StrategyKind::Rsi, true, 1_000.0);

        // poll 1: decline → buy floor(1000/161) = 6 shares at 161
        let outcomes = bot.check_signals(&quotes, &mut ledger);
        let buy = outcomes[0].trade.as_ref().expect("buy should execute");
        assert_eq!(buy.action, TradeAction::Buy);
        assert_eq!(buy.quantity, 6);
        assert_eq!(ledger.position("ACME").unwrap().quantity, 6);

        // poll 2: history flips to a climb → RSI 100 → liquidate
        quotes = quotes.with_bars("ACME", trending_bars("ACME", 40, 100.0, 2.0));
        let outcomes = bot.check_signals(&quotes, &mut ledger);
        let sell = outcomes[0].trade.as_ref().expect("sell should execute");
        assert_eq!(sell.action, TradeAction::Sell);
        assert_eq!(sell.quantity, 6);
        assert!(ledger.position("ACME").is_none());

        let status = bot.status(&ledger);
        assert_eq!(status.total_trades, 2);
    }

    #[test]
    fn watch_list_edits_are_idempotent() {
        let mut bot = TradingBot::new();
        bot.add_symbol("acme");
        bot.add_symbol("ACME");
        bot.add_symbol("ACME ");
        assert_eq!(bot.watched_symbols(), ["ACME"]);

        bot.remove_symbol("ghost");
        assert_eq!(bot.watched_symbols(), ["ACME"]);
    }

    #[test]
    fn status_strategy_present_only_while_running() {
        let ledger = PaperLedger::new(10_000.0);
        let mut bot = TradingBot::new();
        assert_eq!(bot.status(&ledger).strategy, None);

        bot.start(&["ACME".to_string()], StrategyKind::BollingerBands, false, 500.0);
        assert_eq!(
            bot.status(&ledger).strategy,
            Some(StrategyKind::BollingerBands)
        );

        bot.stop();
        assert_eq!(bot.status(&ledger).strategy, None);
        // configuration retained for the next start
        assert_eq!(bot.watched_symbols(), ["ACME"]);
    }

    #[test]
    fn provider_outage_mid_poll_skips_symbols_quietly() {
        let mut bot = TradingBot::new();
        let mut ledger = PaperLedger::new(10_000.0);
        bot.start(&["ACME".to_string()], StrategyKind::Rsi, true, 1_000.0);

        let outcomes = bot.check_signals(&FailingQuotes, &mut ledger);
        assert!(outcomes.is_empty());
        assert_eq!(ledger.trade_count(), 0);
        assert!(bot.is_running());
    }
}

mod portfolio_valuation {
    use super::*;

    #[test]
    fn snapshot_marks_to_market_with_quotes() {
        let quotes = MemoryQuoteAdapter::new().with_price("ACME", 120.0);
        let mut ledger = PaperLedger::new(10_000.0);
        ledger
            .execute_trade(&quotes, "ACME", TradeAction::Buy, 10, Some(100.0))
            .unwrap();

        let snapshot = ledger.snapshot(&quotes);
        assert_eq!(snapshot.positions.len(), 1);
        assert!((snapshot.positions[0].unrealized_pnl - 200.0).abs() < 1e-9);
        assert!((snapshot.positions[0].unrealized_pnl_percent - 20.0).abs() < 1e-9);
        assert!((snapshot.total_value - 10_200.0).abs() < 1e-9);
    }

    #[test]
    fn snapshot_falls_back_to_cost_on_outage() {
        let quotes = MemoryQuoteAdapter::new().with_price("ACME", 100.0);
        let mut ledger = PaperLedger::new(10_000.0);
        ledger
            .execute_trade(&quotes, "ACME", TradeAction::Buy, 10, None)
            .unwrap();

        let snapshot = ledger.snapshot(&FailingQuotes);
        assert!((snapshot.positions[0].current_price - 100.0).abs() < 1e-9);
        assert!((snapshot.positions[0].unrealized_pnl - 0.0).abs() < 1e-9);
        assert!((snapshot.total_value - 10_000.0).abs() < 1e-9);
    }
}

mod csv_pipeline {
    use super::*;
    use chrono::{Days, NaiveDate};
    use std::fmt::Write as _;
    use tempfile::TempDir;

    fn write_history(dir: &TempDir, symbol: &str, closes: &[f64]) {
        let start = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut content = String::from("date,open,high,low,close,volume\n");
        for (i, close) in closes.iter().enumerate() {
            writeln!(
                content,
                "{},{},{},{},{},{}",
                start + Days::new(i as u64),
                close - 1.0,
                close + 1.0,
                close - 2.0,
                close,
                5_000
            )
            .unwrap();
        }
        std::fs::write(dir.path().join(format!("{symbol}.csv")), content).unwrap();
    }

    #[test]
    fn csv_files_drive_the_bot_end_to_end() {
        let dir = TempDir::new().unwrap();
        // declining history: RSI buy at confidence 0.9
        let closes: Vec<f64> = (0..40).map(|i| 200.0 - i as f64).collect();
        write_history(&dir, "ACME", &closes);
        let quotes = CsvQuoteAdapter::new(dir.path().to_path_buf());

        let mut ledger = PaperLedger::new(10_000.0);
        let mut bot = TradingBot::new();
        bot.start(&["ACME".to_string()], StrategyKind::Rsi, true, 1_000.0);

        let outcomes = bot.check_signals(&quotes, &mut ledger);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].signal.kind, SignalKind::Buy);

        let trade = outcomes[0].trade.as_ref().expect("buy should execute");
        assert_eq!(trade.quantity, 6); // floor(1000 / 161)
        assert_eq!(ledger.position("ACME").unwrap().quantity, 6);

        // snapshot marks at the CSV's latest close
        let snapshot = ledger.snapshot(&quotes);
        assert!((snapshot.positions[0].current_price - 161.0).abs() < 1e-9);
    }

    #[test]
    fn unknown_symbol_in_watch_list_is_skipped() {
        let dir = TempDir::new().unwrap();
        write_history(&dir, "ACME", &(0..40).map(|i| 200.0 - i as f64).collect::<Vec<_>>());
        let quotes = CsvQuoteAdapter::new(dir.path().to_path_buf());

        let mut ledger = PaperLedger::new(10_000.0);
        let mut bot = TradingBot::new();
        bot.start(
            &["GHOST".to_string(), "ACME".to_string()],
            StrategyKind::Rsi,
            false,
            1_000.0,
        );

        let outcomes = bot.check_signals(&quotes, &mut ledger);
        assert_eq!(outcomes.len(), 1);
        assert_eq!(outcomes[0].symbol, "ACME");
    }
}
