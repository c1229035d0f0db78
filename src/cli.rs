//! CLI definition and dispatch.
//!
//! The composition boundary: constructs the quote adapter, ledger, and bot
//! explicitly from configuration and wires them together. Status text goes
//! to stderr, data to stdout.

use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use std::thread;
use std::time::Duration;

use crate::adapters::csv_adapter::CsvQuoteAdapter;
use crate::adapters::file_config_adapter::FileConfigAdapter;
use crate::domain::bot::{PollOutcome, TradingBot, DEFAULT_TRADE_AMOUNT};
use crate::domain::error::TraderError;
use crate::domain::ledger::{PaperLedger, PortfolioSnapshot, DEFAULT_INITIAL_CASH};
use crate::domain::signal::Signal;
use crate::domain::strategy::{self, StrategyKind};
use crate::ports::config_port::ConfigPort;

#[derive(Parser, Debug)]
#[command(name = "papertrader", about = "Paper-trading signal engine and bot")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Evaluate one strategy against one symbol
    Signal {
        #[arg(short, long)]
        symbol: String,
        #[arg(short = 't', long, default_value = "sma_crossover")]
        strategy: String,
        #[arg(short, long)]
        config: PathBuf,
    },
    /// List the available strategies
    Strategies,
    /// List symbols with local price data
    Symbols {
        #[arg(short, long)]
        config: PathBuf,
    },
    /// Run the bot over the configured watch-list
    Run {
        #[arg(short, long)]
        config: PathBuf,
        /// Override [bot] polls
        #[arg(long)]
        polls: Option<u32>,
        /// Override [bot] poll_interval_secs
        #[arg(long)]
        interval: Option<u64>,
    },
}

pub fn run(cli: Cli) -> ExitCode {
    match cli.command {
        Command::Signal {
            symbol,
            strategy,
            config,
        } => run_signal(&symbol, &strategy, &config),
        Command::Strategies => run_strategies(),
        Command::Symbols { config } => run_symbols(&config),
        Command::Run {
            config,
            polls,
            interval,
        } => run_bot(&config, polls, interval),
    }
}

fn load_config(path: &PathBuf) -> Result<FileConfigAdapter, ExitCode> {
    FileConfigAdapter::from_file(path).map_err(|err| {
        eprintln!("error: {err}");
        ExitCode::from(&err)
    })
}

fn quote_adapter(config: &dyn ConfigPort) -> Result<CsvQuoteAdapter, TraderError> {
    let dir = config
        .get_string("data", "csv_dir")
        .ok_or_else(|| TraderError::ConfigMissing {
            section: "data".into(),
            key: "csv_dir".into(),
        })?;
    Ok(CsvQuoteAdapter::new(PathBuf::from(dir)))
}

/// Bot settings resolved from the `[bot]` section.
#[derive(Debug, Clone, PartialEq)]
pub struct BotConfig {
    pub symbols: Vec<String>,
    pub strategy: StrategyKind,
    pub auto_trade: bool,
    pub trade_amount: f64,
    pub polls: u32,
    pub poll_interval_secs: u64,
}

pub fn build_bot_config(config: &dyn ConfigPort) -> Result<BotConfig, TraderError> {
    let symbols_str =
        config
            .get_string("bot", "symbols")
            .ok_or_else(|| TraderError::ConfigMissing {
                section: "bot".into(),
                key: "symbols".into(),
            })?;
    let symbols: Vec<String> = symbols_str
        .split(',')
        .map(|s| s.trim().to_uppercase())
        .filter(|s| !s.is_empty())
        .collect();
    if symbols.is_empty() {
        return Err(TraderError::ConfigInvalid {
            section: "bot".into(),
            key: "symbols".into(),
            reason: "no symbols configured".into(),
        });
    }

    let strategy_name = config
        .get_string("bot", "strategy")
        .unwrap_or_else(|| "sma_crossover".to_string());
    let strategy = StrategyKind::parse(&strategy_name).ok_or(TraderError::UnknownStrategy {
        name: strategy_name,
    })?;

    let trade_amount = config.get_double("bot", "trade_amount", DEFAULT_TRADE_AMOUNT);
    if trade_amount <= 0.0 {
        return Err(TraderError::ConfigInvalid {
            section: "bot".into(),
            key: "trade_amount".into(),
            reason: "must be positive".into(),
        });
    }

    Ok(BotConfig {
        symbols,
        strategy,
        auto_trade: config.get_bool("bot", "auto_trade", false),
        trade_amount,
        polls: config.get_int("bot", "polls", 1).max(1) as u32,
        poll_interval_secs: config.get_int("bot", "poll_interval_secs", 0).max(0) as u64,
    })
}

fn run_signal(symbol: &str, strategy_name: &str, config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let Some(kind) = StrategyKind::parse(strategy_name) else {
        let err = TraderError::UnknownStrategy {
            name: strategy_name.to_string(),
        };
        eprintln!("error: {err}");
        return (&err).into();
    };

    let quotes = match quote_adapter(&config) {
        Ok(q) => q,
        Err(err) => {
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    match strategy::evaluate_latest(&quotes, symbol, kind) {
        Ok(signal) => {
            print_signal(&signal);
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

fn print_signal(signal: &Signal) {
    println!(
        "{}  {}  confidence {:.2}  price {:.2}  ({})",
        signal.symbol, signal.kind, signal.confidence, signal.reference_price, signal.strategy,
    );
    for (name, value) in &signal.metrics {
        println!("  {name}: {value:.2}");
    }
}

fn run_strategies() -> ExitCode {
    for kind in StrategyKind::ALL {
        println!("{}  ({})", kind.id(), kind.name());
        println!("    {}", kind.description());
    }
    ExitCode::SUCCESS
}

fn run_symbols(config_path: &PathBuf) -> ExitCode {
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };
    let quotes = match quote_adapter(&config) {
        Ok(q) => q,
        Err(err) => {
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    match quotes.list_symbols() {
        Ok(symbols) => {
            if symbols.is_empty() {
                eprintln!("no symbols found");
            } else {
                for symbol in &symbols {
                    println!("{symbol}");
                }
                eprintln!("{} symbols found", symbols.len());
            }
            ExitCode::SUCCESS
        }
        Err(err) => {
            eprintln!("error: {err}");
            (&err).into()
        }
    }
}

fn run_bot(config_path: &PathBuf, polls: Option<u32>, interval: Option<u64>) -> ExitCode {
    eprintln!("Loading config from {}", config_path.display());
    let config = match load_config(config_path) {
        Ok(c) => c,
        Err(code) => return code,
    };

    let quotes = match quote_adapter(&config) {
        Ok(q) => q,
        Err(err) => {
            eprintln!("error: {err}");
            return (&err).into();
        }
    };
    let bot_config = match build_bot_config(&config) {
        Ok(c) => c,
        Err(err) => {
            eprintln!("error: {err}");
            return (&err).into();
        }
    };

    let initial_cash = config.get_double("portfolio", "initial_cash", DEFAULT_INITIAL_CASH);
    let mut ledger = PaperLedger::new(initial_cash);
    let mut bot = TradingBot::new();
    bot.start(
        &bot_config.symbols,
        bot_config.strategy,
        bot_config.auto_trade,
        bot_config.trade_amount,
    );

    let polls = polls.unwrap_or(bot_config.polls).max(1);
    let interval = interval.unwrap_or(bot_config.poll_interval_secs);

    eprintln!(
        "Watching {} symbols with {} (auto-trade {}, {} polls)",
        bot.watched_symbols().len(),
        bot_config.strategy,
        if bot_config.auto_trade { "on" } else { "off" },
        polls,
    );

    for poll in 0..polls {
        if poll > 0 && interval > 0 {
            thread::sleep(Duration::from_secs(interval));
        }
        let outcomes = bot.check_signals(&quotes, &mut ledger);
        eprintln!("Poll {}:", poll + 1);
        if outcomes.is_empty() {
            eprintln!("  no signals");
        }
        for outcome in &outcomes {
            print_outcome(outcome);
        }
    }
    bot.stop();

    print_trades(&ledger);
    print_summary(&ledger.snapshot(&quotes), ledger.trade_count());
    ExitCode::SUCCESS
}

fn print_trades(ledger: &PaperLedger) {
    if ledger.trades().is_empty() {
        return;
    }
    eprintln!("\n=== Trades ===");
    for trade in ledger.trades() {
        eprintln!(
            "  {} {} {} {} @ ${:.2} (${:.2})",
            trade.executed_at.format("%Y-%m-%d %H:%M:%S"),
            trade.action,
            trade.quantity,
            trade.symbol,
            trade.price,
            trade.total_value,
        );
    }
}

fn print_outcome(outcome: &PollOutcome) {
    match &outcome.trade {
        Some(trade) => eprintln!(
            "  {}: {} (confidence {:.2}) -> {} {} @ ${:.2}",
            outcome.symbol,
            outcome.signal.kind,
            outcome.signal.confidence,
            trade.action,
            trade.quantity,
            trade.price,
        ),
        None => eprintln!(
            "  {}: {} (confidence {:.2})",
            outcome.symbol, outcome.signal.kind, outcome.signal.confidence,
        ),
    }
}

fn print_summary(snapshot: &PortfolioSnapshot, trade_count: usize) {
    eprintln!("\n=== Portfolio ===");
    eprintln!("Cash:       ${:.2}", snapshot.cash_balance);
    eprintln!("Total:      ${:.2}", snapshot.total_value);
    eprintln!("Unrealized: ${:+.2}", snapshot.total_unrealized_pnl);
    for position in &snapshot.positions {
        eprintln!(
            "  {}: {} @ ${:.2} (now ${:.2}, {:+.2}%)",
            position.symbol,
            position.quantity,
            position.average_cost,
            position.current_price,
            position.unrealized_pnl_percent,
        );
    }
    eprintln!("{trade_count} trades executed");
}
