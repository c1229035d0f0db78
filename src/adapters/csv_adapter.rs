//! CSV file quote adapter.
//!
//! Serves price data from one `SYMBOL.csv` file per symbol under a base
//! directory, columns `date,open,high,low,close,volume`. A missing file is
//! "no data" (not an error); an unreadable or malformed file is a
//! `QuoteSource` error. History ranges are measured back from the newest
//! bar on file so fixture data stays usable regardless of wall-clock date.

use chrono::{Datelike, Days, NaiveDate};
use std::fs;
use std::path::PathBuf;

use crate::domain::error::TraderError;
use crate::domain::ohlcv::{self, PriceBar};
use crate::ports::quote_port::{BarInterval, HistoryRange, QuotePort};

pub struct CsvQuoteAdapter {
    base_path: PathBuf,
}

impl CsvQuoteAdapter {
    pub fn new(base_path: PathBuf) -> Self {
        Self { base_path }
    }

    fn csv_path(&self, symbol: &str) -> PathBuf {
        self.base_path.join(format!("{}.csv", symbol.to_uppercase()))
    }

    /// All bars on file for a symbol, sorted by date. Empty when the file
    /// does not exist.
    fn read_bars(&self, symbol: &str) -> Result<Vec<PriceBar>, TraderError> {
        let symbol = symbol.trim().to_uppercase();
        let path = self.csv_path(&symbol);
        if !path.exists() {
            return Ok(Vec::new());
        }

        let content = fs::read_to_string(&path).map_err(|e| TraderError::QuoteSource {
            reason: format!("failed to read {}: {}", path.display(), e),
        })?;

        let mut rdr = csv::Reader::from_reader(content.as_bytes());
        let mut bars = Vec::new();

        for result in rdr.records() {
            let record = result.map_err(|e| TraderError::QuoteSource {
                reason: format!("CSV parse error in {}: {}", path.display(), e),
            })?;

            let field = |idx: usize, name: &str| -> Result<&str, TraderError> {
                record.get(idx).ok_or_else(|| TraderError::QuoteSource {
                    reason: format!("missing {name} column in {}", path.display()),
                })
            };

            let date = NaiveDate::parse_from_str(field(0, "date")?, "%Y-%m-%d").map_err(|e| {
                TraderError::QuoteSource {
                    reason: format!("invalid date in {}: {}", path.display(), e),
                }
            })?;

            let number = |idx: usize, name: &str| -> Result<f64, TraderError> {
                field(idx, name)?
                    .parse()
                    .map_err(|e| TraderError::QuoteSource {
                        reason: format!("invalid {name} value in {}: {}", path.display(), e),
                    })
            };

            let volume: i64 =
                field(5, "volume")?
                    .parse()
                    .map_err(|e| TraderError::QuoteSource {
                        reason: format!("invalid volume value in {}: {}", path.display(), e),
                    })?;

            bars.push(PriceBar {
                symbol: symbol.clone(),
                date,
                open: number(1, "open")?,
                high: number(2, "high")?,
                low: number(3, "low")?,
                close: number(4, "close")?,
                volume,
            });
        }

        bars.sort_by_key(|b| b.date);
        Ok(bars)
    }

    /// Symbols with a data file present, sorted.
    pub fn list_symbols(&self) -> Result<Vec<String>, TraderError> {
        let entries = fs::read_dir(&self.base_path).map_err(|e| TraderError::QuoteSource {
            reason: format!("failed to read {}: {}", self.base_path.display(), e),
        })?;

        let mut symbols = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| TraderError::QuoteSource {
                reason: format!("directory entry error: {e}"),
            })?;
            let name = entry.file_name();
            let name = name.to_string_lossy();
            if let Some(stem) = name.strip_suffix(".csv") {
                symbols.push(stem.to_uppercase());
            }
        }

        symbols.sort();
        Ok(symbols)
    }
}

/// Keep the last bar of each ISO week.
fn downsample_weekly(bars: Vec<PriceBar>) -> Vec<PriceBar> {
    let mut out: Vec<PriceBar> = Vec::new();
    for bar in bars {
        match out.last_mut() {
            Some(prev) if prev.date.iso_week() == bar.date.iso_week() => *prev = bar,
            _ => out.push(bar),
        }
    }
    out
}

impl QuotePort for CsvQuoteAdapter {
    fn current_price(&self, symbol: &str) -> Result<Option<f64>, TraderError> {
        let bars = self.read_bars(symbol)?;
        Ok(ohlcv::latest_close(&bars))
    }

    fn price_history(
        &self,
        symbol: &str,
        range: HistoryRange,
        interval: BarInterval,
    ) -> Result<Vec<PriceBar>, TraderError> {
        let bars = self.read_bars(symbol)?;
        let Some(newest) = bars.last().map(|b| b.date) else {
            return Ok(Vec::new());
        };

        let cutoff = newest
            .checked_sub_days(Days::new(range.days() as u64))
            .unwrap_or(NaiveDate::MIN);
        let bars: Vec<PriceBar> = bars.into_iter().filter(|b| b.date > cutoff).collect();

        Ok(match interval {
            BarInterval::Daily => bars,
            BarInterval::Weekly => downsample_weekly(bars),
        })
    }
}
