//! Domain error types.

/// Top-level error type for papertrader.
///
/// Every rejected operation is reported through one of these variants; the
/// core never panics on bad input or a failing quote source.
#[derive(Debug, thiserror::Error)]
pub enum TraderError {
    #[error("quote source error: {reason}")]
    QuoteSource { reason: String },

    #[error("config parse error in {file}: {reason}")]
    ConfigParse { file: String, reason: String },

    #[error("missing config key [{section}] {key}")]
    ConfigMissing { section: String, key: String },

    #[error("invalid config value [{section}] {key}: {reason}")]
    ConfigInvalid {
        section: String,
        key: String,
        reason: String,
    },

    #[error("unknown strategy: {name}")]
    UnknownStrategy { name: String },

    #[error("no price data for {symbol}")]
    NoData { symbol: String },

    #[error("insufficient history for {symbol}: have {bars} bars, need {minimum}")]
    InsufficientHistory {
        symbol: String,
        bars: usize,
        minimum: usize,
    },

    #[error("no price available to execute order for {symbol}")]
    UnpricedOrder { symbol: String },

    #[error("order quantity for {symbol} must be positive")]
    InvalidQuantity { symbol: String },

    #[error("order price for {symbol} must be positive, got {price}")]
    InvalidPrice { symbol: String, price: f64 },

    #[error("insufficient funds: order costs {required:.2}, cash balance is {available:.2}")]
    InsufficientFunds { required: f64, available: f64 },

    #[error("no open position in {symbol}")]
    NoPosition { symbol: String },

    #[error("insufficient shares of {symbol}: selling {requested}, holding {held}")]
    InsufficientShares {
        symbol: String,
        requested: u32,
        held: u32,
    },

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl From<&TraderError> for std::process::ExitCode {
    fn from(err: &TraderError) -> Self {
        let code: u8 = match err {
            TraderError::Io(_) => 1,
            TraderError::ConfigParse { .. }
            | TraderError::ConfigMissing { .. }
            | TraderError::ConfigInvalid { .. } => 2,
            TraderError::QuoteSource { .. } => 3,
            TraderError::UnknownStrategy { .. }
            | TraderError::UnpricedOrder { .. }
            | TraderError::InvalidQuantity { .. }
            | TraderError::InvalidPrice { .. }
            | TraderError::InsufficientFunds { .. }
            | TraderError::NoPosition { .. }
            | TraderError::InsufficientShares { .. } => 4,
            TraderError::NoData { .. } | TraderError::InsufficientHistory { .. } => 5,
        };
        std::process::ExitCode::from(code)
    }
}
