//! Error types for stock analysis operations

use chrono::NaiveDate;
use thiserror::Error;

/// Stock analysis specific errors
///
/// The first six variants are input validation failures raised while a bar
/// series is parsed. Once a series exists, indicator computation cannot fail.
#[derive(Debug, Error)]
pub enum StockError {
    /// A record is missing a field or a field has the wrong type
    #[error("Malformed record at index {index}: field `{field}` {reason}")]
    MalformedRecord {
        index: usize,
        field: &'static str,
        reason: String,
    },

    /// Prices violate `low <= open, close <= high` or are not positive
    #[error("Invalid OHLC on {date}: {reason}")]
    InvalidOhlc { date: NaiveDate, reason: String },

    /// Two records share a trading date
    #[error("Duplicate date: {date}")]
    DuplicateDate { date: NaiveDate },

    /// A record is dated on or before its predecessor
    #[error("Unordered input at index {index}: {date} does not follow {previous}")]
    UnorderedInput {
        index: usize,
        date: NaiveDate,
        previous: NaiveDate,
    },

    /// No records were supplied
    #[error("Empty series: no bar records supplied")]
    EmptySeries,

    /// More records than the configured limit
    #[error("Series too large: {len} bars exceeds the limit of {max}")]
    SeriesTooLarge { len: usize, max: usize },

    /// Tool arguments or configuration values are out of range
    #[error("Invalid parameter: {0}")]
    InvalidParameter(String),

    /// The symbol resolver found nothing for the query
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// Data not available for the requested symbol
    #[error("Data not available for {symbol}: {reason}")]
    DataUnavailable { symbol: String, reason: String },

    /// A market-data collaborator failed
    #[error("Provider error: {0}")]
    ProviderError(String),

    /// JSON parsing error
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigError(String),
}

impl StockError {
    /// Stable machine-readable code for diagnostics
    pub fn code(&self) -> &'static str {
        match self {
            Self::MalformedRecord { .. } => "MalformedRecord",
            Self::InvalidOhlc { .. } => "InvalidOHLC",
            Self::DuplicateDate { .. } => "DuplicateDate",
            Self::UnorderedInput { .. } => "UnorderedInput",
            Self::EmptySeries => "EmptySeries",
            Self::SeriesTooLarge { .. } => "SeriesTooLarge",
            Self::InvalidParameter(_) => "InvalidParameter",
            Self::SymbolNotFound(_) => "SymbolNotFound",
            Self::DataUnavailable { .. } => "DataUnavailable",
            Self::ProviderError(_) => "ProviderError",
            Self::JsonError(_) => "JsonError",
            Self::ConfigError(_) => "ConfigError",
        }
    }

    /// Whether the error was caused by the data or arguments the caller sent
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            Self::MalformedRecord { .. }
                | Self::InvalidOhlc { .. }
                | Self::DuplicateDate { .. }
                | Self::UnorderedInput { .. }
                | Self::EmptySeries
                | Self::SeriesTooLarge { .. }
                | Self::InvalidParameter(_)
                | Self::SymbolNotFound(_)
                | Self::JsonError(_)
        )
    }
}

/// Result type alias for stock operations
pub type Result<T> = std::result::Result<T, StockError>;

/// Convert StockError to agent_core::Error
impl From<StockError> for agent_core::Error {
    fn from(err: StockError) -> Self {
        let message = format!("{}: {err}", err.code());
        if err.is_validation() {
            agent_core::Error::InvalidInput(message)
        } else {
            agent_core::Error::ProcessingFailed(message)
        }
    }
}

impl From<agent_utils::EnvError> for StockError {
    fn from(err: agent_utils::EnvError) -> Self {
        StockError::ConfigError(err.to_string())
    }
}
