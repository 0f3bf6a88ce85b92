//! Technical analysis tools for daily stock data
//!
//! The core of this crate is a stateless indicator engine: it validates raw
//! daily OHLCV records into an ordered [`Series`], computes simple moving
//! averages and the Wilder RSI per bar, and classifies the trend as of the
//! last bar. Around it sit four tools for the tool-call protocol:
//!
//! - `get_stock_info`: resolve a stock name or code through a [`SymbolResolver`]
//! - `get_stock_daily_data`: fetch raw bars through a [`BarSource`], cached
//!   per (code, date range)
//! - `get_financial_report`: fetch recent balance sheet, profit and cash flow
//!   statements through a [`FinancialReportSource`]
//! - `calculate_technical_indicators`: run the engine on bars passed in the call
//!
//! No market-data provider ships with the crate; callers supply their own
//! resolver, bar source and statement source.
//!
//! # Example
//!
//! ```rust
//! use serde_json::json;
//! use stock_tools::{IndicatorEngine, TrendLabel};
//!
//! let records: Vec<_> = (1..=25)
//!     .map(|d| {
//!         let close = 100.0 + f64::from(d);
//!         json!({
//!             "date": format!("2024-01-{d:02}"),
//!             "open": close, "high": close + 1.0, "low": close - 1.0,
//!             "close": close, "volume": 1000
//!         })
//!     })
//!     .collect();
//!
//! let result = IndicatorEngine::default().analyze_records(&records)?;
//! assert_eq!(result.indicators.len(), 25);
//! assert_eq!(result.trend.label, TrendLabel::StrongUptrend);
//! # Ok::<(), stock_tools::StockError>(())
//! ```

pub mod api;
pub mod cache;
pub mod config;
pub mod engine;
pub mod error;
pub mod indicators;
pub mod metrics;
pub mod series;
pub mod tools;

pub use api::{
    BarSource, DateRange, FinancialReportSource, ReportType, StockSymbol, SymbolResolver,
};
pub use cache::{BarCache, BarCacheKey};
pub use config::{IndicatorConfig, OrderPolicy, StockConfig};
pub use engine::{AnalysisResult, IndicatorEngine, IndicatorPoint};
pub use error::{Result, StockError};
pub use indicators::{TrendLabel, TrendVerdict};
pub use metrics::{RegressionTrend, TrendDirection, TrendStrength};
pub use series::{Bar, Series};
pub use tools::build_registry;
