//! Market-data collaborators
//!
//! The crate ships no provider. Callers inject implementations of
//! [`SymbolResolver`], [`BarSource`] and [`FinancialReportSource`] when
//! building the tool registry.

pub mod range;
pub mod report;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::Result;

pub use range::DateRange;
pub use report::ReportType;

/// Standardized stock identity
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct StockSymbol {
    /// Display name, e.g. "贵州茅台"
    pub name: String,
    /// Exchange-qualified code, e.g. "600519.SH"
    pub code: String,
}

impl StockSymbol {
    pub fn new(name: impl Into<String>, code: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
        }
    }
}

/// Resolves a free-form name or code to a [`StockSymbol`]
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait SymbolResolver: Send + Sync {
    /// `Ok(None)` when nothing matches the query
    async fn resolve(&self, name_or_code: &str) -> Result<Option<StockSymbol>>;
}

/// Retrieves raw daily bar records
///
/// Records are returned as the provider produced them; validation happens in
/// the series parser.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait BarSource: Send + Sync {
    async fn fetch_daily(&self, code: &str, range: &DateRange) -> Result<Vec<Value>>;
}

/// Retrieves periodic financial statements
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FinancialReportSource: Send + Sync {
    /// Up to `limit` most recent periods of one statement, newest first.
    /// Each record is a flat object keyed by the provider's line items.
    async fn fetch_report(
        &self,
        code: &str,
        report: ReportType,
        limit: usize,
    ) -> Result<Vec<Value>>;
}
