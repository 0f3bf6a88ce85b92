//! Tool for fetching daily bars

use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::{BarSource, DateRange};
use crate::cache::{BarCache, BarCacheKey};
use crate::error::{Result, StockError};

/// Fetches daily OHLCV records for a stock code and date range
pub struct DailyDataTool {
    source: Arc<dyn BarSource>,
    cache: Option<BarCache>,
}

#[derive(Debug, Deserialize)]
struct DailyDataParams {
    stock_code: String,
    start_date: String,
    #[serde(default)]
    end_date: Option<String>,
}

impl DailyDataTool {
    /// Create the tool; `cache` is `None` when caching is disabled
    pub fn new(source: Arc<dyn BarSource>, cache: Option<BarCache>) -> Self {
        Self { source, cache }
    }

    async fn fetch(&self, params: DailyDataParams) -> Result<Value> {
        let code = params.stock_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(StockError::InvalidParameter(
                "stock_code must not be empty".to_string(),
            ));
        }
        let range = DateRange::parse(&params.start_date, params.end_date.as_deref())?;

        let records = match &self.cache {
            Some(cache) => {
                cache
                    .get_or_fetch(BarCacheKey::new(&code, range), || {
                        self.source.fetch_daily(&code, &range)
                    })
                    .await?
            }
            None => Arc::new(self.source.fetch_daily(&code, &range).await?),
        };

        if records.is_empty() {
            return Err(StockError::DataUnavailable {
                symbol: code,
                reason: format!(
                    "no daily data between {} and {}",
                    range.start(),
                    range.end()
                ),
            });
        }

        info!(code = %code, records = records.len(), "Fetched daily records");

        Ok(json!({
            "stock_code": code,
            "start_date": range.start(),
            "end_date": range.end(),
            "count": records.len(),
            "bars": records.as_slice(),
        }))
    }
}

#[async_trait]
impl Tool for DailyDataTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: DailyDataParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::InvalidInput(format!("Invalid parameters: {e}")))?;

        self.fetch(params).await.map_err(|e| {
            warn!(error = %e, "Daily data request failed");
            e.into()
        })
    }

    fn name(&self) -> &'static str {
        "get_stock_daily_data"
    }

    fn description(&self) -> &'static str {
        "Get daily stock market data (open, high, low, close, volume) for a date range. \
         The end date defaults to today."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "stock_code": {
                    "type": "string",
                    "description": "Standard stock code (e.g. '600519.SH') returned by get_stock_info"
                },
                "start_date": {
                    "type": "string",
                    "description": "Start date in YYYY-MM-DD format"
                },
                "end_date": {
                    "type": "string",
                    "description": "End date in YYYY-MM-DD format (optional, defaults to today)"
                }
            },
            "required": ["stock_code", "start_date"]
        })
    }
}
