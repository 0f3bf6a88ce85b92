//! Tool for calculating technical indicators

use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::config::{IndicatorConfig, MAX_MA_WINDOWS, StockConfig};
use crate::engine::{AnalysisResult, IndicatorEngine};
use crate::error::{Result, StockError};

/// Computes moving averages, RSI and a trend label from daily bars
///
/// Needs no collaborator: the bars arrive in the call arguments, either as
/// the JSON text produced by `get_stock_daily_data` or as an array.
pub struct TechnicalIndicatorTool {
    config: Arc<StockConfig>,
}

#[derive(Debug, Deserialize)]
struct TechnicalParams {
    #[serde(default)]
    daily_data_json: Option<String>,
    #[serde(default)]
    bars: Option<Vec<Value>>,
    #[serde(default)]
    ma_windows: Option<Vec<usize>>,
    #[serde(default)]
    rsi_period: Option<usize>,
}

impl TechnicalIndicatorTool {
    pub fn new(config: Arc<StockConfig>) -> Self {
        Self { config }
    }

    fn engine_for(&self, params: &TechnicalParams) -> Result<IndicatorEngine> {
        let mut indicators: IndicatorConfig = self.config.indicators.clone();
        if let Some(windows) = &params.ma_windows {
            indicators.ma_windows.clone_from(windows);
        }
        if let Some(period) = params.rsi_period {
            indicators.rsi_period = period;
        }
        IndicatorEngine::new(indicators)
    }

    fn calculate(&self, params: TechnicalParams) -> Result<AnalysisResult> {
        let engine = self.engine_for(&params)?;

        match (params.daily_data_json, params.bars) {
            (Some(payload), None) => engine.analyze_json(&payload),
            (None, Some(bars)) => engine.analyze_records(&bars),
            (Some(_), Some(_)) => Err(StockError::InvalidParameter(
                "pass either daily_data_json or bars, not both".to_string(),
            )),
            (None, None) => Err(StockError::InvalidParameter(
                "one of daily_data_json or bars is required".to_string(),
            )),
        }
    }
}

#[async_trait]
impl Tool for TechnicalIndicatorTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: TechnicalParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::InvalidInput(format!("Invalid parameters: {e}")))?;

        let result = self.calculate(params).map_err(|e| {
            warn!(code = e.code(), error = %e, "Rejected indicator input");
            agent_core::Error::from(e)
        })?;

        info!(
            bars = result.summary.bars,
            label = %result.trend.label,
            "Calculated technical indicators"
        );
        Ok(result.to_json()?)
    }

    fn name(&self) -> &'static str {
        "calculate_technical_indicators"
    }

    fn description(&self) -> &'static str {
        "Calculate technical indicators (moving averages, RSI, trend) from daily data. \
         Pass the raw JSON string returned by get_stock_daily_data, or an array of bars."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "daily_data_json": {
                    "type": "string",
                    "description": "The JSON string output from get_stock_daily_data"
                },
                "bars": {
                    "type": "array",
                    "description": "Daily bars with date, open, high, low, close and volume",
                    "items": { "type": "object" }
                },
                "ma_windows": {
                    "type": "array",
                    "description": "Moving average windows",
                    "items": { "type": "integer", "minimum": 1 },
                    "maxItems": MAX_MA_WINDOWS,
                    "default": self.config.indicators.ma_windows
                },
                "rsi_period": {
                    "type": "integer",
                    "description": "RSI period",
                    "minimum": 1,
                    "default": self.config.indicators.rsi_period
                }
            }
        })
    }
}
