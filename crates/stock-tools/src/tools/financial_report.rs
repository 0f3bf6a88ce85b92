//! Tool for fetching financial statements

use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use indexmap::IndexMap;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{debug, info, warn};

use crate::api::{FinancialReportSource, ReportType};
use crate::error::{Result, StockError};

/// Periods returned when the call does not say
pub const DEFAULT_REPORT_LIMIT: usize = 4;

/// Most periods one call may request
pub const MAX_REPORT_LIMIT: usize = 20;

/// Fetches balance sheet, profit and cash flow statements for a stock code
pub struct FinancialReportTool {
    source: Arc<dyn FinancialReportSource>,
}

fn default_report_type() -> String {
    "all".to_string()
}

fn default_limit() -> usize {
    DEFAULT_REPORT_LIMIT
}

#[derive(Debug, Deserialize)]
struct FinancialReportParams {
    stock_code: String,
    #[serde(default = "default_report_type")]
    report_type: String,
    #[serde(default = "default_limit")]
    limit: usize,
}

impl FinancialReportTool {
    pub fn new(source: Arc<dyn FinancialReportSource>) -> Self {
        Self { source }
    }

    async fn fetch(&self, params: FinancialReportParams) -> Result<Value> {
        let code = params.stock_code.trim().to_uppercase();
        if code.is_empty() {
            return Err(StockError::InvalidParameter(
                "stock_code must not be empty".to_string(),
            ));
        }
        if !(1..=MAX_REPORT_LIMIT).contains(&params.limit) {
            return Err(StockError::InvalidParameter(format!(
                "limit must be between 1 and {MAX_REPORT_LIMIT}, got {}",
                params.limit
            )));
        }
        let kinds = ReportType::select(&params.report_type)?;

        let mut reports: IndexMap<&'static str, Vec<Value>> = IndexMap::new();
        for kind in kinds {
            let mut records = self.source.fetch_report(&code, kind, params.limit).await?;
            if records.is_empty() {
                debug!(code = %code, report = %kind, "No statement periods returned");
                continue;
            }
            records.truncate(params.limit);
            reports.insert(kind.as_str(), records);
        }

        if reports.is_empty() {
            return Err(StockError::DataUnavailable {
                symbol: code,
                reason: format!("no {} statements returned", params.report_type.trim()),
            });
        }

        info!(code = %code, statements = reports.len(), "Fetched financial statements");

        Ok(json!({
            "stock_code": code,
            "limit": params.limit,
            "reports": reports,
        }))
    }
}

#[async_trait]
impl Tool for FinancialReportTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: FinancialReportParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::InvalidInput(format!("Invalid parameters: {e}")))?;

        self.fetch(params).await.map_err(|e| {
            warn!(error = %e, "Financial report request failed");
            e.into()
        })
    }

    fn name(&self) -> &'static str {
        "get_financial_report"
    }

    fn description(&self) -> &'static str {
        "Get financial statements (balance sheet, profit statement, cash flow) for the most \
         recent periods. Useful for fundamental analysis such as ROE, net profit and debt."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "stock_code": {
                    "type": "string",
                    "description": "Standard stock code (e.g. '600519.SH') returned by get_stock_info"
                },
                "report_type": {
                    "type": "string",
                    "enum": ["balance_sheet", "profit_sheet", "cash_flow_sheet", "all"],
                    "description": "Statement to fetch; 'all' fetches all three",
                    "default": "all"
                },
                "limit": {
                    "type": "integer",
                    "description": "Number of recent periods to fetch (e.g. 4 quarters)",
                    "minimum": 1,
                    "maximum": MAX_REPORT_LIMIT,
                    "default": DEFAULT_REPORT_LIMIT
                }
            },
            "required": ["stock_code"]
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::MockFinancialReportSource;

    fn periods(kind: ReportType, count: usize) -> Vec<Value> {
        (0..count)
            .map(|i| json!({"report_date": format!("2024-{:02}-30", 12 - i * 3), "kind": kind.as_str()}))
            .collect()
    }

    #[tokio::test]
    async fn test_all_fetches_three_statements() {
        let mut source = MockFinancialReportSource::new();
        source
            .expect_fetch_report()
            .withf(|code, _, limit| code == "600519.SH" && *limit == 4)
            .times(3)
            .returning(|_, kind, limit| Ok(periods(kind, limit)));

        let tool = FinancialReportTool::new(Arc::new(source));
        let result = tool
            .execute(json!({"stock_code": "600519.sh"}))
            .await
            .unwrap();

        assert_eq!(result["stock_code"], "600519.SH");
        assert_eq!(result["limit"], 4);
        let reports = result["reports"].as_object().unwrap();
        assert_eq!(reports.len(), 3);
        assert_eq!(reports["balance_sheet"].as_array().unwrap().len(), 4);
        assert_eq!(reports["cash_flow_sheet"][0]["kind"], "cash_flow_sheet");
    }

    #[tokio::test]
    async fn test_single_statement() {
        let mut source = MockFinancialReportSource::new();
        source
            .expect_fetch_report()
            .withf(|_, kind, limit| *kind == ReportType::ProfitSheet && *limit == 2)
            .times(1)
            .returning(|_, kind, _| Ok(periods(kind, 5)));

        let tool = FinancialReportTool::new(Arc::new(source));
        let result = tool
            .execute(json!({"stock_code": "000001.SZ", "report_type": "profit_sheet", "limit": 2}))
            .await
            .unwrap();

        let reports = result["reports"].as_object().unwrap();
        assert_eq!(reports.len(), 1);
        assert_eq!(reports["profit_sheet"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_empty_statements_omitted() {
        let mut source = MockFinancialReportSource::new();
        source
            .expect_fetch_report()
            .returning(|_, kind, limit| match kind {
                ReportType::ProfitSheet => Ok(periods(kind, limit)),
                _ => Ok(Vec::new()),
            });

        let tool = FinancialReportTool::new(Arc::new(source));
        let result = tool
            .execute(json!({"stock_code": "000001.SZ", "report_type": "all"}))
            .await
            .unwrap();

        let reports = result["reports"].as_object().unwrap();
        assert_eq!(reports.len(), 1);
        assert!(reports.contains_key("profit_sheet"));
    }

    #[tokio::test]
    async fn test_nothing_returned_is_unavailable() {
        let mut source = MockFinancialReportSource::new();
        source.expect_fetch_report().returning(|_, _, _| Ok(Vec::new()));

        let tool = FinancialReportTool::new(Arc::new(source));
        let err = tool
            .execute(json!({"stock_code": "000001.SZ"}))
            .await
            .unwrap_err();

        assert!(matches!(err, agent_core::Error::ProcessingFailed(_)));
        assert!(err.to_string().contains("DataUnavailable"));
    }

    #[tokio::test]
    async fn test_invalid_arguments_skip_source() {
        let mut source = MockFinancialReportSource::new();
        source.expect_fetch_report().never();
        let tool = FinancialReportTool::new(Arc::new(source));

        for params in [
            json!({"stock_code": "000001.SZ", "limit": 0}),
            json!({"stock_code": "000001.SZ", "limit": MAX_REPORT_LIMIT + 1}),
            json!({"stock_code": "000001.SZ", "report_type": "income"}),
            json!({"stock_code": "  "}),
        ] {
            let err = tool.execute(params).await.unwrap_err();
            assert!(err.is_caller_error(), "{err}");
        }
    }

    #[tokio::test]
    async fn test_provider_error_propagates() {
        let mut source = MockFinancialReportSource::new();
        source
            .expect_fetch_report()
            .times(1)
            .returning(|_, _, _| Err(StockError::ProviderError("timeout".to_string())));

        let tool = FinancialReportTool::new(Arc::new(source));
        let err = tool
            .execute(json!({"stock_code": "000001.SZ"}))
            .await
            .unwrap_err();

        assert!(!err.is_caller_error());
        assert!(err.to_string().contains("timeout"));
    }

    #[test]
    fn test_tool_metadata() {
        let tool = FinancialReportTool::new(Arc::new(MockFinancialReportSource::new()));
        assert_eq!(tool.name(), "get_financial_report");
        let schema = tool.input_schema();
        assert_eq!(schema["properties"]["limit"]["default"], DEFAULT_REPORT_LIMIT);
        assert_eq!(schema["required"], json!(["stock_code"]));
    }
}
