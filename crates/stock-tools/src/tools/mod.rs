//! Stock analysis tools exposed through the tool-call protocol

pub mod daily_data;
pub mod financial_report;
pub mod stock_info;
pub mod technical;

pub use daily_data::DailyDataTool;
pub use financial_report::FinancialReportTool;
pub use stock_info::StockInfoTool;
pub use technical::TechnicalIndicatorTool;

use agent_tools::ToolRegistry;
use std::sync::Arc;

use crate::api::{BarSource, FinancialReportSource, SymbolResolver};
use crate::cache::BarCache;
use crate::config::StockConfig;

/// Register every stock tool
///
/// A [`BarCache`] is created from the configuration unless caching is
/// disabled.
pub fn build_registry(
    config: Arc<StockConfig>,
    resolver: Arc<dyn SymbolResolver>,
    source: Arc<dyn BarSource>,
    reports: Arc<dyn FinancialReportSource>,
) -> ToolRegistry {
    let cache = config
        .cache_enabled
        .then(|| BarCache::new(config.cache_capacity, config.cache_ttl));

    let registry = ToolRegistry::new();
    registry.register(Arc::new(StockInfoTool::new(resolver)));
    registry.register(Arc::new(DailyDataTool::new(source, cache)));
    registry.register(Arc::new(FinancialReportTool::new(reports)));
    registry.register(Arc::new(TechnicalIndicatorTool::new(config)));
    registry
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{MockBarSource, MockFinancialReportSource, MockSymbolResolver, StockSymbol};
    use serde_json::json;

    fn registry(resolver: MockSymbolResolver, source: MockBarSource) -> ToolRegistry {
        build_registry(
            Arc::new(StockConfig::default()),
            Arc::new(resolver),
            Arc::new(source),
            Arc::new(MockFinancialReportSource::new()),
        )
    }

    #[test]
    fn test_registers_all_tools() {
        let registry = registry(MockSymbolResolver::new(), MockBarSource::new());
        let names: Vec<_> = registry.definitions().into_iter().map(|d| d.name).collect();

        assert_eq!(
            names,
            vec![
                "calculate_technical_indicators",
                "get_financial_report",
                "get_stock_daily_data",
                "get_stock_info"
            ]
        );
    }

    #[tokio::test]
    async fn test_lookup_fetch_analyze_chain() {
        let mut resolver = MockSymbolResolver::new();
        resolver
            .expect_resolve()
            .returning(|_| Ok(Some(StockSymbol::new("平安银行", "000001.SZ"))));

        let mut source = MockBarSource::new();
        source.expect_fetch_daily().times(1).returning(|_, _| {
            Ok((1..=20)
                .map(|d| {
                    json!({
                        "日期": format!("2024-01-{d:02}"),
                        "开盘": 50.0, "最高": 50.0, "最低": 50.0, "收盘": 50.0,
                        "成交量": 100
                    })
                })
                .collect())
        });

        let registry = registry(resolver, source);

        let info = registry
            .call("get_stock_info", json!({"name_or_code": "平安银行"}))
            .await
            .unwrap();
        let daily = registry
            .call(
                "get_stock_daily_data",
                json!({"stock_code": info["code"], "start_date": "2024-01-01", "end_date": "2024-01-31"}),
            )
            .await
            .unwrap();
        let analysis = registry
            .call(
                "calculate_technical_indicators",
                json!({"daily_data_json": daily.to_string()}),
            )
            .await
            .unwrap();

        assert_eq!(analysis["trend"]["label"], "SIDEWAYS");
        assert_eq!(analysis["indicators"][19]["rsi"], 50.0);
        assert_eq!(analysis["summary"]["bars"], 20);
    }

    #[tokio::test]
    async fn test_financial_report_registered() {
        let mut reports = MockFinancialReportSource::new();
        reports
            .expect_fetch_report()
            .times(1)
            .returning(|_, _, _| Ok(vec![json!({"report_date": "2024-09-30", "净利润": 1.5e9})]));

        let registry = build_registry(
            Arc::new(StockConfig::default()),
            Arc::new(MockSymbolResolver::new()),
            Arc::new(MockBarSource::new()),
            Arc::new(reports),
        );
        let result = registry
            .call(
                "get_financial_report",
                json!({"stock_code": "600519.SH", "report_type": "profit_sheet", "limit": 1}),
            )
            .await
            .unwrap();

        assert_eq!(result["reports"]["profit_sheet"][0]["report_date"], "2024-09-30");
    }

    #[tokio::test]
    async fn test_unknown_tool() {
        let registry = registry(MockSymbolResolver::new(), MockBarSource::new());
        let err = registry.call("get_stock_news", json!({})).await.unwrap_err();
        assert!(matches!(err, agent_core::Error::ToolNotFound(_)));
    }
}
