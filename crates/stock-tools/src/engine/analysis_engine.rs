//! Indicator engine: parse, compute, classify, assemble

use serde_json::Value;
use tracing::debug;

use super::result::{AnalysisParameters, AnalysisResult};
use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::indicators::{TrendVerdict, moving_averages, rsi};
use crate::metrics::{SeriesMetrics, SeriesSummary};
use crate::series::{self, Series};

/// Stateless technical-indicator engine
///
/// Each call is independent; the engine holds only its configuration.
#[derive(Debug, Clone)]
pub struct IndicatorEngine {
    config: IndicatorConfig,
}

impl Default for IndicatorEngine {
    fn default() -> Self {
        Self {
            config: IndicatorConfig::default(),
        }
    }
}

impl IndicatorEngine {
    /// Create an engine, rejecting an invalid configuration
    pub fn new(config: IndicatorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { config })
    }

    pub fn config(&self) -> &IndicatorConfig {
        &self.config
    }

    /// Validate raw records and analyze them
    pub fn analyze_records(&self, records: &[Value]) -> Result<AnalysisResult> {
        let series = series::parse_records(records, &self.config)?;
        Ok(self.analyze(&series))
    }

    /// Decode a JSON payload of records and analyze it
    pub fn analyze_json(&self, payload: &str) -> Result<AnalysisResult> {
        let series = series::parse_json(payload, &self.config)?;
        Ok(self.analyze(&series))
    }

    /// Compute every indicator for a validated series
    ///
    /// Cannot fail: short series produce undefined values and an
    /// `INSUFFICIENT_DATA` verdict.
    pub fn analyze(&self, series: &Series) -> AnalysisResult {
        let cfg = &self.config;
        let closes = series.closes();

        let mas = moving_averages(&closes, &cfg.all_windows());
        let rsi_values = rsi(&closes, cfg.rsi_period);

        let last = &series.bars()[series.len() - 1];
        let short = mas.get(&cfg.short_window).map_or(&[][..], Vec::as_slice);
        let long = mas.get(&cfg.long_window).map_or(&[][..], Vec::as_slice);

        let trend = TrendVerdict::assess(
            last.date,
            last.close,
            (cfg.short_window, short),
            (cfg.long_window, long),
            &rsi_values,
            cfg.sideways_tolerance,
        );

        debug!(
            bars = series.len(),
            label = %trend.label,
            as_of = %trend.as_of_date,
            "Computed technical indicators"
        );

        AnalysisResult::assemble(
            AnalysisParameters::from(cfg),
            series,
            SeriesSummary::of(series),
            SeriesMetrics::of(series),
            &mas,
            &rsi_values,
            trend,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::StockError;
    use crate::indicators::TrendLabel;
    use serde_json::json;

    fn records(closes: &[f64]) -> Vec<Value> {
        closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                let date = chrono::NaiveDate::from_ymd_opt(2024, 1, 1).unwrap()
                    + chrono::Days::new(i as u64);
                json!({
                    "date": date.to_string(),
                    "open": c, "high": c + 0.5, "low": c - 0.5, "close": c,
                    "volume": 1000
                })
            })
            .collect()
    }

    #[test]
    fn test_points_align_with_dates() {
        let engine = IndicatorEngine::default();
        let closes: Vec<f64> = (0..30).map(|i| 100.0 + f64::from(i)).collect();
        let result = engine.analyze_records(&records(&closes)).unwrap();

        assert_eq!(result.dates.len(), 30);
        assert_eq!(result.indicators.len(), 30);
        for (date, point) in result.dates.iter().zip(&result.indicators) {
            assert_eq!(*date, point.date);
        }

        let keys: Vec<_> = result.indicators[0].ma.keys().cloned().collect();
        assert_eq!(keys, vec!["ma5", "ma10", "ma20", "ma60"]);
        assert_eq!(result.indicators[3].ma(5), None);
        assert_eq!(result.indicators[4].ma(5), Some(102.0));
        assert!(result.indicators.iter().all(|p| p.ma(60).is_none()));
        assert_eq!(result.indicators[13].rsi, None);
        assert_eq!(result.indicators[14].rsi, Some(100.0));
    }

    #[test]
    fn test_trend_windows_added_to_output() {
        let config = IndicatorConfig {
            ma_windows: vec![10],
            ..IndicatorConfig::default()
        };
        let engine = IndicatorEngine::new(config).unwrap();
        let result = engine.analyze_records(&records(&[10.0; 25])).unwrap();

        assert_eq!(result.parameters.ma_windows, vec![10, 5, 20]);
        assert_eq!(result.latest().unwrap().ma(20), Some(10.0));
        assert_eq!(result.trend.label, TrendLabel::Sideways);
    }

    #[test]
    fn test_invalid_input_yields_no_result() {
        let engine = IndicatorEngine::default();
        let mut bad = records(&[10.0, 11.0, 12.0]);
        bad[1]["low"] = json!(20.0);

        let err = engine.analyze_records(&bad).unwrap_err();
        assert!(matches!(err, StockError::InvalidOhlc { .. }));
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = IndicatorConfig {
            rsi_period: 0,
            ..IndicatorConfig::default()
        };
        assert!(IndicatorEngine::new(config).is_err());
    }

    #[test]
    fn test_json_output_shape() {
        let engine = IndicatorEngine::default();
        let result = engine.analyze_records(&records(&[10.0, 10.5])).unwrap();
        let value = result.to_json().unwrap();

        assert_eq!(value["trend"]["label"], "INSUFFICIENT_DATA");
        assert_eq!(value["trend"]["as_of_date"], "2024-01-02");
        assert!(value["indicators"][1]["rsi"].is_null());
        assert!(value["indicators"][1]["ma"]["ma5"].is_null());
        assert_eq!(value["dates"][0], "2024-01-01");
        assert_eq!(value["summary"]["bars"], 2);
        assert_eq!(value["parameters"]["rsi_period"], 14);
        assert_eq!(value["metrics"]["regression_trend"]["direction"], "up");
        assert_eq!(value["metrics"]["regression_trend"]["strength"], "strong");
    }

    #[test]
    fn test_overflowing_close_rejected() {
        let engine = IndicatorEngine::default();
        let mut bars = records(&[1.0, 2.0, 3.0, 4.0, 5.0]);
        bars[1]["high"] = json!(1.7e308);
        bars[1]["close"] = json!(1.7e308);

        let err = engine.analyze_records(&bars).unwrap_err();
        assert_eq!(err.code(), "InvalidOHLC");
        assert!(err.to_string().contains("2024-01-02"));
    }
}
