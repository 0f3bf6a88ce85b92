//! Analysis result types

use chrono::NaiveDate;
use indexmap::IndexMap;
use serde::Serialize;

use crate::config::IndicatorConfig;
use crate::error::Result;
use crate::indicators::TrendVerdict;
use crate::metrics::{SeriesMetrics, SeriesSummary};
use crate::series::Series;

/// Indicator values for one date; `None` where history is insufficient
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct IndicatorPoint {
    pub date: NaiveDate,
    pub close: f64,
    /// Keyed `ma{window}`, in configured window order
    pub ma: IndexMap<String, Option<f64>>,
    pub rsi: Option<f64>,
}

impl IndicatorPoint {
    /// Moving average for `window`, if that window was computed and is defined
    pub fn ma(&self, window: usize) -> Option<f64> {
        self.ma.get(&ma_key(window)).copied().flatten()
    }
}

/// Parameters the result was computed with
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisParameters {
    pub ma_windows: Vec<usize>,
    pub rsi_period: usize,
    pub short_window: usize,
    pub long_window: usize,
    pub sideways_tolerance: f64,
}

impl From<&IndicatorConfig> for AnalysisParameters {
    fn from(config: &IndicatorConfig) -> Self {
        Self {
            ma_windows: config.all_windows(),
            rsi_period: config.rsi_period,
            short_window: config.short_window,
            long_window: config.long_window,
            sideways_tolerance: config.sideways_tolerance,
        }
    }
}

/// Full output of the indicator engine
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AnalysisResult {
    pub parameters: AnalysisParameters,
    pub summary: SeriesSummary,
    pub dates: Vec<NaiveDate>,
    pub indicators: Vec<IndicatorPoint>,
    pub trend: TrendVerdict,
    pub metrics: SeriesMetrics,
}

impl AnalysisResult {
    /// Align computed values with the series' dates
    ///
    /// Nothing is recomputed here. Every bar gets a point; a value missing
    /// from an indicator sequence is reported as undefined.
    pub fn assemble(
        parameters: AnalysisParameters,
        series: &Series,
        summary: SeriesSummary,
        metrics: SeriesMetrics,
        moving_averages: &IndexMap<usize, Vec<Option<f64>>>,
        rsi: &[Option<f64>],
        trend: TrendVerdict,
    ) -> Self {
        let indicators = series
            .bars()
            .iter()
            .enumerate()
            .map(|(i, bar)| IndicatorPoint {
                date: bar.date,
                close: bar.close,
                ma: moving_averages
                    .iter()
                    .map(|(&window, values)| (ma_key(window), values.get(i).copied().flatten()))
                    .collect(),
                rsi: rsi.get(i).copied().flatten(),
            })
            .collect();

        Self {
            parameters,
            summary,
            dates: series.dates(),
            indicators,
            trend,
            metrics,
        }
    }

    /// Point for the last bar
    pub fn latest(&self) -> Option<&IndicatorPoint> {
        self.indicators.last()
    }

    /// Serialize for a tool response
    pub fn to_json(&self) -> Result<serde_json::Value> {
        Ok(serde_json::to_value(self)?)
    }
}

fn ma_key(window: usize) -> String {
    format!("ma{window}")
}
