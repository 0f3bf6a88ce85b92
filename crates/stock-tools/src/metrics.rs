//! Whole-period statistics reported next to the per-bar indicators

use chrono::NaiveDate;
use serde::Serialize;

use crate::series::Series;

/// Trading days used to annualize daily volatility
pub const TRADING_DAYS_PER_YEAR: f64 = 252.0;

/// Extent of the series
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesSummary {
    pub bars: usize,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
}

impl SeriesSummary {
    pub fn of(series: &Series) -> Self {
        let bars = series.bars();
        Self {
            bars: bars.len(),
            start_date: bars[0].date,
            end_date: bars[bars.len() - 1].date,
        }
    }
}

/// Price and volume statistics over the whole series
///
/// Percentages are in percent (`-3.5` means a 3.5% fall). Fields that need
/// at least two bars (or two daily returns, for volatility) are `None`
/// otherwise.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SeriesMetrics {
    pub latest_close: f64,
    pub highest_close: f64,
    pub lowest_close: f64,
    pub mean_close: f64,
    pub period_change: Option<f64>,
    pub period_change_pct: Option<f64>,
    pub max_daily_gain_pct: Option<f64>,
    pub max_daily_loss_pct: Option<f64>,
    pub max_drawdown_pct: Option<f64>,
    /// Rise from the lowest close before the highest close up to it
    pub max_run_up_pct: Option<f64>,
    pub annualized_volatility_pct: Option<f64>,
    pub avg_volume: f64,
    pub max_volume: u64,
    pub latest_volume: u64,
    /// Least-squares line through the closes
    pub regression_trend: Option<RegressionTrend>,
}

impl SeriesMetrics {
    pub fn of(series: &Series) -> Self {
        let bars = series.bars();
        let closes = series.closes();
        let n = closes.len();
        let first = closes[0];
        let latest = closes[n - 1];

        let returns: Vec<f64> = closes.windows(2).map(|w| w[1] / w[0] - 1.0).collect();
        let multi = n > 1;

        Self {
            latest_close: latest,
            highest_close: closes.iter().copied().fold(f64::MIN, f64::max),
            lowest_close: closes.iter().copied().fold(f64::MAX, f64::min),
            mean_close: closes.iter().sum::<f64>() / n as f64,
            period_change: multi.then(|| latest - first),
            period_change_pct: multi.then(|| (latest - first) / first * 100.0),
            max_daily_gain_pct: returns
                .iter()
                .copied()
                .reduce(f64::max)
                .map(|r| r * 100.0),
            max_daily_loss_pct: returns
                .iter()
                .copied()
                .reduce(f64::min)
                .map(|r| r * 100.0),
            max_drawdown_pct: multi.then(|| max_drawdown(&closes) * 100.0),
            max_run_up_pct: max_run_up(&closes).map(|r| r * 100.0),
            annualized_volatility_pct: sample_std_dev(&returns)
                .map(|sd| sd * TRADING_DAYS_PER_YEAR.sqrt() * 100.0),
            avg_volume: bars.iter().map(|b| b.volume as f64).sum::<f64>() / n as f64,
            max_volume: bars.iter().map(|b| b.volume).max().unwrap_or(0),
            latest_volume: bars[n - 1].volume,
            regression_trend: RegressionTrend::fit(&closes),
        }
    }
}

/// Sign of the fitted slope
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendDirection {
    Up,
    Down,
    Flat,
}

/// How well a straight line explains the closes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum TrendStrength {
    Strong,
    Medium,
    Weak,
}

impl TrendStrength {
    /// Above 0.7 is strong, above 0.4 medium
    pub fn from_r_squared(r_squared: f64) -> Self {
        if r_squared > 0.7 {
            Self::Strong
        } else if r_squared > 0.4 {
            Self::Medium
        } else {
            Self::Weak
        }
    }
}

/// Linear regression of close on bar index
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RegressionTrend {
    /// Price change per bar
    pub slope: f64,
    /// Zero when every close is equal
    pub r_squared: f64,
    pub direction: TrendDirection,
    pub strength: TrendStrength,
}

impl RegressionTrend {
    /// Fit over `closes`; `None` with fewer than two
    pub fn fit(closes: &[f64]) -> Option<Self> {
        let n = closes.len();
        if n < 2 {
            return None;
        }

        let x_mean = (n - 1) as f64 / 2.0;
        let y_mean = closes.iter().sum::<f64>() / n as f64;
        let (mut sxx, mut sxy, mut syy) = (0.0, 0.0, 0.0);
        for (i, &y) in closes.iter().enumerate() {
            let dx = i as f64 - x_mean;
            let dy = y - y_mean;
            sxx += dx * dx;
            sxy += dx * dy;
            syy += dy * dy;
        }

        let slope = sxy / sxx;
        let r_squared = if syy > 0.0 { sxy * sxy / (sxx * syy) } else { 0.0 };
        let direction = if slope > 0.0 {
            TrendDirection::Up
        } else if slope < 0.0 {
            TrendDirection::Down
        } else {
            TrendDirection::Flat
        };

        Some(Self {
            slope,
            r_squared,
            direction,
            strength: TrendStrength::from_r_squared(r_squared),
        })
    }
}

/// Largest fall from a running peak, as a non-positive fraction
fn max_drawdown(closes: &[f64]) -> f64 {
    let mut peak = f64::MIN;
    let mut worst = 0.0_f64;
    for &close in closes {
        peak = peak.max(close);
        worst = worst.min((close - peak) / peak);
    }
    worst
}

/// Gain from the lowest close preceding the (first) highest close
fn max_run_up(closes: &[f64]) -> Option<f64> {
    let (peak_idx, &peak) = closes
        .iter()
        .enumerate()
        .reduce(|best, cur| if cur.1 > best.1 { cur } else { best })?;

    let (trough_idx, &trough) = closes[..=peak_idx]
        .iter()
        .enumerate()
        .reduce(|best, cur| if cur.1 < best.1 { cur } else { best })?;

    (trough_idx < peak_idx).then(|| (peak - trough) / trough)
}

fn sample_std_dev(values: &[f64]) -> Option<f64> {
    if values.len() < 2 {
        return None;
    }
    let n = values.len() as f64;
    let mean = values.iter().sum::<f64>() / n;
    let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (n - 1.0);
    Some(var.sqrt())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::IndicatorConfig;
    use crate::series::parse_records;
    use serde_json::json;

    fn series(closes: &[f64]) -> Series {
        let records: Vec<_> = closes
            .iter()
            .enumerate()
            .map(|(i, &c)| {
                json!({
                    "date": format!("2024-01-{:02}", i + 1),
                    "open": c, "high": c, "low": c, "close": c,
                    "volume": (i as u64 + 1) * 100
                })
            })
            .collect();
        parse_records(&records, &IndicatorConfig::default()).unwrap()
    }

    fn approx(a: f64, b: f64) -> bool {
        (a - b).abs() < 1e-9
    }

    #[test]
    fn test_summary() {
        let s = series(&[1.0, 2.0, 3.0]);
        let summary = SeriesSummary::of(&s);
        assert_eq!(summary.bars, 3);
        assert_eq!(summary.start_date.to_string(), "2024-01-01");
        assert_eq!(summary.end_date.to_string(), "2024-01-03");
    }

    #[test]
    fn test_basic_metrics() {
        let m = SeriesMetrics::of(&series(&[100.0, 110.0, 99.0, 120.0]));

        assert_eq!(m.latest_close, 120.0);
        assert_eq!(m.highest_close, 120.0);
        assert_eq!(m.lowest_close, 99.0);
        assert!(approx(m.mean_close, 107.25));
        assert!(approx(m.period_change.unwrap(), 20.0));
        assert!(approx(m.period_change_pct.unwrap(), 20.0));
        assert!(approx(m.max_daily_gain_pct.unwrap(), (120.0 / 99.0 - 1.0) * 100.0));
        assert!(approx(m.max_daily_loss_pct.unwrap(), -10.0));
        assert!(approx(m.max_drawdown_pct.unwrap(), -10.0));
        assert!(approx(m.max_run_up_pct.unwrap(), (120.0 / 99.0 - 1.0) * 100.0));
        assert!(m.annualized_volatility_pct.unwrap() > 0.0);
        assert!(approx(m.avg_volume, 250.0));
        assert_eq!(m.max_volume, 400);
        assert_eq!(m.latest_volume, 400);
    }

    #[test]
    fn test_single_bar() {
        let m = SeriesMetrics::of(&series(&[42.0]));
        assert_eq!(m.latest_close, 42.0);
        assert_eq!(m.period_change, None);
        assert_eq!(m.max_daily_gain_pct, None);
        assert_eq!(m.max_drawdown_pct, None);
        assert_eq!(m.max_run_up_pct, None);
        assert_eq!(m.annualized_volatility_pct, None);
        assert_eq!(m.regression_trend, None);
    }

    #[test]
    fn test_regression_strong_line() {
        let trend = RegressionTrend::fit(&[10.0, 12.0, 14.0, 16.0]).unwrap();
        assert!(approx(trend.slope, 2.0));
        assert!(approx(trend.r_squared, 1.0));
        assert_eq!(trend.direction, TrendDirection::Up);
        assert_eq!(trend.strength, TrendStrength::Strong);
    }

    #[test]
    fn test_regression_medium_and_weak() {
        // Sxy = 4, Sxx = 5, Syy = 5
        let medium = RegressionTrend::fit(&[1.0, 3.0, 2.0, 4.0]).unwrap();
        assert!(approx(medium.slope, 0.8));
        assert!(approx(medium.r_squared, 0.64));
        assert_eq!(medium.direction, TrendDirection::Up);
        assert_eq!(medium.strength, TrendStrength::Medium);

        // Sxy = -2, Sxx = 5, Syy = 5
        let weak = RegressionTrend::fit(&[4.0, 1.0, 3.0, 2.0]).unwrap();
        assert!(approx(weak.slope, -0.4));
        assert!(approx(weak.r_squared, 0.16));
        assert_eq!(weak.direction, TrendDirection::Down);
        assert_eq!(weak.strength, TrendStrength::Weak);
    }

    #[test]
    fn test_regression_flat() {
        let flat = RegressionTrend::fit(&[5.0, 5.0, 5.0]).unwrap();
        assert_eq!(flat.slope, 0.0);
        assert_eq!(flat.r_squared, 0.0);
        assert_eq!(flat.direction, TrendDirection::Flat);
        assert_eq!(flat.strength, TrendStrength::Weak);

        let symmetric = RegressionTrend::fit(&[2.0, 1.0, 1.0, 2.0]).unwrap();
        assert_eq!(symmetric.direction, TrendDirection::Flat);
    }

    #[test]
    fn test_strength_thresholds() {
        assert_eq!(TrendStrength::from_r_squared(0.71), TrendStrength::Strong);
        assert_eq!(TrendStrength::from_r_squared(0.7), TrendStrength::Medium);
        assert_eq!(TrendStrength::from_r_squared(0.41), TrendStrength::Medium);
        assert_eq!(TrendStrength::from_r_squared(0.4), TrendStrength::Weak);
        assert_eq!(TrendStrength::from_r_squared(0.0), TrendStrength::Weak);
    }

    #[test]
    fn test_falling_series_has_no_run_up() {
        let m = SeriesMetrics::of(&series(&[10.0, 9.0, 8.0]));
        assert_eq!(m.max_run_up_pct, None);
        assert!(approx(m.max_drawdown_pct.unwrap(), -20.0));
    }

    #[test]
    fn test_volatility_of_constant_returns_is_zero() {
        let m = SeriesMetrics::of(&series(&[100.0, 110.0, 121.0]));
        assert!(m.annualized_volatility_pct.unwrap().abs() < 1e-9);
    }
}
