//! Discrete trend classification as of the last bar

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Number of recent short-MA values that must move strictly in one direction
/// for a trend to count as strong
pub const SLOPE_POINTS: usize = 3;

/// Trend label for the whole series
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TrendLabel {
    StrongUptrend,
    Uptrend,
    Sideways,
    Downtrend,
    StrongDowntrend,
    InsufficientData,
}

impl TrendLabel {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::StrongUptrend => "STRONG_UPTREND",
            Self::Uptrend => "UPTREND",
            Self::Sideways => "SIDEWAYS",
            Self::Downtrend => "DOWNTREND",
            Self::StrongDowntrend => "STRONG_DOWNTREND",
            Self::InsufficientData => "INSUFFICIENT_DATA",
        }
    }
}

impl std::fmt::Display for TrendLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Direction of the short moving average over its last [`SLOPE_POINTS`]
/// defined values
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Slope {
    Rising,
    Falling,
    /// Neither strictly rising nor strictly falling
    Mixed,
}

/// Slope of the most recent defined values, `None` with fewer than
/// [`SLOPE_POINTS`] of them
pub fn slope(values: &[Option<f64>]) -> Option<Slope> {
    let mut recent: Vec<f64> = values.iter().rev().flatten().take(SLOPE_POINTS).copied().collect();
    if recent.len() < SLOPE_POINTS {
        return None;
    }
    recent.reverse();

    if recent.windows(2).all(|w| w[0] < w[1]) {
        Some(Slope::Rising)
    } else if recent.windows(2).all(|w| w[0] > w[1]) {
        Some(Slope::Falling)
    } else {
        Some(Slope::Mixed)
    }
}

/// Everything the classifier looks at
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TrendInputs {
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub short_slope: Option<Slope>,
    pub rsi: Option<f64>,
}

/// Classify the trend
///
/// Checked in order: missing or non-finite input, sideways band, direction,
/// strength.
/// `tolerance` is relative to the long MA (0.005 = 0.5%).
pub fn classify(inputs: &TrendInputs, tolerance: f64) -> TrendLabel {
    let (Some(short), Some(long), Some(rsi)) = (inputs.short_ma, inputs.long_ma, inputs.rsi)
    else {
        return TrendLabel::InsufficientData;
    };
    if !(short.is_finite() && long.is_finite() && rsi.is_finite()) {
        return TrendLabel::InsufficientData;
    }

    if (short - long).abs() <= tolerance * long.abs() {
        return TrendLabel::Sideways;
    }

    if short > long {
        if inputs.short_slope == Some(Slope::Rising) && rsi > 50.0 {
            TrendLabel::StrongUptrend
        } else {
            TrendLabel::Uptrend
        }
    } else if inputs.short_slope == Some(Slope::Falling) && rsi < 50.0 {
        TrendLabel::StrongDowntrend
    } else {
        TrendLabel::Downtrend
    }
}

/// Classification of a series as of its last bar, with the values behind it
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TrendVerdict {
    pub label: TrendLabel,
    pub as_of_date: NaiveDate,
    pub close: f64,
    pub short_window: usize,
    pub long_window: usize,
    pub short_ma: Option<f64>,
    pub long_ma: Option<f64>,
    pub rsi: Option<f64>,
    pub short_ma_slope: Option<Slope>,
    /// `(short - long) / long` in percent
    pub ma_spread_pct: Option<f64>,
}

impl TrendVerdict {
    /// Classify from the latest values of aligned indicator series
    pub fn assess(
        as_of_date: NaiveDate,
        close: f64,
        (short_window, short_ma): (usize, &[Option<f64>]),
        (long_window, long_ma): (usize, &[Option<f64>]),
        rsi: &[Option<f64>],
        tolerance: f64,
    ) -> Self {
        let inputs = TrendInputs {
            short_ma: short_ma.last().copied().flatten(),
            long_ma: long_ma.last().copied().flatten(),
            short_slope: slope(short_ma),
            rsi: rsi.last().copied().flatten(),
        };

        let ma_spread_pct = match (inputs.short_ma, inputs.long_ma) {
            (Some(s), Some(l)) if l != 0.0 => Some((s - l) / l * 100.0),
            _ => None,
        };

        Self {
            label: classify(&inputs, tolerance),
            as_of_date,
            close,
            short_window,
            long_window,
            short_ma: inputs.short_ma,
            long_ma: inputs.long_ma,
            rsi: inputs.rsi,
            short_ma_slope: inputs.short_slope,
            ma_spread_pct,
        }
    }
}
