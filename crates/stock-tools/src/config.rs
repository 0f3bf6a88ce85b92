//! Configuration for stock analysis operations

use crate::error::{Result, StockError};
use agent_utils::{env_flag, env_list, env_parse};
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Most moving average windows one analysis may report
pub const MAX_MA_WINDOWS: usize = 32;

/// How the parser treats records that arrive out of date order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OrderPolicy {
    /// Sort records by date, then reject duplicates
    #[default]
    Sort,
    /// Reject any record not dated after its predecessor
    Strict,
}

/// Parameters of the technical-indicator engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndicatorConfig {
    /// Moving average windows reported per bar
    pub ma_windows: Vec<usize>,

    /// RSI lookback period
    pub rsi_period: usize,

    /// Short moving average used by the trend classifier
    pub short_window: usize,

    /// Long moving average used by the trend classifier
    pub long_window: usize,

    /// Relative MA spread at or below which the trend is sideways
    pub sideways_tolerance: f64,

    /// Maximum number of bars accepted in one invocation
    pub max_bars: usize,

    /// Ordering policy for incoming records
    pub order_policy: OrderPolicy,
}

impl Default for IndicatorConfig {
    fn default() -> Self {
        Self {
            ma_windows: vec![5, 10, 20, 60],
            rsi_period: 14,
            short_window: 5,
            long_window: 20,
            sideways_tolerance: 0.005,
            max_bars: 100_000,
            order_policy: OrderPolicy::Sort,
        }
    }
}

impl IndicatorConfig {
    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        if self.ma_windows.is_empty() {
            return Err(StockError::InvalidParameter(
                "at least one moving average window is required".to_string(),
            ));
        }
        if self.ma_windows.len() > MAX_MA_WINDOWS {
            return Err(StockError::InvalidParameter(format!(
                "at most {MAX_MA_WINDOWS} moving average windows are allowed, got {}",
                self.ma_windows.len()
            )));
        }
        if self.ma_windows.contains(&0) {
            return Err(StockError::InvalidParameter(
                "moving average windows must be at least 1".to_string(),
            ));
        }
        if self.rsi_period == 0 {
            return Err(StockError::InvalidParameter(
                "rsi_period must be at least 1".to_string(),
            ));
        }
        if self.short_window == 0 || self.long_window == 0 {
            return Err(StockError::InvalidParameter(
                "trend windows must be at least 1".to_string(),
            ));
        }
        if self.short_window >= self.long_window {
            return Err(StockError::InvalidParameter(format!(
                "short_window ({}) must be less than long_window ({})",
                self.short_window, self.long_window
            )));
        }
        if !self.sideways_tolerance.is_finite() || self.sideways_tolerance < 0.0 {
            return Err(StockError::InvalidParameter(
                "sideways_tolerance must be a non-negative number".to_string(),
            ));
        }
        if self.max_bars == 0 {
            return Err(StockError::InvalidParameter(
                "max_bars must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Every window the engine must compute: the reported windows followed by
    /// the trend windows, without duplicates
    pub fn all_windows(&self) -> Vec<usize> {
        let mut windows = Vec::with_capacity(self.ma_windows.len() + 2);
        for w in self
            .ma_windows
            .iter()
            .chain([&self.short_window, &self.long_window])
        {
            if !windows.contains(w) {
                windows.push(*w);
            }
        }
        windows
    }

    /// Read overrides from the environment
    pub fn with_env(mut self) -> Result<Self> {
        if let Some(windows) = env_list("INDICATOR_MA_WINDOWS")? {
            self.ma_windows = windows;
        }
        if let Some(period) = env_parse("INDICATOR_RSI_PERIOD")? {
            self.rsi_period = period;
        }
        if let Some(max_bars) = env_parse("INDICATOR_MAX_BARS")? {
            self.max_bars = max_bars;
        }
        Ok(self)
    }
}

/// Configuration for stock analysis operations
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StockConfig {
    /// Indicator engine parameters
    pub indicators: IndicatorConfig,

    /// Whether fetched bars are cached
    pub cache_enabled: bool,

    /// Lifetime of a cached bar sequence
    pub cache_ttl: Duration,

    /// Maximum number of cached (symbol, date range) entries
    pub cache_capacity: usize,
}

impl Default for StockConfig {
    fn default() -> Self {
        Self {
            indicators: IndicatorConfig::default(),
            cache_enabled: true,
            cache_ttl: Duration::from_secs(3600), // 1 hour
            cache_capacity: 256,
        }
    }
}

impl StockConfig {
    /// Create a new configuration builder
    pub fn builder() -> StockConfigBuilder {
        StockConfigBuilder::default()
    }

    /// Defaults overridden by `CACHE_*` and `INDICATOR_*` variables
    pub fn from_env() -> Result<Self> {
        let mut config = Self {
            indicators: IndicatorConfig::default().with_env()?,
            ..Self::default()
        };

        if let Some(enabled) = env_flag("CACHE_ENABLED")? {
            config.cache_enabled = enabled;
        }
        if let Some(secs) = env_parse::<u64>("CACHE_TTL")? {
            config.cache_ttl = Duration::from_secs(secs);
        }
        if let Some(capacity) = env_parse("CACHE_CAPACITY")? {
            config.cache_capacity = capacity;
        }

        config.validate()?;
        Ok(config)
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<()> {
        self.indicators.validate()?;

        if self.cache_enabled && self.cache_capacity == 0 {
            return Err(StockError::ConfigError(
                "cache_capacity must be greater than 0 when caching is enabled".to_string(),
            ));
        }
        if self.cache_enabled && self.cache_ttl.is_zero() {
            return Err(StockError::ConfigError(
                "cache_ttl must be greater than 0 when caching is enabled".to_string(),
            ));
        }

        Ok(())
    }
}

/// Builder for StockConfig
#[derive(Debug, Default)]
pub struct StockConfigBuilder {
    ma_windows: Option<Vec<usize>>,
    rsi_period: Option<usize>,
    trend_windows: Option<(usize, usize)>,
    sideways_tolerance: Option<f64>,
    max_bars: Option<usize>,
    order_policy: Option<OrderPolicy>,
    cache_enabled: Option<bool>,
    cache_ttl: Option<Duration>,
    cache_capacity: Option<usize>,
}

impl StockConfigBuilder {
    /// Set the reported moving average windows
    pub fn ma_windows(mut self, windows: impl Into<Vec<usize>>) -> Self {
        self.ma_windows = Some(windows.into());
        self
    }

    /// Set the RSI period
    pub fn rsi_period(mut self, period: usize) -> Self {
        self.rsi_period = Some(period);
        self
    }

    /// Set the short and long windows used for trend classification
    pub fn trend_windows(mut self, short: usize, long: usize) -> Self {
        self.trend_windows = Some((short, long));
        self
    }

    /// Set the sideways tolerance (relative, e.g. 0.005 for 0.5%)
    pub fn sideways_tolerance(mut self, tolerance: f64) -> Self {
        self.sideways_tolerance = Some(tolerance);
        self
    }

    /// Set the maximum accepted series length
    pub fn max_bars(mut self, max_bars: usize) -> Self {
        self.max_bars = Some(max_bars);
        self
    }

    /// Set the record ordering policy
    pub fn order_policy(mut self, policy: OrderPolicy) -> Self {
        self.order_policy = Some(policy);
        self
    }

    /// Enable or disable the bar cache
    pub fn cache_enabled(mut self, enabled: bool) -> Self {
        self.cache_enabled = Some(enabled);
        self
    }

    /// Set cache TTL
    pub fn cache_ttl(mut self, duration: Duration) -> Self {
        self.cache_ttl = Some(duration);
        self
    }

    /// Set cache capacity
    pub fn cache_capacity(mut self, capacity: usize) -> Self {
        self.cache_capacity = Some(capacity);
        self
    }

    /// Build the configuration
    pub fn build(self) -> Result<StockConfig> {
        let defaults = StockConfig::default();
        let ind = defaults.indicators;
        let (short_window, long_window) = self
            .trend_windows
            .unwrap_or((ind.short_window, ind.long_window));

        let config = StockConfig {
            indicators: IndicatorConfig {
                ma_windows: self.ma_windows.unwrap_or(ind.ma_windows),
                rsi_period: self.rsi_period.unwrap_or(ind.rsi_period),
                short_window,
                long_window,
                sideways_tolerance: self.sideways_tolerance.unwrap_or(ind.sideways_tolerance),
                max_bars: self.max_bars.unwrap_or(ind.max_bars),
                order_policy: self.order_policy.unwrap_or(ind.order_policy),
            },
            cache_enabled: self.cache_enabled.unwrap_or(defaults.cache_enabled),
            cache_ttl: self.cache_ttl.unwrap_or(defaults.cache_ttl),
            cache_capacity: self.cache_capacity.unwrap_or(defaults.cache_capacity),
        };

        config.validate()?;
        Ok(config)
    }
}
