//! Property-based tests for the indicator engine

use chrono::{Days, NaiveDate};
use proptest::prelude::*;
use serde_json::{Value, json};
use stock_tools::indicators::{rsi, sma};
use stock_tools::{IndicatorConfig, IndicatorEngine};

fn arb_closes(min_len: usize, max_len: usize) -> impl Strategy<Value = Vec<f64>> {
    prop::collection::vec(1.0..1000.0_f64, min_len..=max_len)
}

fn records(closes: &[f64], volumes: &[u64]) -> Vec<Value> {
    let start = NaiveDate::from_ymd_opt(2020, 1, 1).unwrap();
    closes
        .iter()
        .zip(volumes)
        .enumerate()
        .map(|(i, (&c, &v))| {
            json!({
                "date": (start + Days::new(i as u64)).to_string(),
                "open": c, "high": c * 1.01, "low": c * 0.99, "close": c,
                "volume": v
            })
        })
        .collect()
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(256))]

    /// Defined SMA values equal the trailing mean; earlier values are undefined
    #[test]
    fn prop_sma_is_trailing_mean(data in arb_closes(1, 120), window in 1usize..=30) {
        let out = sma(&data, window);
        prop_assert_eq!(out.len(), data.len());
        for (i, value) in out.iter().enumerate() {
            if i + 1 < window {
                prop_assert!(value.is_none());
            } else {
                let mean = data[i + 1 - window..=i].iter().sum::<f64>() / window as f64;
                let v = value.unwrap();
                prop_assert!((v - mean).abs() <= 1e-9 * mean.abs().max(1.0));
            }
        }
    }

    /// Every defined RSI value lies in [0, 100]
    #[test]
    fn prop_rsi_bounded(data in arb_closes(2, 200), period in 1usize..=30) {
        for value in rsi(&data, period).into_iter().flatten() {
            prop_assert!((0.0..=100.0).contains(&value));
        }
    }

    /// RSI is defined from index `period` onward
    #[test]
    fn prop_rsi_warmup(data in arb_closes(1, 80), period in 1usize..=20) {
        let out = rsi(&data, period);
        for (i, value) in out.iter().enumerate() {
            prop_assert_eq!(value.is_some(), i >= period);
        }
    }

    /// Two runs give bit-identical output
    #[test]
    fn prop_deterministic(data in arb_closes(2, 150)) {
        let volumes = vec![1_000; data.len()];
        let input = records(&data, &volumes);
        let engine = IndicatorEngine::default();

        let a = engine.analyze_records(&input).unwrap();
        let b = engine.analyze_records(&input).unwrap();

        for (x, y) in a.indicators.iter().zip(&b.indicators) {
            prop_assert_eq!(x.rsi.map(f64::to_bits), y.rsi.map(f64::to_bits));
            for (mx, my) in x.ma.values().zip(y.ma.values()) {
                prop_assert_eq!(mx.map(f64::to_bits), my.map(f64::to_bits));
            }
        }
        prop_assert_eq!(a.trend.label, b.trend.label);
    }

    /// Volume has no influence on the trend label
    #[test]
    fn prop_label_ignores_volume(
        (data, volumes) in arb_closes(1, 80).prop_flat_map(|d| {
            let n = d.len();
            (Just(d), prop::collection::vec(0u64..1_000_000, n))
        })
    ) {
        let engine = IndicatorEngine::new(IndicatorConfig {
            ma_windows: vec![5, 20],
            ..IndicatorConfig::default()
        }).unwrap();

        let mut reversed = volumes.clone();
        reversed.reverse();

        let a = engine.analyze_records(&records(&data, &volumes)).unwrap();
        let b = engine.analyze_records(&records(&data, &reversed)).unwrap();
        prop_assert_eq!(a.trend.label, b.trend.label);
    }

    /// Every date gets exactly one point, in order
    #[test]
    fn prop_points_align(data in arb_closes(1, 100)) {
        let volumes = vec![1; data.len()];
        let result = IndicatorEngine::default()
            .analyze_records(&records(&data, &volumes))
            .unwrap();

        prop_assert_eq!(result.indicators.len(), data.len());
        prop_assert_eq!(result.dates.len(), data.len());
        for (point, date) in result.indicators.iter().zip(&result.dates) {
            prop_assert_eq!(point.date, *date);
        }
    }
}
