//! Simple moving averages
//!
//! Entry `i` of a window-`w` average is the mean of `close[i-w+1..=i]` and is
//! undefined (`None`) while fewer than `w` bars are available. The rolling sum
//! is Kahan-compensated so long series stay within rounding distance of a
//! direct recomputation.

use indexmap::IndexMap;

/// Running sum with Kahan compensation
#[derive(Debug, Default, Clone, Copy)]
struct CompensatedSum {
    sum: f64,
    compensation: f64,
}

impl CompensatedSum {
    fn add(&mut self, x: f64) {
        let y = x - self.compensation;
        let t = self.sum + y;
        self.compensation = (t - self.sum) - y;
        self.sum = t;
    }

    fn value(self) -> f64 {
        self.sum
    }
}

/// Simple moving average of `values` over `window`
///
/// The output is aligned with the input. A window of zero, or one longer
/// than the input, yields only `None`.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; values.len()];
    if window == 0 || window > values.len() {
        return out;
    }

    let divisor = window as f64;
    let mut sum = CompensatedSum::default();
    for (i, &value) in values.iter().enumerate() {
        sum.add(value);
        if i >= window {
            sum.add(-values[i - window]);
        }
        if i + 1 >= window {
            out[i] = Some(sum.value() / divisor);
        }
    }
    out
}

/// One aligned average per window, in the order the windows were given
///
/// Duplicate windows are computed once.
pub fn moving_averages(values: &[f64], windows: &[usize]) -> IndexMap<usize, Vec<Option<f64>>> {
    let mut out = IndexMap::with_capacity(windows.len());
    for &window in windows {
        out.entry(window).or_insert_with(|| sma(values, window));
    }
    out
}
