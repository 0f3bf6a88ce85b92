//! Relative Strength Index with Wilder smoothing
//!
//! ```text
//! delta[i]  = close[i] - close[i-1]
//! gain[i]   = max(delta[i], 0)      loss[i] = max(-delta[i], 0)
//!
//! avg_gain[p] = mean(gain[1..=p])   avg_loss[p] = mean(loss[1..=p])
//! avg_gain[i] = (avg_gain[i-1] * (p-1) + gain[i]) / p      for i > p
//!
//! rsi = 100                            if avg_loss == 0 and avg_gain > 0
//!     = 50                             if both are 0
//!     = 100 - 100 / (1 + avg_gain / avg_loss)
//! ```
//!
//! The first `p` entries are undefined. The recurrence depends on every
//! earlier value, so it is computed in one forward pass.

/// Default lookback period
pub const DEFAULT_PERIOD: usize = 14;

/// RSI of `closes` over `period`, aligned with the input
///
/// A period of zero, or a series with `period` or fewer values, yields only
/// `None`.
pub fn rsi(closes: &[f64], period: usize) -> Vec<Option<f64>> {
    let mut out = vec![None; closes.len()];
    if period == 0 || closes.len() <= period {
        return out;
    }

    let p = period as f64;
    let (mut avg_gain, mut avg_loss) = (0.0, 0.0);
    for i in 1..=period {
        let (gain, loss) = split_delta(closes[i] - closes[i - 1]);
        avg_gain += gain;
        avg_loss += loss;
    }
    avg_gain /= p;
    avg_loss /= p;
    out[period] = Some(rsi_value(avg_gain, avg_loss));

    for i in period + 1..closes.len() {
        let (gain, loss) = split_delta(closes[i] - closes[i - 1]);
        avg_gain = (avg_gain * (p - 1.0) + gain) / p;
        avg_loss = (avg_loss * (p - 1.0) + loss) / p;
        out[i] = Some(rsi_value(avg_gain, avg_loss));
    }

    out
}

fn split_delta(delta: f64) -> (f64, f64) {
    if delta > 0.0 {
        (delta, 0.0)
    } else if delta < 0.0 {
        (0.0, -delta)
    } else {
        (0.0, 0.0)
    }
}

fn rsi_value(avg_gain: f64, avg_loss: f64) -> f64 {
    if avg_loss == 0.0 {
        if avg_gain > 0.0 { 100.0 } else { 50.0 }
    } else {
        100.0 - 100.0 / (1.0 + avg_gain / avg_loss)
    }
}
