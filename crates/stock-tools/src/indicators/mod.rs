//! Technical indicators computed over a bar series
//!
//! Every function here is total: given any slice it returns an output aligned
//! with the input, with `None` wherever history is insufficient.

pub mod moving_average;
pub mod rsi;
pub mod trend;

pub use moving_average::{moving_averages, sma};
pub use rsi::rsi;
pub use trend::{Slope, TrendInputs, TrendLabel, TrendVerdict, classify};
