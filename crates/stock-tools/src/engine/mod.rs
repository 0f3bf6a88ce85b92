//! Technical-indicator engine
//!
//! Raw records flow through the series parser, the moving average and RSI
//! calculators, the trend classifier, and finally the result assembler.

pub mod analysis_engine;
pub mod result;

pub use analysis_engine::IndicatorEngine;
pub use result::{AnalysisParameters, AnalysisResult, IndicatorPoint};
