//! Typed daily bars and the ordered series they form

use chrono::NaiveDate;
use serde::Serialize;

/// One trading day
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct Bar {
    pub date: NaiveDate,
    pub open: f64,
    pub high: f64,
    pub low: f64,
    pub close: f64,
    pub volume: u64,
}

/// Bars in strictly ascending date order
///
/// Only the parser builds a `Series`, so every instance satisfies the
/// ordering and OHLC invariants. Indicators read it and never write back.
#[derive(Debug, Clone, PartialEq)]
pub struct Series {
    bars: Vec<Bar>,
}

impl Series {
    /// Wrap bars already checked by the parser
    pub(crate) fn from_validated(bars: Vec<Bar>) -> Self {
        debug_assert!(!bars.is_empty());
        debug_assert!(bars.windows(2).all(|w| w[0].date < w[1].date));
        Self { bars }
    }

    pub fn bars(&self) -> &[Bar] {
        &self.bars
    }

    pub fn len(&self) -> usize {
        self.bars.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bars.is_empty()
    }

    pub fn closes(&self) -> Vec<f64> {
        self.bars.iter().map(|b| b.close).collect()
    }

    pub fn dates(&self) -> Vec<NaiveDate> {
        self.bars.iter().map(|b| b.date).collect()
    }

    /// The most recent bar
    pub fn last(&self) -> Option<&Bar> {
        self.bars.last()
    }

    pub fn first(&self) -> Option<&Bar> {
        self.bars.first()
    }
}
