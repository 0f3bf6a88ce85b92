//! Inclusive date ranges for bar retrieval

use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::{Result, StockError};
use crate::series::parser::parse_date_str;

/// Inclusive `[start, end]` range with `start <= end`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct DateRange {
    start: NaiveDate,
    end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Result<Self> {
        if start > end {
            return Err(StockError::InvalidParameter(format!(
                "start_date {start} is after end_date {end}"
            )));
        }
        Ok(Self { start, end })
    }

    /// Build a range from tool arguments
    ///
    /// A missing end defaults to `today`; an end in the future is clamped to
    /// `today`.
    pub fn normalize(start: NaiveDate, end: Option<NaiveDate>, today: NaiveDate) -> Result<Self> {
        let end = end.map_or(today, |end| end.min(today));
        Self::new(start, end)
    }

    /// Parse string arguments and normalize against the local date
    pub fn parse(start: &str, end: Option<&str>) -> Result<Self> {
        let start = parse_arg("start_date", start)?;
        let end = end
            .filter(|s| !s.trim().is_empty())
            .map(|s| parse_arg("end_date", s))
            .transpose()?;
        Self::normalize(start, end, Local::now().date_naive())
    }

    pub fn start(&self) -> NaiveDate {
        self.start
    }

    pub fn end(&self) -> NaiveDate {
        self.end
    }
}

fn parse_arg(name: &str, raw: &str) -> Result<NaiveDate> {
    parse_date_str(raw).map_err(|reason| StockError::InvalidParameter(format!("{name}: {reason}")))
}
