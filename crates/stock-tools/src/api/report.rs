//! Financial statement kinds

use serde::{Deserialize, Serialize};

use crate::error::{Result, StockError};

/// One of the three periodic financial statements
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReportType {
    BalanceSheet,
    ProfitSheet,
    CashFlowSheet,
}

impl ReportType {
    pub const ALL: [Self; 3] = [Self::BalanceSheet, Self::ProfitSheet, Self::CashFlowSheet];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BalanceSheet => "balance_sheet",
            Self::ProfitSheet => "profit_sheet",
            Self::CashFlowSheet => "cash_flow_sheet",
        }
    }

    /// Expand a tool argument: `all` selects every statement, in
    /// [`ReportType::ALL`] order
    pub fn select(raw: &str) -> Result<Vec<Self>> {
        let name = raw.trim().to_ascii_lowercase();
        if name == "all" {
            return Ok(Self::ALL.to_vec());
        }
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == name)
            .map(|kind| vec![kind])
            .ok_or_else(|| {
                StockError::InvalidParameter(format!(
                    "report_type must be balance_sheet, profit_sheet, cash_flow_sheet or all, got {raw:?}"
                ))
            })
    }
}

impl std::fmt::Display for ReportType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_select_all() {
        assert_eq!(
            ReportType::select("all").unwrap(),
            vec![
                ReportType::BalanceSheet,
                ReportType::ProfitSheet,
                ReportType::CashFlowSheet
            ]
        );
    }

    #[test]
    fn test_select_single() {
        assert_eq!(
            ReportType::select(" Profit_Sheet ").unwrap(),
            vec![ReportType::ProfitSheet]
        );
        assert_eq!(
            ReportType::select("cash_flow_sheet").unwrap(),
            vec![ReportType::CashFlowSheet]
        );
    }

    #[test]
    fn test_select_unknown() {
        let err = ReportType::select("income_statement").unwrap_err();
        assert_eq!(err.code(), "InvalidParameter");
        assert!(err.to_string().contains("income_statement"));
    }

    #[test]
    fn test_serde_names_match() {
        for kind in ReportType::ALL {
            assert_eq!(serde_json::to_value(kind).unwrap(), kind.as_str());
        }
    }
}
