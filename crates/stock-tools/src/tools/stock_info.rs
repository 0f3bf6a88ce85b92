//! Tool for resolving a stock name or code

use agent_core::Result as AgentResult;
use agent_tools::Tool;
use async_trait::async_trait;
use serde::Deserialize;
use serde_json::{Value, json};
use std::sync::Arc;
use tracing::{info, warn};

use crate::api::SymbolResolver;
use crate::error::{Result, StockError};

/// Looks up the standardized name and code of a stock
pub struct StockInfoTool {
    resolver: Arc<dyn SymbolResolver>,
}

#[derive(Debug, Deserialize)]
struct StockInfoParams {
    name_or_code: String,
}

impl StockInfoTool {
    pub fn new(resolver: Arc<dyn SymbolResolver>) -> Self {
        Self { resolver }
    }

    async fn lookup(&self, params: StockInfoParams) -> Result<Value> {
        let query = params.name_or_code.trim();
        if query.is_empty() {
            return Err(StockError::InvalidParameter(
                "name_or_code must not be empty".to_string(),
            ));
        }

        let symbol = self
            .resolver
            .resolve(query)
            .await?
            .ok_or_else(|| StockError::SymbolNotFound(query.to_string()))?;

        info!(name = %symbol.name, code = %symbol.code, "Resolved stock");
        Ok(serde_json::to_value(symbol)?)
    }
}

#[async_trait]
impl Tool for StockInfoTool {
    async fn execute(&self, params: Value) -> AgentResult<Value> {
        let params: StockInfoParams = serde_json::from_value(params)
            .map_err(|e| agent_core::Error::InvalidInput(format!("Invalid parameters: {e}")))?;

        self.lookup(params).await.map_err(|e| {
            warn!(error = %e, "Stock lookup failed");
            e.into()
        })
    }

    fn name(&self) -> &'static str {
        "get_stock_info"
    }

    fn description(&self) -> &'static str {
        "Search for a stock by name or code to get its standardized name and code. \
         Use this first when unsure about the stock code."
    }

    fn input_schema(&self) -> Value {
        json!({
            "type": "object",
            "properties": {
                "name_or_code": {
                    "type": "string",
                    "description": "Stock name (e.g. '茅台') or code (e.g. '600519')"
                }
            },
            "required": ["name_or_code"]
        })
    }
}
