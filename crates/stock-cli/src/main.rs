//! Command-line interface for the stock tools
//!
//! # Usage
//!
//! ```bash
//! # Indicators for bars in a file, with custom MA windows
//! stock-tools analyze --input bars.json --ma 5,10,20 --pretty
//!
//! # Bars from stdin
//! cat bars.json | stock-tools analyze
//!
//! # Tool definitions as advertised to an agent
//! stock-tools tools
//! ```
//!
//! Results go to stdout; logs go to stderr (`RUST_LOG` overrides the level).

use agent_tools::ToolRegistry;
use anyhow::Context;
use async_trait::async_trait;
use clap::{Parser, Subcommand, ValueEnum};
use serde_json::{Value, json};
use std::path::PathBuf;
use std::sync::Arc;
use stock_tools::{
    BarSource, DateRange, FinancialReportSource, ReportType, StockConfig, StockError, StockSymbol,
    SymbolResolver,
};
use tokio::io::AsyncReadExt;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "stock-tools")]
#[command(about = "Technical indicators for daily stock data", long_about = None)]
struct Args {
    /// Log output format
    #[arg(long, value_enum, default_value_t = LogFormatArg::Pretty, global = true)]
    log_format: LogFormatArg,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Calculate indicators for a JSON array of daily bars
    Analyze {
        /// Input file; stdin when omitted
        #[arg(short, long)]
        input: Option<PathBuf>,

        /// Moving average windows, comma separated
        #[arg(long, value_delimiter = ',')]
        ma: Option<Vec<usize>>,

        /// RSI period
        #[arg(long)]
        rsi_period: Option<usize>,

        /// Pretty-print the JSON result
        #[arg(long)]
        pretty: bool,
    },
    /// Print the tool definitions
    Tools,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
enum LogFormatArg {
    Pretty,
    Json,
}

/// Stand-in collaborator for a CLI with no market-data provider
struct NoProvider;

#[async_trait]
impl SymbolResolver for NoProvider {
    async fn resolve(&self, _name_or_code: &str) -> stock_tools::Result<Option<StockSymbol>> {
        Err(StockError::ProviderError(
            "no market data provider configured".to_string(),
        ))
    }
}

#[async_trait]
impl BarSource for NoProvider {
    async fn fetch_daily(&self, _code: &str, _range: &DateRange) -> stock_tools::Result<Vec<Value>> {
        Err(StockError::ProviderError(
            "no market data provider configured".to_string(),
        ))
    }
}

#[async_trait]
impl FinancialReportSource for NoProvider {
    async fn fetch_report(
        &self,
        _code: &str,
        _report: ReportType,
        _limit: usize,
    ) -> stock_tools::Result<Vec<Value>> {
        Err(StockError::ProviderError(
            "no market data provider configured".to_string(),
        ))
    }
}

async fn read_input(input: Option<PathBuf>) -> anyhow::Result<String> {
    match input {
        Some(path) => tokio::fs::read_to_string(&path)
            .await
            .with_context(|| format!("failed to read {}", path.display())),
        None => {
            let mut buf = String::new();
            tokio::io::stdin()
                .read_to_string(&mut buf)
                .await
                .context("failed to read stdin")?;
            Ok(buf)
        }
    }
}

async fn analyze(
    registry: &ToolRegistry,
    input: Option<PathBuf>,
    ma: Option<Vec<usize>>,
    rsi_period: Option<usize>,
) -> anyhow::Result<Value> {
    let payload = read_input(input).await?;

    let mut params = json!({ "daily_data_json": payload });
    if let Some(windows) = ma {
        params["ma_windows"] = json!(windows);
    }
    if let Some(period) = rsi_period {
        params["rsi_period"] = json!(period);
    }

    let result = registry
        .call("calculate_technical_indicators", params)
        .await?;
    Ok(result)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let format = match args.log_format {
        LogFormatArg::Pretty => agent_utils::LogFormat::Pretty,
        LogFormatArg::Json => agent_utils::LogFormat::Json,
    };
    agent_utils::init_tracing_with(format, "warn,stock_tools=info");

    let config = Arc::new(StockConfig::from_env().context("invalid configuration")?);
    let provider = Arc::new(NoProvider);
    let registry =
        stock_tools::build_registry(config, provider.clone(), provider.clone(), provider);

    match args.command {
        Command::Analyze {
            input,
            ma,
            rsi_period,
            pretty,
        } => {
            let result = analyze(&registry, input, ma, rsi_period).await?;
            info!("Analysis complete");
            let out = if pretty {
                serde_json::to_string_pretty(&result)?
            } else {
                serde_json::to_string(&result)?
            };
            println!("{out}");
        }
        Command::Tools => {
            let definitions = registry.definitions();
            println!("{}", serde_json::to_string_pretty(&definitions)?);
        }
    }

    Ok(())
}
