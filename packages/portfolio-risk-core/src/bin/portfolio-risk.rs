//! Portfolio Risk CLI - analyze holdings and print JSON results.
//!
//! Logs go to stderr so stdout stays machine-readable.

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use portfolio_risk_core::{ApiResponse, EngineConfig, HoldingInput, RiskEngine};
use serde::Serialize;
use serde_json::json;
use std::io::Read;
use std::path::{Path, PathBuf};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "portfolio-risk")]
#[command(about = "Portfolio risk metrics and recommendations")]
#[command(version)]
struct Cli {
    /// Config file (defaults to $PORTFOLIO_RISK_CONFIG or the user config dir)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a JSON array of holdings
    Analyze {
        /// Input file, or "-" for stdin
        #[arg(short, long, default_value = "-")]
        input: String,
    },
    /// Annualized volatility of a price series
    Volatility {
        /// Comma-separated prices, oldest first
        #[arg(short, long)]
        prices: String,
    },
    /// Print the effective engine configuration
    Config,
}

fn main() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let output = match run(cli) {
        Ok(data) => render(&ApiResponse::ok(data)),
        Err(e) => {
            tracing::error!("{:#}", e);
            render(&ApiResponse::<()>::err(format!("{:#}", e)))
        }
    };

    println!("{}", output);
}

fn run(cli: Cli) -> Result<serde_json::Value> {
    let config = load_config(cli.config.as_deref())?;
    let engine = RiskEngine::new(config);

    match cli.command {
        Commands::Analyze { input } => handle_analyze(&engine, &input),
        Commands::Volatility { prices } => handle_volatility(&engine, &prices),
        Commands::Config => Ok(serde_json::to_value(engine.config())?),
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    let config = match path {
        Some(path) => EngineConfig::load_from_path(path),
        None => EngineConfig::load(),
    };
    config.context("failed to load engine config")
}

fn handle_analyze(engine: &RiskEngine, input: &str) -> Result<serde_json::Value> {
    let raw = if input == "-" {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("failed to read holdings from stdin")?;
        buf
    } else {
        std::fs::read_to_string(input).with_context(|| format!("failed to read {}", input))?
    };

    let holdings: Vec<HoldingInput> =
        serde_json::from_str(&raw).context("holdings must be a JSON array")?;
    let analysis = engine.analyze(&holdings);
    Ok(serde_json::to_value(analysis)?)
}

fn handle_volatility(engine: &RiskEngine, prices: &str) -> Result<serde_json::Value> {
    let prices = prices
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| s.parse::<f64>().with_context(|| format!("invalid price: {}", s)))
        .collect::<Result<Vec<f64>>>()?;

    Ok(json!({
        "points": prices.len(),
        "volatility": engine.volatility(&prices),
    }))
}

fn render<T: Serialize>(response: &ApiResponse<T>) -> String {
    serde_json::to_string_pretty(response)
        .unwrap_or_else(|e| format!("{{\"ok\":false,\"error\":\"{}\"}}", e))
}
