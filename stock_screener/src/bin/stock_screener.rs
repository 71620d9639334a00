use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};
use stock_screener::{
    config::{ScanConfig, load_config_path},
    providers::{ProviderId, build_provider},
    render::render_text,
    run_scan,
    universe::{default_universe, load_universe_path, universe_from_list},
};
use tracing::info;

#[derive(Parser)]
#[command(version, about = "Momentum/volatility stock screener")]
struct Cli {
    #[command(subcommand)]
    cmd: Cmd,
}

#[derive(Subcommand)]
enum Cmd {
    /// Scan a universe and print price-banded recommendations.
    Scan(ScanCmd),
}

#[derive(Args)]
struct ScanCmd {
    /// Scan settings (TOML); built-in defaults when omitted.
    #[arg(long, value_name = "FILE")]
    config: Option<PathBuf>,
    /// Universe file (TOML with `tickers = [...]`); built-in NSE list when omitted.
    #[arg(long, value_name = "FILE", conflicts_with = "tickers")]
    universe: Option<PathBuf>,
    /// Comma-separated tickers, e.g. `TCS.NS,INFY.NS`.
    #[arg(long, value_name = "LIST")]
    tickers: Option<String>,
    /// Market data provider; falls back to $SCREENER_PROVIDER, then yahoo.
    #[arg(long, value_enum)]
    provider: Option<ProviderArg>,
    #[arg(long, value_enum, default_value_t = Format::Text)]
    format: Format,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProviderArg {
    Yahoo,
    Alpaca,
}

impl From<ProviderArg> for ProviderId {
    fn from(p: ProviderArg) -> Self {
        match p {
            ProviderArg::Yahoo => ProviderId::Yahoo,
            ProviderArg::Alpaca => ProviderId::Alpaca,
        }
    }
}

#[derive(Clone, Copy, ValueEnum)]
enum Format {
    Text,
    Json,
}

// Logs go to stderr so stdout stays machine-readable.
fn init_logging() {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::filter::EnvFilter::builder()
                .with_default_directive(tracing_subscriber::filter::LevelFilter::INFO.into())
                .from_env_lossy(),
        )
        .with_writer(std::io::stderr)
        .compact()
        .init()
}

async fn scan(cmd: ScanCmd) -> Result<()> {
    let cfg = match &cmd.config {
        Some(path) => load_config_path(path)?,
        None => ScanConfig::default(),
    };

    let universe = match (&cmd.universe, &cmd.tickers) {
        (Some(path), _) => {
            let (universe, report) = load_universe_path(path)?;
            info!(?report, "universe loaded");
            universe
        }
        (None, Some(list)) => universe_from_list(list)?,
        (None, None) => default_universe()?,
    };

    let provider_id = match cmd.provider {
        Some(p) => p.into(),
        None => ProviderId::from_env()?,
    };
    let provider = build_provider(provider_id)
        .with_context(|| format!("failed to initialise {provider_id} provider"))?;
    info!(provider = %provider_id, tickers = universe.tickers.len(), "starting scan");

    let set = run_scan(provider.as_ref(), &universe.tickers, &cfg).await?;

    match cmd.format {
        Format::Text => print!("{}", render_text(&set)),
        Format::Json => println!("{}", serde_json::to_string_pretty(&set)?),
    }
    Ok(())
}

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();
    let cli = Cli::parse();

    match cli.cmd {
        Cmd::Scan(cmd) => scan(cmd).await?,
    }

    Ok(())
}
