//! Universe scan: fetch, compute, and summarize every ticker.
//!
//! Tickers are processed on a bounded fan-out (`concurrency` in flight at
//! once). A ticker whose fetch fails, times out, or yields too little data
//! is skipped and logged; it never fails the scan. Rows come back sorted by
//! ticker so that downstream ranking ties do not depend on completion order.

use chrono::{DateTime, Utc};
use futures::{StreamExt, stream};
use market_data_ingestor::{
    models::{
        bar::Bar,
        request_params::{BarsRequestParams, ProviderParams},
    },
    providers::{DataProvider, ProviderError},
};
use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::{
    config::ScanConfig,
    errors::ConfigError,
    indicators::{Signal, TickerSeries, clean_bars},
    retry::{RetryPolicy, call_with_retry},
    volatility::{defined, mean, volatility},
};

/// Summary metrics for one ticker over the scan window.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SummaryRow {
    pub ticker: String,
    /// Sample standard deviation of daily returns, in percent.
    pub volatility: f64,
    /// Mean of the defined daily returns, in percent.
    pub mean_daily_return: f64,
    /// Growth from first to last bar, in percent.
    pub cumulative_return: f64,
    /// Crossover signal at the last bar.
    pub last_signal: Option<Signal>,
    /// Current quoted price; filled in by price enrichment.
    pub price: Option<f64>,
}

impl SummaryRow {
    pub fn with_price(self, price: Option<f64>) -> Self {
        Self { price, ..self }
    }
}

/// Reduces one ticker's bars to a [`SummaryRow`].
///
/// Returns `None` when the cleaned series cannot support a volatility
/// estimate (fewer than two defined daily returns).
pub fn summarize(
    ticker: &str,
    bars: Vec<Bar>,
    short_window: usize,
    long_window: usize,
) -> Option<SummaryRow> {
    let bars = clean_bars(bars);
    if bars.is_empty() {
        return None;
    }
    let series = TickerSeries::compute(ticker, &bars, short_window, long_window);
    let volatility = volatility(&series.daily_return)?;
    let mean_daily_return = mean(&defined(&series.daily_return))?;
    let cumulative_return = series.final_cumulative_return()? * 100.0;

    Some(SummaryRow {
        ticker: series.ticker.clone(),
        volatility,
        mean_daily_return,
        cumulative_return,
        last_signal: series.last_signal(),
        price: None,
    })
}

/// Bars for `ticker`, or the provider error after retries are exhausted.
async fn fetch_ticker_bars(
    provider: &dyn DataProvider,
    ticker: &str,
    cfg: &ScanConfig,
    window: (DateTime<Utc>, DateTime<Utc>),
    policy: &RetryPolicy,
) -> Result<Vec<Bar>, ProviderError> {
    let params = BarsRequestParams {
        symbols: vec![ticker.to_string()],
        timeframe: cfg.timeframe,
        start: window.0,
        end: window.1,
        provider_specific: ProviderParams::None,
    };

    let series = call_with_retry(policy, ticker, || provider.fetch_bars(params.clone())).await?;
    Ok(series
        .into_iter()
        .find(|s| s.symbol == ticker)
        .map(|s| s.bars)
        .unwrap_or_default())
}

/// Scans `tickers` ending at `end`, returning one row per ticker with usable data.
///
/// Only a configuration problem (an unusable lookback) fails the scan.
pub async fn scan_universe(
    provider: &dyn DataProvider,
    tickers: &[String],
    cfg: &ScanConfig,
    end: DateTime<Utc>,
) -> Result<Vec<SummaryRow>, ConfigError> {
    let window = cfg.lookback.window_ending(end)?;
    let policy = cfg.retry_policy();
    let policy = &policy;

    let results: Vec<Option<SummaryRow>> = stream::iter(tickers)
        .map(|ticker| async move {
            match fetch_ticker_bars(provider, ticker, cfg, window, policy).await {
                Ok(bars) if bars.is_empty() => {
                    debug!(ticker = %ticker, "no bars returned, skipping");
                    None
                }
                Ok(bars) => {
                    let n = bars.len();
                    let row = summarize(ticker, bars, cfg.short_window, cfg.long_window);
                    if row.is_none() {
                        debug!(ticker = %ticker, bars = n, "too few bars for volatility, skipping");
                    }
                    row
                }
                Err(e) => {
                    warn!(ticker = %ticker, error = %e, "fetch failed, skipping");
                    None
                }
            }
        })
        .buffer_unordered(cfg.concurrency)
        .collect()
        .await;

    let mut rows: Vec<SummaryRow> = results.into_iter().flatten().collect();
    rows.sort_by(|a, b| a.ticker.cmp(&b.ticker));

    info!(
        tickers = tickers.len(),
        rows = rows.len(),
        skipped = tickers.len() - rows.len(),
        lookback = %cfg.lookback,
        timeframe = %cfg.timeframe,
        "universe scan complete"
    );
    Ok(rows)
}
