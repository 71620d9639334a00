//! Yahoo Finance chart API provider.
//!
//! Yahoo has no start/end query in the chart endpoint the SDK wraps; it takes
//! an interval and a coarse `range` token instead. [`YahooProvider`] picks the
//! smallest range covering the request and trims the quotes to `[start, end)`
//! afterwards. Exchange suffixes (`.NS`, `.BO`, ...) pass straight through.

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use nonzero_ext::nonzero;
use tracing::debug;
use yahoo_finance_api::{Quote, YahooConnector, YahooError};

use crate::{
    models::{
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
        timeframe::{TimeFrame, TimeFrameUnit},
    },
    providers::{DataProvider, ProviderError, ProviderInitError},
};

pub struct YahooProvider {
    connector: YahooConnector,
    limiter: DefaultDirectRateLimiter,
}

impl YahooProvider {
    pub fn new() -> Result<Self, ProviderInitError> {
        let connector =
            YahooConnector::new().map_err(|e| ProviderInitError::Connector(e.to_string()))?;
        Ok(Self {
            connector,
            limiter: RateLimiter::direct(Quota::per_second(nonzero!(5u32))),
        })
    }
}

/// Maps a timeframe onto one of Yahoo's fixed chart intervals.
pub fn interval_for(tf: &TimeFrame) -> Result<&'static str, ProviderError> {
    let interval = match (tf.unit, tf.amount) {
        (TimeFrameUnit::Minute, 1) => "1m",
        (TimeFrameUnit::Minute, 2) => "2m",
        (TimeFrameUnit::Minute, 5) => "5m",
        (TimeFrameUnit::Minute, 15) => "15m",
        (TimeFrameUnit::Minute, 30) => "30m",
        (TimeFrameUnit::Minute, 90) => "90m",
        (TimeFrameUnit::Hour, 1) => "1h",
        (TimeFrameUnit::Day, 1) => "1d",
        (TimeFrameUnit::Day, 5) => "5d",
        (TimeFrameUnit::Week, 1) => "1wk",
        (TimeFrameUnit::Month, 1) => "1mo",
        (TimeFrameUnit::Month, 3) => "3mo",
        _ => {
            return Err(ProviderError::Validation(format!(
                "Yahoo Finance does not serve {tf} bars"
            )));
        }
    };
    Ok(interval)
}

/// Smallest Yahoo `range` token spanning at least `days` calendar days.
pub fn range_for_span(days: i64) -> &'static str {
    const RANGES: [(i64, &str); 9] = [
        (1, "1d"),
        (5, "5d"),
        (31, "1mo"),
        (92, "3mo"),
        (183, "6mo"),
        (366, "1y"),
        (731, "2y"),
        (1827, "5y"),
        (3653, "10y"),
    ];
    RANGES
        .iter()
        .find(|(max_days, _)| days <= *max_days)
        .map_or("max", |(_, token)| *token)
}

fn quote_to_bar(q: &Quote) -> Option<Bar> {
    let timestamp = Utc.timestamp_opt(q.timestamp, 0).single()?;
    Some(Bar {
        timestamp,
        open: q.open,
        high: q.high,
        low: q.low,
        close: q.close,
        volume: q.volume as f64,
        trade_count: None,
        vwap: None,
    })
}

/// Sorts an SDK failure into unknown symbol, transient, or hard API error.
///
/// The connector reports HTTP failures as `FetchFailed("<code> <reason>")`;
/// anything without a leading status code is a transport problem.
pub fn classify_error(symbol: &str, err: YahooError) -> ProviderError {
    match err {
        YahooError::NoQuotes | YahooError::NoResult | YahooError::EmptyDataSet => {
            ProviderError::SymbolNotFound(symbol.to_string())
        }
        YahooError::FetchFailed(msg) => {
            let status = msg
                .split_whitespace()
                .next()
                .and_then(|code| code.parse::<u16>().ok());
            match status {
                Some(404) => ProviderError::SymbolNotFound(symbol.to_string()),
                Some(status) if status == 429 || status >= 500 => {
                    ProviderError::Upstream(format!("{symbol}: {msg}"))
                }
                Some(status) => ProviderError::Api {
                    status,
                    message: format!("{symbol}: {msg}"),
                },
                None => ProviderError::Upstream(format!("{symbol}: {msg}")),
            }
        }
        other => ProviderError::Upstream(format!("{symbol}: {other}")),
    }
}

fn within(bars: Vec<Bar>, start: DateTime<Utc>, end: DateTime<Utc>) -> Vec<Bar> {
    bars.into_iter()
        .filter(|b| b.timestamp >= start && b.timestamp < end)
        .collect()
}

#[async_trait]
impl DataProvider for YahooProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        let interval = interval_for(&params.timeframe)?;
        // The range is anchored at "now", so it must reach back to `start`.
        let span_days = (Utc::now() - params.start).num_days() + 1;
        let range = range_for_span(span_days);

        let mut out = Vec::with_capacity(params.symbols.len());
        for symbol in &params.symbols {
            self.limiter.until_ready().await;
            let quotes = self
                .connector
                .get_quote_range(symbol, interval, range)
                .await
                .and_then(|response| response.quotes());

            // Delisted or unknown symbols yield an empty series.
            let bars = match quotes.map_err(|e| classify_error(symbol, e)) {
                Ok(quotes) => quotes.iter().filter_map(quote_to_bar).collect(),
                Err(ProviderError::SymbolNotFound(_)) => {
                    debug!(symbol = %symbol, "yahoo has no data for symbol");
                    Vec::new()
                }
                Err(e) => return Err(e),
            };
            let bars = within(bars, params.start, params.end);
            debug!(symbol = %symbol, interval, range, bars = bars.len(), "yahoo bars fetched");

            out.push(BarSeries {
                symbol: symbol.clone(),
                timeframe: params.timeframe,
                bars,
            });
        }
        Ok(out)
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, ProviderError> {
        self.limiter.until_ready().await;
        let response = self
            .connector
            .get_latest_quotes(symbol, "1d")
            .await
            .map_err(|e| classify_error(symbol, e))?;
        let quote = response
            .last_quote()
            .map_err(|e| classify_error(symbol, e))?;

        if quote.close.is_finite() && quote.close > 0.0 {
            Ok(quote.close)
        } else {
            Err(ProviderError::Parse(format!(
                "non-positive latest close {} for {symbol}",
                quote.close
            )))
        }
    }
}
