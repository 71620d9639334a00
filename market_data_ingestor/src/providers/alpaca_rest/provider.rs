use std::time::Duration;

use async_trait::async_trait;
use governor::{DefaultDirectRateLimiter, Quota, RateLimiter};
use indexmap::IndexMap;
use nonzero_ext::nonzero;
use reqwest::{Client, Response, header};
use secrecy::{ExposeSecret, SecretString};
use shared_utils::env::get_secret_env_var;
use tracing::debug;

use crate::{
    models::{
        bar::{Bar, BarSeries},
        request_params::BarsRequestParams,
    },
    providers::{
        DataProvider, ProviderError, ProviderInitError,
        alpaca_rest::{
            params::{construct_params, validate_timeframe},
            response::{AlpacaBar, AlpacaLatestTradeResponse, AlpacaResponse},
        },
    },
};

const DATA_URL: &str = "https://data.alpaca.markets/v2/stocks";
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

pub struct AlpacaProvider {
    client: Client,
    // Free-tier data plan allows 200 calls per minute.
    limiter: DefaultDirectRateLimiter,
}

impl AlpacaProvider {
    /// Creates a new Alpaca provider.
    ///
    /// Reads API keys from the `APCA_API_KEY_ID` and `APCA_API_SECRET_KEY`
    /// environment variables.
    pub fn new() -> Result<Self, ProviderInitError> {
        let api_key = get_secret_env_var("APCA_API_KEY_ID")?;
        let secret_key = get_secret_env_var("APCA_API_SECRET_KEY")?;
        Self::with_credentials(&api_key, &secret_key)
    }

    pub fn with_credentials(
        api_key: &SecretString,
        secret_key: &SecretString,
    ) -> Result<Self, ProviderInitError> {
        let mut key_header = header::HeaderValue::from_str(api_key.expose_secret())?;
        key_header.set_sensitive(true);
        let mut secret_header = header::HeaderValue::from_str(secret_key.expose_secret())?;
        secret_header.set_sensitive(true);

        let mut headers = header::HeaderMap::new();
        headers.insert("APCA-API-KEY-ID", key_header);
        headers.insert("APCA-API-SECRET-KEY", secret_header);

        let client = Client::builder()
            .default_headers(headers)
            .timeout(REQUEST_TIMEOUT)
            .build()?;

        Ok(Self {
            client,
            limiter: RateLimiter::direct(Quota::per_minute(nonzero!(200u32))),
        })
    }

    async fn get(&self, url: &str, query: &[(String, String)]) -> Result<Response, ProviderError> {
        self.limiter.until_ready().await;
        let response = self.client.get(url).query(query).send().await?;

        let status = response.status();
        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "Unknown API error".to_string());
            return Err(ProviderError::Api {
                status: status.as_u16(),
                message,
            });
        }
        Ok(response)
    }
}

#[async_trait]
impl DataProvider for AlpacaProvider {
    async fn fetch_bars(&self, params: BarsRequestParams) -> Result<Vec<BarSeries>, ProviderError> {
        // Validate the timeframe before proceeding.
        validate_timeframe(&params.timeframe)?;

        let url = format!("{DATA_URL}/bars");
        let mut all_bars: IndexMap<String, Vec<AlpacaBar>> = IndexMap::new();
        let mut next_page_token: Option<String> = None;
        let mut pages = 0usize;

        loop {
            let mut query_params = construct_params(&params);
            if let Some(token) = &next_page_token {
                query_params.push(("page_token".to_string(), token.clone()));
            }

            let alpaca_response = self
                .get(&url, &query_params)
                .await?
                .json::<AlpacaResponse>()
                .await?;
            pages += 1;

            // Merge the bars from the current page into our collection.
            for (symbol, bars) in alpaca_response.bars {
                all_bars.entry(symbol).or_default().extend(bars);
            }

            match alpaca_response.next_page_token {
                Some(token) => next_page_token = Some(token),
                None => break,
            }
        }
        debug!(symbols = ?params.symbols, pages, "alpaca bars fetched");

        let result = all_bars
            .into_iter()
            .map(|(symbol, alpaca_bars)| {
                let bars = alpaca_bars
                    .into_iter()
                    .map(|ab| Bar {
                        timestamp: ab.timestamp,
                        open: ab.open,
                        high: ab.high,
                        low: ab.low,
                        close: ab.close,
                        volume: ab.volume,
                        trade_count: Some(ab.trade_count),
                        vwap: Some(ab.vwap),
                    })
                    .collect();

                BarSeries {
                    symbol,
                    timeframe: params.timeframe,
                    bars,
                }
            })
            .collect();

        Ok(result)
    }

    async fn latest_price(&self, symbol: &str) -> Result<f64, ProviderError> {
        let url = format!("{DATA_URL}/{symbol}/trades/latest");
        let latest = self
            .get(&url, &[])
            .await?
            .json::<AlpacaLatestTradeResponse>()
            .await?;
        debug!(symbol, price = latest.trade.price, at = %latest.trade.timestamp, "alpaca latest trade");

        if latest.trade.price.is_finite() && latest.trade.price > 0.0 {
            Ok(latest.trade.price)
        } else {
            Err(ProviderError::Parse(format!(
                "non-positive latest trade price {} for {symbol}",
                latest.trade.price
            )))
        }
    }
}
