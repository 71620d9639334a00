#![cfg(feature = "yahoo")]
use chrono::Utc;
use market_data_ingestor::{
    models::{lookback::Lookback, request_params::BarsRequestParams, timeframe::TimeFrame},
    providers::{DataProvider, yahoo::YahooProvider},
};
use serial_test::serial;

// Hits the public chart endpoint; run with `--ignored` when online.
#[tokio::test]
#[serial]
#[ignore]
async fn test_yahoo_provider_fetches_nse_month() {
    let provider = YahooProvider::new().expect("connector");
    let params =
        BarsRequestParams::trailing("RELIANCE.NS", TimeFrame::day(), Lookback::one_month(), Utc::now())
            .unwrap();
    let start = params.start;

    let series = provider.fetch_bars(params).await.expect("fetch");
    assert_eq!(series.len(), 1);
    assert!(!series[0].is_empty());
    assert!(series[0].bars.iter().all(|b| b.timestamp >= start));

    let price = provider.latest_price("RELIANCE.NS").await.expect("quote");
    assert!(price > 0.0);
}
