//! Attaches the current quoted price to each summary row.

use futures::{StreamExt, stream};
use market_data_ingestor::providers::DataProvider;
use tracing::{debug, info};

use crate::{config::ScanConfig, retry::call_with_retry, scanner::SummaryRow};

/// Looks up a price for every row, keeping row order.
///
/// A failed or non-finite lookup leaves `price` as `None`; the row is kept
/// and simply matches no price band later on.
pub async fn enrich_prices(
    provider: &dyn DataProvider,
    rows: Vec<SummaryRow>,
    cfg: &ScanConfig,
) -> Vec<SummaryRow> {
    let policy = cfg.retry_policy();
    let policy = &policy;

    let enriched: Vec<SummaryRow> = stream::iter(rows)
        .map(|row| async move {
            let price = match call_with_retry(policy, &row.ticker, || {
                provider.latest_price(&row.ticker)
            })
            .await
            {
                Ok(p) if p.is_finite() => Some(p),
                Ok(p) => {
                    debug!(ticker = %row.ticker, price = p, "discarding non-finite price");
                    None
                }
                Err(e) => {
                    debug!(ticker = %row.ticker, error = %e, "price lookup failed");
                    None
                }
            };
            row.with_price(price)
        })
        .buffered(cfg.concurrency)
        .collect()
        .await;

    let priced = enriched.iter().filter(|r| r.price.is_some()).count();
    info!(rows = enriched.len(), priced, "price enrichment complete");
    enriched
}
