use chrono::{DateTime, Utc};
use market_data_ingestor::providers::DataProvider;
use tracing::info;

use crate::{
    config::ScanConfig,
    enrichment::enrich_prices,
    errors::ScanError,
    recommender::{RecommendationSet, recommend},
    scanner::{SummaryRow, scan_universe},
};

/// Everything one scan produced: enriched rows plus the bucketed picks.
#[derive(Debug, Clone, PartialEq)]
pub struct ScanOutcome {
    pub rows: Vec<SummaryRow>,
    pub recommendations: RecommendationSet,
}

/// Scan `universe`, price the surviving rows, and bucket them.
///
/// The configuration is validated before any provider call; that is the
/// only way this fails.
pub async fn run_scan(
    provider: &dyn DataProvider,
    universe: &[String],
    cfg: &ScanConfig,
) -> Result<RecommendationSet, ScanError> {
    run_scan_at(provider, universe, cfg, Utc::now())
        .await
        .map(|outcome| outcome.recommendations)
}

/// [`run_scan`] with an explicit window end, returning the rows as well.
pub async fn run_scan_at(
    provider: &dyn DataProvider,
    universe: &[String],
    cfg: &ScanConfig,
    end: DateTime<Utc>,
) -> Result<ScanOutcome, ScanError> {
    cfg.validate()?;

    let rows = scan_universe(provider, universe, cfg, end).await?;
    let rows = enrich_prices(provider, rows, cfg).await;
    let recommendations = recommend(&rows);

    info!(
        universe = universe.len(),
        rows = rows.len(),
        empty = recommendations.is_empty(),
        "scan finished"
    );
    Ok(ScanOutcome {
        rows,
        recommendations,
    })
}
