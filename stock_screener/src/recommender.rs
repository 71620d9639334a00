//! Price-banded top-K recommendations.
//!
//! Rows are partitioned into the fixed [`PRICE_BANDS`]. Within a band only
//! rows with a positive cumulative return qualify; the intraday list takes the
//! [`TOP_K`] most volatile of them and the delivery list the [`TOP_K`] least
//! volatile. Both sorts are stable, so equal volatilities keep input order.

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::scanner::SummaryRow;

/// Maximum picks per band and strategy.
pub const TOP_K: usize = 10;

/// Half-open price interval `[min, max)`; `max = None` is unbounded.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PriceBand {
    pub min: f64,
    pub max: Option<f64>,
}

pub const PRICE_BANDS: [PriceBand; 5] = [
    PriceBand {
        min: 0.0,
        max: Some(500.0),
    },
    PriceBand {
        min: 500.0,
        max: Some(1000.0),
    },
    PriceBand {
        min: 1000.0,
        max: Some(1500.0),
    },
    PriceBand {
        min: 1500.0,
        max: Some(2000.0),
    },
    PriceBand {
        min: 2000.0,
        max: None,
    },
];

impl PriceBand {
    pub fn contains(&self, price: f64) -> bool {
        price >= self.min && self.max.is_none_or(|max| price < max)
    }

    /// e.g. `"Price Range 500-1000"`, `"Price Range 2000-inf"`.
    pub fn label(&self) -> String {
        match self.max {
            Some(max) => format!("Price Range {}-{}", self.min, max),
            None => format!("Price Range {}-inf", self.min),
        }
    }
}

/// The band a price falls in, if any.
pub fn band_for(price: f64) -> Option<&'static PriceBand> {
    PRICE_BANDS.iter().find(|b| b.contains(price))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Strategy {
    /// Short horizon: most volatile first.
    Intraday,
    /// Long horizon: least volatile first.
    Delivery,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntradayPick {
    pub ticker: String,
    pub price: f64,
    pub volatility: f64,
    pub mean_daily_return: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DeliveryPick {
    pub ticker: String,
    pub price: f64,
    pub cumulative_return: f64,
    pub mean_daily_return: f64,
}

/// Strategy -> band label -> ranked picks. Every band key is always present.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RecommendationSet {
    #[serde(rename = "Intraday")]
    pub intraday: IndexMap<String, Vec<IntradayPick>>,
    #[serde(rename = "Delivery")]
    pub delivery: IndexMap<String, Vec<DeliveryPick>>,
}

impl RecommendationSet {
    /// Tickers listed for `strategy` in the band labelled `band`, in rank order.
    pub fn tickers(&self, strategy: Strategy, band: &str) -> Vec<&str> {
        let tickers: Option<Vec<&str>> = match strategy {
            Strategy::Intraday => self
                .intraday
                .get(band)
                .map(|picks| picks.iter().map(|p| p.ticker.as_str()).collect()),
            Strategy::Delivery => self
                .delivery
                .get(band)
                .map(|picks| picks.iter().map(|p| p.ticker.as_str()).collect()),
        };
        tickers.unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.intraday.values().all(Vec::is_empty) && self.delivery.values().all(Vec::is_empty)
    }
}

/// Buckets enriched rows into [`PRICE_BANDS`] with up to [`TOP_K`] picks each.
pub fn recommend(rows: &[SummaryRow]) -> RecommendationSet {
    recommend_top(rows, TOP_K)
}

pub fn recommend_top(rows: &[SummaryRow], k: usize) -> RecommendationSet {
    let mut intraday = IndexMap::with_capacity(PRICE_BANDS.len());
    let mut delivery = IndexMap::with_capacity(PRICE_BANDS.len());

    for band in &PRICE_BANDS {
        let qualifying: Vec<(&SummaryRow, f64)> = rows
            .iter()
            .filter(|r| r.cumulative_return > 0.0)
            .filter_map(|r| r.price.filter(|p| band.contains(*p)).map(|p| (r, p)))
            .collect();

        let mut by_vol_desc = qualifying.clone();
        by_vol_desc.sort_by(|a, b| b.0.volatility.total_cmp(&a.0.volatility));
        let intraday_picks = by_vol_desc
            .into_iter()
            .take(k)
            .map(|(r, price)| IntradayPick {
                ticker: r.ticker.clone(),
                price,
                volatility: r.volatility,
                mean_daily_return: r.mean_daily_return,
            })
            .collect();

        let mut by_vol_asc = qualifying;
        by_vol_asc.sort_by(|a, b| a.0.volatility.total_cmp(&b.0.volatility));
        let delivery_picks = by_vol_asc
            .into_iter()
            .take(k)
            .map(|(r, price)| DeliveryPick {
                ticker: r.ticker.clone(),
                price,
                cumulative_return: r.cumulative_return,
                mean_daily_return: r.mean_daily_return,
            })
            .collect();

        intraday.insert(band.label(), intraday_picks);
        delivery.insert(band.label(), delivery_picks);
    }

    RecommendationSet { intraday, delivery }
}
