//! Per-ticker indicator columns derived from daily closes.
//!
//! All columns are aligned with the input bars. A value that cannot be
//! computed yet (the warm-up of a moving average, the first return) is
//! `None`; nothing here produces NaN.

use chrono::{DateTime, Utc};
use market_data_ingestor::models::bar::Bar;
use serde::{Deserialize, Serialize};

/// Moving-average crossover signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Signal {
    Buy,
    Sell,
}

impl Signal {
    /// `+1` for [`Signal::Buy`], `-1` for [`Signal::Sell`].
    pub fn value(self) -> i8 {
        match self {
            Signal::Buy => 1,
            Signal::Sell => -1,
        }
    }
}

/// One ticker's closes plus every derived column.
#[derive(Debug, Clone, PartialEq)]
pub struct TickerSeries {
    pub ticker: String,
    pub timestamps: Vec<DateTime<Utc>>,
    pub closes: Vec<f64>,
    pub short_ma: Vec<Option<f64>>,
    pub long_ma: Vec<Option<f64>>,
    pub signal: Vec<Option<Signal>>,
    /// Percent change from the previous close.
    pub daily_return: Vec<Option<f64>>,
    /// Compounded growth since the first bar, as a fraction (0.05 = +5%).
    pub cumulative_return: Vec<f64>,
}

impl TickerSeries {
    /// Computes every column from bars that are already clean (see [`clean_bars`]).
    pub fn compute(
        ticker: impl Into<String>,
        bars: &[Bar],
        short_window: usize,
        long_window: usize,
    ) -> Self {
        let timestamps = bars.iter().map(|b| b.timestamp).collect();
        let closes: Vec<f64> = bars.iter().map(|b| b.close).collect();
        let short_ma = sma(&closes, short_window);
        let long_ma = sma(&closes, long_window);
        let signal = crossover_signals(&short_ma, &long_ma);
        let daily_return = daily_returns(&closes);
        let cumulative_return = cumulative_returns(&daily_return);

        Self {
            ticker: ticker.into(),
            timestamps,
            closes,
            short_ma,
            long_ma,
            signal,
            daily_return,
            cumulative_return,
        }
    }

    pub fn len(&self) -> usize {
        self.closes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.closes.is_empty()
    }

    /// Cumulative return at the last bar, or `None` for an empty series.
    pub fn final_cumulative_return(&self) -> Option<f64> {
        self.cumulative_return.last().copied()
    }

    pub fn last_signal(&self) -> Option<Signal> {
        self.signal.last().copied().flatten()
    }
}

/// Sorts bars by time, keeps the last bar for a repeated timestamp, and drops
/// closes that are not strictly positive and finite.
pub fn clean_bars(mut bars: Vec<Bar>) -> Vec<Bar> {
    bars.retain(|b| b.close.is_finite() && b.close > 0.0);
    // stable, so later duplicates stay after earlier ones
    bars.sort_by_key(|b| b.timestamp);

    let mut out: Vec<Bar> = Vec::with_capacity(bars.len());
    for bar in bars {
        match out.last_mut() {
            Some(prev) if prev.timestamp == bar.timestamp => *prev = bar,
            _ => out.push(bar),
        }
    }
    out
}

/// Trailing simple moving average; the first `window - 1` entries are `None`.
pub fn sma(values: &[f64], window: usize) -> Vec<Option<f64>> {
    if window == 0 {
        return vec![None; values.len()];
    }
    let warmup = (window - 1).min(values.len());
    let mut out = vec![None; warmup];
    out.extend(
        values
            .windows(window)
            .map(|w| Some(w.iter().sum::<f64>() / window as f64)),
    );
    out
}

/// Buy when the short average is above the long one, Sell otherwise.
///
/// A defined short average next to an undefined long one yields Sell; an
/// undefined short average yields no signal.
pub fn crossover_signals(short: &[Option<f64>], long: &[Option<f64>]) -> Vec<Option<Signal>> {
    short
        .iter()
        .zip(long)
        .map(|(s, l)| match (s, l) {
            (None, _) => None,
            (Some(s), Some(l)) if s > l => Some(Signal::Buy),
            (Some(_), _) => Some(Signal::Sell),
        })
        .collect()
}

/// Percent change between consecutive closes; `None` at index 0.
pub fn daily_returns(closes: &[f64]) -> Vec<Option<f64>> {
    let mut out = Vec::with_capacity(closes.len());
    if closes.is_empty() {
        return out;
    }
    out.push(None);
    out.extend(closes.windows(2).map(|w| Some((w[1] / w[0] - 1.0) * 100.0)));
    out
}

/// Running product of `1 + r/100`, minus one. Undefined returns count as flat.
pub fn cumulative_returns(daily: &[Option<f64>]) -> Vec<f64> {
    let mut growth = 1.0;
    daily
        .iter()
        .map(|r| {
            growth *= 1.0 + r.unwrap_or(0.0) / 100.0;
            growth - 1.0
        })
        .collect()
}
