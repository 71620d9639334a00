//! Ticker universe: parsing, normalization, and loading.
//!
//! A universe file is a TOML document with a single `tickers` array:
//!
//! ```toml
//! tickers = ["RELIANCE.NS", "TCS.NS", "INFY.NS"]
//! ```
//!
//! Normalization trims whitespace, rejects empty entries, and drops repeated
//! tickers keeping the first occurrence. The scanner itself does not dedupe;
//! a repeated ticker handed to it directly produces a repeated row.

use std::{collections::HashSet, path::Path};

use anyhow::{Context, bail};
use serde::{Deserialize, Serialize};

const DEFAULT_UNIVERSE: &str = include_str!("../universe/nse.toml");

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Universe {
    pub tickers: Vec<String>,
}

/// What [`normalize_universe`] changed.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct NormalizationReport {
    /// Entries that carried leading or trailing whitespace.
    pub tickers_trimmed: usize,
    /// Entries dropped because an identical ticker came earlier.
    pub duplicates_dropped: usize,
}

/// Trim and dedupe `universe.tickers` in place, preserving first-occurrence order.
///
/// Errors:
/// - A ticker that is empty after trimming
pub fn normalize_universe(universe: &mut Universe) -> anyhow::Result<NormalizationReport> {
    let mut report = NormalizationReport::default();
    let mut seen = HashSet::new();
    let mut out = Vec::with_capacity(universe.tickers.len());

    for (i, raw) in std::mem::take(&mut universe.tickers).into_iter().enumerate() {
        let ticker = raw.trim();
        if ticker.is_empty() {
            bail!("ticker #{} is empty after trimming", i + 1);
        }
        if ticker.len() != raw.len() {
            report.tickers_trimmed += 1;
        }
        if seen.insert(ticker.to_string()) {
            out.push(ticker.to_string());
        } else {
            report.duplicates_dropped += 1;
        }
    }

    universe.tickers = out;
    Ok(report)
}

/// Parse and normalize a universe from a TOML string.
pub fn load_universe_str(toml_str: &str) -> anyhow::Result<(Universe, NormalizationReport)> {
    let mut universe: Universe =
        toml::from_str(toml_str).context("failed to parse universe TOML")?;
    let report = normalize_universe(&mut universe).context("normalize_universe failed")?;
    Ok((universe, report))
}

/// Read a universe TOML file from disk, parse, and normalize it.
pub fn load_universe_path(path: impl AsRef<Path>) -> anyhow::Result<(Universe, NormalizationReport)> {
    let text = std::fs::read_to_string(path.as_ref())
        .with_context(|| format!("read universe file {}", path.as_ref().display()))?;
    load_universe_str(&text)
}

/// The built-in NSE universe (Yahoo Finance `.NS` symbols), normalized.
pub fn default_universe() -> anyhow::Result<Universe> {
    load_universe_str(DEFAULT_UNIVERSE)
        .map(|(universe, _)| universe)
        .context("built-in universe is invalid")
}

/// Universe from a comma-separated list such as `"TCS.NS, INFY.NS"`.
pub fn universe_from_list(list: &str) -> anyhow::Result<Universe> {
    let mut universe = Universe {
        tickers: list.split(',').map(str::to_string).collect(),
    };
    normalize_universe(&mut universe)?;
    Ok(universe)
}
