//! Market data collaborator for the screener.
//!
//! The crate exposes a vendor-agnostic [`providers::DataProvider`] trait plus the
//! canonical [`models`] every provider maps its responses into. Concrete
//! providers live under [`providers`]: Alpaca's REST API is always compiled in,
//! Yahoo Finance sits behind the default `yahoo` feature.

pub mod models;
pub mod providers;
