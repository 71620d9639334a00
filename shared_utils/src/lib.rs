//! Small helpers shared by the ingestor and the screener.

pub mod env;
