//! Provider registry that maps a ProviderId to a concrete market data provider.
use std::{fmt, str::FromStr};

use market_data_ingestor::providers::{
    DataProvider, ProviderInitError, alpaca_rest::AlpacaProvider, yahoo::YahooProvider,
};
use serde::{Deserialize, Serialize};
use shared_utils::env::env_var_or;

/// Environment variable consulted when no provider is named explicitly.
pub const PROVIDER_ENV: &str = "SCREENER_PROVIDER";

/// Which upstream to use (serde snake_case).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ProviderId {
    /// Yahoo Finance chart API; serves NSE `.NS` symbols without credentials.
    #[default]
    Yahoo,
    /// Alpaca market data API; needs `APCA_API_KEY_ID` / `APCA_API_SECRET_KEY`.
    Alpaca,
}

impl ProviderId {
    /// Reads [`PROVIDER_ENV`], defaulting to Yahoo when unset.
    pub fn from_env() -> Result<Self, UnknownProvider> {
        env_var_or(PROVIDER_ENV, "yahoo").parse()
    }
}

#[derive(Debug, thiserror::Error)]
#[error("unknown provider '{0}' (expected yahoo or alpaca)")]
pub struct UnknownProvider(String);

impl FromStr for ProviderId {
    type Err = UnknownProvider;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "yahoo" => Ok(ProviderId::Yahoo),
            "alpaca" => Ok(ProviderId::Alpaca),
            other => Err(UnknownProvider(other.to_string())),
        }
    }
}

impl fmt::Display for ProviderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ProviderId::Yahoo => "yahoo",
            ProviderId::Alpaca => "alpaca",
        })
    }
}

/// Build and return a boxed data provider corresponding to the supplied ProviderId.
pub fn build_provider(id: ProviderId) -> Result<Box<dyn DataProvider>, ProviderInitError> {
    match id {
        ProviderId::Yahoo => {
            let p = YahooProvider::new()?;
            Ok(Box::new(p))
        }
        ProviderId::Alpaca => {
            let p = AlpacaProvider::new()?;
            Ok(Box::new(p))
        }
    }
}
