use std::time::Duration;

use shared_utils::env::MissingEnvVarError;
use thiserror::Error;

/// Errors that can occur during the creation of a provider instance.
#[derive(Debug, Error)]
pub enum ProviderInitError {
    /// missed environment variable.
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(#[from] MissingEnvVarError),

    /// failed to init reqwest client
    #[error("Failed to build HTTP client: {0}")]
    ClientBuild(#[from] reqwest::Error),

    /// API key contains invalid characters.
    #[error("Invalid API key format: {0}")]
    InvalidApiKey(#[from] reqwest::header::InvalidHeaderValue),

    /// The vendor SDK refused to construct its client.
    #[error("Failed to initialise provider connector: {0}")]
    Connector(String),
}

/// Errors that can occur within a `DataProvider` implementation.
#[derive(Debug, Error)]
pub enum ProviderError {
    /// An error during an API request (e.g., network failure, timeout).
    #[error("API request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider's API answered with a non-success status.
    #[error("API error ({status}): {message}")]
    Api { status: u16, message: String },

    /// The request parameters were invalid for this specific provider.
    #[error("Invalid parameters for provider: {0}")]
    Validation(String),

    /// A vendor SDK call failed before a usable response came back.
    #[error("Upstream request failed: {0}")]
    Upstream(String),

    /// The provider does not know the symbol, or has nothing for it.
    #[error("Symbol not found: {0}")]
    SymbolNotFound(String),

    /// The response could not be turned into canonical models.
    #[error("Failed to parse provider response: {0}")]
    Parse(String),

    /// The call did not finish within the allotted time.
    #[error("Request timed out after {0:?}")]
    Timeout(Duration),

    /// An internal error occurred while processing data within the provider.
    #[error("Internal provider error: {0}")]
    Internal(String),
}

impl ProviderError {
    /// Whether retrying the same request later could succeed.
    ///
    /// Timeouts, connection failures, HTTP 429 and 5xx responses are transient;
    /// everything else is not.
    pub fn is_retryable(&self) -> bool {
        match self {
            ProviderError::Timeout(_) | ProviderError::Upstream(_) => true,
            ProviderError::Request(e) => {
                e.is_timeout()
                    || e.is_connect()
                    || e.status()
                        .is_some_and(|s| s.as_u16() == 429 || s.is_server_error())
            }
            ProviderError::Api { status, .. } => *status == 429 || (500..600).contains(status),
            ProviderError::Validation(_)
            | ProviderError::SymbolNotFound(_)
            | ProviderError::Parse(_)
            | ProviderError::Internal(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn classifies_retryable_errors() {
        assert!(ProviderError::Timeout(Duration::from_secs(1)).is_retryable());
        assert!(ProviderError::Upstream("connection reset".into()).is_retryable());
        assert!(
            ProviderError::Api {
                status: 429,
                message: "too many requests".into()
            }
            .is_retryable()
        );
        assert!(
            ProviderError::Api {
                status: 503,
                message: "unavailable".into()
            }
            .is_retryable()
        );
        assert!(
            !ProviderError::Api {
                status: 404,
                message: "not found".into()
            }
            .is_retryable()
        );
        assert!(!ProviderError::Validation("bad timeframe".into()).is_retryable());
        assert!(!ProviderError::SymbolNotFound("MINDTREE.NS".into()).is_retryable());
        assert!(!ProviderError::Parse("bad json".into()).is_retryable());
    }
}
