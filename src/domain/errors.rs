use thiserror::Error;

/// Errors raised while talking to the market data provider.
///
/// Both variants are surfaced to the user as the same generic message per
/// component; the detail only goes to the logs.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MarketDataError {
    /// Transport failure or a non-success HTTP status.
    #[error("Network failure: {reason}")]
    Network { reason: String },

    /// The response body did not have the expected shape.
    #[error("Unexpected response from {endpoint}: {reason}")]
    Decode { endpoint: String, reason: String },
}

impl MarketDataError {
    pub fn network(reason: impl Into<String>) -> Self {
        MarketDataError::Network {
            reason: reason.into(),
        }
    }

    pub fn decode(endpoint: impl Into<String>, reason: impl Into<String>) -> Self {
        MarketDataError::Decode {
            endpoint: endpoint.into(),
            reason: reason.into(),
        }
    }

    pub fn is_network(&self) -> bool {
        matches!(self, MarketDataError::Network { .. })
    }
}

/// Errors related to configuration values
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid value for {key}: '{value}' ({reason})")]
    InvalidValue {
        key: &'static str,
        value: String,
        reason: String,
    },
}
