//! CoinGecko API configuration parsing from environment variables.

use anyhow::{Context, Result};
use std::env;
use url::Url;

pub const DEFAULT_COINGECKO_BASE_URL: &str = "https://api.coingecko.com/api/v3";

/// CoinGecko API configuration
#[derive(Debug, Clone)]
pub struct CoinGeckoConfig {
    pub base_url: String,
    /// Demo plan key, sent as `x-cg-demo-api-key` when present
    pub api_key: Option<String>,
    pub vs_currency: String,
    pub timeout_secs: u64,
    pub connect_timeout_secs: u64,
}

impl Default for CoinGeckoConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_COINGECKO_BASE_URL.to_string(),
            api_key: None,
            vs_currency: "usd".to_string(),
            timeout_secs: 30,
            connect_timeout_secs: 10,
        }
    }
}

impl CoinGeckoConfig {
    pub fn from_env() -> Result<Self> {
        let base_url = env::var("COINGECKO_BASE_URL")
            .unwrap_or_else(|_| DEFAULT_COINGECKO_BASE_URL.to_string());
        Url::parse(&base_url).context(format!("Invalid COINGECKO_BASE_URL: {}", base_url))?;

        Ok(Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key: env::var("COINGECKO_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            vs_currency: env::var("VS_CURRENCY")
                .unwrap_or_else(|_| "usd".to_string())
                .to_lowercase(),
            timeout_secs: Self::parse_u64("HTTP_TIMEOUT_SECS", 30)?,
            connect_timeout_secs: Self::parse_u64("HTTP_CONNECT_TIMEOUT_SECS", 10)?,
        })
    }

    fn parse_u64(key: &str, default: u64) -> Result<u64> {
        env::var(key)
            .unwrap_or_else(|_| default.to_string())
            .parse::<u64>()
            .context(format!("Failed to parse {}", key))
    }
}
