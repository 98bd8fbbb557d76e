//! Configuration module for Coinscope.
//!
//! This module provides structured configuration loading from environment variables,
//! organized by concern: CoinGecko access, Listing and Highlights.

mod coingecko_config;
mod listing_config;

pub use coingecko_config::{CoinGeckoConfig, DEFAULT_COINGECKO_BASE_URL};
pub use listing_config::{HighlightsEnvConfig, ListingEnvConfig};

use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;

/// Where market data comes from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Mode {
    Mock,
    Live,
}

impl FromStr for Mode {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mock" => Ok(Mode::Mock),
            "live" => Ok(Mode::Live),
            _ => anyhow::bail!("Invalid MODE: {}. Must be 'mock' or 'live'", s),
        }
    }
}

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    pub mode: Mode,
    pub coingecko: CoinGeckoConfig,
    pub listing: ListingEnvConfig,
    pub highlights: HighlightsEnvConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            mode: Mode::Live,
            coingecko: CoinGeckoConfig::default(),
            listing: ListingEnvConfig::default(),
            highlights: HighlightsEnvConfig::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self> {
        let mode_str = env::var("MODE").unwrap_or_else(|_| "live".to_string());
        let mode = Mode::from_str(&mode_str)?;

        let coingecko = CoinGeckoConfig::from_env().context("Failed to load CoinGecko config")?;
        let listing = ListingEnvConfig::from_env().context("Failed to load listing config")?;
        let highlights =
            HighlightsEnvConfig::from_env().context("Failed to load highlights config")?;

        Ok(Self {
            mode,
            coingecko,
            listing,
            highlights,
        })
    }

    /// A configuration backed by the in-process mock market
    pub fn mock() -> Self {
        Self {
            mode: Mode::Mock,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mode_parsing() {
        assert_eq!(Mode::from_str("mock").unwrap(), Mode::Mock);
        assert_eq!(Mode::from_str("LIVE").unwrap(), Mode::Live);
        assert!(Mode::from_str("binance").is_err());
    }

    #[test]
    fn test_mock_config() {
        let config = Config::mock();
        assert_eq!(config.mode, Mode::Mock);
        assert_eq!(config.listing.page_size, 50);
    }
}
