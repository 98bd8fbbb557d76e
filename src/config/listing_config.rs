//! Coin listing and highlights configuration parsing from environment variables.

use crate::domain::errors::ConfigError;
use crate::domain::market::{ServerOrder, SortMode};
use anyhow::{Context, Result};
use std::env;
use std::str::FromStr;
use std::time::Duration;

/// Listing environment configuration
#[derive(Debug, Clone)]
pub struct ListingEnvConfig {
    pub page_size: u32,
    /// Initial listing order; only API-served orders are accepted
    pub default_sort: ServerOrder,
    pub search_debounce: Duration,
    pub dedupe_ids: bool,
}

impl Default for ListingEnvConfig {
    fn default() -> Self {
        Self {
            page_size: 50,
            default_sort: ServerOrder::MarketCapDesc,
            search_debounce: Duration::from_millis(300),
            dedupe_ids: true,
        }
    }
}

impl ListingEnvConfig {
    pub fn from_env() -> Result<Self> {
        let page_size = parse_positive_u32("LISTING_PAGE_SIZE", 50)?;

        let sort_str =
            env::var("LISTING_DEFAULT_SORT").unwrap_or_else(|_| "market_cap_desc".to_string());
        let default_sort =
            match SortMode::from_str(&sort_str).context("Failed to parse LISTING_DEFAULT_SORT")? {
                SortMode::Server(order) => order,
                SortMode::Client(_) => {
                    return Err(ConfigError::InvalidValue {
                        key: "LISTING_DEFAULT_SORT",
                        value: sort_str,
                        reason: "the initial listing order must be one the API can serve"
                            .to_string(),
                    }
                    .into());
                }
            };

        let debounce_ms = env::var("SEARCH_DEBOUNCE_MS")
            .unwrap_or_else(|_| "300".to_string())
            .parse::<u64>()
            .context("Failed to parse SEARCH_DEBOUNCE_MS")?;

        let dedupe_ids = env::var("LISTING_DEDUPE_IDS")
            .unwrap_or_else(|_| "true".to_string())
            .parse::<bool>()
            .context("Failed to parse LISTING_DEDUPE_IDS")?;

        Ok(Self {
            page_size,
            default_sort,
            search_debounce: Duration::from_millis(debounce_ms),
            dedupe_ids,
        })
    }
}

/// Highlights environment configuration
#[derive(Debug, Clone)]
pub struct HighlightsEnvConfig {
    pub snapshot_size: u32,
    pub list_len: usize,
}

impl Default for HighlightsEnvConfig {
    fn default() -> Self {
        Self {
            snapshot_size: 250,
            list_len: 10,
        }
    }
}

impl HighlightsEnvConfig {
    pub fn from_env() -> Result<Self> {
        Ok(Self {
            snapshot_size: parse_positive_u32("HIGHLIGHTS_SNAPSHOT_SIZE", 250)?,
            list_len: parse_positive_u32("HIGHLIGHTS_LIST_LEN", 10)? as usize,
        })
    }
}

fn parse_positive_u32(key: &'static str, default: u32) -> Result<u32> {
    let raw = env::var(key).unwrap_or_else(|_| default.to_string());
    match raw.trim().parse::<u32>() {
        Ok(value) if value > 0 => Ok(value),
        _ => Err(ConfigError::InvalidValue {
            key,
            value: raw,
            reason: "expected a positive integer".to_string(),
        }
        .into()),
    }
}
