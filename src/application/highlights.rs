//! Highlights Aggregator
//!
//! Ranks a single market snapshot into the home page lists: top gainers,
//! top losers, highest volume and best 7 day performers, alongside the
//! trending coins reported by the API.

use crate::config::HighlightsEnvConfig;
use crate::domain::errors::MarketDataError;
use crate::domain::market::coin::compare_keys;
use crate::domain::market::{CoinSummary, ServerOrder};
use crate::domain::ports::{ChangeWindow, ListCoinsQuery, MarketDataService};
use std::cmp::Ordering;
use std::sync::Arc;
use tracing::{info, warn};

pub const HIGHLIGHTS_FAILURE_MESSAGE: &str = "Failed to load highlights";

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Highlights {
    pub top_gainers: Vec<CoinSummary>,
    pub top_losers: Vec<CoinSummary>,
    pub highest_volume: Vec<CoinSummary>,
    pub trending: Vec<CoinSummary>,
    pub top_7d: Vec<CoinSummary>,
}

impl Highlights {
    /// Builds every list from a snapshot and the trending feed.
    pub fn from_snapshot(
        snapshot: &[CoinSummary],
        trending: Vec<CoinSummary>,
        list_len: usize,
    ) -> Self {
        Self {
            top_gainers: rank(snapshot, list_len, |a, b| {
                compare_keys(a.price_change_percent_24h, b.price_change_percent_24h, true)
            }),
            top_losers: rank(snapshot, list_len, |a, b| {
                compare_keys(a.price_change_percent_24h, b.price_change_percent_24h, false)
            }),
            highest_volume: rank(snapshot, list_len, |a, b| {
                compare_keys(Some(a.total_volume), Some(b.total_volume), true)
            }),
            trending: trending.into_iter().take(list_len).collect(),
            top_7d: rank(snapshot, list_len, |a, b| {
                compare_keys(a.price_change_percent_7d, b.price_change_percent_7d, true)
            }),
        }
    }
}

/// Stable sort of a copy of `coins`, truncated to `limit`.
pub fn rank<F>(coins: &[CoinSummary], limit: usize, compare: F) -> Vec<CoinSummary>
where
    F: Fn(&CoinSummary, &CoinSummary) -> Ordering,
{
    let mut ranked: Vec<&CoinSummary> = coins.iter().collect();
    ranked.sort_by(|a, b| compare(a, b));
    ranked.into_iter().take(limit).cloned().collect()
}

#[derive(Debug, Clone)]
pub struct HighlightsSettings {
    pub currency: String,
    pub snapshot_size: u32,
    pub list_len: usize,
}

impl Default for HighlightsSettings {
    fn default() -> Self {
        let env = HighlightsEnvConfig::default();
        Self {
            currency: "usd".to_string(),
            snapshot_size: env.snapshot_size,
            list_len: env.list_len,
        }
    }
}

impl HighlightsSettings {
    pub fn new(currency: impl Into<String>, config: &HighlightsEnvConfig) -> Self {
        Self {
            currency: currency.into(),
            snapshot_size: config.snapshot_size,
            list_len: config.list_len,
        }
    }

    pub fn snapshot_query(&self) -> ListCoinsQuery {
        ListCoinsQuery {
            currency: self.currency.clone(),
            order_by: ServerOrder::MarketCapDesc,
            page: 1,
            page_size: self.snapshot_size,
            include_sparkline: false,
            change_windows: vec![ChangeWindow::Day, ChangeWindow::Week],
        }
    }
}

pub struct HighlightsAggregator {
    service: Arc<dyn MarketDataService>,
    settings: HighlightsSettings,
}

impl HighlightsAggregator {
    pub fn new(service: Arc<dyn MarketDataService>, settings: HighlightsSettings) -> Self {
        Self { service, settings }
    }

    /// Fetches the snapshot and the trending feed concurrently. Either
    /// failure fails the whole aggregation.
    pub async fn load(&self) -> Result<Highlights, MarketDataError> {
        let (snapshot, trending) = tokio::try_join!(
            self.service.list_coins(self.settings.snapshot_query()),
            self.service.get_trending()
        )
        .inspect_err(|e| warn!("HighlightsAggregator: load failed: {}", e))?;

        info!(
            "HighlightsAggregator: ranked {} coins, {} trending",
            snapshot.len(),
            trending.len()
        );
        Ok(Highlights::from_snapshot(
            &snapshot,
            trending,
            self.settings.list_len,
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn coin(id: &str, change_24h: Option<f64>, change_7d: Option<f64>, volume: f64) -> CoinSummary {
        CoinSummary {
            id: id.to_string(),
            name: id.to_string(),
            symbol: id.to_string(),
            total_volume: volume,
            price_change_percent_24h: change_24h,
            price_change_percent_7d: change_7d,
            ..Default::default()
        }
    }

    fn ids(coins: &[CoinSummary]) -> Vec<&str> {
        coins.iter().map(|c| c.id.as_str()).collect()
    }

    #[test]
    fn test_gainers_and_losers() {
        let snapshot = vec![
            coin("a", Some(5.0), None, 1.0),
            coin("b", None, None, 1.0),
            coin("c", Some(-3.0), None, 1.0),
            coin("d", Some(12.0), None, 1.0),
        ];

        let highlights = Highlights::from_snapshot(&snapshot, Vec::new(), 10);
        assert_eq!(ids(&highlights.top_gainers), vec!["d", "a", "c", "b"]);
        assert_eq!(ids(&highlights.top_losers), vec!["c", "a", "d", "b"]);
    }

    #[test]
    fn test_lists_are_truncated() {
        let snapshot: Vec<CoinSummary> = (0..30)
            .map(|i| coin(&format!("c{}", i), Some(i as f64), Some(-(i as f64)), i as f64))
            .collect();
        let trending = snapshot.clone();

        let highlights = Highlights::from_snapshot(&snapshot, trending, 10);
        assert_eq!(highlights.top_gainers.len(), 10);
        assert_eq!(highlights.top_losers.len(), 10);
        assert_eq!(highlights.highest_volume.len(), 10);
        assert_eq!(highlights.trending.len(), 10);
        assert_eq!(highlights.top_7d.len(), 10);

        assert_eq!(highlights.highest_volume[0].id, "c29");
        assert_eq!(highlights.top_7d[0].id, "c0");
        // Trending keeps API order
        assert_eq!(highlights.trending[0].id, "c0");
    }

    #[test]
    fn test_snapshot_query() {
        let query = HighlightsSettings::default().snapshot_query();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 250);
        assert_eq!(query.order_by, ServerOrder::MarketCapDesc);
        assert!(!query.include_sparkline);
        assert_eq!(query.change_windows_param(), "24h,7d");
    }
}
