//! Paginated coin listing state.
//!
//! Owns the accumulated coin collection, the page cursor and the load status,
//! and hands out generation-tagged [`PageRequest`]s. A response is applied
//! only when its tag matches the latest request issued, so a slow page from a
//! superseded ordering can never overwrite a newer reset.

use super::view;
use crate::config::Config;
use crate::domain::errors::MarketDataError;
use crate::domain::market::{CoinSummary, LoadStatus, ServerOrder, SortMode};
use crate::domain::ports::{ChangeWindow, ListCoinsQuery};
use std::collections::HashSet;
use tracing::{debug, warn};

pub const LISTING_FAILURE_MESSAGE: &str = "Failed to load coins";

/// Request parameters shared by every page of the listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListingSettings {
    pub currency: String,
    pub page_size: u32,
    pub dedupe_ids: bool,
}

impl Default for ListingSettings {
    fn default() -> Self {
        Self {
            currency: "usd".to_string(),
            page_size: 50,
            dedupe_ids: true,
        }
    }
}

impl ListingSettings {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.coingecko.vs_currency.clone(),
            page_size: config.listing.page_size,
            dedupe_ids: config.listing.dedupe_ids,
        }
    }
}

/// One page fetch issued by [`ListingState`]
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    pub generation: u64,
    pub page: u32,
    pub order: ServerOrder,
    pub reset: bool,
}

impl PageRequest {
    pub fn to_query(&self, settings: &ListingSettings) -> ListCoinsQuery {
        ListCoinsQuery {
            currency: settings.currency.clone(),
            order_by: self.order,
            page: self.page,
            page_size: settings.page_size,
            include_sparkline: true,
            change_windows: vec![ChangeWindow::Day],
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageOutcome {
    Applied,
    /// Superseded by a newer request; state untouched
    Stale,
}

/// Read model handed to the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub struct ListingSnapshot {
    pub view: Vec<CoinSummary>,
    pub has_more: bool,
    pub load_status: LoadStatus,
    pub last_error: Option<String>,
}

#[derive(Debug, Clone)]
pub struct ListingState {
    items: Vec<CoinSummary>,
    known_ids: HashSet<String>,
    page_cursor: u32,
    has_more: bool,
    search_term: String,
    sort_mode: SortMode,
    server_order: ServerOrder,
    load_status: LoadStatus,
    last_error: Option<String>,
    generation: u64,
    reset_pending: bool,
    dedupe_ids: bool,
}

impl ListingState {
    pub fn new(default_order: ServerOrder, dedupe_ids: bool) -> Self {
        Self {
            items: Vec::new(),
            known_ids: HashSet::new(),
            page_cursor: 1,
            has_more: true,
            search_term: String::new(),
            sort_mode: SortMode::Server(default_order),
            server_order: default_order,
            load_status: LoadStatus::Idle,
            last_error: None,
            generation: 0,
            reset_pending: false,
            dedupe_ids,
        }
    }

    /// Creates the state in `Loading` together with the first page request.
    pub fn mount(default_order: ServerOrder, dedupe_ids: bool) -> (Self, PageRequest) {
        let mut state = Self::new(default_order, dedupe_ids);
        let request = state.issue(true);
        (state, request)
    }

    /// Starts a page fetch.
    ///
    /// A reset is always accepted and supersedes anything in flight. An append
    /// is refused while a request is loading, after a failure (only [`retry`]
    /// re-issues a failed page) and once the listing ran dry.
    ///
    /// [`retry`]: ListingState::retry
    pub fn begin_load(&mut self, reset: bool) -> Option<PageRequest> {
        if !reset {
            match self.load_status {
                LoadStatus::Loading => {
                    debug!("Listing: append ignored, page {} already loading", self.page_cursor);
                    return None;
                }
                LoadStatus::Failed => {
                    debug!("Listing: append ignored, page {} failed", self.page_cursor);
                    return None;
                }
                LoadStatus::Idle | LoadStatus::Ready => {}
            }
            if !self.has_more {
                return None;
            }
        }
        Some(self.issue(reset))
    }

    /// Re-issues the request that failed last. A failed reset is retried as a
    /// reset. Returns `None` unless the listing is in `Failed`.
    pub fn retry(&mut self) -> Option<PageRequest> {
        if self.load_status != LoadStatus::Failed {
            debug!("Listing: retry ignored while {}", self.load_status);
            return None;
        }
        Some(self.issue(self.reset_pending))
    }

    fn issue(&mut self, reset: bool) -> PageRequest {
        self.generation += 1;
        self.load_status = LoadStatus::Loading;
        self.last_error = None;

        let request = PageRequest {
            generation: self.generation,
            page: if reset { 1 } else { self.page_cursor },
            order: self.server_order,
            reset,
        };
        debug!(
            "Listing: issued gen={} page={} order={} reset={}",
            request.generation,
            request.page,
            request.order.as_str(),
            request.reset
        );
        request
    }

    pub fn is_current(&self, request: &PageRequest) -> bool {
        request.generation == self.generation
    }

    /// Applies the response of `request`; responses of superseded requests are dropped.
    pub fn apply_page(
        &mut self,
        request: &PageRequest,
        result: Result<Vec<CoinSummary>, MarketDataError>,
    ) -> PageOutcome {
        if !self.is_current(request) {
            warn!(
                "Listing: dropping stale page {} (gen {} < {})",
                request.page, request.generation, self.generation
            );
            return PageOutcome::Stale;
        }

        match result {
            Ok(page) => {
                let received = page.len();
                if request.reset {
                    self.items.clear();
                    self.known_ids.clear();
                    self.page_cursor = 2;
                    self.reset_pending = false;
                } else {
                    self.page_cursor += 1;
                }
                self.accumulate(page);
                self.has_more = received > 0;
                self.load_status = LoadStatus::Ready;
                self.last_error = None;
                debug!(
                    "Listing: applied page {} ({} coins, {} total)",
                    request.page,
                    received,
                    self.items.len()
                );
            }
            Err(e) => {
                warn!("Listing: page {} failed: {}", request.page, e);
                if request.reset {
                    self.reset_pending = true;
                }
                self.load_status = LoadStatus::Failed;
                self.last_error = Some(LISTING_FAILURE_MESSAGE.to_string());
            }
        }
        PageOutcome::Applied
    }

    fn accumulate(&mut self, page: Vec<CoinSummary>) {
        if !self.dedupe_ids {
            self.items.extend(page);
            return;
        }
        for coin in page {
            if self.known_ids.insert(coin.id.clone()) {
                self.items.push(coin);
            } else {
                debug!("Listing: skipping duplicate coin {}", coin.id);
            }
        }
    }

    /// Stores the lowercase search term. Debouncing happens before this call.
    pub fn set_search_term(&mut self, term: &str) {
        self.search_term = term.to_lowercase();
    }

    /// Switches the sort selection. Returns the reset request when the new
    /// mode has to be served by the API.
    pub fn set_sort_mode(&mut self, mode: SortMode) -> Option<PageRequest> {
        if mode == self.sort_mode {
            return None;
        }
        self.sort_mode = mode;
        match mode {
            SortMode::Server(order) => {
                self.server_order = order;
                self.begin_load(true)
            }
            SortMode::Client(_) => None,
        }
    }

    pub fn items(&self) -> &[CoinSummary] {
        &self.items
    }

    pub fn page_cursor(&self) -> u32 {
        self.page_cursor
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn search_term(&self) -> &str {
        &self.search_term
    }

    pub fn sort_mode(&self) -> SortMode {
        self.sort_mode
    }

    /// Ordering used for the next request
    pub fn server_order(&self) -> ServerOrder {
        self.server_order
    }

    pub fn load_status(&self) -> LoadStatus {
        self.load_status
    }

    pub fn last_error(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    pub fn generation(&self) -> u64 {
        self.generation
    }

    /// Filtered and sorted coins, recomputed from the current state
    pub fn view(&self) -> Vec<&CoinSummary> {
        view::derive_view(&self.items, &self.search_term, self.sort_mode)
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        ListingSnapshot {
            view: self.view().into_iter().cloned().collect(),
            has_more: self.has_more,
            load_status: self.load_status,
            last_error: self.last_error.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::market::ClientOrder;

    fn coins(prefix: &str, count: usize) -> Vec<CoinSummary> {
        (0..count)
            .map(|i| CoinSummary {
                id: format!("{}-{}", prefix, i),
                name: format!("{} {}", prefix, i),
                symbol: format!("{}{}", prefix, i),
                current_price: i as f64,
                ..Default::default()
            })
            .collect()
    }

    fn mounted() -> (ListingState, PageRequest) {
        ListingState::mount(ServerOrder::MarketCapDesc, true)
    }

    #[test]
    fn test_mount_starts_loading() {
        let (state, request) = mounted();
        assert_eq!(state.load_status(), LoadStatus::Loading);
        assert_eq!(request.page, 1);
        assert!(request.reset);
        assert_eq!(request.order, ServerOrder::MarketCapDesc);
    }

    #[test]
    fn test_first_page_then_append() {
        let (mut state, first) = mounted();
        assert_eq!(state.apply_page(&first, Ok(coins("a", 50))), PageOutcome::Applied);
        assert_eq!(state.items().len(), 50);
        assert_eq!(state.page_cursor(), 2);
        assert!(state.has_more());

        let second = state.begin_load(false).unwrap();
        assert_eq!(second.page, 2);
        state.apply_page(&second, Ok(coins("b", 50)));

        assert_eq!(state.items().len(), 100);
        assert_eq!(state.page_cursor(), 3);
        assert_eq!(state.load_status(), LoadStatus::Ready);
    }

    #[test]
    fn test_append_refused_while_loading() {
        let (mut state, _first) = mounted();
        assert!(state.begin_load(false).is_none());
    }

    #[test]
    fn test_empty_page_ends_listing() {
        let (mut state, first) = mounted();
        state.apply_page(&first, Ok(coins("a", 10)));
        let next = state.begin_load(false).unwrap();
        state.apply_page(&next, Ok(Vec::new()));

        assert!(!state.has_more());
        assert_eq!(state.items().len(), 10);
        assert!(state.begin_load(false).is_none());
        // A reset is still allowed
        assert!(state.begin_load(true).is_some());
    }

    #[test]
    fn test_failure_keeps_items() {
        let (mut state, first) = mounted();
        state.apply_page(&first, Ok(coins("a", 50)));
        let before = state.items().to_vec();

        let next = state.begin_load(false).unwrap();
        state.apply_page(&next, Err(MarketDataError::network("connection reset")));

        assert_eq!(state.load_status(), LoadStatus::Failed);
        assert_eq!(state.last_error(), Some(LISTING_FAILURE_MESSAGE));
        assert_eq!(state.items(), before.as_slice());
        assert_eq!(state.page_cursor(), 2);
    }

    #[test]
    fn test_append_refused_after_failure() {
        let (mut state, first) = mounted();
        state.apply_page(&first, Ok(coins("a", 50)));
        let next = state.begin_load(false).unwrap();
        state.apply_page(&next, Err(MarketDataError::network("429 Too Many Requests")));
        let generation = state.generation();

        assert!(state.begin_load(false).is_none());
        assert!(state.begin_load(false).is_none());
        assert_eq!(state.generation(), generation);
        assert_eq!(state.load_status(), LoadStatus::Failed);

        let retry = state.retry().unwrap();
        assert!(!retry.reset);
        assert_eq!(retry.page, 2);
        state.apply_page(&retry, Ok(coins("b", 50)));
        assert_eq!(state.items().len(), 100);
        assert_eq!(state.load_status(), LoadStatus::Ready);
    }

    #[test]
    fn test_retry_only_after_failure() {
        let (mut state, first) = mounted();
        assert!(state.retry().is_none());
        state.apply_page(&first, Ok(coins("a", 5)));
        assert!(state.retry().is_none());
    }

    #[test]
    fn test_failed_reset_is_retried_as_reset() {
        let (mut state, first) = mounted();
        state.apply_page(&first, Ok(coins("a", 50)));

        let reset = state
            .set_sort_mode(SortMode::Server(ServerOrder::VolumeDesc))
            .unwrap();
        state.apply_page(&reset, Err(MarketDataError::network("timeout")));
        assert!(state.begin_load(false).is_none());

        let retry = state.retry().unwrap();
        assert!(retry.reset);
        assert_eq!(retry.page, 1);
        assert_eq!(retry.order, ServerOrder::VolumeDesc);

        state.apply_page(&retry, Ok(coins("vol", 50)));
        assert!(state.items().iter().all(|c| c.id.starts_with("vol")));
        assert_eq!(state.page_cursor(), 2);
    }

    #[test]
    fn test_stale_response_is_dropped() {
        let (mut state, first) = mounted();
        let reset = state
            .set_sort_mode(SortMode::Server(ServerOrder::VolumeAsc))
            .unwrap();

        state.apply_page(&reset, Ok(coins("vol", 50)));
        let outcome = state.apply_page(&first, Ok(coins("cap", 50)));

        assert_eq!(outcome, PageOutcome::Stale);
        assert_eq!(state.items().len(), 50);
        assert!(state.items().iter().all(|c| c.id.starts_with("vol")));
        assert_eq!(state.page_cursor(), 2);
    }

    #[test]
    fn test_client_sort_does_not_fetch() {
        let (mut state, first) = mounted();
        state.apply_page(&first, Ok(coins("a", 5)));
        let generation = state.generation();

        let request = state.set_sort_mode(SortMode::Client(ClientOrder::PriceDesc));
        assert!(request.is_none());
        assert_eq!(state.generation(), generation);
        assert_eq!(state.server_order(), ServerOrder::MarketCapDesc);
        assert_eq!(state.items().len(), 5);
        assert_eq!(state.view()[0].current_price, 4.0);
    }

    #[test]
    fn test_same_sort_mode_is_noop() {
        let (mut state, _first) = mounted();
        assert!(state
            .set_sort_mode(SortMode::Server(ServerOrder::MarketCapDesc))
            .is_none());
    }

    #[test]
    fn test_duplicate_ids_across_pages() {
        let (mut state, first) = mounted();
        state.apply_page(&first, Ok(coins("a", 3)));
        let next = state.begin_load(false).unwrap();

        let mut overlapping = coins("a", 3)[1..].to_vec();
        overlapping.extend(coins("b", 2));
        state.apply_page(&next, Ok(overlapping));

        let ids: Vec<&str> = state.items().iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, vec!["a-0", "a-1", "a-2", "b-0", "b-1"]);
    }

    #[test]
    fn test_duplicates_kept_when_dedupe_disabled() {
        let (mut state, first) = ListingState::mount(ServerOrder::MarketCapDesc, false);
        state.apply_page(&first, Ok(coins("a", 3)));
        let next = state.begin_load(false).unwrap();
        state.apply_page(&next, Ok(coins("a", 3)));
        assert_eq!(state.items().len(), 6);
    }

    #[test]
    fn test_search_term_is_lowercased() {
        let mut state = ListingState::new(ServerOrder::MarketCapDesc, true);
        state.set_search_term("BtC");
        assert_eq!(state.search_term(), "btc");
    }

    #[test]
    fn test_snapshot_reflects_state() {
        let (mut state, first) = mounted();
        state.apply_page(&first, Ok(coins("a", 2)));
        state.set_search_term("a 1");

        let snapshot = state.snapshot();
        assert_eq!(snapshot.view.len(), 1);
        assert_eq!(snapshot.view[0].id, "a-1");
        assert!(snapshot.has_more);
        assert_eq!(snapshot.load_status, LoadStatus::Ready);
        assert_eq!(snapshot.last_error, None);
    }
}
