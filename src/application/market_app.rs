//! Root view state of the application.
//!
//! `MarketApp` owns every piece of state the screens render: the global
//! summary for the header, the highlights, the coin listing and the coin
//! detail route. It is mutated only on the UI thread, by [`UiIntent`]s and by
//! the [`AppEvent`]s drained from the [`AppClient`].

use crate::application::client::{AppClient, AppEvent};
use crate::application::highlights::{HIGHLIGHTS_FAILURE_MESSAGE, Highlights};
use crate::application::listing::{ListingSnapshot, ListingState, PageOutcome};
use crate::application::loadable::Loadable;
use crate::application::search_debounce::Debouncer;
use crate::domain::market::{CoinDetail, GlobalSummary, ServerOrder, SortMode};
use std::time::{Duration, Instant};
use tracing::{debug, info, warn};

pub const GLOBAL_FAILURE_MESSAGE: &str = "Market data unavailable";
pub const DETAIL_FAILURE_MESSAGE: &str = "Failed to load coin details";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    CoinDetail(String),
}

/// User actions emitted by the presentation layer
#[derive(Debug, Clone, PartialEq)]
pub enum UiIntent {
    ScrolledToBottom,
    SearchTextChanged(String),
    SortModeChanged(SortMode),
    OpenCoin(String),
    Back,
    RetryListing,
    RetryHighlights,
}

pub struct MarketApp {
    client: AppClient,
    route: Route,
    global: Loadable<GlobalSummary>,
    highlights: Loadable<Highlights>,
    listing: ListingState,
    search_input: String,
    debouncer: Debouncer<String>,
    detail: Loadable<CoinDetail>,
}

impl MarketApp {
    /// Creates the root state and starts the initial fetches: global
    /// summary, highlights and the first listing page.
    pub fn new(client: AppClient, default_order: ServerOrder, search_debounce: Duration) -> Self {
        let dedupe_ids = client.listing_settings().dedupe_ids;
        let (listing, first_page) = ListingState::mount(default_order, dedupe_ids);

        client.request_global_summary();
        client.request_highlights();
        client.request_page(first_page);
        info!("MarketApp: started with order {}", default_order.as_str());

        Self {
            client,
            route: Route::Home,
            global: Loadable::Loading,
            highlights: Loadable::Loading,
            listing,
            search_input: String::new(),
            debouncer: Debouncer::new(search_debounce),
            detail: Loadable::Loading,
        }
    }

    pub fn handle_intent(&mut self, intent: UiIntent, now: Instant) {
        debug!("MarketApp: intent {:?}", intent);
        match intent {
            UiIntent::ScrolledToBottom => {
                if let Some(request) = self.listing.begin_load(false) {
                    self.client.request_page(request);
                }
            }
            UiIntent::RetryListing => {
                if let Some(request) = self.listing.retry() {
                    self.client.request_page(request);
                }
            }
            UiIntent::SearchTextChanged(text) => {
                self.search_input = text.clone();
                // Edited back to the applied term before the timer fired
                if text.to_lowercase() == self.listing.search_term() {
                    self.debouncer.cancel();
                } else {
                    self.debouncer.push(text, now);
                }
            }
            UiIntent::SortModeChanged(mode) => {
                if let Some(request) = self.listing.set_sort_mode(mode) {
                    self.client.request_page(request);
                }
            }
            UiIntent::OpenCoin(id) => {
                self.route = Route::CoinDetail(id.clone());
                self.detail = Loadable::Loading;
                self.client.request_coin_detail(id);
            }
            UiIntent::Back => {
                self.route = Route::Home;
            }
            UiIntent::RetryHighlights => {
                self.highlights = Loadable::Loading;
                self.client.request_highlights();
            }
        }
    }

    /// Advances time-driven state. Returns true when the search term changed.
    pub fn tick(&mut self, now: Instant) -> bool {
        match self.debouncer.poll(now) {
            Some(term) => {
                self.listing.set_search_term(&term);
                true
            }
            None => false,
        }
    }

    /// Applies every completed fetch. Returns how many events were handled.
    pub fn process_events(&mut self) -> usize {
        let mut handled = 0;
        while let Some(event) = self.client.poll_next() {
            self.apply_event(event);
            handled += 1;
        }
        handled
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::ListingPage { request, result } => {
                if self.listing.apply_page(&request, result) == PageOutcome::Stale {
                    debug!("MarketApp: ignored stale page {}", request.page);
                }
            }
            AppEvent::Highlights(result) => {
                self.highlights = Loadable::from_result(result, HIGHLIGHTS_FAILURE_MESSAGE);
            }
            AppEvent::GlobalSummary(result) => {
                if let Err(e) = &result {
                    warn!("MarketApp: global summary failed: {}", e);
                }
                self.global = Loadable::from_result(result, GLOBAL_FAILURE_MESSAGE);
            }
            AppEvent::CoinDetail { id, result } => {
                if self.route != Route::CoinDetail(id.clone()) {
                    debug!("MarketApp: ignored detail for {}", id);
                    return;
                }
                if let Err(e) = &result {
                    warn!("MarketApp: detail for {} failed: {}", id, e);
                }
                self.detail = Loadable::from_result(result, DETAIL_FAILURE_MESSAGE);
            }
        }
    }

    /// Currency the listing and detail prices are quoted in
    pub fn currency(&self) -> &str {
        &self.client.listing_settings().currency
    }

    pub fn route(&self) -> &Route {
        &self.route
    }

    pub fn global(&self) -> &Loadable<GlobalSummary> {
        &self.global
    }

    pub fn highlights(&self) -> &Loadable<Highlights> {
        &self.highlights
    }

    pub fn listing(&self) -> &ListingState {
        &self.listing
    }

    /// Read model the listing table renders from
    pub fn listing_snapshot(&self) -> ListingSnapshot {
        self.listing.snapshot()
    }

    /// Raw text of the search box, ahead of the debounced term
    pub fn search_input(&self) -> &str {
        &self.search_input
    }

    pub fn search_pending(&self) -> bool {
        self.debouncer.is_pending()
    }

    pub fn search_time_remaining(&self, now: Instant) -> Option<Duration> {
        self.debouncer.time_remaining(now)
    }

    pub fn detail(&self) -> &Loadable<CoinDetail> {
        &self.detail
    }
}
