use super::state::{ListingSettings, ListingSnapshot, ListingState, PageOutcome, PageRequest};
use crate::domain::market::{ServerOrder, SortMode};
use crate::domain::ports::MarketDataService;
use std::sync::Arc;
use tracing::info;

/// Drives [`ListingState`] against a [`MarketDataService`], awaiting each
/// request inline.
///
/// Used by tests and headless callers. The UI goes through
/// [`crate::application::client::AppClient`] instead, which runs the same
/// requests on background tasks.
pub struct ListingController {
    state: ListingState,
    settings: ListingSettings,
    service: Arc<dyn MarketDataService>,
}

impl ListingController {
    pub fn new(
        service: Arc<dyn MarketDataService>,
        settings: ListingSettings,
        default_order: ServerOrder,
    ) -> Self {
        let state = ListingState::new(default_order, settings.dedupe_ids);
        Self {
            state,
            settings,
            service,
        }
    }

    /// Loads the first page with the default ordering.
    pub async fn mount(&mut self) -> Option<PageOutcome> {
        info!("ListingController: mounting");
        self.load_next_page(true).await
    }

    /// Returns `None` when the request was refused (already loading, failed or no more pages).
    pub async fn load_next_page(&mut self, reset: bool) -> Option<PageOutcome> {
        let request = self.state.begin_load(reset)?;
        Some(self.fetch(request).await)
    }

    /// Re-issues the failed request; `None` when nothing failed.
    pub async fn retry(&mut self) -> Option<PageOutcome> {
        let request = self.state.retry()?;
        Some(self.fetch(request).await)
    }

    pub fn set_search_term(&mut self, term: &str) {
        self.state.set_search_term(term);
    }

    pub async fn set_sort_mode(&mut self, mode: SortMode) -> Option<PageOutcome> {
        let request = self.state.set_sort_mode(mode)?;
        Some(self.fetch(request).await)
    }

    async fn fetch(&mut self, request: PageRequest) -> PageOutcome {
        let result = self
            .service
            .list_coins(request.to_query(&self.settings))
            .await;
        self.state.apply_page(&request, result)
    }

    pub fn state(&self) -> &ListingState {
        &self.state
    }

    pub fn snapshot(&self) -> ListingSnapshot {
        self.state.snapshot()
    }
}
