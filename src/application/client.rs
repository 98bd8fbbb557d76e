use crate::application::highlights::{Highlights, HighlightsAggregator, HighlightsSettings};
use crate::application::listing::{ListingSettings, PageRequest};
use crate::domain::errors::MarketDataError;
use crate::domain::market::{CoinDetail, CoinSummary, GlobalSummary};
use crate::domain::ports::MarketDataService;
use crossbeam_channel::{Receiver, Sender, unbounded};
use std::sync::Arc;
use tokio::runtime::Handle;
use tracing::debug;

/// Completed fetch delivered back to the UI thread
#[derive(Debug, Clone)]
pub enum AppEvent {
    ListingPage {
        request: PageRequest,
        result: Result<Vec<CoinSummary>, MarketDataError>,
    },
    Highlights(Result<Highlights, MarketDataError>),
    GlobalSummary(Result<GlobalSummary, MarketDataError>),
    CoinDetail {
        id: String,
        result: Result<CoinDetail, MarketDataError>,
    },
}

/// Bridge between the synchronous UI and the async market data service.
/// Requests are spawned on the runtime; results come back through a channel
/// drained with [`AppClient::poll_next`].
pub struct AppClient {
    runtime: Handle,
    service: Arc<dyn MarketDataService>,
    listing: ListingSettings,
    highlights: HighlightsSettings,
    event_tx: Sender<AppEvent>,
    event_rx: Receiver<AppEvent>,
}

impl AppClient {
    pub fn new(
        runtime: Handle,
        service: Arc<dyn MarketDataService>,
        listing: ListingSettings,
        highlights: HighlightsSettings,
    ) -> Self {
        let (event_tx, event_rx) = unbounded();
        Self {
            runtime,
            service,
            listing,
            highlights,
            event_tx,
            event_rx,
        }
    }

    pub fn request_page(&self, request: PageRequest) {
        let service = self.service.clone();
        let query = request.to_query(&self.listing);
        let tx = self.event_tx.clone();

        self.runtime.spawn(async move {
            let result = service.list_coins(query).await;
            let _ = tx.send(AppEvent::ListingPage { request, result });
        });
    }

    pub fn request_highlights(&self) {
        let aggregator = HighlightsAggregator::new(self.service.clone(), self.highlights.clone());
        let tx = self.event_tx.clone();

        self.runtime.spawn(async move {
            let result = aggregator.load().await;
            let _ = tx.send(AppEvent::Highlights(result));
        });
    }

    pub fn request_global_summary(&self) {
        let service = self.service.clone();
        let tx = self.event_tx.clone();

        self.runtime.spawn(async move {
            let result = service.get_global_summary().await;
            let _ = tx.send(AppEvent::GlobalSummary(result));
        });
    }

    pub fn request_coin_detail(&self, id: String) {
        let service = self.service.clone();
        let tx = self.event_tx.clone();

        self.runtime.spawn(async move {
            let result = service.get_coin_detail(&id).await;
            let _ = tx.send(AppEvent::CoinDetail { id, result });
        });
    }

    /// Non-blocking; returns the next completed fetch if any.
    pub fn poll_next(&self) -> Option<AppEvent> {
        let event = self.event_rx.try_recv().ok();
        if let Some(AppEvent::ListingPage { request, .. }) = &event {
            debug!("AppClient: page {} (gen {}) arrived", request.page, request.generation);
        }
        event
    }

    pub fn listing_settings(&self) -> &ListingSettings {
        &self.listing
    }
}
