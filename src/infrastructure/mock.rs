use crate::domain::errors::MarketDataError;
use crate::domain::market::{CoinDetail, CoinSummary, GlobalSummary, ServerOrder};
use crate::domain::ports::{ListCoinsQuery, MarketDataService};
use async_trait::async_trait;
use chrono::Utc;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, RwLock};
use std::time::Duration;
use tracing::{debug, info};

const WELL_KNOWN: &[(&str, &str, &str)] = &[
    ("bitcoin", "Bitcoin", "btc"),
    ("ethereum", "Ethereum", "eth"),
    ("tether", "Tether", "usdt"),
    ("binancecoin", "BNB", "bnb"),
    ("solana", "Solana", "sol"),
    ("ripple", "XRP", "xrp"),
    ("usd-coin", "USDC", "usdc"),
    ("cardano", "Cardano", "ada"),
    ("dogecoin", "Dogecoin", "doge"),
    ("avalanche-2", "Avalanche", "avax"),
    ("polkadot", "Polkadot", "dot"),
    ("chainlink", "Chainlink", "link"),
    ("litecoin", "Litecoin", "ltc"),
    ("uniswap", "Uniswap", "uni"),
    ("stellar", "Stellar", "xlm"),
];

const SPARKLINE_SAMPLES: usize = 168;

/// In-process market used by `MODE=mock` and by tests.
///
/// Honours ordering and pagination like the real API and supports failure
/// injection and per-order latency.
#[derive(Clone)]
pub struct MockMarketDataService {
    universe: Arc<Vec<CoinSummary>>,
    pending_list_failures: Arc<AtomicUsize>,
    fail_trending: Arc<AtomicBool>,
    fail_global: Arc<AtomicBool>,
    latency: Arc<RwLock<HashMap<ServerOrder, Duration>>>,
    list_calls: Arc<AtomicUsize>,
}

impl MockMarketDataService {
    pub fn new() -> Self {
        Self::with_coins(Self::generate_universe(240, 42))
    }

    pub fn with_coins(coins: Vec<CoinSummary>) -> Self {
        Self {
            universe: Arc::new(coins),
            pending_list_failures: Arc::new(AtomicUsize::new(0)),
            fail_trending: Arc::new(AtomicBool::new(false)),
            fail_global: Arc::new(AtomicBool::new(false)),
            latency: Arc::new(RwLock::new(HashMap::new())),
            list_calls: Arc::new(AtomicUsize::new(0)),
        }
    }

    /// Builds a deterministic set of coins ranked by market cap.
    pub fn generate_universe(count: usize, seed: u64) -> Vec<CoinSummary> {
        let mut rng = StdRng::seed_from_u64(seed);

        let mut coins: Vec<CoinSummary> = (0..count)
            .map(|i| {
                let (id, name, symbol) = match WELL_KNOWN.get(i) {
                    Some((id, name, symbol)) => {
                        (id.to_string(), name.to_string(), symbol.to_string())
                    }
                    None => (
                        format!("mock-coin-{}", i),
                        format!("Mock Coin {}", i),
                        format!("mc{}", i),
                    ),
                };

                // Log-uniform price between $0.0001 and $100k
                let price = 10f64.powf(rng.random_range(-4.0..5.0));
                let supply = 10f64.powf(rng.random_range(6.0..11.0));
                let market_cap = price * supply;
                let total_volume = market_cap * rng.random_range(0.005..0.3);

                let change_24h = if i % 13 == 12 {
                    None
                } else {
                    Some(rng.random_range(-15.0..15.0))
                };
                let change_7d = if i % 17 == 16 {
                    None
                } else {
                    Some(rng.random_range(-40.0..40.0))
                };

                let mut sample = price;
                let sparkline_7d = (0..SPARKLINE_SAMPLES)
                    .map(|_| {
                        sample *= 1.0 + rng.random_range(-0.01..0.01);
                        sample
                    })
                    .collect();

                CoinSummary {
                    image_url: format!("https://assets.example.invalid/{}.png", id),
                    id,
                    name,
                    symbol,
                    current_price: price,
                    market_cap,
                    total_volume,
                    price_change_percent_24h: change_24h,
                    price_change_percent_7d: change_7d,
                    market_cap_rank: None,
                    sparkline_7d,
                }
            })
            .collect();

        coins.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap));
        for (idx, coin) in coins.iter_mut().enumerate() {
            coin.market_cap_rank = Some(idx as u32 + 1);
        }
        coins
    }

    /// The next `count` listing requests fail with a network error
    pub fn fail_next_list_calls(&self, count: usize) {
        self.pending_list_failures.store(count, Ordering::SeqCst);
    }

    pub fn set_trending_failure(&self, fail: bool) {
        self.fail_trending.store(fail, Ordering::SeqCst);
    }

    pub fn set_global_failure(&self, fail: bool) {
        self.fail_global.store(fail, Ordering::SeqCst);
    }

    /// Delays every listing request made with `order`
    pub fn set_latency(&self, order: ServerOrder, delay: Duration) {
        if let Ok(mut latency) = self.latency.write() {
            latency.insert(order, delay);
        }
    }

    pub fn list_calls(&self) -> usize {
        self.list_calls.load(Ordering::SeqCst)
    }

    pub fn universe(&self) -> &[CoinSummary] {
        &self.universe
    }

    fn take_list_failure(&self) -> bool {
        self.pending_list_failures
            .fetch_update(Ordering::SeqCst, Ordering::SeqCst, |n| n.checked_sub(1))
            .is_ok()
    }

    fn ordered(&self, order: ServerOrder) -> Vec<CoinSummary> {
        let mut coins = self.universe.as_ref().clone();
        match order {
            ServerOrder::MarketCapDesc => coins.sort_by(|a, b| b.market_cap.total_cmp(&a.market_cap)),
            ServerOrder::MarketCapAsc => coins.sort_by(|a, b| a.market_cap.total_cmp(&b.market_cap)),
            ServerOrder::VolumeDesc => {
                coins.sort_by(|a, b| b.total_volume.total_cmp(&a.total_volume))
            }
            ServerOrder::VolumeAsc => {
                coins.sort_by(|a, b| a.total_volume.total_cmp(&b.total_volume))
            }
        }
        coins
    }
}

impl Default for MockMarketDataService {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl MarketDataService for MockMarketDataService {
    async fn list_coins(&self, query: ListCoinsQuery) -> Result<Vec<CoinSummary>, MarketDataError> {
        self.list_calls.fetch_add(1, Ordering::SeqCst);

        let delay = self
            .latency
            .read()
            .ok()
            .and_then(|latency| latency.get(&query.order_by).copied());
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }

        if self.take_list_failure() {
            debug!("MockMarketDataService: injected failure for page {}", query.page);
            return Err(MarketDataError::network("mock: injected listing failure"));
        }

        let page_size = query.page_size as usize;
        let skip = (query.page.saturating_sub(1) as usize).saturating_mul(page_size);
        let mut page: Vec<CoinSummary> = self
            .ordered(query.order_by)
            .into_iter()
            .skip(skip)
            .take(page_size)
            .collect();

        if !query.include_sparkline {
            for coin in &mut page {
                coin.sparkline_7d.clear();
            }
        }

        info!(
            "MockMarketDataService: served {} coins (order={}, page={})",
            page.len(),
            query.order_by.as_str(),
            query.page
        );
        Ok(page)
    }

    async fn get_coin_detail(&self, id: &str) -> Result<CoinDetail, MarketDataError> {
        let coin = self
            .universe
            .iter()
            .find(|c| c.id == id)
            .ok_or_else(|| MarketDataError::network(format!("/coins/{} returned 404 Not Found", id)))?;

        Ok(CoinDetail {
            id: coin.id.clone(),
            name: coin.name.clone(),
            symbol: coin.symbol.clone(),
            description: format!("{} is a simulated asset served by the mock market.", coin.name),
            image_large: coin.image_url.clone(),
            market_cap_rank: coin.market_cap_rank,
            current_price: Some(coin.current_price),
            market_cap: Some(coin.market_cap),
            total_volume: Some(coin.total_volume),
            price_change_percent_24h: coin.price_change_percent_24h,
        })
    }

    async fn get_global_summary(&self) -> Result<GlobalSummary, MarketDataError> {
        if self.fail_global.load(Ordering::SeqCst) {
            return Err(MarketDataError::network("mock: injected global failure"));
        }

        Ok(GlobalSummary {
            active_crypto_count: self.universe.len() as u64,
            total_market_cap_usd: self.universe.iter().map(|c| c.market_cap).sum(),
            total_volume_usd: self.universe.iter().map(|c| c.total_volume).sum(),
            market_cap_change_percent_24h: Some(1.7),
            updated_at: Some(Utc::now()),
        })
    }

    async fn get_trending(&self) -> Result<Vec<CoinSummary>, MarketDataError> {
        if self.fail_trending.load(Ordering::SeqCst) {
            return Err(MarketDataError::network("mock: injected trending failure"));
        }

        // Trending rows only carry a subset of fields
        Ok(self
            .universe
            .iter()
            .step_by(7)
            .take(15)
            .map(|c| CoinSummary {
                id: c.id.clone(),
                name: c.name.clone(),
                symbol: c.symbol.clone(),
                current_price: c.current_price,
                price_change_percent_24h: c.price_change_percent_24h,
                market_cap_rank: c.market_cap_rank,
                image_url: c.image_url.clone(),
                ..Default::default()
            })
            .collect())
    }
}
