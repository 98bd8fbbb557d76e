use crate::config::{Config, Mode};
use crate::domain::ports::MarketDataService;
use crate::infrastructure::coingecko::CoinGeckoMarketDataServiceBuilder;
use crate::infrastructure::mock::MockMarketDataService;
use std::sync::Arc;
use tracing::info;

pub struct ServiceFactory;

impl ServiceFactory {
    pub fn create_market_data_service(config: &Config) -> Arc<dyn MarketDataService> {
        match config.mode {
            Mode::Mock => {
                info!("ServiceFactory: using mock market data");
                Arc::new(MockMarketDataService::new())
            }
            Mode::Live => {
                info!(
                    "ServiceFactory: using CoinGecko at {} ({})",
                    config.coingecko.base_url, config.coingecko.vs_currency
                );
                Arc::new(CoinGeckoMarketDataServiceBuilder::from_config(&config.coingecko).build())
            }
        }
    }
}
