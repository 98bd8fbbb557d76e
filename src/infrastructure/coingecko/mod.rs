pub mod dto;
pub mod market_data;

pub use market_data::{CoinGeckoMarketDataService, CoinGeckoMarketDataServiceBuilder};
