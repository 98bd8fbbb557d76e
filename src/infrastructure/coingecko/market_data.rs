//! CoinGecko Market Data Service
//!
//! Provides the market data port over the public CoinGecko v3 REST API:
//! - Paginated market listings (`/coins/markets`)
//! - Trending coins (`/search/trending`)
//! - Global market totals (`/global`)
//! - Coin detail (`/coins/{id}`)

use super::dto::{CoinDetailDto, GlobalResponseDto, MarketCoinDto, TrendingResponseDto};
use crate::config::{CoinGeckoConfig, DEFAULT_COINGECKO_BASE_URL};
use crate::domain::errors::MarketDataError;
use crate::domain::market::{CoinDetail, CoinSummary, GlobalSummary};
use crate::domain::ports::{ListCoinsQuery, MarketDataService};
use crate::infrastructure::core::http_client_factory::HttpClientFactory;
use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use std::time::Instant;
use tracing::{debug, info, warn};

const API_KEY_HEADER: &str = "x-cg-demo-api-key";

pub struct CoinGeckoMarketDataService {
    client: Client,
    base_url: String,
    api_key: Option<String>,
    vs_currency: String,
}

impl CoinGeckoMarketDataService {
    pub fn builder() -> CoinGeckoMarketDataServiceBuilder {
        CoinGeckoMarketDataServiceBuilder::default()
    }

    pub fn vs_currency(&self) -> &str {
        &self.vs_currency
    }

    /// Query pairs sent to `/coins/markets`
    pub fn markets_query_params(query: &ListCoinsQuery) -> Vec<(&'static str, String)> {
        let mut params = vec![
            ("vs_currency", query.currency.clone()),
            ("order", query.order_by.as_str().to_string()),
            ("per_page", query.page_size.to_string()),
            ("page", query.page.to_string()),
            ("sparkline", query.include_sparkline.to_string()),
        ];
        if !query.change_windows.is_empty() {
            params.push(("price_change_percentage", query.change_windows_param()));
        }
        params
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        endpoint: &str,
        params: &[(&str, String)],
    ) -> Result<T, MarketDataError> {
        let url = format!("{}{}", self.base_url, endpoint);
        let started = Instant::now();

        let mut request = self.client.get(&url).query(params);
        if let Some(key) = &self.api_key {
            request = request.header(API_KEY_HEADER, key);
        }

        let response = request.send().await.map_err(|e| {
            warn!("CoinGecko: request to {} failed: {}", endpoint, e);
            MarketDataError::network(format!("{}: {}", endpoint, e))
        })?;

        let status = response.status();
        if !status.is_success() {
            let error_text = response.text().await.unwrap_or_default();
            warn!("CoinGecko: {} returned {}: {}", endpoint, status, error_text);
            return Err(MarketDataError::network(format!(
                "{} returned {}: {}",
                endpoint, status, error_text
            )));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| MarketDataError::network(format!("{}: {}", endpoint, e)))?;

        debug!(
            "CoinGecko: {} answered {} bytes in {:?}",
            endpoint,
            body.len(),
            started.elapsed()
        );

        serde_json::from_slice(&body).map_err(|e| {
            warn!("CoinGecko: failed to decode {}: {}", endpoint, e);
            MarketDataError::decode(endpoint, e.to_string())
        })
    }
}

#[derive(Default)]
pub struct CoinGeckoMarketDataServiceBuilder {
    base_url: Option<String>,
    api_key: Option<String>,
    vs_currency: Option<String>,
    client: Option<Client>,
}

impl CoinGeckoMarketDataServiceBuilder {
    pub fn base_url(mut self, base_url: String) -> Self {
        self.base_url = Some(base_url);
        self
    }

    pub fn api_key(mut self, api_key: Option<String>) -> Self {
        self.api_key = api_key;
        self
    }

    pub fn vs_currency(mut self, vs_currency: String) -> Self {
        self.vs_currency = Some(vs_currency);
        self
    }

    pub fn client(mut self, client: Client) -> Self {
        self.client = Some(client);
        self
    }

    pub fn from_config(config: &CoinGeckoConfig) -> Self {
        Self::default()
            .base_url(config.base_url.clone())
            .api_key(config.api_key.clone())
            .vs_currency(config.vs_currency.clone())
            .client(HttpClientFactory::create_client(config))
    }

    pub fn build(self) -> CoinGeckoMarketDataService {
        let client = self
            .client
            .unwrap_or_else(|| HttpClientFactory::create_client(&CoinGeckoConfig::default()));

        CoinGeckoMarketDataService {
            client,
            base_url: self
                .base_url
                .unwrap_or_else(|| DEFAULT_COINGECKO_BASE_URL.to_string())
                .trim_end_matches('/')
                .to_string(),
            api_key: self.api_key,
            vs_currency: self.vs_currency.unwrap_or_else(|| "usd".to_string()),
        }
    }
}

#[async_trait]
impl MarketDataService for CoinGeckoMarketDataService {
    async fn list_coins(&self, query: ListCoinsQuery) -> Result<Vec<CoinSummary>, MarketDataError> {
        let params = Self::markets_query_params(&query);
        let rows: Vec<MarketCoinDto> = self.get_json("/coins/markets", &params).await?;

        info!(
            "CoinGecko: fetched {} coins (order={}, page={})",
            rows.len(),
            query.order_by.as_str(),
            query.page
        );

        Ok(rows.into_iter().map(CoinSummary::from).collect())
    }

    async fn get_coin_detail(&self, id: &str) -> Result<CoinDetail, MarketDataError> {
        let endpoint = format!("/coins/{}", id);
        let params = [
            ("localization", "false".to_string()),
            ("tickers", "false".to_string()),
            ("community_data", "false".to_string()),
            ("developer_data", "false".to_string()),
            ("sparkline", "false".to_string()),
        ];
        let dto: CoinDetailDto = self.get_json(&endpoint, &params).await?;

        info!("CoinGecko: fetched detail for {}", id);
        Ok(dto.into_detail(&self.vs_currency))
    }

    async fn get_global_summary(&self) -> Result<GlobalSummary, MarketDataError> {
        let response: GlobalResponseDto = self.get_json("/global", &[]).await?;
        Ok(GlobalSummary::from(response.data))
    }

    async fn get_trending(&self) -> Result<Vec<CoinSummary>, MarketDataError> {
        let response: TrendingResponseDto = self.get_json("/search/trending", &[]).await?;

        info!("CoinGecko: fetched {} trending coins", response.coins.len());

        Ok(response
            .coins
            .into_iter()
            .map(|entry| entry.item.into_summary(&self.vs_currency))
            .collect())
    }
}
