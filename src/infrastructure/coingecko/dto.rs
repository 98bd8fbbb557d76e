//! Wire types for the CoinGecko v3 REST API and their mapping onto the domain.

use crate::domain::market::coin_detail::strip_html;
use crate::domain::market::{CoinDetail, CoinSummary, GlobalSummary};
use chrono::{DateTime, Utc};
use serde::Deserialize;
use std::collections::HashMap;

/// One row of `GET /coins/markets`
#[derive(Debug, Deserialize)]
pub struct MarketCoinDto {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub current_price: Option<f64>,
    #[serde(default)]
    pub market_cap: Option<f64>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub total_volume: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
    #[serde(default)]
    pub price_change_percentage_7d_in_currency: Option<f64>,
    #[serde(default)]
    pub sparkline_in_7d: Option<SparklineDto>,
}

#[derive(Debug, Deserialize)]
pub struct SparklineDto {
    #[serde(default)]
    pub price: Vec<Option<f64>>,
}

impl From<MarketCoinDto> for CoinSummary {
    fn from(dto: MarketCoinDto) -> Self {
        let sparkline_7d = dto
            .sparkline_in_7d
            .map(|s| {
                s.price
                    .into_iter()
                    .flatten()
                    .filter(|p| p.is_finite())
                    .collect()
            })
            .unwrap_or_default();

        CoinSummary {
            id: dto.id,
            name: dto.name,
            symbol: dto.symbol,
            current_price: dto.current_price.unwrap_or(0.0),
            market_cap: dto.market_cap.unwrap_or(0.0),
            total_volume: dto.total_volume.unwrap_or(0.0),
            price_change_percent_24h: dto.price_change_percentage_24h,
            price_change_percent_7d: dto.price_change_percentage_7d_in_currency,
            market_cap_rank: dto.market_cap_rank,
            sparkline_7d,
            image_url: dto.image.unwrap_or_default(),
        }
    }
}

/// `GET /search/trending`
#[derive(Debug, Deserialize)]
pub struct TrendingResponseDto {
    pub coins: Vec<TrendingEntryDto>,
}

#[derive(Debug, Deserialize)]
pub struct TrendingEntryDto {
    pub item: TrendingItemDto,
}

#[derive(Debug, Deserialize)]
pub struct TrendingItemDto {
    pub id: String,
    pub name: String,
    pub symbol: String,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub small: Option<String>,
    #[serde(default)]
    pub thumb: Option<String>,
    #[serde(default)]
    pub data: Option<TrendingDataDto>,
}

/// `price` has been served both as a number and as a string; anything that is
/// not a number is treated as missing.
#[derive(Debug, Deserialize)]
pub struct TrendingDataDto {
    #[serde(default)]
    pub price: Option<serde_json::Value>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<HashMap<String, f64>>,
}

impl TrendingItemDto {
    pub fn into_summary(self, currency: &str) -> CoinSummary {
        let (price, change_24h) = match self.data {
            Some(data) => (
                data.price.and_then(|v| match v {
                    serde_json::Value::Number(n) => n.as_f64(),
                    serde_json::Value::String(s) => s.trim_start_matches('$').parse().ok(),
                    _ => None,
                }),
                data.price_change_percentage_24h
                    .and_then(|changes| changes.get(currency).copied()),
            ),
            None => (None, None),
        };

        CoinSummary {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            current_price: price.unwrap_or(0.0),
            price_change_percent_24h: change_24h,
            market_cap_rank: self.market_cap_rank,
            image_url: self.small.or(self.thumb).unwrap_or_default(),
            ..Default::default()
        }
    }
}

/// `GET /global`
#[derive(Debug, Deserialize)]
pub struct GlobalResponseDto {
    pub data: GlobalDataDto,
}

#[derive(Debug, Deserialize)]
pub struct GlobalDataDto {
    pub active_cryptocurrencies: u64,
    pub total_market_cap: HashMap<String, f64>,
    pub total_volume: HashMap<String, f64>,
    #[serde(default)]
    pub market_cap_change_percentage_24h_usd: Option<f64>,
    #[serde(default)]
    pub updated_at: Option<i64>,
}

impl From<GlobalDataDto> for GlobalSummary {
    fn from(dto: GlobalDataDto) -> Self {
        GlobalSummary {
            active_crypto_count: dto.active_cryptocurrencies,
            total_market_cap_usd: dto.total_market_cap.get("usd").copied().unwrap_or(0.0),
            total_volume_usd: dto.total_volume.get("usd").copied().unwrap_or(0.0),
            market_cap_change_percent_24h: dto.market_cap_change_percentage_24h_usd,
            updated_at: dto
                .updated_at
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
        }
    }
}

/// `GET /coins/{id}`
#[derive(Debug, Deserialize)]
pub struct CoinDetailDto {
    pub id: String,
    pub symbol: String,
    pub name: String,
    #[serde(default)]
    pub description: HashMap<String, Option<String>>,
    #[serde(default)]
    pub image: Option<CoinImageDto>,
    #[serde(default)]
    pub market_cap_rank: Option<u32>,
    #[serde(default)]
    pub market_data: Option<CoinMarketDataDto>,
}

#[derive(Debug, Deserialize)]
pub struct CoinImageDto {
    #[serde(default)]
    pub large: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct CoinMarketDataDto {
    #[serde(default)]
    pub current_price: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub market_cap: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub total_volume: HashMap<String, Option<f64>>,
    #[serde(default)]
    pub price_change_percentage_24h: Option<f64>,
}

impl CoinDetailDto {
    pub fn into_detail(self, currency: &str) -> CoinDetail {
        let pick = |values: &HashMap<String, Option<f64>>| values.get(currency).copied().flatten();

        let (current_price, market_cap, total_volume, change_24h) = match &self.market_data {
            Some(md) => (
                pick(&md.current_price),
                pick(&md.market_cap),
                pick(&md.total_volume),
                md.price_change_percentage_24h,
            ),
            None => (None, None, None, None),
        };

        let description = self
            .description
            .get("en")
            .cloned()
            .flatten()
            .map(|html| strip_html(&html))
            .unwrap_or_default();

        CoinDetail {
            id: self.id,
            name: self.name,
            symbol: self.symbol,
            description,
            image_large: self.image.and_then(|i| i.large).unwrap_or_default(),
            market_cap_rank: self.market_cap_rank,
            current_price,
            market_cap,
            total_volume,
            price_change_percent_24h: change_24h,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_market_row_with_nulls() {
        let json = r#"{
            "id": "obscure-token",
            "symbol": "obs",
            "name": "Obscure",
            "image": "https://assets.coingecko.com/coins/images/1/large/obs.png",
            "current_price": null,
            "market_cap": 0,
            "market_cap_rank": null,
            "total_volume": null,
            "price_change_percentage_24h": null,
            "sparkline_in_7d": { "price": [1.0, null, 1.5] }
        }"#;

        let dto: MarketCoinDto = serde_json::from_str(json).unwrap();
        let coin = CoinSummary::from(dto);

        assert_eq!(coin.current_price, 0.0);
        assert_eq!(coin.market_cap_rank, None);
        assert_eq!(coin.price_change_percent_24h, None);
        assert_eq!(coin.sparkline_7d, vec![1.0, 1.5]);
    }

    #[test]
    fn test_trending_item_price_as_string() {
        let json = r#"{
            "id": "pepe", "name": "Pepe", "symbol": "PEPE", "market_cap_rank": 30,
            "thumb": "t.png", "small": "s.png",
            "data": { "price": "$0.0000123", "price_change_percentage_24h": { "usd": 4.2 } }
        }"#;

        let item: TrendingItemDto = serde_json::from_str(json).unwrap();
        let coin = item.into_summary("usd");
        assert!((coin.current_price - 0.0000123).abs() < 1e-12);
        assert_eq!(coin.price_change_percent_24h, Some(4.2));
        assert_eq!(coin.image_url, "s.png");
    }

    #[test]
    fn test_global_without_market_cap_change() {
        let json = r#"{"data": {
            "active_cryptocurrencies": 12000,
            "total_market_cap": { "usd": 2.0e12 },
            "total_volume": { "usd": 8.0e10 },
            "market_cap_change_percentage_24h_usd": null
        }}"#;

        let dto: GlobalResponseDto = serde_json::from_str(json).unwrap();
        let summary = GlobalSummary::from(dto.data);
        assert_eq!(summary.market_cap_change_percent_24h, None);
        assert_eq!(summary.total_market_cap_usd, 2.0e12);
        assert_eq!(summary.updated_at, None);
    }

    #[test]
    fn test_detail_picks_configured_currency() {
        let json = r#"{
            "id": "bitcoin", "symbol": "btc", "name": "Bitcoin",
            "description": { "en": "<b>Peer</b> to peer", "de": null },
            "image": { "large": "large.png" },
            "market_cap_rank": 1,
            "market_data": {
                "current_price": { "usd": 65000.5, "eur": 60000.0 },
                "market_cap": { "usd": 1.2e12 },
                "total_volume": { "usd": 3.1e10 },
                "price_change_percentage_24h": -1.25
            }
        }"#;

        let dto: CoinDetailDto = serde_json::from_str(json).unwrap();
        let detail = dto.into_detail("eur");
        assert_eq!(detail.current_price, Some(60000.0));
        assert_eq!(detail.market_cap, None);
        assert_eq!(detail.description, "Peer to peer");
        assert_eq!(detail.price_change_percent_24h, Some(-1.25));
    }
}
