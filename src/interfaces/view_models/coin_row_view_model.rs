use super::format::{format_change, format_compact, format_price};
use crate::domain::market::CoinSummary;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Display-ready values for one listing or highlights row
pub struct CoinRowViewModel {
    pub id: String,
    pub rank: String,
    pub name: String,
    pub symbol: String,
    pub price: String,
    pub change_24h: String,
    pub change_color: egui::Color32,
    pub market_cap: String,
    pub volume: String,
    pub sparkline: Vec<[f64; 2]>,
    pub sparkline_color: egui::Color32,
}

impl CoinRowViewModel {
    pub fn from_coin(coin: &CoinSummary, currency: &str) -> Self {
        let sparkline: Vec<[f64; 2]> = coin
            .sparkline_7d
            .iter()
            .enumerate()
            .map(|(i, price)| [i as f64, *price])
            .collect();

        // Colour the line by its own direction over the week
        let sparkline_color = match (coin.sparkline_7d.first(), coin.sparkline_7d.last()) {
            (Some(first), Some(last)) => DesignSystem::change_color(Some(last - first)),
            _ => DesignSystem::NEUTRAL,
        };

        Self {
            id: coin.id.clone(),
            rank: coin
                .market_cap_rank
                .map(|r| r.to_string())
                .unwrap_or_else(|| "-".to_string()),
            name: coin.name.clone(),
            symbol: coin.symbol.to_uppercase(),
            price: format_price(coin.current_price, currency),
            change_24h: format_change(coin.price_change_percent_24h),
            change_color: DesignSystem::change_color(coin.price_change_percent_24h),
            market_cap: format_compact(coin.market_cap, currency),
            volume: format_compact(coin.total_volume, currency),
            sparkline,
            sparkline_color,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_row_from_coin() {
        let coin = CoinSummary {
            id: "bitcoin".to_string(),
            name: "Bitcoin".to_string(),
            symbol: "btc".to_string(),
            current_price: 65000.0,
            market_cap: 1.28e12,
            total_volume: 3.1e10,
            price_change_percent_24h: Some(-2.346),
            market_cap_rank: Some(1),
            sparkline_7d: vec![60000.0, 62000.0, 64000.0],
            ..Default::default()
        };

        let row = CoinRowViewModel::from_coin(&coin, "usd");
        assert_eq!(row.rank, "1");
        assert_eq!(row.symbol, "BTC");
        assert_eq!(row.price, "$65,000.00");
        assert_eq!(row.change_24h, "-2.35%");
        assert_eq!(row.change_color, DesignSystem::LOSS);
        assert_eq!(row.market_cap, "$1.28T");
        assert_eq!(row.volume, "$31.00B");
        assert_eq!(row.sparkline, vec![[0.0, 60000.0], [1.0, 62000.0], [2.0, 64000.0]]);
        assert_eq!(row.sparkline_color, DesignSystem::GAIN);
    }

    #[test]
    fn test_row_with_missing_values() {
        let coin = CoinSummary {
            id: "new-coin".to_string(),
            name: "New Coin".to_string(),
            symbol: "new".to_string(),
            ..Default::default()
        };

        let row = CoinRowViewModel::from_coin(&coin, "usd");
        assert_eq!(row.rank, "-");
        assert_eq!(row.change_24h, "N/A");
        assert_eq!(row.change_color, DesignSystem::NEUTRAL);
        assert!(row.sparkline.is_empty());
    }
}
