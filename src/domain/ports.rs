use crate::domain::errors::MarketDataError;
use crate::domain::market::{CoinDetail, CoinSummary, GlobalSummary, ServerOrder};
use async_trait::async_trait;

/// Price change windows requested alongside market rows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ChangeWindow {
    Day,
    Week,
}

impl ChangeWindow {
    pub fn as_str(&self) -> &'static str {
        match self {
            ChangeWindow::Day => "24h",
            ChangeWindow::Week => "7d",
        }
    }
}

/// Parameters of one `/coins/markets` page
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListCoinsQuery {
    pub currency: String,
    pub order_by: ServerOrder,
    /// 1-based
    pub page: u32,
    pub page_size: u32,
    pub include_sparkline: bool,
    pub change_windows: Vec<ChangeWindow>,
}

impl ListCoinsQuery {
    /// Comma separated value for the `price_change_percentage` parameter
    pub fn change_windows_param(&self) -> String {
        self.change_windows
            .iter()
            .map(|w| w.as_str())
            .collect::<Vec<_>>()
            .join(",")
    }
}

#[async_trait]
pub trait MarketDataService: Send + Sync {
    async fn list_coins(&self, query: ListCoinsQuery) -> Result<Vec<CoinSummary>, MarketDataError>;
    async fn get_coin_detail(&self, id: &str) -> Result<CoinDetail, MarketDataError>;
    async fn get_global_summary(&self) -> Result<GlobalSummary, MarketDataError>;
    /// Trending coins in provider order; fields the endpoint lacks are defaulted
    async fn get_trending(&self) -> Result<Vec<CoinSummary>, MarketDataError>;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_change_windows_param() {
        let query = ListCoinsQuery {
            currency: "usd".to_string(),
            order_by: ServerOrder::MarketCapDesc,
            page: 1,
            page_size: 250,
            include_sparkline: false,
            change_windows: vec![ChangeWindow::Day, ChangeWindow::Week],
        };
        assert_eq!(query.change_windows_param(), "24h,7d");
    }
}
