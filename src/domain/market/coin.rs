use super::sort_mode::ClientOrder;
use serde::{Deserialize, Serialize};
use std::cmp::Ordering;

/// One entry of the coin listing or of a highlight list.
///
/// Monetary values are expressed in the configured display currency.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoinSummary {
    pub id: String,
    pub name: String,
    pub symbol: String,
    pub current_price: f64,
    pub market_cap: f64,
    pub total_volume: f64,
    pub price_change_percent_24h: Option<f64>,
    pub price_change_percent_7d: Option<f64>,
    pub market_cap_rank: Option<u32>,
    /// Trailing 7 day price samples, oldest first
    pub sparkline_7d: Vec<f64>,
    pub image_url: String,
}

impl CoinSummary {
    /// Case-insensitive substring match on name or symbol.
    ///
    /// `term` must already be lowercase; an empty term matches everything.
    pub fn matches_search(&self, term: &str) -> bool {
        term.is_empty()
            || self.name.to_lowercase().contains(term)
            || self.symbol.to_lowercase().contains(term)
    }

    /// Compares two coins by a client-side ordering. Missing keys sort last.
    pub fn compare_by(&self, other: &CoinSummary, order: ClientOrder) -> Ordering {
        match order {
            ClientOrder::PriceDesc | ClientOrder::PriceAsc => compare_keys(
                Some(self.current_price),
                Some(other.current_price),
                order.is_descending(),
            ),
            ClientOrder::Change24hDesc | ClientOrder::Change24hAsc => compare_keys(
                self.price_change_percent_24h,
                other.price_change_percent_24h,
                order.is_descending(),
            ),
        }
    }
}

/// Orders two optional keys, placing `None` after every present value
/// regardless of direction.
pub fn compare_keys(a: Option<f64>, b: Option<f64>, descending: bool) -> Ordering {
    match (a, b) {
        (Some(a), Some(b)) => {
            if descending {
                b.total_cmp(&a)
            } else {
                a.total_cmp(&b)
            }
        }
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}
