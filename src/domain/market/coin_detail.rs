use serde::{Deserialize, Serialize};

/// Extended record backing the per-coin detail view.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CoinDetail {
    pub id: String,
    pub name: String,
    pub symbol: String,
    /// English description with markup removed
    pub description: String,
    pub image_large: String,
    pub market_cap_rank: Option<u32>,
    pub current_price: Option<f64>,
    pub market_cap: Option<f64>,
    pub total_volume: Option<f64>,
    pub price_change_percent_24h: Option<f64>,
}

/// Removes HTML tags and decodes the handful of entities CoinGecko uses in
/// descriptions.
pub fn strip_html(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_tag = false;

    for c in input.chars() {
        match c {
            '<' => in_tag = true,
            '>' if in_tag => in_tag = false,
            _ if !in_tag => out.push(c),
            _ => {}
        }
    }

    out.replace("&amp;", "&")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&nbsp;", " ")
        .trim()
        .to_string()
}
