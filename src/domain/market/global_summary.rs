use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Market-wide totals shown in the header
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GlobalSummary {
    pub active_crypto_count: u64,
    pub total_market_cap_usd: f64,
    pub total_volume_usd: f64,
    pub market_cap_change_percent_24h: Option<f64>,
    pub updated_at: Option<DateTime<Utc>>,
}
