use super::format::{format_change, format_compact, format_count};
use crate::domain::market::GlobalSummary;
use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

pub struct HeaderViewModel {
    pub active_coins: String,
    pub total_market_cap: String,
    pub total_volume: String,
    pub market_cap_change: String,
    pub change_color: egui::Color32,
    pub updated_at: Option<String>,
}

impl HeaderViewModel {
    /// Totals from `/global` are always in USD
    pub fn from_summary(summary: &GlobalSummary) -> Self {
        let change = summary.market_cap_change_percent_24h;
        Self {
            active_coins: format_count(summary.active_crypto_count),
            total_market_cap: format_compact(summary.total_market_cap_usd, "usd"),
            total_volume: format_compact(summary.total_volume_usd, "usd"),
            market_cap_change: format_change(change),
            change_color: DesignSystem::change_color(change),
            updated_at: summary
                .updated_at
                .map(|ts| ts.format("%Y-%m-%d %H:%M UTC").to_string()),
        }
    }
}
