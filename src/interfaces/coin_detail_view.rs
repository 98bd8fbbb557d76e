use crate::application::loadable::Loadable;
use crate::application::market_app::UiIntent;
use crate::domain::market::CoinDetail;
use crate::interfaces::components::card::Card;
use crate::interfaces::components::metrics::{render_error, render_loading, render_stat};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::format::{format_change, format_price};
use eframe::egui;

pub fn render_coin_detail(
    ui: &mut egui::Ui,
    detail: &Loadable<CoinDetail>,
    currency: &str,
    intents: &mut Vec<UiIntent>,
) {
    if ui.link("← Back").clicked() {
        intents.push(UiIntent::Back);
    }
    ui.add_space(DesignSystem::SPACING_MEDIUM);

    let coin = match detail {
        Loadable::Loading => {
            render_loading(ui, "Loading coin...");
            return;
        }
        Loadable::Failed(message) => {
            render_error(ui, message, false);
            return;
        }
        Loadable::Ready(coin) => coin,
    };

    ui.horizontal(|ui| {
        ui.heading(
            egui::RichText::new(format!("{} ({})", coin.name, coin.symbol.to_uppercase()))
                .size(26.0)
                .strong(),
        );
        if let Some(rank) = coin.market_cap_rank {
            ui.label(
                egui::RichText::new(format!("Rank #{}", rank))
                    .color(DesignSystem::TEXT_MUTED),
            );
        }
    });
    ui.add_space(DesignSystem::SPACING_MEDIUM);

    let missing = || "N/A".to_string();
    Card::new().title("Market").show(ui, |ui| {
        ui.horizontal(|ui| {
            render_stat(
                ui,
                "Current Price",
                &coin
                    .current_price
                    .map(|v| format_price(v, currency))
                    .unwrap_or_else(missing),
            );
            ui.add_space(DesignSystem::SPACING_LARGE);
            render_stat(
                ui,
                "Market Cap",
                &coin
                    .market_cap
                    .map(|v| format_price(v, currency))
                    .unwrap_or_else(missing),
            );
            ui.add_space(DesignSystem::SPACING_LARGE);
            render_stat(
                ui,
                "24h Volume",
                &coin
                    .total_volume
                    .map(|v| format_price(v, currency))
                    .unwrap_or_else(missing),
            );
            ui.add_space(DesignSystem::SPACING_LARGE);
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new("24h Change")
                        .size(11.0)
                        .color(DesignSystem::TEXT_MUTED),
                );
                ui.label(
                    egui::RichText::new(format_change(coin.price_change_percent_24h))
                        .size(18.0)
                        .strong()
                        .color(DesignSystem::change_color(coin.price_change_percent_24h)),
                );
            });
        });
    });

    ui.add_space(DesignSystem::SPACING_MEDIUM);

    if !coin.description.is_empty() {
        Card::new().title("About").show(ui, |ui| {
            egui::ScrollArea::vertical()
                .id_salt("coin_description")
                .max_height(320.0)
                .show(ui, |ui| {
                    ui.label(egui::RichText::new(coin.description.as_str()).color(DesignSystem::TEXT_SECONDARY));
                });
        });
    }
}
