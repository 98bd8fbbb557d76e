use crate::application::highlights::Highlights;
use crate::application::loadable::Loadable;
use crate::application::market_app::UiIntent;
use crate::domain::market::CoinSummary;
use crate::interfaces::components::card::Card;
use crate::interfaces::components::metrics::{render_error, render_loading};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::CoinRowViewModel;
use eframe::egui;

const CARD_WIDTH: f32 = 250.0;
const CARD_HEIGHT: f32 = 330.0;

pub fn render_highlights(
    ui: &mut egui::Ui,
    highlights: &Loadable<Highlights>,
    currency: &str,
    intents: &mut Vec<UiIntent>,
) {
    ui.label(egui::RichText::new("Highlights").size(18.0).strong());
    ui.add_space(DesignSystem::SPACING_SMALL);

    let data = match highlights {
        Loadable::Loading => None,
        Loadable::Failed(message) => {
            if render_error(ui, message, true) {
                intents.push(UiIntent::RetryHighlights);
            }
            return;
        }
        Loadable::Ready(data) => Some(data),
    };

    let sections: [(&str, Option<&[CoinSummary]>); 5] = [
        ("Top Gainers (24h)", data.map(|d| d.top_gainers.as_slice())),
        ("Top Losers (24h)", data.map(|d| d.top_losers.as_slice())),
        ("Highest Volume", data.map(|d| d.highest_volume.as_slice())),
        ("Trending Coins", data.map(|d| d.trending.as_slice())),
        ("Top by 7d Performance", data.map(|d| d.top_7d.as_slice())),
    ];

    egui::ScrollArea::horizontal()
        .id_salt("highlights_scroll")
        .show(ui, |ui| {
            ui.horizontal_top(|ui| {
                for (title, coins) in sections {
                    ui.allocate_ui(egui::vec2(CARD_WIDTH, CARD_HEIGHT), |ui| {
                        ui.set_width(CARD_WIDTH);
                        render_highlight_card(ui, title, coins, currency, intents);
                    });
                }
            });
        });
}

fn render_highlight_card(
    ui: &mut egui::Ui,
    title: &str,
    coins: Option<&[CoinSummary]>,
    currency: &str,
    intents: &mut Vec<UiIntent>,
) {
    Card::new().title(title).min_height(CARD_HEIGHT).show(ui, |ui| {
        let Some(coins) = coins else {
            render_loading(ui, "Loading...");
            return;
        };

        if coins.is_empty() {
            ui.label(egui::RichText::new("No data").color(DesignSystem::TEXT_MUTED));
            return;
        }

        for coin in coins {
            let row = CoinRowViewModel::from_coin(coin, currency);
            ui.horizontal(|ui| {
                let name = ui.add(
                    egui::Label::new(
                        egui::RichText::new(format!("{} {}", row.name, row.symbol))
                            .color(DesignSystem::TEXT_PRIMARY),
                    )
                    .truncate()
                    .sense(egui::Sense::click()),
                );
                if name.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
                    intents.push(UiIntent::OpenCoin(row.id.clone()));
                }

                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    ui.label(
                        egui::RichText::new(&row.change_24h)
                            .size(11.0)
                            .color(row.change_color),
                    );
                    ui.label(
                        egui::RichText::new(&row.price)
                            .size(11.0)
                            .color(DesignSystem::TEXT_SECONDARY),
                    );
                });
            });
        }
    });
}
