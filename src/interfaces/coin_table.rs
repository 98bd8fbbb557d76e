use crate::application::listing::{LISTING_FAILURE_MESSAGE, ListingSnapshot};
use crate::application::market_app::{MarketApp, UiIntent};
use crate::domain::market::{LoadStatus, SortMode};
use crate::interfaces::components::metrics::{render_error, render_loading};
use crate::interfaces::components::sparkline::render_sparkline;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::CoinRowViewModel;
use eframe::egui;

/// Distance from the bottom, in points, that counts as "scrolled to the end"
const BOTTOM_THRESHOLD: f32 = 120.0;

const HEADERS: [&str; 7] = ["#", "Coin", "Price", "24h", "Market Cap", "Volume", "Last 7 Days"];

/// The "All Coins" listing: search, sort selector and the infinite table.
pub fn render_coin_table(
    ui: &mut egui::Ui,
    app: &MarketApp,
    currency: &str,
    intents: &mut Vec<UiIntent>,
) {
    ui.label(egui::RichText::new("All Coins").size(18.0).strong());
    ui.add_space(DesignSystem::SPACING_SMALL);

    render_toolbar(ui, app, intents);
    ui.add_space(DesignSystem::SPACING_SMALL);

    let listing = app.listing_snapshot();

    let output = egui::ScrollArea::vertical()
        .id_salt("coin_table_scroll")
        .auto_shrink([false, false])
        .show(ui, |ui| {
            egui::Grid::new("coin_grid")
                .striped(true)
                .num_columns(HEADERS.len())
                .min_row_height(DesignSystem::ROW_HEIGHT)
                .spacing([DesignSystem::SPACING_MEDIUM, 4.0])
                .show(ui, |ui| {
                    for header in HEADERS {
                        ui.label(
                            egui::RichText::new(header)
                                .size(12.0)
                                .strong()
                                .color(DesignSystem::TEXT_SECONDARY),
                        );
                    }
                    ui.end_row();

                    for coin in &listing.view {
                        let row = CoinRowViewModel::from_coin(coin, currency);
                        render_row(ui, &row, intents);
                    }
                });

            ui.add_space(DesignSystem::SPACING_SMALL);
            render_footer(ui, &listing, intents);
        });

    // Only a table taller than the viewport can be scrolled to its end. A
    // failed page waits for Retry instead of being re-requested every frame.
    let viewport = output.inner_rect.height();
    let overflowing = output.content_size.y > viewport;
    let can_append = listing.load_status == LoadStatus::Ready && listing.has_more;
    if can_append
        && overflowing
        && output.state.offset.y + viewport >= output.content_size.y - BOTTOM_THRESHOLD
    {
        intents.push(UiIntent::ScrolledToBottom);
    }
}

fn render_toolbar(ui: &mut egui::Ui, app: &MarketApp, intents: &mut Vec<UiIntent>) {
    ui.horizontal(|ui| {
        let mut search = app.search_input().to_string();
        let response = ui.add(
            egui::TextEdit::singleline(&mut search)
                .hint_text("Search by name or symbol")
                .desired_width(280.0),
        );
        if response.changed() {
            intents.push(UiIntent::SearchTextChanged(search));
        }
        if app.search_pending() {
            ui.spinner();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let current = app.listing().sort_mode();
            egui::ComboBox::from_id_salt("sort_mode")
                .selected_text(current.label())
                .width(200.0)
                .show_ui(ui, |ui| {
                    for mode in SortMode::all() {
                        if ui.selectable_label(mode == current, mode.label()).clicked() {
                            intents.push(UiIntent::SortModeChanged(mode));
                        }
                    }
                });
            ui.label(egui::RichText::new("Sort by").color(DesignSystem::TEXT_MUTED));
        });
    });
}

fn render_row(ui: &mut egui::Ui, row: &CoinRowViewModel, intents: &mut Vec<UiIntent>) {
    ui.label(egui::RichText::new(&row.rank).color(DesignSystem::TEXT_MUTED));

    let name = ui.add(
        egui::Label::new(
            egui::RichText::new(format!("{}  {}", row.name, row.symbol))
                .strong()
                .color(DesignSystem::TEXT_PRIMARY),
        )
        .sense(egui::Sense::click()),
    );
    if name.on_hover_cursor(egui::CursorIcon::PointingHand).clicked() {
        intents.push(UiIntent::OpenCoin(row.id.clone()));
    }

    ui.label(&row.price);
    ui.label(egui::RichText::new(&row.change_24h).color(row.change_color));
    ui.label(&row.market_cap);
    ui.label(&row.volume);
    render_sparkline(ui, &row.id, &row.sparkline, row.sparkline_color);
    ui.end_row();
}

fn render_footer(ui: &mut egui::Ui, listing: &ListingSnapshot, intents: &mut Vec<UiIntent>) {
    match listing.load_status {
        LoadStatus::Loading => render_loading(ui, "Loading coins..."),
        LoadStatus::Failed => {
            let message = listing.last_error.as_deref().unwrap_or(LISTING_FAILURE_MESSAGE);
            if render_error(ui, message, true) {
                intents.push(UiIntent::RetryListing);
            }
        }
        LoadStatus::Ready | LoadStatus::Idle => {
            if listing.view.is_empty() {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("No results found").color(DesignSystem::TEXT_MUTED));
                });
            }
            if !listing.has_more {
                ui.vertical_centered(|ui| {
                    ui.label(egui::RichText::new("No more coins").color(DesignSystem::TEXT_MUTED));
                });
            }
        }
    }
}
