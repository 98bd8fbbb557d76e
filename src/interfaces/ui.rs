use crate::application::market_app::{MarketApp, Route};
use crate::interfaces::coin_detail_view::render_coin_detail;
use crate::interfaces::coin_table::render_coin_table;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::header::render_header;
use crate::interfaces::highlights_panel::render_highlights;
use eframe::egui;
use std::time::{Duration, Instant};

/// Frame interval while waiting on background fetches
const POLL_INTERVAL: Duration = Duration::from_millis(100);

impl eframe::App for MarketApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.set_visuals(DesignSystem::theme());

        // --- 1. Drain completed fetches and fire the search debounce ---
        let now = Instant::now();
        self.process_events();
        self.tick(now);

        let mut intents = Vec::new();
        let app: &MarketApp = self;
        let currency = app.currency();

        // --- 2. Header ---
        egui::TopBottomPanel::top("global_header")
            .frame(
                egui::Frame::NONE
                    .fill(DesignSystem::BG_CARD)
                    .inner_margin(egui::Margin::symmetric(DesignSystem::SPACING_LARGE as i8, 4)),
            )
            .show(ctx, |ui| {
                render_header(ui, app.global());
            });

        // --- 3. Routed content ---
        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| match app.route() {
                Route::Home => {
                    render_highlights(ui, app.highlights(), currency, &mut intents);
                    ui.add_space(DesignSystem::SPACING_LARGE);
                    render_coin_table(ui, app, currency, &mut intents);
                }
                Route::CoinDetail(_) => {
                    render_coin_detail(ui, app.detail(), currency, &mut intents);
                }
            });

        for intent in intents {
            self.handle_intent(intent, now);
        }

        // Responses arrive over a channel that does not wake egui
        let wait = self
            .search_time_remaining(Instant::now())
            .map_or(POLL_INTERVAL, |remaining| remaining.min(POLL_INTERVAL));
        ctx.request_repaint_after(wait);
    }
}
