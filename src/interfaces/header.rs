use crate::application::loadable::Loadable;
use crate::domain::market::GlobalSummary;
use crate::interfaces::components::metrics::{render_stat, render_status_pill};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::HeaderViewModel;
use eframe::egui;

/// Top bar: app title plus the global market totals.
pub fn render_header(ui: &mut egui::Ui, global: &Loadable<GlobalSummary>) {
    ui.add_space(DesignSystem::SPACING_SMALL);
    ui.horizontal(|ui| {
        ui.heading(
            egui::RichText::new("Coinscope")
                .size(24.0)
                .strong()
                .color(DesignSystem::ACCENT_PRIMARY),
        );

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| match global {
            Loadable::Loading => {
                ui.spinner();
                ui.label(egui::RichText::new("Loading...").color(DesignSystem::TEXT_MUTED));
            }
            Loadable::Failed(message) => {
                ui.label(egui::RichText::new(message.as_str()).color(DesignSystem::WARNING));
            }
            Loadable::Ready(summary) => {
                let header = HeaderViewModel::from_summary(summary);

                // right_to_left: last stat first
                render_stat(ui, "24h Volume", &header.total_volume);
                ui.separator();
                render_status_pill(ui, &header.market_cap_change, header.change_color);
                render_stat(ui, "Market Cap", &header.total_market_cap);
                ui.separator();
                render_stat(ui, "Coins", &header.active_coins);

                if let Some(updated_at) = &header.updated_at {
                    ui.separator();
                    ui.label(
                        egui::RichText::new(format!("Updated {}", updated_at))
                            .size(10.0)
                            .color(DesignSystem::TEXT_MUTED),
                    );
                }
            }
        });
    });
    ui.add_space(DesignSystem::SPACING_SMALL);
}
