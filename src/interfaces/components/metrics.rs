use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// Label over a large value, used by the header
pub fn render_stat(ui: &mut egui::Ui, label: &str, value: &str) {
    ui.vertical(|ui| {
        ui.label(
            egui::RichText::new(label)
                .size(11.0)
                .color(DesignSystem::TEXT_MUTED),
        );
        ui.label(
            egui::RichText::new(value)
                .size(18.0)
                .strong()
                .color(DesignSystem::TEXT_PRIMARY),
        );
    });
}

/// Rounded pill, e.g. for a 24h change
pub fn render_status_pill(ui: &mut egui::Ui, text: &str, color: egui::Color32) {
    egui::Frame::NONE
        .fill(color.linear_multiply(0.15))
        .corner_radius(12)
        .inner_margin(egui::Margin::symmetric(8, 4))
        .show(ui, |ui| {
            ui.label(egui::RichText::new(text).size(12.0).strong().color(color));
        });
}

/// Spinner with a muted caption
pub fn render_loading(ui: &mut egui::Ui, caption: &str) {
    ui.horizontal(|ui| {
        ui.spinner();
        ui.label(
            egui::RichText::new(caption)
                .italics()
                .color(DesignSystem::TEXT_MUTED),
        );
    });
}

/// Error line with a retry button. Returns true when retry was clicked.
pub fn render_error(ui: &mut egui::Ui, message: &str, retry: bool) -> bool {
    let mut clicked = false;
    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(format!("⚠ {}", message))
                .color(DesignSystem::LOSS)
                .strong(),
        );
        if retry && ui.button("Retry").clicked() {
            clicked = true;
        }
    });
    clicked
}
