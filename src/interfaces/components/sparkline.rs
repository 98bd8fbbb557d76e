use crate::interfaces::design_system::DesignSystem;
use egui_plot::{Line, Plot, PlotPoints};

/// Compact 7 day price line without axes or interaction
pub fn render_sparkline(ui: &mut egui::Ui, id: &str, points: &[[f64; 2]], color: egui::Color32) {
    if points.len() < 2 {
        ui.allocate_exact_size(
            egui::vec2(DesignSystem::SPARKLINE_WIDTH, DesignSystem::ROW_HEIGHT - 8.0),
            egui::Sense::hover(),
        );
        return;
    }

    let line = Line::new("7d", PlotPoints::from(points.to_vec()))
        .color(color)
        .width(1.5);

    Plot::new(format!("sparkline_{}", id))
        .width(DesignSystem::SPARKLINE_WIDTH)
        .height(DesignSystem::ROW_HEIGHT - 8.0)
        .show_axes([false, false])
        .show_grid([false, false])
        .show_background(false)
        .show_x(false)
        .show_y(false)
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .allow_boxed_zoom(false)
        .show(ui, |plot_ui| {
            plot_ui.line(line);
        });
}
