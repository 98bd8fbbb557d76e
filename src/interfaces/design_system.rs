use eframe::egui;

/// Dark theme shared by every screen
pub struct DesignSystem;

impl DesignSystem {
    // --- Colors ---

    // Backgrounds
    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(11, 14, 17); // #0B0E11
    pub const BG_PANEL: egui::Color32 = egui::Color32::from_rgb(11, 14, 17);
    pub const BG_CARD: egui::Color32 = egui::Color32::from_rgb(22, 26, 30); // #161A1E
    pub const BG_CARD_HOVER: egui::Color32 = egui::Color32::from_rgb(30, 35, 41);
    pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(17, 20, 24);
    pub const BG_ROW_ALT: egui::Color32 = egui::Color32::from_rgb(16, 19, 23);

    // Accents
    pub const ACCENT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(140, 199, 63); // CoinGecko green
    pub const ACCENT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(82, 130, 255);

    // Price movement
    pub const GAIN: egui::Color32 = egui::Color32::from_rgb(22, 199, 132); // #16C784
    pub const LOSS: egui::Color32 = egui::Color32::from_rgb(234, 57, 67); // #EA3943
    pub const NEUTRAL: egui::Color32 = egui::Color32::from_gray(140);

    pub const WARNING: egui::Color32 = egui::Color32::from_rgb(255, 145, 0);

    // Text
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(234, 236, 239);
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_gray(160);
    pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_gray(100);

    // Borders
    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(43, 49, 57);

    // --- Metrics ---

    pub const ROUNDING_SMALL: f32 = 4.0;
    pub const ROUNDING_MEDIUM: f32 = 8.0;

    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;
    pub const SPACING_LARGE: f32 = 24.0;

    pub const ROW_HEIGHT: f32 = 44.0;
    pub const SPARKLINE_WIDTH: f32 = 120.0;

    // --- Styles ---

    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_PANEL;
        visuals.extreme_bg_color = Self::BG_INPUT;
        visuals.faint_bg_color = Self::BG_ROW_ALT;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);

        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_SECONDARY);
        visuals.widgets.inactive.weak_bg_fill = Self::BG_CARD;
        visuals.widgets.inactive.bg_fill = Self::BG_CARD;

        visuals.widgets.hovered.bg_fill = Self::BG_CARD_HOVER;
        visuals.widgets.active.bg_fill = Self::ACCENT_SECONDARY;

        visuals.selection.bg_fill = Self::ACCENT_PRIMARY.linear_multiply(0.3);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::ACCENT_PRIMARY);

        visuals
    }

    /// Green for gains, red for losses, grey when unknown
    pub fn change_color(change_percent: Option<f64>) -> egui::Color32 {
        match change_percent {
            Some(pct) if pct > 0.0 => Self::GAIN,
            Some(pct) if pct < 0.0 => Self::LOSS,
            _ => Self::NEUTRAL,
        }
    }

    pub fn card_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .corner_radius(Self::ROUNDING_MEDIUM)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }

    pub fn main_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_WINDOW)
            .inner_margin(egui::Margin::same(Self::SPACING_LARGE as i8))
    }
}
