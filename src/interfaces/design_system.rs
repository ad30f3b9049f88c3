use crate::domain::grading::{Rgb, Tier};
use eframe::egui;

/// Dark slate design system for the framing dashboard
pub struct DesignSystem;

impl DesignSystem {
    // --- Colors ---

    // Backgrounds
    pub const BG_WINDOW: egui::Color32 = egui::Color32::from_rgb(17, 24, 39); // #111827
    pub const BG_PANEL: egui::Color32 = egui::Color32::from_rgb(17, 24, 39);
    pub const BG_CARD: egui::Color32 = egui::Color32::from_rgb(31, 41, 55); // #1F2937
    pub const BG_CARD_HOVER: egui::Color32 = egui::Color32::from_rgb(38, 50, 66);
    pub const BG_INPUT: egui::Color32 = egui::Color32::from_rgb(55, 65, 81); // #374151

    // Accents
    pub const ACCENT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(59, 130, 246); // #3B82F6

    // Status
    pub const ERROR_BG: egui::Color32 = egui::Color32::from_rgb(127, 29, 29); // #7F1D1D
    pub const ERROR_BORDER: egui::Color32 = egui::Color32::from_rgb(239, 68, 68); // #EF4444
    pub const ERROR_TEXT: egui::Color32 = egui::Color32::from_rgb(252, 165, 165); // #FCA5A5

    // Text
    pub const TEXT_PRIMARY: egui::Color32 = egui::Color32::from_rgb(249, 250, 251); // #F9FAFB
    pub const TEXT_SECONDARY: egui::Color32 = egui::Color32::from_rgb(156, 163, 175); // #9CA3AF
    pub const TEXT_MUTED: egui::Color32 = egui::Color32::from_rgb(107, 114, 128); // #6B7280

    // Borders
    pub const BORDER_SUBTLE: egui::Color32 = egui::Color32::from_rgb(55, 65, 81); // #374151

    // --- Metrics ---

    pub const ROUNDING_SMALL: f32 = 4.0;
    pub const ROUNDING_MEDIUM: f32 = 8.0;

    pub const SPACING_SMALL: f32 = 8.0;
    pub const SPACING_MEDIUM: f32 = 16.0;
    pub const SPACING_LARGE: f32 = 24.0;

    pub const CARD_WIDTH: f32 = 340.0;
    pub const HEADSHOT_CARD: f32 = 50.0;
    pub const HEADSHOT_DETAIL: f32 = 80.0;

    // --- Styles ---

    /// Returns the standard visual style for the application
    pub fn theme() -> egui::Visuals {
        let mut visuals = egui::Visuals::dark();

        visuals.window_fill = Self::BG_WINDOW;
        visuals.panel_fill = Self::BG_PANEL;
        visuals.extreme_bg_color = Self::BG_INPUT;

        visuals.widgets.noninteractive.bg_stroke = egui::Stroke::new(1.0, Self::BORDER_SUBTLE);
        visuals.widgets.noninteractive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);

        visuals.widgets.inactive.fg_stroke = egui::Stroke::new(1.0, Self::TEXT_PRIMARY);
        visuals.widgets.inactive.weak_bg_fill = Self::BG_INPUT;
        visuals.widgets.inactive.bg_fill = Self::BG_INPUT;

        visuals.widgets.hovered.bg_fill = Self::BG_CARD_HOVER;
        visuals.widgets.active.bg_fill = Self::ACCENT_PRIMARY;

        visuals.selection.bg_fill = Self::ACCENT_PRIMARY.linear_multiply(0.3);
        visuals.selection.stroke = egui::Stroke::new(1.0, Self::ACCENT_PRIMARY);

        visuals
    }

    /// Standard Card Styling
    pub fn card_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .corner_radius(Self::ROUNDING_MEDIUM)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(Self::SPACING_MEDIUM as i8)
    }

    /// Application Main Layout Frame
    pub fn main_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_WINDOW)
            .inner_margin(egui::Margin::same(Self::SPACING_LARGE as i8))
    }

    pub fn header_frame() -> egui::Frame {
        egui::Frame::NONE
            .fill(Self::BG_CARD)
            .stroke(egui::Stroke::new(1.0, Self::BORDER_SUBTLE))
            .inner_margin(egui::Margin::symmetric(Self::SPACING_LARGE as i8, Self::SPACING_MEDIUM as i8))
    }

    pub fn color(rgb: Rgb) -> egui::Color32 {
        egui::Color32::from_rgb(rgb.0, rgb.1, rgb.2)
    }

    /// Background, border and text colours for a graded tile.
    pub fn tier_colors(tier: Tier) -> (egui::Color32, egui::Color32, egui::Color32) {
        let palette = tier.palette();
        (
            Self::color(palette.background),
            Self::color(palette.border),
            Self::color(palette.text),
        )
    }
}
