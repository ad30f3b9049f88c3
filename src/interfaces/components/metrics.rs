use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::catcher_view_model::MetricTile;
use eframe::egui;

/// A small tier-coloured tile used on the catcher cards
pub fn render_graded_tile(ui: &mut egui::Ui, tile: &MetricTile, width: f32) {
    let (bg, border, text) = DesignSystem::tier_colors(tile.tier);

    egui::Frame::NONE
        .fill(bg)
        .stroke(egui::Stroke::new(1.0, border))
        .corner_radius(6)
        .inner_margin(egui::Margin::same(10))
        .show(ui, |ui| {
            ui.set_width(width);
            ui.set_min_height(58.0);
            ui.label(egui::RichText::new(tile.label).size(12.0).color(text));
            ui.label(egui::RichText::new(&tile.value).size(16.0).strong().color(text));
            if let Some(caption) = &tile.caption {
                ui.label(
                    egui::RichText::new(caption)
                        .size(10.0)
                        .color(text.linear_multiply(0.8)),
                );
            }
        })
        .response
        .on_hover_text(tile.tier.label());
}

/// A large centred number in the detail header, coloured by tier
pub fn render_graded_stat(ui: &mut egui::Ui, tile: &MetricTile) {
    let (_, _, text) = DesignSystem::tier_colors(tile.tier);

    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(&tile.value).size(28.0).strong().color(text));
        ui.label(
            egui::RichText::new(tile.label)
                .size(14.0)
                .color(DesignSystem::TEXT_SECONDARY),
        );
        if let Some(caption) = &tile.caption {
            ui.label(
                egui::RichText::new(caption)
                    .size(12.0)
                    .color(DesignSystem::TEXT_MUTED),
            );
        }
    });
}

/// Red banner for fetch errors. Returns true when the user dismissed it.
pub fn render_error_banner(ui: &mut egui::Ui, message: &str) -> bool {
    let mut dismissed = false;

    egui::Frame::NONE
        .fill(DesignSystem::ERROR_BG)
        .stroke(egui::Stroke::new(1.0, DesignSystem::ERROR_BORDER))
        .corner_radius(DesignSystem::ROUNDING_SMALL)
        .inner_margin(egui::Margin::same(12))
        .show(ui, |ui| {
            ui.set_width(ui.available_width());
            ui.horizontal(|ui| {
                ui.label(egui::RichText::new(message).color(DesignSystem::ERROR_TEXT));
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("✕").clicked() {
                        dismissed = true;
                    }
                });
            });
        });

    dismissed
}

/// Spinner with a caption underneath
pub fn render_loading(ui: &mut egui::Ui, message: &str) {
    ui.vertical_centered(|ui| {
        ui.add_space(50.0);
        ui.add(
            egui::Spinner::new()
                .size(32.0)
                .color(DesignSystem::ACCENT_PRIMARY),
        );
        ui.add_space(DesignSystem::SPACING_SMALL);
        ui.label(egui::RichText::new(message).color(DesignSystem::TEXT_SECONDARY));
        ui.add_space(50.0);
    });
}
