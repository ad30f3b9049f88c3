use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::view_models::catcher_view_model::NetImpactBar;
use eframe::egui;
use egui_plot::{Bar, BarChart, Plot};

/// Net impact of every catcher in the cohort, one tier-coloured bar each.
/// The selected catcher's bar is outlined in the accent colour.
pub fn render_net_impact_chart(ui: &mut egui::Ui, id: &str, bars: &[NetImpactBar]) {
    let bars: Vec<Bar> = bars
        .iter()
        .enumerate()
        .map(|(i, bar)| {
            let (_, border, _) = DesignSystem::tier_colors(bar.tier);
            let stroke = if bar.selected {
                egui::Stroke::new(2.5, DesignSystem::ACCENT_PRIMARY)
            } else {
                egui::Stroke::new(1.0, border)
            };
            Bar::new(i as f64, bar.value as f64)
                .name(format!("{} ({:+})", bar.name, bar.value))
                .fill(border.linear_multiply(0.8))
                .stroke(stroke)
        })
        .collect();

    Plot::new(id)
        .height(220.0)
        .show_axes([false, true])
        .show_grid([false, true])
        .allow_drag(false)
        .allow_zoom(false)
        .allow_scroll(false)
        .show(ui, |plot_ui| {
            plot_ui.bar_chart(BarChart::new("Net Impact", bars).width(0.7));
        });
}
