use crate::application::dashboard_state::{DashboardState, PlotState, Selection};
use crate::interfaces::components::card::Card;
use crate::interfaces::components::charts::render_net_impact_chart;
use crate::interfaces::components::metrics::{
    render_error_banner, render_graded_stat, render_loading,
};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::ui_components::{TextureStore, UiAction, render_headshot};
use crate::interfaces::view_models::catcher_view_model::CatcherViewModel;
use eframe::egui;

const PLOT_MAX_WIDTH: f32 = 800.0;

/// Renders the single-catcher view with its gameday plot
pub fn render_detail(
    ui: &mut egui::Ui,
    state: &DashboardState,
    selection: &Selection,
    textures: &TextureStore,
    actions: &mut Vec<UiAction>,
) {
    let vm = CatcherViewModel::detail(&selection.catcher, &selection.grades, state.date());

    let back = egui::Button::new(
        egui::RichText::new("← Back to Dashboard")
            .size(14.0)
            .color(egui::Color32::WHITE),
    )
    .fill(DesignSystem::ACCENT_PRIMARY)
    .corner_radius(6);
    if ui.add(back).clicked() {
        actions.push(UiAction::Back);
    }
    ui.add_space(DesignSystem::SPACING_LARGE);

    Card::new().show(ui, |ui| {
        ui.set_width(ui.available_width());
        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new(&vm.title)
                        .size(24.0)
                        .strong()
                        .color(DesignSystem::TEXT_PRIMARY),
                );
                ui.label(egui::RichText::new(&vm.subtitle).color(DesignSystem::TEXT_SECONDARY));
            });
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Min), |ui| {
                render_headshot(ui, textures.headshot(vm.player_id), DesignSystem::HEADSHOT_DETAIL);
            });
        });
        ui.add_space(DesignSystem::SPACING_LARGE);

        ui.columns(vm.stats.len(), |columns| {
            for (column, stat) in columns.iter_mut().zip(vm.stats.iter()) {
                render_graded_stat(column, stat);
            }
        });
    });
    ui.add_space(DesignSystem::SPACING_LARGE);

    match &selection.plot {
        PlotState::Loading => render_loading(ui, "Generating your gameday summary plot..."),
        PlotState::Failed(message) => {
            if render_error_banner(ui, message) {
                actions.push(UiAction::DismissPlot);
            }
        }
        PlotState::Ready(_) => match textures.plot(vm.key) {
            Some(Ok(texture)) => {
                Card::new().title("Gameday Summary Plot").show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    let [w, h] = texture.size();
                    let width = (w as f32).min(PLOT_MAX_WIDTH).min(ui.available_width());
                    let height = width * h as f32 / w.max(1) as f32;
                    ui.vertical_centered(|ui| {
                        ui.add(
                            egui::Image::new(texture)
                                .fit_to_exact_size(egui::vec2(width, height))
                                .corner_radius(DesignSystem::ROUNDING_MEDIUM as u8),
                        );
                    });
                });
            }
            Some(Err(message)) => {
                if render_error_banner(ui, message) {
                    actions.push(UiAction::DismissPlot);
                }
            }
            None => render_loading(ui, "Decoding plot..."),
        },
        PlotState::Dismissed => {}
    }
    ui.add_space(DesignSystem::SPACING_LARGE);

    let bars = CatcherViewModel::net_impact_bars(state.catchers(), state.grader(), vm.key);
    if bars.len() > 1 {
        Card::new().title("Cohort Net Impact").show(ui, |ui| {
            ui.set_width(ui.available_width());
            render_net_impact_chart(ui, "cohort_net_impact", &bars);
        });
    }
}
