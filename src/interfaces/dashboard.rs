use crate::application::dashboard_state::DashboardState;
use crate::interfaces::components::card::Card;
use crate::interfaces::components::metrics::{
    render_error_banner, render_graded_tile, render_loading,
};
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::ui_components::{TextureStore, UiAction, render_headshot};
use crate::interfaces::view_models::catcher_view_model::{
    CatcherCardViewModel, CatcherViewModel,
};
use eframe::egui;

const TILE_GAP: f32 = 10.0;

/// Renders the cohort summary: heading, error banner and the card grid
pub fn render_summary(
    ui: &mut egui::Ui,
    state: &DashboardState,
    textures: &TextureStore,
    actions: &mut Vec<UiAction>,
) {
    ui.label(
        egui::RichText::new(CatcherViewModel::cohort_heading(state.date()))
            .size(20.0)
            .strong()
            .color(DesignSystem::TEXT_PRIMARY),
    );
    ui.label(
        egui::RichText::new(CatcherViewModel::cohort_count(state.catchers().len()))
            .color(DesignSystem::TEXT_SECONDARY),
    );
    ui.add_space(DesignSystem::SPACING_MEDIUM);

    if let Some(message) = state.error() {
        if render_error_banner(ui, message) {
            actions.push(UiAction::DismissError);
        }
        ui.add_space(DesignSystem::SPACING_MEDIUM);
    }

    if state.is_loading() {
        render_loading(ui, "Loading catcher data...");
        return;
    }

    let cards: Vec<CatcherCardViewModel> = state
        .catchers()
        .iter()
        .map(|c| CatcherViewModel::card(c, state.grader()))
        .collect();

    ui.horizontal_wrapped(|ui| {
        ui.spacing_mut().item_spacing = egui::vec2(20.0, 20.0);
        for card in &cards {
            if render_catcher_card(ui, card, textures).clicked() {
                actions.push(UiAction::Select(card.key));
            }
        }
    });
}

fn render_catcher_card(
    ui: &mut egui::Ui,
    card: &CatcherCardViewModel,
    textures: &TextureStore,
) -> egui::Response {
    let hovered = ui.ctx().memory(|m| m.data.get_temp::<bool>(hover_id(card)).unwrap_or(false));

    let response = Card::new()
        .width(DesignSystem::CARD_WIDTH)
        .active(hovered)
        .show_clickable(ui, |ui| {
            ui.spacing_mut().item_spacing = egui::vec2(TILE_GAP, 4.0);

            ui.horizontal(|ui| {
                ui.vertical(|ui| {
                    ui.label(
                        egui::RichText::new(&card.name)
                            .size(18.0)
                            .strong()
                            .color(DesignSystem::TEXT_PRIMARY),
                    );
                    ui.label(egui::RichText::new(&card.matchup).color(DesignSystem::TEXT_SECONDARY));
                });
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    render_headshot(
                        ui,
                        textures.headshot(card.player_id),
                        DesignSystem::HEADSHOT_CARD,
                    );
                });
            });
            ui.add_space(DesignSystem::SPACING_SMALL);

            let tile_width = (DesignSystem::CARD_WIDTH - TILE_GAP) / 2.0 - 20.0;
            egui::Grid::new(("tiles", card.key))
                .num_columns(2)
                .spacing([TILE_GAP, TILE_GAP])
                .show(ui, |ui| {
                    for (i, tile) in card.tiles.iter().enumerate() {
                        render_graded_tile(ui, tile, tile_width);
                        if i % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
            ui.add_space(DesignSystem::SPACING_SMALL);

            egui::Frame::NONE
                .fill(DesignSystem::BG_INPUT)
                .corner_radius(DesignSystem::ROUNDING_SMALL)
                .inner_margin(egui::Margin::same(8))
                .show(ui, |ui| {
                    ui.set_width(ui.available_width());
                    ui.vertical_centered(|ui| {
                        ui.label(
                            egui::RichText::new("Click to view game summary plot")
                                .size(12.0)
                                .color(DesignSystem::TEXT_SECONDARY),
                        );
                    });
                });
        });

    // Hover styling lags one frame since the frame is drawn before it is hit-tested.
    let now_hovered = response.hovered();
    if now_hovered != hovered {
        ui.ctx().memory_mut(|m| m.data.insert_temp(hover_id(card), now_hovered));
        ui.ctx().request_repaint();
    }

    response
}

fn hover_id(card: &CatcherCardViewModel) -> egui::Id {
    egui::Id::new(("card_hover", card.key))
}
