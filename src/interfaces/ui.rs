use crate::application::dashboard_state::{PlotState, View};
use crate::application::session::{DashboardSession, SessionUpdate};
use crate::domain::dates::{format_wire, parse_date};
use crate::infrastructure::plot_decoder::{DecodedImage, decode_rgba};
use crate::interfaces::dashboard::render_summary;
use crate::interfaces::design_system::DesignSystem;
use crate::interfaces::detail_view::render_detail;
use crate::interfaces::ui_components::{TextureStore, UiAction};
use eframe::egui;
use std::collections::VecDeque;
use std::time::Duration;
use tracing::{debug, warn};

/// The egui front end. Owns the session and everything that only exists
/// for display: textures, the date text box and recent log lines.
pub struct DashboardApp {
    session: DashboardSession,
    textures: TextureStore,
    date_input: String,
    date_input_error: Option<String>,
    logs: VecDeque<String>,
    log_capacity: usize,
}

impl DashboardApp {
    pub fn new(session: DashboardSession, log_capacity: usize) -> Self {
        let date_input = format_wire(session.state().date());
        Self {
            session,
            textures: TextureStore::default(),
            date_input,
            date_input_error: None,
            logs: VecDeque::with_capacity(log_capacity),
            log_capacity: log_capacity.max(1),
        }
    }

    fn process_updates(&mut self, ctx: &egui::Context) {
        for update in self.session.pump() {
            match update {
                SessionUpdate::Log(line) => {
                    if self.logs.len() >= self.log_capacity {
                        self.logs.pop_front();
                    }
                    self.logs.push_back(line.trim_end().to_string());
                }
                SessionUpdate::Headshot { player_id, bytes } => {
                    let texture = bytes.and_then(|bytes| match decode_rgba(&bytes) {
                        Ok(image) => Some(load_texture(ctx, &format!("headshot-{}", player_id), &image)),
                        Err(e) => {
                            debug!("Headshot {} is not a usable image: {:#}", player_id, e);
                            None
                        }
                    });
                    self.textures.set_headshot(player_id, texture);
                }
            }
        }

        self.sync_plot_texture(ctx);
    }

    /// Uploads the selected catcher's plot once it arrives.
    fn sync_plot_texture(&mut self, ctx: &egui::Context) {
        let Some(selection) = self.session.state().selection() else {
            self.textures.clear_plot();
            return;
        };
        let key = selection.catcher.key();

        match &selection.plot {
            PlotState::Ready(plot) if self.textures.plot(key).is_none() => {
                let texture = decode_rgba(&plot.bytes)
                    .map(|image| load_texture(ctx, &format!("plot-{}", key), &image))
                    .map_err(|e| {
                        warn!("Plot for {} could not be decoded: {:#}", key, e);
                        format!("Failed to generate plot: {:#}", e)
                    });
                self.textures.set_plot(key, texture);
            }
            PlotState::Ready(_) => {}
            PlotState::Loading | PlotState::Failed(_) | PlotState::Dismissed => self.textures.clear_plot(),
        }
    }

    fn apply_actions(&mut self, actions: Vec<UiAction>) {
        for action in actions {
            match action {
                UiAction::ChangeDate(date) => {
                    self.date_input = format_wire(date);
                    self.date_input_error = None;
                    self.textures.clear_plot();
                    self.session.change_date(date);
                }
                UiAction::Refresh => self.session.refresh(),
                UiAction::Select(key) => self.session.select(key),
                UiAction::Back => {
                    self.textures.clear_plot();
                    self.session.back();
                }
                UiAction::DismissError => self.session.dismiss_error(),
                UiAction::DismissPlot => {
                    self.textures.clear_plot();
                    self.session.dismiss_plot();
                }
            }
        }
    }

    fn render_header(&mut self, ui: &mut egui::Ui, actions: &mut Vec<UiAction>) {
        let date = self.session.state().date();

        ui.horizontal(|ui| {
            ui.vertical(|ui| {
                ui.label(
                    egui::RichText::new("Daily Framing Summary Dashboard")
                        .size(24.0)
                        .strong()
                        .color(DesignSystem::TEXT_PRIMARY),
                );
                ui.label(
                    egui::RichText::new("Built by Kick Dirt Baseball with Statcast Data")
                        .size(14.0)
                        .color(DesignSystem::TEXT_SECONDARY),
                );
            });

            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("⟳").on_hover_text("Reload this date").clicked() {
                    actions.push(UiAction::Refresh);
                }
                if ui.button("▶").on_hover_text("Next day").clicked() {
                    if let Some(next) = date.succ_opt() {
                        actions.push(UiAction::ChangeDate(next));
                    }
                }

                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.date_input)
                        .desired_width(100.0)
                        .hint_text("YYYY-MM-DD"),
                );
                if response.lost_focus() {
                    match parse_date(&self.date_input) {
                        Ok(parsed) if parsed != date => actions.push(UiAction::ChangeDate(parsed)),
                        Ok(_) => self.date_input_error = None,
                        Err(e) => self.date_input_error = Some(format!("{:#}", e)),
                    }
                }

                if ui.button("◀").on_hover_text("Previous day").clicked() {
                    if let Some(prev) = date.pred_opt() {
                        actions.push(UiAction::ChangeDate(prev));
                    }
                }

                if let Some(err) = &self.date_input_error {
                    ui.label(egui::RichText::new(err).size(12.0).color(DesignSystem::ERROR_BORDER));
                }
            });
        });
    }

    fn render_logs(&self, ui: &mut egui::Ui) {
        egui::CollapsingHeader::new(
            egui::RichText::new(format!("Logs ({})", self.logs.len()))
                .size(12.0)
                .color(DesignSystem::TEXT_MUTED),
        )
        .id_salt("log_panel")
        .default_open(false)
        .show(ui, |ui| {
            egui::ScrollArea::vertical()
                .max_height(160.0)
                .auto_shrink([false, true])
                .stick_to_bottom(true)
                .show(ui, |ui| {
                    for line in &self.logs {
                        let color = if line.contains("ERROR") {
                            DesignSystem::ERROR_BORDER
                        } else if line.contains("WARN") {
                            egui::Color32::from_rgb(251, 191, 36)
                        } else {
                            DesignSystem::TEXT_SECONDARY
                        };
                        ui.label(egui::RichText::new(line).monospace().size(11.0).color(color));
                    }
                });
        });
    }
}

fn load_texture(ctx: &egui::Context, name: &str, image: &DecodedImage) -> egui::TextureHandle {
    let color_image = egui::ColorImage::from_rgba_unmultiplied(image.size(), &image.rgba);
    ctx.load_texture(name, color_image, egui::TextureOptions::LINEAR)
}

/// Applies the dashboard theme and text sizes. Call once at startup.
pub fn configure_style(ctx: &egui::Context) {
    ctx.set_visuals(DesignSystem::theme());
    ctx.style_mut(|style| {
        style.spacing.item_spacing = egui::vec2(DesignSystem::SPACING_SMALL, 6.0);
        style.spacing.button_padding = egui::vec2(10.0, 6.0);
    });
}

impl eframe::App for DashboardApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.process_updates(ctx);

        let mut actions = Vec::new();

        egui::TopBottomPanel::top("header")
            .frame(DesignSystem::header_frame())
            .show(ctx, |ui| self.render_header(ui, &mut actions));

        egui::TopBottomPanel::bottom("logs")
            .frame(DesignSystem::header_frame())
            .show(ctx, |ui| self.render_logs(ui));

        egui::CentralPanel::default()
            .frame(DesignSystem::main_frame())
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .auto_shrink([false, false])
                    .show(ui, |ui| {
                        let state = self.session.state();
                        match (state.view(), state.selection()) {
                            (View::Detail, Some(selection)) => {
                                render_detail(ui, state, selection, &self.textures, &mut actions)
                            }
                            _ => render_summary(ui, state, &self.textures, &mut actions),
                        }
                    });
            });

        self.apply_actions(actions);

        // Fetches complete on another thread, so keep polling while any are in flight.
        let waiting = self.session.state().is_loading()
            || matches!(
                self.session.state().selection().map(|s| &s.plot),
                Some(PlotState::Loading)
            );
        let interval = if waiting { 100 } else { 500 };
        ctx.request_repaint_after(Duration::from_millis(interval));
    }
}
