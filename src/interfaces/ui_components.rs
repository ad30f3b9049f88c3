use crate::domain::catcher::CardKey;
use chrono::NaiveDate;
use eframe::egui;
use std::collections::HashMap;

/// User intent collected while drawing a frame, applied once the frame is laid out.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UiAction {
    ChangeDate(NaiveDate),
    Refresh,
    Select(CardKey),
    Back,
    DismissError,
    DismissPlot,
}

/// GPU textures for images fetched by the session.
#[derive(Default)]
pub struct TextureStore {
    /// `None` marks a headshot that failed to load; the view hides it.
    headshots: HashMap<i64, Option<egui::TextureHandle>>,
    plot: Option<(CardKey, Result<egui::TextureHandle, String>)>,
}

impl TextureStore {
    pub fn headshot(&self, player_id: i64) -> Option<&egui::TextureHandle> {
        self.headshots.get(&player_id).and_then(Option::as_ref)
    }

    pub fn set_headshot(&mut self, player_id: i64, texture: Option<egui::TextureHandle>) {
        self.headshots.insert(player_id, texture);
    }

    pub fn plot(&self, key: CardKey) -> Option<&Result<egui::TextureHandle, String>> {
        self.plot
            .as_ref()
            .filter(|(k, _)| *k == key)
            .map(|(_, texture)| texture)
    }

    pub fn set_plot(&mut self, key: CardKey, texture: Result<egui::TextureHandle, String>) {
        self.plot = Some((key, texture));
    }

    pub fn clear_plot(&mut self) {
        self.plot = None;
    }
}

/// Circular headshot, or nothing when the image is missing.
pub fn render_headshot(ui: &mut egui::Ui, texture: Option<&egui::TextureHandle>, size: f32) {
    if let Some(texture) = texture {
        ui.add(
            egui::Image::new(texture)
                .fit_to_exact_size(egui::vec2(size, size))
                .corner_radius((size / 2.0) as u8),
        );
    }
}
