use crate::interfaces::design_system::DesignSystem;
use eframe::egui;

/// A card container with the dashboard's standard styling
pub struct Card {
    title: Option<String>,
    width: Option<f32>,
    min_height: f32,
    active: bool,
}

impl Default for Card {
    fn default() -> Self {
        Self::new()
    }
}

impl Card {
    pub fn new() -> Self {
        Self {
            title: None,
            width: None,
            min_height: 0.0,
            active: false,
        }
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Fixed inner width, for cards laid out in a wrapping grid.
    pub fn width(mut self, width: f32) -> Self {
        self.width = Some(width);
        self
    }

    pub fn min_height(mut self, height: f32) -> Self {
        self.min_height = height;
        self
    }

    pub fn active(mut self, active: bool) -> Self {
        self.active = active;
        self
    }

    pub fn show<R>(
        self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui) -> R,
    ) -> egui::InnerResponse<R> {
        let mut frame = DesignSystem::card_frame();

        if self.active {
            frame = frame
                .fill(DesignSystem::BG_CARD_HOVER)
                .stroke(egui::Stroke::new(1.5, DesignSystem::ACCENT_PRIMARY))
                .shadow(egui::epaint::Shadow {
                    offset: [0, 4],
                    blur: 15,
                    spread: 0,
                    color: DesignSystem::ACCENT_PRIMARY.linear_multiply(0.15),
                });
        }

        frame.show(ui, |ui| {
            if let Some(width) = self.width {
                ui.set_width(width);
            }
            if self.min_height > 0.0 {
                ui.set_min_height(self.min_height);
            }

            if let Some(title) = self.title {
                ui.label(
                    egui::RichText::new(title)
                        .size(20.0)
                        .color(DesignSystem::TEXT_PRIMARY)
                        .strong(),
                );
                ui.add_space(DesignSystem::SPACING_MEDIUM);
            }

            add_contents(ui)
        })
    }

    /// Like [`Card::show`], but the whole card reacts to clicks.
    pub fn show_clickable(
        self,
        ui: &mut egui::Ui,
        add_contents: impl FnOnce(&mut egui::Ui),
    ) -> egui::Response {
        self.show(ui, add_contents)
            .response
            .interact(egui::Sense::click())
            .on_hover_cursor(egui::CursorIcon::PointingHand)
    }
}
