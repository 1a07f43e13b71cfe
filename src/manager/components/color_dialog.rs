use eframe::egui;
use eframe::egui::color_picker::{Alpha, color_picker_color32};

use crate::common::color::HexColor;
use crate::constants::gui::*;

/// How the dialog was closed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColorDialogOutcome {
    Accepted(HexColor),
    Cancelled,
}

/// Modal color picker seeded with the current dot color
#[derive(Debug, Default)]
pub struct ColorDialog {
    open: bool,
    draft: egui::Color32,
}

impl ColorDialog {
    pub fn open(&mut self, current: HexColor) {
        self.draft = current.to_color32();
        self.open = true;
    }

    #[cfg(test)]
    pub fn is_open(&self) -> bool {
        self.open
    }

    /// Draw the dialog if open. Returns an outcome on the frame it closes.
    pub fn show(&mut self, ctx: &egui::Context) -> Option<ColorDialogOutcome> {
        if !self.open {
            return None;
        }

        let mut outcome = None;
        let mut window_open = true;

        egui::Window::new(COLOR_DIALOG_TITLE)
            .open(&mut window_open)
            .collapsible(false)
            .resizable(false)
            .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
            .show(ctx, |ui| {
                color_picker_color32(ui, &mut self.draft, Alpha::Opaque);
                ui.add_space(ITEM_SPACING);
                ui.label(HexColor::from_color32(self.draft).name());
                ui.add_space(ITEM_SPACING);

                ui.horizontal(|ui| {
                    if ui.button("OK").clicked() {
                        outcome = Some(ColorDialogOutcome::Accepted(HexColor::from_color32(
                            self.draft,
                        )));
                    }
                    if ui.button("Cancel").clicked() {
                        outcome = Some(ColorDialogOutcome::Cancelled);
                    }
                });
            });

        if !window_open && outcome.is_none() {
            outcome = Some(ColorDialogOutcome::Cancelled);
        }
        if outcome.is_some() {
            self.open = false;
        }
        outcome
    }
}

impl ColorDialogOutcome {
    /// Color to apply, if any
    pub fn color(self) -> Option<HexColor> {
        match self {
            ColorDialogOutcome::Accepted(color) => Some(color),
            ColorDialogOutcome::Cancelled => None,
        }
    }
}
