use eframe::egui;

use crate::common::types::DotShape;
use crate::constants::defaults::dot;
use crate::constants::gui::*;
use crate::manager::panel::ControlPanel;

/// What the user did with the controls this frame
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ControlAction {
    None,
    Resize(u32),
    SelectShape(DotShape),
    OpenColorDialog,
    PickImage,
    Minimize,
}

pub fn ui(ui: &mut egui::Ui, panel: &ControlPanel) -> ControlAction {
    let mut action = ControlAction::None;

    ui.vertical_centered(|ui| {
        ui.heading(HEADING);
    });
    ui.add_space(SECTION_SPACING);

    render_size(ui, panel, &mut action);
    ui.add_space(SECTION_SPACING);
    render_color(ui, panel, &mut action);
    ui.add_space(SECTION_SPACING);
    render_shape(ui, panel, &mut action);
    ui.add_space(SECTION_SPACING);

    ui.vertical_centered_justified(|ui| {
        if ui.button("Minimize to Tray").clicked() {
            action = ControlAction::Minimize;
        }
    });
    ui.add_space(ITEM_SPACING);
    ui.vertical_centered(|ui| {
        ui.label(egui::RichText::new(SHORTCUT_HINT).small().color(COLOR_HINT));
    });

    action
}

fn render_size(ui: &mut egui::Ui, panel: &ControlPanel, action: &mut ControlAction) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(egui::RichText::new("Size").strong());
        ui.add_space(ITEM_SPACING);

        let mut size = panel.size();
        ui.horizontal(|ui| {
            if ui
                .add(
                    egui::Slider::new(&mut size, dot::MIN_DIAMETER..=dot::MAX_DIAMETER)
                        .show_value(false),
                )
                .changed()
            {
                *action = ControlAction::Resize(size);
            }
            ui.label(format!("Size: {}", size));
        });
    });
}

fn render_color(ui: &mut egui::Ui, panel: &ControlPanel, action: &mut ControlAction) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(egui::RichText::new("Color").strong());
        ui.add_space(ITEM_SPACING);

        ui.horizontal(|ui| {
            ui.label(panel.color_label());
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui.button("Choose Color").clicked() {
                    *action = ControlAction::OpenColorDialog;
                }
            });
        });
    });
}

fn render_shape(ui: &mut egui::Ui, panel: &ControlPanel, action: &mut ControlAction) {
    ui.group(|ui| {
        ui.set_min_width(ui.available_width());
        ui.label(egui::RichText::new("Shape").strong());
        ui.add_space(ITEM_SPACING);

        let mut shape = panel.shape();
        egui::ComboBox::from_id_salt("dot_shape")
            .selected_text(shape.as_str())
            .width(ui.available_width())
            .show_ui(ui, |ui| {
                for option in DotShape::ALL {
                    ui.selectable_value(&mut shape, option, option.as_str());
                }
            });
        if shape != panel.shape() {
            *action = ControlAction::SelectShape(shape);
        }

        if panel.image_controls_visible() {
            ui.add_space(ITEM_SPACING);
            ui.horizontal(|ui| {
                if ui.button("Upload Image/SVG").clicked() {
                    *action = ControlAction::PickImage;
                }
                if !panel.image_label().is_empty() {
                    ui.label(panel.image_label());
                }
            });
        }
    });
}
