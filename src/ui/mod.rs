pub mod graphs;
pub mod settings;
pub mod toolbar;

use ecosim::config;
use ecosim::control::Controller;

use graphs::TraitChart;

/// Tracks which UI panels are open and the genome preview sliders.
pub struct UiState {
    pub show_graphs: bool,
    pub show_settings: bool,
    pub show_preview: bool,
    pub preview_speed: f32,
    pub preview_size: f32,
}

impl Default for UiState {
    fn default() -> Self {
        Self {
            show_graphs: true,
            show_settings: true,
            show_preview: false,
            preview_speed: config::PREVIEW_DEFAULT_SPEED,
            preview_size: config::PREVIEW_DEFAULT_SIZE,
        }
    }
}

/// Draw all egui UI panels.
pub fn draw_ui(controller: &mut Controller<TraitChart>, ui_state: &mut UiState) {
    egui_macroquad::ui(|ctx| {
        toolbar::draw_toolbar(ctx, controller, ui_state);

        if ui_state.show_settings {
            settings::draw_settings(ctx, controller);
        }

        if ui_state.show_preview {
            settings::draw_genome_preview(ctx, ui_state);
        }

        if ui_state.show_graphs {
            graphs::draw_graphs(ctx, controller.chart());
        }
    });

    egui_macroquad::draw();
}

/// Convert a macroquad color for egui painting.
pub fn to_color32(color: macroquad::prelude::Color) -> egui::Color32 {
    let channel = |v: f32| (v.clamp(0.0, 1.0) * 255.0).round() as u8;
    egui::Color32::from_rgba_unmultiplied(
        channel(color.r),
        channel(color.g),
        channel(color.b),
        channel(color.a),
    )
}
