use super::graphs::TraitChart;
use super::{to_color32, UiState};
use ecosim::config;
use ecosim::control::Controller;
use ecosim::genome;

/// Runtime settings panel for tuning simulation parameters.
pub fn draw_settings(ctx: &egui::Context, controller: &mut Controller<TraitChart>) {
    egui::Window::new("Settings")
        .default_pos(egui::pos2(12.0, 90.0))
        .default_size(egui::vec2(260.0, 160.0))
        .resizable(true)
        .show(ctx, |ui| {
            ui.heading("Environment");

            let mut food_rate = controller.sim().params.food_spawn_rate();
            let slider = egui::Slider::new(
                &mut food_rate,
                config::FOOD_SPAWN_RATE_MIN..=config::FOOD_SPAWN_RATE_MAX,
            )
            .text("Food rate");
            if ui.add(slider).changed() {
                controller.set_food_spawn_rate(food_rate);
            }

            let mut mutation_rate = controller.sim().params.mutation_rate();
            let slider = egui::Slider::new(
                &mut mutation_rate,
                config::MUTATION_RATE_MIN..=config::MUTATION_RATE_MAX,
            )
            .step_by(0.01)
            .text("Mutation rate");
            if ui.add(slider).changed() {
                controller.set_mutation_rate(mutation_rate);
            }

            ui.separator();
            ui.heading("Spawn Tools");
            if ui.button("Spawn 5 at center").clicked() {
                let center = controller.sim().world.center();
                controller.spawn_cluster(center);
            }
            ui.label("Click anywhere in the world to drop a cluster.");
        });
}

/// Standalone genome sketch: drag speed and size to see how a body would look.
pub fn draw_genome_preview(ctx: &egui::Context, ui_state: &mut UiState) {
    egui::Window::new("Genome")
        .default_pos(egui::pos2(12.0, 280.0))
        .default_size(egui::vec2(200.0, 240.0))
        .resizable(false)
        .show(ctx, |ui| {
            let (speed_lo, speed_hi) = config::PREVIEW_SPEED_RANGE;
            let (size_lo, size_hi) = config::PREVIEW_SIZE_RANGE;
            ui.add(
                egui::Slider::new(&mut ui_state.preview_speed, speed_lo..=speed_hi)
                    .step_by(0.1)
                    .text("Speed"),
            );
            ui.add(
                egui::Slider::new(&mut ui_state.preview_size, size_lo..=size_hi)
                    .step_by(1.0)
                    .text("Size"),
            );

            let (response, painter) =
                ui.allocate_painter(egui::vec2(150.0, 150.0), egui::Sense::hover());
            let rect = response.rect;
            painter.rect_filled(rect, 4.0, egui::Color32::from_gray(240));

            let hue = genome::preview_hue(ui_state.preview_speed);
            painter.circle_filled(
                rect.center(),
                genome::preview_radius(ui_state.preview_size),
                to_color32(genome::hue_color(hue)),
            );
            ui.label(format!(
                "speed {:.1}  size {:.0}",
                ui_state.preview_speed, ui_state.preview_size
            ));
        });
}
