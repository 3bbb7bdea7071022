use super::graphs::TraitChart;
use super::UiState;
use ecosim::control::Controller;

/// Slim status strip + compact controls.
pub fn draw_toolbar(ctx: &egui::Context, controller: &mut Controller<TraitChart>, ui_state: &mut UiState) {
    egui::TopBottomPanel::top("toolbar").show(ctx, |ui| {
        ui.add_space(3.0);
        ui.horizontal_wrapped(|ui| {
            title_badge(ui, "ECOSYSTEM");

            ui.separator();
            compact_group(ui, "Sim", |ui| {
                let run_label = if controller.is_running() { "Stop" } else { "Start" };
                if ui.button(run_label).clicked() {
                    controller.toggle();
                }
                if ui.button("Reset").clicked() {
                    controller.reset();
                }
            });

            compact_group(ui, "Panels", |ui| {
                ui.toggle_value(&mut ui_state.show_settings, "Settings");
                ui.toggle_value(&mut ui_state.show_graphs, "Graphs");
                ui.toggle_value(&mut ui_state.show_preview, "Genome");
            });
        });

        ui.add_space(4.0);
        ui.horizontal_wrapped(|ui| {
            let stats = controller.sim().stats().current;
            metric_chip(ui, "Time", format!("{}s", stats.time));
            metric_chip(ui, "Creatures", format!("{}", stats.population));
            metric_chip(ui, "Food", format!("{}", stats.food_count));
            metric_chip(ui, "Avg Speed", format!("{:.2}", stats.avg_speed));
            metric_chip(ui, "Avg Size", format!("{:.2}", stats.avg_size));
        });
        ui.add_space(3.0);
    });
}

fn title_badge(ui: &mut egui::Ui, label: &str) {
    let text = egui::RichText::new(label)
        .strong()
        .color(egui::Color32::from_rgb(230, 162, 100));
    ui.label(text);
}

fn compact_group(ui: &mut egui::Ui, heading: &str, add_contents: impl FnOnce(&mut egui::Ui)) {
    ui.group(|ui| {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new(heading)
                    .small()
                    .color(egui::Color32::from_rgb(150, 170, 185)),
            );
            add_contents(ui);
        });
    });
}

fn metric_chip(ui: &mut egui::Ui, key: &str, value: String) {
    let text = egui::RichText::new(format!("{key}: {value}"))
        .small()
        .color(egui::Color32::from_rgb(205, 215, 225));
    ui.group(|ui| {
        ui.label(text);
    });
}
