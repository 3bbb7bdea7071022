use clap::Parser;
use macroquad::prelude::*;
use tracing::{info, warn};

mod renderer;
mod ui;

use ecosim::config::{self, SimParams};
use ecosim::control::Controller;
use ecosim::simulation::SimState;
use ecosim::world::World;
use ui::graphs::TraitChart;
use ui::UiState;

fn window_conf() -> Conf {
    Conf {
        window_title: "Ecosystem Evolution Simulator".to_string(),
        window_width: config::DEFAULT_WORLD_WIDTH as i32,
        window_height: config::DEFAULT_WORLD_HEIGHT as i32,
        window_resizable: true,
        high_dpi: true,
        ..Default::default()
    }
}

#[derive(Parser, Debug)]
#[command(name = "ecosim", version, about = "Interactive ecosystem evolution sandbox")]
struct WindowArgs {
    /// Seed for the simulation RNG.
    #[arg(long, default_value_t = 42)]
    seed: u64,
}

/// The world takes the viewport size once; it stays fixed for the run.
fn world_from_viewport() -> World {
    let (width, height) = (screen_width() as u32, screen_height() as u32);
    match World::new(width, height) {
        Ok(world) => world,
        Err(err) => {
            warn!(%err, "falling back to default world size");
            World::default()
        }
    }
}

#[macroquad::main(window_conf)]
async fn main() {
    ecosim::init_tracing();

    let seed = WindowArgs::parse().seed;
    let world = world_from_viewport();
    info!(seed, width = world.width(), height = world.height(), "ecosystem ready");

    let sim = SimState::new(world, SimParams::default(), seed);
    let mut controller = Controller::new(sim, TraitChart::new());
    let mut ui_state = UiState::default();

    loop {
        controller.frame(get_frame_time() as f64);

        // Spawn a cluster via left click (only if egui doesn't want the input)
        let mut egui_wants_pointer = false;
        egui_macroquad::cfg(|ctx| {
            egui_wants_pointer = ctx.wants_pointer_input();
        });
        if !egui_wants_pointer && is_mouse_button_pressed(MouseButton::Left) {
            let (x, y) = mouse_position();
            controller.spawn_cluster(vec2(x, y));
        }

        if is_key_pressed(KeyCode::Space) {
            controller.toggle();
        }
        if is_key_pressed(KeyCode::R) {
            controller.reset();
        }
        if is_key_pressed(KeyCode::Escape) {
            break;
        }

        renderer::draw(controller.sim());
        ui::draw_ui(&mut controller, &mut ui_state);

        next_frame().await;
    }

    controller.teardown();
    info!("window closed");
}
