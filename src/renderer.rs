use macroquad::prelude::*;

use ecosim::creature::Creature;
use ecosim::energy::FoodItem;
use ecosim::simulation::SimState;
use ecosim::world::World;

const BG_COLOR: Color = Color::new(0.96, 0.95, 0.92, 1.0);
const FOOD_COLOR: Color = Color::new(0.416, 0.69, 0.298, 1.0);

/// Paint the world, its food and creatures, then the HUD.
pub fn draw(sim: &SimState) {
    clear_background(BG_COLOR);
    set_default_camera();

    draw_world_background(&sim.world);
    draw_food(sim.food());
    draw_creatures(sim.creatures());
    draw_hud(sim);
}

fn draw_world_background(world: &World) {
    draw_rectangle_lines(
        0.0, 0.0, world.width(), world.height(), 2.0,
        Color::new(0.78, 0.74, 0.68, 1.0),
    );
}

fn draw_food(food: &[FoodItem]) {
    for item in food {
        draw_circle(item.pos.x, item.pos.y, item.size, FOOD_COLOR);
    }
}

fn draw_creatures(creatures: &[Creature]) {
    for creature in creatures {
        draw_circle(creature.pos.x, creature.pos.y, creature.size, creature.color);
        draw_circle_lines(
            creature.pos.x,
            creature.pos.y,
            creature.sense,
            1.0,
            Color::new(creature.color.r, creature.color.g, creature.color.b, 0.06),
        );
    }
}

fn draw_hud(sim: &SimState) {
    let tc = Color::new(0.29, 0.29, 0.29, 1.0);

    let stats = &sim.stats().current;
    let hud_text = format!(
        "t={}s  creatures={}  food={}",
        stats.time, stats.population, stats.food_count
    );
    draw_text(&hud_text, 10.0, screen_height() - 12.0, 18.0, tc);

    if !sim.is_running() {
        let hint = if sim.creatures().is_empty() {
            "Click to spawn creatures, Space to start"
        } else {
            "PAUSED (Space to resume)"
        };
        let tw = measure_text(hint, None, 24, 1.0).width;
        let x = screen_width() * 0.5 - tw * 0.5;
        draw_text(hint, x, screen_height() * 0.5, 24.0, Color::new(0.84, 0.57, 0.33, 0.9));
    }
}
