use ::rand::Rng;
use macroquad::prelude::*;

use crate::config;
use crate::creature::Creature;
use crate::world::World;

/// Static food pellet.
#[derive(Clone, Debug, PartialEq)]
pub struct FoodItem {
    pub pos: Vec2,
    pub size: f32,
}

impl FoodItem {
    pub fn new(pos: Vec2) -> Self {
        Self {
            pos,
            size: config::FOOD_SIZE,
        }
    }
}

/// Spawn one pellet on ticks that fall on the spawn interval.
/// Returns true if a pellet was added.
pub fn spawn_food(
    food: &mut Vec<FoodItem>,
    tick: u64,
    interval: Option<u64>,
    world: &World,
    rng: &mut impl Rng,
) -> bool {
    let Some(interval) = interval else {
        return false;
    };
    if tick % interval != 0 {
        return false;
    }
    food.push(FoodItem::new(vec2(
        rng.gen_range(0.0..world.width()),
        rng.gen_range(0.0..world.height()),
    )));
    true
}

/// Let a creature eat every pellet its body overlaps. Returns how many were eaten.
pub fn consume_food(creature: &mut Creature, food: &mut Vec<FoodItem>) -> usize {
    let before = food.len();
    food.retain(|item| creature.pos.distance(item.pos) >= creature.size);
    let eaten = before - food.len();
    creature.energy += config::FOOD_ENERGY * eaten as f32;
    eaten
}

/// Remove starved and aged-out creatures. Returns how many were removed.
pub fn cull_dead(creatures: &mut Vec<Creature>) -> usize {
    let before = creatures.len();
    creatures.retain(|c| !c.is_dead());
    before - creatures.len()
}
