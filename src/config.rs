// All tunable simulation constants in one place.

use serde::{Deserialize, Serialize};

// World
pub const DEFAULT_WORLD_WIDTH: u32 = 1280;
pub const DEFAULT_WORLD_HEIGHT: u32 = 720;

// Simulation
pub const TICKS_PER_SECOND: u64 = 60;
pub const FIXED_DT: f64 = 1.0 / TICKS_PER_SECOND as f64;
pub const MAX_FRAME_TIME: f64 = 0.1;

// Creatures
pub const INITIAL_CREATURE_ENERGY: f32 = 100.0;
pub const IDLE_METABOLIC_COST: f32 = 0.1;
pub const SPEED_METABOLIC_COST: f32 = 0.05;
pub const SIZE_METABOLIC_COST: f32 = 0.02;
pub const WANDER_FACTOR: f32 = 0.5;
pub const SPAWN_CLUSTER_SIZE: usize = 5;
pub const SPAWN_JITTER: f32 = 10.0;

// Food
pub const FOOD_ENERGY: f32 = 50.0;
pub const FOOD_SIZE: f32 = 3.0;
pub const FOOD_INTERVAL_BASE: u32 = 25;
pub const FOOD_SPAWN_RATE_MIN: u32 = 1;
pub const FOOD_SPAWN_RATE_MAX: u32 = 20;
pub const DEFAULT_FOOD_SPAWN_RATE: u32 = 10;

// Genome sampling ranges
pub const HUE_RANGE: (f32, f32) = (0.0, 360.0);
pub const SPEED_RANGE: (f32, f32) = (0.5, 2.5);
pub const SIZE_RANGE: (f32, f32) = (4.0, 10.0);
pub const SENSE_RANGE: (f32, f32) = (50.0, 150.0);
pub const MAX_AGE_RANGE: (f32, f32) = (800.0, 1500.0);
pub const REPRODUCE_ENERGY_RANGE: (f32, f32) = (120.0, 180.0);

// Mutation
pub const MUTATION_RATE_MIN: f32 = 0.0;
pub const MUTATION_RATE_MAX: f32 = 0.2;
pub const DEFAULT_MUTATION_RATE: f32 = 0.05;
pub const SPEED_MUTATION_STEP: f32 = 0.2;
pub const SIZE_MUTATION_STEP: f32 = 0.5;
pub const SENSE_MUTATION_STEP: f32 = 10.0;
pub const SPEED_FLOOR: f32 = 0.2;
pub const SIZE_FLOOR: f32 = 2.0;
pub const SENSE_FLOOR: f32 = 20.0;

// Genome preview panel
pub const PREVIEW_SPEED_RANGE: (f32, f32) = (0.5, 3.0);
pub const PREVIEW_SIZE_RANGE: (f32, f32) = (3.0, 15.0);
pub const PREVIEW_DEFAULT_SPEED: f32 = 1.5;
pub const PREVIEW_DEFAULT_SIZE: f32 = 7.0;

/// Runtime-tunable parameters. Setters clamp into the documented domains so
/// slider or CLI misuse degrades instead of breaking the tick loop.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimParams {
    food_spawn_rate: u32,
    mutation_rate: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            food_spawn_rate: DEFAULT_FOOD_SPAWN_RATE,
            mutation_rate: DEFAULT_MUTATION_RATE,
        }
    }
}

impl SimParams {
    pub fn new(food_spawn_rate: u32, mutation_rate: f32) -> Self {
        let mut params = Self::default();
        params.set_food_spawn_rate(food_spawn_rate);
        params.set_mutation_rate(mutation_rate);
        params
    }

    pub fn food_spawn_rate(&self) -> u32 {
        self.food_spawn_rate
    }

    pub fn mutation_rate(&self) -> f32 {
        self.mutation_rate
    }

    /// Returns the value actually stored.
    pub fn set_food_spawn_rate(&mut self, rate: u32) -> u32 {
        self.food_spawn_rate = rate.clamp(FOOD_SPAWN_RATE_MIN, FOOD_SPAWN_RATE_MAX);
        self.food_spawn_rate
    }

    /// Returns the value actually stored. Non-finite input disables mutation.
    pub fn set_mutation_rate(&mut self, rate: f32) -> f32 {
        self.mutation_rate = if rate.is_finite() {
            rate.clamp(MUTATION_RATE_MIN, MUTATION_RATE_MAX)
        } else {
            MUTATION_RATE_MIN
        };
        self.mutation_rate
    }

    /// Ticks between food spawns, or `None` if the rate leaves no positive interval.
    pub fn food_interval(&self) -> Option<u64> {
        food_interval_for(self.food_spawn_rate)
    }
}

pub fn food_interval_for(food_spawn_rate: u32) -> Option<u64> {
    match FOOD_INTERVAL_BASE.checked_sub(food_spawn_rate) {
        Some(0) | None => None,
        Some(interval) => Some(interval as u64),
    }
}
