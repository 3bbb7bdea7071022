use ::rand::Rng;
use macroquad::prelude::*;
use serde::{Deserialize, Serialize};

use crate::config;

/// Heritable traits of a creature. Offspring receive a mutated copy; the
/// parent's genome is never touched.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Genome {
    /// Hue angle in degrees, [0, 360).
    pub hue: f32,
    pub speed: f32,
    pub size: f32,
    pub sense: f32,
    pub max_age: f32,
    pub reproduce_energy: f32,
}

impl Genome {
    pub fn random(rng: &mut impl Rng) -> Self {
        Self {
            hue: random_hue(rng),
            speed: sample(rng, config::SPEED_RANGE),
            size: sample(rng, config::SIZE_RANGE),
            sense: sample(rng, config::SENSE_RANGE),
            max_age: sample(rng, config::MAX_AGE_RANGE),
            reproduce_energy: sample(rng, config::REPRODUCE_ENERGY_RANGE),
        }
    }

    /// Mutate a copy of this genome, returning the child genome.
    ///
    /// Speed, size and sense each drift with probability `rate` and are
    /// re-floored afterwards. Hue is re-rolled with probability `2 * rate`
    /// (saturating at 1). `max_age` and `reproduce_energy` are inherited as-is.
    pub fn mutate(&self, rate: f32, rng: &mut impl Rng) -> Self {
        let mut child = self.clone();
        let p = probability(rate);

        if rng.gen::<f32>() < p {
            child.speed = drift(rng, child.speed, config::SPEED_MUTATION_STEP, config::SPEED_FLOOR);
        }
        if rng.gen::<f32>() < p {
            child.size = drift(rng, child.size, config::SIZE_MUTATION_STEP, config::SIZE_FLOOR);
        }
        if rng.gen::<f32>() < p {
            child.sense = drift(rng, child.sense, config::SENSE_MUTATION_STEP, config::SENSE_FLOOR);
        }
        if rng.gen::<f32>() < probability(rate * 2.0) {
            child.hue = random_hue(rng);
        }

        child
    }

    pub fn color(&self) -> Color {
        hue_color(self.hue)
    }
}

/// Creature fill color: HSL(hue, 70%, 60%).
pub fn hue_color(hue: f32) -> Color {
    macroquad::color::hsl_to_rgb(hue.rem_euclid(360.0) / 360.0, 0.7, 0.6)
}

/// Hue used by the genome preview panel: faster bodies shift toward blue.
pub fn preview_hue(speed: f32) -> f32 {
    180.0 + (speed - 1.5) * 50.0
}

/// Radius used by the genome preview panel.
pub fn preview_radius(size: f32) -> f32 {
    size * 3.0
}

fn probability(rate: f32) -> f32 {
    if rate.is_finite() {
        rate.clamp(0.0, 1.0)
    } else {
        0.0
    }
}

fn drift(rng: &mut impl Rng, value: f32, step: f32, floor: f32) -> f32 {
    (value + rng.gen_range(-step..step)).max(floor)
}

fn sample(rng: &mut impl Rng, (lo, hi): (f32, f32)) -> f32 {
    rng.gen_range(lo..=hi)
}

fn random_hue(rng: &mut impl Rng) -> f32 {
    rng.gen_range(config::HUE_RANGE.0..config::HUE_RANGE.1)
}
