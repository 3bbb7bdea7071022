use ::rand::Rng;
use macroquad::prelude::*;

use crate::config;
use crate::energy::FoodItem;
use crate::genome::Genome;
use crate::reproduction;
use crate::world::World;

#[derive(Clone, Debug)]
pub struct Creature {
    pub pos: Vec2,
    pub energy: f32,
    pub age: u32,
    pub genome: Genome,
    // Expressed traits, assigned from the genome by `apply_genome`.
    pub color: Color,
    pub speed: f32,
    pub size: f32,
    pub sense: f32,
    pub max_age: f32,
    pub reproduce_energy: f32,
}

impl Creature {
    /// Create a creature expressing `genome` at `pos` with starting energy.
    pub fn new_from_genome(genome: Genome, pos: Vec2) -> Self {
        let mut creature = Self {
            pos,
            energy: config::INITIAL_CREATURE_ENERGY,
            age: 0,
            genome,
            color: WHITE,
            speed: 0.0,
            size: 0.0,
            sense: 0.0,
            max_age: 0.0,
            reproduce_energy: 0.0,
        };
        creature.apply_genome();
        creature
    }

    /// A founder with a freshly sampled genome.
    pub fn founder(pos: Vec2, rng: &mut impl Rng) -> Self {
        Self::new_from_genome(Genome::random(rng), pos)
    }

    pub fn apply_genome(&mut self) {
        self.color = self.genome.color();
        self.speed = self.genome.speed;
        self.size = self.genome.size;
        self.sense = self.genome.sense;
        self.max_age = self.genome.max_age;
        self.reproduce_energy = self.genome.reproduce_energy;
    }

    /// Per-tick energy drain. Larger and faster bodies pay more.
    pub fn metabolic_cost(&self) -> f32 {
        config::IDLE_METABOLIC_COST
            + self.speed * config::SPEED_METABOLIC_COST
            + self.size * config::SIZE_METABOLIC_COST
    }

    /// Nearest food strictly inside the sense radius. On equal distances the
    /// earliest item in `food` wins.
    pub fn nearest_food<'a>(&self, food: &'a [FoodItem]) -> Option<&'a FoodItem> {
        let mut closest = None;
        let mut closest_dist = self.sense;
        for item in food {
            let dist = self.pos.distance(item.pos);
            if dist < closest_dist {
                closest_dist = dist;
                closest = Some(item);
            }
        }
        closest
    }

    /// Advance this creature by one tick: move, pay metabolism, age, clamp,
    /// then reproduce if over threshold. Returns the offspring, if any.
    pub fn update(
        &mut self,
        food: &[FoodItem],
        world: &World,
        mutation_rate: f32,
        rng: &mut impl Rng,
    ) -> Option<Creature> {
        match self.nearest_food(food) {
            Some(target) => {
                let dir = (target.pos - self.pos).normalize_or_zero();
                self.pos += dir * self.speed;
            }
            None => {
                let wander = self.speed * config::WANDER_FACTOR;
                self.pos.x += rng.gen_range(-1.0..1.0) * wander;
                self.pos.y += rng.gen_range(-1.0..1.0) * wander;
            }
        }

        self.energy -= self.metabolic_cost();
        self.age += 1;
        self.pos = world.clamp(self.pos, self.size);
        debug_assert!(world.contains(self.pos, self.size));

        reproduction::try_reproduce(self, mutation_rate, rng)
    }

    pub fn is_dead(&self) -> bool {
        self.energy <= 0.0 || self.age as f32 > self.max_age
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    pub(crate) fn test_genome() -> Genome {
        Genome {
            hue: 120.0,
            speed: 2.0,
            size: 5.0,
            sense: 100.0,
            max_age: 1000.0,
            reproduce_energy: 150.0,
        }
    }

    fn world() -> World {
        World::new(400, 300).unwrap()
    }

    #[test]
    fn apply_genome_copies_named_traits() {
        let creature = Creature::new_from_genome(test_genome(), vec2(50.0, 50.0));
        assert_eq!(creature.speed, 2.0);
        assert_eq!(creature.size, 5.0);
        assert_eq!(creature.sense, 100.0);
        assert_eq!(creature.max_age, 1000.0);
        assert_eq!(creature.reproduce_energy, 150.0);
        assert_eq!(creature.energy, config::INITIAL_CREATURE_ENERGY);
        assert_eq!(creature.age, 0);
    }

    #[test]
    fn moves_one_speed_step_toward_nearest_food() {
        let mut rng = ChaCha8Rng::seed_from_u64(1);
        let mut creature = Creature::new_from_genome(test_genome(), vec2(100.0, 100.0));
        let food = vec![
            FoodItem::new(vec2(100.0, 160.0)),
            FoodItem::new(vec2(130.0, 100.0)),
        ];
        creature.update(&food, &world(), 0.0, &mut rng);
        assert!((creature.pos - vec2(102.0, 100.0)).length() < 1e-4);
    }

    #[test]
    fn equidistant_food_prefers_first_found() {
        let creature = Creature::new_from_genome(test_genome(), vec2(100.0, 100.0));
        let food = vec![
            FoodItem::new(vec2(100.0, 130.0)),
            FoodItem::new(vec2(130.0, 100.0)),
        ];
        let target = creature.nearest_food(&food).unwrap();
        assert_eq!(target.pos, vec2(100.0, 130.0));
    }

    #[test]
    fn food_at_sense_radius_is_not_seen() {
        let creature = Creature::new_from_genome(test_genome(), vec2(100.0, 100.0));
        let food = vec![FoodItem::new(vec2(200.0, 100.0))];
        assert!(creature.nearest_food(&food).is_none());
    }

    #[test]
    fn wandering_stays_within_half_speed_per_axis() {
        let mut rng = ChaCha8Rng::seed_from_u64(7);
        let mut creature = Creature::new_from_genome(test_genome(), vec2(200.0, 150.0));
        for _ in 0..50 {
            let before = creature.pos;
            creature.update(&[], &world(), 0.0, &mut rng);
            let moved = creature.pos - before;
            assert!(moved.x.abs() <= 1.0 && moved.y.abs() <= 1.0);
        }
    }

    #[test]
    fn update_pays_metabolic_cost_and_ages() {
        let mut rng = ChaCha8Rng::seed_from_u64(2);
        let mut creature = Creature::new_from_genome(test_genome(), vec2(200.0, 150.0));
        let cost = creature.metabolic_cost();
        assert!((cost - (0.1 + 2.0 * 0.05 + 5.0 * 0.02)).abs() < 1e-6);

        creature.update(&[], &world(), 0.0, &mut rng);
        assert!((creature.energy - (100.0 - cost)).abs() < 1e-4);
        assert_eq!(creature.age, 1);
    }

    #[test]
    fn position_is_clamped_by_body_size() {
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut creature = Creature::new_from_genome(test_genome(), vec2(0.0, 299.0));
        creature.update(&[], &world(), 0.0, &mut rng);
        assert!(creature.pos.x >= 5.0);
        assert!(creature.pos.y <= 295.0);
    }

    #[test]
    fn body_wider_than_world_is_pinned_to_low_edge() {
        let mut rng = ChaCha8Rng::seed_from_u64(4);
        let world = World::new(8, 8).unwrap();
        let mut creature = Creature::new_from_genome(test_genome(), vec2(6.0, 2.0));
        creature.update(&[], &world, 0.0, &mut rng);
        assert_eq!(creature.pos, vec2(5.0, 5.0));
    }

    #[test]
    fn dies_from_starvation_or_old_age() {
        let mut creature = Creature::new_from_genome(test_genome(), vec2(10.0, 10.0));
        assert!(!creature.is_dead());
        creature.energy = 0.0;
        assert!(creature.is_dead());

        creature.energy = 50.0;
        creature.age = 1000;
        assert!(!creature.is_dead());
        creature.age = 1001;
        assert!(creature.is_dead());
    }
}
