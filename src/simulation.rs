use macroquad::prelude::*;
use ::rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;
use tracing::debug;

use crate::config::{self, SimParams};
use crate::creature::Creature;
use crate::energy::{self, FoodItem};
use crate::stats::{HistorySnapshot, SimStats};
use crate::world::World;

/// What a single `step` did, for the host and tests.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepOutcome {
    pub food_spawned: bool,
    pub food_eaten: usize,
    pub births: usize,
    pub deaths: usize,
    pub snapshot: Option<HistorySnapshot>,
}

/// The whole ecosystem: creatures, food, tick counter and statistics.
pub struct SimState {
    pub world: World,
    pub params: SimParams,
    creatures: Vec<Creature>,
    food: Vec<FoodItem>,
    stats: SimStats,
    rng: ChaCha8Rng,
    tick_count: u64,
    running: bool,
}

impl SimState {
    pub fn new(world: World, params: SimParams, seed: u64) -> Self {
        Self {
            world,
            params,
            creatures: Vec::new(),
            food: Vec::new(),
            stats: SimStats::new(),
            rng: ChaCha8Rng::seed_from_u64(seed),
            tick_count: 0,
            running: false,
        }
    }

    pub fn creatures(&self) -> &[Creature] {
        &self.creatures
    }

    #[cfg(test)]
    pub(crate) fn creatures_mut(&mut self) -> &mut Vec<Creature> {
        &mut self.creatures
    }

    pub fn food(&self) -> &[FoodItem] {
        &self.food
    }

    #[cfg(test)]
    pub(crate) fn food_mut(&mut self) -> &mut Vec<FoodItem> {
        &mut self.food
    }

    pub fn stats(&self) -> &SimStats {
        &self.stats
    }

    pub fn history(&self) -> &[HistorySnapshot] {
        self.stats.history()
    }

    pub fn tick_count(&self) -> u64 {
        self.tick_count
    }

    pub fn is_running(&self) -> bool {
        self.running
    }

    pub fn set_running(&mut self, running: bool) {
        self.running = running;
    }

    /// Advance one tick. Does nothing unless running.
    pub fn step(&mut self) -> StepOutcome {
        let mut outcome = StepOutcome::default();
        if !self.running {
            return outcome;
        }

        outcome.food_spawned = energy::spawn_food(
            &mut self.food,
            self.tick_count,
            self.params.food_interval(),
            &self.world,
            &mut self.rng,
        );

        // Offspring join after every pre-existing creature has acted.
        let mutation_rate = self.params.mutation_rate();
        let mut births = Vec::new();
        for creature in self.creatures.iter_mut() {
            if let Some(child) = creature.update(&self.food, &self.world, mutation_rate, &mut self.rng) {
                births.push(child);
            }
            outcome.food_eaten += energy::consume_food(creature, &mut self.food);
        }
        outcome.births = births.len();
        self.creatures.extend(births);

        outcome.deaths = energy::cull_dead(&mut self.creatures);

        self.tick_count += 1;

        outcome.snapshot = self.stats.record(self.tick_count, &self.creatures, self.food.len());
        if let Some(snap) = &outcome.snapshot {
            debug!(
                time = snap.time,
                population = snap.population,
                avg_speed = snap.avg_speed,
                avg_size = snap.avg_size,
                "history snapshot"
            );
        }
        outcome
    }

    /// Drop all creatures, food, ticks and history; leaves the world stopped.
    pub fn reset(&mut self) {
        self.running = false;
        self.creatures.clear();
        self.food.clear();
        self.tick_count = 0;
        self.stats.clear();
    }

    /// Add `count` founders jittered around `(x, y)`. Works while stopped.
    pub fn spawn_at(&mut self, x: f32, y: f32, count: usize) {
        let jitter = config::SPAWN_JITTER;
        for _ in 0..count {
            let pos = vec2(
                x + self.rng.gen_range(-jitter..jitter),
                y + self.rng.gen_range(-jitter..jitter),
            );
            let mut founder = Creature::founder(pos, &mut self.rng);
            founder.pos = self.world.clamp(founder.pos, founder.size);
            self.creatures.push(founder);
        }
        self.stats.refresh(self.tick_count, &self.creatures, self.food.len());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::creature::tests::test_genome;
    use crate::genome::Genome;

    fn running_sim(params: SimParams, seed: u64) -> SimState {
        let mut sim = SimState::new(World::new(800, 600).unwrap(), params, seed);
        sim.set_running(true);
        sim
    }

    fn no_food_params() -> SimParams {
        SimParams::new(config::FOOD_SPAWN_RATE_MIN, 0.0)
    }

    #[test]
    fn step_is_noop_while_stopped() {
        let mut sim = SimState::new(World::new(800, 600).unwrap(), SimParams::default(), 1);
        sim.spawn_at(100.0, 100.0, 3);
        let before: Vec<Vec2> = sim.creatures().iter().map(|c| c.pos).collect();

        assert_eq!(sim.step(), StepOutcome::default());
        assert_eq!(sim.tick_count(), 0);
        assert!(sim.food().is_empty());
        let after: Vec<Vec2> = sim.creatures().iter().map(|c| c.pos).collect();
        assert_eq!(before, after);
    }

    #[test]
    fn food_spawns_every_fifteen_ticks_at_rate_ten() {
        let mut sim = running_sim(SimParams::new(10, 0.0), 2);
        let spawn_ticks: Vec<u64> = (0..61)
            .filter_map(|_| {
                let tick = sim.tick_count();
                sim.step().food_spawned.then_some(tick)
            })
            .collect();
        assert_eq!(spawn_ticks, vec![0, 15, 30, 45, 60]);
        assert_eq!(sim.food().len(), 5);
    }

    /// Burn the tick-0 food spawn on an empty world so the next ticks run without pellets.
    fn past_first_spawn(sim: &mut SimState) {
        sim.step();
        sim.food_mut().clear();
    }

    #[test]
    fn five_founders_after_one_tick() {
        let mut sim = running_sim(no_food_params(), 3);
        past_first_spawn(&mut sim);
        sim.spawn_at(100.0, 100.0, 5);
        let genomes: Vec<Genome> = sim.creatures().iter().map(|c| c.genome.clone()).collect();

        sim.step();

        assert_eq!(sim.creatures().len(), 5);
        for (creature, genome) in sim.creatures().iter().zip(&genomes) {
            assert_eq!(&creature.genome, genome);
            assert_eq!(creature.age, 1);
            let cost = 0.1 + genome.speed * 0.05 + genome.size * 0.02;
            assert!((creature.energy - (100.0 - cost)).abs() < 1e-4);
        }
    }

    #[test]
    fn energy_drops_by_cost_each_tick_without_food() {
        let mut sim = running_sim(no_food_params(), 4);
        past_first_spawn(&mut sim);
        let genome = test_genome();
        sim.creatures_mut()
            .push(Creature::new_from_genome(genome.clone(), vec2(300.0, 300.0)));
        let cost = 0.1 + genome.speed * 0.05 + genome.size * 0.02;

        // Tick 24 spawns a pellet; stop short of it.
        let mut expected = 100.0f32;
        for _ in 0..20 {
            sim.step();
            expected -= cost;
            let creature = &sim.creatures()[0];
            assert_eq!(creature.genome, genome);
            assert!((creature.energy - expected).abs() < 1e-3);
        }
        assert_eq!(sim.creatures()[0].age, 20);
    }

    #[test]
    fn positions_stay_in_bounds_over_long_run() {
        let mut sim = running_sim(SimParams::new(20, 0.2), 5);
        sim.spawn_at(5.0, 5.0, 10);
        sim.spawn_at(795.0, 595.0, 10);
        for _ in 0..2_000 {
            sim.step();
            for c in sim.creatures() {
                assert!(c.pos.x >= c.size && c.pos.x <= 800.0 - c.size);
                assert!(c.pos.y >= c.size && c.pos.y <= 600.0 - c.size);
            }
        }
    }

    #[test]
    fn dead_creatures_are_gone_after_the_tick() {
        let mut sim = running_sim(no_food_params(), 6);
        past_first_spawn(&mut sim);
        let mut dying = Creature::new_from_genome(test_genome(), vec2(300.0, 300.0));
        dying.energy = 0.05;
        let mut ancient = Creature::new_from_genome(test_genome(), vec2(400.0, 300.0));
        ancient.age = 1000;
        sim.creatures_mut().push(dying);
        sim.creatures_mut().push(ancient);
        sim.creatures_mut()
            .push(Creature::new_from_genome(test_genome(), vec2(500.0, 300.0)));

        let outcome = sim.step();
        assert_eq!(outcome.deaths, 2);
        assert_eq!(sim.creatures().len(), 1);
        assert!(sim.creatures().iter().all(|c| !c.is_dead()));
    }

    #[test]
    fn first_creature_wins_contested_food() {
        let mut sim = running_sim(no_food_params(), 7);
        past_first_spawn(&mut sim);
        sim.food_mut().push(FoodItem::new(vec2(300.0, 300.0)));
        let mut genome = test_genome();
        genome.speed = 0.5;
        sim.creatures_mut()
            .push(Creature::new_from_genome(genome.clone(), vec2(302.0, 300.0)));
        sim.creatures_mut()
            .push(Creature::new_from_genome(genome, vec2(298.0, 300.0)));

        let outcome = sim.step();
        assert_eq!(outcome.food_eaten, 1);
        assert!(sim.creatures()[0].energy > 100.0);
        assert!(sim.creatures()[1].energy < 100.0);
    }

    #[test]
    fn offspring_is_appended_and_not_updated_same_tick() {
        let mut sim = running_sim(no_food_params(), 8);
        past_first_spawn(&mut sim);
        let mut parent = Creature::new_from_genome(test_genome(), vec2(300.0, 300.0));
        parent.energy = 200.0;
        sim.creatures_mut().push(parent);

        let outcome = sim.step();
        assert_eq!(outcome.births, 1);
        assert_eq!(sim.creatures().len(), 2);
        let child = &sim.creatures()[1];
        assert_eq!(child.age, 0);
        assert_eq!(child.pos, sim.creatures()[0].pos);
        assert_eq!(child.energy, sim.creatures()[0].energy);
    }

    #[test]
    fn history_never_outruns_elapsed_seconds() {
        let mut sim = running_sim(SimParams::default(), 9);
        sim.spawn_at(400.0, 300.0, 20);
        for _ in 0..(60 * 5 + 30) {
            sim.step();
            let seconds = sim.tick_count() / config::TICKS_PER_SECOND;
            assert!(sim.history().len() as u64 <= seconds);
        }
        assert_eq!(sim.history().len(), 5);
        let times: Vec<u64> = sim.history().iter().map(|s| s.time).collect();
        assert_eq!(times, vec![1, 2, 3, 4, 5]);
    }

    #[test]
    fn reset_is_total_and_idempotent() {
        let mut sim = running_sim(SimParams::default(), 10);
        sim.spawn_at(400.0, 300.0, 5);
        for _ in 0..120 {
            sim.step();
        }
        for _ in 0..2 {
            sim.reset();
            assert!(sim.creatures().is_empty());
            assert!(sim.food().is_empty());
            assert_eq!(sim.tick_count(), 0);
            assert!(sim.history().is_empty());
            assert!(!sim.is_running());
        }
    }

    #[test]
    fn spawn_clusters_founders_within_jitter() {
        let mut sim = SimState::new(World::new(800, 600).unwrap(), SimParams::default(), 11);
        sim.spawn_at(400.0, 300.0, config::SPAWN_CLUSTER_SIZE);
        assert_eq!(sim.creatures().len(), 5);
        assert_eq!(sim.stats().current.population, 5);
        for c in sim.creatures() {
            assert!((c.pos.x - 400.0).abs() <= config::SPAWN_JITTER);
            assert!((c.pos.y - 300.0).abs() <= config::SPAWN_JITTER);
            assert_eq!(c.energy, config::INITIAL_CREATURE_ENERGY);
        }
    }

    #[test]
    fn spawning_on_a_second_boundary_does_not_duplicate_history() {
        let mut sim = running_sim(SimParams::default(), 12);
        sim.spawn_at(400.0, 300.0, 5);
        for _ in 0..60 {
            sim.step();
        }
        assert_eq!(sim.history().len(), 1);
        sim.set_running(false);
        sim.spawn_at(200.0, 200.0, 5);
        assert_eq!(sim.history().len(), 1);
    }

    #[test]
    fn same_seed_replays_identically() {
        let run = |seed| {
            let mut sim = running_sim(SimParams::default(), seed);
            sim.spawn_at(400.0, 300.0, 10);
            for _ in 0..600 {
                sim.step();
            }
            sim.history().to_vec()
        };
        assert_eq!(run(42), run(42));
    }
}
