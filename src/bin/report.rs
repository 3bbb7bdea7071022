//! Headless seeded run that prints a JSON summary of the population series.

use std::process::ExitCode;

use clap::Parser;
use ecosim::config::{self, SimParams};
use ecosim::control::Controller;
use ecosim::reporting::{self, RunReport};
use ecosim::simulation::SimState;
use ecosim::stats::HistorySnapshot;
use ecosim::world::{SimError, World};
use thiserror::Error;
use tracing::{error, info};

#[derive(Debug, Error)]
enum ReportError {
    #[error(transparent)]
    World(#[from] SimError),
    #[error("failed to encode report: {0}")]
    Encode(#[from] serde_json::Error),
}

#[derive(Parser, Debug, Clone)]
#[command(
    name = "ecosim-report",
    version,
    about = "Run a seeded ecosystem without a window and print a JSON summary"
)]
struct ReportArgs {
    /// Seed for the simulation RNG.
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Ticks to simulate (60 per simulated second).
    #[arg(long, default_value_t = 60 * config::TICKS_PER_SECOND)]
    ticks: u64,
    /// Founders dropped at the world center before the first tick.
    #[arg(long, default_value_t = 20)]
    founders: usize,
    #[arg(long, default_value_t = config::DEFAULT_WORLD_WIDTH)]
    width: u32,
    #[arg(long, default_value_t = config::DEFAULT_WORLD_HEIGHT)]
    height: u32,
    /// Food spawn rate; clamped to the slider range.
    #[arg(long = "food-rate", default_value_t = config::DEFAULT_FOOD_SPAWN_RATE)]
    food_spawn_rate: u32,
    /// Per-trait mutation probability; clamped to the slider range.
    #[arg(long, default_value_t = config::DEFAULT_MUTATION_RATE)]
    mutation_rate: f32,
}

fn run(args: &ReportArgs) -> Result<RunReport, ReportError> {
    let world = World::new(args.width, args.height)?;
    let params = SimParams::new(args.food_spawn_rate, args.mutation_rate);
    let sim = SimState::new(world, params, args.seed);
    let mut controller: Controller<Vec<HistorySnapshot>> = Controller::new(sim, Vec::new());

    controller.spawn_at(world.center(), args.founders);
    controller.start();
    for _ in 0..args.ticks {
        controller.step_once();
    }
    controller.stop();

    let sim = controller.sim();
    let (population, avg_speed, avg_size, extinct_pct) = reporting::summarize_history(sim.history());
    info!(
        ticks = sim.tick_count(),
        population = sim.creatures().len(),
        snapshots = sim.history().len(),
        "headless run finished"
    );
    Ok(RunReport {
        seed: args.seed,
        ticks: sim.tick_count(),
        founders: args.founders,
        params: sim.params,
        final_population: sim.creatures().len(),
        final_food: sim.food().len(),
        extinct_pct,
        population,
        avg_speed,
        avg_size,
        history: controller.chart().clone(),
    })
}

fn main() -> ExitCode {
    ecosim::init_tracing();

    let args = ReportArgs::parse();
    let result = run(&args).and_then(|report| Ok(serde_json::to_string_pretty(&report)?));

    match result {
        Ok(json) => {
            println!("{json}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            error!(%err, "report failed");
            ExitCode::FAILURE
        }
    }
}
