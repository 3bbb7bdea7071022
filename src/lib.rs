pub mod config;
pub mod contact;
pub mod control;
pub mod creature;
pub mod drive;
pub mod energy;
pub mod genome;
pub mod reporting;
pub mod reproduction;
pub mod simulation;
pub mod stats;
pub mod world;

use tracing_subscriber::EnvFilter;

/// Install the stderr log subscriber. `RUST_LOG` overrides the default `info` level.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init();
}
