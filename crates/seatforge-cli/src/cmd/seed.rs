use super::{emit, rng_for};
use clap::Args;
use seatforge_core::config::Config;
use seatforge_core::formats::write_text;
use seatforge_core::seeding::start_seating;
use seatforge_core::SfResult;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct SeedArgs {
    #[command(flatten)]
    pub config: Config,

    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

pub fn run(args: SeedArgs, config: Config) -> SfResult<()> {
    let mut rng = rng_for(&config);
    let shape = config.seed;

    info!(
        "🌱 Seeding {} persons, {} meals x {} tables, {} groups",
        shape.persons, shape.meals, shape.tables, shape.groups
    );
    let mut state = start_seating(&shape, &mut rng)?;
    if config.search.shuffle {
        state.shuffle(&mut rng);
    }
    info!("Energy: {}", config.search.energy.evaluate(&state));

    emit(&write_text(&state), args.output.as_deref())
}
