use super::{emit, rng_for};
use crate::reports;
use clap::Args;
use rayon::prelude::*;
use seatforge_core::config::Config;
use seatforge_core::formats::{read_text_file, write_text};
use seatforge_core::report::{dump, report};
use seatforge_core::seeding::start_seating;
use seatforge_core::{SearchOutcome, Searcher, SfResult};
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct OptimizeArgs {
    #[command(flatten)]
    pub config: Config,

    /// Plain-text plan to start from (a generated seating when absent)
    pub input: Option<PathBuf>,

    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Independent searches, run in parallel
    #[arg(short = 'a', long, default_value_t = 1)]
    pub attempts: usize,
}

pub fn run(args: OptimizeArgs, config: Config) -> SfResult<()> {
    let mut rng = rng_for(&config);

    let mut start = match &args.input {
        Some(path) => {
            info!("📂 Loading seating: {:?}", path);
            read_text_file(path)?
        }
        None => start_seating(&config.seed, &mut rng)?,
    };
    if config.search.shuffle {
        start.shuffle(&mut rng);
    }

    let initial = config.search.energy.evaluate(&start);
    info!("🚀 Initial energy: {}", initial);

    let searcher = Searcher::from(&config.search);
    let seeds: Vec<u64> = (0..args.attempts.max(1)).map(|_| rng.u64(..)).collect();

    let outcomes = seeds
        .par_iter()
        .map(|&seed| searcher.search(start.clone(), &mut fastrand::Rng::with_seed(seed)))
        .collect::<SfResult<Vec<SearchOutcome>>>()?;

    let energies: Vec<u64> = outcomes.iter().map(|o| o.energy).collect();
    let best = outcomes
        .into_iter()
        .min_by_key(|o| o.energy)
        .map_or(start, |o| o.state);

    println!("{}", dump(&best));
    println!("{}", report(&best));
    reports::print_attempts(initial, &energies);

    info!("\n=== 🏆 FINAL RESULT ===");
    info!("Energy: {}", config.search.energy.evaluate(&best));

    match &args.output {
        Some(path) => emit(&write_text(&best), Some(path)),
        None => Ok(()),
    }
}
