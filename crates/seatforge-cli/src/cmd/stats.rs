use crate::reports;
use clap::Args;
use seatforge_core::formats::read_text_file;
use seatforge_core::report::{pair_stats, write_pair_stats_csv};
use seatforge_core::SfResult;
use std::fs::File;
use std::path::PathBuf;
use tracing::info;

#[derive(Args, Debug, Clone)]
pub struct StatsArgs {
    pub input: PathBuf,

    /// Write every repeat pair as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Only print the worst N pairs
    #[arg(short = 'n', long)]
    pub top: Option<usize>,
}

pub fn run(args: StatsArgs) -> SfResult<()> {
    let state = read_text_file(&args.input)?;
    let stats = pair_stats(&state);

    let shown = args.top.map_or(stats.len(), |n| n.min(stats.len()));
    reports::print_pair_stats(&stats[..shown]);
    println!("{} pairs meet more than once", stats.len());

    if let Some(path) = &args.csv {
        write_pair_stats_csv(&stats, File::create(path)?)?;
        info!("💾 Wrote {:?}", path);
    }
    Ok(())
}
