use clap::{ArgMatches, CommandFactory, FromArgMatches, Parser, Subcommand};
use seatforge_core::config::Config;
use seatforge_core::SfResult;
use std::path::{Path, PathBuf};
use std::process;
use tracing::{error, info};

mod cmd;
mod reports;

#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// JSON config; flags given on the command line win over its values
    #[arg(global = true, long)]
    config: Option<PathBuf>,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Generate a naive starting seating
    Seed(cmd::seed::SeedArgs),
    /// Run independent greedy searches and keep the best
    Optimize(cmd::optimize::OptimizeArgs),
    /// Print the dump, per-table group counts and a summary
    Report(cmd::report::ReportArgs),
    /// List the pairs that meet more than once
    Stats(cmd::stats::StatsArgs),
}

fn main() {
    tracing_subscriber::fmt::init();

    let matches = Cli::command().get_matches();
    let cli = Cli::from_arg_matches(&matches).unwrap_or_else(|e| e.exit());
    let sub_matches = matches.subcommand().map_or(&matches, |(_, m)| m);

    let result = match cli.command {
        Commands::Seed(args) => resolve_config(cli.config.as_deref(), &args.config, sub_matches)
            .and_then(|config| cmd::seed::run(args, config)),
        Commands::Optimize(args) => {
            resolve_config(cli.config.as_deref(), &args.config, sub_matches)
                .and_then(|config| cmd::optimize::run(args, config))
        }
        Commands::Report(args) => cmd::report::run(args),
        Commands::Stats(args) => cmd::stats::run(args),
    };

    if let Err(e) = result {
        error!("❌ {}", e);
        process::exit(1);
    }
}

fn resolve_config(path: Option<&Path>, cli: &Config, matches: &ArgMatches) -> SfResult<Config> {
    match path {
        Some(path) => {
            info!("⚙️  Loading config from {:?}", path);
            let mut config = Config::load_from_file(path)?;
            config.merge_from_cli(cli, matches);
            Ok(config)
        }
        None => Ok(cli.clone()),
    }
}
