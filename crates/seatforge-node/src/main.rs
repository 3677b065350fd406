use clap::Parser;
use seatforge_core::stepper::DEFAULT_MAX_SWAP_ATTEMPTS;
use seatforge_core::{EnergyKind, Stepper};
use seatforge_node::{run_worker, HiveClient, WorkerOptions};
use std::time::Duration;
use sysinfo::System;
use tracing::{info, warn};
use uuid::Uuid;

#[derive(Parser)]
#[command(version, about = "Pulls the hive's best seating, improves it, pushes it back")]
struct Cli {
    /// Hive Server URL
    #[arg(long, default_value = "http://localhost:5000")]
    hive: String,

    /// Searcher iterations per round
    #[arg(long, default_value_t = 1_000)]
    iterations: usize,

    /// Independent searches per round (defaults to the CPU count)
    #[arg(long)]
    threads: Option<usize>,

    /// Stop after this many rounds
    #[arg(long)]
    rounds: Option<usize>,

    #[arg(long, value_enum, default_value_t = Stepper::ClosenessGuided)]
    stepper: Stepper,

    #[arg(long, value_enum, default_value_t = EnergyKind::Square)]
    energy: EnergyKind,

    #[arg(long, default_value_t = DEFAULT_MAX_SWAP_ATTEMPTS)]
    max_swap_attempts: usize,

    /// Swaps tried together per iteration
    #[arg(long)]
    batch: Option<usize>,

    #[arg(long)]
    seed: Option<u64>,

    /// Back-off when the hive is empty or unreachable
    #[arg(long, default_value_t = 5)]
    idle_secs: u64,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();
    let cli = Cli::parse();

    let node_id = format!("node-{}", Uuid::new_v4().simple());
    log_host(&node_id);

    let threads = cli.threads.unwrap_or_else(num_cpus::get).max(1);
    if let Err(e) = rayon::ThreadPoolBuilder::new()
        .num_threads(threads)
        .build_global()
    {
        warn!("Could not size the search pool: {}", e);
    }

    let opts = WorkerOptions {
        iterations: cli.iterations,
        threads,
        stepper: cli.stepper,
        energy: cli.energy,
        max_swap_attempts: cli.max_swap_attempts,
        batch: cli.batch,
        rounds: cli.rounds,
        idle: Duration::from_secs(cli.idle_secs),
        seed: cli.seed,
    };

    let client = HiveClient::new(cli.hive);
    let summary = run_worker(&client, &opts).await;
    info!(
        "🏁 {} finished {} rounds: {} accepted, {} failed",
        node_id, summary.rounds, summary.accepted, summary.failed
    );
}

fn log_host(node_id: &str) {
    let mut sys = System::new();
    sys.refresh_cpu();
    sys.refresh_memory();
    let host_name = System::host_name().unwrap_or_else(|| "Unknown".into());

    info!("🔌 SeatForge Node {}", node_id);
    info!("🖥️  Host: {}", host_name);
    info!("🧠  CPU: {} cores", sys.cpus().len());
    info!("💾  RAM: {} MB", sys.total_memory() / 1024 / 1024);
}
