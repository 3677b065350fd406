use anyhow::Context;
use clap::Parser;
use seatforge_core::config::SeedParams;
use seatforge_core::formats::read_text_file;
use seatforge_core::seeding::start_seating;
use seatforge_core::{EnergyKind, StateKeeper};
use seatforge_hive::AppState;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{info, warn};

#[derive(Parser)]
#[command(version, about = "Holds the best seating and arbitrates worker submissions")]
struct Args {
    #[arg(long, default_value_t = 5000)]
    port: u16,

    /// Plain-text plan to start from
    #[arg(long, conflicts_with = "seed_layout")]
    input: Option<PathBuf>,

    /// Start from a generated seating instead of waiting for a worker
    #[arg(long, default_value_t = false)]
    seed_layout: bool,

    #[command(flatten)]
    shape: SeedParams,

    #[arg(long, default_value_t = false)]
    shuffle: bool,

    #[arg(long, value_enum, default_value_t = EnergyKind::Square)]
    energy: EnergyKind,

    #[arg(long)]
    seed: Option<u64>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();
    let args = Args::parse();

    info!("🐝 SeatForge Hive is initializing...");

    let mut rng = match args.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };

    let initial = if let Some(path) = &args.input {
        info!("📂 Loading seating from {:?}", path);
        Some(read_text_file(path).with_context(|| format!("reading {}", path.display()))?)
    } else if args.seed_layout {
        info!(
            "🌱 Seeding {} persons, {} meals x {} tables, {} groups",
            args.shape.persons, args.shape.meals, args.shape.tables, args.shape.groups
        );
        Some(start_seating(&args.shape, &mut rng)?)
    } else {
        warn!("⚠️ No initial seating. Waiting for the first submission.");
        None
    };

    let keeper = match initial {
        Some(mut state) => {
            if args.shuffle {
                state.shuffle(&mut rng);
            }
            StateKeeper::with_state(args.energy, state)
        }
        None => StateKeeper::new(args.energy),
    };

    let app = seatforge_hive::app(Arc::new(AppState::new(keeper)));

    let addr = SocketAddr::from(([0, 0, 0, 0], args.port));
    info!("🚀 Hive listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("binding {}", addr))?;
    axum::serve(listener, app).await?;
    Ok(())
}
