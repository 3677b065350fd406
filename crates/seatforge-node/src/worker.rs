use crate::client::HiveClient;
use crate::error::{NodeError, NodeResult};
use rayon::prelude::*;
use seatforge_core::protocol::SubmitStateResponse;
use seatforge_core::stepper::DEFAULT_MAX_SWAP_ATTEMPTS;
use seatforge_core::{EnergyKind, SearchOutcome, SeatingError, SeatingState, Searcher, SfResult, Stepper};
use std::time::Duration;
use tracing::{error, info, warn};

#[derive(Debug, Clone)]
pub struct WorkerOptions {
    /// Searcher iterations per round, per thread.
    pub iterations: usize,
    /// Independent searches per round.
    pub threads: usize,
    pub stepper: Stepper,
    pub energy: EnergyKind,
    pub max_swap_attempts: usize,
    pub batch: Option<usize>,
    /// `None` runs until the process is stopped.
    pub rounds: Option<usize>,
    /// Back-off after an empty hive or a failed request.
    pub idle: Duration,
    pub seed: Option<u64>,
}

impl Default for WorkerOptions {
    fn default() -> Self {
        Self {
            iterations: 1_000,
            threads: num_cpus::get(),
            stepper: Stepper::ClosenessGuided,
            energy: EnergyKind::Square,
            max_swap_attempts: DEFAULT_MAX_SWAP_ATTEMPTS,
            batch: None,
            rounds: None,
            idle: Duration::from_secs(5),
            seed: None,
        }
    }
}

impl WorkerOptions {
    pub fn searcher(&self) -> Searcher {
        Searcher::builder()
            .stepper(self.stepper)
            .energy(self.energy)
            .iterations(self.iterations)
            .max_swap_attempts(self.max_swap_attempts)
            .batch(self.batch)
            .build()
    }
}

#[derive(Debug)]
pub enum RoundOutcome {
    /// The hive had nothing to work on.
    Idle,
    Submitted {
        energy: u64,
        response: SubmitStateResponse,
    },
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct WorkerSummary {
    pub rounds: usize,
    pub accepted: usize,
    pub failed: usize,
}

/// Runs one search per seed, each on its own copy of `start`, and keeps the
/// lowest-energy result. Ties go to the earliest seed.
pub fn search_parallel(
    start: &SeatingState,
    searcher: &Searcher,
    seeds: &[u64],
) -> SfResult<SearchOutcome> {
    let outcomes = seeds
        .par_iter()
        .map(|&seed| searcher.search(start.clone(), &mut fastrand::Rng::with_seed(seed)))
        .collect::<SfResult<Vec<_>>>()?;

    outcomes
        .into_iter()
        .min_by_key(|o| o.energy)
        .ok_or_else(|| SeatingError::Validation("no searches were run".to_string()))
}

/// Pull, search, push.
pub async fn run_round(
    client: &HiveClient,
    opts: &WorkerOptions,
    rng: &mut fastrand::Rng,
) -> NodeResult<RoundOutcome> {
    let Some(pulled) = client.fetch_current().await? else {
        return Ok(RoundOutcome::Idle);
    };

    let held = pulled
        .energy
        .unwrap_or_else(|| opts.energy.evaluate(&pulled.state));
    info!(
        "📋 Pulled state {} | energy {}",
        pulled.fingerprint.as_deref().map_or("?", |f| &f[..f.len().min(12)]),
        held
    );

    let seeds: Vec<u64> = (0..opts.threads.max(1)).map(|_| rng.u64(..)).collect();
    let searcher = opts.searcher();
    let start = pulled.state;

    info!("🔨 Working... ({} searches x {} iterations)", seeds.len(), opts.iterations);
    let best = tokio::task::spawn_blocking(move || search_parallel(&start, &searcher, &seeds))
        .await??;

    info!("📤 Submitting result: energy {} (pulled {})", best.energy, held);
    let response = client.submit_candidate(&best.state).await?;

    Ok(RoundOutcome::Submitted {
        energy: best.energy,
        response,
    })
}

/// Loops [`run_round`] until `opts.rounds` is reached. Failures are logged
/// and followed by a back-off; they never end the loop.
pub async fn run_worker(client: &HiveClient, opts: &WorkerOptions) -> WorkerSummary {
    let mut rng = match opts.seed {
        Some(seed) => fastrand::Rng::with_seed(seed),
        None => fastrand::Rng::new(),
    };
    let mut summary = WorkerSummary::default();

    info!("🤖 Worker connecting to Hive at {}", client.base_url());

    while opts.rounds.is_none_or(|limit| summary.rounds < limit) {
        summary.rounds += 1;
        match run_round(client, opts, &mut rng).await {
            Ok(RoundOutcome::Idle) => {
                info!("zzz... Hive holds no state yet.");
                tokio::time::sleep(opts.idle).await;
            }
            Ok(RoundOutcome::Submitted { response, .. }) => {
                if response.accepted() {
                    summary.accepted += 1;
                    info!("✅ Submission accepted! Hive energy {:?}", response.energy);
                } else {
                    info!("❌ Submission discarded. Hive energy {:?}", response.energy);
                }
            }
            Err(NodeError::Http(e)) => {
                summary.failed += 1;
                warn!("Hive unreachable ({}). Retrying in {:?}...", e, opts.idle);
                tokio::time::sleep(opts.idle).await;
            }
            Err(e) => {
                summary.failed += 1;
                error!("Round failed: {}", e);
                tokio::time::sleep(opts.idle).await;
            }
        }
    }

    summary
}
