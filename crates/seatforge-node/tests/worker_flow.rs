use axum::{extract::State, routing::get, Json, Router};
use seatforge_core::config::SeedParams;
use seatforge_core::protocol::{CurrentStateResponse, SubmitStateResponse, Verdict, WireState};
use seatforge_core::seeding::start_seating;
use seatforge_core::{EnergyKind, SeatingState};
use seatforge_node::{run_round, run_worker, HiveClient, RoundOutcome, WorkerOptions, WorkerSummary};
use std::net::SocketAddr;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::net::TcpListener;

// Mock Hive: serves a fixed state and accepts everything
#[derive(Default)]
struct MockHive {
    held: Option<(WireState, u64)>,
    received: Mutex<Vec<WireState>>,
}

async fn current(State(hive): State<Arc<MockHive>>) -> Json<CurrentStateResponse> {
    Json(match &hive.held {
        Some((wire, energy)) => CurrentStateResponse {
            state: Some(wire.clone()),
            energy: Some(*energy),
            fingerprint: Some(wire.fingerprint()),
        },
        None => CurrentStateResponse::default(),
    })
}

async fn submit(
    State(hive): State<Arc<MockHive>>,
    Json(wire): Json<WireState>,
) -> Json<SubmitStateResponse> {
    hive.received.lock().unwrap().push(wire);
    Json(SubmitStateResponse {
        verdict: Verdict::Accepted,
        energy: Some(0),
    })
}

async fn spawn_mock(hive: Arc<MockHive>) -> String {
    let app = Router::new()
        .route("/state", get(current).post(submit))
        .with_state(hive);

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = TcpListener::bind(addr).await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    format!("http://127.0.0.1:{}", port)
}

fn naive_state() -> SeatingState {
    let params = SeedParams {
        persons: 20,
        meals: 3,
        tables: 4,
        groups: 1,
    };
    start_seating(&params, &mut fastrand::Rng::with_seed(2)).unwrap()
}

fn options(rounds: Option<usize>) -> WorkerOptions {
    WorkerOptions {
        iterations: 50,
        threads: 2,
        rounds,
        idle: Duration::from_millis(10),
        seed: Some(17),
        ..Default::default()
    }
}

#[tokio::test]
async fn test_empty_hive_means_idle_round() {
    let url = spawn_mock(Arc::new(MockHive::default())).await;
    let client = HiveClient::new(url);
    let mut rng = fastrand::Rng::with_seed(1);

    let outcome = run_round(&client, &options(Some(1)), &mut rng).await.unwrap();
    assert!(matches!(outcome, RoundOutcome::Idle));
}

#[tokio::test]
async fn test_round_pulls_searches_and_pushes() {
    let start = naive_state();
    let held = EnergyKind::Square.evaluate(&start);
    let hive = Arc::new(MockHive {
        held: Some((start.to_wire(), held)),
        ..Default::default()
    });
    let url = spawn_mock(hive.clone()).await;
    let client = HiveClient::new(format!("{}/", url));
    let mut rng = fastrand::Rng::with_seed(1);

    let outcome = run_round(&client, &options(Some(1)), &mut rng).await.unwrap();
    let RoundOutcome::Submitted { energy, response } = outcome else {
        panic!("expected a submission");
    };
    assert!(response.accepted());
    assert!(energy <= held);

    let received = hive.received.lock().unwrap();
    assert_eq!(received.len(), 1);
    let pushed = SeatingState::from_wire(received[0].clone()).unwrap();
    assert_eq!(EnergyKind::Square.evaluate(&pushed), energy);
    assert_eq!(pushed.names(), start.names());
}

#[tokio::test]
async fn test_worker_counts_accepted_rounds() {
    let start = naive_state();
    let held = EnergyKind::Square.evaluate(&start);
    let hive = Arc::new(MockHive {
        held: Some((start.to_wire(), held)),
        ..Default::default()
    });
    let url = spawn_mock(hive.clone()).await;

    let summary = run_worker(&HiveClient::new(url), &options(Some(3))).await;
    assert_eq!(
        summary,
        WorkerSummary {
            rounds: 3,
            accepted: 3,
            failed: 0
        }
    );
    assert_eq!(hive.received.lock().unwrap().len(), 3);
}

#[tokio::test]
async fn test_worker_survives_unreachable_hive() {
    // Nothing listens on port 1.
    let client = HiveClient::new("http://127.0.0.1:1");
    let summary = run_worker(&client, &options(Some(2))).await;
    assert_eq!(summary.rounds, 2);
    assert_eq!(summary.accepted, 0);
    assert_eq!(summary.failed, 2);
}
