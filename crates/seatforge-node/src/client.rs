use crate::error::NodeResult;
use reqwest::Client;
use seatforge_core::protocol::{CurrentStateResponse, SubmitStateResponse};
use seatforge_core::SeatingState;

/// The hive's best state as seen by a worker.
#[derive(Debug, Clone)]
pub struct PulledState {
    pub state: SeatingState,
    pub energy: Option<u64>,
    pub fingerprint: Option<String>,
}

/// Thin wrapper over the two hive operations a worker needs.
#[derive(Debug, Clone)]
pub struct HiveClient {
    client: Client,
    base: String,
}

impl HiveClient {
    pub fn new(base: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base: base.into().trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base
    }

    /// `None` while the hive holds nothing.
    pub async fn fetch_current(&self) -> NodeResult<Option<PulledState>> {
        let resp: CurrentStateResponse = self
            .client
            .get(format!("{}/state", self.base))
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let Some(wire) = resp.state else {
            return Ok(None);
        };
        Ok(Some(PulledState {
            state: SeatingState::from_wire(wire)?,
            energy: resp.energy,
            fingerprint: resp.fingerprint,
        }))
    }

    pub async fn submit_candidate(&self, state: &SeatingState) -> NodeResult<SubmitStateResponse> {
        Ok(self
            .client
            .post(format!("{}/state", self.base))
            .json(&state.to_wire())
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?)
    }
}
