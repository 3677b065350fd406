use crate::state::WireState;
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Answer to `GET /state`. A `None` state means the hive holds nothing yet.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct CurrentStateResponse {
    pub state: Option<WireState>,
    pub energy: Option<u64>,
    pub fingerprint: Option<String>,
}

#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
pub enum Verdict {
    Accepted,
    Discarded,
}

/// Answer to `POST /state`.
#[derive(Serialize, Deserialize, Clone, Debug)]
pub struct SubmitStateResponse {
    pub verdict: Verdict,
    /// Energy of the state the hive holds after the challenge.
    pub energy: Option<u64>,
}

impl SubmitStateResponse {
    pub fn accepted(&self) -> bool {
        self.verdict == Verdict::Accepted
    }
}

/// Answer to `GET /status`.
#[derive(Serialize, Deserialize, Clone, Debug, Default)]
pub struct HiveStatus {
    pub accepted: u64,
    pub discarded: u64,
    pub energy: Option<u64>,
    pub fingerprint: Option<String>,
    /// RFC 3339 timestamp of the last accepted submission.
    pub last_accepted: Option<String>,
}
