use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

/// Serialized seating state as it travels between the hive and its nodes.
///
/// Every field is carried verbatim, including `geometry`, which receivers
/// keep as-is instead of re-deriving it from `seating`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct WireState {
    pub names: Vec<String>,
    pub group_names: Vec<String>,
    /// Half-open `[start, end)` column ranges, one per group.
    pub group_indexes: Vec<[usize; 2]>,
    pub group_weights: Vec<u32>,
    pub seating: Vec<Vec<u8>>,
    /// One weight per column.
    pub weights: Vec<u32>,
    pub fixed: Vec<Vec<bool>>,
    pub geometry: Vec<Vec<u8>>,
}

impl WireState {
    /// Hex SHA-256 over the canonical JSON encoding.
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        // Serializing plain vectors and strings cannot fail.
        let json = serde_json::to_vec(self).unwrap_or_default();
        hasher.update(&json);
        hex::encode(hasher.finalize())
    }

    pub fn persons(&self) -> usize {
        self.seating.len()
    }
}
