use super::{BlockHash, BlockNumber};
use serde::{Deserialize, Serialize};
use serde_json::Value;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Header {
    pub parent_hash: BlockHash,
    pub number: BlockNumber,
    pub state_root: BlockHash,
    pub extrinsics_root: BlockHash,
    /// Digest logs, kept undecoded.
    #[serde(default)]
    pub digest: Value,
}
