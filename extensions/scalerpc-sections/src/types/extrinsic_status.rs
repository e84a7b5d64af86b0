use super::BlockHash;
use serde::{Deserialize, Serialize};

/// Progress of a watched extrinsic through the transaction pool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ExtrinsicStatus {
    Future,
    Ready,
    /// Peers the extrinsic was gossiped to.
    Broadcast(Vec<String>),
    InBlock(BlockHash),
    Retracted(BlockHash),
    FinalityTimeout(BlockHash),
    Finalized(BlockHash),
    Usurped(BlockHash),
    Dropped,
    Invalid,
}

impl ExtrinsicStatus {
    /// No further updates follow a final status.
    pub fn is_final(&self) -> bool {
        matches!(
            self,
            ExtrinsicStatus::FinalityTimeout(_)
                | ExtrinsicStatus::Finalized(_)
                | ExtrinsicStatus::Usurped(_)
                | ExtrinsicStatus::Dropped
                | ExtrinsicStatus::Invalid
        )
    }
}
