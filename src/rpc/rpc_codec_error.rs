use crate::scale::ScaleError;

/// Failure converting between typed values and JSON envelope members.
#[derive(Debug, thiserror::Error)]
pub enum RpcCodecError {
    #[error(transparent)]
    Scale(#[from] ScaleError),

    #[error("invalid hex payload: {0}")]
    Hex(#[from] hex::FromHexError),

    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("expected {expected}, found `{found}`")]
    UnexpectedValue {
        expected: &'static str,
        found: String,
    },
}
