use scalerpc::rpc::{RpcCodecError, RpcErrorObject, SubscriptionId};
use std::io;

/// Represents errors that can occur during an RPC call from the perspective of the caller.
#[derive(Debug, thiserror::Error)]
pub enum RpcCallerError {
    /// The connection was torn down before the call or subscription completed,
    /// or the call was issued after teardown.
    #[error("connection closed")]
    ConnectionClosed,

    /// No response arrived within the caller's deadline. A response arriving
    /// later is discarded.
    #[error("call timed out")]
    Timeout,

    /// The node answered but the payload did not decode into the expected type.
    #[error("failed to decode result: {0}")]
    Decode(#[source] RpcCodecError),

    #[error("failed to encode request: {0}")]
    Encode(#[source] RpcCodecError),

    /// The node answered with a JSON-RPC error object.
    #[error("remote error {code}: {message}")]
    RemoteError { code: i64, message: String },

    #[error("unknown subscription `{0}`")]
    UnknownSubscription(SubscriptionId),

    /// The response named this call's id but was not a well-formed reply.
    #[error("malformed response: {0}")]
    Malformed(String),

    /// An operation descriptor failed startup validation.
    #[error("invalid operation `{operation}`: {reason}")]
    InvalidOperation {
        operation: &'static str,
        reason: String,
    },

    #[error("transport error: {0}")]
    Transport(#[from] io::Error),
}

impl From<RpcErrorObject> for RpcCallerError {
    fn from(error: RpcErrorObject) -> Self {
        RpcCallerError::RemoteError {
            code: error.code,
            message: error.message,
        }
    }
}
