use super::{RpcNotification, RpcResponse};

/// Classification of one inbound text frame.
#[derive(Debug, Clone, PartialEq)]
pub enum RpcInbound {
    Response(RpcResponse),
    Notification(RpcNotification),
    /// Structurally unexpected text. `id` is set when the frame still named a
    /// numeric call id, so that call can be failed right away.
    Malformed { id: Option<u64>, reason: String },
}

impl RpcInbound {
    pub(crate) fn malformed(id: Option<u64>, reason: impl Into<String>) -> Self {
        RpcInbound::Malformed {
            id,
            reason: reason.into(),
        }
    }
}
