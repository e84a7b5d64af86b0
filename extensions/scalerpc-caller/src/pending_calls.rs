use crate::error::RpcCallerError;
use crate::rpc_correlator::OpenedSubscription;
use futures::channel::oneshot;
use serde_json::Value;
use std::collections::HashMap;

pub(crate) type CallSlot = oneshot::Sender<Result<Value, RpcCallerError>>;
pub(crate) type AckSlot = oneshot::Sender<Result<OpenedSubscription, RpcCallerError>>;

/// Completion slot of one in-flight request.
pub(crate) enum PendingCall {
    Call(CallSlot),
    /// A subscribe request; its ack turns into a live subscription.
    Subscribe {
        ack: AckSlot,
        unsubscribe_method: String,
    },
}

impl PendingCall {
    /// Resolves the slot with `error`. The waiting caller may already be gone.
    pub fn fail(self, error: RpcCallerError) {
        match self {
            PendingCall::Call(slot) => {
                let _ = slot.send(Err(error));
            }
            PendingCall::Subscribe { ack, .. } => {
                let _ = ack.send(Err(error));
            }
        }
    }
}

/// Tracks requests waiting for a response, keyed by request id.
#[derive(Default)]
pub(crate) struct PendingCalls {
    calls: HashMap<u64, PendingCall>,
}

impl PendingCalls {
    pub fn register(&mut self, id: u64, call: PendingCall) {
        self.calls.insert(id, call);
    }

    /// Removes the entry for `id`; `None` if it already reached an outcome.
    pub fn remove(&mut self, id: u64) -> Option<PendingCall> {
        self.calls.remove(&id)
    }

    pub fn drain(&mut self) -> Vec<PendingCall> {
        self.calls.drain().map(|(_, call)| call).collect()
    }

    pub fn len(&self) -> usize {
        self.calls.len()
    }
}
