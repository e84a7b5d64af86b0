use crate::RpcTransport;
use crate::error::RpcCallerError;
use crate::pending_calls::{PendingCall, PendingCalls};
use crate::subscription_table::{SubscriptionEntry, SubscriptionState, SubscriptionTable};
use futures::channel::{mpsc, oneshot};
use scalerpc::rpc::{RpcEnvelopeCoder, RpcInbound, RpcNotification, RpcResponse, SubscriptionId};
use serde_json::Value;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

/// One item on a subscription channel: a raw notification payload, or the
/// terminal error when the connection goes away.
pub type SubscriptionEvent = Result<Value, RpcCallerError>;

/// A subscription that the node acknowledged.
#[derive(Debug)]
pub struct OpenedSubscription {
    pub id: SubscriptionId,
    pub events: mpsc::UnboundedReceiver<SubscriptionEvent>,
}

#[derive(Default)]
struct CorrelatorState {
    next_id: u64,
    pending: PendingCalls,
    subscriptions: SubscriptionTable,
    closed: bool,
}

impl CorrelatorState {
    /// Ids start at 1 and are never reissued on the same connection.
    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

/// Removes its pending entry when the awaiting call goes away, whatever the
/// reason (completion, timeout, send failure, dropped future).
struct PendingGuard<'a> {
    correlator: &'a RpcCorrelator,
    id: u64,
}

impl Drop for PendingGuard<'_> {
    fn drop(&mut self) {
        self.correlator.state().pending.remove(self.id);
    }
}

/// Multiplexes calls and subscriptions over one transport connection.
///
/// Every outbound request gets a fresh id and a completion slot; inbound text
/// is routed by [`read_text`](Self::read_text) to the slot with the matching
/// id, or to the channel of the matching subscription. Each pending call and
/// subscription reaches exactly one terminal outcome.
pub struct RpcCorrelator {
    transport: Arc<dyn RpcTransport>,
    coder: Arc<RpcEnvelopeCoder>,
    state: Mutex<CorrelatorState>,
}

impl RpcCorrelator {
    pub fn new(transport: Arc<dyn RpcTransport>, coder: Arc<RpcEnvelopeCoder>) -> Self {
        Self {
            transport,
            coder,
            state: Mutex::new(CorrelatorState::default()),
        }
    }

    pub fn coder(&self) -> &Arc<RpcEnvelopeCoder> {
        &self.coder
    }

    pub fn transport(&self) -> &Arc<dyn RpcTransport> {
        &self.transport
    }

    pub fn is_closed(&self) -> bool {
        self.state().closed
    }

    pub fn pending_count(&self) -> usize {
        self.state().pending.len()
    }

    pub fn subscription_count(&self) -> usize {
        self.state().subscriptions.len()
    }

    fn state(&self) -> MutexGuard<'_, CorrelatorState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn register(&self, call: PendingCall) -> Result<u64, RpcCallerError> {
        let mut state = self.state();
        if state.closed {
            return Err(RpcCallerError::ConnectionClosed);
        }
        let id = state.allocate_id();
        state.pending.register(id, call);
        Ok(id)
    }

    fn send_request(&self, id: u64, method: &str, params: Vec<Value>) -> Result<(), RpcCallerError> {
        let text = self
            .coder
            .encode(id, method, params)
            .map_err(RpcCallerError::Encode)?;
        tracing::trace!(id, method, "sending request");
        self.transport.send(text).map_err(RpcCallerError::Transport)
    }

    /// Sends `method` and waits for the correlated result.
    pub async fn invoke_call(
        &self,
        method: &str,
        params: Vec<Value>,
        timeout: Option<Duration>,
    ) -> Result<Value, RpcCallerError> {
        let (slot, mut completion) = oneshot::channel();
        let id = self.register(PendingCall::Call(slot))?;
        let _guard = PendingGuard {
            correlator: self,
            id,
        };

        self.send_request(id, method, params)?;
        await_completion(id, &mut completion, timeout).await
    }

    /// Sends a subscribe request and waits for the node's subscription id.
    ///
    /// The subscription is registered while the ack is routed, so the
    /// returned channel already holds any notification that followed it.
    pub async fn open_subscription(
        &self,
        subscribe_method: &str,
        unsubscribe_method: &str,
        params: Vec<Value>,
        timeout: Option<Duration>,
    ) -> Result<OpenedSubscription, RpcCallerError> {
        let (ack, mut completion) = oneshot::channel();
        let id = self.register(PendingCall::Subscribe {
            ack,
            unsubscribe_method: unsubscribe_method.to_owned(),
        })?;
        let _guard = PendingGuard {
            correlator: self,
            id,
        };

        self.send_request(id, subscribe_method, params)?;
        let outcome = await_completion(id, &mut completion, timeout).await;

        if matches!(outcome, Err(RpcCallerError::Timeout)) {
            // An ack routed between the deadline and here is already in the
            // slot; once closed, later acks are released by the router.
            completion.close();
            if let Ok(Some(Ok(late))) = completion.try_recv() {
                tracing::debug!(id, subscription = %late.id, "releasing subscription acked after timeout");
                self.release(&late.id);
            }
        }
        outcome
    }

    /// Unsubscribes and closes the subscription's channel.
    ///
    /// Returns `Ok(true)` once the node confirmed, and again for every later
    /// call with the same id. Any other answer leaves the subscription active
    /// and returns `Ok(false)`. Notifications arriving while the unsubscribe is
    /// in flight are dropped.
    pub async fn stop(
        &self,
        subscription: &SubscriptionId,
        timeout: Option<Duration>,
    ) -> Result<bool, RpcCallerError> {
        let unsubscribe_method = {
            let mut state = self.state();
            if state.subscriptions.is_retired(subscription) {
                return Ok(true);
            }
            let Some(entry) = state.subscriptions.get_mut(subscription) else {
                return Err(RpcCallerError::UnknownSubscription(subscription.clone()));
            };
            if entry.state == SubscriptionState::Stopping {
                tracing::debug!(%subscription, "stop already in flight");
                return Ok(true);
            }
            entry.state = SubscriptionState::Stopping;
            entry.unsubscribe_method.clone()
        };

        let outcome = self
            .invoke_call(&unsubscribe_method, vec![subscription.to_value()], timeout)
            .await;

        let mut state = self.state();
        match outcome {
            Ok(Value::Bool(true)) => {
                state.subscriptions.retire(subscription);
                drop(state);
                tracing::debug!(%subscription, "subscription stopped");
                Ok(true)
            }
            other => {
                if let Some(entry) = state.subscriptions.get_mut(subscription) {
                    entry.state = SubscriptionState::Active;
                }
                drop(state);
                let answer = other?;
                tracing::warn!(%subscription, %answer, "node did not confirm unsubscribe");
                Ok(false)
            }
        }
    }

    /// Routes one inbound text frame. Must be called in arrival order.
    pub fn read_text(&self, text: &str) {
        match self.coder.decode(text) {
            RpcInbound::Response(response) => self.route_response(response),
            RpcInbound::Notification(notification) => self.route_notification(notification),
            RpcInbound::Malformed {
                id: Some(id),
                reason,
            } => {
                tracing::warn!(id, %reason, "malformed response");
                let call = self.state().pending.remove(id);
                match call {
                    Some(call) => call.fail(RpcCallerError::Malformed(reason)),
                    None => tracing::debug!(id, "malformed response for retired call id"),
                }
            }
            RpcInbound::Malformed { id: None, reason } => {
                tracing::warn!(%reason, "discarding malformed inbound frame");
            }
        }
    }

    fn route_response(&self, response: RpcResponse) {
        let RpcResponse { id, outcome } = response;
        let mut state = self.state();

        let Some(call) = state.pending.remove(id) else {
            drop(state);
            tracing::debug!(id, "discarding response for retired call id");
            return;
        };

        match call {
            PendingCall::Call(slot) => {
                drop(state);
                let _ = slot.send(outcome.map_err(RpcCallerError::from));
            }
            PendingCall::Subscribe {
                ack,
                unsubscribe_method,
            } => {
                let opened = match outcome {
                    Err(error) => Err(RpcCallerError::from(error)),
                    Ok(value) => match SubscriptionId::from_value(&value) {
                        Some(subscription) => {
                            let (sender, events) = mpsc::unbounded();
                            let entry = SubscriptionEntry::new(sender, unsubscribe_method);
                            if state.subscriptions.insert(subscription.clone(), entry) {
                                tracing::warn!(%subscription, "replacing live subscription with reused id");
                            }
                            Ok(OpenedSubscription {
                                id: subscription,
                                events,
                            })
                        }
                        None => Err(RpcCallerError::Malformed(format!(
                            "subscription ack `{value}` is not a subscription id"
                        ))),
                    },
                };
                drop(state);

                if let Err(Ok(orphan)) = ack.send(opened) {
                    self.release(&orphan.id);
                }
            }
        }
    }

    fn route_notification(&self, notification: RpcNotification) {
        let RpcNotification {
            method,
            subscription,
            result,
        } = notification;

        // Routed by subscription id alone; `method` is only logged.
        let delivered = {
            let state = self.state();
            match state.subscriptions.get(&subscription) {
                Some(entry) if entry.state == SubscriptionState::Active => {
                    Some(entry.sender.unbounded_send(Ok(result)).is_ok())
                }
                _ => None,
            }
        };

        match delivered {
            Some(true) => {}
            Some(false) => self.release(&subscription),
            None => tracing::trace!(%subscription, %method, "dropping notification for inactive subscription"),
        }
    }

    /// Retires a subscription nobody listens to any more and tells the node,
    /// without waiting for its answer.
    pub(crate) fn release(&self, subscription: &SubscriptionId) {
        let (id, unsubscribe_method) = {
            let mut state = self.state();
            let Some(entry) = state.subscriptions.retire(subscription) else {
                return;
            };
            if state.closed {
                return;
            }
            (state.allocate_id(), entry.unsubscribe_method)
        };

        tracing::debug!(%subscription, "subscriber dropped; unsubscribing");
        if let Err(err) = self.send_request(id, &unsubscribe_method, vec![subscription.to_value()]) {
            tracing::debug!(%subscription, %err, "unsubscribe for dropped subscriber not sent");
        }
    }

    /// Tears down every pending call and subscription with `ConnectionClosed`.
    ///
    /// Idempotent. Calls issued afterwards fail immediately.
    pub fn on_disconnect(&self) {
        let (pending, subscriptions) = {
            let mut state = self.state();
            if state.closed {
                return;
            }
            state.closed = true;
            (state.pending.drain(), state.subscriptions.retire_all())
        };

        tracing::debug!(
            pending = pending.len(),
            subscriptions = subscriptions.len(),
            "connection closed; failing outstanding work"
        );

        for call in pending {
            call.fail(RpcCallerError::ConnectionClosed);
        }
        for entry in subscriptions {
            let _ = entry.sender.unbounded_send(Err(RpcCallerError::ConnectionClosed));
        }
    }

    /// Closes the transport and tears down outstanding work.
    pub fn disconnect(&self) {
        self.transport.disconnect();
        self.on_disconnect();
    }
}

async fn await_completion<T>(
    id: u64,
    completion: &mut oneshot::Receiver<Result<T, RpcCallerError>>,
    timeout: Option<Duration>,
) -> Result<T, RpcCallerError> {
    let outcome = match timeout {
        Some(limit) => match tokio::time::timeout(limit, completion).await {
            Ok(outcome) => outcome,
            Err(_) => {
                tracing::debug!(id, ?limit, "call timed out");
                return Err(RpcCallerError::Timeout);
            }
        },
        None => completion.await,
    };

    // A slot dropped without a verdict only happens during teardown.
    outcome.unwrap_or(Err(RpcCallerError::ConnectionClosed))
}
