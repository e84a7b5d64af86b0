use crate::error::RpcCallerError;
use crate::rpc_correlator::{OpenedSubscription, RpcCorrelator, SubscriptionEvent};
use futures::Stream;
use futures::channel::mpsc;
use futures::stream::FusedStream;
use scalerpc::rpc::{RpcCodecError, SubscriptionId};
use serde_json::Value;
use std::pin::Pin;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use std::task::{Context, Poll};
use std::time::Duration;

type DecodeFn<T> = Arc<dyn Fn(Value) -> Result<T, RpcCodecError> + Send + Sync>;

/// Handle able to stop a subscription independently of its stream.
#[derive(Clone)]
pub struct RpcSubscriptionStopper {
    id: SubscriptionId,
    correlator: Arc<RpcCorrelator>,
    timeout: Option<Duration>,
    /// Shared by every clone; set once the node confirmed the unsubscribe.
    stopped: Arc<AtomicBool>,
}

impl RpcSubscriptionStopper {
    pub fn id(&self) -> &SubscriptionId {
        &self.id
    }

    /// See [`RpcCorrelator::stop`]. Once a stop through this handle (or a
    /// clone of it) succeeded, later calls answer `true` without a lookup.
    pub async fn stop(&self) -> Result<bool, RpcCallerError> {
        if self.stopped.load(Ordering::Acquire) {
            return Ok(true);
        }
        let stopped = self.correlator.stop(&self.id, self.timeout).await?;
        if stopped {
            self.stopped.store(true, Ordering::Release);
        }
        Ok(stopped)
    }
}

/// Decoded notifications of one subscription, in arrival order.
///
/// Payloads are decoded as they are polled; a payload that fails to decode is
/// yielded as `Err(Decode)` and the stream carries on. A disconnect yields one
/// final `Err(ConnectionClosed)`. After [`stop`](Self::stop) succeeds the
/// stream ends. Once ended it stays ended.
///
/// Dropping the stream releases the subscription on the node.
pub struct RpcSubscription<T> {
    events: mpsc::UnboundedReceiver<SubscriptionEvent>,
    decode: DecodeFn<T>,
    stopper: RpcSubscriptionStopper,
    terminated: bool,
}

impl<T> RpcSubscription<T> {
    pub(crate) fn new(
        opened: OpenedSubscription,
        correlator: Arc<RpcCorrelator>,
        timeout: Option<Duration>,
        decode: DecodeFn<T>,
    ) -> Self {
        Self {
            events: opened.events,
            decode,
            stopper: RpcSubscriptionStopper {
                id: opened.id,
                correlator,
                timeout,
                stopped: Arc::new(AtomicBool::new(false)),
            },
            terminated: false,
        }
    }

    pub fn id(&self) -> &SubscriptionId {
        &self.stopper.id
    }

    pub fn stopper(&self) -> RpcSubscriptionStopper {
        self.stopper.clone()
    }

    pub async fn stop(&self) -> Result<bool, RpcCallerError> {
        self.stopper.stop().await
    }
}

impl<T> Stream for RpcSubscription<T> {
    type Item = Result<T, RpcCallerError>;

    fn poll_next(mut self: Pin<&mut Self>, cx: &mut Context<'_>) -> Poll<Option<Self::Item>> {
        if self.terminated {
            return Poll::Ready(None);
        }

        let item = match Pin::new(&mut self.events).poll_next(cx) {
            Poll::Pending => return Poll::Pending,
            Poll::Ready(None) => None,
            Poll::Ready(Some(Ok(value))) => Some((self.decode)(value).map_err(RpcCallerError::Decode)),
            Poll::Ready(Some(Err(error))) => {
                self.terminated = true;
                Some(Err(error))
            }
        };

        if item.is_none() {
            self.terminated = true;
        }
        Poll::Ready(item)
    }
}

impl<T> FusedStream for RpcSubscription<T> {
    fn is_terminated(&self) -> bool {
        self.terminated
    }
}

impl<T> Drop for RpcSubscription<T> {
    fn drop(&mut self) {
        if !self.terminated {
            self.stopper.correlator.release(&self.stopper.id);
        }
    }
}

/// A subscription driven on its own task by a callback.
#[cfg(feature = "tokio_support")]
pub struct RpcSubscriptionTask {
    stopper: RpcSubscriptionStopper,
    handle: tokio::task::JoinHandle<()>,
}

#[cfg(feature = "tokio_support")]
impl RpcSubscriptionTask {
    pub fn id(&self) -> &SubscriptionId {
        self.stopper.id()
    }

    /// Stops the subscription; the task ends once the stream does.
    pub async fn stop(&self) -> Result<bool, RpcCallerError> {
        self.stopper.stop().await
    }

    pub fn is_finished(&self) -> bool {
        self.handle.is_finished()
    }

    /// Waits for the callback task to run out of items.
    pub async fn join(self) {
        let _ = self.handle.await;
    }
}

#[cfg(feature = "tokio_support")]
impl<T: Send + 'static> RpcSubscription<T> {
    /// Moves the subscription onto a dedicated tokio task that invokes
    /// `callback` for every item, so a slow callback only delays its own
    /// subscription.
    pub fn with_callback<F>(self, mut callback: F) -> RpcSubscriptionTask
    where
        F: FnMut(Result<T, RpcCallerError>) + Send + 'static,
    {
        use futures::StreamExt;

        let stopper = self.stopper();
        let handle = tokio::spawn(async move {
            let mut subscription = self;
            while let Some(item) = subscription.next().await {
                callback(item);
            }
        });

        RpcSubscriptionTask { stopper, handle }
    }
}
