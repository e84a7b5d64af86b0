use scalerpc_caller::{RpcTransport, RpcTransportState};
use std::io;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, PoisonError};
use tokio::sync::mpsc::UnboundedSender;
use tokio_tungstenite::tungstenite::protocol::Message as WsMessage;

pub(crate) type StateHandler = Arc<dyn Fn(RpcTransportState) + Send + Sync>;

/// Outbound side of one WebSocket connection. Frames are queued to the send
/// loop owned by [`WsClient`](crate::WsClient).
pub(crate) struct WsTransport {
    tx: UnboundedSender<WsMessage>,
    connected: AtomicBool,
    state_handler: Mutex<Option<StateHandler>>,
}

impl WsTransport {
    pub(crate) fn new(tx: UnboundedSender<WsMessage>) -> Self {
        Self {
            tx,
            connected: AtomicBool::new(true),
            state_handler: Mutex::new(None),
        }
    }

    /// Installs the handler and reports the current state to it right away.
    pub(crate) fn set_state_handler(&self, handler: StateHandler) {
        *self
            .state_handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(Arc::clone(&handler));

        if self.is_connected() {
            handler(RpcTransportState::Connected);
        }
    }

    /// Queues a control frame regardless of connection state.
    pub(crate) fn send_control(&self, message: WsMessage) {
        let _ = self.tx.send(message);
    }

    /// Flips to disconnected, notifying the handler once. Returns whether
    /// this call made the transition.
    pub(crate) fn mark_disconnected(&self) -> bool {
        if !self.connected.swap(false, Ordering::SeqCst) {
            return false;
        }

        let handler = self
            .state_handler
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        if let Some(handler) = handler {
            handler(RpcTransportState::Disconnected);
        }
        true
    }
}

impl RpcTransport for WsTransport {
    fn send(&self, text: String) -> io::Result<()> {
        if !self.is_connected() {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "websocket is disconnected",
            ));
        }
        self.tx
            .send(WsMessage::text(text))
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "send loop has exited"))
    }

    fn disconnect(&self) {
        if self.mark_disconnected() {
            self.send_control(WsMessage::Close(None));
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
