use crate::ws_transport::WsTransport;
use futures_util::{SinkExt, StreamExt};
use scalerpc::rpc::RpcEnvelopeCoder;
use scalerpc::scale::{ScaleRegistry, ScaleRegistryBuilder};
use scalerpc_caller::{RpcCorrelator, RpcTransport, RpcTransportState, SectionDispatcher};
use std::io;
use std::sync::Arc;
use tokio::sync::mpsc::unbounded_channel;
use tokio::task::JoinHandle;
use tokio_tungstenite::connect_async;
use tokio_tungstenite::tungstenite::{self, protocol::Message as WsMessage};

/// WebSocket connection to a node, wired to a correlator and dispatcher.
///
/// Dropping the client aborts its background tasks and fails any
/// outstanding calls and subscriptions with `ConnectionClosed`.
pub struct WsClient {
    transport: Arc<WsTransport>,
    dispatcher: SectionDispatcher,
    task_handles: Vec<JoinHandle<()>>,
}

impl WsClient {
    pub async fn new(host: &str, port: u16) -> io::Result<WsClient> {
        Self::connect(&format!("ws://{host}:{port}")).await
    }

    /// Connects with a registry holding only the primitive codecs.
    pub async fn connect(url: &str) -> io::Result<WsClient> {
        let registry = ScaleRegistryBuilder::new().with_primitives().build();
        Self::connect_with_registry(url, Arc::new(registry)).await
    }

    pub async fn connect_with_registry(
        url: &str,
        registry: Arc<ScaleRegistry>,
    ) -> io::Result<WsClient> {
        let (ws_stream, _) = connect_async(url).await.map_err(|err| match err {
            tungstenite::Error::Io(io_err) => io_err,
            other => io::Error::other(other),
        })?;
        tracing::debug!(url, "websocket connected");

        let (mut sender, mut receiver) = ws_stream.split();
        let (tx, mut rx) = unbounded_channel::<WsMessage>();

        let transport = Arc::new(WsTransport::new(tx));
        let correlator = Arc::new(RpcCorrelator::new(
            Arc::clone(&transport) as Arc<dyn RpcTransport>,
            Arc::new(RpcEnvelopeCoder::new()),
        ));
        let dispatcher = SectionDispatcher::new(registry, Arc::clone(&correlator));

        // Send loop
        let send_task = tokio::spawn(async move {
            while let Some(message) = rx.recv().await {
                let closing = matches!(message, WsMessage::Close(_));
                if let Err(err) = sender.send(message).await {
                    tracing::debug!(%err, "websocket send failed");
                    break;
                }
                if closing {
                    break;
                }
            }
        });

        // Receive loop
        let recv_transport = Arc::clone(&transport);
        let recv_task = tokio::spawn(async move {
            while let Some(message) = receiver.next().await {
                match message {
                    Ok(WsMessage::Text(text)) => correlator.read_text(text.as_str()),
                    Ok(WsMessage::Binary(bytes)) => match std::str::from_utf8(&bytes) {
                        Ok(text) => correlator.read_text(text),
                        Err(_) => tracing::warn!(len = bytes.len(), "dropping non-UTF-8 binary frame"),
                    },
                    Ok(WsMessage::Ping(payload)) => {
                        recv_transport.send_control(WsMessage::Pong(payload));
                    }
                    Ok(WsMessage::Close(frame)) => {
                        tracing::debug!(?frame, "server closed the connection");
                        break;
                    }
                    Ok(_) => {}
                    Err(err) => {
                        tracing::warn!(%err, "websocket receive failed");
                        break;
                    }
                }
            }

            recv_transport.mark_disconnected();
            correlator.on_disconnect();
        });

        Ok(WsClient {
            transport,
            dispatcher,
            task_handles: vec![send_task, recv_task],
        })
    }

    pub fn dispatcher(&self) -> &SectionDispatcher {
        &self.dispatcher
    }

    pub fn correlator(&self) -> &Arc<RpcCorrelator> {
        self.dispatcher.correlator()
    }

    pub fn is_connected(&self) -> bool {
        self.transport.is_connected()
    }

    /// The handler is invoked immediately with the current state, then on
    /// every later transition.
    pub fn set_state_change_handler(
        &self,
        handler: impl Fn(RpcTransportState) + Send + Sync + 'static,
    ) {
        self.transport.set_state_handler(Arc::new(handler));
    }

    /// Sends a close frame and fails everything outstanding.
    pub fn disconnect(&self) {
        self.dispatcher.correlator().disconnect();
    }
}

impl Drop for WsClient {
    fn drop(&mut self) {
        for handle in &self.task_handles {
            handle.abort();
        }
        self.transport.mark_disconnected();
        self.dispatcher.correlator().on_disconnect();
    }
}
