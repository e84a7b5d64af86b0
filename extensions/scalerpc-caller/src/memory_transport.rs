use crate::RpcTransport;
use futures::channel::mpsc;
use std::io;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// In-process transport: every sent frame is handed to a channel receiver.
///
/// Used to drive a correlator without a socket. Replies are fed back by
/// calling [`RpcCorrelator::read_text`](crate::RpcCorrelator::read_text).
pub struct MemoryTransport {
    outbound: mpsc::UnboundedSender<String>,
    connected: AtomicBool,
}

impl MemoryTransport {
    pub fn new() -> (Arc<Self>, mpsc::UnboundedReceiver<String>) {
        let (outbound, sent) = mpsc::unbounded();
        let transport = Arc::new(Self {
            outbound,
            connected: AtomicBool::new(true),
        });
        (transport, sent)
    }
}

impl RpcTransport for MemoryTransport {
    fn send(&self, text: String) -> io::Result<()> {
        if !self.is_connected() {
            return Err(io::Error::new(
                io::ErrorKind::NotConnected,
                "memory transport is disconnected",
            ));
        }
        self.outbound
            .unbounded_send(text)
            .map_err(|_| io::Error::new(io::ErrorKind::BrokenPipe, "frame receiver dropped"))
    }

    fn disconnect(&self) {
        if self.connected.swap(false, Ordering::SeqCst) {
            self.outbound.close_channel();
        }
    }

    fn is_connected(&self) -> bool {
        self.connected.load(Ordering::SeqCst)
    }
}
