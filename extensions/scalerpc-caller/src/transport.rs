use std::io;

/// Connection state reported by transport providers to their state handlers.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RpcTransportState {
    Connected,
    Disconnected,
}

/// Outbound half of a text-frame connection.
///
/// Providers push inbound frames into
/// [`RpcCorrelator::read_text`](crate::RpcCorrelator::read_text) and report
/// teardown through [`RpcCorrelator::on_disconnect`](crate::RpcCorrelator::on_disconnect).
pub trait RpcTransport: Send + Sync {
    /// Queues one frame. Fails once the connection is no longer open.
    fn send(&self, text: String) -> io::Result<()>;

    fn disconnect(&self);

    fn is_connected(&self) -> bool;
}
