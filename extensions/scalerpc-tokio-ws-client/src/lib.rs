mod ws_client;
mod ws_transport;

pub use ws_client::WsClient;
