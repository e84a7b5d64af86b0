//! Connects to a node, prints a few facts about its chain and follows new
//! heads for a while.
//!
//! ```sh
//! RUST_LOG=debug cargo run -p example-scalerpc-ws-app -- ws://127.0.0.1:9944
//! ```

use futures::StreamExt;
use scalerpc_sections::{NodeSections, section_registry};
use scalerpc_tokio_ws_client::WsClient;
use std::error::Error;
use std::sync::Arc;
use tokio::join;
use tracing_subscriber::EnvFilter;

const DEFAULT_NODE_URL: &str = "ws://127.0.0.1:9944";
const NODE_URL_ENV: &str = "SCALERPC_NODE_URL";
const HEADS_TO_FOLLOW: usize = 3;

#[tokio::main]
async fn main() -> Result<(), Box<dyn Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let url = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(NODE_URL_ENV).ok())
        .unwrap_or_else(|| DEFAULT_NODE_URL.to_owned());

    let client = WsClient::connect_with_registry(&url, Arc::new(section_registry())).await?;
    client.set_state_change_handler(|state| tracing::info!(?state, "transport state changed"));

    let sections = NodeSections::new(client.dispatcher().clone())?;
    let (system, chain) = (sections.system(), sections.chain());

    // `join!` issues all requests before awaiting any response
    let (name, version, chain_name, genesis, finalized) = join!(
        system.name(),
        system.version(),
        system.chain(),
        chain.genesis_hash(),
        chain.get_finalized_head(),
    );

    println!("Node: {} {}", name?, version?);
    println!("Chain: {}", chain_name?);
    match genesis? {
        Some(hash) => println!("Genesis hash: {hash}"),
        None => println!("Genesis hash: <unknown>"),
    }

    let finalized = finalized?;
    if let Some(header) = chain.get_header(Some(finalized)).await? {
        println!("Finalized: #{} ({finalized})", header.number.0);
    }

    let mut heads = chain.subscribe_new_heads().await?;
    let mut seen = 0;
    while seen < HEADS_TO_FOLLOW {
        match heads.next().await {
            Some(Ok(header)) => {
                seen += 1;
                println!("New head: #{} (parent {})", header.number.0, header.parent_hash);
            }
            Some(Err(err)) => tracing::warn!(%err, "header stream error"),
            None => break,
        }
    }

    let stopped = heads.stop().await?;
    tracing::debug!(stopped, "unsubscribed from new heads");

    client.disconnect();
    Ok(())
}
