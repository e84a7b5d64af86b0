#![allow(dead_code)]

use futures::StreamExt;
use futures::channel::mpsc::UnboundedReceiver;
use scalerpc::rpc::RpcEnvelopeCoder;
use scalerpc_caller::{MemoryTransport, RpcCorrelator, SectionDispatcher};
use scalerpc_sections::{NodeSections, section_registry};
use std::sync::Arc;

pub const ALICE: &str = "0xd43593c715fdd31c61141abd04a99fd6822c8558854ccde39a5684e7a56da27d";

pub fn setup() -> (NodeSections, UnboundedReceiver<String>) {
    let (transport, sent) = MemoryTransport::new();
    let correlator = Arc::new(RpcCorrelator::new(
        transport,
        Arc::new(RpcEnvelopeCoder::new()),
    ));
    let dispatcher = SectionDispatcher::new(Arc::new(section_registry()), correlator);
    (NodeSections::new(dispatcher).unwrap(), sent)
}

pub async fn expect_sent(sent: &mut UnboundedReceiver<String>, expected: &str) {
    assert_eq!(sent.next().await.unwrap(), expected);
}

pub fn reply(sections: &NodeSections, text: &str) {
    sections.dispatcher().correlator().read_text(text);
}
