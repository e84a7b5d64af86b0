#![cfg(feature = "tokio_support")]

use futures::StreamExt;
use scalerpc::rpc::{RpcEnvelopeCoder, decode_native_result};
use scalerpc_caller::{MemoryTransport, RpcCorrelator, SectionDispatcher, error::RpcCallerError};
use scalerpc::scale::ScaleRegistryBuilder;
use serde_json::json;
use std::sync::{Arc, Mutex};

#[tokio::test]
async fn test_callback_task_receives_items_until_stopped() {
    let (transport, mut sent) = MemoryTransport::new();
    let correlator = Arc::new(RpcCorrelator::new(
        transport,
        Arc::new(RpcEnvelopeCoder::new()),
    ));
    let registry = Arc::new(ScaleRegistryBuilder::new().with_primitives().build());
    let dispatcher = SectionDispatcher::new(registry, correlator.clone());

    let pending = tokio::spawn({
        let dispatcher = dispatcher.clone();
        async move {
            dispatcher
                .open_subscription(
                    "chain_subscribeNewHeads",
                    "chain_unsubscribeNewHeads",
                    vec![],
                    |_, value| decode_native_result::<u64>(value),
                )
                .await
        }
    });
    sent.next().await.unwrap();
    correlator.read_text(r#"{"id":1,"result":"sub-1"}"#);
    let subscription = pending.await.unwrap().unwrap();

    let received = Arc::new(Mutex::new(Vec::new()));
    let task = subscription.with_callback({
        let received = received.clone();
        move |item: Result<u64, RpcCallerError>| received.lock().unwrap().push(item.unwrap())
    });

    for n in [10u64, 11, 12] {
        correlator.read_text(
            &json!({
                "method": "chain_newHead",
                "params": {"subscription": "sub-1", "result": n},
            })
            .to_string(),
        );
    }

    let stop = tokio::spawn({
        let correlator = correlator.clone();
        async move {
            correlator
                .stop(&"sub-1".into(), None)
                .await
        }
    });
    assert_eq!(
        sent.next().await.unwrap(),
        r#"{"id":2,"method":"chain_unsubscribeNewHeads","params":["sub-1"]}"#
    );
    correlator.read_text(r#"{"id":2,"result":true}"#);
    assert!(stop.await.unwrap().unwrap());

    task.join().await;
    assert_eq!(*received.lock().unwrap(), vec![10, 11, 12]);
}
