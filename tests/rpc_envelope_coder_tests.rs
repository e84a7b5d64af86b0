use scalerpc::rpc::{
    RpcEnvelopeCoder, RpcErrorObject, RpcInbound, RpcNotification, RpcResponse, SubscriptionId,
    decode_optional_scale_result, decode_scale_result, encode_scale_param,
};
use scalerpc::scale::{H256, ScaleRegistryBuilder};
use serde_json::{Value, json};

#[test]
fn test_encode_exact_wire_text() {
    let coder = RpcEnvelopeCoder::new();
    let text = coder
        .encode(1, "author_hasKey", vec![json!("0xd435"), json!("aura")])
        .unwrap();
    assert_eq!(
        text,
        r#"{"id":1,"method":"author_hasKey","params":["0xd435","aura"]}"#
    );
}

#[test]
fn test_encode_with_protocol_version() {
    let coder = RpcEnvelopeCoder::new().with_protocol_version();
    let text = coder.encode(3, "system_name", vec![]).unwrap();
    assert_eq!(
        text,
        r#"{"jsonrpc":"2.0","id":3,"method":"system_name","params":[]}"#
    );
}

#[test]
fn test_decode_result_and_null_result() {
    let coder = RpcEnvelopeCoder::new();
    assert_eq!(
        coder.decode(r#"{"id":1,"result":false}"#),
        RpcInbound::Response(RpcResponse {
            id: 1,
            outcome: Ok(Value::Bool(false)),
        })
    );
    assert_eq!(
        coder.decode(r#"{"jsonrpc":"2.0","id":9,"result":null}"#),
        RpcInbound::Response(RpcResponse {
            id: 9,
            outcome: Ok(Value::Null),
        })
    );
}

#[test]
fn test_decode_error_response() {
    let coder = RpcEnvelopeCoder::new();
    assert_eq!(
        coder.decode(r#"{"id":4,"error":{"code":-32601,"message":"Method not found"}}"#),
        RpcInbound::Response(RpcResponse {
            id: 4,
            outcome: Err(RpcErrorObject {
                code: -32601,
                message: "Method not found".into(),
                data: None,
            }),
        })
    );
}

#[test]
fn test_decode_notification() {
    let coder = RpcEnvelopeCoder::new();
    let text = r#"{"method":"author_extrinsicUpdate","params":{"subscription":7,"result":"ready"}}"#;
    assert_eq!(
        coder.decode(text),
        RpcInbound::Notification(RpcNotification {
            method: "author_extrinsicUpdate".into(),
            subscription: SubscriptionId::Number(7),
            result: json!("ready"),
        })
    );

    let text = r#"{"jsonrpc":"2.0","method":"chain_newHead","params":{"subscription":"abc","result":{}}}"#;
    match coder.decode(text) {
        RpcInbound::Notification(notification) => {
            assert_eq!(notification.subscription, SubscriptionId::from("abc"))
        }
        other => panic!("unexpected inbound: {other:?}"),
    }
}

#[test]
fn test_decode_malformed_never_fails() {
    let coder = RpcEnvelopeCoder::new();
    for text in [
        "not json",
        "[1,2,3]",
        r#"{"id":"x","result":1}"#,
        r#"{"method":"chain_newHead","params":[]}"#,
        r#"{"method":"chain_newHead","params":{"result":1}}"#,
        r#"{"result":1}"#,
    ] {
        assert!(
            matches!(coder.decode(text), RpcInbound::Malformed { id: None, .. }),
            "expected malformed for {text}"
        );
    }
}

#[test]
fn test_decode_malformed_keeps_id() {
    let coder = RpcEnvelopeCoder::new();
    assert!(matches!(
        coder.decode(r#"{"id":12}"#),
        RpcInbound::Malformed { id: Some(12), .. }
    ));
    assert!(matches!(
        coder.decode(r#"{"id":13,"error":"boom"}"#),
        RpcInbound::Malformed { id: Some(13), .. }
    ));
}

#[test]
fn test_scale_params_travel_as_hex() {
    let registry = ScaleRegistryBuilder::new().with_primitives().build();
    let value = encode_scale_param(&registry, vec![1u16, 2u16]).unwrap();
    assert_eq!(value, json!("0x0801000200"));

    let hash: H256 = decode_scale_result(&registry, json!(format!("0x{}", "11".repeat(32)))).unwrap();
    assert_eq!(hash, H256([0x11; 32]));

    let missing = decode_optional_scale_result::<u32>(&registry, Value::Null).unwrap();
    assert_eq!(missing, None);

    assert!(decode_scale_result::<u32>(&registry, json!(5)).is_err());
    assert!(decode_scale_result::<u32>(&registry, json!("0xzz")).is_err());
}
