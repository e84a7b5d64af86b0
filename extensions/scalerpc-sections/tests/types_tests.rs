use scalerpc_sections::{
    BlockHash, BlockNumber, ExtrinsicStatus, PublicKey, operation_table, section_registry,
};
use serde_json::json;
use std::collections::HashSet;

#[test]
fn test_extrinsic_status_wire_forms() {
    let hash = format!("0x{}", "05".repeat(32));

    let cases = [
        (json!("future"), ExtrinsicStatus::Future),
        (json!("ready"), ExtrinsicStatus::Ready),
        (
            json!({"broadcast": ["peer-a", "peer-b"]}),
            ExtrinsicStatus::Broadcast(vec!["peer-a".into(), "peer-b".into()]),
        ),
        (
            json!({"inBlock": hash}),
            ExtrinsicStatus::InBlock(BlockHash([0x05; 32])),
        ),
        (
            json!({"finalized": hash}),
            ExtrinsicStatus::Finalized(BlockHash([0x05; 32])),
        ),
        (json!("dropped"), ExtrinsicStatus::Dropped),
        (json!("invalid"), ExtrinsicStatus::Invalid),
    ];

    for (wire, expected) in cases {
        let status: ExtrinsicStatus = serde_json::from_value(wire.clone()).unwrap();
        assert_eq!(status, expected);
        assert_eq!(serde_json::to_value(&status).unwrap(), wire);
    }
}

#[test]
fn test_final_statuses() {
    assert!(!ExtrinsicStatus::Ready.is_final());
    assert!(!ExtrinsicStatus::InBlock(BlockHash::default()).is_final());
    assert!(ExtrinsicStatus::Finalized(BlockHash::default()).is_final());
    assert!(ExtrinsicStatus::Dropped.is_final());
}

#[test]
fn test_block_number_accepts_number_and_hex() {
    assert_eq!(
        serde_json::from_value::<BlockNumber>(json!(26)).unwrap(),
        BlockNumber(26)
    );
    assert_eq!(
        serde_json::from_value::<BlockNumber>(json!("0x1a")).unwrap(),
        BlockNumber(26)
    );
    assert!(serde_json::from_value::<BlockNumber>(json!("0xzz")).is_err());
    assert_eq!(serde_json::to_value(BlockNumber(26)).unwrap(), json!(26));
}

#[test]
fn test_fixed_hash_hex_length_is_checked() {
    assert!(PublicKey::from_hex("0x0102").is_err());
    let key = PublicKey::from_hex(&"ab".repeat(32)).unwrap();
    assert_eq!(key.to_string(), format!("0x{}", "ab".repeat(32)));
    assert!(serde_json::from_value::<BlockHash>(json!("0x00")).is_err());
}

#[test]
fn test_named_types_roundtrip_through_registry() {
    let registry = section_registry();

    let bytes = registry.encode_typed(BlockHash([0x09; 32])).unwrap();
    assert_eq!(bytes, vec![0x09; 32]);
    assert_eq!(
        registry.decode_typed::<BlockHash>(&bytes).unwrap(),
        BlockHash([0x09; 32])
    );
    assert!(registry.decode_typed::<BlockHash>(&bytes[..31]).is_err());
}

#[test]
fn test_operation_table_has_unique_wire_methods() {
    let mut seen = HashSet::new();
    for operation in operation_table() {
        for method in operation.wire_methods() {
            assert!(seen.insert(method), "duplicate wire method {method}");
        }
    }
    assert!(seen.contains("author_unwatchExtrinsic"));
}
