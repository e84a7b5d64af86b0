use scalerpc::scale::{
    Bytes, FixedBytesCodec, H256, ScaleError, ScaleRegistry, ScaleRegistryBuilder, ScaleValue,
    TypeKey,
};
use std::sync::Arc;

fn registry() -> ScaleRegistry {
    ScaleRegistryBuilder::new().with_primitives().build()
}

#[test]
fn test_unregistered_named_key_fails() {
    let empty = ScaleRegistryBuilder::new().build();
    assert_eq!(
        empty.resolve_reader(&TypeKey::U32).err(),
        Some(ScaleError::UnregisteredType(TypeKey::U32))
    );
    assert_eq!(
        empty.resolve_writer(&TypeKey::U32).err(),
        Some(ScaleError::UnregisteredType(TypeKey::U32))
    );
}

#[test]
fn test_composite_reports_unregistered_element() {
    let key = TypeKey::sequence(TypeKey::Named("Header"));
    assert_eq!(
        registry().resolve_reader(&key).err(),
        Some(ScaleError::UnregisteredType(TypeKey::Named("Header")))
    );
}

#[test]
fn test_composite_codecs_are_cached() {
    let registry = registry();
    let key = TypeKey::sequence(TypeKey::optional(TypeKey::U16));

    let first = registry.resolve_reader(&key).unwrap();
    let second = registry.resolve_reader(&key).unwrap();
    assert!(Arc::ptr_eq(&first, &second));

    let first = registry.resolve_writer(&key).unwrap();
    let second = registry.resolve_writer(&key).unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[test]
fn test_sequence_of_u16_layout() {
    let registry = registry();
    let bytes = registry.encode_typed(vec![1u16, 2u16]).unwrap();
    assert_eq!(bytes, vec![0x08, 0x01, 0x00, 0x02, 0x00]);
    assert_eq!(registry.decode_typed::<Vec<u16>>(&bytes).unwrap(), vec![1, 2]);
}

#[test]
fn test_optional_layout() {
    let registry = registry();
    assert_eq!(
        registry.encode_typed(Some(1u32)).unwrap(),
        vec![0x01, 0x01, 0x00, 0x00, 0x00]
    );
    assert_eq!(registry.encode_typed(None::<u32>).unwrap(), vec![0x00]);
    assert_eq!(
        registry.decode_typed::<Option<u32>>(&[0x00]).unwrap(),
        None
    );
    assert!(matches!(
        registry.decode_typed::<Option<u32>>(&[0x05]),
        Err(ScaleError::InvalidOptionTag(0x05))
    ));
}

#[test]
fn test_optional_bool_uses_single_byte() {
    let registry = registry();
    assert_eq!(registry.encode_typed(Some(true)).unwrap(), vec![0x01]);
    assert_eq!(registry.encode_typed(Some(false)).unwrap(), vec![0x02]);
    assert_eq!(registry.encode_typed(None::<bool>).unwrap(), vec![0x00]);
    assert_eq!(
        registry.decode_typed::<Option<bool>>(&[0x02]).unwrap(),
        Some(false)
    );
    assert!(matches!(
        registry.decode_typed::<Option<bool>>(&[0x03]),
        Err(ScaleError::InvalidOptionTag(0x03))
    ));
}

#[test]
fn test_tuple_and_string_layout() {
    let registry = registry();
    let bytes = registry.encode_typed((7u8, "ab".to_string())).unwrap();
    assert_eq!(bytes, vec![0x07, 0x08, b'a', b'b']);
    assert_eq!(
        registry.decode_typed::<(u8, String)>(&bytes).unwrap(),
        (7, "ab".to_string())
    );
}

#[test]
fn test_truncated_sequence() {
    let result = registry().decode_typed::<Vec<u32>>(&[0x08, 0x01, 0x00, 0x00, 0x00]);
    assert!(matches!(result, Err(ScaleError::TruncatedInput { needed: 4 })));
}

#[test]
fn test_empty_tuple_key_has_no_codec() {
    let key = TypeKey::sequence(TypeKey::tuple([]));
    let registry = registry();
    assert_eq!(
        registry.resolve_reader(&key).err(),
        Some(ScaleError::UnregisteredType(TypeKey::tuple([])))
    );
    assert_eq!(
        registry.resolve_writer(&key).err(),
        Some(ScaleError::UnregisteredType(TypeKey::tuple([])))
    );
}

#[test]
fn test_zero_width_sequence_is_bounded_by_input() {
    let empty = TypeKey::Named("Empty");
    let registry = ScaleRegistryBuilder::new()
        .with_primitives()
        .register_codec(empty.clone(), FixedBytesCodec::new(0))
        .build();
    let key = TypeKey::sequence(empty);

    // Four-byte compact prefix announcing 2^24 elements and nothing else.
    let result = registry.decode(&key, &[0x02, 0x00, 0x00, 0x04]);
    assert_eq!(
        result,
        Err(ScaleError::TruncatedInput {
            needed: (1 << 24) - 1
        })
    );

    // A short sequence still decodes when the prefix is backed by bytes.
    let value = registry.decode(&key, &[0x04]).unwrap();
    assert_eq!(value, ScaleValue::Sequence(vec![ScaleValue::Bytes(vec![])]));
}

#[test]
fn test_trailing_bytes_rejected() {
    let result = registry().decode_typed::<u8>(&[0x01, 0x02]);
    assert!(matches!(result, Err(ScaleError::TrailingBytes(1))));
}

#[test]
fn test_invalid_bool_and_utf8() {
    let registry = registry();
    assert!(matches!(
        registry.decode_typed::<bool>(&[0x02]),
        Err(ScaleError::InvalidBool(0x02))
    ));
    assert!(matches!(
        registry.decode_typed::<String>(&[0x04, 0xff]),
        Err(ScaleError::InvalidUtf8)
    ));
}

#[test]
fn test_writer_rejects_mismatched_value() {
    let result = registry().encode(&TypeKey::U32, &ScaleValue::Bool(true));
    assert_eq!(
        result,
        Err(ScaleError::TypeMismatch {
            expected: "u32".into(),
            found: "bool",
        })
    );
}

#[test]
fn test_fixed_width_values() {
    let registry = registry();
    let hash = H256([0xab; 32]);
    let bytes = registry.encode_typed(hash).unwrap();
    assert_eq!(bytes, vec![0xab; 32]);
    assert_eq!(registry.decode_typed::<H256>(&bytes).unwrap(), hash);

    assert_eq!(
        registry.encode_typed(-2i16).unwrap(),
        vec![0xfe, 0xff]
    );
    assert_eq!(
        registry.encode_typed(Bytes(vec![1, 2, 3])).unwrap(),
        vec![0x0c, 1, 2, 3]
    );
}

#[test]
fn test_custom_named_registration() {
    let account = TypeKey::Named("AccountId");
    let registry = ScaleRegistryBuilder::new()
        .with_primitives()
        .register_codec(account.clone(), FixedBytesCodec::new(32))
        .build();

    let value = ScaleValue::Bytes(vec![7; 32]);
    let bytes = registry.encode(&account, &value).unwrap();
    assert_eq!(registry.decode(&account, &bytes).unwrap(), value);

    assert_eq!(
        registry.encode(&account, &ScaleValue::Bytes(vec![7; 31])),
        Err(ScaleError::InvalidLength {
            expected: 32,
            found: 31,
        })
    );

    // Composites of custom keys resolve like any other.
    let accounts = TypeKey::sequence(account);
    let list = ScaleValue::Sequence(vec![value.clone(), value]);
    let bytes = registry.encode(&accounts, &list).unwrap();
    assert_eq!(bytes.len(), 1 + 64);
    assert_eq!(registry.decode(&accounts, &bytes).unwrap(), list);
}

#[test]
fn test_validate_reports_first_missing_key() {
    let registry = registry();
    let keys = [
        TypeKey::U8,
        TypeKey::optional(TypeKey::Named("Header")),
        TypeKey::Named("Digest"),
    ];
    assert_eq!(
        registry.validate_readers(&keys),
        Err(ScaleError::UnregisteredType(TypeKey::Named("Header")))
    );
    assert!(registry.validate_writers(&keys[..1]).is_ok());
}

#[test]
fn test_type_key_display() {
    let key = TypeKey::tuple([
        TypeKey::U8,
        TypeKey::sequence(TypeKey::optional(TypeKey::STR)),
    ]);
    assert_eq!(key.to_string(), "(u8, Vec<Option<Str>>)");
}
