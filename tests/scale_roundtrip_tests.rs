use proptest::prelude::*;
use scalerpc::scale::{
    Bytes, Compact, H256, ScaleCursor, ScaleRegistry, ScaleRegistryBuilder, ScaleType, compact_encoded_len,
    decode_compact, encode_compact,
};
use std::fmt::Debug;

fn registry() -> ScaleRegistry {
    ScaleRegistryBuilder::new().with_primitives().build()
}

fn assert_roundtrip<T>(registry: &ScaleRegistry, value: T) -> Result<(), TestCaseError>
where
    T: ScaleType + Clone + PartialEq + Debug,
{
    let bytes = registry
        .encode_typed(value.clone())
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    let decoded = registry
        .decode_typed::<T>(&bytes)
        .map_err(|e| TestCaseError::fail(e.to_string()))?;
    prop_assert_eq!(decoded, value);
    Ok(())
}

proptest! {
    #[test]
    fn compact_roundtrip(value in any::<u128>()) {
        let mut out = Vec::new();
        encode_compact(value, &mut out);
        prop_assert_eq!(out.len(), compact_encoded_len(value));

        let mut cursor = ScaleCursor::new(&out);
        prop_assert_eq!(decode_compact(&mut cursor), Ok(value));
        prop_assert!(cursor.is_empty());
    }

    #[test]
    fn nested_collections_roundtrip(
        numbers in proptest::collection::vec(any::<u32>(), 0..64),
        flags in proptest::collection::vec(proptest::option::of(any::<bool>()), 0..16),
        label in ".{0,24}",
        big in any::<i128>(),
        count in any::<u64>(),
    ) {
        let registry = registry();
        assert_roundtrip(&registry, numbers)?;
        assert_roundtrip(&registry, (label, flags, big))?;
        assert_roundtrip(&registry, Some(Compact(count as u128)))?;
    }

    #[test]
    fn unsigned_integers_roundtrip(
        a in any::<u8>(),
        b in any::<u16>(),
        c in any::<u32>(),
        d in any::<u64>(),
        e in any::<u128>(),
    ) {
        let registry = registry();
        assert_roundtrip(&registry, a)?;
        assert_roundtrip(&registry, b)?;
        assert_roundtrip(&registry, c)?;
        assert_roundtrip(&registry, d)?;
        assert_roundtrip(&registry, e)?;
        assert_roundtrip(&registry, Compact(e))?;
    }

    #[test]
    fn signed_integers_roundtrip(
        a in any::<i8>(),
        b in any::<i16>(),
        c in any::<i32>(),
        d in any::<i64>(),
        e in any::<i128>(),
    ) {
        let registry = registry();
        assert_roundtrip(&registry, a)?;
        assert_roundtrip(&registry, b)?;
        assert_roundtrip(&registry, c)?;
        assert_roundtrip(&registry, d)?;
        assert_roundtrip(&registry, e)?;
    }

    #[test]
    fn byte_values_roundtrip(
        payload in proptest::collection::vec(any::<u8>(), 0..300),
        hash in any::<[u8; 32]>(),
    ) {
        let registry = registry();
        assert_roundtrip(&registry, Bytes(payload.clone()))?;
        assert_roundtrip(&registry, H256(hash))?;
        assert_roundtrip(&registry, (H256(hash), Bytes(payload)))?;
    }
}
