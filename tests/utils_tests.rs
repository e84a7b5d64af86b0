use scalerpc::utils::{from_hex, to_hex};

#[test]
fn test_to_hex_is_prefixed_lowercase() {
    assert_eq!(to_hex(&[0xde, 0xad, 0xBE, 0xef]), "0xdeadbeef");
    assert_eq!(to_hex(&[]), "0x");
}

#[test]
fn test_from_hex_accepts_optional_prefix() {
    assert_eq!(from_hex("0x0102").unwrap(), vec![1, 2]);
    assert_eq!(from_hex("0102").unwrap(), vec![1, 2]);
    assert_eq!(from_hex("0xABcd").unwrap(), vec![0xab, 0xcd]);
    assert!(from_hex("0x123").is_err());
}
