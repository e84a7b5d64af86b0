use crate::constants::HEX_PREFIX;

/// Lowercase hex with the `0x` prefix used for binary values in envelopes.
pub fn to_hex(bytes: &[u8]) -> String {
    let mut out = String::with_capacity(HEX_PREFIX.len() + bytes.len() * 2);
    out.push_str(HEX_PREFIX);
    out.push_str(&hex::encode(bytes));
    out
}

/// Parses hex text; the `0x` prefix is optional.
pub fn from_hex(text: &str) -> Result<Vec<u8>, hex::FromHexError> {
    hex::decode(text.strip_prefix(HEX_PREFIX).unwrap_or(text))
}
