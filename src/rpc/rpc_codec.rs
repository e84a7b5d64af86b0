//! Conversions between typed values and the JSON members of an envelope.
//!
//! SCALE types travel as `0x` hex strings; everything else uses its serde
//! JSON form.

use super::RpcCodecError;
use crate::scale::{ScaleRegistry, ScaleType};
use crate::utils::{from_hex, to_hex};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

pub fn encode_scale_param<T: ScaleType>(
    registry: &ScaleRegistry,
    value: T,
) -> Result<Value, RpcCodecError> {
    let bytes = registry.encode_typed(value)?;
    Ok(Value::String(to_hex(&bytes)))
}

pub fn encode_native_param<T: Serialize + ?Sized>(value: &T) -> Result<Value, RpcCodecError> {
    Ok(serde_json::to_value(value)?)
}

pub fn decode_scale_result<T: ScaleType>(
    registry: &ScaleRegistry,
    value: Value,
) -> Result<T, RpcCodecError> {
    match value {
        Value::String(text) => {
            let bytes = from_hex(&text)?;
            Ok(registry.decode_typed(&bytes)?)
        }
        other => Err(RpcCodecError::UnexpectedValue {
            expected: "hex string",
            found: other.to_string(),
        }),
    }
}

/// Like [`decode_scale_result`], with `null` mapping to `None` (absent
/// storage entries, unknown block numbers).
pub fn decode_optional_scale_result<T: ScaleType>(
    registry: &ScaleRegistry,
    value: Value,
) -> Result<Option<T>, RpcCodecError> {
    match value {
        Value::Null => Ok(None),
        other => decode_scale_result(registry, other).map(Some),
    }
}

pub fn decode_native_result<T: DeserializeOwned>(value: Value) -> Result<T, RpcCodecError> {
    Ok(serde_json::from_value(value)?)
}
