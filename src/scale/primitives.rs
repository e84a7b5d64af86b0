use super::{ScaleCursor, ScaleError, ScaleReader, ScaleValue, ScaleWriter, decode_compact, encode_compact};

/// Reads a compact length prefix and converts it to `usize`.
pub(crate) fn read_length_prefix(cursor: &mut ScaleCursor<'_>) -> Result<usize, ScaleError> {
    let len = decode_compact(cursor)?;
    usize::try_from(len).map_err(|_| ScaleError::CompactOverflow)
}

macro_rules! fixed_int_codec {
    ($(#[$doc:meta])* $codec:ident, $ty:ty, $variant:ident) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy)]
        pub struct $codec;

        impl ScaleReader for $codec {
            fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
                let bytes = cursor.read_array::<{ std::mem::size_of::<$ty>() }>()?;
                Ok(ScaleValue::$variant(<$ty>::from_le_bytes(bytes)))
            }
        }

        impl ScaleWriter for $codec {
            fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
                match value {
                    ScaleValue::$variant(v) => {
                        out.extend_from_slice(&v.to_le_bytes());
                        Ok(())
                    }
                    other => Err(other.mismatch(stringify!($ty))),
                }
            }
        }
    };
}

fixed_int_codec!(
    /// Single unsigned byte.
    U8Codec, u8, U8
);
fixed_int_codec!(U16Codec, u16, U16);
fixed_int_codec!(U32Codec, u32, U32);
fixed_int_codec!(U64Codec, u64, U64);
fixed_int_codec!(U128Codec, u128, U128);
fixed_int_codec!(I8Codec, i8, I8);
fixed_int_codec!(I16Codec, i16, I16);
fixed_int_codec!(I32Codec, i32, I32);
fixed_int_codec!(I64Codec, i64, I64);
fixed_int_codec!(I128Codec, i128, I128);

/// `0x00` is `false`, `0x01` is `true`; anything else is rejected.
#[derive(Debug, Default, Clone, Copy)]
pub struct BoolCodec;

impl ScaleReader for BoolCodec {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        match cursor.read_byte()? {
            0 => Ok(ScaleValue::Bool(false)),
            1 => Ok(ScaleValue::Bool(true)),
            other => Err(ScaleError::InvalidBool(other)),
        }
    }
}

impl ScaleWriter for BoolCodec {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        match value {
            ScaleValue::Bool(b) => {
                out.push(*b as u8);
                Ok(())
            }
            other => Err(other.mismatch("bool")),
        }
    }
}

/// Variable-length unsigned integer, see [`encode_compact`].
#[derive(Debug, Default, Clone, Copy)]
pub struct CompactCodec;

impl ScaleReader for CompactCodec {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        decode_compact(cursor).map(ScaleValue::Compact)
    }
}

impl ScaleWriter for CompactCodec {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        match value {
            ScaleValue::Compact(v) => {
                encode_compact(*v, out);
                Ok(())
            }
            other => Err(other.mismatch("compact")),
        }
    }
}

/// Compact length prefix followed by the raw bytes.
#[derive(Debug, Default, Clone, Copy)]
pub struct BytesCodec;

impl ScaleReader for BytesCodec {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        let len = read_length_prefix(cursor)?;
        Ok(ScaleValue::Bytes(cursor.read_bytes(len)?.to_vec()))
    }
}

impl ScaleWriter for BytesCodec {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        match value {
            ScaleValue::Bytes(bytes) => {
                encode_compact(bytes.len() as u128, out);
                out.extend_from_slice(bytes);
                Ok(())
            }
            other => Err(other.mismatch("bytes")),
        }
    }
}

/// UTF-8 text with a compact byte-length prefix.
#[derive(Debug, Default, Clone, Copy)]
pub struct StrCodec;

impl ScaleReader for StrCodec {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        let len = read_length_prefix(cursor)?;
        let bytes = cursor.read_bytes(len)?;
        std::str::from_utf8(bytes)
            .map(|s| ScaleValue::Str(s.to_owned()))
            .map_err(|_| ScaleError::InvalidUtf8)
    }
}

impl ScaleWriter for StrCodec {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        match value {
            ScaleValue::Str(s) => {
                encode_compact(s.len() as u128, out);
                out.extend_from_slice(s.as_bytes());
                Ok(())
            }
            other => Err(other.mismatch("str")),
        }
    }
}

/// Byte array of a fixed width with no length prefix (hashes, public keys).
#[derive(Debug, Clone, Copy)]
pub struct FixedBytesCodec {
    pub len: usize,
}

impl FixedBytesCodec {
    pub const fn new(len: usize) -> Self {
        Self { len }
    }
}

impl ScaleReader for FixedBytesCodec {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        Ok(ScaleValue::Bytes(cursor.read_bytes(self.len)?.to_vec()))
    }
}

impl ScaleWriter for FixedBytesCodec {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        match value {
            ScaleValue::Bytes(bytes) if bytes.len() == self.len => {
                out.extend_from_slice(bytes);
                Ok(())
            }
            ScaleValue::Bytes(bytes) => Err(ScaleError::InvalidLength {
                expected: self.len,
                found: bytes.len(),
            }),
            other => Err(other.mismatch(format!("[u8; {}]", self.len))),
        }
    }
}

/// Opaque payload that is already SCALE-encoded elsewhere (for example a
/// signed extrinsic). Reads everything left in the buffer and writes the bytes
/// through untouched.
#[derive(Debug, Default, Clone, Copy)]
pub struct RawBytesCodec;

impl ScaleReader for RawBytesCodec {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        Ok(ScaleValue::Bytes(cursor.read_rest().to_vec()))
    }
}

impl ScaleWriter for RawBytesCodec {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        match value {
            ScaleValue::Bytes(bytes) => {
                out.extend_from_slice(bytes);
                Ok(())
            }
            other => Err(other.mismatch("raw bytes")),
        }
    }
}
