use super::ScaleError;

/// Dynamic value tree moved between typed values and SCALE bytes.
///
/// Readers produce it, writers consume it. [`ScaleType`](super::ScaleType)
/// implementations convert between it and concrete Rust types.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScaleValue {
    Bool(bool),
    U8(u8),
    U16(u16),
    U32(u32),
    U64(u64),
    U128(u128),
    I8(i8),
    I16(i16),
    I32(i32),
    I64(i64),
    I128(i128),
    Compact(u128),
    Bytes(Vec<u8>),
    Str(String),
    Sequence(Vec<ScaleValue>),
    Optional(Option<Box<ScaleValue>>),
    Tuple(Vec<ScaleValue>),
}

impl ScaleValue {
    /// Short name of the variant, used in mismatch diagnostics.
    pub fn kind(&self) -> &'static str {
        match self {
            ScaleValue::Bool(_) => "bool",
            ScaleValue::U8(_) => "u8",
            ScaleValue::U16(_) => "u16",
            ScaleValue::U32(_) => "u32",
            ScaleValue::U64(_) => "u64",
            ScaleValue::U128(_) => "u128",
            ScaleValue::I8(_) => "i8",
            ScaleValue::I16(_) => "i16",
            ScaleValue::I32(_) => "i32",
            ScaleValue::I64(_) => "i64",
            ScaleValue::I128(_) => "i128",
            ScaleValue::Compact(_) => "compact",
            ScaleValue::Bytes(_) => "bytes",
            ScaleValue::Str(_) => "str",
            ScaleValue::Sequence(_) => "sequence",
            ScaleValue::Optional(_) => "optional",
            ScaleValue::Tuple(_) => "tuple",
        }
    }

    pub fn mismatch(&self, expected: impl Into<String>) -> ScaleError {
        ScaleError::TypeMismatch {
            expected: expected.into(),
            found: self.kind(),
        }
    }

    pub fn none() -> Self {
        ScaleValue::Optional(None)
    }

    pub fn some(inner: ScaleValue) -> Self {
        ScaleValue::Optional(Some(Box::new(inner)))
    }
}
