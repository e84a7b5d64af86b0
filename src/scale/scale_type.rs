use super::{ScaleError, ScaleValue, TypeKey};
use crate::utils::to_hex;
use std::fmt;

/// A Rust type with a registered SCALE representation.
///
/// `type_key` names the codec the registry must resolve; the two conversion
/// methods move the value in and out of the dynamic [`ScaleValue`] tree those
/// codecs operate on.
pub trait ScaleType: Sized {
    fn type_key() -> TypeKey;

    fn into_scale_value(self) -> ScaleValue;

    fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError>;
}

macro_rules! scalar_scale_type {
    ($($ty:ty => $key:ident, $variant:ident;)+) => {
        $(
            impl ScaleType for $ty {
                fn type_key() -> TypeKey {
                    TypeKey::$key
                }

                fn into_scale_value(self) -> ScaleValue {
                    ScaleValue::$variant(self)
                }

                fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
                    match value {
                        ScaleValue::$variant(v) => Ok(v),
                        other => Err(other.mismatch(stringify!($ty))),
                    }
                }
            }
        )+
    };
}

scalar_scale_type! {
    bool => BOOL, Bool;
    u8 => U8, U8;
    u16 => U16, U16;
    u32 => U32, U32;
    u64 => U64, U64;
    u128 => U128, U128;
    i8 => I8, I8;
    i16 => I16, I16;
    i32 => I32, I32;
    i64 => I64, I64;
    i128 => I128, I128;
    String => STR, Str;
}

impl<T: ScaleType> ScaleType for Vec<T> {
    fn type_key() -> TypeKey {
        TypeKey::sequence(T::type_key())
    }

    fn into_scale_value(self) -> ScaleValue {
        ScaleValue::Sequence(self.into_iter().map(T::into_scale_value).collect())
    }

    fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
        match value {
            ScaleValue::Sequence(items) => items.into_iter().map(T::from_scale_value).collect(),
            other => Err(other.mismatch(Self::type_key().to_string())),
        }
    }
}

impl<T: ScaleType> ScaleType for Option<T> {
    fn type_key() -> TypeKey {
        TypeKey::optional(T::type_key())
    }

    fn into_scale_value(self) -> ScaleValue {
        ScaleValue::Optional(self.map(|v| Box::new(v.into_scale_value())))
    }

    fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
        match value {
            ScaleValue::Optional(None) => Ok(None),
            ScaleValue::Optional(Some(inner)) => T::from_scale_value(*inner).map(Some),
            other => Err(other.mismatch(Self::type_key().to_string())),
        }
    }
}

macro_rules! tuple_scale_type {
    ($($name:ident $index:tt),+) => {
        impl<$($name: ScaleType),+> ScaleType for ($($name,)+) {
            fn type_key() -> TypeKey {
                TypeKey::Tuple(vec![$($name::type_key()),+])
            }

            fn into_scale_value(self) -> ScaleValue {
                ScaleValue::Tuple(vec![$(self.$index.into_scale_value()),+])
            }

            fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
                let ScaleValue::Tuple(items) = value else {
                    return Err(value.mismatch(Self::type_key().to_string()));
                };
                let arity = || ScaleError::TypeMismatch {
                    expected: Self::type_key().to_string(),
                    found: "tuple",
                };

                let mut items = items.into_iter();
                let tuple = ($($name::from_scale_value(items.next().ok_or_else(arity)?)?,)+);
                if items.next().is_some() {
                    return Err(arity());
                }
                Ok(tuple)
            }
        }
    };
}

tuple_scale_type!(A 0);
tuple_scale_type!(A 0, B 1);
tuple_scale_type!(A 0, B 1, C 2);
tuple_scale_type!(A 0, B 1, C 2, D 3);
tuple_scale_type!(A 0, B 1, C 2, D 3, E 4);
tuple_scale_type!(A 0, B 1, C 2, D 3, E 4, F 5);

/// Unsigned integer carried in compact form.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Compact(pub u128);

impl ScaleType for Compact {
    fn type_key() -> TypeKey {
        TypeKey::COMPACT
    }

    fn into_scale_value(self) -> ScaleValue {
        ScaleValue::Compact(self.0)
    }

    fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
        match value {
            ScaleValue::Compact(v) => Ok(Compact(v)),
            other => Err(other.mismatch("compact")),
        }
    }
}

impl From<u128> for Compact {
    fn from(value: u128) -> Self {
        Compact(value)
    }
}

/// Length-prefixed opaque bytes.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Bytes(pub Vec<u8>);

impl ScaleType for Bytes {
    fn type_key() -> TypeKey {
        TypeKey::BYTES
    }

    fn into_scale_value(self) -> ScaleValue {
        ScaleValue::Bytes(self.0)
    }

    fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
        match value {
            ScaleValue::Bytes(bytes) => Ok(Bytes(bytes)),
            other => Err(other.mismatch("bytes")),
        }
    }
}

impl From<Vec<u8>> for Bytes {
    fn from(value: Vec<u8>) -> Self {
        Bytes(value)
    }
}

impl AsRef<[u8]> for Bytes {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

/// 32-byte hash.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
pub struct H256(pub [u8; 32]);

impl ScaleType for H256 {
    fn type_key() -> TypeKey {
        TypeKey::H256
    }

    fn into_scale_value(self) -> ScaleValue {
        ScaleValue::Bytes(self.0.to_vec())
    }

    fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
        match value {
            ScaleValue::Bytes(bytes) => {
                let found = bytes.len();
                <[u8; 32]>::try_from(bytes)
                    .map(H256)
                    .map_err(|_| ScaleError::InvalidLength { expected: 32, found })
            }
            other => Err(other.mismatch("H256")),
        }
    }
}

impl From<[u8; 32]> for H256 {
    fn from(value: [u8; 32]) -> Self {
        H256(value)
    }
}

impl fmt::Display for H256 {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&to_hex(&self.0))
    }
}
