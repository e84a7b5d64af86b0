use std::fmt;

/// Logical identity of a serializable type.
///
/// Keys are only ever used for lookups in a [`ScaleRegistry`](super::ScaleRegistry).
/// `Named` keys must be registered explicitly; the structural variants are
/// composed by the registry from the codecs of their element keys.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeKey {
    Named(&'static str),
    Optional(Box<TypeKey>),
    Sequence(Box<TypeKey>),
    Tuple(Vec<TypeKey>),
}

impl TypeKey {
    pub const BOOL: TypeKey = TypeKey::Named("bool");
    pub const U8: TypeKey = TypeKey::Named("u8");
    pub const U16: TypeKey = TypeKey::Named("u16");
    pub const U32: TypeKey = TypeKey::Named("u32");
    pub const U64: TypeKey = TypeKey::Named("u64");
    pub const U128: TypeKey = TypeKey::Named("u128");
    pub const I8: TypeKey = TypeKey::Named("i8");
    pub const I16: TypeKey = TypeKey::Named("i16");
    pub const I32: TypeKey = TypeKey::Named("i32");
    pub const I64: TypeKey = TypeKey::Named("i64");
    pub const I128: TypeKey = TypeKey::Named("i128");
    pub const COMPACT: TypeKey = TypeKey::Named("Compact");
    pub const BYTES: TypeKey = TypeKey::Named("Bytes");
    pub const STR: TypeKey = TypeKey::Named("Str");
    pub const H256: TypeKey = TypeKey::Named("H256");

    pub fn optional(inner: TypeKey) -> Self {
        TypeKey::Optional(Box::new(inner))
    }

    pub fn sequence(inner: TypeKey) -> Self {
        TypeKey::Sequence(Box::new(inner))
    }

    pub fn tuple(items: impl IntoIterator<Item = TypeKey>) -> Self {
        TypeKey::Tuple(items.into_iter().collect())
    }

    /// Returns `true` for keys the registry can compose structurally.
    pub fn is_composite(&self) -> bool {
        !matches!(self, TypeKey::Named(_))
    }
}

impl fmt::Display for TypeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TypeKey::Named(name) => f.write_str(name),
            TypeKey::Optional(inner) => write!(f, "Option<{inner}>"),
            TypeKey::Sequence(inner) => write!(f, "Vec<{inner}>"),
            TypeKey::Tuple(items) => {
                f.write_str("(")?;
                for (index, item) in items.iter().enumerate() {
                    if index > 0 {
                        f.write_str(", ")?;
                    }
                    write!(f, "{item}")?;
                }
                f.write_str(")")
            }
        }
    }
}
