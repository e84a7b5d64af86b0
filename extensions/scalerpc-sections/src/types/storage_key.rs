use scalerpc::scale::{ScaleError, ScaleType, ScaleValue, TypeKey};

/// Fully hashed storage key (pallet prefix, item prefix and any hashed map keys).
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct StorageKey(pub Vec<u8>);

impl StorageKey {
    pub const TYPE_KEY: TypeKey = TypeKey::Named("StorageKey");
}

impl ScaleType for StorageKey {
    fn type_key() -> TypeKey {
        Self::TYPE_KEY
    }

    fn into_scale_value(self) -> ScaleValue {
        ScaleValue::Bytes(self.0)
    }

    fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
        match value {
            ScaleValue::Bytes(bytes) => Ok(StorageKey(bytes)),
            other => Err(other.mismatch("storage key")),
        }
    }
}
