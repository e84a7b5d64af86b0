use scalerpc::scale::{ScaleError, ScaleType, ScaleValue, TypeKey};

/// A signed, already encoded transaction. Its bytes are passed through as-is.
#[derive(Debug, Default, Clone, PartialEq, Eq, Hash)]
pub struct Extrinsic(pub Vec<u8>);

impl Extrinsic {
    pub const TYPE_KEY: TypeKey = TypeKey::Named("Extrinsic");
}

impl ScaleType for Extrinsic {
    fn type_key() -> TypeKey {
        Self::TYPE_KEY
    }

    fn into_scale_value(self) -> ScaleValue {
        ScaleValue::Bytes(self.0)
    }

    fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
        match value {
            ScaleValue::Bytes(bytes) => Ok(Extrinsic(bytes)),
            other => Err(other.mismatch("extrinsic")),
        }
    }
}

impl From<Vec<u8>> for Extrinsic {
    fn from(bytes: Vec<u8>) -> Self {
        Extrinsic(bytes)
    }
}
