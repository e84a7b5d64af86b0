use scalerpc::rpc::RpcCodecError;
use scalerpc::scale::{ScaleError, ScaleType, ScaleValue, TypeKey};
use scalerpc::utils::{from_hex, to_hex};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

macro_rules! fixed_hash_type {
    ($(#[$doc:meta])* $name:ident, $key:literal) => {
        $(#[$doc])*
        #[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Hash)]
        pub struct $name(pub [u8; 32]);

        impl $name {
            pub const TYPE_KEY: TypeKey = TypeKey::Named($key);

            pub fn from_hex(text: &str) -> Result<Self, RpcCodecError> {
                let bytes = from_hex(text)?;
                let found = bytes.len();
                <[u8; 32]>::try_from(bytes)
                    .map($name)
                    .map_err(|_| ScaleError::InvalidLength { expected: 32, found }.into())
            }

            pub fn as_bytes(&self) -> &[u8; 32] {
                &self.0
            }
        }

        impl ScaleType for $name {
            fn type_key() -> TypeKey {
                Self::TYPE_KEY
            }

            fn into_scale_value(self) -> ScaleValue {
                ScaleValue::Bytes(self.0.to_vec())
            }

            fn from_scale_value(value: ScaleValue) -> Result<Self, ScaleError> {
                match value {
                    ScaleValue::Bytes(bytes) => {
                        let found = bytes.len();
                        <[u8; 32]>::try_from(bytes)
                            .map($name)
                            .map_err(|_| ScaleError::InvalidLength { expected: 32, found })
                    }
                    other => Err(other.mismatch($key)),
                }
            }
        }

        impl From<[u8; 32]> for $name {
            fn from(bytes: [u8; 32]) -> Self {
                $name(bytes)
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&to_hex(&self.0))
            }
        }

        impl Serialize for $name {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(&to_hex(&self.0))
            }
        }

        impl<'de> Deserialize<'de> for $name {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let text = String::deserialize(deserializer)?;
                $name::from_hex(&text).map_err(serde::de::Error::custom)
            }
        }
    };
}

fixed_hash_type!(
    /// Hash identifying a block.
    BlockHash,
    "BlockHash"
);

fixed_hash_type!(
    /// 32-byte public key (sr25519 / ed25519) as stored in the node's keystore.
    PublicKey,
    "PublicKey"
);

fixed_hash_type!(
    /// Raw 32-byte account identifier.
    AccountId,
    "AccountId"
);
