use serde::{Deserialize, Deserializer, Serialize};

/// Height of a block.
///
/// Nodes report it as a hex string inside headers and accept a plain number
/// as a call parameter; both forms are read.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct BlockNumber(pub u64);

impl<'de> Deserialize<'de> for BlockNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Repr {
            Number(u64),
            Hex(String),
        }

        match Repr::deserialize(deserializer)? {
            Repr::Number(number) => Ok(BlockNumber(number)),
            Repr::Hex(text) => {
                let digits = text.strip_prefix("0x").unwrap_or(&text);
                u64::from_str_radix(digits, 16)
                    .map(BlockNumber)
                    .map_err(serde::de::Error::custom)
            }
        }
    }
}

impl From<u64> for BlockNumber {
    fn from(number: u64) -> Self {
        BlockNumber(number)
    }
}
