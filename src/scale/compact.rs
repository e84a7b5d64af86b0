use super::{ScaleCursor, ScaleError};
use crate::constants::{
    COMPACT_BIG_INTEGER_MAX_BYTES, COMPACT_BIG_INTEGER_MIN_BYTES, COMPACT_FOUR_BYTE_LIMIT,
    COMPACT_MODE_MASK, COMPACT_SINGLE_BYTE_LIMIT, COMPACT_TWO_BYTE_LIMIT,
};
use num_enum::{IntoPrimitive, TryFromPrimitive};

/// The 2-bit tag stored in the low bits of a compact integer's first byte.
#[repr(u8)]
#[derive(Debug, Copy, Clone, Eq, PartialEq, TryFromPrimitive, IntoPrimitive)]
pub enum CompactMode {
    SingleByte = 0b00,
    TwoByte = 0b01,
    FourByte = 0b10,
    BigInteger = 0b11,
}

impl CompactMode {
    /// Smallest mode able to hold `value`.
    pub fn for_value(value: u128) -> Self {
        if value < COMPACT_SINGLE_BYTE_LIMIT {
            CompactMode::SingleByte
        } else if value < COMPACT_TWO_BYTE_LIMIT {
            CompactMode::TwoByte
        } else if value < COMPACT_FOUR_BYTE_LIMIT {
            CompactMode::FourByte
        } else {
            CompactMode::BigInteger
        }
    }
}

/// Number of magnitude bytes the big-integer mode needs for `value`.
fn big_integer_width(value: u128) -> usize {
    let significant_bits = (u128::BITS - value.leading_zeros()) as usize;
    significant_bits.div_ceil(8).max(COMPACT_BIG_INTEGER_MIN_BYTES)
}

/// Returns how many bytes `encode_compact` will emit for `value`.
pub fn compact_encoded_len(value: u128) -> usize {
    match CompactMode::for_value(value) {
        CompactMode::SingleByte => 1,
        CompactMode::TwoByte => 2,
        CompactMode::FourByte => 4,
        CompactMode::BigInteger => 1 + big_integer_width(value),
    }
}

/// Appends the compact encoding of `value`, always in the smallest mode.
pub fn encode_compact(value: u128, out: &mut Vec<u8>) {
    let mode = CompactMode::for_value(value);
    let tag = u8::from(mode);

    match mode {
        CompactMode::SingleByte => out.push(((value as u8) << 2) | tag),
        CompactMode::TwoByte => {
            out.extend_from_slice(&(((value as u16) << 2) | tag as u16).to_le_bytes())
        }
        CompactMode::FourByte => {
            out.extend_from_slice(&(((value as u32) << 2) | tag as u32).to_le_bytes())
        }
        CompactMode::BigInteger => {
            let width = big_integer_width(value);
            out.push((((width - COMPACT_BIG_INTEGER_MIN_BYTES) as u8) << 2) | tag);
            out.extend_from_slice(&value.to_le_bytes()[..width]);
        }
    }
}

/// Reads one compact integer, dispatching on the mode tag of the first byte.
///
/// Encodings that do not use the smallest possible mode are rejected so that
/// every value has exactly one accepted wire form.
pub fn decode_compact(cursor: &mut ScaleCursor<'_>) -> Result<u128, ScaleError> {
    let prefix = cursor.read_byte()?;
    let mode = CompactMode::try_from(prefix & COMPACT_MODE_MASK)
        .map_err(|_| ScaleError::NonCanonicalCompact)?;

    let value = match mode {
        CompactMode::SingleByte => return Ok((prefix >> 2) as u128),
        CompactMode::TwoByte => {
            let [high] = cursor.read_array::<1>()?;
            let value = (u16::from_le_bytes([prefix, high]) >> 2) as u128;
            if value < COMPACT_SINGLE_BYTE_LIMIT {
                return Err(ScaleError::NonCanonicalCompact);
            }
            value
        }
        CompactMode::FourByte => {
            let [b1, b2, b3] = cursor.read_array::<3>()?;
            let value = (u32::from_le_bytes([prefix, b1, b2, b3]) >> 2) as u128;
            if value < COMPACT_TWO_BYTE_LIMIT {
                return Err(ScaleError::NonCanonicalCompact);
            }
            value
        }
        CompactMode::BigInteger => {
            let width = (prefix >> 2) as usize + COMPACT_BIG_INTEGER_MIN_BYTES;
            if width > COMPACT_BIG_INTEGER_MAX_BYTES {
                return Err(ScaleError::CompactOverflow);
            }
            let magnitude = cursor.read_bytes(width)?;
            // Minimal width means the most significant byte is non-zero.
            if magnitude[width - 1] == 0 {
                return Err(ScaleError::NonCanonicalCompact);
            }
            let mut buf = [0u8; COMPACT_BIG_INTEGER_MAX_BYTES];
            buf[..width].copy_from_slice(magnitude);
            let value = u128::from_le_bytes(buf);
            if value < COMPACT_FOUR_BYTE_LIMIT {
                return Err(ScaleError::NonCanonicalCompact);
            }
            value
        }
    };

    Ok(value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mode_boundaries() {
        assert_eq!(CompactMode::for_value(63), CompactMode::SingleByte);
        assert_eq!(CompactMode::for_value(64), CompactMode::TwoByte);
        assert_eq!(CompactMode::for_value((1 << 14) - 1), CompactMode::TwoByte);
        assert_eq!(CompactMode::for_value(1 << 14), CompactMode::FourByte);
        assert_eq!(CompactMode::for_value(1 << 30), CompactMode::BigInteger);
    }

    #[test]
    fn big_integer_width_is_minimal() {
        assert_eq!(big_integer_width(1 << 30), 4);
        assert_eq!(big_integer_width(u32::MAX as u128), 4);
        assert_eq!(big_integer_width(1 << 32), 5);
        assert_eq!(big_integer_width(u128::MAX), 16);
    }
}
