// Compact integer related constants

/// Mask selecting the 2-bit mode tag in the first byte of a compact integer.
pub const COMPACT_MODE_MASK: u8 = 0b11;

/// Exclusive upper bound of the single-byte compact mode (`2^6`).
pub const COMPACT_SINGLE_BYTE_LIMIT: u128 = 1 << 6;

/// Exclusive upper bound of the two-byte compact mode (`2^14`).
pub const COMPACT_TWO_BYTE_LIMIT: u128 = 1 << 14;

/// Exclusive upper bound of the four-byte compact mode (`2^30`).
pub const COMPACT_FOUR_BYTE_LIMIT: u128 = 1 << 30;

/// The big-integer mode stores `byte_count - 4` in the upper six bits of the
/// length byte, so the shortest big-integer payload is 4 bytes.
pub const COMPACT_BIG_INTEGER_MIN_BYTES: usize = 4;

/// Widest magnitude supported by the in-memory representation (`u128`).
pub const COMPACT_BIG_INTEGER_MAX_BYTES: usize = 16;

// Option encoding tags
pub const OPTION_NONE_TAG: u8 = 0x00;
pub const OPTION_SOME_TAG: u8 = 0x01;

/// `Option<bool>` is packed into a single byte: `0x01` is `Some(true)`,
/// `0x02` is `Some(false)`.
pub const OPTION_BOOL_FALSE_TAG: u8 = 0x02;

// Wire envelope constants

/// Prefix used for every binary value embedded in a JSON envelope.
pub const HEX_PREFIX: &str = "0x";

/// Protocol marker emitted when the envelope coder runs in strict JSON-RPC 2.0
/// mode.
pub const JSONRPC_VERSION: &str = "2.0";
