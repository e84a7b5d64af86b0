use super::TypeKey;

/// Errors raised while resolving codecs or reading/writing SCALE bytes.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScaleError {
    /// No reader or writer is registered for the key and it cannot be composed.
    ///
    /// This is a startup misconfiguration; dispatchers validate their keys
    /// before the first call so it never surfaces per call.
    #[error("no codec registered for type `{0}`")]
    UnregisteredType(TypeKey),

    /// The input ended before the value was complete.
    #[error("input truncated: {needed} more byte(s) required")]
    TruncatedInput { needed: usize },

    /// A whole-buffer decode finished with bytes left over.
    #[error("{0} trailing byte(s) after decoded value")]
    TrailingBytes(usize),

    #[error("invalid bool byte 0x{0:02x}")]
    InvalidBool(u8),

    #[error("invalid option tag 0x{0:02x}")]
    InvalidOptionTag(u8),

    /// The compact integer was not encoded in its smallest mode.
    #[error("compact integer is not canonically encoded")]
    NonCanonicalCompact,

    #[error("compact integer wider than 128 bits")]
    CompactOverflow,

    /// A writer received a value of the wrong shape, or a typed conversion
    /// received an unexpected value tree.
    #[error("type mismatch: expected {expected}, found {found}")]
    TypeMismatch { expected: String, found: &'static str },

    #[error("string value is not valid utf-8")]
    InvalidUtf8,

    #[error("expected {expected} byte(s), found {found}")]
    InvalidLength { expected: usize, found: usize },
}
