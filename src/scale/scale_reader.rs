use super::{ScaleCursor, ScaleError, ScaleValue};

/// Decodes exactly one value of the type it is registered under.
pub trait ScaleReader: Send + Sync {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError>;
}

/// Encodes exactly one value of the type it is registered under.
///
/// Writers append to `out`; on error the buffer may hold a partial value and
/// should be discarded by the caller.
pub trait ScaleWriter: Send + Sync {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError>;
}
