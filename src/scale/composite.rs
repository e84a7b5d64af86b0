//! Structural codecs composed by the registry for `Optional`, `Sequence` and
//! `Tuple` keys. Each one delegates element handling to the codecs resolved
//! for its element keys.

use super::primitives::read_length_prefix;
use super::{ScaleCursor, ScaleError, ScaleReader, ScaleValue, ScaleWriter, encode_compact};
use crate::constants::{OPTION_BOOL_FALSE_TAG, OPTION_NONE_TAG, OPTION_SOME_TAG};
use std::sync::Arc;

pub struct OptionReader {
    inner: Arc<dyn ScaleReader>,
    bool_form: bool,
}

impl OptionReader {
    pub fn new(inner: Arc<dyn ScaleReader>) -> Self {
        Self {
            inner,
            bool_form: false,
        }
    }

    /// `Option<bool>` collapses tag and value into one byte.
    pub fn for_bool() -> Self {
        Self {
            inner: Arc::new(super::BoolCodec),
            bool_form: true,
        }
    }
}

impl ScaleReader for OptionReader {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        match (cursor.read_byte()?, self.bool_form) {
            (OPTION_NONE_TAG, _) => Ok(ScaleValue::none()),
            (OPTION_SOME_TAG, true) => Ok(ScaleValue::some(ScaleValue::Bool(true))),
            (OPTION_BOOL_FALSE_TAG, true) => Ok(ScaleValue::some(ScaleValue::Bool(false))),
            (OPTION_SOME_TAG, false) => Ok(ScaleValue::some(self.inner.read(cursor)?)),
            (tag, _) => Err(ScaleError::InvalidOptionTag(tag)),
        }
    }
}

pub struct OptionWriter {
    inner: Arc<dyn ScaleWriter>,
    bool_form: bool,
}

impl OptionWriter {
    pub fn new(inner: Arc<dyn ScaleWriter>) -> Self {
        Self {
            inner,
            bool_form: false,
        }
    }

    pub fn for_bool() -> Self {
        Self {
            inner: Arc::new(super::BoolCodec),
            bool_form: true,
        }
    }
}

impl ScaleWriter for OptionWriter {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        let ScaleValue::Optional(option) = value else {
            return Err(value.mismatch("optional"));
        };

        match option.as_deref() {
            None => out.push(OPTION_NONE_TAG),
            Some(ScaleValue::Bool(b)) if self.bool_form => {
                out.push(if *b { OPTION_SOME_TAG } else { OPTION_BOOL_FALSE_TAG })
            }
            Some(other) if self.bool_form => return Err(other.mismatch("bool")),
            Some(inner) => {
                out.push(OPTION_SOME_TAG);
                self.inner.write(inner, out)?;
            }
        }
        Ok(())
    }
}

pub struct SequenceReader {
    element: Arc<dyn ScaleReader>,
}

impl SequenceReader {
    pub fn new(element: Arc<dyn ScaleReader>) -> Self {
        Self { element }
    }
}

impl ScaleReader for SequenceReader {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        let len = read_length_prefix(cursor)?;

        // Capacity is bounded by the bytes actually available.
        let mut items = Vec::with_capacity(len.min(cursor.remaining()));
        for index in 0..len {
            let start = cursor.pos();
            items.push(self.element.read(cursor)?);

            // Zero-width elements never drain the input, so the prefix alone
            // would drive the loop. Cap what is left by the bytes available.
            let left = len - index - 1;
            if cursor.pos() == start && left > cursor.remaining() {
                return Err(ScaleError::TruncatedInput {
                    needed: left - cursor.remaining(),
                });
            }
        }
        Ok(ScaleValue::Sequence(items))
    }
}

pub struct SequenceWriter {
    element: Arc<dyn ScaleWriter>,
}

impl SequenceWriter {
    pub fn new(element: Arc<dyn ScaleWriter>) -> Self {
        Self { element }
    }
}

impl ScaleWriter for SequenceWriter {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        let ScaleValue::Sequence(items) = value else {
            return Err(value.mismatch("sequence"));
        };

        encode_compact(items.len() as u128, out);
        for item in items {
            self.element.write(item, out)?;
        }
        Ok(())
    }
}

pub struct TupleReader {
    elements: Vec<Arc<dyn ScaleReader>>,
}

impl TupleReader {
    pub fn new(elements: Vec<Arc<dyn ScaleReader>>) -> Self {
        Self { elements }
    }
}

impl ScaleReader for TupleReader {
    fn read(&self, cursor: &mut ScaleCursor<'_>) -> Result<ScaleValue, ScaleError> {
        self.elements
            .iter()
            .map(|element| element.read(cursor))
            .collect::<Result<Vec<_>, _>>()
            .map(ScaleValue::Tuple)
    }
}

pub struct TupleWriter {
    elements: Vec<Arc<dyn ScaleWriter>>,
}

impl TupleWriter {
    pub fn new(elements: Vec<Arc<dyn ScaleWriter>>) -> Self {
        Self { elements }
    }
}

impl ScaleWriter for TupleWriter {
    fn write(&self, value: &ScaleValue, out: &mut Vec<u8>) -> Result<(), ScaleError> {
        match value {
            ScaleValue::Tuple(items) if items.len() == self.elements.len() => {
                for (element, item) in self.elements.iter().zip(items) {
                    element.write(item, out)?;
                }
                Ok(())
            }
            other => Err(other.mismatch(format!("tuple of {} elements", self.elements.len()))),
        }
    }
}
