use super::{
    BoolCodec, BytesCodec, CompactCodec, FixedBytesCodec, I8Codec, I16Codec, I32Codec, I64Codec,
    I128Codec, OptionReader, OptionWriter, ScaleCursor, ScaleError, ScaleReader, ScaleType,
    ScaleValue, ScaleWriter, SequenceReader, SequenceWriter, StrCodec, TupleReader, TupleWriter,
    TypeKey, U8Codec, U16Codec, U32Codec, U64Codec, U128Codec,
};
use dashmap::DashMap;
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

/// Collects codec registrations before the registry is frozen.
///
/// Registration is only possible here; [`ScaleRegistry`] has no mutating
/// API, so every lookup after [`build`](Self::build) sees the same table.
#[derive(Default)]
pub struct ScaleRegistryBuilder {
    readers: HashMap<TypeKey, Arc<dyn ScaleReader>>,
    writers: HashMap<TypeKey, Arc<dyn ScaleWriter>>,
}

impl ScaleRegistryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers the built-in scalar codecs.
    pub fn with_primitives(self) -> Self {
        self.register_codec(TypeKey::BOOL, BoolCodec)
            .register_codec(TypeKey::U8, U8Codec)
            .register_codec(TypeKey::U16, U16Codec)
            .register_codec(TypeKey::U32, U32Codec)
            .register_codec(TypeKey::U64, U64Codec)
            .register_codec(TypeKey::U128, U128Codec)
            .register_codec(TypeKey::I8, I8Codec)
            .register_codec(TypeKey::I16, I16Codec)
            .register_codec(TypeKey::I32, I32Codec)
            .register_codec(TypeKey::I64, I64Codec)
            .register_codec(TypeKey::I128, I128Codec)
            .register_codec(TypeKey::COMPACT, CompactCodec)
            .register_codec(TypeKey::BYTES, BytesCodec)
            .register_codec(TypeKey::STR, StrCodec)
            .register_codec(TypeKey::H256, FixedBytesCodec::new(32))
    }

    pub fn register_reader(mut self, key: TypeKey, reader: impl ScaleReader + 'static) -> Self {
        if self.readers.insert(key.clone(), Arc::new(reader)).is_some() {
            tracing::debug!(%key, "replacing previously registered reader");
        }
        self
    }

    pub fn register_writer(mut self, key: TypeKey, writer: impl ScaleWriter + 'static) -> Self {
        if self.writers.insert(key.clone(), Arc::new(writer)).is_some() {
            tracing::debug!(%key, "replacing previously registered writer");
        }
        self
    }

    /// Registers one value as both reader and writer for `key`.
    pub fn register_codec<C>(mut self, key: TypeKey, codec: C) -> Self
    where
        C: ScaleReader + ScaleWriter + 'static,
    {
        let codec = Arc::new(codec);
        self.readers
            .insert(key.clone(), Arc::clone(&codec) as Arc<dyn ScaleReader>);
        self.writers.insert(key, codec as Arc<dyn ScaleWriter>);
        self
    }

    pub fn build(self) -> ScaleRegistry {
        tracing::trace!(
            readers = self.readers.len(),
            writers = self.writers.len(),
            "scale registry built"
        );
        ScaleRegistry {
            readers: self.readers,
            writers: self.writers,
            composite_readers: DashMap::new(),
            composite_writers: DashMap::new(),
        }
    }
}

/// Immutable `TypeKey` -> codec table.
///
/// Named keys resolve only to explicit registrations. `Optional`, `Sequence`
/// and `Tuple` keys are composed from their element codecs on first use and
/// cached, so the same composite key always yields the same `Arc`.
pub struct ScaleRegistry {
    readers: HashMap<TypeKey, Arc<dyn ScaleReader>>,
    writers: HashMap<TypeKey, Arc<dyn ScaleWriter>>,
    composite_readers: DashMap<TypeKey, Arc<dyn ScaleReader>>,
    composite_writers: DashMap<TypeKey, Arc<dyn ScaleWriter>>,
}

impl ScaleRegistry {
    pub fn builder() -> ScaleRegistryBuilder {
        ScaleRegistryBuilder::new()
    }

    pub fn resolve_reader(&self, key: &TypeKey) -> Result<Arc<dyn ScaleReader>, ScaleError> {
        if let Some(reader) = self.readers.get(key) {
            return Ok(Arc::clone(reader));
        }
        if let Some(reader) = self.composite_readers.get(key) {
            return Ok(Arc::clone(reader.value()));
        }

        let composed: Arc<dyn ScaleReader> = match key {
            TypeKey::Named(_) => return Err(ScaleError::UnregisteredType(key.clone())),
            TypeKey::Optional(inner) if **inner == TypeKey::BOOL => {
                self.resolve_reader(inner)?;
                Arc::new(OptionReader::for_bool())
            }
            TypeKey::Optional(inner) => Arc::new(OptionReader::new(self.resolve_reader(inner)?)),
            TypeKey::Sequence(inner) => Arc::new(SequenceReader::new(self.resolve_reader(inner)?)),
            // The empty tuple has no encoding.
            TypeKey::Tuple(items) if items.is_empty() => {
                return Err(ScaleError::UnregisteredType(key.clone()));
            }
            TypeKey::Tuple(items) => Arc::new(TupleReader::new(
                items
                    .iter()
                    .map(|item| self.resolve_reader(item))
                    .collect::<Result<_, _>>()?,
            )),
        };

        // Another thread may have composed the same key meanwhile; keep the first.
        let entry = self.composite_readers.entry(key.clone()).or_insert(composed);
        Ok(Arc::clone(entry.value()))
    }

    pub fn resolve_writer(&self, key: &TypeKey) -> Result<Arc<dyn ScaleWriter>, ScaleError> {
        if let Some(writer) = self.writers.get(key) {
            return Ok(Arc::clone(writer));
        }
        if let Some(writer) = self.composite_writers.get(key) {
            return Ok(Arc::clone(writer.value()));
        }

        let composed: Arc<dyn ScaleWriter> = match key {
            TypeKey::Named(_) => return Err(ScaleError::UnregisteredType(key.clone())),
            TypeKey::Optional(inner) if **inner == TypeKey::BOOL => {
                self.resolve_writer(inner)?;
                Arc::new(OptionWriter::for_bool())
            }
            TypeKey::Optional(inner) => Arc::new(OptionWriter::new(self.resolve_writer(inner)?)),
            TypeKey::Sequence(inner) => Arc::new(SequenceWriter::new(self.resolve_writer(inner)?)),
            TypeKey::Tuple(items) if items.is_empty() => {
                return Err(ScaleError::UnregisteredType(key.clone()));
            }
            TypeKey::Tuple(items) => Arc::new(TupleWriter::new(
                items
                    .iter()
                    .map(|item| self.resolve_writer(item))
                    .collect::<Result<_, _>>()?,
            )),
        };

        let entry = self.composite_writers.entry(key.clone()).or_insert(composed);
        Ok(Arc::clone(entry.value()))
    }

    /// Fails with the first key that has no reader.
    pub fn validate_readers<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a TypeKey>,
    ) -> Result<(), ScaleError> {
        keys.into_iter()
            .try_for_each(|key| self.resolve_reader(key).map(drop))
    }

    /// Fails with the first key that has no writer.
    pub fn validate_writers<'a>(
        &self,
        keys: impl IntoIterator<Item = &'a TypeKey>,
    ) -> Result<(), ScaleError> {
        keys.into_iter()
            .try_for_each(|key| self.resolve_writer(key).map(drop))
    }

    pub fn encode(&self, key: &TypeKey, value: &ScaleValue) -> Result<Vec<u8>, ScaleError> {
        let writer = self.resolve_writer(key)?;
        let mut out = Vec::new();
        writer.write(value, &mut out)?;
        Ok(out)
    }

    /// Decodes one value spanning the whole buffer.
    pub fn decode(&self, key: &TypeKey, bytes: &[u8]) -> Result<ScaleValue, ScaleError> {
        let reader = self.resolve_reader(key)?;
        let mut cursor = ScaleCursor::new(bytes);
        let value = reader.read(&mut cursor)?;
        match cursor.remaining() {
            0 => Ok(value),
            trailing => Err(ScaleError::TrailingBytes(trailing)),
        }
    }

    pub fn encode_typed<T: ScaleType>(&self, value: T) -> Result<Vec<u8>, ScaleError> {
        self.encode(&T::type_key(), &value.into_scale_value())
    }

    pub fn decode_typed<T: ScaleType>(&self, bytes: &[u8]) -> Result<T, ScaleError> {
        T::from_scale_value(self.decode(&T::type_key(), bytes)?)
    }
}

impl fmt::Debug for ScaleRegistry {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScaleRegistry")
            .field("readers", &self.readers.len())
            .field("writers", &self.writers.len())
            .field("composite_readers", &self.composite_readers.len())
            .field("composite_writers", &self.composite_writers.len())
            .finish()
    }
}
