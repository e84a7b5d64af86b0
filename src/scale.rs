mod compact;
mod composite;
mod primitives;
mod scale_cursor;
mod scale_error;
mod scale_reader;
mod scale_registry;
mod scale_type;
mod scale_value;
mod type_key;

pub use compact::{CompactMode, compact_encoded_len, decode_compact, encode_compact};
pub use composite::{
    OptionReader, OptionWriter, SequenceReader, SequenceWriter, TupleReader, TupleWriter,
};
pub use primitives::*;
pub use scale_cursor::ScaleCursor;
pub use scale_error::ScaleError;
pub use scale_reader::{ScaleReader, ScaleWriter};
pub use scale_registry::{ScaleRegistry, ScaleRegistryBuilder};
pub use scale_type::{Bytes, Compact, H256, ScaleType};
pub use scale_value::ScaleValue;
pub use type_key::TypeKey;
