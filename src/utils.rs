mod hex_converter;

pub use hex_converter::{from_hex, to_hex};
