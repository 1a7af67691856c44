//! Tag-free binary marshaling for fixed record layouts.
//!
//! Records are written field by field in declaration order:
//!
//! - `i8`, `u8`, `i16`, `u16`, `i32`, `u32`, `f32`, `i64` and `u64` as
//!   little-endian fixed-width values
//! - `[u8; N]` as `N` raw bytes, other fixed arrays element by element
//! - `Vec<T>` as a `u32` little-endian element count followed by the
//!   elements, raw bytes for `Vec<u8>`
//! - nested records inline, with no prefix
//!
//! The layout carries no tags or field names. Both sides must agree on the
//! field order and on every composite shape; a mismatch is not detected and
//! decodes into wrong values.
//!
//! ```
//! use anni_wire::Record;
//!
//! #[derive(Record, Default, Debug, PartialEq)]
//! struct Packet {
//!     id: i32,
//!     flags: u8,
//!     payload: Vec<u8>,
//! }
//!
//! let packet = Packet { id: -5, flags: 200, payload: vec![1, 2, 3] };
//! let bytes = anni_wire::encode(&packet).unwrap();
//! assert_eq!(bytes, [0xfb, 0xff, 0xff, 0xff, 200, 3, 0, 0, 0, 1, 2, 3]);
//!
//! let mut decoded = Packet::default();
//! anni_wire::decode(&bytes, &mut decoded).unwrap();
//! assert_eq!(decoded, packet);
//! ```

mod config;
mod error;
mod field;
mod kind;
mod reader;
mod writer;

pub mod prelude;

pub use config::WireConfig;
pub use error::WireError;
pub use field::{
    Elements, ElementsMut, Field, FieldMut, FieldRef, Items, ItemsMut, Record, Sequence,
};
pub use kind::{FieldDescriptor, Kind, Shape};
pub use reader::Reader;
pub use writer::{measure_field, measure_record, Writer, SEQUENCE_PREFIX_LEN};

#[cfg(feature = "derive")]
pub use anni_wire_derive::Record;

use prelude::Result;

/// Encodes a record into a new buffer.
pub fn encode<T: Field>(value: &T) -> Result<Vec<u8>> {
    let mut buf = Vec::new();
    encode_into(value, &mut buf)?;
    Ok(buf)
}

/// Appends the encoding of a record to `buf`.
///
/// On error `buf` is left exactly as it was.
pub fn encode_into<T: Field>(value: &T, buf: &mut Vec<u8>) -> Result<()> {
    let record = match value.view() {
        FieldRef::Struct(record) => record,
        _ => return Err(invalid_target::<T>()),
    };
    let len = measure_record(record).map_err(|e| {
        log::debug!("failed to encode {}: {}", T::SHAPE.name(), e);
        e
    })?;

    let start = buf.len();
    buf.reserve(len);
    if let Err(e) = Writer::new(buf).write_record(record) {
        log::debug!("failed to encode {}: {}", T::SHAPE.name(), e);
        buf.truncate(start);
        return Err(e);
    }
    log::trace!("encoded {} into {} bytes", T::SHAPE.name(), buf.len() - start);
    Ok(())
}

/// Exact number of bytes [`encode`] produces for `value`.
pub fn encoded_len<T: Field>(value: &T) -> Result<usize> {
    match value.view() {
        FieldRef::Struct(record) => measure_record(record),
        _ => Err(invalid_target::<T>()),
    }
}

/// Populates `dest` from the start of `input`; trailing bytes are ignored.
///
/// On error `dest` may be partially populated and should be discarded.
pub fn decode<T: Field>(input: &[u8], dest: &mut T) -> Result<()> {
    decode_with(input, dest, &WireConfig::default()).map(|_| ())
}

/// Like [`decode`], but fails with [`WireError::TrailingBytes`] unless the
/// whole input is consumed.
pub fn decode_exact<T: Field>(input: &[u8], dest: &mut T) -> Result<()> {
    let consumed = decode_with(input, dest, &WireConfig::default())?;
    match input.len() - consumed {
        0 => Ok(()),
        remaining => Err(WireError::TrailingBytes { remaining }),
    }
}

/// Decodes with explicit limits, returning the number of bytes consumed.
pub fn decode_with<T: Field>(input: &[u8], dest: &mut T, config: &WireConfig) -> Result<usize> {
    let record = match dest.view_mut() {
        FieldMut::Struct(record) => record,
        _ => return Err(invalid_target::<T>()),
    };

    let mut reader = Reader::new(input, config);
    reader.read_record(record).map_err(|e| {
        log::debug!(
            "failed to decode {} at offset {}: {}",
            T::SHAPE.name(),
            reader.position(),
            e
        );
        e
    })?;
    log::trace!(
        "decoded {} from {} of {} bytes",
        T::SHAPE.name(),
        reader.position(),
        input.len()
    );
    Ok(reader.position())
}

fn invalid_target<T: Field>() -> WireError {
    WireError::InvalidTarget {
        kind: T::SHAPE.name(),
    }
}
