use byteorder::{ByteOrder, LittleEndian};

use crate::error::WireError;
use crate::field::{FieldRef, Items, Record};
use crate::prelude::Result;

/// Size of the element count written before every variable sequence.
pub const SEQUENCE_PREFIX_LEN: usize = 4;

/// Appends the wire form of records to a byte buffer.
///
/// A writer does not roll back on failure; `encode_into` truncates the
/// buffer back to where it started.
pub struct Writer<'a> {
    buf: &'a mut Vec<u8>,
}

impl<'a> Writer<'a> {
    pub fn new(buf: &'a mut Vec<u8>) -> Self {
        Self { buf }
    }

    pub fn write_record(&mut self, record: &dyn Record) -> Result<()> {
        record.visit(&mut |field| self.write_field(field))
    }

    pub fn write_field(&mut self, field: FieldRef<'_>) -> Result<()> {
        match field {
            FieldRef::Int8(v) => self.buf.push(v as u8),
            FieldRef::Uint8(v) => self.buf.push(v),
            FieldRef::Int16(v) => self.put::<2>(|raw| LittleEndian::write_i16(raw, v)),
            FieldRef::Uint16(v) => self.put::<2>(|raw| LittleEndian::write_u16(raw, v)),
            FieldRef::Int32(v) => self.put::<4>(|raw| LittleEndian::write_i32(raw, v)),
            FieldRef::Uint32(v) => self.put::<4>(|raw| LittleEndian::write_u32(raw, v)),
            FieldRef::Float32(v) => self.put::<4>(|raw| LittleEndian::write_f32(raw, v)),
            FieldRef::Int64(v) => self.put::<8>(|raw| LittleEndian::write_i64(raw, v)),
            FieldRef::Uint64(v) => self.put::<8>(|raw| LittleEndian::write_u64(raw, v)),
            FieldRef::FixedArray(items) => self.write_items(items)?,
            FieldRef::Sequence(items) => {
                let count = sequence_count(&items)?;
                self.put::<4>(|raw| LittleEndian::write_u32(raw, count));
                self.write_items(items)?;
            }
            FieldRef::Struct(record) => self.write_record(record)?,
            FieldRef::Unsupported(kind) => return Err(WireError::UnsupportedKind { kind }),
        }
        Ok(())
    }

    fn write_items(&mut self, items: Items<'_>) -> Result<()> {
        match items {
            Items::Bytes(bytes) => {
                self.buf.extend_from_slice(bytes);
                Ok(())
            }
            Items::Elements(elements) => {
                elements.element_shape().ensure_supported()?;
                elements.visit(&mut |element| self.write_field(element))
            }
        }
    }

    #[inline]
    fn put<const N: usize>(&mut self, fill: impl FnOnce(&mut [u8])) {
        let mut raw = [0u8; N];
        fill(&mut raw[..]);
        self.buf.extend_from_slice(&raw);
    }
}

/// Computes the exact number of bytes [`Writer::write_record`] would append.
pub fn measure_record(record: &dyn Record) -> Result<usize> {
    let mut total = 0usize;
    record.visit(&mut |field| {
        total += measure_field(field)?;
        Ok(())
    })?;
    Ok(total)
}

pub fn measure_field(field: FieldRef<'_>) -> Result<usize> {
    Ok(match field {
        FieldRef::Int8(_) | FieldRef::Uint8(_) => 1,
        FieldRef::Int16(_) | FieldRef::Uint16(_) => 2,
        FieldRef::Int32(_) | FieldRef::Uint32(_) | FieldRef::Float32(_) => 4,
        FieldRef::Int64(_) | FieldRef::Uint64(_) => 8,
        FieldRef::FixedArray(items) => measure_items(items)?,
        FieldRef::Sequence(items) => {
            sequence_count(&items)?;
            SEQUENCE_PREFIX_LEN + measure_items(items)?
        }
        FieldRef::Struct(record) => measure_record(record)?,
        FieldRef::Unsupported(kind) => return Err(WireError::UnsupportedKind { kind }),
    })
}

fn measure_items(items: Items<'_>) -> Result<usize> {
    match items {
        Items::Bytes(bytes) => Ok(bytes.len()),
        Items::Elements(elements) => {
            let shape = elements.element_shape();
            shape.ensure_supported()?;
            if let Some(size) = shape.fixed_size() {
                return Ok(size * elements.len());
            }
            let mut total = 0usize;
            elements.visit(&mut |element| {
                total += measure_field(element)?;
                Ok(())
            })?;
            Ok(total)
        }
    }
}

fn sequence_count(items: &Items<'_>) -> Result<u32> {
    let len = items.len();
    u32::try_from(len).map_err(|_| WireError::SequenceTooLong {
        len,
        max: u32::MAX as usize,
    })
}
