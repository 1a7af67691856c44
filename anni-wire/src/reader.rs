use byteorder::{ByteOrder, LittleEndian};

use crate::config::WireConfig;
use crate::error::WireError;
use crate::field::{FieldMut, ItemsMut, Record, Sequence};
use crate::prelude::Result;
use crate::writer::SEQUENCE_PREFIX_LEN;

/// Populates records from a borrowed byte slice.
///
/// The cursor only moves forward. Every read is checked against the bytes
/// remaining; on failure the destination may already hold some decoded
/// fields and must be discarded.
pub struct Reader<'a> {
    buf: &'a [u8],
    pos: usize,
    depth: usize,
    config: &'a WireConfig,
}

impl<'a> Reader<'a> {
    pub fn new(buf: &'a [u8], config: &'a WireConfig) -> Self {
        Self {
            buf,
            pos: 0,
            depth: 0,
            config,
        }
    }

    pub fn position(&self) -> usize {
        self.pos
    }

    pub fn remaining(&self) -> usize {
        self.buf.len() - self.pos
    }

    pub fn read_record(&mut self, record: &mut dyn Record) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(WireError::DepthLimitExceeded {
                max: self.config.max_depth,
            });
        }
        self.depth += 1;
        let result = record.visit_mut(&mut |field| self.read_field(field));
        self.depth -= 1;
        result
    }

    pub fn read_field(&mut self, field: FieldMut<'_>) -> Result<()> {
        match field {
            FieldMut::Int8(v) => *v = self.take(1)?[0] as i8,
            FieldMut::Uint8(v) => *v = self.take(1)?[0],
            FieldMut::Int16(v) => *v = LittleEndian::read_i16(self.take(2)?),
            FieldMut::Uint16(v) => *v = LittleEndian::read_u16(self.take(2)?),
            FieldMut::Int32(v) => *v = LittleEndian::read_i32(self.take(4)?),
            FieldMut::Uint32(v) => *v = LittleEndian::read_u32(self.take(4)?),
            FieldMut::Float32(v) => *v = LittleEndian::read_f32(self.take(4)?),
            FieldMut::Int64(v) => *v = LittleEndian::read_i64(self.take(8)?),
            FieldMut::Uint64(v) => *v = LittleEndian::read_u64(self.take(8)?),
            FieldMut::FixedArray(items) => self.read_items(items)?,
            FieldMut::Sequence(seq) => self.read_sequence(seq)?,
            FieldMut::Struct(record) => self.read_record(record)?,
            FieldMut::Unsupported(kind) => return Err(WireError::UnsupportedKind { kind }),
        }
        Ok(())
    }

    fn read_sequence(&mut self, seq: &mut dyn Sequence) -> Result<()> {
        let shape = seq.element_shape();
        shape.ensure_supported()?;

        let count = LittleEndian::read_u32(self.take(SEQUENCE_PREFIX_LEN)?);
        if count > self.config.max_sequence_len {
            return Err(WireError::SequenceTooLong {
                len: count as usize,
                max: self.config.max_sequence_len as usize,
            });
        }
        if count == 0 {
            seq.clear();
            return Ok(());
        }

        let len = count as usize;
        // Refuse counts the remaining input cannot possibly satisfy before
        // allocating for them.
        match shape.min_size() {
            0 if count > self.config.max_zero_sized_len => {
                return Err(WireError::SequenceTooLong {
                    len,
                    max: self.config.max_zero_sized_len as usize,
                });
            }
            size => {
                let needed = size.saturating_mul(len);
                if needed > self.remaining() {
                    return Err(WireError::TruncatedInput {
                        needed,
                        remaining: self.remaining(),
                    });
                }
            }
        }
        let items = seq.reset(len);
        self.read_items(items)
    }

    fn read_items(&mut self, items: ItemsMut<'_>) -> Result<()> {
        match items {
            ItemsMut::Bytes(bytes) => {
                let len = bytes.len();
                bytes.copy_from_slice(self.take(len)?);
                Ok(())
            }
            ItemsMut::Elements(elements) => {
                elements.element_shape().ensure_supported()?;
                elements.visit_mut(&mut |element| self.read_field(element))
            }
        }
    }

    fn take(&mut self, len: usize) -> Result<&'a [u8]> {
        let remaining = self.remaining();
        if len > remaining {
            return Err(WireError::TruncatedInput {
                needed: len,
                remaining,
            });
        }
        let start = self.pos;
        self.pos += len;
        Ok(&self.buf[start..self.pos])
    }
}
