use std::fmt;

use crate::error::WireError;
use crate::prelude::Result;
use crate::writer::SEQUENCE_PREFIX_LEN;

/// The closed set of field kinds the wire format understands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Kind {
    Int8,
    Uint8,
    Int16,
    Uint16,
    Int32,
    Uint32,
    Float32,
    Int64,
    Uint64,
    FixedArray,
    VariableSequence,
    Struct,
}

impl Kind {
    /// Encoded width in bytes for primitive kinds, `None` for composites.
    pub const fn width(&self) -> Option<usize> {
        match self {
            Kind::Int8 | Kind::Uint8 => Some(1),
            Kind::Int16 | Kind::Uint16 => Some(2),
            Kind::Int32 | Kind::Uint32 | Kind::Float32 => Some(4),
            Kind::Int64 | Kind::Uint64 => Some(8),
            Kind::FixedArray | Kind::VariableSequence | Kind::Struct => None,
        }
    }

    pub const fn is_primitive(&self) -> bool {
        self.width().is_some()
    }

    pub const fn name(&self) -> &'static str {
        match self {
            Kind::Int8 => "i8",
            Kind::Uint8 => "u8",
            Kind::Int16 => "i16",
            Kind::Uint16 => "u16",
            Kind::Int32 => "i32",
            Kind::Uint32 => "u32",
            Kind::Float32 => "f32",
            Kind::Int64 => "i64",
            Kind::Uint64 => "u64",
            Kind::FixedArray => "fixed array",
            Kind::VariableSequence => "sequence",
            Kind::Struct => "struct",
        }
    }
}

impl fmt::Display for Kind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Static description of how a type is laid out on the wire.
///
/// Element and field shapes are stored as function pointers so that
/// self-referencing records (a struct holding a `Vec` of itself) can be
/// described without evaluating an infinite tree.
#[derive(Debug, Clone, Copy)]
pub enum Shape {
    Primitive(Kind),
    FixedArray { len: usize, element: fn() -> Shape },
    Sequence { element: fn() -> Shape },
    Struct {
        name: &'static str,
        fields: &'static [FieldDescriptor],
    },
    /// A host type outside the supported set, named for error reporting.
    Unsupported(&'static str),
}

impl Shape {
    pub fn kind(&self) -> Option<Kind> {
        match self {
            Shape::Primitive(kind) => Some(*kind),
            Shape::FixedArray { .. } => Some(Kind::FixedArray),
            Shape::Sequence { .. } => Some(Kind::VariableSequence),
            Shape::Struct { .. } => Some(Kind::Struct),
            Shape::Unsupported(_) => None,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Shape::Primitive(kind) => kind.name(),
            Shape::FixedArray { .. } => Kind::FixedArray.name(),
            Shape::Sequence { .. } => Kind::VariableSequence.name(),
            Shape::Struct { name, .. } => *name,
            Shape::Unsupported(name) => *name,
        }
    }

    /// Field table of a struct shape, empty for every other shape.
    pub fn fields(&self) -> &'static [FieldDescriptor] {
        match self {
            Shape::Struct { fields, .. } => *fields,
            _ => &[],
        }
    }

    pub fn is_byte(&self) -> bool {
        matches!(self, Shape::Primitive(Kind::Uint8))
    }

    /// Follows array and sequence element shapes down to the first
    /// non-container shape.
    ///
    /// Struct fields are not entered, so this terminates for recursive
    /// records.
    pub fn leaf(&self) -> Shape {
        let mut shape = *self;
        loop {
            match shape {
                Shape::FixedArray { element, .. } | Shape::Sequence { element } => {
                    shape = element()
                }
                _ => return shape,
            }
        }
    }

    /// Rejects a container whose element kind lies outside the wire format.
    ///
    /// Element shapes are static, so this fails even when the container
    /// holds no elements.
    pub fn ensure_supported(&self) -> Result<()> {
        match self.leaf() {
            Shape::Unsupported(kind) => Err(WireError::UnsupportedKind { kind }),
            _ => Ok(()),
        }
    }

    /// Number of bytes every value of this shape occupies on the wire.
    ///
    /// `None` when the shape contains a variable sequence or an
    /// unsupported kind anywhere below it.
    pub fn fixed_size(&self) -> Option<usize> {
        match self {
            Shape::Primitive(kind) => kind.width(),
            Shape::FixedArray { len, element } => element().fixed_size()?.checked_mul(*len),
            Shape::Sequence { .. } | Shape::Unsupported(_) => None,
            Shape::Struct { fields, .. } => fields
                .iter()
                .try_fold(0usize, |acc, field| {
                    acc.checked_add(field.shape().fixed_size()?)
                }),
        }
    }

    /// Fewest bytes any value of this shape can occupy on the wire.
    ///
    /// A sequence counts as its prefix alone and its elements are not
    /// entered, so this terminates for recursive records. Unsupported kinds
    /// count as zero.
    pub fn min_size(&self) -> usize {
        match self {
            Shape::Primitive(kind) => kind.width().unwrap_or(0),
            Shape::FixedArray { len, element } => element().min_size().saturating_mul(*len),
            Shape::Sequence { .. } => SEQUENCE_PREFIX_LEN,
            Shape::Unsupported(_) => 0,
            Shape::Struct { fields, .. } => fields
                .iter()
                .fold(0usize, |acc, field| acc.saturating_add(field.shape().min_size())),
        }
    }
}

impl fmt::Display for Shape {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Shape::Primitive(kind) => write!(f, "{kind}"),
            Shape::FixedArray { len, element } => write!(f, "[{}; {len}]", element()),
            Shape::Sequence { element } => write!(f, "[{}]", element()),
            Shape::Struct { name, .. } => f.write_str(name),
            Shape::Unsupported(name) => write!(f, "{name} (unsupported)"),
        }
    }
}

/// One declared field of a record, in declaration order.
#[derive(Debug, Clone, Copy)]
pub struct FieldDescriptor {
    pub name: &'static str,
    shape: fn() -> Shape,
}

impl FieldDescriptor {
    pub const fn new(name: &'static str, shape: fn() -> Shape) -> Self {
        Self { name, shape }
    }

    pub fn shape(&self) -> Shape {
        (self.shape)()
    }
}
