use std::collections::{BTreeMap, HashMap};

use crate::kind::{FieldDescriptor, Kind, Shape};
use crate::prelude::Result;

/// A type that can appear as a field on the wire.
///
/// `SHAPE` is the static descriptor; `view` and `view_mut` hand the
/// traversal a kind-tagged borrow of the value. Both directions match on
/// the same closed set of view variants.
pub trait Field: Sized {
    const SHAPE: Shape;

    fn shape() -> Shape {
        Self::SHAPE
    }

    fn view(&self) -> FieldRef<'_>;

    fn view_mut(&mut self) -> FieldMut<'_>;

    #[doc(hidden)]
    fn byte_slice(_slice: &[Self]) -> Option<&[u8]> {
        None
    }

    #[doc(hidden)]
    fn byte_array_mut<const N: usize>(
        array: &mut [Self; N],
    ) -> std::result::Result<&mut [u8; N], &mut [Self; N]> {
        Err(array)
    }

    #[doc(hidden)]
    fn byte_vec_mut(vec: &mut Vec<Self>) -> std::result::Result<&mut Vec<u8>, &mut Vec<Self>> {
        Err(vec)
    }
}

/// A struct whose fields are walked in declaration order.
///
/// Usually generated by `#[derive(Record)]`.
pub trait Record {
    fn fields(&self) -> &'static [FieldDescriptor];

    fn visit(&self, visitor: &mut dyn FnMut(FieldRef<'_>) -> Result<()>) -> Result<()>;

    fn visit_mut(&mut self, visitor: &mut dyn FnMut(FieldMut<'_>) -> Result<()>) -> Result<()>;
}

pub enum FieldRef<'a> {
    Int8(i8),
    Uint8(u8),
    Int16(i16),
    Uint16(u16),
    Int32(i32),
    Uint32(u32),
    Float32(f32),
    Int64(i64),
    Uint64(u64),
    FixedArray(Items<'a>),
    Sequence(Items<'a>),
    Struct(&'a dyn Record),
    Unsupported(&'static str),
}

pub enum FieldMut<'a> {
    Int8(&'a mut i8),
    Uint8(&'a mut u8),
    Int16(&'a mut i16),
    Uint16(&'a mut u16),
    Int32(&'a mut i32),
    Uint32(&'a mut u32),
    Float32(&'a mut f32),
    Int64(&'a mut i64),
    Uint64(&'a mut u64),
    FixedArray(ItemsMut<'a>),
    Sequence(&'a mut dyn Sequence),
    Struct(&'a mut dyn Record),
    Unsupported(&'static str),
}

/// Contents of an array or sequence, with byte elements split out for the
/// raw copy path.
pub enum Items<'a> {
    Bytes(&'a [u8]),
    Elements(&'a dyn Elements),
}

pub enum ItemsMut<'a> {
    Bytes(&'a mut [u8]),
    Elements(&'a mut dyn ElementsMut),
}

pub trait Elements {
    fn element_shape(&self) -> Shape;

    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn visit(&self, visitor: &mut dyn FnMut(FieldRef<'_>) -> Result<()>) -> Result<()>;
}

pub trait ElementsMut {
    fn element_shape(&self) -> Shape;

    fn visit_mut(&mut self, visitor: &mut dyn FnMut(FieldMut<'_>) -> Result<()>) -> Result<()>;
}

/// A growable container the reader can size from a count prefix.
pub trait Sequence {
    fn element_shape(&self) -> Shape;

    fn clear(&mut self);

    /// Replaces the contents with `len` default elements.
    fn reset(&mut self, len: usize) -> ItemsMut<'_>;
}

impl<'a> Items<'a> {
    pub fn len(&self) -> usize {
        match self {
            Items::Bytes(bytes) => bytes.len(),
            Items::Elements(elements) => elements.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn element_shape(&self) -> Shape {
        match self {
            Items::Bytes(_) => Shape::Primitive(Kind::Uint8),
            Items::Elements(elements) => elements.element_shape(),
        }
    }
}

impl<'a> ItemsMut<'a> {
    pub fn element_shape(&self) -> Shape {
        match self {
            ItemsMut::Bytes(_) => Shape::Primitive(Kind::Uint8),
            ItemsMut::Elements(elements) => elements.element_shape(),
        }
    }
}

macro_rules! primitive {
    ($ty:ty, $variant:ident) => {
        impl Field for $ty {
            const SHAPE: Shape = Shape::Primitive(Kind::$variant);

            fn view(&self) -> FieldRef<'_> {
                FieldRef::$variant(*self)
            }

            fn view_mut(&mut self) -> FieldMut<'_> {
                FieldMut::$variant(self)
            }
        }
    };
}

primitive!(i8, Int8);
primitive!(i16, Int16);
primitive!(u16, Uint16);
primitive!(i32, Int32);
primitive!(u32, Uint32);
primitive!(f32, Float32);
primitive!(i64, Int64);
primitive!(u64, Uint64);

impl Field for u8 {
    const SHAPE: Shape = Shape::Primitive(Kind::Uint8);

    fn view(&self) -> FieldRef<'_> {
        FieldRef::Uint8(*self)
    }

    fn view_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Uint8(self)
    }

    fn byte_slice(slice: &[u8]) -> Option<&[u8]> {
        Some(slice)
    }

    fn byte_array_mut<const N: usize>(
        array: &mut [u8; N],
    ) -> std::result::Result<&mut [u8; N], &mut [u8; N]> {
        Ok(array)
    }

    fn byte_vec_mut(vec: &mut Vec<u8>) -> std::result::Result<&mut Vec<u8>, &mut Vec<u8>> {
        Ok(vec)
    }
}

impl<T: Field, const N: usize> Field for [T; N] {
    const SHAPE: Shape = Shape::FixedArray {
        len: N,
        element: T::shape,
    };

    fn view(&self) -> FieldRef<'_> {
        match T::byte_slice(self) {
            Some(bytes) => FieldRef::FixedArray(Items::Bytes(bytes)),
            None => FieldRef::FixedArray(Items::Elements(self)),
        }
    }

    fn view_mut(&mut self) -> FieldMut<'_> {
        match T::byte_array_mut(self) {
            Ok(bytes) => FieldMut::FixedArray(ItemsMut::Bytes(bytes)),
            Err(array) => FieldMut::FixedArray(ItemsMut::Elements(array)),
        }
    }
}

impl<T: Field, const N: usize> Elements for [T; N] {
    fn element_shape(&self) -> Shape {
        T::SHAPE
    }

    fn len(&self) -> usize {
        N
    }

    fn visit(&self, visitor: &mut dyn FnMut(FieldRef<'_>) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(|element| visitor(element.view()))
    }
}

impl<T: Field, const N: usize> ElementsMut for [T; N] {
    fn element_shape(&self) -> Shape {
        T::SHAPE
    }

    fn visit_mut(&mut self, visitor: &mut dyn FnMut(FieldMut<'_>) -> Result<()>) -> Result<()> {
        self.iter_mut().try_for_each(|element| visitor(element.view_mut()))
    }
}

impl<T: Field + Default> Field for Vec<T> {
    const SHAPE: Shape = Shape::Sequence { element: T::shape };

    fn view(&self) -> FieldRef<'_> {
        match T::byte_slice(self) {
            Some(bytes) => FieldRef::Sequence(Items::Bytes(bytes)),
            None => FieldRef::Sequence(Items::Elements(self)),
        }
    }

    fn view_mut(&mut self) -> FieldMut<'_> {
        FieldMut::Sequence(self)
    }
}

impl<T: Field> Elements for Vec<T> {
    fn element_shape(&self) -> Shape {
        T::SHAPE
    }

    fn len(&self) -> usize {
        Vec::len(self)
    }

    fn visit(&self, visitor: &mut dyn FnMut(FieldRef<'_>) -> Result<()>) -> Result<()> {
        self.iter().try_for_each(|element| visitor(element.view()))
    }
}

impl<T: Field> ElementsMut for Vec<T> {
    fn element_shape(&self) -> Shape {
        T::SHAPE
    }

    fn visit_mut(&mut self, visitor: &mut dyn FnMut(FieldMut<'_>) -> Result<()>) -> Result<()> {
        self.iter_mut().try_for_each(|element| visitor(element.view_mut()))
    }
}

impl<T: Field + Default> Sequence for Vec<T> {
    fn element_shape(&self) -> Shape {
        T::SHAPE
    }

    fn clear(&mut self) {
        Vec::clear(self);
    }

    fn reset(&mut self, len: usize) -> ItemsMut<'_> {
        match T::byte_vec_mut(self) {
            Ok(bytes) => {
                bytes.clear();
                bytes.resize(len, 0);
                ItemsMut::Bytes(bytes)
            }
            Err(elements) => {
                elements.clear();
                elements.resize_with(len, T::default);
                ItemsMut::Elements(elements)
            }
        }
    }
}

// Host types outside the wire format. They still implement `Field` so that
// a record containing them fails at runtime with `UnsupportedKind` instead
// of being silently skipped.
macro_rules! unsupported {
    ($name:expr, $($ty:tt)+) => {
        impl Field for $($ty)+ {
            const SHAPE: Shape = Shape::Unsupported($name);

            fn view(&self) -> FieldRef<'_> {
                FieldRef::Unsupported($name)
            }

            fn view_mut(&mut self) -> FieldMut<'_> {
                FieldMut::Unsupported($name)
            }
        }
    };
}

unsupported!("bool", bool);
unsupported!("char", char);
unsupported!("f64", f64);
unsupported!("i128", i128);
unsupported!("u128", u128);
unsupported!("isize", isize);
unsupported!("usize", usize);
unsupported!("()", ());
unsupported!("String", String);

macro_rules! unsupported_generic {
    ($name:expr, [$($param:ident),+], $ty:ty) => {
        impl<$($param),+> Field for $ty {
            const SHAPE: Shape = Shape::Unsupported($name);

            fn view(&self) -> FieldRef<'_> {
                FieldRef::Unsupported($name)
            }

            fn view_mut(&mut self) -> FieldMut<'_> {
                FieldMut::Unsupported($name)
            }
        }
    };
}

unsupported_generic!("Option", [T], Option<T>);
unsupported_generic!("Box", [T], Box<T>);
unsupported_generic!("HashMap", [K, V, S], HashMap<K, V, S>);
unsupported_generic!("BTreeMap", [K, V], BTreeMap<K, V>);
