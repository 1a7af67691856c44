pub use crate::error::WireError;
pub use crate::field::{Field, FieldMut, FieldRef, Record};
pub use crate::kind::{FieldDescriptor, Kind, Shape};

pub type Result<I> = std::result::Result<I, WireError>;
