//! Leaf conversion adapters
//!
//! Each adapter pairs a capability check against the Python object protocol
//! with a conversion step. They depend only on PyO3's extraction and
//! construction primitives, never on each other; the registry decides which
//! one runs.

pub mod enums;
pub mod iterator;
pub mod list;
pub mod sequence;

pub use enums::{EnumToInt, IntEnum, IntToEnum};
pub use iterator::IteratorToVec;
pub use list::VecToList;
pub use sequence::SequenceToVec;
