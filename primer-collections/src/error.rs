//! Error type shared by the collections in this crate.

use core::fmt;

/// Failure reported by an [`ArrayList`](crate::ArrayList) or
/// [`LinkedList`](crate::LinkedList) operation.
///
/// Every error is reported before the container is touched, so the
/// container is unchanged when one is returned.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CollectionError {
    /// Requested capacity cannot be allocated: its byte size overflows
    /// `isize`, or the allocator has no block that large.
    InvalidCapacity {
        /// The rejected capacity.
        requested: usize,
    },
    /// Index outside `0..len`.
    OutOfBounds {
        /// The index that was asked for.
        index: usize,
        /// Logical length at the time of the call.
        len: usize,
    },
    /// No element compares equal to the one looked up.
    NotFound,
    /// The container holds no elements.
    Empty,
}

impl fmt::Display for CollectionError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CollectionError::InvalidCapacity { requested } => {
                write!(f, "capacity {requested} exceeds the maximum allocation size")
            }
            CollectionError::OutOfBounds { index, len } => {
                write!(f, "index {index} out of bounds for length {len}")
            }
            CollectionError::NotFound => write!(f, "element not found"),
            CollectionError::Empty => write!(f, "collection is empty"),
        }
    }
}

impl std::error::Error for CollectionError {}
