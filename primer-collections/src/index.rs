//! Node handles with a reserved "no node" value.
//!
//! Linked-list nodes refer to their neighbours by arena index. An absent
//! neighbour is stored as [`Index::NONE`] rather than `Option<Idx>`, which
//! keeps a node's two links as small as the index type itself.

/// A copyable arena index with a sentinel "none" value.
///
/// The sentinel is never handed out as a real slot, so an index type with
/// `N` values addresses at most `N - 1` slots.
///
/// # Example
///
/// ```
/// use primer_collections::Index;
///
/// assert!(u32::NONE.is_none());
/// assert_eq!(u8::try_from_usize(7), Some(7));
/// assert_eq!(u8::try_from_usize(255), None); // the sentinel
/// assert_eq!(u8::try_from_usize(300), None);
/// ```
pub trait Index: Copy + Eq + core::fmt::Debug {
    /// Sentinel marking an absent link.
    const NONE: Self;

    /// Returns `true` if this is the sentinel value.
    #[inline]
    fn is_none(self) -> bool {
        self == Self::NONE
    }

    /// Returns `true` if this names a slot.
    #[inline]
    fn is_some(self) -> bool {
        self != Self::NONE
    }

    /// Slot position in the backing storage.
    fn as_usize(self) -> usize;

    /// Converts slot position `pos` into an index.
    ///
    /// Returns `None` when `pos` does not fit the type or would collide
    /// with [`NONE`](Index::NONE).
    fn try_from_usize(pos: usize) -> Option<Self>;
}

macro_rules! unsigned_index {
    ($($ty:ty),*) => {$(
        impl Index for $ty {
            const NONE: Self = <$ty>::MAX;

            #[inline]
            fn as_usize(self) -> usize {
                self as usize
            }

            #[inline]
            fn try_from_usize(pos: usize) -> Option<Self> {
                <$ty>::try_from(pos).ok().filter(|&idx| idx != Self::NONE)
            }
        }
    )*};
}

unsigned_index!(u8, u16, u32, u64, usize);
