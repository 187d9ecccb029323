//! Slot storage with stable indices.
//!
//! Storage hands out an index on insert that stays valid until that value
//! is removed. [`LinkedList`](crate::LinkedList) keeps its nodes in storage
//! and links them by index, so no node ever holds a pointer to another.

use crate::Index;

use core::mem;

/// Slab-like storage with stable indices.
///
/// # Requirements
///
/// Implementations must provide:
/// - **Stable indices**: an index remains valid until explicitly removed
/// - **O(1)** insert, remove, get operations
/// - **Slot reuse**: removed slots can be reused by future inserts
///
/// # Implementations
///
/// - [`Arena<T>`] - growable, `Vec` backed (in this crate)
/// - `slab::Slab<T>` - growable (feature `slab`)
pub trait Storage<T> {
    /// Index type for this storage.
    type Index: Index;

    /// Inserts a value, returning its stable index.
    ///
    /// # Panics
    ///
    /// May panic if the number of slots would reach `Self::Index::NONE`.
    fn insert(&mut self, value: T) -> Self::Index;

    /// Removes and returns the value at `index`, if present.
    fn remove(&mut self, index: Self::Index) -> Option<T>;

    /// Returns a reference to the value at `index`, if present.
    fn get(&self, index: Self::Index) -> Option<&T>;

    /// Returns a mutable reference to the value at `index`, if present.
    fn get_mut(&mut self, index: Self::Index) -> Option<&mut T>;

    /// Returns the number of occupied slots.
    fn len(&self) -> usize;

    /// Returns `true` if no slots are occupied.
    #[inline]
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Drops every stored value. All previously issued indices become invalid.
    fn clear(&mut self);
}

// =============================================================================
// Arena - growable, free stack reuse
// =============================================================================

#[derive(Debug, Clone)]
enum Slot<T> {
    Occupied(T),
    Vacant,
}

/// Growable storage with a LIFO free stack.
///
/// Slots live in a `Vec`. A removed slot is pushed onto the free stack and
/// handed out again by the next insert, so indices stay dense under churn.
///
/// # Example
///
/// ```
/// use primer_collections::{Arena, Storage};
///
/// let mut arena: Arena<u64> = Arena::with_capacity(16);
///
/// let idx = arena.insert(42);
/// assert_eq!(arena.get(idx), Some(&42));
/// assert_eq!(arena.remove(idx), Some(42));
/// assert_eq!(arena.get(idx), None);
/// ```
#[derive(Debug, Clone)]
pub struct Arena<T, Idx: Index = u32> {
    slots: Vec<Slot<T>>,
    /// Vacant slot indices, most recently freed last.
    free: Vec<Idx>,
}

impl<T, Idx: Index> Arena<T, Idx> {
    /// Creates an empty arena. Does not allocate.
    #[inline]
    pub const fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
        }
    }

    /// Creates an empty arena with room for `capacity` values before
    /// reallocating.
    #[inline]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
        }
    }

    /// Returns the number of values the arena can hold without reallocating.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.slots.capacity()
    }
}

impl<T, Idx: Index> Default for Arena<T, Idx> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T, Idx: Index> Storage<T> for Arena<T, Idx> {
    type Index = Idx;

    fn insert(&mut self, value: T) -> Idx {
        if let Some(idx) = self.free.pop() {
            self.slots[idx.as_usize()] = Slot::Occupied(value);
            return idx;
        }

        let idx =
            Idx::try_from_usize(self.slots.len()).expect("arena exceeds index type maximum");
        self.slots.push(Slot::Occupied(value));
        idx
    }

    fn remove(&mut self, index: Idx) -> Option<T> {
        let slot = self.slots.get_mut(index.as_usize())?;
        if let Slot::Vacant = slot {
            return None;
        }

        match mem::replace(slot, Slot::Vacant) {
            Slot::Occupied(value) => {
                self.free.push(index);
                Some(value)
            }
            Slot::Vacant => None,
        }
    }

    #[inline]
    fn get(&self, index: Idx) -> Option<&T> {
        match self.slots.get(index.as_usize())? {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    #[inline]
    fn get_mut(&mut self, index: Idx) -> Option<&mut T> {
        let i = index.as_usize();
        if i >= self.slots.len() {
            return None;
        }

        // Borrows slot `i` alone; references into other slots stay valid.
        let slot = unsafe { &mut *self.slots.as_mut_ptr().add(i) };
        match slot {
            Slot::Occupied(value) => Some(value),
            Slot::Vacant => None,
        }
    }

    #[inline]
    fn len(&self) -> usize {
        self.slots.len() - self.free.len()
    }

    fn clear(&mut self) {
        self.slots.clear();
        self.free.clear();
    }
}

// =============================================================================
// slab::Slab implementation
// =============================================================================

#[cfg(feature = "slab")]
impl<T> Storage<T> for slab::Slab<T> {
    type Index = usize;

    #[inline]
    fn insert(&mut self, value: T) -> usize {
        slab::Slab::insert(self, value)
    }

    #[inline]
    fn remove(&mut self, index: usize) -> Option<T> {
        self.try_remove(index)
    }

    #[inline]
    fn get(&self, index: usize) -> Option<&T> {
        slab::Slab::get(self, index)
    }

    #[inline]
    fn get_mut(&mut self, index: usize) -> Option<&mut T> {
        slab::Slab::get_mut(self, index)
    }

    #[inline]
    fn len(&self) -> usize {
        slab::Slab::len(self)
    }

    fn clear(&mut self) {
        slab::Slab::clear(self);
    }
}
