//! Growable ring buffer.
//!
//! Elements occupy a power-of-two slot array starting at `head` and wrapping
//! around the end, so enqueue and dequeue are both *O*(1). Positions map to
//! slots with a mask instead of a modulo. When full, the next enqueue doubles
//! the array and unwraps the contents to start at slot 0.
//!
//! # Example
//!
//! ```
//! use primer_queue::{Queue, RingBuffer};
//!
//! let mut ring = RingBuffer::with_capacity(2);
//! ring.enqueue(1);
//! ring.enqueue(2);
//! ring.enqueue(3); // grows to 4 slots
//!
//! assert_eq!(ring.capacity(), 4);
//! assert_eq!(ring.dequeue(), Ok(1));
//! assert_eq!(ring.get_start(), Ok(&2));
//! ```

use std::fmt;
use std::mem::MaybeUninit;
use std::{ptr, slice};

use crate::{Empty, Queue};

/// Slot count used by [`RingBuffer::new`].
pub const DEFAULT_RING_CAPACITY: usize = 16;

/// A growable FIFO ring buffer.
pub struct RingBuffer<T> {
    /// Slots `head..head + len` (masked) are initialized.
    buf: Box<[MaybeUninit<T>]>,
    head: usize,
    len: usize,
    mask: usize,
}

impl<T> RingBuffer<T> {
    /// Creates an empty ring buffer with [`DEFAULT_RING_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_RING_CAPACITY)
    }

    /// Creates an empty ring buffer with at least `capacity` slots.
    ///
    /// The actual capacity is rounded up to the next power of two, and is
    /// at least 1.
    ///
    /// # Panics
    ///
    /// Panics if the rounded capacity overflows `usize`.
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity
            .max(1)
            .checked_next_power_of_two()
            .expect("capacity overflow");

        Self {
            buf: Box::new_uninit_slice(capacity),
            head: 0,
            len: 0,
            mask: capacity - 1,
        }
    }

    /// Returns the number of elements in the buffer.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the buffer holds no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots.
    #[inline]
    pub const fn capacity(&self) -> usize {
        self.mask + 1
    }

    /// Appends an element at the back.
    ///
    /// # Panics
    ///
    /// Panics if doubling the capacity overflows.
    #[inline]
    pub fn push_back(&mut self, value: T) {
        if self.len == self.capacity() {
            self.grow();
        }

        let slot = (self.head + self.len) & self.mask;
        self.buf[slot].write(value);
        self.len += 1;
    }

    /// Removes and returns the front element, or `None` if empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        if self.len == 0 {
            return None;
        }

        // SAFETY: len > 0, so the head slot is initialized. Advancing head
        // past it marks it uninitialized before anyone can read it again.
        let value = unsafe { self.buf[self.head].assume_init_read() };
        self.head = (self.head + 1) & self.mask;
        self.len -= 1;
        Some(value)
    }

    /// Returns a reference to the front element, or `None` if empty.
    #[inline]
    pub fn front(&self) -> Option<&T> {
        self.iter().next()
    }

    /// Returns a reference to the back element, or `None` if empty.
    #[inline]
    pub fn back(&self) -> Option<&T> {
        self.iter().next_back()
    }

    /// Returns the contents as two slices, front to back.
    ///
    /// The second slice is non-empty only when the contents wrap around the
    /// end of the slot array.
    pub fn as_slices(&self) -> (&[T], &[T]) {
        let first_len = self.len.min(self.capacity() - self.head);
        let ptr = self.buf.as_ptr().cast::<T>();

        // SAFETY: slots head..head + first_len and 0..len - first_len are
        // exactly the initialized ones.
        unsafe {
            (
                slice::from_raw_parts(ptr.add(self.head), first_len),
                slice::from_raw_parts(ptr, self.len - first_len),
            )
        }
    }

    fn as_mut_slices(&mut self) -> (&mut [T], &mut [T]) {
        let first_len = self.len.min(self.capacity() - self.head);
        let ptr = self.buf.as_mut_ptr().cast::<T>();

        // SAFETY: same ranges as `as_slices`; they never overlap because
        // first_len + (len - first_len) <= capacity.
        unsafe {
            (
                slice::from_raw_parts_mut(ptr.add(self.head), first_len),
                slice::from_raw_parts_mut(ptr, self.len - first_len),
            )
        }
    }

    /// Returns an iterator over the elements, front to back.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T> {
        let (first, second) = self.as_slices();
        Iter {
            first: first.iter(),
            second: second.iter(),
        }
    }

    /// Drops every element. Capacity is kept.
    pub fn clear(&mut self) {
        let (first, second) = self.as_mut_slices();
        let (first, second): (*mut [T], *mut [T]) = (first, second);
        self.head = 0;
        self.len = 0;

        // SAFETY: both ranges were initialized and are now outside 0..len,
        // so a panicking destructor cannot cause a double drop.
        unsafe {
            ptr::drop_in_place(first);
            ptr::drop_in_place(second);
        }
    }

    #[cold]
    fn grow(&mut self) {
        let capacity = self.capacity();
        let new_capacity = capacity.checked_mul(2).expect("capacity overflow");
        let mut new_buf = Box::<[T]>::new_uninit_slice(new_capacity);

        let first_len = self.len.min(capacity - self.head);
        let src = self.buf.as_ptr();
        let dst = new_buf.as_mut_ptr();

        // SAFETY: moves the two initialized runs to slots 0..len of the new
        // buffer. The old buffer holds MaybeUninit, so dropping it frees the
        // memory without touching the moved elements.
        unsafe {
            ptr::copy_nonoverlapping(src.add(self.head), dst, first_len);
            ptr::copy_nonoverlapping(src, dst.add(first_len), self.len - first_len);
        }

        self.buf = new_buf;
        self.head = 0;
        self.mask = new_capacity - 1;
    }
}

impl<T> Queue<T> for RingBuffer<T> {
    #[inline]
    fn is_empty(&self) -> bool {
        Self::is_empty(self)
    }

    #[inline]
    fn enqueue(&mut self, element: T) {
        self.push_back(element);
    }

    #[inline]
    fn dequeue(&mut self) -> Result<T, Empty> {
        self.pop_front().ok_or(Empty)
    }

    #[inline]
    fn get_start(&self) -> Result<&T, Empty> {
        self.front().ok_or(Empty)
    }

    #[inline]
    fn len(&self) -> usize {
        Self::len(self)
    }
}

impl<T> Drop for RingBuffer<T> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<T> Default for RingBuffer<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for RingBuffer<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for RingBuffer<T> {
    fn clone(&self) -> Self {
        let mut ring = Self::with_capacity(self.capacity());
        ring.extend(self.iter().cloned());
        ring
    }
}

impl<T> Extend<T> for RingBuffer<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.push_back(value);
        }
    }
}

impl<T> FromIterator<T> for RingBuffer<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let iter = iter.into_iter();
        let mut ring = Self::with_capacity(iter.size_hint().0);
        ring.extend(iter);
        ring
    }
}

impl<'a, T> IntoIterator for &'a RingBuffer<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over references to ring buffer elements.
#[derive(Debug, Clone)]
pub struct Iter<'a, T> {
    first: slice::Iter<'a, T>,
    second: slice::Iter<'a, T>,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        self.first.next().or_else(|| self.second.next())
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.first.len() + self.second.len();
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        self.second.next_back().or_else(|| self.first.next_back())
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}
