//! Contiguous growable list with doubling capacity.
//!
//! Elements occupy slots `0..len` of a single boxed buffer. Slots
//! `len..capacity` are uninitialized. When an append finds the buffer full,
//! capacity doubles and the live elements are moved into the new buffer.
//!
//! # Example
//!
//! ```
//! use primer_collections::ArrayList;
//!
//! let mut list = ArrayList::new();
//! list.add(10);
//! list.add(20);
//! list.add(30);
//!
//! assert_eq!(list.find(&20), Some(1));
//! assert_eq!(list.delete(1), Ok(20));
//! assert_eq!(list, [10, 30]);
//! ```

use crate::CollectionError;

use core::mem::{self, MaybeUninit};
use core::{fmt, ptr, slice};

/// Capacity used by [`ArrayList::new`].
pub const DEFAULT_INITIAL_CAPACITY: usize = 10;

/// A contiguous growable list.
///
/// Capacity starts at whatever the constructor was given and doubles each
/// time an [`add`](ArrayList::add) finds every slot occupied. A list created
/// with capacity 0 grows to 1 on its first append.
pub struct ArrayList<T> {
    /// Slots `0..len` are initialized.
    buf: Box<[MaybeUninit<T>]>,
    len: usize,
}

impl<T> ArrayList<T> {
    /// Creates an empty list with [`DEFAULT_INITIAL_CAPACITY`] slots.
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_INITIAL_CAPACITY)
    }

    /// Creates an empty list with exactly `capacity` slots.
    ///
    /// # Panics
    ///
    /// Panics if `capacity` elements of `T` exceed `isize::MAX` bytes or
    /// cannot be allocated. Use
    /// [`try_with_capacity`](ArrayList::try_with_capacity) to handle that
    /// case.
    pub fn with_capacity(capacity: usize) -> Self {
        match Self::try_with_capacity(capacity) {
            Ok(list) => list,
            Err(_) => panic!("capacity overflow"),
        }
    }

    /// Creates an empty list with exactly `capacity` slots.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::InvalidCapacity`] if `capacity` elements
    /// of `T` exceed `isize::MAX` bytes, or the allocator refuses them.
    ///
    /// # Example
    ///
    /// ```
    /// use primer_collections::{ArrayList, CollectionError};
    ///
    /// let list: ArrayList<u64> = ArrayList::try_with_capacity(4).unwrap();
    /// assert_eq!(list.capacity(), 4);
    ///
    /// let err = ArrayList::<u64>::try_with_capacity(usize::MAX).unwrap_err();
    /// assert_eq!(err, CollectionError::InvalidCapacity { requested: usize::MAX });
    /// ```
    pub fn try_with_capacity(capacity: usize) -> Result<Self, CollectionError> {
        Ok(Self {
            buf: allocate(capacity)?,
            len: 0,
        })
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns the number of elements in the list.
    ///
    /// Same as [`len`](ArrayList::len).
    #[inline]
    pub const fn size(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list contains no elements.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of slots in the backing buffer.
    #[inline]
    pub fn capacity(&self) -> usize {
        self.buf.len()
    }

    /// Appends an element at index `len`.
    ///
    /// # Panics
    ///
    /// Panics if doubling the capacity overflows.
    ///
    /// # Time Complexity
    ///
    /// Amortized *O*(1). The append that finds the buffer full takes
    /// *O*(*len*) to move every element into a buffer twice the size.
    pub fn add(&mut self, element: T) {
        if self.len == self.capacity() {
            self.grow();
        }

        self.buf[self.len].write(element);
        self.len += 1;
    }

    /// Returns a reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::OutOfBounds`] if `index >= len`.
    #[inline]
    pub fn get(&self, index: usize) -> Result<&T, CollectionError> {
        let len = self.len;
        self.as_slice()
            .get(index)
            .ok_or(CollectionError::OutOfBounds { index, len })
    }

    /// Returns a mutable reference to the element at `index`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::OutOfBounds`] if `index >= len`.
    #[inline]
    pub fn get_mut(&mut self, index: usize) -> Result<&mut T, CollectionError> {
        let len = self.len;
        self.as_mut_slice()
            .get_mut(index)
            .ok_or(CollectionError::OutOfBounds { index, len })
    }

    /// Removes and returns the element at `index`, shifting every later
    /// element one slot to the left.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::OutOfBounds`] if `index >= len`. The list
    /// is unchanged in that case.
    ///
    /// # Time Complexity
    ///
    /// *O*(*len* - *index*).
    pub fn delete(&mut self, index: usize) -> Result<T, CollectionError> {
        if index >= self.len {
            return Err(CollectionError::OutOfBounds {
                index,
                len: self.len,
            });
        }

        // Safety: index < len, so the slot is initialized. The stale bits
        // left behind are rotated past the new `len` and never read again.
        let element = unsafe { self.buf[index].assume_init_read() };
        self.buf[index..self.len].rotate_left(1);
        self.len -= 1;

        Ok(element)
    }

    /// Clears the list, dropping every element. Capacity is unchanged.
    pub fn clear(&mut self) {
        let len = mem::replace(&mut self.len, 0);

        // Safety: slots 0..len were initialized, and `len` is reset first so
        // a panicking destructor cannot cause a double drop.
        unsafe {
            ptr::drop_in_place(slice::from_raw_parts_mut(
                self.buf.as_mut_ptr().cast::<T>(),
                len,
            ));
        }
    }

    /// Returns a read-only view of the elements in order.
    #[inline]
    pub fn as_slice(&self) -> &[T] {
        // Safety: slots 0..len are initialized.
        unsafe { slice::from_raw_parts(self.buf.as_ptr().cast::<T>(), self.len) }
    }

    #[inline]
    fn as_mut_slice(&mut self) -> &mut [T] {
        // Safety: slots 0..len are initialized.
        unsafe { slice::from_raw_parts_mut(self.buf.as_mut_ptr().cast::<T>(), self.len) }
    }

    /// Returns an iterator over the elements in insertion order.
    ///
    /// Each call starts a fresh, independent traversal.
    #[inline]
    pub fn iter(&self) -> slice::Iter<'_, T> {
        self.as_slice().iter()
    }

    /// Returns an iterator over mutable references, in insertion order.
    #[inline]
    pub fn iter_mut(&mut self) -> slice::IterMut<'_, T> {
        self.as_mut_slice().iter_mut()
    }

    fn grow(&mut self) {
        let new_cap = match self.capacity() {
            0 => 1,
            cap => cap.checked_mul(2).expect("capacity overflow"),
        };

        let Ok(mut new_buf) = allocate::<T>(new_cap) else {
            panic!("capacity overflow");
        };

        // Safety: the first `len` slots of the old buffer are initialized and
        // are moved bitwise. The old buffer is dropped as `MaybeUninit`, which
        // never runs `T`'s destructor.
        unsafe {
            ptr::copy_nonoverlapping(self.buf.as_ptr(), new_buf.as_mut_ptr(), self.len);
        }
        self.buf = new_buf;
    }
}

impl<T: PartialEq> ArrayList<T> {
    /// Returns the index of the first element equal to `element`.
    ///
    /// # Time Complexity
    ///
    /// *O*(*len*).
    #[inline]
    pub fn find(&self, element: &T) -> Option<usize> {
        self.iter().position(|e| e == element)
    }

    /// Returns `true` if some element equals `element`.
    #[inline]
    pub fn exists(&self, element: &T) -> bool {
        self.find(element).is_some()
    }

    /// Removes and returns the first element equal to `element`.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no element is equal. The list
    /// is unchanged in that case.
    pub fn delete_element(&mut self, element: &T) -> Result<T, CollectionError> {
        let index = self.find(element).ok_or(CollectionError::NotFound)?;
        self.delete(index)
    }
}

/// Allocates `capacity` uninitialized slots, reporting failure instead of
/// aborting.
fn allocate<T>(capacity: usize) -> Result<Box<[MaybeUninit<T>]>, CollectionError> {
    let mut slots: Vec<MaybeUninit<T>> = Vec::new();
    slots
        .try_reserve_exact(capacity)
        .map_err(|_| CollectionError::InvalidCapacity {
            requested: capacity,
        })?;

    // Safety: the reservation covers `capacity` slots, and `MaybeUninit`
    // needs no initialization.
    unsafe { slots.set_len(capacity) };
    Ok(slots.into_boxed_slice())
}

impl<T> Drop for ArrayList<T> {
    fn drop(&mut self) {
        // The boxed buffer frees itself; only the live elements need dropping.
        self.clear();
    }
}

impl<T> Default for ArrayList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: fmt::Debug> fmt::Debug for ArrayList<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T: Clone> Clone for ArrayList<T> {
    fn clone(&self) -> Self {
        let mut list = Self::with_capacity(self.capacity());
        list.extend(self.iter().cloned());
        list
    }
}

impl<T> core::ops::Index<usize> for ArrayList<T> {
    type Output = T;

    #[inline]
    fn index(&self, index: usize) -> &T {
        &self.as_slice()[index]
    }
}

impl<T> core::ops::IndexMut<usize> for ArrayList<T> {
    #[inline]
    fn index_mut(&mut self, index: usize) -> &mut T {
        &mut self.as_mut_slice()[index]
    }
}

impl<T> Extend<T> for ArrayList<T> {
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for element in iter {
            self.add(element);
        }
    }
}

impl<T> FromIterator<T> for ArrayList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<T, U> PartialEq<ArrayList<U>> for ArrayList<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &ArrayList<U>) -> bool {
        self.as_slice() == other.as_slice()
    }
}

impl<T, U, const N: usize> PartialEq<[U; N]> for ArrayList<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &[U; N]) -> bool {
        self.as_slice() == &other[..]
    }
}

impl<T, U> PartialEq<&[U]> for ArrayList<T>
where
    T: PartialEq<U>,
{
    #[inline]
    fn eq(&self, other: &&[U]) -> bool {
        self.as_slice() == *other
    }
}

impl<T: Eq> Eq for ArrayList<T> {}

impl<'a, T> IntoIterator for &'a ArrayList<T> {
    type Item = &'a T;
    type IntoIter = slice::Iter<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T> IntoIterator for &'a mut ArrayList<T> {
    type Item = &'a mut T;
    type IntoIter = slice::IterMut<'a, T>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T> IntoIterator for ArrayList<T> {
    type Item = T;
    type IntoIter = IntoIter<T>;

    fn into_iter(mut self) -> Self::IntoIter {
        let buf = mem::take(&mut self.buf);
        let back = mem::replace(&mut self.len, 0);

        IntoIter {
            buf,
            front: 0,
            back,
        }
    }
}

/// An iterator that moves elements out of an [`ArrayList`].
pub struct IntoIter<T> {
    /// Slots `front..back` are initialized.
    buf: Box<[MaybeUninit<T>]>,
    front: usize,
    back: usize,
}

impl<T> Iterator for IntoIter<T> {
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        // Safety: front < back, so the slot is initialized; advancing front
        // hands ownership to the caller.
        let element = unsafe { self.buf[self.front].assume_init_read() };
        self.front += 1;
        Some(element)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        let len = self.back - self.front;
        (len, Some(len))
    }
}

impl<T> DoubleEndedIterator for IntoIter<T> {
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        if self.front == self.back {
            return None;
        }

        self.back -= 1;
        // Safety: back was > front, so the slot is initialized.
        Some(unsafe { self.buf[self.back].assume_init_read() })
    }
}

impl<T> ExactSizeIterator for IntoIter<T> {}

impl<T> Drop for IntoIter<T> {
    fn drop(&mut self) {
        // Drop whatever was not consumed
        for _ in self.by_ref() {}
    }
}

impl<T: fmt::Debug> fmt::Debug for IntoIter<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Safety: slots front..back are initialized.
        let remaining = unsafe {
            slice::from_raw_parts(
                self.buf.as_ptr().add(self.front).cast::<T>(),
                self.back - self.front,
            )
        };
        f.debug_tuple("IntoIter").field(&remaining).finish()
    }
}

#[allow(dead_code)]
fn assert_properties() {
    fn is_send<T: Send>() {}
    fn is_sync<T: Sync>() {}

    is_send::<ArrayList<i32>>();
    is_sync::<ArrayList<i32>>();
    is_send::<IntoIter<i32>>();
    is_sync::<IntoIter<i32>>();
}


#[cfg(test)]
mod bench_array_list {
    use super::*;
    use hdrhistogram::Histogram;
    use std::time::Instant;

    const WARMUP: usize = 10_000;
    const ITERATIONS: usize = 100_000;

    fn print_histogram(name: &str, hist: &Histogram<u64>) {
        println!(
            "{:24} p50: {:5} ns | p99: {:5} ns | p999: {:6} ns | min: {:4} | max: {:6}",
            name,
            hist.value_at_quantile(0.50),
            hist.value_at_quantile(0.99),
            hist.value_at_quantile(0.999),
            hist.min(),
            hist.max(),
        );
    }

    #[test]
    #[ignore]
    fn bench_add() {
        let mut list: ArrayList<u64> = ArrayList::new();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for i in 0..WARMUP {
            list.add(i as u64);
        }
        list.clear();

        for i in 0..ITERATIONS {
            let start = Instant::now();
            list.add(i as u64);
            hist.record(start.elapsed().as_nanos() as u64).unwrap();
        }

        print_histogram("add", &hist);
    }

    #[test]
    #[ignore]
    fn bench_find_last() {
        let list: ArrayList<u64> = (0..1_000).collect();
        let mut hist = Histogram::<u64>::new(3).unwrap();

        for _ in 0..ITERATIONS {
            let start = Instant::now();
            let found = std::hint::black_box(list.find(&999));
            hist.record(start.elapsed().as_nanos() as u64).unwrap();
            assert_eq!(found, Some(999));
        }

        print_histogram("find (last of 1000)", &hist);
    }

    #[test]
    #[ignore]
    fn bench_delete_front() {
        let mut hist = Histogram::<u64>::new(3).unwrap();
        let mut list: ArrayList<u64> = (0..1_000).collect();

        for i in 0..ITERATIONS {
            let start = Instant::now();
            let _ = std::hint::black_box(list.delete(0));
            hist.record(start.elapsed().as_nanos() as u64).unwrap();
            list.add(i as u64);
        }

        print_histogram("delete(0) of 1000", &hist);
    }
}
