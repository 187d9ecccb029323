//! # primer-queue
//!
//! A FIFO queue contract and three containers that satisfy it.
//!
//! ## Realizations
//!
//! | Type | `enqueue` | `dequeue` | Notes |
//! |------|-----------|-----------|-------|
//! | [`RingBuffer`] | *O*(1) amortized | *O*(1) | Power-of-two slots, grows by doubling |
//! | [`LinkedList`](primer_collections::LinkedList) | *O*(1) | *O*(1) | `add_end` / `pop_front` |
//! | [`ArrayList`](primer_collections::ArrayList) | *O*(1) amortized | *O*(*n*) | `add` / `delete(0)` |
//!
//! ## Example
//!
//! ```
//! use primer_queue::{Empty, Queue, RingBuffer};
//!
//! fn drain<Q: Queue<u32>>(queue: &mut Q) -> Vec<u32> {
//!     let mut out = Vec::new();
//!     while let Ok(value) = queue.dequeue() {
//!         out.push(value);
//!     }
//!     out
//! }
//!
//! let mut ring = RingBuffer::new();
//! ring.enqueue(1);
//! ring.enqueue(2);
//!
//! assert_eq!(drain(&mut ring), vec![1, 2]);
//! assert_eq!(ring.dequeue(), Err(Empty));
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![warn(clippy::nursery)]
#![allow(clippy::module_name_repetitions)]

use std::fmt;

mod impls;
pub mod ring;

pub use ring::{DEFAULT_RING_CAPACITY, RingBuffer};

/// First-in, first-out sequence.
///
/// `dequeue` always yields the earliest-enqueued element still present,
/// and `get_start` returns that same element without removing it. Neither
/// blocks: on an empty queue both return [`Empty`] and leave the queue as
/// it was.
pub trait Queue<T> {
    /// Returns `true` if the queue holds no elements.
    fn is_empty(&self) -> bool;

    /// Adds an element at the back.
    fn enqueue(&mut self, element: T);

    /// Removes and returns the front element.
    ///
    /// # Errors
    ///
    /// Returns [`Empty`] if the queue holds no elements.
    fn dequeue(&mut self) -> Result<T, Empty>;

    /// Returns a reference to the front element without removing it.
    ///
    /// # Errors
    ///
    /// Returns [`Empty`] if the queue holds no elements.
    fn get_start(&self) -> Result<&T, Empty>;

    /// Returns the number of elements in the queue.
    fn len(&self) -> usize;
}

/// Error returned by [`Queue::dequeue`] and [`Queue::get_start`] on an
/// empty queue.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Empty;

impl fmt::Display for Empty {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "queue is empty")
    }
}

impl std::error::Error for Empty {}
