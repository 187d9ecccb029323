//! Two general-purpose sequence containers.
//!
//! - [`ArrayList`] - contiguous, growable array. Capacity starts at
//!   [`DEFAULT_INITIAL_CAPACITY`] and doubles whenever an insertion finds
//!   the buffer full.
//! - [`LinkedList`] - doubly-linked list whose nodes live in an owned arena
//!   and point at each other by index. Insertions return a stable node
//!   handle for O(1) access and removal later.
//!
//! Both report failures through [`CollectionError`] and leave the container
//! unchanged when they do.
//!
//! # Quick Start
//!
//! ```
//! use primer_collections::{ArrayList, CollectionError, LinkedList};
//!
//! let mut list: ArrayList<u64> = ArrayList::new();
//! list.add(1);
//! list.add(2);
//! assert_eq!(list.find(&2), Some(1));
//! assert_eq!(list.delete(0), Ok(1));
//! assert_eq!(
//!     list.get(5),
//!     Err(CollectionError::OutOfBounds { index: 5, len: 1 })
//! );
//!
//! let mut linked: LinkedList<&str> = LinkedList::new();
//! let b = linked.add_end("b");
//! linked.add_start("a");
//! linked.add_after(&"b", "c").unwrap();
//! assert!(linked.iter().eq(&["a", "b", "c"]));
//! assert_eq!(linked.delete_node(b), Some("b"));
//! ```
//!
//! # Storage
//!
//! [`LinkedList`] is generic over its node [`Storage`]:
//!
//! | Storage | Index | Notes |
//! |---------|-------|-------|
//! | [`ListArena<T>`] | `u32` | Default. `Vec` backed, LIFO slot reuse |
//! | `ListArena<T, K>` | any [`Index`] | Smaller handles, lower node cap |
//! | `SlabListStorage<T>` | `usize` | `slab::Slab`, feature `slab` |
//!
//! # Feature Flags
//!
//! - `slab` - Enable [`Storage`] impl for `slab::Slab`

#![warn(missing_docs)]

pub mod array_list;
pub mod error;
pub mod index;
pub mod list;
pub mod storage;

pub use array_list::{ArrayList, DEFAULT_INITIAL_CAPACITY};
pub use error::CollectionError;
pub use index::Index;
pub use list::{LinkedList, ListArena, ListNode};
pub use storage::{Arena, Storage};

#[cfg(feature = "slab")]
pub use list::SlabListStorage;
