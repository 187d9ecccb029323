//! Doubly-linked list over an index arena.
//!
//! Nodes live in a [`Storage`] owned by the list and refer to their
//! neighbours by index. An absent neighbour is [`Index::NONE`]. Insertion at
//! either end, and removal of a node whose handle is known, are O(1); any
//! lookup by value is a linear scan from the head.
//!
//! # Example
//!
//! ```
//! use primer_collections::LinkedList;
//!
//! let mut list: LinkedList<u64> = LinkedList::new();
//! list.add_end(1);
//! list.add_end(3);
//! list.add_before(&3, 2).unwrap();
//!
//! assert_eq!(list.get_head(), Ok(&1));
//! assert_eq!(list.get_tail(), Ok(&3));
//! assert!(list.iter().eq(&[1, 2, 3]));
//!
//! assert_eq!(list.delete(&1), Ok(1));
//! assert_eq!(list.get_head(), Ok(&2));
//! ```
//!
//! # Handles
//!
//! Every insertion returns the new node's handle. A handle stays valid
//! until its node is deleted; after that its slot may be reused by a later
//! insertion, so a stale handle can name a different node.
//!
//! ```
//! use primer_collections::LinkedList;
//!
//! let mut list: LinkedList<&str> = LinkedList::new();
//! let a = list.add_end("a");
//! let c = list.add_end("c");
//! list.insert_after(a, "b");
//!
//! assert_eq!(list.delete_node(c), Some("c"));
//! assert_eq!(list.get_tail(), Ok(&"b"));
//! ```

use std::fmt;
use std::marker::PhantomData;

use crate::{Arena, CollectionError, Index, Storage};

/// Default arena type for a [`LinkedList`].
pub type ListArena<T, K = u32> = Arena<ListNode<T, K>, K>;

/// List storage backed by `slab::Slab`.
#[cfg(feature = "slab")]
pub type SlabListStorage<T> = slab::Slab<ListNode<T, usize>>;

/// Maps the `NONE` link to `None`.
#[inline]
fn linked<K: Index>(key: K) -> Option<K> {
    if key.is_none() { None } else { Some(key) }
}

/// A node in the linked list.
///
/// Wraps the element with its neighbour links. Users only ever see `&T` and
/// `&mut T`; the node layout is an implementation detail.
#[derive(Debug, Clone)]
pub struct ListNode<T, K: Index = u32> {
    data: T,
    prev: K,
    next: K,
}

impl<T, K: Index> ListNode<T, K> {
    /// Creates a new unlinked node.
    #[inline]
    fn new(data: T) -> Self {
        Self {
            data,
            prev: K::NONE,
            next: K::NONE,
        }
    }
}

/// A doubly-linked list whose nodes live in an owned arena.
///
/// # Type Parameters
///
/// - `T`: Element type
/// - `S`: Node storage (default [`ListArena<T>`])
/// - `K`: Handle type (default `u32`)
pub struct LinkedList<T, S = ListArena<T>, K: Index = u32>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    storage: S,
    head: K,
    tail: K,
    len: usize,
    _marker: PhantomData<T>,
}

impl<T, S, K: Index> LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K> + Default,
{
    /// Creates an empty list.
    #[inline]
    pub fn new() -> Self {
        Self::with_storage(S::default())
    }
}

impl<T, S, K: Index> Default for LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K> + Default,
{
    fn default() -> Self {
        Self::new()
    }
}

impl<T, S, K: Index> LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    /// Creates an empty list that keeps its nodes in `storage`.
    ///
    /// Useful for pre-sizing the arena:
    ///
    /// ```
    /// use primer_collections::{LinkedList, ListArena};
    ///
    /// let list: LinkedList<u64> = LinkedList::with_storage(ListArena::with_capacity(1024));
    /// assert!(list.is_empty());
    /// ```
    ///
    /// # Panics
    ///
    /// Panics if `storage` already holds nodes.
    pub fn with_storage(storage: S) -> Self {
        assert!(storage.is_empty(), "storage must be empty");
        Self {
            storage,
            head: K::NONE,
            tail: K::NONE,
            len: 0,
            _marker: PhantomData,
        }
    }

    /// Returns the number of elements in the list.
    #[inline]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the list has no nodes.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.head.is_none()
    }

    /// Returns the first element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the list has no nodes.
    #[inline]
    pub fn get_head(&self) -> Result<&T, CollectionError> {
        self.get(self.head).ok_or(CollectionError::Empty)
    }

    /// Returns the last element.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::Empty`] if the list has no nodes.
    #[inline]
    pub fn get_tail(&self) -> Result<&T, CollectionError> {
        self.get(self.tail).ok_or(CollectionError::Empty)
    }

    /// Returns the head node's handle, or `None` if empty.
    #[inline]
    pub fn head_node(&self) -> Option<K> {
        linked(self.head)
    }

    /// Returns the tail node's handle, or `None` if empty.
    #[inline]
    pub fn tail_node(&self) -> Option<K> {
        linked(self.tail)
    }

    // ========================================================================
    // Insertion
    // ========================================================================

    /// Inserts an element before the current head. Returns its handle.
    ///
    /// # Time Complexity
    ///
    /// *O*(1) apart from arena growth.
    #[inline]
    pub fn add_start(&mut self, value: T) -> K {
        let key = self.storage.insert(ListNode::new(value));
        self.link_front(key);
        key
    }

    /// Inserts an element after the current tail. Returns its handle.
    ///
    /// # Time Complexity
    ///
    /// *O*(1) apart from arena growth.
    #[inline]
    pub fn add_end(&mut self, value: T) -> K {
        let key = self.storage.insert(ListNode::new(value));
        self.link_back(key);
        key
    }

    /// Inserts an element directly after the node `after`. Returns its handle.
    ///
    /// # Panics
    ///
    /// Panics if `after` is not a live node of this list.
    #[inline]
    pub fn insert_after(&mut self, after: K, value: T) -> K {
        assert!(self.storage.get(after).is_some(), "invalid 'after' handle");
        let key = self.storage.insert(ListNode::new(value));
        self.link_after(after, key);
        key
    }

    /// Inserts an element directly before the node `before`. Returns its
    /// handle.
    ///
    /// # Panics
    ///
    /// Panics if `before` is not a live node of this list.
    #[inline]
    pub fn insert_before(&mut self, before: K, value: T) -> K {
        assert!(self.storage.get(before).is_some(), "invalid 'before' handle");
        let key = self.storage.insert(ListNode::new(value));
        self.link_before(before, key);
        key
    }

    // ========================================================================
    // Removal
    // ========================================================================

    /// Removes the node `key` and returns its element.
    ///
    /// Returns `None` if `key` is not a live node.
    ///
    /// # Time Complexity
    ///
    /// *O*(1).
    #[inline]
    pub fn delete_node(&mut self, key: K) -> Option<T> {
        self.storage.get(key)?;
        self.unlink(key);
        self.storage.remove(key).map(|node| node.data)
    }

    /// Removes and returns the first element, or `None` if empty.
    #[inline]
    pub fn pop_front(&mut self) -> Option<T> {
        self.delete_node(self.head)
    }

    /// Removes and returns the last element, or `None` if empty.
    #[inline]
    pub fn pop_back(&mut self) -> Option<T> {
        self.delete_node(self.tail)
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.storage.clear();
        self.head = K::NONE;
        self.tail = K::NONE;
        self.len = 0;
    }

    // ========================================================================
    // Access
    // ========================================================================

    /// Returns a reference to the element in node `key`.
    #[inline]
    pub fn get(&self, key: K) -> Option<&T> {
        self.storage.get(key).map(|node| &node.data)
    }

    /// Returns a mutable reference to the element in node `key`.
    #[inline]
    pub fn get_mut(&mut self, key: K) -> Option<&mut T> {
        self.storage.get_mut(key).map(|node| &mut node.data)
    }

    /// Returns the handle of the node after `key`.
    ///
    /// Returns `None` if `key` is the tail or not a live node.
    #[inline]
    pub fn next_node(&self, key: K) -> Option<K> {
        linked(self.storage.get(key)?.next)
    }

    /// Returns the handle of the node before `key`.
    ///
    /// Returns `None` if `key` is the head or not a live node.
    #[inline]
    pub fn prev_node(&self, key: K) -> Option<K> {
        linked(self.storage.get(key)?.prev)
    }

    // ========================================================================
    // Iteration
    // ========================================================================

    /// Returns an iterator over references to elements, head to tail.
    ///
    /// Each call starts a fresh, independent traversal.
    #[inline]
    pub fn iter(&self) -> Iter<'_, T, S, K> {
        Iter {
            storage: &self.storage,
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over mutable references to elements, head to tail.
    #[inline]
    pub fn iter_mut(&mut self) -> IterMut<'_, T, S, K> {
        IterMut {
            storage: &mut self.storage,
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    /// Returns an iterator over node handles, head to tail.
    ///
    /// Collect the handles first when the list is to be modified while
    /// walking it.
    #[inline]
    pub fn handles(&self) -> Handles<'_, T, S, K> {
        Handles {
            storage: &self.storage,
            front: self.head,
            back: self.tail,
            remaining: self.len,
            _marker: PhantomData,
        }
    }

    // ========================================================================
    // Linking
    // ========================================================================

    #[inline]
    fn node(&self, key: K) -> &ListNode<T, K> {
        self.storage.get(key).expect("link to a vacant slot")
    }

    #[inline]
    fn node_mut(&mut self, key: K) -> &mut ListNode<T, K> {
        self.storage.get_mut(key).expect("link to a vacant slot")
    }

    fn link_back(&mut self, key: K) {
        let tail = self.tail;
        let node = self.node_mut(key);
        node.prev = tail;
        node.next = K::NONE;

        if tail.is_some() {
            self.node_mut(tail).next = key;
        } else {
            self.head = key;
        }

        self.tail = key;
        self.len += 1;
    }

    fn link_front(&mut self, key: K) {
        let head = self.head;
        let node = self.node_mut(key);
        node.next = head;
        node.prev = K::NONE;

        if head.is_some() {
            self.node_mut(head).prev = key;
        } else {
            self.tail = key;
        }

        self.head = key;
        self.len += 1;
    }

    fn link_after(&mut self, after: K, key: K) {
        let next = self.node(after).next;
        let node = self.node_mut(key);
        node.prev = after;
        node.next = next;

        self.node_mut(after).next = key;

        if next.is_some() {
            self.node_mut(next).prev = key;
        } else {
            self.tail = key;
        }

        self.len += 1;
    }

    fn link_before(&mut self, before: K, key: K) {
        let prev = self.node(before).prev;
        let node = self.node_mut(key);
        node.next = before;
        node.prev = prev;

        self.node_mut(before).prev = key;

        if prev.is_some() {
            self.node_mut(prev).next = key;
        } else {
            self.head = key;
        }

        self.len += 1;
    }

    /// Bypasses `key`, repairing head and tail when it was a boundary.
    fn unlink(&mut self, key: K) {
        let node = self.node(key);
        let prev = node.prev;
        let next = node.next;

        if prev.is_some() {
            self.node_mut(prev).next = next;
        } else {
            self.head = next;
        }

        if next.is_some() {
            self.node_mut(next).prev = prev;
        } else {
            self.tail = prev;
        }

        let node = self.node_mut(key);
        node.prev = K::NONE;
        node.next = K::NONE;

        self.len -= 1;
    }
}

impl<T: PartialEq, S, K: Index> LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    /// Returns the handle of the first node whose element equals `value`.
    ///
    /// # Time Complexity
    ///
    /// *O*(*len*).
    pub fn find(&self, value: &T) -> Option<K> {
        self.handles()
            .find(|&key| self.get(key).is_some_and(|data| data == value))
    }

    /// Returns `true` if some element equals `value`.
    #[inline]
    pub fn exists(&self, value: &T) -> bool {
        self.find(value).is_some()
    }

    /// Inserts `value` directly before the first node equal to `anchor`.
    ///
    /// Returns the new node's handle.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no element equals `anchor`.
    /// The list is unchanged and `value` is dropped in that case.
    pub fn add_before(&mut self, anchor: &T, value: T) -> Result<K, CollectionError> {
        let before = self.find(anchor).ok_or(CollectionError::NotFound)?;
        Ok(self.insert_before(before, value))
    }

    /// Inserts `value` directly after the first node equal to `anchor`.
    ///
    /// Returns the new node's handle.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no element equals `anchor`.
    /// The list is unchanged and `value` is dropped in that case.
    pub fn add_after(&mut self, anchor: &T, value: T) -> Result<K, CollectionError> {
        let after = self.find(anchor).ok_or(CollectionError::NotFound)?;
        Ok(self.insert_after(after, value))
    }

    /// Removes and returns the first element equal to `value`.
    ///
    /// Head and tail move to the neighbouring node when a boundary is
    /// removed, and removing the only node leaves the list empty.
    ///
    /// # Errors
    ///
    /// Returns [`CollectionError::NotFound`] if no element equals `value`.
    pub fn delete(&mut self, value: &T) -> Result<T, CollectionError> {
        let key = self.find(value).ok_or(CollectionError::NotFound)?;
        self.delete_node(key).ok_or(CollectionError::NotFound)
    }
}

impl<T: fmt::Debug, S, K: Index> fmt::Debug for LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter()).finish()
    }
}

impl<T, S, K: Index> Clone for LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K> + Clone,
{
    /// Clones the arena wholesale, so handles carry over to the copy.
    fn clone(&self) -> Self {
        Self {
            storage: self.storage.clone(),
            head: self.head,
            tail: self.tail,
            len: self.len,
            _marker: PhantomData,
        }
    }
}

impl<T: PartialEq, S, K: Index> PartialEq for LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    fn eq(&self, other: &Self) -> bool {
        self.len == other.len && self.iter().eq(other.iter())
    }
}

impl<T: Eq, S, K: Index> Eq for LinkedList<T, S, K> where S: Storage<ListNode<T, K>, Index = K> {}

impl<T, S, K: Index> Extend<T> for LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    fn extend<I: IntoIterator<Item = T>>(&mut self, iter: I) {
        for value in iter {
            self.add_end(value);
        }
    }
}

impl<T, S, K: Index> FromIterator<T> for LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K> + Default,
{
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        list.extend(iter);
        list
    }
}

impl<'a, T, S, K: Index> IntoIterator for &'a LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    type Item = &'a T;
    type IntoIter = Iter<'a, T, S, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl<'a, T, S, K: Index> IntoIterator for &'a mut LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    type Item = &'a mut T;
    type IntoIter = IterMut<'a, T, S, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        self.iter_mut()
    }
}

impl<T, S, K: Index> IntoIterator for LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    type Item = T;
    type IntoIter = IntoIter<T, S, K>;

    #[inline]
    fn into_iter(self) -> Self::IntoIter {
        IntoIter { list: self }
    }
}

// =============================================================================
// Iterators
// =============================================================================

/// Iterator over references to list elements.
pub struct Iter<'a, T, S, K: Index> {
    storage: &'a S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: 'a, S, K: Index + 'a> Iterator for Iter<'a, T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    type Item = &'a T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.storage.get(self.front)?;
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.data)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Index + 'a> DoubleEndedIterator for Iter<'a, T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.storage.get(self.back)?;
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.data)
    }
}

impl<'a, T: 'a, S, K: Index + 'a> ExactSizeIterator for Iter<'a, T, S, K> where
    S: Storage<ListNode<T, K>, Index = K>
{
}

impl<T, S, K: Index> Clone for Iter<'_, T, S, K> {
    fn clone(&self) -> Self {
        Self {
            storage: self.storage,
            front: self.front,
            back: self.back,
            remaining: self.remaining,
            _marker: PhantomData,
        }
    }
}

/// Iterator over mutable references to list elements.
pub struct IterMut<'a, T, S, K: Index> {
    storage: &'a mut S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<'a, T: 'a, S, K: Index + 'a> Iterator for IterMut<'a, T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    type Item = &'a mut T;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.storage.get_mut(self.front)?;
        self.front = node.next;
        self.remaining -= 1;

        // Extend lifetime - safe because each node is yielded at most once
        Some(unsafe { &mut *((&mut node.data) as *mut T) })
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<'a, T: 'a, S, K: Index + 'a> DoubleEndedIterator for IterMut<'a, T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let node = self.storage.get_mut(self.back)?;
        self.back = node.prev;
        self.remaining -= 1;

        // Extend lifetime - safe because each node is yielded at most once
        Some(unsafe { &mut *((&mut node.data) as *mut T) })
    }
}

impl<'a, T: 'a, S, K: Index + 'a> ExactSizeIterator for IterMut<'a, T, S, K> where
    S: Storage<ListNode<T, K>, Index = K>
{
}

/// Iterator over node handles in list order.
pub struct Handles<'a, T, S, K: Index> {
    storage: &'a S,
    front: K,
    back: K,
    remaining: usize,
    _marker: PhantomData<T>,
}

impl<T, S, K: Index> Iterator for Handles<'_, T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    type Item = K;

    #[inline]
    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let key = self.front;
        self.front = self.storage.get(key)?.next;
        self.remaining -= 1;
        Some(key)
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T, S, K: Index> DoubleEndedIterator for Handles<'_, T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }

        let key = self.back;
        self.back = self.storage.get(key)?.prev;
        self.remaining -= 1;
        Some(key)
    }
}

/// An iterator that moves elements out of a [`LinkedList`].
pub struct IntoIter<T, S, K: Index>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    list: LinkedList<T, S, K>,
}

impl<T, S, K: Index> Iterator for IntoIter<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    type Item = T;

    #[inline]
    fn next(&mut self) -> Option<T> {
        self.list.pop_front()
    }

    #[inline]
    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.list.len, Some(self.list.len))
    }
}

impl<T, S, K: Index> DoubleEndedIterator for IntoIter<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    #[inline]
    fn next_back(&mut self) -> Option<T> {
        self.list.pop_back()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    type List = LinkedList<u64>;

    /// Walks the links in both directions and checks every invariant.
    fn assert_linked(list: &List) {
        let forward: Vec<u32> = list.handles().collect();
        let mut backward: Vec<u32> = list.handles().rev().collect();
        backward.reverse();
        assert_eq!(forward, backward);
        assert_eq!(forward.len(), list.len());

        if list.is_empty() {
            assert!(list.head.is_none());
            assert!(list.tail.is_none());
            return;
        }

        assert!(list.node(list.head).prev.is_none());
        assert!(list.node(list.tail).next.is_none());
        for pair in forward.windows(2) {
            assert_eq!(list.node(pair[0]).next, pair[1]);
            assert_eq!(list.node(pair[1]).prev, pair[0]);
        }
    }

    fn values(list: &List) -> Vec<u64> {
        list.iter().copied().collect()
    }

    #[test]
    fn new_list_is_empty() {
        let list = List::new();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert!(list.head_node().is_none());
        assert!(list.tail_node().is_none());
        assert_linked(&list);
    }

    #[test]
    fn is_empty_false_after_add() {
        let mut list = List::new();
        list.add_end(1);
        assert!(!list.is_empty());
    }

    #[test]
    fn get_head_and_tail_on_empty() {
        let list = List::new();
        assert_eq!(list.get_head(), Err(CollectionError::Empty));
        assert_eq!(list.get_tail(), Err(CollectionError::Empty));
    }

    #[test]
    fn add_end_single() {
        let mut list = List::new();
        let a = list.add_end(1);

        assert_eq!(list.len(), 1);
        assert_eq!(list.head_node(), Some(a));
        assert_eq!(list.tail_node(), Some(a));
        assert_eq!(list.get_head(), Ok(&1));
        assert_eq!(list.get_tail(), Ok(&1));
        assert_linked(&list);
    }

    #[test]
    fn add_end_multiple() {
        let mut list = List::new();
        let a = list.add_end(1);
        list.add_end(2);
        let c = list.add_end(3);

        assert_eq!(list.head_node(), Some(a));
        assert_eq!(list.tail_node(), Some(c));
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_linked(&list);
    }

    #[test]
    fn add_start_multiple() {
        let mut list = List::new();
        let a = list.add_start(1);
        list.add_start(2);
        let c = list.add_start(3);

        assert_eq!(list.head_node(), Some(c));
        assert_eq!(list.tail_node(), Some(a));
        assert_eq!(values(&list), vec![3, 2, 1]);
        assert_linked(&list);
    }

    #[test]
    fn add_start_first_node_is_tail() {
        let mut list = List::new();
        list.add_start(7);
        assert_eq!(list.get_tail(), Ok(&7));
        list.add_end(8);
        assert_eq!(values(&list), vec![7, 8]);
        assert_linked(&list);
    }

    #[test]
    fn add_before_middle() {
        let mut list: List = [1, 3].into_iter().collect();
        list.add_before(&3, 2).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_linked(&list);
    }

    #[test]
    fn add_before_head_moves_head() {
        let mut list: List = [2, 3].into_iter().collect();
        let new = list.add_before(&2, 1).unwrap();
        assert_eq!(list.head_node(), Some(new));
        assert_eq!(list.get_head(), Ok(&1));
        assert_linked(&list);
    }

    #[test]
    fn add_after_tail_moves_tail() {
        let mut list: List = [1, 2].into_iter().collect();
        let new = list.add_after(&2, 3).unwrap();
        assert_eq!(list.tail_node(), Some(new));
        assert_eq!(list.get_tail(), Ok(&3));
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_linked(&list);
    }

    #[test]
    fn add_after_middle() {
        let mut list: List = [1, 3].into_iter().collect();
        list.add_after(&1, 2).unwrap();
        assert_eq!(values(&list), vec![1, 2, 3]);
        assert_linked(&list);
    }

    #[test]
    fn add_before_missing_anchor() {
        let mut list: List = [1, 2].into_iter().collect();
        assert_eq!(list.add_before(&9, 0), Err(CollectionError::NotFound));
        assert_eq!(list.add_after(&9, 0), Err(CollectionError::NotFound));
        assert_eq!(values(&list), vec![1, 2]);
        assert_linked(&list);
    }

    #[test]
    fn anchor_is_first_match() {
        let mut list: List = [5, 1, 5].into_iter().collect();
        list.add_after(&5, 9).unwrap();
        assert_eq!(values(&list), vec![5, 9, 1, 5]);
    }

    #[test]
    fn delete_middle() {
        let mut list: List = [1, 2, 3].into_iter().collect();
        assert_eq!(list.delete(&2), Ok(2));
        assert_eq!(values(&list), vec![1, 3]);
        assert_eq!(list.len(), 2);
        assert_linked(&list);
    }

    #[test]
    fn delete_head_repairs_head() {
        let mut list: List = [1, 2, 3].into_iter().collect();
        assert_eq!(list.delete(&1), Ok(1));
        assert_eq!(list.get_head(), Ok(&2));
        assert_linked(&list);
    }

    #[test]
    fn delete_tail_repairs_tail() {
        let mut list: List = [1, 2, 3].into_iter().collect();
        assert_eq!(list.delete(&3), Ok(3));
        assert_eq!(list.get_tail(), Ok(&2));
        assert_linked(&list);
    }

    #[test]
    fn delete_only_node_empties_list() {
        let mut list = List::new();
        list.add_end(42);

        assert_eq!(list.delete(&42), Ok(42));
        assert!(list.is_empty());
        assert_eq!(list.get_head(), Err(CollectionError::Empty));
        assert_eq!(list.get_tail(), Err(CollectionError::Empty));
        assert_linked(&list);

        list.add_end(7);
        assert_eq!(list.get_head(), Ok(&7));
        assert_eq!(list.get_tail(), Ok(&7));
    }

    #[test]
    fn delete_missing() {
        let mut list: List = [1, 2].into_iter().collect();
        assert_eq!(list.delete(&3), Err(CollectionError::NotFound));
        assert_eq!(List::new().delete(&3), Err(CollectionError::NotFound));
        assert_eq!(values(&list), vec![1, 2]);
    }

    #[test]
    fn find_and_exists() {
        let mut list = List::new();
        list.add_end(1);
        let b = list.add_end(2);
        list.add_end(2);

        assert_eq!(list.find(&2), Some(b));
        assert_eq!(list.find(&2), Some(b));
        assert_eq!(list.find(&9), None);
        assert!(list.exists(&1));
        assert!(!list.exists(&9));
    }

    #[test]
    fn delete_node_by_handle() {
        let mut list = List::new();
        let a = list.add_end(1);
        let b = list.add_end(2);
        let c = list.add_end(3);

        assert_eq!(list.delete_node(b), Some(2));
        assert_eq!(list.next_node(a), Some(c));
        assert_eq!(list.prev_node(c), Some(a));
        assert_eq!(list.delete_node(b), None);
        assert_linked(&list);
    }

    #[test]
    fn delete_node_stale_sentinel() {
        let mut list = List::new();
        assert_eq!(list.delete_node(u32::NONE), None);
        assert_eq!(list.delete_node(0), None);
    }

    #[test]
    fn insert_before_and_after_handle() {
        let mut list = List::new();
        let a = list.add_end(1);
        list.add_end(3);

        list.insert_after(a, 2);
        list.insert_before(a, 0);

        assert_eq!(values(&list), vec![0, 1, 2, 3]);
        assert_linked(&list);
    }

    #[test]
    #[should_panic(expected = "invalid 'after' handle")]
    fn insert_after_invalid_handle_panics() {
        let mut list = List::new();
        list.insert_after(3, 1);
    }

    #[test]
    fn pop_front_and_back() {
        let mut list: List = (1..=4).collect();
        assert_eq!(list.pop_front(), Some(1));
        assert_eq!(list.pop_back(), Some(4));
        assert_eq!(list.pop_front(), Some(2));
        assert_eq!(list.pop_back(), Some(3));
        assert_eq!(list.pop_front(), None);
        assert_eq!(list.pop_back(), None);
        assert_linked(&list);
    }

    #[test]
    fn navigation() {
        let mut list = List::new();
        let a = list.add_end(1);
        let b = list.add_end(2);

        assert_eq!(list.next_node(a), Some(b));
        assert_eq!(list.next_node(b), None);
        assert_eq!(list.prev_node(b), Some(a));
        assert_eq!(list.prev_node(a), None);
    }

    #[test]
    fn get_mut_by_handle() {
        let mut list = List::new();
        let a = list.add_end(1);
        *list.get_mut(a).unwrap() = 10;
        assert_eq!(list.get(a), Some(&10));
    }

    #[test]
    fn clear() {
        let mut list: List = (1..=3).collect();
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.len(), 0);
        assert_eq!(list.iter().count(), 0);
        assert_linked(&list);
    }

    #[test]
    fn iter_is_restartable() {
        let list: List = (1..=3).collect();
        let mut first = list.iter();
        let second = list.iter();

        assert_eq!(first.next(), Some(&1));
        assert_eq!(second.copied().collect::<Vec<_>>(), vec![1, 2, 3]);
        assert_eq!(first.copied().collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn iter_double_ended() {
        let list: List = (1..=5).collect();
        let mut iter = list.iter();

        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        assert_eq!(iter.next(), Some(&2));
        assert_eq!(iter.next_back(), Some(&4));
        assert_eq!(iter.next(), Some(&3));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next_back(), None);
    }

    #[test]
    fn iter_mut() {
        let mut list: List = (1..=3).collect();
        for value in list.iter_mut() {
            *value *= 10;
        }
        assert_eq!(values(&list), vec![10, 20, 30]);

        let mut iter = list.iter_mut();
        *iter.next_back().unwrap() = 0;
        assert_eq!(values(&list), vec![10, 20, 0]);
    }

    #[test]
    fn iter_mut_yields_coexisting_references() {
        let mut list: List = (1..=3).collect();

        let mut iter = list.iter_mut();
        let a = iter.next().unwrap();
        let b = iter.next().unwrap();
        let c = iter.next_back().unwrap();
        *a += 10;
        *b += 20;
        *c += 30;
        assert!(iter.next().is_none());

        let all: Vec<&mut u64> = list.iter_mut().collect();
        for value in all {
            *value += 1;
        }

        assert_eq!(values(&list), vec![12, 23, 34]);
    }

    #[test]
    fn into_iter_owned() {
        let list: List = (1..=4).collect();
        let mut iter = list.into_iter();
        assert_eq!(iter.next(), Some(1));
        assert_eq!(iter.next_back(), Some(4));
        assert_eq!(iter.collect::<Vec<_>>(), vec![2, 3]);
    }

    #[test]
    fn storage_reuse_after_delete() {
        let mut list = List::new();
        let a = list.add_end(1);
        list.add_end(2);

        list.delete_node(a);
        let c = list.add_end(3);

        assert_eq!(c, a);
        assert_eq!(values(&list), vec![2, 3]);
        assert_linked(&list);
    }

    #[test]
    fn clone_keeps_handles() {
        let mut list = List::new();
        list.add_end(1);
        let b = list.add_end(2);

        let copy = list.clone();
        list.delete_node(b);

        assert_eq!(copy.get(b), Some(&2));
        assert_eq!(values(&copy), vec![1, 2]);
        assert_ne!(copy, list);
    }

    #[test]
    fn debug_fmt() {
        let list: List = (1..=3).collect();
        assert_eq!(format!("{list:?}"), "[1, 2, 3]");
    }

    #[test]
    #[should_panic(expected = "storage must be empty")]
    fn with_storage_rejects_used_arena() {
        let mut arena: ListArena<u64> = ListArena::new();
        arena.insert(ListNode::new(1));
        let _ = List::with_storage(arena);
    }

    #[test]
    fn u8_handles() {
        let mut list: LinkedList<u64, ListArena<u64, u8>, u8> = LinkedList::new();
        list.add_end(1);
        list.add_start(0);
        assert!(list.iter().eq(&[0, 1]));
    }

    #[test]
    fn mixed_operations_keep_links_consistent() {
        let mut list = List::new();
        for i in 0..20 {
            if i % 3 == 0 {
                list.add_start(i);
            } else {
                list.add_end(i);
            }
        }
        for i in (0..20).step_by(4) {
            list.delete(&i).unwrap();
            assert_linked(&list);
        }
        list.add_after(&1, 100).unwrap();
        list.add_before(&18, 200).unwrap();
        assert_linked(&list);
        assert_eq!(list.len(), 17);
    }
}
