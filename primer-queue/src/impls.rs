//! [`Queue`] for the `primer-collections` containers.

use primer_collections::{ArrayList, Index, LinkedList, ListNode, Storage};

use crate::{Empty, Queue};

/// Front is the head, back is the tail. Both ends are *O*(1).
impl<T, S, K: Index> Queue<T> for LinkedList<T, S, K>
where
    S: Storage<ListNode<T, K>, Index = K>,
{
    #[inline]
    fn is_empty(&self) -> bool {
        LinkedList::is_empty(self)
    }

    #[inline]
    fn enqueue(&mut self, element: T) {
        self.add_end(element);
    }

    #[inline]
    fn dequeue(&mut self) -> Result<T, Empty> {
        self.pop_front().ok_or(Empty)
    }

    #[inline]
    fn get_start(&self) -> Result<&T, Empty> {
        self.get_head().map_err(|_| Empty)
    }

    #[inline]
    fn len(&self) -> usize {
        LinkedList::len(self)
    }
}

/// Front is index 0. Dequeue shifts every remaining element, so it is
/// *O*(*n*).
impl<T> Queue<T> for ArrayList<T> {
    #[inline]
    fn is_empty(&self) -> bool {
        ArrayList::is_empty(self)
    }

    #[inline]
    fn enqueue(&mut self, element: T) {
        self.add(element);
    }

    #[inline]
    fn dequeue(&mut self) -> Result<T, Empty> {
        self.delete(0).map_err(|_| Empty)
    }

    #[inline]
    fn get_start(&self) -> Result<&T, Empty> {
        self.get(0).map_err(|_| Empty)
    }

    #[inline]
    fn len(&self) -> usize {
        ArrayList::len(self)
    }
}
