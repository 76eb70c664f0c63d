//! Positional doubly linked track list
//!
//! Backing store for the playlist. Nodes live in an arena of slots and link
//! to their neighbours by slot index, so the list is the only owner of every
//! value and a back link never keeps a node alive. Freed slots are recycled.
//!
//! ```text
//! head ─▶ [A] ⇄ [B] ⇄ [C] ◀─ tail
//! ```
//!
//! Ends are O(1). Positional insert/remove walk from the nearer end.

use cadence_core::Track;
use std::iter::FusedIterator;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct NodeId(usize);

#[derive(Debug, Clone)]
struct Node<T> {
    value: T,
    prev: Option<NodeId>,
    next: Option<NodeId>,
}

/// Ordered sequence with arbitrary-position insertion and removal
///
/// Indices are signed at the API boundary: inserting at a negative index
/// clamps to the front, inserting past the end clamps to the back, and
/// removing at any index outside `0..len` yields `None`.
#[derive(Debug, Clone)]
pub struct OrderedTrackList<T = Track> {
    slots: Vec<Option<Node<T>>>,
    free: Vec<usize>,
    head: Option<NodeId>,
    tail: Option<NodeId>,
    len: usize,
}

impl<T> OrderedTrackList<T> {
    /// Create an empty list
    pub fn new() -> Self {
        Self {
            slots: Vec::new(),
            free: Vec::new(),
            head: None,
            tail: None,
            len: 0,
        }
    }

    /// Number of values in the list
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Insert at position 0
    pub fn add_first(&mut self, value: T) {
        let id = self.alloc(value, None, self.head);
        match self.head {
            Some(head) => self.node_mut(head).prev = Some(id),
            None => self.tail = Some(id),
        }
        self.head = Some(id);
        self.len += 1;
    }

    /// Insert at position `len`
    pub fn add_last(&mut self, value: T) {
        let id = self.alloc(value, self.tail, None);
        match self.tail {
            Some(tail) => self.node_mut(tail).next = Some(id),
            None => self.head = Some(id),
        }
        self.tail = Some(id);
        self.len += 1;
    }

    /// Insert so that the value ends up at `index`
    ///
    /// Never fails: `index <= 0` behaves as [`add_first`](Self::add_first),
    /// `index >= len` as [`add_last`](Self::add_last). Otherwise the value is
    /// spliced in front of the node currently at `index`.
    pub fn insert_at(&mut self, index: i64, value: T) {
        if index <= 0 {
            return self.add_first(value);
        }
        let index = usize::try_from(index).unwrap_or(usize::MAX);
        if index >= self.len {
            return self.add_last(value);
        }

        let at = self.node_at(index);
        // 0 < index < len, so the node at `index` always has a predecessor
        let Some(prev) = self.node(at).prev else {
            return self.add_first(value);
        };

        let id = self.alloc(value, Some(prev), Some(at));
        self.node_mut(prev).next = Some(id);
        self.node_mut(at).prev = Some(id);
        self.len += 1;
    }

    /// Unlink and return the value at `index`
    ///
    /// Returns `None` for a negative index, an index past the end, or an
    /// empty list.
    pub fn remove_at(&mut self, index: i64) -> Option<T> {
        let index = usize::try_from(index).ok().filter(|i| *i < self.len)?;

        let id = self.node_at(index);
        let node = self.slots[id.0].take()?;
        self.free.push(id.0);

        match node.prev {
            Some(prev) => self.node_mut(prev).next = node.next,
            None => self.head = node.next,
        }
        match node.next {
            Some(next) => self.node_mut(next).prev = node.prev,
            None => self.tail = node.prev,
        }

        self.len -= 1;
        Some(node.value)
    }

    /// Value at `index`, if in range
    pub fn get(&self, index: usize) -> Option<&T> {
        if index >= self.len {
            return None;
        }
        Some(&self.node(self.node_at(index)).value)
    }

    pub fn first(&self) -> Option<&T> {
        self.head.map(|id| &self.node(id).value)
    }

    pub fn last(&self) -> Option<&T> {
        self.tail.map(|id| &self.node(id).value)
    }

    /// Borrowing iterator, head to tail
    pub fn iter(&self) -> Iter<'_, T> {
        Iter {
            list: self,
            front: self.head,
            back: self.tail,
            remaining: self.len,
        }
    }

    /// Borrowing iterator, tail to head
    pub fn iter_rev(&self) -> std::iter::Rev<Iter<'_, T>> {
        self.iter().rev()
    }

    /// Snapshot of the values, head to tail
    ///
    /// The returned vector is independent of the list; later mutations do
    /// not show up in it.
    pub fn to_vec(&self) -> Vec<T>
    where
        T: Clone,
    {
        self.iter().cloned().collect()
    }

    /// Check the structural invariants
    ///
    /// - `head` is unset exactly when `tail` is unset exactly when `len == 0`
    /// - every forward link has the matching backward link
    /// - `len` equals the number of nodes reachable from `head`
    pub fn check_links(&self) -> bool {
        if self.head.is_none() != self.tail.is_none() || self.head.is_none() != (self.len == 0) {
            return false;
        }

        let mut count = 0;
        let mut prev: Option<NodeId> = None;
        let mut cursor = self.head;
        while let Some(id) = cursor {
            let Some(node) = self.slots.get(id.0).and_then(Option::as_ref) else {
                return false;
            };
            if node.prev != prev {
                return false;
            }
            count += 1;
            if count > self.len {
                return false;
            }
            prev = Some(id);
            cursor = node.next;
        }

        let live = self.slots.iter().filter(|slot| slot.is_some()).count();
        count == self.len && prev == self.tail && live == self.len
    }

    fn alloc(&mut self, value: T, prev: Option<NodeId>, next: Option<NodeId>) -> NodeId {
        let node = Node { value, prev, next };
        if let Some(slot) = self.free.pop() {
            self.slots[slot] = Some(node);
            NodeId(slot)
        } else {
            self.slots.push(Some(node));
            NodeId(self.slots.len() - 1)
        }
    }

    /// Walk to the node at `index` from whichever end is closer
    ///
    /// Caller guarantees `index < len`.
    fn node_at(&self, index: usize) -> NodeId {
        debug_assert!(index < self.len);
        if index <= self.len / 2 {
            let mut cursor = self.head.expect("non-empty list has a head");
            for _ in 0..index {
                cursor = self.node(cursor).next.expect("index within length");
            }
            cursor
        } else {
            let mut cursor = self.tail.expect("non-empty list has a tail");
            for _ in index + 1..self.len {
                cursor = self.node(cursor).prev.expect("index within length");
            }
            cursor
        }
    }

    fn node(&self, id: NodeId) -> &Node<T> {
        self.slots[id.0].as_ref().expect("linked node is live")
    }

    fn node_mut(&mut self, id: NodeId) -> &mut Node<T> {
        self.slots[id.0].as_mut().expect("linked node is live")
    }
}

impl<T> Default for OrderedTrackList<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T> FromIterator<T> for OrderedTrackList<T> {
    fn from_iter<I: IntoIterator<Item = T>>(iter: I) -> Self {
        let mut list = Self::new();
        for value in iter {
            list.add_last(value);
        }
        list
    }
}

impl<'a, T> IntoIterator for &'a OrderedTrackList<T> {
    type Item = &'a T;
    type IntoIter = Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

/// Iterator over an [`OrderedTrackList`]
#[derive(Debug)]
pub struct Iter<'a, T> {
    list: &'a OrderedTrackList<T>,
    front: Option<NodeId>,
    back: Option<NodeId>,
    remaining: usize,
}

impl<'a, T> Iterator for Iter<'a, T> {
    type Item = &'a T;

    fn next(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.front?);
        self.front = node.next;
        self.remaining -= 1;
        Some(&node.value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<T> DoubleEndedIterator for Iter<'_, T> {
    fn next_back(&mut self) -> Option<Self::Item> {
        if self.remaining == 0 {
            return None;
        }
        let node = self.list.node(self.back?);
        self.back = node.prev;
        self.remaining -= 1;
        Some(&node.value)
    }
}

impl<T> ExactSizeIterator for Iter<'_, T> {}

impl<T> FusedIterator for Iter<'_, T> {}

#[cfg(test)]
mod tests {
    use super::*;

    fn list_of(values: &[i32]) -> OrderedTrackList<i32> {
        values.iter().copied().collect()
    }

    #[test]
    fn extreme_indices_clamp_or_miss() {
        let mut list = list_of(&[1, 2, 3]);
        list.insert_at(i64::MAX, 4);
        list.insert_at(i64::MIN, 0);
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);

        assert_eq!(list.remove_at(i64::MAX), None);
        assert_eq!(list.remove_at(i64::MIN), None);
        assert_eq!(list.len(), 5);
        assert!(list.check_links());
    }

    #[test]
    fn empty_list() {
        let list: OrderedTrackList<i32> = OrderedTrackList::new();
        assert!(list.is_empty());
        assert_eq!(list.to_vec(), Vec::<i32>::new());
        assert!(list.first().is_none());
        assert!(list.check_links());
    }

    #[test]
    fn add_first_into_empty_sets_both_ends() {
        let mut list = OrderedTrackList::new();
        list.add_first(1);
        assert_eq!(list.first(), Some(&1));
        assert_eq!(list.last(), Some(&1));
        assert!(list.check_links());
    }

    #[test]
    fn add_last_into_empty_sets_both_ends() {
        let mut list = OrderedTrackList::new();
        list.add_last(1);
        assert_eq!(list.first(), list.last());
        assert_eq!(list.len(), 1);
        assert!(list.check_links());
    }

    #[test]
    fn ends_insertion_order() {
        let mut list = OrderedTrackList::new();
        list.add_last(2);
        list.add_first(1);
        list.add_last(3);
        assert_eq!(list.to_vec(), vec![1, 2, 3]);
        assert!(list.check_links());
    }

    #[test]
    fn insert_in_middle() {
        let mut list = list_of(&[1, 2, 4, 5]);
        list.insert_at(2, 3);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 5]);

        // Near the tail, walked from the back
        list.insert_at(4, 40);
        assert_eq!(list.to_vec(), vec![1, 2, 3, 4, 40, 5]);
        assert!(list.check_links());
    }

    #[test]
    fn insert_clamps_out_of_range() {
        let mut list = list_of(&[1, 2]);
        list.insert_at(-3, 0);
        list.insert_at(99, 3);
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3]);

        list.insert_at(4, 4);
        assert_eq!(list.to_vec(), vec![0, 1, 2, 3, 4]);
        assert!(list.check_links());
    }

    #[test]
    fn remove_endpoints_and_middle() {
        let mut list = list_of(&[1, 2, 3, 4]);

        assert_eq!(list.remove_at(0), Some(1));
        assert_eq!(list.first(), Some(&2));

        assert_eq!(list.remove_at(2), Some(4));
        assert_eq!(list.last(), Some(&3));

        list.add_last(5);
        assert_eq!(list.remove_at(1), Some(3));
        assert_eq!(list.to_vec(), vec![2, 5]);
        assert!(list.check_links());
    }

    #[test]
    fn remove_only_element_resets_ends() {
        let mut list = list_of(&[7]);
        assert_eq!(list.remove_at(0), Some(7));
        assert!(list.is_empty());
        assert!(list.first().is_none());
        assert!(list.last().is_none());
        assert!(list.check_links());
    }

    #[test]
    fn remove_out_of_range_is_none() {
        let mut list = list_of(&[1, 2]);
        assert_eq!(list.remove_at(-1), None);
        assert_eq!(list.remove_at(2), None);
        assert_eq!(list.len(), 2);

        let mut empty: OrderedTrackList<i32> = OrderedTrackList::new();
        assert_eq!(empty.remove_at(0), None);
    }

    #[test]
    fn freed_slots_are_reused() {
        let mut list = list_of(&[1, 2, 3]);
        list.remove_at(1);
        list.remove_at(0);
        list.add_first(10);
        list.add_last(20);

        assert_eq!(list.slots.len(), 3);
        assert_eq!(list.to_vec(), vec![10, 3, 20]);
        assert!(list.check_links());
    }

    #[test]
    fn snapshot_is_detached() {
        let mut list = list_of(&[1, 2]);
        let snapshot = list.to_vec();
        list.add_last(3);
        list.remove_at(0);
        assert_eq!(snapshot, vec![1, 2]);
    }

    #[test]
    fn get_and_iterators() {
        let list = list_of(&[1, 2, 3, 4, 5]);
        assert_eq!(list.get(0), Some(&1));
        assert_eq!(list.get(3), Some(&4));
        assert_eq!(list.get(5), None);

        let reversed: Vec<_> = list.iter_rev().copied().collect();
        assert_eq!(reversed, vec![5, 4, 3, 2, 1]);

        let mut iter = list.iter();
        assert_eq!(iter.len(), 5);
        assert_eq!(iter.next(), Some(&1));
        assert_eq!(iter.next_back(), Some(&5));
        let middle: Vec<_> = iter.copied().collect();
        assert_eq!(middle, vec![2, 3, 4]);
    }
}
