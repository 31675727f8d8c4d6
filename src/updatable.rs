//! Updatable indexed priority queue
//!
//! A binary min-heap over `(element, priority)` pairs that also tracks where
//! every element sits in the heap array. Because of that index, an element
//! can only be present once: enqueueing it again updates its priority in
//! place (sifting up or down as needed) instead of adding a duplicate.
//!
//! Two insertion flavours are provided:
//!
//! - [`enqueue`](UpdatablePriorityQueue::enqueue) always overwrites the stored
//!   priority, whether the new one is better or worse.
//! - [`enqueue_minimum`](UpdatablePriorityQueue::enqueue_minimum) only lowers
//!   it (classic decrease-key) and leaves the entry untouched otherwise.
//!
//! Element identity comes from an [`EqualityComparer`] and ordering from a
//! [`PriorityComparer`], so neither `Hash + Eq` nor `Ord` is required of the
//! stored types themselves.
//!
//! Entries whose priorities compare equal are dequeued in an unspecified
//! order. No stability is guaranteed.
//!
//! # Time Complexity
//!
//! | Operation          | Complexity |
//! |--------------------|------------|
//! | `enqueue`          | O(log n)   |
//! | `enqueue_minimum`  | O(log n)   |
//! | `try_dequeue`      | O(log n)   |
//! | `remove`           | O(log n)   |
//! | `try_peek`         | O(1)       |
//! | `contains`         | O(1)       |
//! | `len`              | O(1)       |
//! | `clear`            | O(n)       |
//!
//! # Example
//!
//! ```rust
//! use rust_frontier_search::updatable::UpdatablePriorityQueue;
//!
//! let mut queue = UpdatablePriorityQueue::new();
//! queue.enqueue("a", 5);
//! queue.enqueue("b", 3);
//!
//! // Lowering works, raising is ignored by enqueue_minimum
//! assert!(queue.enqueue_minimum("a", 1));
//! assert!(!queue.enqueue_minimum("b", 10));
//!
//! assert_eq!(queue.len(), 2);
//! assert_eq!(queue.try_dequeue(), Some(("a", 1)));
//! assert_eq!(queue.try_dequeue(), Some(("b", 3)));
//! assert_eq!(queue.try_dequeue(), None);
//! ```
//!
//! The unordered view borrows the queue, so it cannot observe a mutation:
//!
//! ```compile_fail
//! use rust_frontier_search::updatable::UpdatablePriorityQueue;
//!
//! let mut queue = UpdatablePriorityQueue::new();
//! queue.enqueue("a", 1);
//! for (element, _) in queue.unordered_items() {
//!     queue.enqueue(*element, 2);
//! }
//! ```

use crate::errors::QueueError;
use crate::storage::SlotIndex;
use crate::traits::{DefaultEquality, EqualityComparer, NaturalOrder, PriorityComparer};
use std::cmp::Ordering;
use std::fmt;
use std::iter::FusedIterator;
use std::slice;

/// One heap slot. The hash is cached so swaps never rehash the element.
#[derive(Clone)]
struct Entry<E, P> {
    element: E,
    priority: P,
    hash: u64,
}

/// A binary min-heap of unique elements whose priorities can be updated.
///
/// See the [module documentation](self) for an overview.
#[derive(Clone)]
pub struct UpdatablePriorityQueue<E, P, EC = DefaultEquality, PC = NaturalOrder> {
    /// Heap-ordered entries, children of `i` at `2i + 1` and `2i + 2`
    heap: Vec<Entry<E, P>>,
    /// element hash -> heap slots, kept in lockstep with `heap`
    index: SlotIndex,
    equality: EC,
    comparer: PC,
}

impl<E, P> UpdatablePriorityQueue<E, P> {
    /// Creates an empty queue using `Hash + Eq` for elements and `Ord` for priorities
    pub fn new() -> Self {
        Self::with_comparers(DefaultEquality, NaturalOrder)
    }

    /// Creates an empty queue with room for `capacity` entries
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_comparers(capacity, DefaultEquality, NaturalOrder)
    }
}

impl<E, P, EC, PC> UpdatablePriorityQueue<E, P, EC, PC> {
    /// Creates an empty queue with custom comparers
    pub fn with_comparers(equality: EC, comparer: PC) -> Self {
        UpdatablePriorityQueue {
            heap: Vec::new(),
            index: SlotIndex::new(),
            equality,
            comparer,
        }
    }

    /// Creates an empty queue with custom comparers and room for `capacity` entries
    pub fn with_capacity_and_comparers(capacity: usize, equality: EC, comparer: PC) -> Self {
        UpdatablePriorityQueue {
            heap: Vec::with_capacity(capacity),
            index: SlotIndex::with_capacity(capacity),
            equality,
            comparer,
        }
    }

    /// Returns the number of tracked elements
    pub fn len(&self) -> usize {
        self.heap.len()
    }

    /// Returns true if the queue holds no elements
    pub fn is_empty(&self) -> bool {
        self.heap.is_empty()
    }

    /// Returns the number of entries the queue can hold without reallocating
    pub fn capacity(&self) -> usize {
        self.heap.capacity()
    }

    /// Returns the priority comparer
    pub fn comparer(&self) -> &PC {
        &self.comparer
    }

    /// Returns the element equality comparer
    pub fn equality_comparer(&self) -> &EC {
        &self.equality
    }

    /// Returns the minimum entry without removing it
    pub fn try_peek(&self) -> Option<(&E, &P)> {
        self.heap.first().map(|e| (&e.element, &e.priority))
    }

    /// Returns the minimum entry without removing it
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] if the queue has no entries.
    pub fn peek(&self) -> Result<(&E, &P), QueueError> {
        self.try_peek().ok_or(QueueError::Empty)
    }

    /// Iterates over all entries in heap order, which is not sorted order.
    pub fn unordered_items(&self) -> UnorderedItems<'_, E, P> {
        UnorderedItems {
            inner: self.heap.iter(),
        }
    }

    /// Removes every entry
    pub fn clear(&mut self) {
        self.heap.clear();
        self.index.clear();
    }

    /// Makes sure at least `capacity` entries fit without reallocating.
    ///
    /// Returns the resulting capacity.
    pub fn ensure_capacity(&mut self, capacity: usize) -> usize {
        if self.heap.capacity() < capacity {
            let additional = capacity - self.heap.len();
            self.heap.reserve(additional);
            self.index.reserve(additional);
        }
        self.heap.capacity()
    }

    /// Releases unused backing storage
    pub fn trim_excess(&mut self) {
        self.heap.shrink_to_fit();
        self.index.shrink_to_fit();
    }
}

impl<E, P, EC, PC> UpdatablePriorityQueue<E, P, EC, PC>
where
    EC: EqualityComparer<E>,
    PC: PriorityComparer<P>,
{
    /// Builds a queue from `(element, priority)` pairs with custom comparers.
    ///
    /// Later pairs for an element already seen overwrite its priority,
    /// exactly as repeated [`enqueue`](Self::enqueue) calls would.
    pub fn from_items_with_comparers<I>(items: I, equality: EC, comparer: PC) -> Self
    where
        I: IntoIterator<Item = (E, P)>,
    {
        let items = items.into_iter();
        let mut queue = Self::with_capacity_and_comparers(items.size_hint().0, equality, comparer);
        queue.enqueue_range(items);
        queue
    }

    /// Inserts `element`, or sets the priority of an existing equal element.
    ///
    /// The new priority replaces the stored one unconditionally, whether it is
    /// better or worse, and the stored element is replaced by `element`.
    pub fn enqueue(&mut self, element: E, priority: P) {
        let hash = self.equality.hash(&element);
        match self.find_slot(hash, &element) {
            Some(slot) => self.replace_at(slot, element, priority),
            None => self.push_new(element, priority, hash),
        }
    }

    /// Inserts `element`, or lowers the priority of an existing equal element.
    ///
    /// An existing entry is only updated when `priority` is strictly better
    /// than its current priority; otherwise the queue is left unchanged.
    /// Returns true if the queue was modified.
    pub fn enqueue_minimum(&mut self, element: E, priority: P) -> bool {
        let hash = self.equality.hash(&element);
        match self.find_slot(hash, &element) {
            Some(slot) => {
                if !self.comparer.less(&priority, &self.heap[slot].priority) {
                    return false;
                }
                let entry = &mut self.heap[slot];
                entry.element = element;
                entry.priority = priority;
                self.sift_up(slot);
                true
            }
            None => {
                self.push_new(element, priority, hash);
                true
            }
        }
    }

    /// Calls [`enqueue`](Self::enqueue) for every pair
    pub fn enqueue_range<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (E, P)>,
    {
        for (element, priority) in items {
            self.enqueue(element, priority);
        }
    }

    /// Calls [`enqueue_minimum`](Self::enqueue_minimum) for every pair
    pub fn enqueue_range_minimum<I>(&mut self, items: I)
    where
        I: IntoIterator<Item = (E, P)>,
    {
        for (element, priority) in items {
            self.enqueue_minimum(element, priority);
        }
    }

    /// Removes and returns the minimum entry, or `None` if the queue is empty
    pub fn try_dequeue(&mut self) -> Option<(E, P)> {
        if self.heap.is_empty() {
            return None;
        }
        Some(self.remove_at(0))
    }

    /// Removes and returns the minimum entry
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] if the queue has no entries.
    pub fn dequeue(&mut self) -> Result<(E, P), QueueError> {
        self.try_dequeue().ok_or(QueueError::Empty)
    }

    /// Enqueues `element` and immediately dequeues the minimum.
    ///
    /// When `element` is not tracked and `priority` is not worse than the
    /// current minimum, the pair is handed straight back without touching
    /// the heap.
    pub fn enqueue_dequeue(&mut self, element: E, priority: P) -> (E, P) {
        let hash = self.equality.hash(&element);
        if let Some(slot) = self.find_slot(hash, &element) {
            self.replace_at(slot, element, priority);
            return self.remove_at(0);
        }

        match self.heap.first() {
            Some(root) if self.comparer.less(&root.priority, &priority) => {}
            _ => return (element, priority),
        }

        let root_hash = self.heap[0].hash;
        let old = std::mem::replace(
            &mut self.heap[0],
            Entry {
                element,
                priority,
                hash,
            },
        );
        self.index.remove(root_hash, 0);
        self.index.insert(hash, 0);
        self.sift_down(0);
        (old.element, old.priority)
    }

    /// Dequeues the minimum and then enqueues `element`.
    ///
    /// # Errors
    /// Returns [`QueueError::Empty`] if the queue has no entries; nothing is
    /// enqueued in that case.
    pub fn dequeue_enqueue(&mut self, element: E, priority: P) -> Result<(E, P), QueueError> {
        let min = self.try_dequeue().ok_or(QueueError::Empty)?;
        self.enqueue(element, priority);
        Ok(min)
    }

    /// Removes `element` from the queue, returning the stored pair
    pub fn remove(&mut self, element: &E) -> Option<(E, P)> {
        let hash = self.equality.hash(element);
        let slot = self.find_slot(hash, element)?;
        Some(self.remove_at(slot))
    }

    /// Returns true if an element equal to `element` is tracked
    pub fn contains(&self, element: &E) -> bool {
        let hash = self.equality.hash(element);
        self.find_slot(hash, element).is_some()
    }

    /// Returns the current priority of `element`, if tracked
    pub fn priority_of(&self, element: &E) -> Option<&P> {
        let hash = self.equality.hash(element);
        self.find_slot(hash, element)
            .map(|slot| &self.heap[slot].priority)
    }

    /// Checks the heap order and the element index against each other.
    ///
    /// Returns true if every child is no better than its parent, every entry
    /// is indexed at the slot it occupies, and no element appears twice.
    pub fn verify_internal_structure(&self) -> bool {
        if self.index.len() != self.heap.len() {
            return false;
        }
        self.heap.iter().enumerate().all(|(slot, entry)| {
            let ordered = slot == 0 || {
                let parent = (slot - 1) / 2;
                !self.comparer.less(&entry.priority, &self.heap[parent].priority)
            };
            ordered
                && entry.hash == self.equality.hash(&entry.element)
                && self.find_slot(entry.hash, &entry.element) == Some(slot)
        })
    }

    fn find_slot(&self, hash: u64, element: &E) -> Option<usize> {
        self.index
            .find(hash, |slot| self.equality.eq(&self.heap[slot].element, element))
    }

    fn push_new(&mut self, element: E, priority: P, hash: u64) {
        let slot = self.heap.len();
        self.heap.push(Entry {
            element,
            priority,
            hash,
        });
        self.index.insert(hash, slot);
        self.sift_up(slot);
    }

    /// Overwrites the entry at `slot` and restores heap order
    fn replace_at(&mut self, slot: usize, element: E, priority: P) {
        let direction = self.comparer.compare(&priority, &self.heap[slot].priority);
        let entry = &mut self.heap[slot];
        entry.element = element;
        entry.priority = priority;
        match direction {
            Ordering::Less => {
                self.sift_up(slot);
            }
            Ordering::Greater => self.sift_down(slot),
            Ordering::Equal => {}
        }
    }

    /// Removes the entry at `slot`, filling the hole with the last entry.
    ///
    /// `slot` must be occupied.
    fn remove_at(&mut self, slot: usize) -> (E, P) {
        let last = self.heap.len() - 1;
        let removed = self.heap.swap_remove(slot);
        self.index.remove(removed.hash, slot);

        if slot < last {
            self.index.relocate(self.heap[slot].hash, last, slot);
            if self.sift_up(slot) == slot {
                self.sift_down(slot);
            }
        }
        (removed.element, removed.priority)
    }

    fn swap_slots(&mut self, a: usize, b: usize) {
        self.heap.swap(a, b);
        self.index.relocate(self.heap[a].hash, b, a);
        self.index.relocate(self.heap[b].hash, a, b);
    }

    /// Move entry at index up to maintain heap property, returning where it ends
    fn sift_up(&mut self, mut index: usize) -> usize {
        while index > 0 {
            let parent = (index - 1) / 2;
            if self
                .comparer
                .less(&self.heap[index].priority, &self.heap[parent].priority)
            {
                self.swap_slots(index, parent);
                index = parent;
            } else {
                break;
            }
        }
        index
    }

    /// Move entry at index down to maintain heap property
    fn sift_down(&mut self, mut index: usize) {
        let len = self.heap.len();
        loop {
            let left = 2 * index + 1;
            let right = 2 * index + 2;
            let mut smallest = index;

            if left < len
                && self
                    .comparer
                    .less(&self.heap[left].priority, &self.heap[smallest].priority)
            {
                smallest = left;
            }
            if right < len
                && self
                    .comparer
                    .less(&self.heap[right].priority, &self.heap[smallest].priority)
            {
                smallest = right;
            }

            if smallest != index {
                self.swap_slots(index, smallest);
                index = smallest;
            } else {
                break;
            }
        }
    }
}

impl<E, P> Default for UpdatablePriorityQueue<E, P> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E, P, EC, PC> fmt::Debug for UpdatablePriorityQueue<E, P, EC, PC>
where
    E: fmt::Debug,
    P: fmt::Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("UpdatablePriorityQueue")
            .field("len", &self.heap.len())
            .field("items", &DebugItems(self))
            .finish()
    }
}

struct DebugItems<'a, E, P, EC, PC>(&'a UpdatablePriorityQueue<E, P, EC, PC>);

impl<E: fmt::Debug, P: fmt::Debug, EC, PC> fmt::Debug for DebugItems<'_, E, P, EC, PC> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.0.unordered_items()).finish()
    }
}

impl<E, P> FromIterator<(E, P)> for UpdatablePriorityQueue<E, P>
where
    DefaultEquality: EqualityComparer<E>,
    NaturalOrder: PriorityComparer<P>,
{
    fn from_iter<I: IntoIterator<Item = (E, P)>>(iter: I) -> Self {
        Self::from_items_with_comparers(iter, DefaultEquality, NaturalOrder)
    }
}

impl<E, P, EC, PC> Extend<(E, P)> for UpdatablePriorityQueue<E, P, EC, PC>
where
    EC: EqualityComparer<E>,
    PC: PriorityComparer<P>,
{
    fn extend<I: IntoIterator<Item = (E, P)>>(&mut self, iter: I) {
        self.enqueue_range(iter);
    }
}

impl<'a, E, P, EC, PC> IntoIterator for &'a UpdatablePriorityQueue<E, P, EC, PC> {
    type Item = (&'a E, &'a P);
    type IntoIter = UnorderedItems<'a, E, P>;

    fn into_iter(self) -> Self::IntoIter {
        self.unordered_items()
    }
}

/// Iterator over the entries of an [`UpdatablePriorityQueue`] in heap order.
///
/// Created by [`UpdatablePriorityQueue::unordered_items`].
#[derive(Clone)]
pub struct UnorderedItems<'a, E, P> {
    inner: slice::Iter<'a, Entry<E, P>>,
}

impl<'a, E, P> Iterator for UnorderedItems<'a, E, P> {
    type Item = (&'a E, &'a P);

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|e| (&e.element, &e.priority))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<E, P> ExactSizeIterator for UnorderedItems<'_, E, P> {}

impl<E, P> FusedIterator for UnorderedItems<'_, E, P> {}
