//! Flat storage backends shared by the queue and the search engine
//!
//! Elements are never linked through pointers. Instead they live in plain
//! vectors and are located through a [`SlotIndex`]: a map from an element's
//! hash (as computed by its [`EqualityComparer`]) to the vector slots holding
//! elements with that hash. Collisions are resolved by asking the comparer
//! about each candidate slot, so custom equality works without requiring
//! `Hash + Eq` on the element type itself.
//!
//! - [`SlotIndex`]: the hash → slots map, updated in lockstep with whatever
//!   vector owns the elements.
//! - [`NodeTable`]: an append-only arena of nodes with one value per node,
//!   used by the search engine for its settled set and predecessor map.

use crate::traits::EqualityComparer;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;

/// Slots sharing one hash. Almost always a single entry.
type Bucket = SmallVec<[usize; 1]>;

/// Maps element hashes to the slots that hold them.
#[derive(Debug, Clone, Default)]
pub struct SlotIndex {
    buckets: FxHashMap<u64, Bucket>,
}

impl SlotIndex {
    /// Creates an empty index
    pub fn new() -> Self {
        SlotIndex {
            buckets: FxHashMap::default(),
        }
    }

    /// Creates an empty index with room for `capacity` distinct hashes
    pub fn with_capacity(capacity: usize) -> Self {
        SlotIndex {
            buckets: FxHashMap::with_capacity_and_hasher(capacity, Default::default()),
        }
    }

    /// Returns the first slot with this hash for which `is_match` returns true
    pub fn find(&self, hash: u64, mut is_match: impl FnMut(usize) -> bool) -> Option<usize> {
        self.buckets
            .get(&hash)
            .and_then(|bucket| bucket.iter().copied().find(|&slot| is_match(slot)))
    }

    /// Records that `slot` holds an element with this hash
    pub fn insert(&mut self, hash: u64, slot: usize) {
        self.buckets.entry(hash).or_default().push(slot);
    }

    /// Records that the element with this hash moved from `from` to `to`
    pub fn relocate(&mut self, hash: u64, from: usize, to: usize) {
        if let Some(recorded) = self
            .buckets
            .get_mut(&hash)
            .and_then(|bucket| bucket.iter_mut().find(|slot| **slot == from))
        {
            *recorded = to;
        }
    }

    /// Forgets that `slot` holds an element with this hash
    pub fn remove(&mut self, hash: u64, slot: usize) {
        if let Some(bucket) = self.buckets.get_mut(&hash) {
            if let Some(pos) = bucket.iter().position(|&s| s == slot) {
                bucket.swap_remove(pos);
            }
            if bucket.is_empty() {
                self.buckets.remove(&hash);
            }
        }
    }

    /// Removes every entry, keeping the allocation
    pub fn clear(&mut self) {
        self.buckets.clear();
    }

    /// Reserves room for at least `additional` more hashes
    pub fn reserve(&mut self, additional: usize) {
        self.buckets.reserve(additional);
    }

    /// Shrinks the allocation as much as possible
    pub fn shrink_to_fit(&mut self) {
        self.buckets.shrink_to_fit();
    }

    /// Total number of recorded slots
    pub fn len(&self) -> usize {
        self.buckets.values().map(|b| b.len()).sum()
    }
}

struct TableEntry<N, V> {
    node: N,
    value: V,
}

/// Append-only arena of nodes, each carrying a value.
///
/// Nodes are addressed by the `usize` returned from
/// [`NodeTable::find_or_insert_with`]; those indices stay valid for the
/// lifetime of the table. Each node is stored at most once.
pub struct NodeTable<N, V, EC> {
    entries: Vec<TableEntry<N, V>>,
    index: SlotIndex,
    equality: EC,
}

impl<N, V, EC> NodeTable<N, V, EC>
where
    EC: EqualityComparer<N>,
{
    /// Creates an empty table that identifies nodes with `equality`
    pub fn new(equality: EC) -> Self {
        NodeTable {
            entries: Vec::new(),
            index: SlotIndex::new(),
            equality,
        }
    }

    /// Returns the index of `node`, if present
    pub fn find(&self, node: &N) -> Option<usize> {
        let hash = self.equality.hash(node);
        self.find_hashed(hash, node)
    }

    fn find_hashed(&self, hash: u64, node: &N) -> Option<usize> {
        self.index
            .find(hash, |slot| self.equality.eq(&self.entries[slot].node, node))
    }

    /// Returns the index of `node`, inserting it with `value()` if absent.
    ///
    /// The boolean is true when the node was newly inserted.
    pub fn find_or_insert_with(&mut self, node: N, value: impl FnOnce() -> V) -> (usize, bool) {
        let hash = self.equality.hash(&node);
        if let Some(slot) = self.find_hashed(hash, &node) {
            return (slot, false);
        }
        let slot = self.entries.len();
        self.entries.push(TableEntry {
            node,
            value: value(),
        });
        self.index.insert(hash, slot);
        (slot, true)
    }

    /// Returns the node stored at `index`
    pub fn node(&self, index: usize) -> &N {
        &self.entries[index].node
    }

    /// Returns the value stored at `index`
    pub fn get(&self, index: usize) -> &V {
        &self.entries[index].value
    }

    /// Returns the value stored at `index` mutably
    pub fn get_mut(&mut self, index: usize) -> &mut V {
        &mut self.entries[index].value
    }

    /// Returns the equality comparer
    pub fn equality(&self) -> &EC {
        &self.equality
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::traits::{ByKey, DefaultEquality};

    #[test]
    fn test_slot_index_basic() {
        let mut index = SlotIndex::new();
        assert_eq!(index.len(), 0);

        index.insert(7, 0);
        index.insert(7, 3);
        index.insert(9, 1);
        assert_eq!(index.len(), 3);

        assert_eq!(index.find(7, |s| s == 3), Some(3));
        assert_eq!(index.find(7, |s| s == 1), None);
        assert_eq!(index.find(8, |_| true), None);

        index.relocate(7, 3, 5);
        assert_eq!(index.find(7, |s| s == 5), Some(5));
        assert_eq!(index.find(7, |s| s == 3), None);

        index.remove(7, 0);
        index.remove(7, 5);
        assert_eq!(index.find(7, |_| true), None);
        assert_eq!(index.len(), 1);

        index.clear();
        assert_eq!(index.len(), 0);
    }

    #[test]
    fn test_node_table_find_or_insert() {
        let mut table = NodeTable::new(DefaultEquality);
        let (a, new_a) = table.find_or_insert_with("a", || 1);
        let (b, new_b) = table.find_or_insert_with("b", || 2);
        let (a2, new_a2) = table.find_or_insert_with("a", || 99);

        assert!(new_a && new_b && !new_a2);
        assert_eq!(a, a2);
        assert_ne!(a, b);
        assert_eq!(*table.get(a), 1);
        assert_eq!(table.entries.len(), 2);

        *table.get_mut(b) = 20;
        assert_eq!(*table.get(b), 20);
        assert_eq!(table.find(&"b"), Some(b));
        assert_eq!(table.find(&"c"), None);
    }

    #[test]
    fn test_node_table_colliding_keys() {
        // Every node hashes to the same bucket; equality still separates them.
        struct Colliding;
        impl EqualityComparer<u32> for Colliding {
            fn hash(&self, _: &u32) -> u64 {
                0
            }
            fn eq(&self, a: &u32, b: &u32) -> bool {
                a == b
            }
        }

        let mut table = NodeTable::new(Colliding);
        for i in 0..10u32 {
            assert_eq!(table.find_or_insert_with(i, || i * 10), (i as usize, true));
        }
        for i in 0..10u32 {
            assert_eq!(table.find_or_insert_with(i, || 0), (i as usize, false));
        }
        assert_eq!(table.entries.len(), 10);
        for i in 0..10u32 {
            assert_eq!(table.find(&i), Some(i as usize));
            assert_eq!(*table.get(i as usize), i * 10);
        }
    }

    #[test]
    fn test_node_table_custom_equality() {
        let mut table = NodeTable::new(ByKey(|s: &String| s.to_lowercase()));
        let (x, _) = table.find_or_insert_with("Node".to_string(), || ());
        assert_eq!(table.find(&"NODE".to_string()), Some(x));
        assert_eq!(table.node(x), "Node");
        assert_eq!(table.entries.len(), 1);
    }

    #[test]
    fn test_node_table_stores_each_node_once() {
        let mut table = NodeTable::new(DefaultEquality);
        let (first, inserted) = table.find_or_insert_with("a", || 1);
        assert!(inserted);

        let (again, inserted) = table.find_or_insert_with("a", || 2);
        assert!(!inserted);
        assert_eq!(again, first);
        assert_eq!(*table.get(first), 1);
        assert_eq!(table.entries.len(), 1);
        assert_eq!(table.index.len(), 1);
        assert_eq!(table.find(&"a"), Some(first));
    }
}
