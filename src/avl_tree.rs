use core::fmt;

use alloc::vec::Vec;

use crate::raw::RawAvlTree;

mod capacity;
mod iter;
mod order_statistic;

pub use crate::Rank;
pub use iter::Iter;

/// Result of [`AvlTree::insert`].
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum InsertOutcome {
    /// The key was added; `rotations` single rotations restored balance (a double
    /// rotation counts as two).
    Inserted { rotations: usize },
    /// The key was already present. The tree was not modified.
    Duplicate,
}

impl InsertOutcome {
    /// Returns the rotation count of a successful insert.
    #[must_use]
    pub const fn rotations(self) -> Option<usize> {
        match self {
            InsertOutcome::Inserted { rotations } => Some(rotations),
            InsertOutcome::Duplicate => None,
        }
    }

    #[must_use]
    pub const fn is_inserted(self) -> bool {
        matches!(self, InsertOutcome::Inserted { .. })
    }
}

/// Result of [`AvlTree::delete`].
#[derive(Clone, Debug, Eq, PartialEq, Hash)]
pub enum DeleteOutcome<V> {
    /// The key was removed along with `value`; `rotations` single rotations restored balance.
    Deleted { value: V, rotations: usize },
    /// The key was not present.
    NotFound,
}

impl<V> DeleteOutcome<V> {
    /// Returns the rotation count of a successful delete.
    #[must_use]
    pub const fn rotations(&self) -> Option<usize> {
        match self {
            DeleteOutcome::Deleted { rotations, .. } => Some(*rotations),
            DeleteOutcome::NotFound => None,
        }
    }

    /// Returns the removed value, if any.
    #[must_use]
    pub fn into_value(self) -> Option<V> {
        match self {
            DeleteOutcome::Deleted { value, .. } => Some(value),
            DeleteOutcome::NotFound => None,
        }
    }

    #[must_use]
    pub const fn is_deleted(&self) -> bool {
        matches!(self, DeleteOutcome::Deleted { .. })
    }
}

/// A height-balanced (AVL) search tree over distinct `i64` keys, augmented with subtree
/// sizes for O(log n) rank queries.
///
/// Besides the usual keyed operations, the tree can be driven by position:
/// [`insert_by_index`](AvlTree::insert_by_index) places a node at a given position without
/// looking at its key, which is how [`TreeList`](crate::TreeList) gets O(log n) positional
/// inserts and deletes. Mixing keyed lookups with positional inserts on the same tree is a
/// logic error: the behavior is not specified but stays memory safe and never aborts.
///
/// The smallest and largest nodes are cached, so [`min`](AvlTree::min) and
/// [`max`](AvlTree::max) are O(1).
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTree, InsertOutcome};
///
/// let mut tree = AvlTree::new();
/// assert_eq!(tree.insert(1, "one"), InsertOutcome::Inserted { rotations: 0 });
/// assert_eq!(tree.insert(2, "two"), InsertOutcome::Inserted { rotations: 0 });
///
/// // The third ascending key unbalances the root; one left rotation fixes it.
/// assert_eq!(tree.insert(3, "three"), InsertOutcome::Inserted { rotations: 1 });
/// assert_eq!(tree.insert(3, "again"), InsertOutcome::Duplicate);
///
/// assert_eq!(tree.search(2), Some(&"two"));
/// assert_eq!(tree.root_key(), Some(2));
/// assert_eq!(tree.keys_in_order(), [1, 2, 3]);
/// assert_eq!(tree.select_by_rank(3), Some(&"three"));
/// ```
#[derive(Clone)]
pub struct AvlTree<V> {
    raw: RawAvlTree<V>,
}

impl<V> AvlTree<V> {
    /// Makes a new, empty `AvlTree`.
    ///
    /// Does not allocate anything on its own.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let tree: AvlTree<&str> = AvlTree::new();
    /// assert!(tree.is_empty());
    /// assert_eq!(tree.height(), -1);
    /// ```
    #[must_use]
    pub const fn new() -> Self {
        AvlTree { raw: RawAvlTree::new() }
    }

    /// Returns `true` if the tree holds no nodes.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.raw.is_empty()
    }

    /// Returns the number of nodes in the tree.
    ///
    /// # Complexity
    ///
    /// O(1): the root caches the size of its subtree.
    #[must_use]
    pub fn len(&self) -> usize {
        self.raw.len()
    }

    /// Returns the height of the tree: `0` for a single node, `-1` when empty.
    #[must_use]
    pub fn height(&self) -> i32 {
        self.raw.height()
    }

    /// Returns the key stored at the root.
    #[must_use]
    pub fn root_key(&self) -> Option<i64> {
        self.raw.root().map(|root| self.raw.node(root).key())
    }

    /// Returns the value of the smallest key (the first position, in a positional tree).
    ///
    /// # Complexity
    ///
    /// O(1)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// assert_eq!(tree.min(), None);
    /// tree.insert(7, 'x');
    /// tree.insert(3, 'y');
    /// assert_eq!(tree.min(), Some(&'y'));
    /// assert_eq!(tree.max(), Some(&'x'));
    /// ```
    #[must_use]
    pub fn min(&self) -> Option<&V> {
        self.raw.min().map(|min| self.raw.node(min).value())
    }

    /// Returns the value of the largest key (the last position, in a positional tree).
    ///
    /// # Complexity
    ///
    /// O(1)
    #[must_use]
    pub fn max(&self) -> Option<&V> {
        self.raw.max().map(|max| self.raw.node(max).value())
    }

    /// Returns the smallest key.
    #[must_use]
    pub fn min_key(&self) -> Option<i64> {
        self.raw.min().map(|min| self.raw.node(min).key())
    }

    /// Returns the largest key.
    #[must_use]
    pub fn max_key(&self) -> Option<i64> {
        self.raw.max().map(|max| self.raw.node(max).key())
    }

    /// Returns a reference to the value stored under `key`.
    ///
    /// A missing key is not an error; it yields `None`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1, "a");
    /// assert_eq!(tree.search(1), Some(&"a"));
    /// assert_eq!(tree.search(2), None);
    /// ```
    #[must_use]
    pub fn search(&self, key: i64) -> Option<&V> {
        self.raw.find(key).map(|node| self.raw.node(node).value())
    }

    /// Alias of [`search`](AvlTree::search).
    #[must_use]
    pub fn get(&self, key: i64) -> Option<&V> {
        self.search(key)
    }

    /// Returns a mutable reference to the value stored under `key`.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1, 10);
    /// if let Some(value) = tree.get_mut(1) {
    ///     *value += 5;
    /// }
    /// assert_eq!(tree.search(1), Some(&15));
    /// ```
    #[must_use]
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let node = self.raw.find(key)?;
        Some(self.raw.node_mut(node).value_mut())
    }

    /// Returns `true` if the tree holds `key`.
    #[must_use]
    pub fn contains_key(&self, key: i64) -> bool {
        self.raw.find(key).is_some()
    }

    /// Inserts `value` under `key`, then rebalances from the new leaf up to the root.
    ///
    /// If `key` is already present nothing changes, `value` is dropped and
    /// [`InsertOutcome::Duplicate`] is returned. This is distinct from a successful insert
    /// that needed no rotations.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlTree, InsertOutcome};
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(3, ());
    /// tree.insert(1, ());
    /// // 3 -> 1 -> 2 is a zig-zag: a double rotation.
    /// assert_eq!(tree.insert(2, ()), InsertOutcome::Inserted { rotations: 2 });
    /// ```
    pub fn insert(&mut self, key: i64, value: V) -> InsertOutcome {
        match self.raw.insert(key, value) {
            Some(rotations) => InsertOutcome::Inserted { rotations },
            None => InsertOutcome::Duplicate,
        }
    }

    /// Removes `key` and returns its value with the number of rotations performed.
    ///
    /// A node with two children is replaced by its in-order successor node, so handles to
    /// other nodes stay valid across the delete.
    ///
    /// # Complexity
    ///
    /// O(log n)
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::{AvlTree, DeleteOutcome};
    ///
    /// let mut tree = AvlTree::new();
    /// tree.insert(1, "a");
    /// tree.insert(2, "b");
    ///
    /// assert_eq!(tree.delete(1), DeleteOutcome::Deleted { value: "a", rotations: 0 });
    /// assert_eq!(tree.delete(1), DeleteOutcome::NotFound);
    /// assert_eq!(tree.root_key(), Some(2));
    /// assert_eq!(tree.height(), 0);
    /// ```
    pub fn delete(&mut self, key: i64) -> DeleteOutcome<V> {
        match self.raw.remove(key) {
            Some((value, rotations)) => DeleteOutcome::Deleted { value, rotations },
            None => DeleteOutcome::NotFound,
        }
    }

    /// Removes every node.
    pub fn clear(&mut self) {
        self.raw.clear();
    }

    /// Gets an iterator over `(key, &value)` pairs in in-order sequence.
    pub fn iter(&self) -> Iter<'_, V> {
        Iter::new(&self.raw)
    }

    /// Returns every key in in-order sequence (ascending for a keyed tree).
    ///
    /// # Complexity
    ///
    /// O(n), iterative.
    #[must_use]
    pub fn keys_in_order(&self) -> Vec<i64> {
        self.iter().map(|(key, _)| key).collect()
    }

    /// Returns every value in the same order as [`keys_in_order`](AvlTree::keys_in_order).
    #[must_use]
    pub fn values_in_order(&self) -> Vec<&V> {
        self.iter().map(|(_, value)| value).collect()
    }
}

impl<V> Default for AvlTree<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for AvlTree<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_map().entries(self.iter()).finish()
    }
}

impl<'a, V> IntoIterator for &'a AvlTree<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;
    use alloc::format;
    use proptest::prelude::*;

    impl<V> AvlTree<V> {
        pub(crate) fn validate_invariants(&self, key_ordered: bool) {
            self.raw.validate_invariants(key_ordered);
        }
    }

    #[test]
    fn empty_tree_answers_none() {
        let mut tree: AvlTree<u8> = AvlTree::new();
        assert!(tree.is_empty());
        assert_eq!(tree.len(), 0);
        assert_eq!(tree.min(), None);
        assert_eq!(tree.max(), None);
        assert_eq!(tree.search(0), None);
        assert_eq!(tree.root_key(), None);
        assert_eq!(tree.delete(0), DeleteOutcome::NotFound);
        assert!(tree.keys_in_order().is_empty());
        assert_eq!(tree.select_by_rank(1), None);
        tree.raw.validate_invariants(true);
    }

    #[test]
    fn outcome_helpers() {
        assert_eq!(InsertOutcome::Inserted { rotations: 0 }.rotations(), Some(0));
        assert!(!InsertOutcome::Duplicate.is_inserted());

        let deleted = DeleteOutcome::Deleted { value: 'v', rotations: 2 };
        assert_eq!(deleted.rotations(), Some(2));
        assert!(deleted.is_deleted());
        assert_eq!(deleted.into_value(), Some('v'));
        assert_eq!(DeleteOutcome::<char>::NotFound.into_value(), None);
    }

    #[test]
    fn debug_renders_in_order_map() {
        let mut tree = AvlTree::new();
        tree.insert(2, "b");
        tree.insert(1, "a");
        assert_eq!(format!("{tree:?}"), r#"{1: "a", 2: "b"}"#);
    }

    #[test]
    fn positional_operations_report_rotations() {
        let mut tree = AvlTree::new();
        assert_eq!(tree.insert_by_index(0, 0, 'a'), 0);
        assert_eq!(tree.insert_by_index(1, 0, 'b'), 0);
        // Third append tips the root to the right.
        assert_eq!(tree.insert_by_index(2, 0, 'c'), 1);
        assert_eq!(tree.insert_by_index(3, 0, 'd'), 0);

        // Removing the first entry leaves the root two levels lighter on the left.
        assert_eq!(tree.delete_by_index(0), (0, 'a', 1));
        assert_eq!(tree.delete_by_index(2), (0, 'd', 0));
        assert_eq!(tree.values_in_order(), [&'b', &'c']);
        tree.raw.validate_invariants(false);
    }

    #[test]
    fn clone_is_independent() {
        let mut tree = AvlTree::new();
        for key in 0..20 {
            tree.insert(key, key);
        }
        let snapshot = tree.clone();
        for key in 0..10 {
            let _ = tree.delete(key);
        }
        snapshot.raw.validate_invariants(true);
        assert_eq!(snapshot.len(), 20);
        assert_eq!(tree.keys_in_order(), (10..20).collect::<Vec<_>>());
    }

    #[derive(Clone, Debug)]
    enum Op {
        Insert(i64),
        Delete(i64),
    }

    fn op_strategy() -> impl Strategy<Value = Op> {
        prop_oneof![
            3 => (-200i64..200).prop_map(Op::Insert),
            2 => (-200i64..200).prop_map(Op::Delete),
        ]
    }

    proptest! {
        #![proptest_config(ProptestConfig::with_cases(64))]

        #[test]
        fn extremes_track_in_order_sequence(ops in prop::collection::vec(op_strategy(), 0..300)) {
            let mut tree = AvlTree::new();
            let mut inserted = 0usize;
            let mut deleted = 0usize;

            for op in ops {
                match op {
                    Op::Insert(key) => {
                        if tree.insert(key, key * 10).is_inserted() {
                            inserted += 1;
                        }
                    }
                    Op::Delete(key) => {
                        if tree.delete(key).is_deleted() {
                            deleted += 1;
                        }
                    }
                }
                tree.raw.validate_invariants(true);

                let values = tree.values_in_order();
                prop_assert_eq!(tree.len(), inserted - deleted);
                prop_assert_eq!(tree.min(), values.first().copied());
                prop_assert_eq!(tree.max(), values.last().copied());
            }

            let keys = tree.keys_in_order();
            prop_assert!(keys.windows(2).all(|pair| pair[0] < pair[1]));
            for (rank, key) in keys.iter().enumerate() {
                prop_assert_eq!(tree.select_by_rank(rank + 1), Some(&(key * 10)));
                prop_assert_eq!(tree.search(*key), Some(&(key * 10)));
            }
            let expected: Vec<i64> = keys.iter().map(|key| key * 10).collect();
            prop_assert_eq!(tree.values_in_order(), expected.iter().collect::<Vec<_>>());
        }
    }
}
