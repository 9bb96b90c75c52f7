use core::ops::Index;

use super::AvlTree;
use crate::Rank;

impl<V> AvlTree<V> {
    /// Returns the value at one-based position `rank` in in-order sequence.
    ///
    /// Returns `None` if `rank` is `0` or greater than [`len`](AvlTree::len).
    ///
    /// # Complexity
    ///
    /// O(log n); O(1) for the first and last rank.
    ///
    /// # Examples
    ///
    /// ```
    /// use avl_ost::AvlTree;
    ///
    /// let mut tree = AvlTree::new();
    /// for key in [10, 20, 5, 6, 15] {
    ///     tree.insert(key, key * 100);
    /// }
    ///
    /// assert_eq!(tree.select_by_rank(3), Some(&1000));
    /// assert_eq!(tree.select_by_rank(0), None);
    /// assert_eq!(tree.select_by_rank(6), None);
    /// ```
    #[must_use]
    pub fn select_by_rank(&self, rank: usize) -> Option<&V> {
        self.select_entry_by_rank(rank).map(|(_, value)| value)
    }

    /// Returns the key and value at one-based position `rank`.
    #[must_use]
    pub fn select_entry_by_rank(&self, rank: usize) -> Option<(i64, &V)> {
        if rank == 0 || rank > self.len() {
            return None;
        }
        let node = self.raw.node(self.raw.select(rank));
        Some((node.key(), node.value()))
    }

    /// Returns the one-based rank of `key`, or `None` if it is absent.
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
    /// tree.insert(30, ());
    /// tree.insert(10, ());
    ///
    /// assert_eq!(tree.rank_of(10), Some(1));
    /// assert_eq!(tree.rank_of(30), Some(2));
    /// assert_eq!(tree.rank_of(20), None);
    /// ```
    #[must_use]
    pub fn rank_of(&self, key: i64) -> Option<usize> {
        self.raw.rank_of(key)
    }

    /// Inserts a node so that it ends up at zero-based position `index`, without comparing
    /// keys and without checking `key` for uniqueness.
    ///
    /// Appends after the last node when `index == len`, prepends before the first when
    /// `index == 0`, and otherwise hangs the node directly before the current occupant of
    /// `index`. Returns the number of rotations performed.
    ///
    /// This is the building block of [`TreeList`](crate::TreeList); see the type-level docs
    /// on mixing it with keyed operations.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
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
    /// tree.insert_by_index(0, 0, "b");
    /// tree.insert_by_index(0, 0, "a");
    /// tree.insert_by_index(2, 0, "c");
    ///
    /// assert_eq!(tree.values_in_order(), [&"a", &"b", &"c"]);
    /// ```
    pub fn insert_by_index(&mut self, index: usize, key: i64, value: V) -> usize {
        self.raw.insert_at(index, key, value)
    }

    /// Removes the node at zero-based position `index`. Returns its key, its value and the
    /// number of rotations performed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
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
    /// tree.insert(2, "b");
    ///
    /// assert_eq!(tree.delete_by_index(1), (2, "b", 0));
    /// assert_eq!(tree.len(), 1);
    /// ```
    pub fn delete_by_index(&mut self, index: usize) -> (i64, V, usize) {
        self.raw.remove_at(index)
    }
}

/// Indexes into the tree by one-based rank.
///
/// # Panics
///
/// Panics if `rank` is `0` or greater than the tree's length.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTree, Rank};
///
/// let mut tree = AvlTree::new();
/// tree.insert(5, "x");
/// tree.insert(1, "y");
///
/// assert_eq!(tree[Rank(2)], "x");
/// ```
impl<V> Index<Rank> for AvlTree<V> {
    type Output = V;

    fn index(&self, rank: Rank) -> &Self::Output {
        self.select_by_rank(rank.0).expect("rank out of bounds")
    }
}
