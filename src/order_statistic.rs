/// A one-based rank into the sorted order of an [`AvlTree`](crate::AvlTree).
///
/// Rank 1 is the smallest key, rank `len` the largest. In a tree used positionally the rank
/// is simply the position plus one.
///
/// # Examples
///
/// ```
/// use avl_ost::{AvlTree, Rank};
///
/// let mut tree = AvlTree::new();
/// tree.insert(20, "b");
/// tree.insert(10, "a");
///
/// assert_eq!(tree[Rank(1)], "a");
/// ```
#[derive(Clone, Copy, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct Rank(pub usize);
