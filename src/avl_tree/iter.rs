use core::fmt;
use core::iter::FusedIterator;

use smallvec::SmallVec;

use crate::raw::{Handle, RawAvlTree};

// AVL height stays below 1.45 * log2(n + 2), under 47 for any `u32` handle space. 64 is the
// nearest inline size smallvec provides.
type Stack = SmallVec<[Handle; 64]>;

/// An in-order iterator over the entries of an `AvlTree`.
///
/// This `struct` is created by the [`iter`](super::AvlTree::iter) method on
/// [`AvlTree`](super::AvlTree).
///
/// # Examples
///
/// ```
/// use avl_ost::AvlTree;
///
/// let mut tree = AvlTree::new();
/// tree.insert(2, "b");
/// tree.insert(1, "a");
///
/// let mut iter = tree.iter();
/// assert_eq!(iter.len(), 2);
/// assert_eq!(iter.next(), Some((1, &"a")));
/// assert_eq!(iter.next(), Some((2, &"b")));
/// assert_eq!(iter.next(), None);
/// ```
pub struct Iter<'a, V> {
    raw: &'a RawAvlTree<V>,
    // Nodes whose left subtree has been visited but which have not been yielded yet.
    stack: Stack,
    remaining: usize,
}

impl<'a, V> Iter<'a, V> {
    pub(super) fn new(raw: &'a RawAvlTree<V>) -> Self {
        let mut iter = Iter {
            raw,
            stack: Stack::new(),
            remaining: raw.len(),
        };
        iter.push_left_spine(raw.root());
        iter
    }

    fn push_left_spine(&mut self, mut current: Option<Handle>) {
        while let Some(handle) = current {
            self.stack.push(handle);
            current = self.raw.node(handle).left();
        }
    }
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let handle = self.stack.pop()?;
        let raw = self.raw;
        let node = raw.node(handle);
        self.push_left_spine(node.right());
        self.remaining -= 1;
        Some((node.key(), node.value()))
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {
    fn len(&self) -> usize {
        self.remaining
    }
}

impl<V> FusedIterator for Iter<'_, V> {}

impl<V> Clone for Iter<'_, V> {
    fn clone(&self) -> Self {
        Iter {
            raw: self.raw,
            stack: self.stack.clone(),
            remaining: self.remaining,
        }
    }
}

impl<V: fmt::Debug> fmt::Debug for Iter<'_, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.clone()).finish()
    }
}
