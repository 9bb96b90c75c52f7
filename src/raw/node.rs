use super::handle::Handle;

/// Height of an absent subtree.
pub(crate) const EMPTY_HEIGHT: i32 = -1;

/// Which child link of a node.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum Side {
    Left,
    Right,
}

impl Side {
    #[inline]
    pub(crate) const fn opposite(self) -> Self {
        match self {
            Side::Left => Side::Right,
            Side::Right => Side::Left,
        }
    }
}

/// A single AVL node.
///
/// `left` and `right` are the owning links: a node is reachable from exactly one of them
/// (or from the tree's root slot). `parent` only mirrors those links for upward walks.
#[derive(Clone)]
pub(crate) struct AvlNode<V> {
    key: i64,
    value: V,
    left: Option<Handle>,
    right: Option<Handle>,
    parent: Option<Handle>,
    // Longest downward path in edges; a lone node has height 0.
    height: i32,
    // Nodes in the subtree rooted here, including this one.
    size: usize,
}

impl<V> AvlNode<V> {
    /// Creates a detached leaf.
    pub(crate) const fn new(key: i64, value: V) -> Self {
        Self {
            key,
            value,
            left: None,
            right: None,
            parent: None,
            height: 0,
            size: 1,
        }
    }

    #[inline]
    pub(crate) const fn key(&self) -> i64 {
        self.key
    }

    #[inline]
    pub(crate) const fn value(&self) -> &V {
        &self.value
    }

    #[inline]
    pub(crate) const fn value_mut(&mut self) -> &mut V {
        &mut self.value
    }

    pub(crate) fn into_entry(self) -> (i64, V) {
        (self.key, self.value)
    }

    #[inline]
    pub(crate) const fn left(&self) -> Option<Handle> {
        self.left
    }

    #[inline]
    pub(crate) const fn right(&self) -> Option<Handle> {
        self.right
    }

    #[inline]
    pub(crate) const fn child(&self, side: Side) -> Option<Handle> {
        match side {
            Side::Left => self.left,
            Side::Right => self.right,
        }
    }

    /// Overwrites one child link. Cached metrics are left for the caller to refresh.
    #[inline]
    pub(crate) const fn set_child(&mut self, side: Side, child: Option<Handle>) {
        match side {
            Side::Left => self.left = child,
            Side::Right => self.right = child,
        }
    }

    #[inline]
    pub(crate) const fn parent(&self) -> Option<Handle> {
        self.parent
    }

    #[inline]
    pub(crate) const fn set_parent(&mut self, parent: Option<Handle>) {
        self.parent = parent;
    }

    #[inline]
    pub(crate) const fn height(&self) -> i32 {
        self.height
    }

    #[inline]
    pub(crate) const fn size(&self) -> usize {
        self.size
    }

    #[inline]
    pub(crate) const fn set_metrics(&mut self, height: i32, size: usize) {
        self.height = height;
        self.size = size;
    }

    /// Drops every link so a removed node cannot be mistaken for a live one.
    pub(crate) const fn detach(&mut self) {
        self.left = None;
        self.right = None;
        self.parent = None;
    }

    /// Returns the child of a node with at most one child.
    #[inline]
    pub(crate) fn sole_child(&self) -> Option<Handle> {
        debug_assert!(
            self.left.is_none() || self.right.is_none(),
            "`AvlNode::sole_child()` - node has two children!"
        );
        self.left.or(self.right)
    }
}

#[cfg(test)]
#[cfg_attr(coverage_nightly, coverage(off))]
mod tests {
    use super::*;

    #[test]
    fn new_node_is_a_leaf() {
        let node = AvlNode::new(7, "seven");
        assert_eq!(node.key(), 7);
        assert_eq!(*node.value(), "seven");
        assert_eq!(node.height(), 0);
        assert_eq!(node.size(), 1);
        assert!(node.left().is_none() && node.right().is_none() && node.parent().is_none());
    }

    #[test]
    fn child_links_by_side() {
        let mut node = AvlNode::new(0, ());
        let a = Handle::from_slot(3);
        let b = Handle::from_slot(9);

        node.set_child(Side::Left, Some(a));
        node.set_child(Side::Right.opposite().opposite(), Some(b));
        assert_eq!(node.child(Side::Left), Some(a));
        assert_eq!(node.right(), Some(b));

        node.set_child(Side::Left, None);
        assert_eq!(node.sole_child(), Some(b));

        node.detach();
        assert!(node.sole_child().is_none());
    }
}
