use core::cmp::Ordering;

use super::arena::Arena;
use super::handle::Handle;
use super::node::{AvlNode, EMPTY_HEIGHT, Side};
use crate::tracing_helpers::trace_log;

/// The AVL engine behind `AvlTree` and `TreeList`.
///
/// Shape primitives (rotation, rebalancing, unlink/splice, neighbour navigation, rank
/// selection) know nothing about keys. Only `insert`, `find`, `remove` and `rank_of` rely on
/// key order; `insert_at` and `remove_at` place and locate nodes purely by position.
#[derive(Clone)]
pub(crate) struct RawAvlTree<V> {
    /// Arena storing all tree nodes.
    nodes: Arena<AvlNode<V>>,
    /// Handle to the root node, if the tree is non-empty.
    root: Option<Handle>,
    /// First node in in-order sequence.
    min: Option<Handle>,
    /// Last node in in-order sequence.
    max: Option<Handle>,
}

/// Outcome of a key descent.
enum SearchResult {
    /// The key is stored at this node.
    Found(Handle),
    /// The key is absent; a new leaf belongs under this parent on this side
    /// (`None` for an empty tree).
    Vacant(Option<(Handle, Side)>),
}

impl<V> RawAvlTree<V> {
    /// Creates a new, empty tree.
    pub(crate) const fn new() -> Self {
        Self {
            nodes: Arena::new(),
            root: None,
            min: None,
            max: None,
        }
    }

    /// Creates a new tree with room for `capacity` nodes.
    pub(crate) fn with_capacity(capacity: usize) -> Self {
        Self {
            nodes: Arena::with_capacity(capacity),
            root: None,
            min: None,
            max: None,
        }
    }

    /// Returns the number of nodes (the root's cached subtree size).
    pub(crate) fn len(&self) -> usize {
        self.size_of(self.root)
    }

    pub(crate) const fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub(crate) fn capacity(&self) -> usize {
        self.nodes.capacity()
    }

    /// Height of the whole tree, `-1` when empty.
    pub(crate) fn height(&self) -> i32 {
        self.height_of(self.root)
    }

    pub(crate) const fn root(&self) -> Option<Handle> {
        self.root
    }

    pub(crate) const fn min(&self) -> Option<Handle> {
        self.min
    }

    pub(crate) const fn max(&self) -> Option<Handle> {
        self.max
    }

    #[inline]
    pub(crate) fn node(&self, handle: Handle) -> &AvlNode<V> {
        self.nodes.get(handle)
    }

    #[inline]
    pub(crate) fn node_mut(&mut self, handle: Handle) -> &mut AvlNode<V> {
        self.nodes.get_mut(handle)
    }

    /// Drops every node.
    pub(crate) fn clear(&mut self) {
        self.nodes.clear();
        self.root = None;
        self.min = None;
        self.max = None;
    }

    /// Returns the node at 1-based position `rank`.
    ///
    /// # Panics
    ///
    /// Panics unless `1 <= rank <= len`.
    pub(crate) fn select(&self, rank: usize) -> Handle {
        let len = self.len();
        assert!(
            (1..=len).contains(&rank),
            "`RawAvlTree::select()` - rank {rank} is outside 1..={len}!"
        );

        if rank == 1 {
            return self.min.expect("`RawAvlTree::select()` - non-empty tree has no min!");
        }
        if rank == len {
            return self.max.expect("`RawAvlTree::select()` - non-empty tree has no max!");
        }

        let mut current = self.root.expect("`RawAvlTree::select()` - non-empty tree has no root!");
        let mut remaining = rank;
        loop {
            let node = self.nodes.get(current);
            let here = self.size_of(node.left()) + 1;
            let next = match remaining.cmp(&here) {
                Ordering::Equal => return current,
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    remaining -= here;
                    node.right()
                }
            };
            current = next.expect("`RawAvlTree::select()` - subtree sizes are inconsistent!");
        }
    }

    /// Returns the in-order neighbour of `node`: the successor for `Side::Right`, the
    /// predecessor for `Side::Left`.
    pub(crate) fn neighbor(&self, node: Handle, side: Side) -> Option<Handle> {
        if let Some(child) = self.nodes.get(node).child(side) {
            return Some(self.extreme(child, side.opposite()));
        }

        // Climb while we arrive from the `side` link; the first ancestor reached through the
        // other link is the neighbour.
        let mut current = node;
        let mut parent = self.nodes.get(node).parent();
        while let Some(ancestor) = parent {
            if self.nodes.get(ancestor).child(side) != Some(current) {
                break;
            }
            current = ancestor;
            parent = self.nodes.get(ancestor).parent();
        }
        parent
    }

    /// Follows `side` links from `node` until there are none left.
    pub(crate) fn extreme(&self, node: Handle, side: Side) -> Handle {
        let mut current = node;
        while let Some(child) = self.nodes.get(current).child(side) {
            current = child;
        }
        current
    }

    /// Inserts a node so that it lands at 0-based position `index`, ignoring key order.
    /// Returns the number of rotations performed.
    ///
    /// # Panics
    ///
    /// Panics if `index > len`.
    pub(crate) fn insert_at(&mut self, index: usize, key: i64, value: V) -> usize {
        let len = self.len();
        assert!(index <= len, "`RawAvlTree::insert_at()` - index {index} > len {len}!");

        let (Some(first), Some(last)) = (self.min, self.max) else {
            self.plant(AvlNode::new(key, value));
            return 0;
        };

        let (parent, side) = if index == len {
            (last, Side::Right)
        } else if index == 0 {
            (first, Side::Left)
        } else {
            // Slot in directly before whatever currently sits at `index`.
            let at = self.select(index + 1);
            match self.nodes.get(at).left() {
                None => (at, Side::Left),
                Some(left) => (self.extreme(left, Side::Right), Side::Right),
            }
        };

        let node = self.nodes.insert(AvlNode::new(key, value));
        self.attach(parent, side, node);
        if index == 0 {
            self.min = Some(node);
        }
        if index == len {
            self.max = Some(node);
        }

        self.rebalance_upwards(node)
    }

    /// Removes the node at 0-based position `index`.
    /// Returns its entry and the number of rotations performed.
    ///
    /// # Panics
    ///
    /// Panics if `index >= len`.
    pub(crate) fn remove_at(&mut self, index: usize) -> (i64, V, usize) {
        let len = self.len();
        assert!(index < len, "`RawAvlTree::remove_at()` - index {index} >= len {len}!");
        let node = self.select(index + 1);
        self.remove_node(node)
    }

    /// Structural delete. Returns the removed entry and the number of rotations performed.
    pub(crate) fn remove_node(&mut self, node: Handle) -> (i64, V, usize) {
        // The cached extremes must move before any link changes.
        if self.min == Some(node) {
            self.min = self.neighbor(node, Side::Right);
        }
        if self.max == Some(node) {
            self.max = self.neighbor(node, Side::Left);
        }

        let (left, right) = {
            let n = self.nodes.get(node);
            (n.left(), n.right())
        };
        let rotations = match (left, right) {
            (Some(_), Some(right)) => {
                let successor = self.extreme(right, Side::Left);
                trace_log!(node = node.slot(), successor = successor.slot(), "delete: two children");
                let rotations = self.unlink(successor);
                self.splice(node, successor);
                rotations
            }
            _ => {
                trace_log!(node = node.slot(), leaf = left.is_none() && right.is_none(), "delete: at most one child");
                self.unlink(node)
            }
        };

        let (key, value) = self.nodes.remove(node).into_entry();
        if self.root.is_none() {
            self.nodes.clear();
        }
        (key, value, rotations)
    }

    /// Recomputes metrics from `start` to the root, rotating at every node whose balance
    /// factor reached ±2. Returns the number of single rotations performed.
    fn rebalance_upwards(&mut self, start: Handle) -> usize {
        let mut rotations = 0;
        let mut current = Some(start);

        while let Some(node) = current {
            self.refresh(node);
            let subtree = match self.balance_factor(node) {
                -1..=1 => node,
                2 => self.restore_balance(node, Side::Left, &mut rotations),
                -2 => self.restore_balance(node, Side::Right, &mut rotations),
                bf => unreachable!("`RawAvlTree::rebalance_upwards()` - balance factor {bf} at {node:?}!"),
            };
            // A rotation replaces the local root; keep walking from the replacement.
            current = self.nodes.get(subtree).parent();
        }

        trace_log!(start = start.slot(), rotations, "rebalanced");
        rotations
    }

    /// Fixes a node whose `heavy` subtree is two levels taller. Returns the new subtree root.
    fn restore_balance(&mut self, node: Handle, heavy: Side, rotations: &mut usize) -> Handle {
        let child = self
            .nodes
            .get(node)
            .child(heavy)
            .expect("`RawAvlTree::restore_balance()` - heavy side has no child!");

        // LR / RL: the heavy child leans inward, straighten it first.
        let leans_inward = match heavy {
            Side::Left => self.balance_factor(child) < 0,
            Side::Right => self.balance_factor(child) > 0,
        };
        if leans_inward {
            self.rotate(child, heavy);
            *rotations += 1;
        }

        *rotations += 1;
        self.rotate(node, heavy.opposite())
    }

    /// Rotates `pivot` down towards `side`; its child on the other side takes its place.
    /// Returns the node that took the pivot's place.
    fn rotate(&mut self, pivot: Handle, side: Side) -> Handle {
        let rising_side = side.opposite();
        let rising = self
            .nodes
            .get(pivot)
            .child(rising_side)
            .expect("`RawAvlTree::rotate()` - pivot has no child to rotate up!");
        let inner = self.nodes.get(rising).child(side);
        let parent = self.nodes.get(pivot).parent();

        self.nodes.get_mut(pivot).set_child(rising_side, inner);
        if let Some(inner) = inner {
            self.nodes.get_mut(inner).set_parent(Some(pivot));
        }
        self.replace_child(parent, pivot, Some(rising));
        self.attach(rising, side, pivot);

        // Children before parents.
        self.refresh(pivot);
        self.refresh(rising);

        trace_log!(pivot = pivot.slot(), ?side, "rotation");
        rising
    }

    /// Removes a node with at most one child, splicing that child into its slot.
    fn unlink(&mut self, node: Handle) -> usize {
        let (parent, child) = {
            let n = self.nodes.get(node);
            (n.parent(), n.sole_child())
        };
        self.replace_child(parent, node, child);
        self.nodes.get_mut(node).detach();

        // A lone child promoted to root is already balanced.
        parent.map_or(0, |parent| self.rebalance_upwards(parent))
    }

    /// Moves detached node `new` into the slot of `old`, taking over its links and metrics.
    fn splice(&mut self, old: Handle, new: Handle) {
        let (parent, left, right, height, size) = {
            let o = self.nodes.get(old);
            (o.parent(), o.left(), o.right(), o.height(), o.size())
        };

        self.replace_child(parent, old, Some(new));
        for (side, child) in [(Side::Left, left), (Side::Right, right)] {
            self.nodes.get_mut(new).set_child(side, child);
            if let Some(child) = child {
                self.nodes.get_mut(child).set_parent(Some(new));
            }
        }
        self.nodes.get_mut(new).set_metrics(height, size);
        self.nodes.get_mut(old).detach();
    }

    /// Points `parent`'s link to `old` (or the root slot) at `new`, and `new` back at `parent`.
    fn replace_child(&mut self, parent: Option<Handle>, old: Handle, new: Option<Handle>) {
        match parent {
            None => self.root = new,
            Some(parent) => {
                let side = self.side_of(parent, old);
                self.nodes.get_mut(parent).set_child(side, new);
            }
        }
        if let Some(new) = new {
            self.nodes.get_mut(new).set_parent(parent);
        }
    }

    /// Links `child` under `parent` in both directions.
    fn attach(&mut self, parent: Handle, side: Side, child: Handle) {
        self.nodes.get_mut(parent).set_child(side, Some(child));
        self.nodes.get_mut(child).set_parent(Some(parent));
    }

    /// Makes `node` the sole node of an empty tree.
    fn plant(&mut self, node: AvlNode<V>) {
        debug_assert!(self.root.is_none(), "`RawAvlTree::plant()` - tree is not empty!");
        let handle = self.nodes.insert(node);
        self.root = Some(handle);
        self.min = Some(handle);
        self.max = Some(handle);
    }

    fn side_of(&self, parent: Handle, child: Handle) -> Side {
        let node = self.nodes.get(parent);
        if node.left() == Some(child) {
            Side::Left
        } else {
            debug_assert_eq!(node.right(), Some(child), "`RawAvlTree::side_of()` - not a child!");
            Side::Right
        }
    }

    fn refresh(&mut self, handle: Handle) {
        let (left, right) = {
            let node = self.nodes.get(handle);
            (node.left(), node.right())
        };
        let height = 1 + self.height_of(left).max(self.height_of(right));
        let size = 1 + self.size_of(left) + self.size_of(right);
        self.nodes.get_mut(handle).set_metrics(height, size);
    }

    fn balance_factor(&self, handle: Handle) -> i32 {
        let node = self.nodes.get(handle);
        self.height_of(node.left()) - self.height_of(node.right())
    }

    #[inline]
    fn height_of(&self, handle: Option<Handle>) -> i32 {
        handle.map_or(EMPTY_HEIGHT, |h| self.nodes.get(h).height())
    }

    #[inline]
    fn size_of(&self, handle: Option<Handle>) -> usize {
        handle.map_or(0, |h| self.nodes.get(h).size())
    }
}

impl<V> RawAvlTree<V> {
    /// Descends by key to the matching node or the vacant slot it would occupy.
    fn search(&self, key: i64) -> SearchResult {
        let mut current = self.root;
        let mut slot = None;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            let side = match key.cmp(&node.key()) {
                Ordering::Equal => return SearchResult::Found(handle),
                Ordering::Less => Side::Left,
                Ordering::Greater => Side::Right,
            };
            slot = Some((handle, side));
            current = node.child(side);
        }

        SearchResult::Vacant(slot)
    }

    /// Returns the node holding `key`.
    pub(crate) fn find(&self, key: i64) -> Option<Handle> {
        match self.search(key) {
            SearchResult::Found(handle) => Some(handle),
            SearchResult::Vacant(_) => None,
        }
    }

    /// Returns the 1-based rank of `key`.
    pub(crate) fn rank_of(&self, key: i64) -> Option<usize> {
        let mut current = self.root;
        let mut before = 0;

        while let Some(handle) = current {
            let node = self.nodes.get(handle);
            current = match key.cmp(&node.key()) {
                Ordering::Equal => return Some(before + self.size_of(node.left()) + 1),
                Ordering::Less => node.left(),
                Ordering::Greater => {
                    before += self.size_of(node.left()) + 1;
                    node.right()
                }
            };
        }

        None
    }

    /// Inserts by key order. Returns the number of rotations performed, or `None` if the key
    /// is already present (the tree is left untouched).
    pub(crate) fn insert(&mut self, key: i64, value: V) -> Option<usize> {
        let (parent, side) = match self.search(key) {
            SearchResult::Found(_) => return None,
            SearchResult::Vacant(None) => {
                self.plant(AvlNode::new(key, value));
                return Some(0);
            }
            SearchResult::Vacant(Some(slot)) => slot,
        };

        let node = self.nodes.insert(AvlNode::new(key, value));
        self.attach(parent, side, node);

        if self.min.is_none_or(|min| key < self.nodes.get(min).key()) {
            self.min = Some(node);
        }
        if self.max.is_none_or(|max| key > self.nodes.get(max).key()) {
            self.max = Some(node);
        }

        Some(self.rebalance_upwards(node))
    }

    /// Removes `key`. Returns its value and the number of rotations performed.
    pub(crate) fn remove(&mut self, key: i64) -> Option<(V, usize)> {
        let node = self.find(key)?;
        let (_, value, rotations) = self.remove_node(node);
        Some((value, rotations))
    }
}
