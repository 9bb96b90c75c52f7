use core::fmt;
use core::ops::Index;

use crate::avl_tree::{AvlTree, Iter};
use crate::error::ListError;
use crate::tracing_helpers::debug_log;

/// A sequence of `(key, value)` entries with O(log n) access, insertion and removal by
/// position.
///
/// Entries live in an [`AvlTree`] used positionally: list index `i` is tree rank `i + 1`.
/// Keys are carried along with each value but never compared, so duplicates are fine.
///
/// Every index coming from the caller is bounds-checked here; out-of-range requests are
/// reported as [`ListError::IndexOutOfBounds`] and leave the list untouched.
///
/// # Examples
///
/// ```
/// use avl_ost::{ListError, TreeList};
///
/// let mut list = TreeList::new();
/// list.insert(0, 0, "v0")?;
/// list.insert(1, 1, "v1")?;
/// list.insert(0, 2, "v2")?;
/// assert_eq!(list.iter().map(|(_, v)| *v).collect::<Vec<_>>(), ["v2", "v0", "v1"]);
///
/// assert_eq!(list.delete(1)?, (0, "v0"));
/// assert_eq!(list.len(), 2);
/// assert_eq!(list.retrieve(1), Some(&"v1"));
///
/// assert_eq!(list.delete(2), Err(ListError::IndexOutOfBounds { index: 2, len: 2 }));
/// # Ok::<(), ListError>(())
/// ```
#[derive(Clone)]
pub struct TreeList<V> {
    tree: AvlTree<V>,
}

impl<V> TreeList<V> {
    /// Makes a new, empty `TreeList`.
    #[must_use]
    pub const fn new() -> Self {
        TreeList { tree: AvlTree::new() }
    }

    /// Returns the number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tree.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.tree.is_empty()
    }

    /// Returns the value at `index`, or `None` if `index >= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    #[must_use]
    pub fn retrieve(&self, index: usize) -> Option<&V> {
        self.retrieve_entry(index).map(|(_, value)| value)
    }

    /// Returns the key and value at `index`, or `None` if `index >= len`.
    #[must_use]
    pub fn retrieve_entry(&self, index: usize) -> Option<(i64, &V)> {
        if index >= self.len() {
            return None;
        }
        self.tree.select_entry_by_rank(index + 1)
    }

    /// Inserts `(key, value)` at `index`, shifting later entries back by one.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfBounds`] if `index > len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn insert(&mut self, index: usize, key: i64, value: V) -> Result<(), ListError> {
        let len = self.len();
        if index > len {
            debug_log!(index, len, "TreeList::insert rejected");
            return Err(ListError::IndexOutOfBounds { index, len });
        }
        self.tree.insert_by_index(index, key, value);
        Ok(())
    }

    /// Removes the entry at `index`, shifting later entries forward by one.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfBounds`] if `index >= len`.
    ///
    /// # Complexity
    ///
    /// O(log n)
    pub fn delete(&mut self, index: usize) -> Result<(i64, V), ListError> {
        let len = self.len();
        if index >= len {
            debug_log!(index, len, "TreeList::delete rejected");
            return Err(ListError::IndexOutOfBounds { index, len });
        }
        let (key, value, _) = self.tree.delete_by_index(index);
        Ok((key, value))
    }

    /// Removes every entry.
    pub fn clear(&mut self) {
        self.tree.clear();
    }

    /// Gets an iterator over `(key, &value)` entries in list order.
    pub fn iter(&self) -> Iter<'_, V> {
        self.tree.iter()
    }
}

impl<V> Default for TreeList<V> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: fmt::Debug> fmt::Debug for TreeList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(_, value)| value)).finish()
    }
}

/// Indexes into the list by position.
///
/// # Panics
///
/// Panics if `index >= len`.
impl<V> Index<usize> for TreeList<V> {
    type Output = V;

    fn index(&self, index: usize) -> &Self::Output {
        self.retrieve(index).expect("index out of bounds")
    }
}

impl<'a, V> IntoIterator for &'a TreeList<V> {
    type Item = (i64, &'a V);
    type IntoIter = Iter<'a, V>;

    fn into_iter(self) -> Iter<'a, V> {
        self.iter()
    }
}
