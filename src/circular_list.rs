use core::fmt;
use core::iter::FusedIterator;

use alloc::vec::Vec;

use crate::error::ListError;
use crate::tracing_helpers::debug_log;

/// A fixed-capacity sequence of `(key, value)` entries stored in a circular array.
///
/// Retrieval is O(1). Insertion and removal shift whichever side of the index is shorter,
/// so they cost O(min(index, len - index)). Nothing is ever reallocated: once `capacity`
/// entries are stored, inserts fail with [`ListError::CapacityExceeded`].
///
/// # Examples
///
/// ```
/// use avl_ost::{CircularList, ListError};
///
/// let mut list = CircularList::with_capacity(2);
/// list.insert(0, 1, "b")?;
/// list.insert(0, 0, "a")?;
/// assert_eq!(list.retrieve(0), Some(&"a"));
/// assert_eq!(list.insert(2, 2, "c"), Err(ListError::CapacityExceeded { capacity: 2 }));
///
/// assert_eq!(list.delete(0)?, (0, "a"));
/// assert_eq!(list.retrieve_entry(0), Some((1, &"b")));
/// # Ok::<(), ListError>(())
/// ```
#[derive(Clone)]
pub struct CircularList<V> {
    slots: Vec<Option<(i64, V)>>,
    // Physical slot of logical index 0.
    start: usize,
    len: usize,
}

impl<V> CircularList<V> {
    /// Creates an empty list that can hold up to `capacity` entries.
    ///
    /// A capacity of zero is allowed; such a list rejects every insert.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        CircularList {
            slots: core::iter::repeat_with(|| None).take(capacity).collect(),
            start: 0,
            len: 0,
        }
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.slots.len()
    }

    /// Returns the number of entries.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[must_use]
    pub fn is_full(&self) -> bool {
        self.len == self.capacity()
    }

    /// Returns the value at `index`, or `None` if `index >= len`.
    #[must_use]
    pub fn retrieve(&self, index: usize) -> Option<&V> {
        self.retrieve_entry(index).map(|(_, value)| value)
    }

    /// Returns the key and value at `index`, or `None` if `index >= len`.
    #[must_use]
    pub fn retrieve_entry(&self, index: usize) -> Option<(i64, &V)> {
        if index >= self.len {
            return None;
        }
        self.slots[self.physical(index)].as_ref().map(|(key, value)| (*key, value))
    }

    /// Inserts `(key, value)` at `index`, shifting the shorter side by one slot.
    ///
    /// # Errors
    ///
    /// - [`ListError::IndexOutOfBounds`] if `index > len`.
    /// - [`ListError::CapacityExceeded`] if the list is full.
    pub fn insert(&mut self, index: usize, key: i64, value: V) -> Result<(), ListError> {
        if index > self.len {
            debug_log!(index, len = self.len, "CircularList::insert rejected");
            return Err(ListError::IndexOutOfBounds { index, len: self.len });
        }
        if self.is_full() {
            debug_log!(capacity = self.capacity(), "CircularList::insert rejected: full");
            return Err(ListError::CapacityExceeded {
                capacity: self.capacity(),
            });
        }

        if index < self.len - index {
            // Open the gap by moving the front entries one slot back.
            self.start = self.wrap(self.start + self.capacity() - 1);
            for i in 0..index {
                self.shift(i + 1, i);
            }
        } else {
            for i in (index..self.len).rev() {
                self.shift(i, i + 1);
            }
        }

        let slot = self.physical(index);
        self.slots[slot] = Some((key, value));
        self.len += 1;
        Ok(())
    }

    /// Removes the entry at `index`, closing the gap from the shorter side.
    ///
    /// # Errors
    ///
    /// [`ListError::IndexOutOfBounds`] if `index >= len`.
    pub fn delete(&mut self, index: usize) -> Result<(i64, V), ListError> {
        if index >= self.len {
            debug_log!(index, len = self.len, "CircularList::delete rejected");
            return Err(ListError::IndexOutOfBounds { index, len: self.len });
        }

        let slot = self.physical(index);
        let removed = self.slots[slot]
            .take()
            .expect("`CircularList::delete()` - occupied slot is empty!");

        if index < self.len - 1 - index {
            for i in (0..index).rev() {
                self.shift(i, i + 1);
            }
            self.start = self.wrap(self.start + 1);
        } else {
            for i in index..self.len - 1 {
                self.shift(i + 1, i);
            }
        }

        self.len -= 1;
        Ok(removed)
    }

    /// Removes every entry, keeping the capacity.
    pub fn clear(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
        self.start = 0;
        self.len = 0;
    }

    /// Gets an iterator over `(key, &value)` entries in list order.
    pub fn iter(&self) -> CircularIter<'_, V> {
        CircularIter { list: self, index: 0 }
    }

    /// Moves the entry at logical index `from` into logical index `to`.
    fn shift(&mut self, from: usize, to: usize) {
        let from = self.physical(from);
        let to = self.physical(to);
        let entry = self.slots[from].take();
        self.slots[to] = entry;
    }

    #[inline]
    fn physical(&self, index: usize) -> usize {
        self.wrap(self.start + index)
    }

    #[inline]
    fn wrap(&self, slot: usize) -> usize {
        slot % self.capacity()
    }
}

impl<V: fmt::Debug> fmt::Debug for CircularList<V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_list().entries(self.iter().map(|(_, value)| value)).finish()
    }
}

impl<'a, V> IntoIterator for &'a CircularList<V> {
    type Item = (i64, &'a V);
    type IntoIter = CircularIter<'a, V>;

    fn into_iter(self) -> CircularIter<'a, V> {
        self.iter()
    }
}

/// An iterator over the entries of a [`CircularList`], front to back.
pub struct CircularIter<'a, V> {
    list: &'a CircularList<V>,
    index: usize,
}

impl<'a, V> Iterator for CircularIter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        let entry = self.list.retrieve_entry(self.index)?;
        self.index += 1;
        Some(entry)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        let remaining = self.list.len() - self.index;
        (remaining, Some(remaining))
    }
}

impl<V> ExactSizeIterator for CircularIter<'_, V> {}

impl<V> FusedIterator for CircularIter<'_, V> {}
