use thiserror::Error;

/// Why a positional list operation was refused.
///
/// Returned by [`TreeList`](crate::TreeList) and [`CircularList`](crate::CircularList); the
/// list is left unchanged whenever one of these is returned.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Error)]
pub enum ListError {
    /// The index is outside the range the operation accepts.
    #[error("index {index} is out of bounds for a list of length {len}")]
    IndexOutOfBounds { index: usize, len: usize },

    /// A bounded list is already holding `capacity` entries.
    #[error("list is full (capacity {capacity})")]
    CapacityExceeded { capacity: usize },
}
