use std::error;
use std::fmt;

/// Errors surfaced by [`SyncMultimap`](crate::SyncMultimap) operations.
///
/// Every failure is a normal, matchable condition describing either misuse or
/// a detected race; nothing is retried internally, and a failed operation
/// leaves the container untouched.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// An absent key (`None`) was passed to a keyed operation.
    InvalidKey,
    /// A zero initial capacity was requested at construction.
    InvalidCapacity,
    /// The container was mutated while an iterator was live; reported by the
    /// next call to [`Iter::next`](crate::map::Iter), never at creation.
    ConcurrentModification,
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidKey => write!(f, "key must be present"),
            Error::InvalidCapacity => write!(f, "initial capacity must be positive"),
            Error::ConcurrentModification => {
                write!(f, "multimap was modified during iteration")
            }
        }
    }
}

impl error::Error for Error {}
