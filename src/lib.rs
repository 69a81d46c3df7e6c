//! A thread-safe multimap mapping each key to a list of values.
//!
//! ---
//!
//! [`SyncMultimap`] is a [multimap](https://en.wikipedia.org/wiki/Multimap)
//! implementation which maps keys to an ordered collection of values,
//! duplicates included:
//!  - `a -> 1, 2, 2`
//!  - `b -> 3`
//!
//! Entries are stored in chained hash buckets, and the whole container sits
//! behind a single lock, so a map shared by reference across threads stays
//! consistent: every operation sees either all of another operation's effect
//! or none of it.
//!
//! ---
//!
//! Iteration is *fail-fast*. An iterator never blocks writers; instead it
//! remembers the map's modification stamp when created, and if the map is
//! mutated while the iterator is live, the next step reports
//! [`Error::ConcurrentModification`] rather than yielding pairs from a state
//! that no longer exists:
//!
//! ```
//! use sync_multimap::{Error, SyncMultimap};
//!
//! let map = SyncMultimap::new();
//! map.add("a", 1).unwrap();
//!
//! let mut iter = map.iter();
//! map.add("b", 2).unwrap();
//!
//! assert_eq!(iter.next(), Some(Err(Error::ConcurrentModification)));
//! ```
//!
//! ---
//!
//! Failures are ordinary values, not panics: an absent key, a zero capacity,
//! or a detected concurrent modification each surface as a variant of
//! [`Error`].

/// Multimap implementation with chained hash buckets behind a single lock.
pub mod map;

mod error;

#[cfg(feature = "serde")]
mod serde;

pub use error::Error;
pub use map::SyncMultimap;
