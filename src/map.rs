//! A thread-safe multimap implemented with chained buckets behind a single lock.

use std::borrow::Borrow;
use std::collections::hash_map::RandomState;
use std::fmt::{self, Debug};
use std::hash::{BuildHasher, Hash, Hasher};
use std::iter::FusedIterator;
use std::mem;
use std::vec;

use parking_lot::Mutex;

use crate::error::Error;

/// Number of buckets allocated when no initial capacity is given.
pub(crate) const DEFAULT_CAPACITY: usize = 64;

// Grow when the count of distinct keys reaches 3/4 of the bucket count.
const LOAD_FACTOR_NUM: usize = 3;
const LOAD_FACTOR_DEN: usize = 4;

/// A thread-safe multimap implemented with chained buckets behind a single lock.
///
/// Each distinct key owns one entry, and each entry holds the key's values in
/// insertion order, duplicates included. Every operation takes the container
/// lock for its whole duration, so any number of threads may share a
/// [`SyncMultimap`] by reference and each operation observes a consistent
/// state.
///
/// Keys are passed as `impl Into<Option<K>>`, so call sites can pass a key
/// directly while an absent key (`None`) is reported as
/// [`Error::InvalidKey`] rather than a panic.
///
/// # Examples
///
/// ```
/// use sync_multimap::SyncMultimap;
///
/// let map = SyncMultimap::new();
///
/// map.add("even", 2).unwrap();
/// map.add("even", 4).unwrap();
/// map.add("odd", 1).unwrap();
///
/// assert_eq!(map.len(), 2);
/// assert_eq!(map.get_values("even").unwrap(), [2, 4]);
/// ```
pub struct SyncMultimap<K, V, S = RandomState> {
    pub(crate) hash_builder: S,
    pub(crate) table: Mutex<Table<K, V>>,
}

impl<K, V> SyncMultimap<K, V, RandomState> {
    /// Creates an empty `SyncMultimap` with the default capacity of 64
    /// buckets.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::SyncMultimap;
    ///
    /// let map: SyncMultimap<i32, String> = SyncMultimap::new();
    ///
    /// assert!(map.is_empty());
    /// assert_eq!(map.capacity(), 64);
    /// ```
    #[must_use]
    pub fn new() -> Self {
        Self::with_hasher(RandomState::default())
    }

    /// Creates an empty `SyncMultimap` with the given number of buckets.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::{Error, SyncMultimap};
    ///
    /// let map = SyncMultimap::<i32, i32>::with_capacity(16).unwrap();
    /// assert_eq!(map.capacity(), 16);
    ///
    /// let err = SyncMultimap::<i32, i32>::with_capacity(0).unwrap_err();
    /// assert_eq!(err, Error::InvalidCapacity);
    /// ```
    pub fn with_capacity(capacity: usize) -> Result<Self, Error> {
        Self::with_capacity_and_hasher(capacity, RandomState::default())
    }
}

impl<K, V, S> SyncMultimap<K, V, S> {
    /// Creates an empty `SyncMultimap` with the default capacity, using the
    /// given hash builder to hash keys.
    pub fn with_hasher(hash_builder: S) -> Self {
        SyncMultimap {
            hash_builder,
            table: Mutex::new(Table::with_capacity(DEFAULT_CAPACITY)),
        }
    }

    /// Creates an empty `SyncMultimap` with the given number of buckets,
    /// using the given hash builder to hash keys.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidCapacity`] if `capacity` is zero.
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Result<Self, Error> {
        if capacity == 0 {
            return Err(Error::InvalidCapacity);
        }

        Ok(SyncMultimap {
            hash_builder,
            table: Mutex::new(Table::with_capacity(capacity)),
        })
    }

    /// Returns a reference to the map's [`BuildHasher`].
    pub fn hasher(&self) -> &S {
        &self.hash_builder
    }

    /// Returns the current number of buckets.
    ///
    /// The bucket count doubles whenever the number of distinct keys reaches
    /// three quarters of it.
    pub fn capacity(&self) -> usize {
        self.table.lock().buckets.len()
    }

    /// Returns the number of distinct keys in the map.
    ///
    /// A key with several values still counts once.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::SyncMultimap;
    ///
    /// let map = SyncMultimap::new();
    ///
    /// map.add("a", 1).unwrap();
    /// map.add("a", 2).unwrap();
    ///
    /// assert_eq!(map.len(), 1);
    /// ```
    pub fn len(&self) -> usize {
        self.table.lock().count
    }

    /// Returns `true` if the map contains no keys.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Removes all keys and values, keeping the allocated buckets.
    ///
    /// Counts as a mutation: live iterators observe it as
    /// [`Error::ConcurrentModification`].
    pub fn clear(&self) {
        self.table.lock().clear();
    }

    /// Returns a fail-fast iterator over all key-value pairs.
    ///
    /// The iterator yields one `(key, value)` pair per stored value, cloned
    /// out of the map, and visits each key's values in insertion order. It
    /// does not hold the container lock between calls to `next`; instead it
    /// remembers the map's modification stamp at creation, and the first call
    /// to `next` after any mutation yields
    /// `Err(`[`Error::ConcurrentModification`]`)` and ends the iteration.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::SyncMultimap;
    ///
    /// let map = SyncMultimap::new();
    ///
    /// map.add("a", 1).unwrap();
    /// map.add("a", 2).unwrap();
    ///
    /// let pairs: Result<Vec<_>, _> = map.iter().collect();
    ///
    /// assert_eq!(pairs.unwrap(), [("a", 1), ("a", 2)]);
    /// ```
    ///
    /// Mutating the map while iterating is detected rather than silently
    /// yielding stale pairs:
    ///
    /// ```
    /// use sync_multimap::{Error, SyncMultimap};
    ///
    /// let map = SyncMultimap::new();
    ///
    /// map.add("a", 1).unwrap();
    ///
    /// let mut iter = map.iter();
    /// map.add("b", 2).unwrap();
    ///
    /// assert_eq!(iter.next(), Some(Err(Error::ConcurrentModification)));
    /// assert_eq!(iter.next(), None);
    /// ```
    pub fn iter(&self) -> Iter<'_, K, V, S> {
        let stamp = self.table.lock().mod_count;

        Iter {
            map: self,
            stamp,
            pos: Position::default(),
            done: false,
        }
    }
}

impl<K, V, S> SyncMultimap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    /// Adds a value to the list held by the given key, creating the key if it
    /// is absent.
    ///
    /// Values accumulate per key in insertion order, and the same value may
    /// be added any number of times. If adding would bring the number of
    /// distinct keys to three quarters of the bucket count, the bucket array
    /// doubles first.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::{Error, SyncMultimap};
    ///
    /// let map = SyncMultimap::new();
    ///
    /// map.add("fruits", 1).unwrap();
    /// map.add("fruits", 1).unwrap();
    ///
    /// assert_eq!(map.get_values("fruits").unwrap(), [1, 1]);
    /// assert_eq!(map.add(None, 2), Err(Error::InvalidKey));
    /// ```
    pub fn add(&self, key: impl Into<Option<K>>, value: V) -> Result<(), Error> {
        let key = key.into().ok_or(Error::InvalidKey)?;
        let mut table = self.table.lock();

        table.grow_if_needed(&self.hash_builder);
        table.add(&self.hash_builder, key, value);

        Ok(())
    }

    /// Returns a copy of the values held by the given key, in insertion
    /// order.
    ///
    /// An absent key yields an empty vector. The copy is independent of the
    /// map: mutating one never affects the other.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::SyncMultimap;
    ///
    /// let map = SyncMultimap::new();
    ///
    /// map.add("fruits", 1).unwrap();
    /// map.add("fruits", 2).unwrap();
    ///
    /// assert_eq!(map.get_values("fruits").unwrap(), [1, 2]);
    /// assert_eq!(map.get_values("vegetables").unwrap(), []);
    /// ```
    pub fn get_values<'q, Q>(&self, key: impl Into<Option<&'q Q>>) -> Result<Vec<V>, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        V: Clone,
    {
        let key = key.into().ok_or(Error::InvalidKey)?;

        Ok(self.table.lock().values(&self.hash_builder, key))
    }

    /// Returns `true` if the map holds at least one value for the given key.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is `None`.
    pub fn contains_key<'q, Q>(&self, key: impl Into<Option<&'q Q>>) -> Result<bool, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        let key = key.into().ok_or(Error::InvalidKey)?;

        Ok(self.table.lock().contains(&self.hash_builder, key))
    }

    /// Removes the first occurrence of `value` from the given key's list.
    ///
    /// Returns `Ok(true)` if a value was removed. Removing the last value
    /// removes the key itself. Returns `Ok(false)` and leaves the map
    /// untouched, modification stamp included, if the key is absent or its
    /// list does not contain the value.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::SyncMultimap;
    ///
    /// let map = SyncMultimap::new();
    ///
    /// map.add("fruits", 1).unwrap();
    /// map.add("fruits", 2).unwrap();
    /// map.add("fruits", 3).unwrap();
    ///
    /// assert_eq!(map.remove_value("fruits", &2), Ok(true));
    /// assert_eq!(map.get_values("fruits").unwrap(), [1, 3]);
    /// assert_eq!(map.remove_value("fruits", &4), Ok(false));
    /// ```
    pub fn remove_value<'q, Q>(
        &self,
        key: impl Into<Option<&'q Q>>,
        value: &V,
    ) -> Result<bool, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
        V: PartialEq,
    {
        let key = key.into().ok_or(Error::InvalidKey)?;

        Ok(self
            .table
            .lock()
            .remove_value(&self.hash_builder, key, value))
    }

    /// Removes the given key along with all of its values.
    ///
    /// Returns `Ok(true)` if the key was present, and `Ok(false)` without
    /// touching the map otherwise.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidKey`] if `key` is `None`.
    ///
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::SyncMultimap;
    ///
    /// let map = SyncMultimap::new();
    ///
    /// map.add("fruits", 1).unwrap();
    /// map.add("fruits", 2).unwrap();
    ///
    /// assert_eq!(map.remove_key("fruits"), Ok(true));
    /// assert_eq!(map.remove_key("fruits"), Ok(false));
    /// assert!(map.is_empty());
    /// ```
    pub fn remove_key<'q, Q>(&self, key: impl Into<Option<&'q Q>>) -> Result<bool, Error>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq + 'q,
    {
        let key = key.into().ok_or(Error::InvalidKey)?;

        Ok(self.table.lock().remove_key(&self.hash_builder, key))
    }
}

impl<K, V, S> Default for SyncMultimap<K, V, S>
where
    S: Default,
{
    fn default() -> Self {
        Self::with_hasher(S::default())
    }
}

impl<K, V, S> Clone for SyncMultimap<K, V, S>
where
    K: Clone,
    V: Clone,
    S: Clone,
{
    fn clone(&self) -> Self {
        SyncMultimap {
            hash_builder: self.hash_builder.clone(),
            table: Mutex::new(self.table.lock().clone()),
        }
    }
}

impl<K, V, S> Debug for SyncMultimap<K, V, S>
where
    K: Debug,
    V: Debug,
{
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let table = self.table.lock();

        f.debug_map()
            .entries(
                table
                    .buckets
                    .iter()
                    .flatten()
                    .map(|entry| (&entry.key, &entry.values)),
            )
            .finish()
    }
}

impl<K, V, S> Extend<(K, V)> for SyncMultimap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher,
{
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        let table = self.table.get_mut();

        for (key, value) in iter {
            table.grow_if_needed(&self.hash_builder);
            table.add(&self.hash_builder, key, value);
        }
    }
}

impl<K, V, S> FromIterator<(K, V)> for SyncMultimap<K, V, S>
where
    K: Eq + Hash,
    S: BuildHasher + Default,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut map = Self::with_hasher(S::default());
        map.extend(iter);
        map
    }
}

impl<K, V, const N: usize> From<[(K, V); N]> for SyncMultimap<K, V, RandomState>
where
    K: Eq + Hash,
{
    /// # Examples
    ///
    /// ```
    /// use sync_multimap::SyncMultimap;
    ///
    /// let map = SyncMultimap::from([("a", 1), ("a", 2), ("b", 3)]);
    ///
    /// assert_eq!(map.get_values("a").unwrap(), [1, 2]);
    /// assert_eq!(map.len(), 2);
    /// ```
    fn from(pairs: [(K, V); N]) -> Self {
        pairs.into_iter().collect()
    }
}

impl<'a, K, V, S> IntoIterator for &'a SyncMultimap<K, V, S>
where
    K: Clone,
    V: Clone,
{
    type Item = Result<(K, V), Error>;
    type IntoIter = Iter<'a, K, V, S>;

    fn into_iter(self) -> Iter<'a, K, V, S> {
        self.iter()
    }
}

impl<K, V, S> IntoIterator for SyncMultimap<K, V, S>
where
    K: Clone,
{
    type Item = (K, V);
    type IntoIter = IntoIter<K, V>;

    /// Consumes the map into an iterator over all key-value pairs.
    ///
    /// Unlike [`iter`](SyncMultimap::iter) this cannot observe a concurrent
    /// mutation, so the pairs are yielded directly rather than wrapped in
    /// `Result`.
    fn into_iter(self) -> IntoIter<K, V> {
        let table = self.table.into_inner();

        IntoIter {
            buckets: table.buckets.into_iter(),
            chain: Vec::new().into_iter(),
            current: None,
        }
    }
}

/// One key together with its values, in insertion order.
///
/// A linked entry always holds at least one value; removing the last value
/// unlinks the entry from its chain.
#[derive(Clone)]
pub(crate) struct Entry<K, V> {
    pub(crate) key: K,
    pub(crate) values: Vec<V>,
}

/// The bucket array and its bookkeeping, guarded by the container lock.
#[derive(Clone)]
pub(crate) struct Table<K, V> {
    pub(crate) buckets: Vec<Vec<Entry<K, V>>>,
    pub(crate) count: usize,
    pub(crate) mod_count: u64,
}

impl<K, V> Table<K, V> {
    fn with_capacity(capacity: usize) -> Self {
        Table {
            buckets: (0..capacity).map(|_| Vec::new()).collect(),
            count: 0,
            mod_count: 0,
        }
    }

    fn bucket_index(&self, hash: u64) -> usize {
        (hash % self.buckets.len() as u64) as usize
    }

    /// Linear scan of one bucket's chain by key equality.
    fn find_index<Q>(&self, index: usize, key: &Q) -> Option<usize>
    where
        K: Borrow<Q>,
        Q: ?Sized + Eq,
    {
        self.buckets[index]
            .iter()
            .position(|entry| entry.key.borrow() == key)
    }

    /// Links an entry at the head of its chain.
    fn link(&mut self, index: usize, entry: Entry<K, V>) {
        self.buckets[index].insert(0, entry);
        self.count += 1;
    }

    fn clear(&mut self) {
        for chain in &mut self.buckets {
            chain.clear();
        }

        self.count = 0;
        self.mod_count += 1;
    }

    /// Yields the pair at `pos` and advances the cursor, skipping exhausted
    /// chains and entries.
    ///
    /// Only meaningful while the table is unchanged since the cursor was last
    /// used; the caller checks the modification stamp first.
    fn next_pair(&self, pos: &mut Position) -> Option<(&K, &V)> {
        loop {
            let chain = self.buckets.get(pos.bucket)?;

            let entry = match chain.get(pos.entry) {
                Some(entry) => entry,
                None => {
                    pos.bucket += 1;
                    pos.entry = 0;
                    pos.value = 0;
                    continue;
                }
            };

            match entry.values.get(pos.value) {
                Some(value) => {
                    pos.value += 1;
                    return Some((&entry.key, value));
                }
                None => {
                    pos.entry += 1;
                    pos.value = 0;
                }
            }
        }
    }
}

impl<K, V> Table<K, V>
where
    K: Eq + Hash,
{
    fn add<S>(&mut self, hash_builder: &S, key: K, value: V)
    where
        S: BuildHasher,
    {
        let index = self.bucket_index(make_hash(hash_builder, &key));

        match self.find_index(index, &key) {
            Some(at) => self.buckets[index][at].values.push(value),
            None => self.link(
                index,
                Entry {
                    key,
                    values: vec![value],
                },
            ),
        }

        self.mod_count += 1;
    }

    /// Adds a whole value list at once; a shortcut for repeated
    /// [`add`](Table::add) with the same key.
    pub(crate) fn add_all<S>(&mut self, hash_builder: &S, key: K, mut values: Vec<V>)
    where
        S: BuildHasher,
    {
        if values.is_empty() {
            return;
        }

        let index = self.bucket_index(make_hash(hash_builder, &key));

        match self.find_index(index, &key) {
            Some(at) => self.buckets[index][at].values.append(&mut values),
            None => self.link(index, Entry { key, values }),
        }

        self.mod_count += 1;
    }

    /// Doubles the bucket array if the distinct key count has reached the
    /// load factor. Called before an insert places its key.
    pub(crate) fn grow_if_needed<S>(&mut self, hash_builder: &S)
    where
        S: BuildHasher,
    {
        if self.count * LOAD_FACTOR_DEN >= self.buckets.len() * LOAD_FACTOR_NUM {
            self.resize(hash_builder, self.buckets.len() * 2);
        }
    }

    /// Rebuilds the bucket array at the new capacity, relinking every entry
    /// under its rehashed key. Counts as one mutation.
    fn resize<S>(&mut self, hash_builder: &S, new_capacity: usize)
    where
        S: BuildHasher,
    {
        let old = mem::replace(
            &mut self.buckets,
            (0..new_capacity).map(|_| Vec::new()).collect(),
        );

        self.count = 0;
        self.mod_count += 1;

        for chain in old {
            for entry in chain {
                let index = self.bucket_index(make_hash(hash_builder, &entry.key));
                self.link(index, entry);
            }
        }
    }

    fn values<Q, S>(&self, hash_builder: &S, key: &Q) -> Vec<V>
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        S: BuildHasher,
        V: Clone,
    {
        let index = self.bucket_index(make_hash(hash_builder, key));

        match self.find_index(index, key) {
            Some(at) => self.buckets[index][at].values.clone(),
            None => Vec::new(),
        }
    }

    fn contains<Q, S>(&self, hash_builder: &S, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        S: BuildHasher,
    {
        let index = self.bucket_index(make_hash(hash_builder, key));

        self.find_index(index, key).is_some()
    }

    fn remove_value<Q, S>(&mut self, hash_builder: &S, key: &Q, value: &V) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        S: BuildHasher,
        V: PartialEq,
    {
        let index = self.bucket_index(make_hash(hash_builder, key));

        let at = match self.find_index(index, key) {
            Some(at) => at,
            None => return false,
        };

        let entry = &mut self.buckets[index][at];

        let hit = match entry.values.iter().position(|held| held == value) {
            Some(hit) => hit,
            None => return false,
        };

        entry.values.remove(hit);

        if entry.values.is_empty() {
            self.buckets[index].remove(at);
            self.count -= 1;
        }

        self.mod_count += 1;
        true
    }

    fn remove_key<Q, S>(&mut self, hash_builder: &S, key: &Q) -> bool
    where
        K: Borrow<Q>,
        Q: ?Sized + Hash + Eq,
        S: BuildHasher,
    {
        let index = self.bucket_index(make_hash(hash_builder, key));

        match self.find_index(index, key) {
            Some(at) => {
                self.buckets[index].remove(at);
                self.count -= 1;
                self.mod_count += 1;
                true
            }
            None => false,
        }
    }
}

fn make_hash<T, S>(hash_builder: &S, value: &T) -> u64
where
    T: ?Sized + Hash,
    S: BuildHasher,
{
    let mut state = hash_builder.build_hasher();
    value.hash(&mut state);
    state.finish()
}

/// A cursor into the bucket array: the next value of the next entry of the
/// next bucket to visit.
#[derive(Clone, Copy, Default)]
struct Position {
    bucket: usize,
    entry: usize,
    value: usize,
}

/// A fail-fast iterator over the key-value pairs of a [`SyncMultimap`].
///
/// Created by [`SyncMultimap::iter`]. Each call to `next` briefly takes the
/// container lock, checks the modification stamp captured at creation, and
/// clones out the next pair. A detected mutation is yielded once as
/// `Err(`[`Error::ConcurrentModification`]`)`, after which the iterator is
/// finished.
pub struct Iter<'a, K, V, S = RandomState> {
    map: &'a SyncMultimap<K, V, S>,
    stamp: u64,
    pos: Position,
    done: bool,
}

impl<K, V, S> Iterator for Iter<'_, K, V, S>
where
    K: Clone,
    V: Clone,
{
    type Item = Result<(K, V), Error>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }

        let table = self.map.table.lock();

        if table.mod_count != self.stamp {
            self.done = true;
            return Some(Err(Error::ConcurrentModification));
        }

        match table.next_pair(&mut self.pos) {
            Some((key, value)) => Some(Ok((key.clone(), value.clone()))),
            None => {
                self.done = true;
                None
            }
        }
    }
}

impl<K, V, S> FusedIterator for Iter<'_, K, V, S>
where
    K: Clone,
    V: Clone,
{
}

impl<K, V, S> Clone for Iter<'_, K, V, S> {
    fn clone(&self) -> Self {
        Iter {
            map: self.map,
            stamp: self.stamp,
            pos: self.pos,
            done: self.done,
        }
    }
}

impl<K, V, S> Debug for Iter<'_, K, V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("stamp", &self.stamp)
            .field("done", &self.done)
            .finish_non_exhaustive()
    }
}

/// An owning iterator over the key-value pairs of a [`SyncMultimap`].
///
/// Created by consuming a map with `into_iter`. Keys are cloned once per
/// value; values are moved out.
pub struct IntoIter<K, V> {
    buckets: vec::IntoIter<Vec<Entry<K, V>>>,
    chain: vec::IntoIter<Entry<K, V>>,
    current: Option<(K, vec::IntoIter<V>)>,
}

impl<K, V> Iterator for IntoIter<K, V>
where
    K: Clone,
{
    type Item = (K, V);

    fn next(&mut self) -> Option<(K, V)> {
        loop {
            if let Some((key, values)) = &mut self.current {
                match values.next() {
                    Some(value) => return Some((key.clone(), value)),
                    None => self.current = None,
                }
            } else if let Some(entry) = self.chain.next() {
                self.current = Some((entry.key, entry.values.into_iter()));
            } else {
                match self.buckets.next() {
                    Some(chain) => self.chain = chain.into_iter(),
                    None => return None,
                }
            }
        }
    }
}

impl<K, V> FusedIterator for IntoIter<K, V> where K: Clone {}

impl<K, V> Debug for IntoIter<K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("IntoIter").finish_non_exhaustive()
    }
}
