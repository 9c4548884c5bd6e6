use alloc::boxed::Box;
use alloc::vec::Vec;
use core::fmt;
use core::fmt::Debug;
use core::hash::BuildHasher;
use core::mem;

use crate::DefaultHashBuilder;

/// Capacity hint used when none is given.
pub(crate) const DEFAULT_CAPACITY: usize = 16;

/// Load factor used when none is given.
pub(crate) const DEFAULT_LOAD_FACTOR: f32 = 0.75;

/// Largest bucket array the map will ever allocate. Once this is reached the
/// map stops doubling and chains simply keep growing.
pub(crate) const MAX_CAPACITY: usize = 1 << 30;

/// Error returned by the fallible constructors when the requested load factor
/// is not a positive, non-NaN number.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InvalidLoadFactor {
    /// The rejected load factor value.
    pub load_factor: f32,
}

impl fmt::Display for InvalidLoadFactor {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "load factor must be a positive number, got {}",
            self.load_factor
        )
    }
}

impl core::error::Error for InvalidLoadFactor {}

/// A single key-value association in a bucket chain. The bucket slot owns the
/// head node and every node owns its successor, so a chain is torn down by
/// walking it, not by graph traversal.
struct Node<V> {
    /// Hash of `key`, computed once at insertion. Growth relinks nodes using
    /// this value so the hash function never runs during a resize.
    hash: u64,
    key: i64,
    value: V,
    next: Option<Box<Node<V>>>,
}

/// Truncates `capacity * load_factor` to the element count that triggers the
/// next doubling. Saturates at one past [`MAX_CAPACITY`] so oversized load
/// factors (including infinity) disable growth instead of overflowing.
fn grow_threshold(capacity: usize, load_factor: f32) -> usize {
    let limit = capacity as f64 * f64::from(load_factor);
    limit.min((MAX_CAPACITY + 1) as f64) as usize
}

/// A hash map keyed by `i64`, using separate chaining and the classic
/// load-factor/threshold growth schedule.
///
/// Keys are hashed through a configurable [`BuildHasher`] and stored inline
/// in chain nodes together with their cached hash, so growth relinks existing
/// nodes into the doubled bucket array without rehashing or reallocating
/// them. The bucket array is allocated lazily on the first insertion; a map
/// that is never written to never allocates.
///
/// The bucket count is always a power of two, capped at 2^30 buckets. At the
/// cap the map stops growing and degrades to longer chains rather than
/// failing.
///
/// # Examples
///
/// ```rust
/// # #[cfg(feature = "foldhash")]
/// # {
/// use long_map::LongMap;
///
/// let mut map: LongMap<&str> = LongMap::new();
/// map.insert(1, "one");
/// map.insert(-2, "minus two");
///
/// assert_eq!(map.get(1), Some(&"one"));
/// assert_eq!(map.len(), 2);
/// # }
/// ```
pub struct LongMap<V, S = DefaultHashBuilder> {
    /// Bucket heads. Empty until the first insertion, a power of two after.
    buckets: Vec<Option<Box<Node<V>>>>,
    hash_builder: S,
    load_factor: f32,
    /// Element count at which the next insertion into an occupied bucket
    /// doubles the bucket array. Holds the caller's capacity hint until the
    /// bucket array is allocated.
    threshold: usize,
    len: usize,
}

impl<V: Debug, S> Debug for LongMap<V, S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut map = f.debug_map();
        for (key, value) in self.iter() {
            map.entry(&key, value);
        }
        map.finish()
    }
}

impl<V, S: BuildHasher + Default> Default for LongMap<V, S> {
    fn default() -> Self {
        Self::new()
    }
}

impl<V: Clone, S: Clone> Clone for LongMap<V, S> {
    fn clone(&self) -> Self {
        let mut buckets: Vec<Option<Box<Node<V>>>> = Vec::new();
        buckets.resize_with(self.buckets.len(), || None);

        // Chains are rebuilt front to back with a tail cursor so the clone
        // keeps the source's layout and deep chains cannot recurse.
        for (slot, head) in buckets.iter_mut().zip(&self.buckets) {
            let mut tail = slot;
            let mut source = head.as_deref();
            while let Some(node) = source {
                let copied = Box::new(Node {
                    hash: node.hash,
                    key: node.key,
                    value: node.value.clone(),
                    next: None,
                });
                tail = &mut tail.insert(copied).next;
                source = node.next.as_deref();
            }
        }

        LongMap {
            buckets,
            hash_builder: self.hash_builder.clone(),
            load_factor: self.load_factor,
            threshold: self.threshold,
            len: self.len,
        }
    }
}

impl<V, S> Drop for LongMap<V, S> {
    fn drop(&mut self) {
        self.clear();
    }
}

impl<V: PartialEq, S: BuildHasher> PartialEq for LongMap<V, S> {
    fn eq(&self, other: &Self) -> bool {
        if self.len() != other.len() {
            return false;
        }
        self.iter().all(|(key, value)| other.get(key) == Some(value))
    }
}

impl<V: Eq, S: BuildHasher> Eq for LongMap<V, S> {}

impl<V, S: BuildHasher + Default> LongMap<V, S> {
    /// Creates an empty map with the default capacity hint (16) and load
    /// factor (0.75), using the default hasher builder.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let map: LongMap<&str> = LongMap::new();
    /// assert!(map.is_empty());
    /// # }
    /// ```
    pub fn new() -> Self {
        Self::with_hasher(S::default())
    }

    /// Creates an empty map sized for `capacity` elements before the first
    /// growth, using the default load factor and hasher builder.
    ///
    /// Nothing is allocated until the first insertion; the hint only decides
    /// how large the initial bucket array will be. Hints above 2^30 are
    /// clamped.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let map: LongMap<u32> = LongMap::with_capacity(100);
    /// assert!(map.is_empty());
    /// # }
    /// ```
    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_hasher(capacity, S::default())
    }

    /// Creates an empty map with the given capacity hint and load factor,
    /// using the default hasher builder.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLoadFactor`] if `load_factor` is not a positive,
    /// non-NaN number.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let map: LongMap<&str> = LongMap::with_load_factor(32, 0.5).unwrap();
    /// assert_eq!(map.load_factor(), 0.5);
    ///
    /// assert!(LongMap::<&str>::with_load_factor(32, 0.0).is_err());
    /// assert!(LongMap::<&str>::with_load_factor(32, f32::NAN).is_err());
    /// # }
    /// ```
    pub fn with_load_factor(capacity: usize, load_factor: f32) -> Result<Self, InvalidLoadFactor> {
        Self::with_load_factor_and_hasher(capacity, load_factor, S::default())
    }
}

impl<V, S: BuildHasher> LongMap<V, S> {
    /// Creates an empty map with the default capacity hint and load factor,
    /// using `hash_builder` to hash keys.
    ///
    /// The builder is fixed for the map's lifetime, so every key hashes to
    /// the same value for as long as the map exists.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use long_map::LongMap;
    ///
    /// let map: LongMap<&str, _> = LongMap::with_hasher(RandomState::new());
    /// assert!(map.is_empty());
    /// # }
    /// ```
    pub fn with_hasher(hash_builder: S) -> Self {
        Self::with_capacity_and_hasher(DEFAULT_CAPACITY, hash_builder)
    }

    /// Creates an empty map with the given capacity hint, the default load
    /// factor, and `hash_builder` to hash keys.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "std")]
    /// # {
    /// use std::collections::hash_map::RandomState;
    ///
    /// use long_map::LongMap;
    ///
    /// let map: LongMap<&str, _> = LongMap::with_capacity_and_hasher(64, RandomState::new());
    /// assert!(map.is_empty());
    /// # }
    /// ```
    pub fn with_capacity_and_hasher(capacity: usize, hash_builder: S) -> Self {
        LongMap {
            buckets: Vec::new(),
            hash_builder,
            load_factor: DEFAULT_LOAD_FACTOR,
            threshold: capacity.min(MAX_CAPACITY),
            len: 0,
        }
    }

    /// Creates an empty map with the given capacity hint and load factor,
    /// using `hash_builder` to hash keys.
    ///
    /// The load factor is the target ratio of elements to buckets before a
    /// growth is triggered. Values above 1.0 are allowed and trade lookup
    /// time for memory; an infinite load factor disables growth entirely.
    ///
    /// # Errors
    ///
    /// Returns [`InvalidLoadFactor`] if `load_factor` is not a positive,
    /// non-NaN number.
    pub fn with_load_factor_and_hasher(
        capacity: usize,
        load_factor: f32,
        hash_builder: S,
    ) -> Result<Self, InvalidLoadFactor> {
        if load_factor <= 0.0 || load_factor.is_nan() {
            return Err(InvalidLoadFactor { load_factor });
        }

        Ok(LongMap {
            buckets: Vec::new(),
            hash_builder,
            load_factor,
            threshold: capacity.min(MAX_CAPACITY),
            len: 0,
        })
    }

    #[inline]
    fn hash_key(&self, key: i64) -> u64 {
        self.hash_builder.hash_one(key)
    }

    /// Inserts a key-value pair into the map.
    ///
    /// If the map did not have this key present, `None` is returned. If it
    /// did, the value is replaced in place and the old value is returned; the
    /// chain structure is left untouched.
    ///
    /// Inserting a new key may double the bucket array: growth happens when
    /// the map is at or above its threshold *and* the target bucket already
    /// holds a chain. A full relink of existing nodes is O(len).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// assert_eq!(map.insert(37, "a"), None);
    /// assert_eq!(map.insert(37, "b"), Some("a"));
    /// assert_eq!(map.get(37), Some(&"b"));
    /// # }
    /// ```
    pub fn insert(&mut self, key: i64, value: V) -> Option<V> {
        let hash = self.hash_key(key);
        if let Some(node) = self.find_node_mut(hash, key) {
            return Some(mem::replace(&mut node.value, value));
        }

        self.insert_unique(hash, key, value);
        None
    }

    /// Returns a reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.get(1), Some(&"a"));
    /// assert_eq!(map.get(2), None);
    /// # }
    /// ```
    pub fn get(&self, key: i64) -> Option<&V> {
        let hash = self.hash_key(key);
        self.find_node(hash, key).map(|node| &node.value)
    }

    /// Returns a mutable reference to the value stored for `key`.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// if let Some(value) = map.get_mut(1) {
    ///     *value = "b";
    /// }
    /// assert_eq!(map.get(1), Some(&"b"));
    /// # }
    /// ```
    pub fn get_mut(&mut self, key: i64) -> Option<&mut V> {
        let hash = self.hash_key(key);
        self.find_node_mut(hash, key).map(|node| &mut node.value)
    }

    /// Returns `true` if the map contains `key`.
    ///
    /// This is an existence check on the key, so it distinguishes a missing
    /// key from a stored value that merely looks absent (for example a stored
    /// `None` when `V` is an `Option`).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_key(1));
    /// assert!(!map.contains_key(2));
    /// # }
    /// ```
    pub fn contains_key(&self, key: i64) -> bool {
        let hash = self.hash_key(key);
        self.find_node(hash, key).is_some()
    }

    /// Removes `key` from the map, returning its value if it was present.
    ///
    /// The bucket array never shrinks; removal only splices the node out of
    /// its chain.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// assert_eq!(map.remove(1), Some("a"));
    /// assert_eq!(map.remove(1), None);
    /// # }
    /// ```
    pub fn remove(&mut self, key: i64) -> Option<V> {
        let hash = self.hash_key(key);
        self.remove_hashed(hash, key)
    }

    /// Gets the entry for `key` for in-place manipulation.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.entry(1).or_insert("a");
    /// map.entry(1).and_modify(|v| *v = "b");
    ///
    /// assert_eq!(map.get(1), Some(&"b"));
    /// # }
    /// ```
    pub fn entry(&mut self, key: i64) -> Entry<'_, V, S> {
        let hash = self.hash_key(key);
        if self.find_node(hash, key).is_some() {
            Entry::Occupied(OccupiedEntry {
                map: self,
                key,
                hash,
            })
        } else {
            Entry::Vacant(VacantEntry {
                map: self,
                key,
                hash,
            })
        }
    }
}

impl<V, S> LongMap<V, S> {
    /// Returns the number of elements in the map.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// assert_eq!(map.len(), 0);
    /// map.insert(1, "a");
    /// assert_eq!(map.len(), 1);
    /// # }
    /// ```
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns `true` if the map contains no elements.
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Returns the number of elements the map holds before the next growth.
    ///
    /// Before the first insertion this reports what the initial bucket array
    /// will support; once the map has stopped growing (at the bucket cap) it
    /// reports `usize::MAX`.
    pub fn capacity(&self) -> usize {
        if self.buckets.is_empty() {
            grow_threshold(self.threshold.max(1).next_power_of_two(), self.load_factor)
        } else {
            self.threshold
        }
    }

    /// Returns the load factor the map was constructed with.
    pub fn load_factor(&self) -> f32 {
        self.load_factor
    }

    /// Returns `true` if the map contains at least one entry with the given
    /// value.
    ///
    /// This is a linear scan over every chain. Stored values that are
    /// themselves `Option`s compare by ordinary equality, so scanning for an
    /// absent marker value works like any other lookup.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// assert!(map.contains_value(&"a"));
    /// assert!(!map.contains_value(&"b"));
    /// # }
    /// ```
    pub fn contains_value(&self, value: &V) -> bool
    where
        V: PartialEq,
    {
        self.values().any(|candidate| candidate == value)
    }

    /// Returns an iterator over the key-value pairs of the map.
    ///
    /// Pairs are yielded bucket by bucket and chain by chain. The order is
    /// deterministic for a given internal layout but otherwise unspecified;
    /// it changes when the map grows.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// for (key, value) in map.iter() {
    ///     println!("{key}: {value}");
    /// }
    /// # }
    /// ```
    pub fn iter(&self) -> Iter<'_, V> {
        Iter {
            buckets: self.buckets.iter(),
            node: None,
            remaining: self.len,
        }
    }

    /// Returns an iterator over the keys of the map, in the same order as
    /// [`iter`](LongMap::iter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let keys: Vec<i64> = map.keys().collect();
    /// assert_eq!(keys.len(), 2);
    /// # }
    /// ```
    pub fn keys(&self) -> Keys<'_, V> {
        Keys { inner: self.iter() }
    }

    /// Returns an iterator over the values of the map, in the same order as
    /// [`iter`](LongMap::iter).
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let values: Vec<&&str> = map.values().collect();
    /// assert_eq!(values.len(), 2);
    /// # }
    /// ```
    pub fn values(&self) -> Values<'_, V> {
        Values { inner: self.iter() }
    }

    /// Returns an iterator that removes and yields every key-value pair.
    ///
    /// The map is empty once the iterator is exhausted or dropped; the
    /// bucket array is kept.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// map.insert(2, "b");
    ///
    /// let pairs: Vec<(i64, &str)> = map.drain().collect();
    /// assert_eq!(pairs.len(), 2);
    /// assert!(map.is_empty());
    /// # }
    /// ```
    pub fn drain(&mut self) -> Drain<'_, V> {
        Drain {
            buckets: self.buckets.iter_mut(),
            node: None,
            len: &mut self.len,
        }
    }

    /// Removes every element without shrinking the bucket array.
    ///
    /// # Examples
    ///
    /// ```rust
    /// # #[cfg(feature = "foldhash")]
    /// # {
    /// use long_map::LongMap;
    ///
    /// let mut map: LongMap<&str> = LongMap::new();
    /// map.insert(1, "a");
    /// map.clear();
    /// assert!(map.is_empty());
    /// assert_eq!(map.get(1), None);
    /// # }
    /// ```
    pub fn clear(&mut self) {
        // Chains are unlinked node by node so dropping a deep chain cannot
        // overflow the stack.
        for head in &mut self.buckets {
            let mut chain = head.take();
            while let Some(mut node) = chain {
                chain = node.next.take();
            }
        }
        self.len = 0;
    }

    /// Index of the bucket `hash` falls into. Callers ensure the bucket
    /// array is allocated.
    #[inline]
    fn bucket_index(&self, hash: u64) -> usize {
        debug_assert!(!self.buckets.is_empty());
        hash as usize & (self.buckets.len() - 1)
    }

    fn find_node(&self, hash: u64, key: i64) -> Option<&Node<V>> {
        if self.len == 0 {
            return None;
        }

        let mut cursor = self.buckets[self.bucket_index(hash)].as_deref();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(node);
            }
            cursor = node.next.as_deref();
        }

        None
    }

    fn find_node_mut(&mut self, hash: u64, key: i64) -> Option<&mut Node<V>> {
        if self.len == 0 {
            return None;
        }

        let index = self.bucket_index(hash);
        let mut cursor = self.buckets[index].as_deref_mut();
        while let Some(node) = cursor {
            if node.key == key {
                return Some(node);
            }
            cursor = node.next.as_deref_mut();
        }

        None
    }

    /// Prepends a node for a key that is not in the map, growing first if the
    /// map is at threshold and the target bucket is occupied.
    fn insert_unique(&mut self, hash: u64, key: i64, value: V) -> &mut V {
        if self.buckets.is_empty() {
            self.allocate_buckets();
        }

        let mut index = self.bucket_index(hash);
        if self.len >= self.threshold && self.buckets[index].is_some() {
            let doubled = self.buckets.len() * 2;
            self.resize(doubled);
            index = self.bucket_index(hash);
        }

        let next = self.buckets[index].take();
        self.len += 1;
        let node = Box::new(Node {
            hash,
            key,
            value,
            next,
        });
        &mut self.buckets[index].insert(node).value
    }

    fn remove_hashed(&mut self, hash: u64, key: i64) -> Option<V> {
        if self.len == 0 {
            return None;
        }

        let index = self.bucket_index(hash);

        // The head of the chain is unlinked by replacing the bucket slot.
        if self.buckets[index].as_ref().is_some_and(|node| node.key == key) {
            let mut node = self.buckets[index].take()?;
            self.buckets[index] = node.next.take();
            self.len -= 1;
            return Some(node.value);
        }

        // Interior nodes are spliced out through their predecessor.
        let mut prev = self.buckets[index].as_deref_mut()?;
        while prev.next.is_some() {
            if prev.next.as_deref().is_some_and(|node| node.key == key) {
                let mut node = prev.next.take()?;
                prev.next = node.next.take();
                self.len -= 1;
                return Some(node.value);
            }
            prev = prev.next.as_deref_mut()?;
        }

        None
    }

    /// First-insertion allocation: the capacity hint recorded in `threshold`
    /// is rounded up to a power of two (at least 1) and the real threshold
    /// takes over.
    fn allocate_buckets(&mut self) {
        let capacity = self.threshold.max(1).next_power_of_two();
        self.buckets.resize_with(capacity, || None);
        self.threshold = grow_threshold(capacity, self.load_factor);
    }

    /// Replaces the bucket array with one of `new_capacity` slots and relinks
    /// every node into it by cached hash, in one pass. Nodes are moved, never
    /// reallocated. At the bucket cap the map stops growing for good.
    fn resize(&mut self, new_capacity: usize) {
        if self.buckets.len() == MAX_CAPACITY {
            self.threshold = usize::MAX;
            return;
        }

        let mut buckets: Vec<Option<Box<Node<V>>>> = Vec::new();
        buckets.resize_with(new_capacity, || None);

        let mask = new_capacity - 1;
        for head in &mut self.buckets {
            let mut chain = head.take();
            while let Some(mut node) = chain {
                chain = node.next.take();
                let index = node.hash as usize & mask;
                node.next = buckets[index].take();
                buckets[index] = Some(node);
            }
        }

        self.buckets = buckets;
        self.threshold = grow_threshold(new_capacity, self.load_factor);
    }
}

/// A view into a single entry in the map, which may either be vacant or
/// occupied.
///
/// This enum is constructed from the [`entry`] method on [`LongMap`].
///
/// [`entry`]: LongMap::entry
pub enum Entry<'a, V, S = DefaultHashBuilder> {
    /// A vacant entry.
    Vacant(VacantEntry<'a, V, S>),
    /// An occupied entry.
    Occupied(OccupiedEntry<'a, V, S>),
}

impl<'a, V, S> Entry<'a, V, S> {
    /// Inserts a default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_insert(self, default: V) -> &'a mut V {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default),
        }
    }

    /// Inserts a value computed from a closure if the entry is vacant and
    /// returns a mutable reference.
    pub fn or_insert_with<F>(self, default: F) -> &'a mut V
    where
        F: FnOnce() -> V,
    {
        match self {
            Entry::Occupied(entry) => entry.into_mut(),
            Entry::Vacant(entry) => entry.insert(default()),
        }
    }

    /// Provides in-place mutable access to an occupied entry before any
    /// potential inserts.
    pub fn and_modify<F>(self, f: F) -> Self
    where
        F: FnOnce(&mut V),
    {
        match self {
            Entry::Occupied(mut entry) => {
                f(entry.get_mut());
                Entry::Occupied(entry)
            }
            Entry::Vacant(entry) => Entry::Vacant(entry),
        }
    }

    /// Returns this entry's key.
    pub fn key(&self) -> i64 {
        match self {
            Entry::Occupied(entry) => entry.key(),
            Entry::Vacant(entry) => entry.key(),
        }
    }
}

impl<'a, V, S> Entry<'a, V, S>
where
    V: Default,
{
    /// Inserts the default value if the entry is vacant and returns a mutable
    /// reference.
    pub fn or_default(self) -> &'a mut V {
        self.or_insert_with(V::default)
    }
}

/// A view into a vacant entry in the map.
pub struct VacantEntry<'a, V, S = DefaultHashBuilder> {
    map: &'a mut LongMap<V, S>,
    key: i64,
    hash: u64,
}

impl<'a, V, S> VacantEntry<'a, V, S> {
    /// Returns the key that would be used when inserting a value.
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Inserts the value into the map and returns a mutable reference to it.
    pub fn insert(self, value: V) -> &'a mut V {
        self.map.insert_unique(self.hash, self.key, value)
    }
}

/// A view into an occupied entry in the map.
pub struct OccupiedEntry<'a, V, S = DefaultHashBuilder> {
    map: &'a mut LongMap<V, S>,
    key: i64,
    hash: u64,
}

impl<'a, V, S> OccupiedEntry<'a, V, S> {
    /// Returns the key of the entry.
    pub fn key(&self) -> i64 {
        self.key
    }

    /// Gets a reference to the value in the entry.
    pub fn get(&self) -> &V {
        let node = self.map.find_node(self.hash, self.key);
        // The map cannot change while the view borrows it.
        match node {
            Some(node) => &node.value,
            None => unreachable!("occupied entry lost its node"),
        }
    }

    /// Gets a mutable reference to the value in the entry.
    pub fn get_mut(&mut self) -> &mut V {
        let node = self.map.find_node_mut(self.hash, self.key);
        match node {
            Some(node) => &mut node.value,
            None => unreachable!("occupied entry lost its node"),
        }
    }

    /// Converts the entry into a mutable reference to the value.
    pub fn into_mut(self) -> &'a mut V {
        let node = self.map.find_node_mut(self.hash, self.key);
        match node {
            Some(node) => &mut node.value,
            None => unreachable!("occupied entry lost its node"),
        }
    }

    /// Replaces the value in the entry and returns the old value.
    pub fn insert(&mut self, value: V) -> V {
        mem::replace(self.get_mut(), value)
    }

    /// Removes the entry from the map and returns the value.
    pub fn remove(self) -> V {
        match self.map.remove_hashed(self.hash, self.key) {
            Some(value) => value,
            None => unreachable!("occupied entry lost its node"),
        }
    }
}

/// An iterator over the key-value pairs of a [`LongMap`].
pub struct Iter<'a, V> {
    buckets: core::slice::Iter<'a, Option<Box<Node<V>>>>,
    node: Option<&'a Node<V>>,
    remaining: usize,
}

impl<'a, V> Iterator for Iter<'a, V> {
    type Item = (i64, &'a V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(node) = self.node {
                self.node = node.next.as_deref();
                self.remaining -= 1;
                return Some((node.key, &node.value));
            }
            self.node = self.buckets.next()?.as_deref();
        }
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        (self.remaining, Some(self.remaining))
    }
}

impl<V> ExactSizeIterator for Iter<'_, V> {}

/// An iterator over the keys of a [`LongMap`].
pub struct Keys<'a, V> {
    inner: Iter<'a, V>,
}

impl<V> Iterator for Keys<'_, V> {
    type Item = i64;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(key, _)| key)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Keys<'_, V> {}

/// An iterator over the values of a [`LongMap`].
pub struct Values<'a, V> {
    inner: Iter<'a, V>,
}

impl<'a, V> Iterator for Values<'a, V> {
    type Item = &'a V;

    fn next(&mut self) -> Option<Self::Item> {
        self.inner.next().map(|(_, value)| value)
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        self.inner.size_hint()
    }
}

impl<V> ExactSizeIterator for Values<'_, V> {}

/// A draining iterator over the key-value pairs of a [`LongMap`].
pub struct Drain<'a, V> {
    buckets: core::slice::IterMut<'a, Option<Box<Node<V>>>>,
    node: Option<Box<Node<V>>>,
    len: &'a mut usize,
}

impl<V> Iterator for Drain<'_, V> {
    type Item = (i64, V);

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(mut node) = self.node.take() {
                self.node = node.next.take();
                *self.len -= 1;
                return Some((node.key, node.value));
            }
            self.node = self.buckets.next()?.take();
        }
    }
}

impl<V> Drop for Drain<'_, V> {
    fn drop(&mut self) {
        for _ in self {}
    }
}
