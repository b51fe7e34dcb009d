//! Writer-side lookup tables.
//!
//! A [`Lookup`] is a fixed-capacity, 1-based string-to-index mapping with
//! LRU eviction. Indices are assigned sequentially until the table is full;
//! afterwards the least-recently-used entry is evicted and its index reused.
//! Index 0 is reserved as a delta marker in the stream and is never stored.
//!
//! [`LookupEncoder`] wraps a table and implements the delta-index arithmetic
//! of the wire format: it decides when an index can be replaced by the 0
//! sentinel and when it must be transmitted verbatim.

use indexmap::IndexMap;

/// Fixed-size 1-based string-to-index mapping with LRU eviction.
///
/// A table created with `max_size == 0` is disabled: [`Lookup::insert`]
/// always returns 0 and nothing is stored.
#[derive(Debug)]
pub struct Lookup {
    data: IndexMap<String, u32>,
    max_size: u32,
    evicting: bool,
}

impl Lookup {
    pub fn new(max_size: u32) -> Self {
        Lookup {
            data: IndexMap::with_capacity(max_size as usize),
            max_size,
            evicting: false,
        }
    }

    pub fn max_size(&self) -> u32 {
        self.max_size
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    /// Promotes `key` to most-recently-used. Returns whether it was present.
    pub fn touch(&mut self, key: &str) -> bool {
        match self.data.get_index_of(key) {
            Some(position) => {
                self.data.move_index(position, self.data.len() - 1);
                true
            }
            None => false,
        }
    }

    /// Current index of `key`, without promoting it.
    pub fn get(&self, key: &str) -> Option<u32> {
        self.data.get(key).copied()
    }

    /// Inserts a new key and returns its assigned index.
    ///
    /// While the table has free slots the next sequential index (starting at
    /// 1) is assigned; once full, the least-recently-used entry is evicted
    /// and its index reused. The key must not already be present.
    pub fn insert(&mut self, key: &str) -> u32 {
        if self.max_size == 0 {
            return 0;
        }
        debug_assert!(!self.data.contains_key(key), "key {key:?} already present");
        if self.evicting {
            // Full table: the oldest entry (front of the insertion order)
            // gives up its index.
            let index = match self.data.shift_remove_index(0) {
                Some((_, index)) => index,
                None => unreachable!("evicting lookup cannot be empty"),
            };
            self.data.insert(key.to_owned(), index);
            index
        } else {
            let index = self.data.len() as u32 + 1;
            self.data.insert(key.to_owned(), index);
            self.evicting = index == self.max_size;
            index
        }
    }
}

// ── Delta-index arithmetic ───────────────────────────────────────────────────

/// Writer-side wrapper over a [`Lookup`] tracking the two ordinals that the
/// delta compression of entry and reference indices is defined against.
#[derive(Debug)]
pub struct LookupEncoder {
    lookup: Lookup,
    last_assigned_index: u32,
    last_reused_index: u32,
}

impl LookupEncoder {
    pub fn new(lookup_size: u32) -> Self {
        LookupEncoder {
            lookup: Lookup::new(lookup_size),
            last_assigned_index: 0,
            last_reused_index: 0,
        }
    }

    pub fn lookup(&self) -> &Lookup {
        &self.lookup
    }

    /// Whether the underlying table is enabled at all.
    pub fn enabled(&self) -> bool {
        self.lookup.max_size > 0
    }

    /// Inserts a new key, or returns `None` if it is already present (then
    /// no entry row needs to be emitted).
    ///
    /// When the key is new, returns the id to put into the entry row: 0 when
    /// the assigned index is sequential (`last assigned + 1`, the common
    /// case, which encodes as a zero-byte varint), the literal index
    /// otherwise (after LRU eviction reused a non-contiguous slot).
    pub fn encode_entry_index(&mut self, key: &str) -> Option<u32> {
        if self.lookup.touch(key) {
            return None;
        }
        let previous = self.last_assigned_index;
        let index = self.lookup.insert(key);
        self.last_assigned_index = index;
        if index == previous + 1 {
            Some(0)
        } else {
            Some(index)
        }
    }

    /// Index of a previously inserted key, promoted to most-recently-used.
    fn term_index(&mut self, key: &str) -> u32 {
        self.lookup.touch(key);
        match self.lookup.get(key) {
            Some(index) => index,
            None => unreachable!("term index queried for a key that was never inserted"),
        }
    }

    /// Reference index for a name: 0 when contiguous with the previous name
    /// reference (`previous + 1`), literal index otherwise.
    pub fn encode_name_term_index(&mut self, key: &str) -> u32 {
        let previous = self.last_reused_index;
        let current = self.term_index(key);
        self.last_reused_index = current;
        if current == previous + 1 {
            0
        } else {
            current
        }
    }

    /// Reference index for a prefix: 0 when it equals the previous IRI's
    /// prefix. The empty prefix is never stored; it is always the 0 sentinel.
    pub fn encode_prefix_term_index(&mut self, key: &str) -> u32 {
        if key.is_empty() {
            return 0;
        }
        let previous = self.last_reused_index;
        let current = self.term_index(key);
        self.last_reused_index = current;
        if current == previous && previous != 0 {
            0
        } else {
            current
        }
    }

    /// Reference index for a datatype: always the literal index. The default
    /// string datatype never reaches this point; its sentinel 0 is handled
    /// by the term encoder.
    pub fn encode_datatype_term_index(&mut self, key: &str) -> u32 {
        self.term_index(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Indices are assigned sequentially from 1 while the table has room.
    #[test]
    fn sequential_assignment() {
        let mut lookup = Lookup::new(4);
        assert_eq!(lookup.insert("a"), 1);
        assert_eq!(lookup.insert("b"), 2);
        assert_eq!(lookup.insert("c"), 3);
        assert_eq!(lookup.insert("d"), 4);
    }

    /// Once full, inserting evicts the LRU entry and reuses its index.
    #[test]
    fn eviction_reuses_index() {
        let mut lookup = Lookup::new(2);
        lookup.insert("a");
        lookup.insert("b");
        // "a" is LRU; its index 1 is reused.
        assert_eq!(lookup.insert("c"), 1);
        assert_eq!(lookup.get("a"), None);
        assert_eq!(lookup.get("b"), Some(2));
        assert_eq!(lookup.get("c"), Some(1));
    }

    /// Touching promotes, changing which entry gets evicted next.
    #[test]
    fn touch_changes_eviction_order() {
        let mut lookup = Lookup::new(2);
        lookup.insert("a");
        lookup.insert("b");
        assert!(lookup.touch("a"));
        // "b" is now LRU.
        assert_eq!(lookup.insert("c"), 2);
        assert_eq!(lookup.get("b"), None);
        assert_eq!(lookup.get("a"), Some(1));
    }

    /// A zero-size table is disabled; insert yields the 0 sentinel.
    #[test]
    fn disabled_lookup() {
        let mut lookup = Lookup::new(0);
        assert_eq!(lookup.insert("a"), 0);
        assert!(lookup.is_empty());
    }

    /// Sequential new entries compress to the 0 sentinel; out-of-sequence
    /// reuse transmits the index verbatim.
    #[test]
    fn entry_index_delta() {
        let mut enc = LookupEncoder::new(4);
        assert_eq!(enc.encode_entry_index("foo"), Some(0));
        assert_eq!(enc.encode_entry_index("bar"), Some(0));
        // Already present: no entry row.
        assert_eq!(enc.encode_entry_index("foo"), None);
        // Force a non-contiguous assignment.
        enc.last_assigned_index = 10;
        assert_eq!(enc.encode_entry_index("baz"), Some(3));
    }

    /// Name references compress to 0 when contiguous with the previous one.
    #[test]
    fn name_term_index_delta() {
        let mut enc = LookupEncoder::new(8);
        enc.encode_entry_index("a");
        enc.encode_entry_index("b");
        enc.encode_entry_index("c");
        assert_eq!(enc.encode_name_term_index("a"), 0); // 1 == 0 + 1
        assert_eq!(enc.encode_name_term_index("b"), 0); // 2 == 1 + 1
        assert_eq!(enc.encode_name_term_index("a"), 1); // back-reference
        assert_eq!(enc.encode_name_term_index("b"), 2);
        assert_eq!(enc.encode_name_term_index("c"), 0); // 3 == 2 + 1
    }

    /// Prefix references compress to 0 only when repeating the previous
    /// prefix; the first reference is always verbatim.
    #[test]
    fn prefix_term_index_delta() {
        let mut enc = LookupEncoder::new(8);
        enc.encode_entry_index("http://a/");
        assert_eq!(enc.encode_prefix_term_index("http://a/"), 1);
        assert_eq!(enc.encode_prefix_term_index("http://a/"), 0);
        enc.encode_entry_index("http://b/");
        assert_eq!(enc.encode_prefix_term_index("http://b/"), 2);
        assert_eq!(enc.encode_prefix_term_index("http://b/"), 0);
    }

    /// The empty prefix is never inserted and always encodes as 0.
    #[test]
    fn empty_prefix_is_sentinel() {
        let mut enc = LookupEncoder::new(8);
        assert_eq!(enc.encode_prefix_term_index(""), 0);
        assert!(enc.lookup().is_empty());
    }

    /// Datatype references carry no delta compression.
    #[test]
    fn datatype_term_index_verbatim() {
        let mut enc = LookupEncoder::new(8);
        enc.encode_entry_index("http://www.w3.org/2001/XMLSchema#int");
        enc.encode_entry_index("http://www.w3.org/2001/XMLSchema#long");
        assert_eq!(
            enc.encode_datatype_term_index("http://www.w3.org/2001/XMLSchema#int"),
            1
        );
        assert_eq!(
            enc.encode_datatype_term_index("http://www.w3.org/2001/XMLSchema#int"),
            1
        );
    }
}
