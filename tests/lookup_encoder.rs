// Unit tests for the writer-side lookup tables and delta-index rules:
// sequential assignment, LRU eviction with index reuse, and the three
// reference-index specializations (name, prefix, datatype).

use jelly::serialize::{Lookup, LookupEncoder};

// ── Lookup invariants ────────────────────────────────────────────────────────

/// For any key sequence not exceeding the capacity, assigned indices are
/// exactly 1..=n in insertion order.
#[test]
fn indices_are_sequential_up_to_capacity() {
    let mut lookup = Lookup::new(16);
    for (i, key) in ["a", "b", "c", "d", "e"].iter().enumerate() {
        assert_eq!(lookup.insert(key), i as u32 + 1);
    }
}

/// A full table evicts the LRU key; the evicted key later gets a fresh
/// index (possibly reusing another slot).
#[test]
fn evicted_key_gets_fresh_index() {
    let mut lookup = Lookup::new(3);
    lookup.insert("a");
    lookup.insert("b");
    lookup.insert("c");
    // Evicts "a" (LRU), reusing index 1.
    assert_eq!(lookup.insert("d"), 1);
    assert_eq!(lookup.get("a"), None);
    // Reinserting "a" evicts "b" and reuses index 2.
    assert_eq!(lookup.insert("a"), 2);
    assert_eq!(lookup.get("b"), None);
}

/// Lookups promote to most-recently-used, protecting hot keys from
/// eviction.
#[test]
fn touch_protects_from_eviction() {
    let mut lookup = Lookup::new(2);
    lookup.insert("hot");
    lookup.insert("cold");
    for _ in 0..3 {
        assert!(lookup.touch("hot"));
    }
    lookup.insert("new");
    assert!(lookup.get("hot").is_some());
    assert_eq!(lookup.get("cold"), None);
}

// ── Entry index emission ─────────────────────────────────────────────────────

/// Fresh encoder: sequential inserts all emit the 0 sentinel.
#[test]
fn entry_rows_compress_to_zero_in_sequence() {
    let mut enc = LookupEncoder::new(4);
    assert_eq!(enc.encode_entry_index("foo"), Some(0));
    assert_eq!(enc.encode_entry_index(""), Some(0));
    assert_eq!(enc.encode_entry_index("bar"), Some(0));
}

/// Existing keys emit no entry row at all.
#[test]
fn present_key_emits_no_entry_row() {
    let mut enc = LookupEncoder::new(4);
    enc.encode_entry_index("foo");
    assert_eq!(enc.encode_entry_index("foo"), None);
}

/// After the table wraps, reuse of a non-contiguous slot transmits the
/// index verbatim.
#[test]
fn eviction_can_break_the_sequence() {
    let mut enc = LookupEncoder::new(2);
    assert_eq!(enc.encode_entry_index("a"), Some(0)); // index 1
    assert_eq!(enc.encode_entry_index("b"), Some(0)); // index 2
    // "a" is evicted, index 1 reused: 1 != 2 + 1, so verbatim.
    assert_eq!(enc.encode_entry_index("c"), Some(1));
    // "b" is evicted, index 2 reused: 2 == 1 + 1, sentinel again.
    assert_eq!(enc.encode_entry_index("d"), Some(0));
}

// ── Reference index emission ─────────────────────────────────────────────────

/// Name references: sentinel iff contiguous with the previous reference.
#[test]
fn name_references_use_prev_plus_one_rule() {
    let mut enc = LookupEncoder::new(8);
    for key in ["n1", "n2", "n3"] {
        enc.encode_entry_index(key);
    }
    assert_eq!(enc.encode_name_term_index("n1"), 0);
    assert_eq!(enc.encode_name_term_index("n2"), 0);
    assert_eq!(enc.encode_name_term_index("n3"), 0);
    // Going backwards breaks the sequence.
    assert_eq!(enc.encode_name_term_index("n1"), 1);
    assert_eq!(enc.encode_name_term_index("n3"), 3);
}

/// Prefix references: sentinel iff identical to the previous reference,
/// never for the very first one.
#[test]
fn prefix_references_use_same_as_previous_rule() {
    let mut enc = LookupEncoder::new(8);
    enc.encode_entry_index("http://x/");
    enc.encode_entry_index("http://y/");
    assert_eq!(enc.encode_prefix_term_index("http://x/"), 1);
    assert_eq!(enc.encode_prefix_term_index("http://x/"), 0);
    assert_eq!(enc.encode_prefix_term_index("http://y/"), 2);
    assert_eq!(enc.encode_prefix_term_index("http://y/"), 0);
    assert_eq!(enc.encode_prefix_term_index("http://x/"), 1);
}

/// Promotion on reference: referencing a key keeps it alive under
/// eviction pressure.
#[test]
fn references_promote_in_the_lru_order() {
    let mut enc = LookupEncoder::new(2);
    enc.encode_entry_index("a");
    enc.encode_entry_index("b");
    enc.encode_name_term_index("a");
    // "b" is now LRU and gets evicted.
    enc.encode_entry_index("c");
    assert_eq!(enc.lookup().get("b"), None);
    assert!(enc.lookup().get("a").is_some());
}

/// A disabled table yields the 0 sentinel from insert and stays empty.
#[test]
fn disabled_table_stays_empty() {
    let mut lookup = Lookup::new(0);
    assert_eq!(lookup.insert("anything"), 0);
    assert_eq!(lookup.insert("else"), 0);
    assert!(lookup.is_empty());
}
