//! Reader-side lookup tables: fixed-size index-to-string vectors mirroring
//! the writer's LRU tables, with the inverse delta-index rules.

use crate::error::{JellyError, Result};

/// Mirror of a writer-side lookup table.
///
/// Entries land at `index - 1` in a fixed-size vector; the two ordinals
/// mirror the writer's delta-compression state.
#[derive(Debug)]
pub struct LookupDecoder {
    data: Vec<Option<String>>,
    last_assigned_index: u32,
    last_reused_index: u32,
}

impl LookupDecoder {
    pub fn new(lookup_size: u32) -> Self {
        LookupDecoder {
            data: vec![None; lookup_size as usize],
            last_assigned_index: 0,
            last_reused_index: 0,
        }
    }

    /// Applies an entry row. An id of 0 means "previous assigned + 1".
    pub fn assign_entry(&mut self, index: u32, value: &str) -> Result<()> {
        let index = if index == 0 {
            self.last_assigned_index + 1
        } else {
            index
        };
        let size = self.data.len();
        let slot = self.data.get_mut(index as usize - 1).ok_or_else(|| {
            JellyError::conformance(format!(
                "lookup entry id {index} out of range (table size {size})"
            ))
        })?;
        *slot = Some(value.to_owned());
        self.last_assigned_index = index;
        Ok(())
    }

    /// Resolves an absolute index. 0 resolves to the empty string (only the
    /// prefix table can legitimately reach this).
    fn at(&mut self, index: u32) -> Result<&str> {
        if index == 0 {
            return Ok("");
        }
        self.last_reused_index = index;
        match self.data.get(index as usize - 1) {
            Some(Some(value)) => Ok(value),
            _ => Err(JellyError::conformance(format!(
                "invalid lookup index {index}"
            ))),
        }
    }

    /// Resolves a prefix reference: 0 repeats the previous IRI's prefix
    /// (or is the empty prefix when there is no previous reference).
    pub fn decode_prefix_term_index(&mut self, index: u32) -> Result<&str> {
        let resolved = if index != 0 {
            index
        } else {
            self.last_reused_index
        };
        self.at(resolved)
    }

    /// Resolves a name reference: 0 means "previous reference + 1".
    pub fn decode_name_term_index(&mut self, index: u32) -> Result<&str> {
        let resolved = if index != 0 {
            index
        } else {
            self.last_reused_index + 1
        };
        self.at(resolved)
    }

    /// Resolves a datatype reference. Index 0 (the default string datatype)
    /// never reaches this; the row decoder handles it.
    pub fn decode_datatype_term_index(&mut self, index: u32) -> Result<&str> {
        self.at(index)
    }
}
