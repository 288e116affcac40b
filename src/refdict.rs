// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Reference dictionary: contig names, numeric ids and lengths.
//!
//! A dictionary is built once per genome build and then shared as an
//! `Arc<ReferenceDictionary>`. Every coordinate value keeps a reference to
//! the dictionary it was created against, and values from two different
//! dictionary instances are never combined.
//!
//! ```
//! use bio_varanno::refdict::ReferenceDictionaryBuilder;
//! let mut builder = ReferenceDictionaryBuilder::new();
//! let chr1 = builder.add_contig("chr1", 249_250_621);
//! builder.add_alias(chr1, "1");
//! let dict = builder.build();
//! assert_eq!(dict.contig_id("1"), Some(chr1));
//! assert_eq!(dict.contig_length(chr1), Some(249_250_621));
//! assert_eq!(dict.contig_name(chr1), Some("chr1"));
//! ```

use std::collections::HashMap;
use std::sync::Arc;

/// Immutable mapping between contig names, ids and lengths.
#[derive(Debug, Default, PartialEq, Eq)]
pub struct ReferenceDictionary {
    contig_name_to_id: HashMap<String, u32>,
    contig_id_to_name: Vec<String>,
    contig_id_to_length: Vec<isize>,
}

impl ReferenceDictionary {
    /// Numeric id for a contig name or alias.
    pub fn contig_id(&self, name: &str) -> Option<u32> {
        self.contig_name_to_id.get(name).copied()
    }

    /// Primary name of a contig.
    pub fn contig_name(&self, id: u32) -> Option<&str> {
        self.contig_id_to_name.get(id as usize).map(|s| s.as_str())
    }

    pub fn contig_length(&self, id: u32) -> Option<isize> {
        self.contig_id_to_length.get(id as usize).copied()
    }

    /// Number of distinct contigs (aliases not counted).
    pub fn contig_count(&self) -> usize {
        self.contig_id_to_name.len()
    }

    /// All names and aliases that resolve to `id`.
    pub fn aliases(&self, id: u32) -> Vec<&str> {
        let mut names: Vec<&str> = self
            .contig_name_to_id
            .iter()
            .filter(|(_, &v)| v == id)
            .map(|(k, _)| k.as_str())
            .collect();
        names.sort_unstable();
        names
    }

    /// Whether two shared handles point at the very same dictionary.
    pub fn same_instance(a: &Arc<ReferenceDictionary>, b: &Arc<ReferenceDictionary>) -> bool {
        Arc::ptr_eq(a, b)
    }
}

/// Builder interning contig names into dense numeric ids.
///
/// Ids are handed out in insertion order starting at 0. Adding a name
/// that is already known returns the existing id, in the same way a
/// string interner returns the already-interned value.
#[derive(Debug, Default)]
pub struct ReferenceDictionaryBuilder {
    dict: ReferenceDictionary,
}

impl ReferenceDictionaryBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a contig with its length and return its id.
    ///
    /// When the name is already known the length is updated and the
    /// existing id is returned.
    pub fn add_contig(&mut self, name: &str, length: isize) -> u32 {
        if let Some(&id) = self.dict.contig_name_to_id.get(name) {
            self.dict.contig_id_to_length[id as usize] = length;
            return id;
        }
        let id = self.dict.contig_id_to_name.len() as u32;
        self.dict.contig_name_to_id.insert(name.to_owned(), id);
        self.dict.contig_id_to_name.push(name.to_owned());
        self.dict.contig_id_to_length.push(length);
        id
    }

    /// Make `alias` resolve to contig `id`. Unknown ids are ignored.
    pub fn add_alias(&mut self, id: u32, alias: &str) {
        if (id as usize) < self.dict.contig_id_to_name.len() {
            self.dict.contig_name_to_id.insert(alias.to_owned(), id);
        }
    }

    pub fn build(self) -> Arc<ReferenceDictionary> {
        Arc::new(self.dict)
    }
}
