//! Contig identifiers and name resolution.

use std::collections::HashMap;

use crate::error::Error;

/// Numeric identifier of a reference sequence.
pub type ContigId = usize;

/// Zero-based coordinate on a contig.
pub type Position = i32;

/// Strips a leading "chr" so that UCSC and Ensembl style names resolve alike.
#[must_use]
pub fn remove_chr(name: &str) -> &str {
    name.strip_prefix("chr").unwrap_or(name)
}

/// Maps contig names to dense numeric identifiers.
#[derive(Debug, Default, Clone)]
pub struct ContigMap {
    names: Vec<String>,
    name_to_id: HashMap<String, ContigId>,
}

impl ContigMap {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a contig and returns its identifier.
    ///
    /// Registering a name that is already known returns the existing identifier.
    pub fn insert(&mut self, name: &str) -> Result<ContigId, Error> {
        let key = remove_chr(name);
        if key.is_empty() {
            return Err(Error::Validation(format!("invalid contig name: '{name}'")));
        }
        if let Some(&id) = self.name_to_id.get(key) {
            return Ok(id);
        }
        let id = self.names.len();
        self.names.push(name.to_string());
        self.name_to_id.insert(key.to_string(), id);
        Ok(id)
    }

    /// Resolves a contig name, with or without "chr" prefix.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<ContigId> {
        self.name_to_id.get(remove_chr(name)).copied()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn chr_prefix_is_ignored() {
        let mut contigs = ContigMap::new();
        let id = contigs.insert("chr7").unwrap();
        assert_eq!(contigs.get("7"), Some(id));
        assert_eq!(contigs.get("chr7"), Some(id));
    }

    #[test]
    fn duplicate_insert_returns_existing_id() {
        let mut contigs = ContigMap::new();
        let first = contigs.insert("1").unwrap();
        let second = contigs.insert("2").unwrap();
        assert_eq!(contigs.insert("chr1").unwrap(), first);
        assert_ne!(first, second);
        assert_eq!(contigs.len(), 2);
    }

    #[test]
    fn unknown_contig() {
        let contigs = ContigMap::new();
        assert!(contigs.is_empty());
        assert_eq!(contigs.get("X"), None);
    }

    #[test]
    fn empty_name_rejected() {
        let mut contigs = ContigMap::new();
        assert!(contigs.insert("chr").is_err());
    }
}
