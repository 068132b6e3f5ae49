//! Nucleotide helpers and the per-contig reference assembly.

use std::collections::HashMap;
use std::io::BufRead;

use crate::contig::{ContigId, ContigMap, Position};
use crate::error::Error;
use crate::fasta;

/// Complement of a single nucleotide, preserving case. Unknown symbols map to themselves.
#[must_use]
pub fn complement(base: u8) -> u8 {
    match base {
        b'A' => b'T',
        b'T' => b'A',
        b'C' => b'G',
        b'G' => b'C',
        b'a' => b't',
        b't' => b'a',
        b'c' => b'g',
        b'g' => b'c',
        other => other,
    }
}

/// Reverse complement of a nucleotide sequence.
#[must_use]
pub fn reverse_complement(seq: &[u8]) -> Vec<u8> {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Reference sequences indexed by contig.
///
/// Only the contigs that were loaded are available; callers must handle a
/// missing contig.
#[derive(Debug, Default)]
pub struct Assembly {
    sequences: HashMap<ContigId, Vec<u8>>,
}

impl Assembly {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from FASTA, registering every sequence name in `contigs`.
    pub fn from_fasta<R: BufRead>(reader: R, contigs: &mut ContigMap) -> Result<Self, Error> {
        let mut assembly = Self::new();
        for (name, seq) in fasta::parse_fasta(reader)? {
            let contig = contigs.insert(&name)?;
            if assembly.sequences.contains_key(&contig) {
                return Err(Error::Validation(format!(
                    "duplicate contig in assembly: {name}"
                )));
            }
            assembly.sequences.insert(contig, seq);
        }
        Ok(assembly)
    }

    pub fn insert(&mut self, contig: ContigId, sequence: Vec<u8>) {
        self.sequences.insert(contig, sequence);
    }

    /// Get the full sequence of a contig.
    #[must_use]
    pub fn get(&self, contig: ContigId) -> Option<&[u8]> {
        self.sequences.get(&contig).map(|v| v.as_slice())
    }

    #[must_use]
    pub fn contains(&self, contig: ContigId) -> bool {
        self.sequences.contains_key(&contig)
    }

    /// Base at a 0-based position, or None if the contig or position is unavailable.
    #[must_use]
    pub fn base(&self, contig: ContigId, position: Position) -> Option<u8> {
        let index = usize::try_from(position).ok()?;
        self.get(contig)?.get(index).copied()
    }

    /// Extract `length` bases starting at a 0-based position.
    /// Returns None unless the whole range lies on the contig.
    #[must_use]
    pub fn substring(&self, contig: ContigId, start: Position, length: usize) -> Option<&[u8]> {
        let start = usize::try_from(start).ok()?;
        self.get(contig)?.get(start..start.checked_add(length)?)
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sequences.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sequences.is_empty()
    }
}
