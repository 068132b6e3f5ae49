//! GFF3 data structures for tokenized lines.

use crate::contig::Position;
use crate::strand::Strand;

/// A single tokenized GFF3 data line, borrowing from the line text.
///
/// Coordinates are kept as written in the file (1-based, inclusive).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Gff3Record<'a> {
    pub seqid: &'a str,
    pub source: &'a str,
    pub feature_type: &'a str,
    pub start: Position,
    pub end: Position,
    pub strand: Strand,
    pub attributes: Attributes<'a>,
}

/// Column 9: semicolon-separated `key=value` pairs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Attributes<'a>(pub &'a str);

impl<'a> Attributes<'a> {
    /// Iterate over `(key, value)` pairs. Values are returned still percent-encoded.
    pub fn iter(&self) -> impl Iterator<Item = (&'a str, &'a str)> + 'a {
        self.0
            .split(';')
            .map(str::trim)
            .filter_map(|pair| pair.split_once('='))
    }

    /// Value of the first attribute named `key`.
    #[must_use]
    pub fn get(&self, key: &str) -> Option<&'a str> {
        self.iter().find(|(k, _)| *k == key).map(|(_, v)| v)
    }
}
