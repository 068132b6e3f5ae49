//! Protein domain annotation: records, loader and retained-domain summary.

pub mod load;
pub mod retained;

use crate::annotation::GeneId;
use crate::contig::{ContigId, Position};
use crate::index::{AnnotationIndex, Located};
use crate::strand::Strand;

pub use load::load_protein_domains;
pub use retained::annotate_retained_protein_domains;

/// A protein domain projected onto the genome.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProteinDomain {
    pub contig: ContigId,
    /// 0-based, inclusive.
    pub start: Position,
    /// 0-based, inclusive.
    pub end: Position,
    pub strand: Strand,
    /// Decoded and sanitized: printable ASCII without `,` and `|`.
    pub name: String,
    pub gene: GeneId,
}

impl ProteinDomain {
    #[must_use]
    pub fn len(&self) -> Position {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

impl Located for ProteinDomain {
    fn contig(&self) -> ContigId {
        self.contig
    }

    fn start(&self) -> Position {
        self.start
    }
}

/// Loaded protein domains together with their start-coordinate index.
#[derive(Debug, Default)]
pub struct ProteinDomains {
    records: Vec<ProteinDomain>,
    index: AnnotationIndex,
}

impl ProteinDomains {
    #[must_use]
    pub fn new(records: Vec<ProteinDomain>) -> Self {
        let index = AnnotationIndex::build(&records);
        Self { records, index }
    }

    #[must_use]
    pub fn records(&self) -> &[ProteinDomain] {
        &self.records
    }

    #[must_use]
    pub fn index(&self) -> &AnnotationIndex {
        &self.index
    }

    /// Domains whose start lies in `[start, end]` on `contig`, in ascending start order.
    pub fn starting_in(
        &self,
        contig: ContigId,
        start: Position,
        end: Position,
    ) -> impl Iterator<Item = &ProteinDomain> + '_ {
        self.index
            .starting_in(contig, start, end)
            .flat_map(move |(_, ids)| ids.iter().map(move |&id| &self.records[id]))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn domain(contig: ContigId, start: Position, end: Position, name: &str) -> ProteinDomain {
        ProteinDomain {
            contig,
            start,
            end,
            strand: Strand::Forward,
            name: name.to_string(),
            gene: GeneId(0),
        }
    }

    #[test]
    fn query_resolves_records() {
        let domains = ProteinDomains::new(vec![
            domain(0, 500, 600, "B"),
            domain(0, 100, 200, "A"),
            domain(1, 100, 200, "C"),
        ]);
        let names: Vec<&str> = domains
            .starting_in(0, 0, 1000)
            .map(|d| d.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
        assert_eq!(domains.len(), 3);
        assert_eq!(domains.records()[1].len(), 101);
    }
}
