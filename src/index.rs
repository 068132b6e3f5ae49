//! Per-contig index of annotation records keyed by start coordinate.

use std::collections::BTreeMap;

use crate::contig::{ContigId, Position};

/// A record that can be placed in an [`AnnotationIndex`].
pub trait Located {
    fn contig(&self) -> ContigId;
    fn start(&self) -> Position;
}

/// Maps, per contig, each start coordinate to the records starting there.
///
/// Records are referenced by their position in the slice the index was built
/// from; within a bucket they keep insertion order.
#[derive(Debug, Default, Clone)]
pub struct AnnotationIndex {
    contigs: Vec<BTreeMap<Position, Vec<usize>>>,
}

impl AnnotationIndex {
    pub fn build<T: Located>(records: &[T]) -> Self {
        let mut contigs: Vec<BTreeMap<Position, Vec<usize>>> = Vec::new();
        for (i, record) in records.iter().enumerate() {
            let contig = record.contig();
            if contig >= contigs.len() {
                contigs.resize_with(contig + 1, BTreeMap::new);
            }
            contigs[contig].entry(record.start()).or_default().push(i);
        }
        Self { contigs }
    }

    /// Whether any record was indexed on this contig.
    #[must_use]
    pub fn has_contig(&self, contig: ContigId) -> bool {
        self.contigs.get(contig).is_some_and(|m| !m.is_empty())
    }

    /// Buckets whose start lies in `[start, end]`, in ascending start order.
    ///
    /// Records starting before `start` are not returned even when they overlap
    /// the range.
    pub fn starting_in(
        &self,
        contig: ContigId,
        start: Position,
        end: Position,
    ) -> impl Iterator<Item = (Position, &[usize])> + '_ {
        self.contigs
            .get(contig)
            .filter(|_| start <= end)
            .into_iter()
            .flat_map(move |buckets| buckets.range(start..=end))
            .map(|(&position, records)| (position, records.as_slice()))
    }

    /// Every indexed record id, per contig and start.
    pub fn iter(&self) -> impl Iterator<Item = (ContigId, Position, usize)> + '_ {
        self.contigs.iter().enumerate().flat_map(|(contig, buckets)| {
            buckets.iter().flat_map(move |(&position, records)| {
                records.iter().map(move |&record| (contig, position, record))
            })
        })
    }
}
