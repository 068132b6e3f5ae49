//! Gene, transcript and exon model shared by the annotators.
//!
//! Genes and transcripts live in arenas owned by [`GeneAnnotation`] and are
//! referenced through [`GeneId`] and [`TranscriptId`] handles. Exons are owned
//! by their transcript and stored in ascending genomic order.

use std::collections::HashMap;

use crate::contig::{ContigId, Position};
use crate::error::Error;
use crate::strand::Strand;

/// Handle of a gene within a [`GeneAnnotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GeneId(pub usize);

/// Handle of a transcript within a [`GeneAnnotation`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranscriptId(pub usize);

/// Removes a trailing version number, e.g. "ENSG00000141510.16" becomes "ENSG00000141510".
#[must_use]
pub fn strip_version(id: &str) -> &str {
    match id.rsplit_once('.') {
        Some((stem, version))
            if !stem.is_empty()
                && !version.is_empty()
                && version.bytes().all(|b| b.is_ascii_digit()) =>
        {
            stem
        }
        _ => id,
    }
}

/// Translated part of an exon, inclusive 0-based coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodingRegion {
    pub start: Position,
    pub end: Position,
}

impl CodingRegion {
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    #[must_use]
    pub fn len(&self) -> Position {
        self.end - self.start + 1
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.end < self.start
    }
}

/// An exon; `coding_region` is None for untranslated exons.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Exon {
    pub start: Position,
    pub end: Position,
    pub coding_region: Option<CodingRegion>,
}

impl Exon {
    #[must_use]
    pub fn contains(&self, position: Position) -> bool {
        self.start <= position && position <= self.end
    }

    #[must_use]
    pub fn is_coding(&self) -> bool {
        self.coding_region.is_some()
    }

    #[must_use]
    pub fn coding_contains(&self, position: Position) -> bool {
        self.coding_region.is_some_and(|cds| cds.contains(position))
    }
}

#[derive(Debug, Clone)]
pub struct Gene {
    pub id: String,
    pub name: String,
    pub contig: ContigId,
    pub start: Position,
    pub end: Position,
    pub strand: Strand,
    pub is_protein_coding: bool,
}

#[derive(Debug, Clone)]
pub struct Transcript {
    pub id: String,
    pub gene: GeneId,
    /// Exons in ascending genomic order.
    pub exons: Vec<Exon>,
}

impl Transcript {
    /// Index of the first exon in transcription order.
    #[must_use]
    pub fn first_exon(&self, strand: Strand) -> Option<usize> {
        if self.exons.is_empty() {
            None
        } else if strand.is_reverse() {
            Some(self.exons.len() - 1)
        } else {
            Some(0)
        }
    }

    /// Walks the exons in transcription order, starting at `index`.
    #[must_use]
    pub fn exons_from(&self, index: usize, strand: Strand) -> TranscriptionOrder<'_> {
        TranscriptionOrder {
            exons: &self.exons,
            next: (index < self.exons.len()).then_some(index),
            strand,
        }
    }
}

/// Cursor over a transcript's exons in the direction of transcription.
pub struct TranscriptionOrder<'a> {
    exons: &'a [Exon],
    next: Option<usize>,
    strand: Strand,
}

impl<'a> Iterator for TranscriptionOrder<'a> {
    type Item = (usize, &'a Exon);

    fn next(&mut self) -> Option<Self::Item> {
        let index = self.next?;
        self.next = match self.strand {
            Strand::Forward if index + 1 < self.exons.len() => Some(index + 1),
            Strand::Reverse if index > 0 => Some(index - 1),
            _ => None,
        };
        Some((index, &self.exons[index]))
    }
}

/// Read-only gene model after construction.
#[derive(Debug, Default)]
pub struct GeneAnnotation {
    genes: Vec<Gene>,
    transcripts: Vec<Transcript>,
    gene_ids: HashMap<String, GeneId>,
    gene_names: HashMap<String, GeneId>,
    transcript_ids: HashMap<String, TranscriptId>,
}

impl GeneAnnotation {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a gene. Gene IDs are indexed without version suffix; for duplicate
    /// gene names the first gene wins.
    pub fn add_gene(&mut self, gene: Gene) -> Result<GeneId, Error> {
        let id = GeneId(self.genes.len());
        let key = strip_version(&gene.id).to_string();
        if self.gene_ids.contains_key(&key) {
            return Err(Error::Validation(format!("duplicate gene ID: {}", gene.id)));
        }
        self.gene_ids.insert(key, id);
        self.gene_names.entry(gene.name.clone()).or_insert(id);
        self.genes.push(gene);
        Ok(id)
    }

    /// Adds a transcript to a gene; exons are sorted by position.
    pub fn add_transcript(
        &mut self,
        gene: GeneId,
        transcript_id: &str,
        mut exons: Vec<Exon>,
    ) -> Result<TranscriptId, Error> {
        if gene.0 >= self.genes.len() {
            return Err(Error::Validation(format!(
                "transcript {transcript_id} refers to unknown gene"
            )));
        }
        let id = TranscriptId(self.transcripts.len());
        let key = strip_version(transcript_id).to_string();
        if self.transcript_ids.contains_key(&key) {
            return Err(Error::Validation(format!(
                "duplicate transcript ID: {transcript_id}"
            )));
        }
        exons.sort_by_key(|e| e.start);
        self.transcript_ids.insert(key, id);
        self.transcripts.push(Transcript {
            id: transcript_id.to_string(),
            gene,
            exons,
        });
        Ok(id)
    }

    #[must_use]
    pub fn gene(&self, id: GeneId) -> &Gene {
        &self.genes[id.0]
    }

    pub fn gene_mut(&mut self, id: GeneId) -> &mut Gene {
        &mut self.genes[id.0]
    }

    #[must_use]
    pub fn transcript(&self, id: TranscriptId) -> &Transcript {
        &self.transcripts[id.0]
    }

    /// Look up a gene by ID; any version suffix is ignored.
    #[must_use]
    pub fn gene_by_id(&self, gene_id: &str) -> Option<GeneId> {
        self.gene_ids.get(strip_version(gene_id)).copied()
    }

    #[must_use]
    pub fn gene_by_name(&self, name: &str) -> Option<GeneId> {
        self.gene_names.get(name).copied()
    }

    /// Look up a gene by ID first and by name second.
    #[must_use]
    pub fn find_gene(&self, id_or_name: &str) -> Option<GeneId> {
        self.gene_by_id(id_or_name)
            .or_else(|| self.gene_by_name(id_or_name))
    }

    /// Look up a transcript by ID; any version suffix is ignored.
    #[must_use]
    pub fn transcript_by_id(&self, transcript_id: &str) -> Option<TranscriptId> {
        self.transcript_ids.get(strip_version(transcript_id)).copied()
    }

    #[must_use]
    pub fn gene_count(&self) -> usize {
        self.genes.len()
    }

    #[must_use]
    pub fn transcript_count(&self) -> usize {
        self.transcripts.len()
    }
}
