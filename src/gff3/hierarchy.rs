//! GFF3 parent-child hierarchy builder producing the gene model.

use std::collections::HashMap;

use crate::annotation::{CodingRegion, Exon, Gene, GeneAnnotation, GeneId};
use crate::contig::{ContigId, Position};
use crate::error::Error;
use crate::strand::Strand;

use super::entry::Gff3Record;

/// Gene-level row, coordinates already 0-based.
#[derive(Debug)]
struct GeneRow {
    gene_id: String,
    name: String,
    contig: ContigId,
    start: Position,
    end: Position,
    strand: Strand,
    biotype_coding: bool,
}

#[derive(Debug)]
struct TranscriptRow {
    transcript_id: String,
    parent: String,
}

/// Collects flat GFF3 records and links them into genes, transcripts and exons.
#[derive(Debug, Default)]
pub struct HierarchyBuilder {
    /// Gene rows in order of appearance, keyed by their GFF3 ID.
    genes: Vec<(String, GeneRow)>,
    /// GFF3 ID → transcript row.
    transcripts: Vec<(String, TranscriptRow)>,
    /// Transcript GFF3 ID → exon intervals.
    exons: HashMap<String, Vec<(Position, Position)>>,
    /// Transcript GFF3 ID → CDS intervals.
    cds: HashMap<String, Vec<(Position, Position)>>,
}

fn strip_type_prefix<'a>(id: &'a str, prefix: &str) -> &'a str {
    id.strip_prefix(prefix).unwrap_or(id)
}

fn is_protein_coding_biotype(record: &Gff3Record<'_>) -> bool {
    ["biotype", "gene_type", "gene_biotype"]
        .iter()
        .any(|key| record.attributes.get(key) == Some("protein_coding"))
}

impl HierarchyBuilder {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a record located on a known contig.
    pub fn add(&mut self, record: &Gff3Record<'_>, contig: ContigId) -> Result<(), Error> {
        let start = record.start - 1; // GFF3 is one-based
        let end = record.end - 1;

        match record.feature_type {
            "exon" | "CDS" => {
                let parents = record.attributes.get("Parent").ok_or_else(|| {
                    Error::Parse(format!("{} without Parent attribute", record.feature_type))
                })?;
                let target = if record.feature_type == "exon" {
                    &mut self.exons
                } else {
                    &mut self.cds
                };
                for parent in parents.split(',') {
                    target.entry(parent.to_string()).or_default().push((start, end));
                }
            }
            "gene" | "ncRNA_gene" | "pseudogene" => {
                let id = record
                    .attributes
                    .get("ID")
                    .ok_or_else(|| Error::Parse("gene without ID attribute".to_string()))?;
                let gene_id = record
                    .attributes
                    .get("gene_id")
                    .unwrap_or_else(|| strip_type_prefix(id, "gene:"));
                let name = record
                    .attributes
                    .get("gene_name")
                    .or_else(|| record.attributes.get("Name"))
                    .unwrap_or(gene_id);
                self.genes.push((
                    id.to_string(),
                    GeneRow {
                        gene_id: gene_id.to_string(),
                        name: name.to_string(),
                        contig,
                        start,
                        end,
                        strand: record.strand,
                        biotype_coding: is_protein_coding_biotype(record),
                    },
                ));
            }
            _ => {
                // any other feature with a Parent is treated as a transcript (mRNA, lnc_RNA, ...)
                let (Some(id), Some(parent)) = (
                    record.attributes.get("ID"),
                    record.attributes.get("Parent"),
                ) else {
                    return Ok(());
                };
                let transcript_id = record
                    .attributes
                    .get("transcript_id")
                    .unwrap_or_else(|| strip_type_prefix(id, "transcript:"));
                self.transcripts.push((
                    id.to_string(),
                    TranscriptRow {
                        transcript_id: transcript_id.to_string(),
                        parent: parent.to_string(),
                    },
                ));
            }
        }
        Ok(())
    }

    /// Link transcripts to genes and exons to transcripts.
    ///
    /// Transcripts whose parent is not a gene, or that have no exons, are dropped.
    pub fn build(self) -> Result<GeneAnnotation, Error> {
        let mut annotation = GeneAnnotation::new();
        let mut id_to_gene: HashMap<String, GeneId> = HashMap::with_capacity(self.genes.len());

        for (gff_id, row) in self.genes {
            let gene_id = annotation.add_gene(Gene {
                id: row.gene_id,
                name: row.name,
                contig: row.contig,
                start: row.start,
                end: row.end,
                strand: row.strand,
                is_protein_coding: row.biotype_coding,
            })?;
            id_to_gene.insert(gff_id, gene_id);
        }

        for (gff_id, row) in self.transcripts {
            let Some(&gene) = id_to_gene.get(&row.parent) else {
                continue;
            };
            let Some(exon_intervals) = self.exons.get(&gff_id) else {
                continue;
            };
            let cds_intervals = self.cds.get(&gff_id).map(Vec::as_slice).unwrap_or(&[]);
            let exons = exon_intervals
                .iter()
                .map(|&(start, end)| Exon {
                    start,
                    end,
                    coding_region: coding_region(start, end, cds_intervals),
                })
                .collect();
            annotation.add_transcript(gene, &row.transcript_id, exons)?;
            if !cds_intervals.is_empty() {
                annotation.gene_mut(gene).is_protein_coding = true;
            }
        }

        Ok(annotation)
    }
}

/// Part of the exon `[start, end]` covered by CDS rows, if any.
fn coding_region(
    start: Position,
    end: Position,
    cds: &[(Position, Position)],
) -> Option<CodingRegion> {
    cds.iter()
        .filter(|&&(cds_start, cds_end)| cds_start <= end && cds_end >= start)
        .map(|&(cds_start, cds_end)| (cds_start.max(start), cds_end.min(end)))
        .reduce(|a, b| (a.0.min(b.0), a.1.max(b.1)))
        .map(|(start, end)| CodingRegion { start, end })
}
