//! Loader for protein domain GFF3 files.
//!
//! Each data line describes one domain with `gene_name`, `gene_id` and `Name`
//! attributes. Lines that cannot be used are reported and skipped; only a
//! file without a single usable line is an error.

use std::collections::HashSet;
use std::io::BufRead;

use log::{info, warn};

use crate::annotation::{GeneAnnotation, GeneId};
use crate::contig::ContigMap;
use crate::error::Error;
use crate::gff3::parser::{self, ParsedLine};

use super::{ProteinDomain, ProteinDomains};

/// Replace whitespace, non-printable bytes, commas and pipes with underscores.
///
/// Commas and pipes separate entries in the output columns.
#[must_use]
pub fn sanitize_domain_name(raw: &[u8]) -> String {
    raw.iter()
        .map(|&b| {
            if !(b'!'..=b'~').contains(&b) || b == b',' || b == b'|' {
                '_'
            } else {
                b as char
            }
        })
        .collect()
}

/// Resolves the owning gene by version-less gene ID, falling back to gene name.
///
/// Unknown genes are reported once per (name, id) pair.
struct GeneResolver<'a> {
    annotation: &'a GeneAnnotation,
    unknown_genes: HashSet<(String, String)>,
}

impl<'a> GeneResolver<'a> {
    fn new(annotation: &'a GeneAnnotation) -> Self {
        Self {
            annotation,
            unknown_genes: HashSet::new(),
        }
    }

    fn resolve(&mut self, gene_name: &str, gene_id: &str) -> Option<GeneId> {
        let found = self
            .annotation
            .gene_by_id(gene_id)
            .or_else(|| self.annotation.gene_by_name(gene_name));
        if found.is_none()
            && self
                .unknown_genes
                .insert((gene_name.to_string(), gene_id.to_string()))
        {
            warn!("unknown gene: {gene_name} {gene_id}");
        }
        found
    }
}

fn parse_domain(
    line: &str,
    contigs: &ContigMap,
    genes: &mut GeneResolver<'_>,
) -> Option<ProteinDomain> {
    let record = match parser::parse_line(line) {
        Ok(ParsedLine::Record(record)) => record,
        Ok(ParsedLine::Comment | ParsedLine::EndOfFeatures) => return None,
        Err(e) => {
            warn!("failed to parse line in GFF3 file ({e}): {line}");
            return None;
        }
    };

    let attribute = |key: &str| {
        let value = record.attributes.get(key);
        if value.is_none() {
            warn!(
                "failed to extract {key} from line in GFF3 file: {}",
                record.attributes.0
            );
        }
        value
    };
    let gene_name = attribute("gene_name")?;
    let gene_id = attribute("gene_id")?;
    let name = attribute("Name")?;

    let Some(contig) = contigs.get(record.seqid) else {
        warn!("unknown contig: {}", record.seqid);
        return None;
    };

    if record.end < record.start {
        warn!("domain ends before it starts: {line}");
        return None;
    }

    let name = sanitize_domain_name(&parser::percent_decode(name));
    let gene = genes.resolve(gene_name, gene_id)?;

    Some(ProteinDomain {
        contig,
        start: record.start - 1, // GFF3 is one-based
        end: record.end - 1,
        strand: record.strand,
        name,
        gene,
    })
}

/// Load protein domains from GFF3 and index them by start coordinate.
///
/// `source` names the input in log and error messages.
pub fn load_protein_domains<R: BufRead>(
    reader: R,
    source: &str,
    contigs: &ContigMap,
    annotation: &GeneAnnotation,
) -> Result<ProteinDomains, Error> {
    let mut genes = GeneResolver::new(annotation);
    let mut records = Vec::new();
    let mut skipped = 0usize;

    for line in reader.lines() {
        let line = line?;
        if line.is_empty() || line.starts_with('#') {
            if line.starts_with("##FASTA") {
                break;
            }
            continue;
        }
        match parse_domain(&line, contigs, &mut genes) {
            Some(domain) => records.push(domain),
            None => skipped += 1,
        }
    }

    if records.is_empty() {
        return Err(Error::NoProteinDomains(source.to_string()));
    }

    info!(
        "loaded {} protein domains from {source} ({skipped} lines skipped)",
        records.len()
    );
    Ok(ProteinDomains::new(records))
}
