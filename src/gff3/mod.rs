//! GFF3 parsing: line tokenizer, attribute decoding and the gene model loader.

pub mod entry;
pub mod hierarchy;
pub mod parser;

use std::io::BufRead;

use log::info;

use crate::annotation::GeneAnnotation;
use crate::contig::ContigMap;
use crate::error::Error;

use hierarchy::HierarchyBuilder;
use parser::ParsedLine;

/// Parse a GFF3 gene annotation into the gene/transcript/exon model.
///
/// Records on contigs missing from `contigs` are discarded.
pub fn load_gene_annotation<R: BufRead>(
    reader: R,
    contigs: &ContigMap,
) -> Result<GeneAnnotation, Error> {
    let mut builder = HierarchyBuilder::new();
    let mut discarded = 0usize;

    for (line_num, line) in reader.lines().enumerate() {
        let line_num = line_num + 1;
        let line = line?;
        let record = match parser::parse_line(&line)
            .map_err(|e| Error::Parse(format!("{e} (line {line_num}: {line})")))?
        {
            ParsedLine::Record(record) => record,
            ParsedLine::Comment => continue,
            ParsedLine::EndOfFeatures => break,
        };
        let Some(contig) = contigs.get(record.seqid) else {
            discarded += 1;
            continue;
        };
        builder
            .add(&record, contig)
            .map_err(|e| Error::Parse(format!("{e} (line {line_num})")))?;
    }

    let annotation = builder.build()?;
    info!(
        "loaded {} genes and {} transcripts ({discarded} records on unknown contigs)",
        annotation.gene_count(),
        annotation.transcript_count()
    );
    Ok(annotation)
}
