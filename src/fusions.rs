//! Fusion event tables: reading predicted fusions, annotating them and writing
//! the annotated table back out.
//!
//! The input is tab-separated with a header line (optionally prefixed by `#`).
//! Column names are matched up to an optional parenthesized suffix, so
//! `strand1(gene/fusion)` is accepted for `strand1`.

use std::collections::HashMap;
use std::io::{BufRead, Write};

use log::{info, warn};

use crate::annotation::{GeneAnnotation, GeneId, TranscriptId};
use crate::contig::{ContigId, ContigMap, Position};
use crate::domains::{ProteinDomains, annotate_retained_protein_domains};
use crate::error::Error;
use crate::peptide::{
    FrameStatus, FusionPartner, NO_PEPTIDE, get_fusion_peptide_sequence, is_in_frame,
};
use crate::sequence::Assembly;
use crate::strand::{Direction, Strand};

const MISSING: &str = ".";

/// Columns appended (or overwritten) by [`write_fusions`].
pub const OUTPUT_COLUMNS: [&str; 4] = [
    "retained_protein_domains1",
    "retained_protein_domains2",
    "peptide_sequence",
    "reading_frame",
];

const REQUIRED_COLUMNS: [&str; 8] = [
    "gene1",
    "gene2",
    "strand1",
    "strand2",
    "breakpoint1",
    "breakpoint2",
    "direction1",
    "direction2",
];

/// Strands of one fusion partner: the annotated gene strand and the strand
/// the fusion transcript was predicted on (None if ambiguous).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartnerStrands {
    pub gene: Option<Strand>,
    pub transcript: Option<Strand>,
}

impl PartnerStrands {
    /// Parse `gene/transcript`, e.g. `+/-`. A single symbol applies to both.
    pub fn parse(s: &str) -> Result<Self, Error> {
        let (gene, transcript) = s.split_once('/').unwrap_or((s, s));
        Ok(Self {
            gene: Strand::parse_predicted(gene)?,
            transcript: Strand::parse_predicted(transcript)?,
        })
    }

    /// Whether the reported gene strand disagrees with the annotated one.
    #[must_use]
    pub fn contradicts(&self, annotated: Strand) -> bool {
        self.gene.is_some_and(|strand| strand != annotated)
    }
}

/// One side of a fusion event resolved against the gene model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionSide {
    pub gene: GeneId,
    pub strands: PartnerStrands,
    pub contig: ContigId,
    /// 0-based.
    pub breakpoint: Position,
    pub direction: Direction,
    pub transcript: Option<TranscriptId>,
}

/// A fusion event with both partners resolved.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionEvent {
    pub five: FusionSide,
    pub three: FusionSide,
    pub transcript_sequence: Option<String>,
    /// 0-based genomic position of every character of `transcript_sequence`.
    pub transcript_positions: Vec<Option<Position>>,
}

/// Annotations computed for one fusion event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FusionAnnotation {
    pub retained_domains_5: String,
    pub retained_domains_3: String,
    pub peptide: String,
    pub frame: FrameStatus,
}

impl FusionAnnotation {
    /// Placeholder for rows that could not be annotated.
    #[must_use]
    pub fn unavailable() -> Self {
        Self {
            retained_domains_5: String::new(),
            retained_domains_3: String::new(),
            peptide: NO_PEPTIDE.to_string(),
            frame: FrameStatus::Unknown,
        }
    }

    fn values(&self) -> [&str; 4] {
        [
            or_missing(&self.retained_domains_5),
            or_missing(&self.retained_domains_3),
            or_missing(&self.peptide),
            self.frame.as_str(),
        ]
    }
}

/// Rows of a fusion table with their header.
#[derive(Debug, Clone)]
pub struct FusionTable {
    commented_header: bool,
    header: Vec<String>,
    columns: HashMap<String, usize>,
    rows: Vec<Vec<String>>,
}

fn or_missing(value: &str) -> &str {
    if value.is_empty() { MISSING } else { value }
}

fn column_key(name: &str) -> &str {
    name.split_once('(').map_or(name, |(key, _)| key).trim()
}

/// Read a tab-separated fusion table.
pub fn read_fusions<R: BufRead>(reader: R) -> Result<FusionTable, Error> {
    let mut lines = reader.lines();
    let header_line = lines
        .next()
        .transpose()?
        .ok_or_else(|| Error::Format("fusion table is empty".to_string()))?;
    let commented_header = header_line.starts_with('#');
    let header: Vec<String> = header_line
        .trim_start_matches('#')
        .trim_end_matches('\r')
        .split('\t')
        .map(str::to_string)
        .collect();

    let mut columns = HashMap::new();
    for (i, name) in header.iter().enumerate() {
        columns.entry(column_key(name).to_string()).or_insert(i);
    }
    for required in REQUIRED_COLUMNS {
        if !columns.contains_key(required) {
            return Err(Error::Format(format!(
                "fusion table lacks column '{required}'"
            )));
        }
    }

    let mut rows = Vec::new();
    for line in lines {
        let line = line?;
        let line = line.trim_end_matches('\r');
        if line.is_empty() {
            continue;
        }
        rows.push(line.split('\t').map(str::to_string).collect());
    }

    Ok(FusionTable {
        commented_header,
        header,
        columns,
        rows,
    })
}

impl FusionTable {
    #[must_use]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    #[must_use]
    pub fn header(&self) -> &[String] {
        &self.header
    }

    /// Value of `column` in row `row`, None if the column or cell is absent.
    #[must_use]
    pub fn field(&self, row: usize, column: &str) -> Option<&str> {
        let index = *self.columns.get(column)?;
        self.rows.get(row)?.get(index).map(String::as_str)
    }

    fn required(&self, row: usize, column: &str) -> Result<&str, Error> {
        self.field(row, column)
            .ok_or_else(|| Error::Format(format!("missing value for column '{column}'")))
    }

    fn optional(&self, row: usize, column: &str) -> Option<&str> {
        self.field(row, column)
            .filter(|value| !value.is_empty() && *value != MISSING)
    }

    fn parse_side(
        &self,
        row: usize,
        side: u8,
        contigs: &ContigMap,
        annotation: &GeneAnnotation,
    ) -> Result<FusionSide, Error> {
        let column = |name: &str| format!("{name}{side}");

        let gene_name = self.required(row, &column("gene"))?;
        let gene = annotation
            .find_gene(gene_name)
            .ok_or_else(|| Error::Validation(format!("unknown gene: {gene_name}")))?;

        let strands = PartnerStrands::parse(self.required(row, &column("strand"))?)?;
        let annotated = annotation.gene(gene).strand;
        if strands.contradicts(annotated) {
            warn!(
                "line {}: strand{side} of {gene_name} does not match the annotated {annotated} strand",
                row + 2
            );
        }
        let (contig, breakpoint) =
            parse_breakpoint(self.required(row, &column("breakpoint"))?, contigs)?;
        let direction = self.required(row, &column("direction"))?.parse()?;

        let transcript = self
            .optional(row, &column("transcript_id"))
            .and_then(|id| annotation.transcript_by_id(id))
            .filter(|&id| annotation.transcript(id).gene == gene);

        Ok(FusionSide {
            gene,
            strands,
            contig,
            breakpoint,
            direction,
            transcript,
        })
    }

    /// Resolve row `row` against the contigs and the gene model.
    pub fn parse_event(
        &self,
        row: usize,
        contigs: &ContigMap,
        annotation: &GeneAnnotation,
    ) -> Result<FusionEvent, Error> {
        let five = self.parse_side(row, 1, contigs, annotation)?;
        let three = self.parse_side(row, 2, contigs, annotation)?;
        let transcript_sequence = self.optional(row, "fusion_transcript").map(str::to_string);
        let transcript_positions = self
            .optional(row, "transcript_positions")
            .map(parse_positions)
            .transpose()?
            .unwrap_or_default();
        Ok(FusionEvent {
            five,
            three,
            transcript_sequence,
            transcript_positions,
        })
    }
}

/// Parse a 1-based `contig:position` into a contig and 0-based position.
fn parse_breakpoint(s: &str, contigs: &ContigMap) -> Result<(ContigId, Position), Error> {
    let (name, position) = s
        .rsplit_once(':')
        .ok_or_else(|| Error::Parse(format!("invalid breakpoint: '{s}'")))?;
    let contig = contigs
        .get(name)
        .ok_or_else(|| Error::Validation(format!("unknown contig: {name}")))?;
    let position: Position = position
        .parse()
        .map_err(|_| Error::Parse(format!("invalid breakpoint position: '{s}'")))?;
    if position < 1 {
        return Err(Error::Parse(format!("invalid breakpoint position: '{s}'")));
    }
    Ok((contig, position - 1))
}

/// Parse comma-separated 1-based positions; `.` marks a character without genomic origin.
fn parse_positions(s: &str) -> Result<Vec<Option<Position>>, Error> {
    s.split(',')
        .map(|value| {
            if value == MISSING {
                return Ok(None);
            }
            match value.parse::<Position>() {
                Ok(position) if position >= 1 => Ok(Some(position - 1)),
                _ => Err(Error::Parse(format!("invalid transcript position: '{value}'"))),
            }
        })
        .collect()
}

fn retained_domains(
    side: &FusionSide,
    annotation: &GeneAnnotation,
    domains: &ProteinDomains,
) -> String {
    let gene_strand = annotation.gene(side.gene).strand;
    annotate_retained_protein_domains(
        side.contig,
        side.breakpoint,
        side.strands.transcript.unwrap_or(gene_strand),
        side.strands.transcript.is_none(),
        side.gene,
        annotation,
        side.direction,
        domains,
    )
}

/// Compute retained domains, peptide and reading frame of one fusion.
#[must_use]
pub fn annotate_fusion(
    event: &FusionEvent,
    annotation: &GeneAnnotation,
    assembly: &Assembly,
    domains: &ProteinDomains,
) -> FusionAnnotation {
    let partner = |side: &FusionSide| FusionPartner {
        gene: annotation.gene(side.gene),
        transcript: side.transcript.map(|id| annotation.transcript(id)),
    };

    let peptide = match &event.transcript_sequence {
        Some(sequence) => get_fusion_peptide_sequence(
            sequence,
            &event.transcript_positions,
            partner(&event.five),
            partner(&event.three),
            event.three.strands.transcript,
            assembly,
        ),
        None => NO_PEPTIDE.to_string(),
    };
    let frame = is_in_frame(&peptide);

    FusionAnnotation {
        retained_domains_5: retained_domains(&event.five, annotation, domains),
        retained_domains_3: retained_domains(&event.three, annotation, domains),
        peptide,
        frame,
    }
}

/// Annotate every row of `table`. Rows that cannot be resolved are reported and
/// receive [`FusionAnnotation::unavailable`].
#[must_use]
pub fn annotate_fusions(
    table: &FusionTable,
    contigs: &ContigMap,
    annotation: &GeneAnnotation,
    assembly: &Assembly,
    domains: &ProteinDomains,
) -> Vec<FusionAnnotation> {
    let mut unresolved = 0usize;
    let annotations: Vec<FusionAnnotation> = (0..table.len())
        .map(|row| match table.parse_event(row, contigs, annotation) {
            Ok(event) => annotate_fusion(&event, annotation, assembly, domains),
            Err(e) => {
                warn!("failed to parse fusion on line {}: {e}", row + 2);
                unresolved += 1;
                FusionAnnotation::unavailable()
            }
        })
        .collect();

    let in_frame = annotations
        .iter()
        .filter(|a| a.frame == FrameStatus::InFrame)
        .count();
    info!(
        "annotated {} fusions ({in_frame} in-frame, {unresolved} unresolved)",
        annotations.len()
    );
    annotations
}

/// Write `table` with the annotation columns filled in.
///
/// Existing columns with the same name are overwritten; the others are appended.
pub fn write_fusions<W: Write>(
    mut writer: W,
    table: &FusionTable,
    annotations: &[FusionAnnotation],
) -> Result<(), Error> {
    if annotations.len() != table.len() {
        return Err(Error::Validation(format!(
            "{} annotations for {} fusions",
            annotations.len(),
            table.len()
        )));
    }

    let mut header = table.header.clone();
    let widest = table.rows.iter().map(Vec::len).max().unwrap_or(0);
    if widest > header.len() {
        let wide_rows = table.rows.iter().filter(|row| row.len() > header.len()).count();
        warn!(
            "{wide_rows} fusions have more fields than the header; \
             annotation columns are appended after field {widest}"
        );
        header.resize(widest, String::new());
    }
    let mut targets = Vec::with_capacity(OUTPUT_COLUMNS.len());
    for name in OUTPUT_COLUMNS {
        match table.columns.get(name) {
            Some(&index) => targets.push(index),
            None => {
                targets.push(header.len());
                header.push(name.to_string());
            }
        }
    }

    if table.commented_header {
        write!(writer, "#")?;
    }
    writeln!(writer, "{}", header.join("\t"))?;

    for (row, annotation) in table.rows.iter().zip(annotations) {
        let mut fields: Vec<&str> = row.iter().map(String::as_str).collect();
        fields.resize(fields.len().max(header.len()), "");
        for (&target, value) in targets.iter().zip(annotation.values()) {
            fields[target] = value;
        }
        writeln!(writer, "{}", fields.join("\t"))?;
    }
    writer.flush()?;
    Ok(())
}
