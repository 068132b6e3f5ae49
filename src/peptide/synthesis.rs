//! Translation of an annotated fusion transcript into a peptide.
//!
//! The transcript string carries bases and control characters: `|` junction
//! markers, `[` and `]` around inserted bases, `-` for a deleted base and
//! `...` for unreconstructed sequence. Every character has a parallel genomic
//! position, None where the character has no genomic origin.
//!
//! Amino acids are uppercase when translation is trustworthy and lowercase
//! when the codon differs from the reference, lies in a non-template insert,
//! an indel or an intron, is out of frame, or spans the junction.

use crate::annotation::{CodingRegion, Gene, Transcript};
use crate::codon::{STOP, dna_to_protein};
use crate::contig::Position;
use crate::sequence::{Assembly, complement};
use crate::strand::Strand;

use super::frame::{ReadingFrame, get_reading_frame};
use super::layout::TranscriptLayout;

/// Returned when no peptide can be predicted.
pub const NO_PEPTIDE: &str = ".";

const JUNCTION: char = '|';

/// One side of the fusion.
#[derive(Debug, Clone, Copy)]
pub struct FusionPartner<'a> {
    pub gene: &'a Gene,
    pub transcript: Option<&'a Transcript>,
}

/// Where the scan currently is.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Phase {
    /// Waiting for the first base at or after the 5′ start codon.
    SeekingStart,
    Translating5,
    InNonTemplate,
    Translating3,
    /// A stop codon on the 3′ side ended translation.
    Done,
}

/// Kind of a transcript character.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BaseClass {
    Nucleotide(u8),
    IndelOpen,
    IndelClose,
    Deletion,
    Junction,
    Other,
}

impl BaseClass {
    fn of(c: u8) -> Self {
        match c {
            b'A' | b'C' | b'G' | b'T' | b'a' | b'c' | b'g' | b't' | b'?' => Self::Nucleotide(c),
            b'[' => Self::IndelOpen,
            b']' => Self::IndelClose,
            b'-' => Self::Deletion,
            b'|' => Self::Junction,
            _ => Self::Other,
        }
    }
}

/// Frame-resolved view of a fusion partner.
struct ResolvedPartner<'a> {
    gene: &'a Gene,
    transcript: Option<&'a Transcript>,
    frame: ReadingFrame,
}

impl ResolvedPartner<'_> {
    /// Whether `position` lies in the coding part of the exon that contains it,
    /// walking exons from the start codon exon in `strand` order.
    /// Positions outside every exon count as intronic.
    fn is_intronic(&self, position: Position, strand: Strand) -> bool {
        let (Some(transcript), Some(start_exon)) = (self.transcript, self.frame.start_exon) else {
            return true;
        };
        transcript
            .exons_from(start_exon, strand)
            .find(|(_, exon)| exon.contains(position))
            .is_none_or(|(_, exon)| !exon.coding_contains(position))
    }
}

struct Translator<'a> {
    sequence: &'a [u8],
    positions: &'a [Option<Position>],
    layout: TranscriptLayout,
    five: ResolvedPartner<'a>,
    three: ResolvedPartner<'a>,
    start_codon: CodingRegion,
    assembly: &'a Assembly,

    phase: Phase,
    inside_indel: bool,
    inside_intron: bool,
    frame_shift: usize,
    bases_from_5: u8,
    bases_from_3: u8,
    codon: Vec<u8>,
    reference_codon: Vec<u8>,
    peptide: String,
}

impl Translator<'_> {
    fn region(&self, index: usize) -> Phase {
        if self.layout.is_five_prime(index) {
            Phase::Translating5
        } else if self.layout.is_three_prime(index) {
            Phase::Translating3
        } else {
            Phase::InNonTemplate
        }
    }

    /// First base at or beyond the annotated 5′ start codon.
    fn is_past_start_codon(&self, index: usize) -> bool {
        self.positions[index].is_some_and(|position| match self.five.gene.strand {
            Strand::Forward => position >= self.start_codon.start,
            Strand::Reverse => position <= self.start_codon.end,
        })
    }

    fn step(&mut self, index: usize) {
        if self.phase == Phase::SeekingStart && !self.is_past_start_codon(index) {
            return;
        }
        self.phase = self.region(index);

        match BaseClass::of(self.sequence[index]) {
            BaseClass::Nucleotide(base) => self.push_base(index, base),
            BaseClass::IndelOpen => self.inside_indel = true,
            BaseClass::IndelClose => self.inside_indel = false,
            BaseClass::Deletion => self.frame_shift = (self.frame_shift + 2) % 3,
            BaseClass::Junction | BaseClass::Other => {}
        }

        if let Some(position) = self.positions[index] {
            self.inside_intron = self.is_intronic(position);
        }

        if self.codon.len() == 3 && self.emit_amino_acid() {
            self.phase = Phase::Done;
            return;
        }

        self.mark_junction(index);

        if index == self.layout.three_start
            && let Some(frame) = self.three.frame.frame
        {
            self.frame_shift = (3 + usize::from(frame) + 1 - self.codon.len()) % 3;
        }
    }

    fn push_base(&mut self, index: usize, base: u8) {
        if self.codon.is_empty() {
            self.bases_from_5 = 0;
            self.bases_from_3 = 0;
        }
        match self.phase {
            Phase::Translating5 => self.bases_from_5 += 1,
            Phase::Translating3 => self.bases_from_3 += 1,
            _ => {}
        }
        self.codon.push(base);

        if let Some(position) = self.positions[index] {
            let gene = if self.phase == Phase::Translating5 {
                self.five.gene
            } else {
                self.three.gene
            };
            if let Some(reference) = self.assembly.base(gene.contig, position) {
                let reverse = match self.phase {
                    Phase::Translating5 => self.five.gene.strand.is_reverse(),
                    Phase::Translating3 => self.three.gene.strand.is_reverse(),
                    _ => false,
                };
                self.reference_codon
                    .push(if reverse { complement(reference) } else { reference });
            }
        }

        if self.inside_indel {
            self.frame_shift = (self.frame_shift + 1) % 3;
        }
    }

    fn is_intronic(&self, position: Position) -> bool {
        match self.phase {
            Phase::Translating5 => self.five.is_intronic(position, self.five.gene.strand),
            Phase::Translating3 => self.three.is_intronic(position, self.three.gene.strand),
            // non-template bases are checked against the 3′ transcript towards lower coordinates
            _ => self.three.is_intronic(position, Strand::Reverse),
        }
    }

    /// Translate the completed codon. Returns true when translation must stop.
    fn emit_amino_acid(&mut self) -> bool {
        let amino_acid = dna_to_protein(&self.codon);
        let reference = dna_to_protein(&self.reference_codon);

        let uncertain = self.phase == Phase::InNonTemplate
            || amino_acid != reference
            || self.inside_indel
            || self.inside_intron
            || (self.phase == Phase::Translating5 && self.bases_from_5 != 3)
            || (self.phase == Phase::Translating3 && self.bases_from_3 != 3)
            || self.frame_shift != 0
            || (self.phase == Phase::Translating3 && self.three.frame.frame.is_none());

        let symbol = if uncertain {
            amino_acid.to_ascii_lowercase()
        } else {
            amino_acid
        };
        self.peptide.push(char::from(symbol));
        self.codon.clear();
        self.reference_codon.clear();

        self.bases_from_3 >= 2 && amino_acid == STOP
    }

    fn push_junction(&mut self) {
        if !self.peptide.ends_with(JUNCTION) {
            self.peptide.push(JUNCTION);
        }
    }

    fn mark_junction(&mut self, index: usize) {
        let layout = self.layout;
        if (index == layout.five_end && self.codon.len() <= 1)
            || (self.bases_from_5 == 2 && self.codon.is_empty())
        {
            self.push_junction();
        }
        if layout.non_template_len > 0
            && ((index + 2 == layout.three_start && self.codon.len() <= 1)
                || (self.bases_from_3 == 1 && self.codon.is_empty()))
        {
            self.push_junction();
        }
    }

    fn run(mut self, from: usize) -> String {
        for index in from..self.layout.three_end {
            self.step(index);
            if self.phase == Phase::Done {
                break;
            }
        }
        self.peptide
    }
}

/// Predict the peptide encoded by a fusion transcript.
///
/// `positions` holds the genomic position of every character of
/// `transcript_sequence`. The 3′ reading frame is only resolved when the 3′
/// gene lies on `predicted_strand_3`. Returns [`NO_PEPTIDE`] when the input is
/// unusable or the 5′ reading frame cannot be determined.
pub fn get_fusion_peptide_sequence(
    transcript_sequence: &str,
    positions: &[Option<Position>],
    five: FusionPartner<'_>,
    three: FusionPartner<'_>,
    predicted_strand_3: Option<Strand>,
    assembly: &Assembly,
) -> String {
    if transcript_sequence.is_empty()
        || transcript_sequence == NO_PEPTIDE
        || transcript_sequence.contains("...|")
        || transcript_sequence.contains("|...")
    {
        return NO_PEPTIDE.to_string();
    }

    if !assembly.contains(five.gene.contig) || !assembly.contains(three.gene.contig) {
        return NO_PEPTIDE.to_string();
    }

    let sequence = transcript_sequence.as_bytes();
    if positions.len() != sequence.len() {
        return NO_PEPTIDE.to_string();
    }

    let Some(layout) = TranscriptLayout::parse(sequence) else {
        return NO_PEPTIDE.to_string();
    };

    let frame_5 = get_reading_frame(
        positions,
        layout.five_start,
        layout.five_end,
        five.transcript,
        five.gene,
        assembly,
    );
    let (Some(frame), Some(start_exon), Some(transcript_5)) =
        (frame_5.frame, frame_5.start_exon, five.transcript)
    else {
        return NO_PEPTIDE.to_string();
    };
    let Some(start_codon) = transcript_5.exons[start_exon].coding_region else {
        return NO_PEPTIDE.to_string();
    };

    let frame_3 = if predicted_strand_3 == Some(three.gene.strand) {
        get_reading_frame(
            positions,
            layout.three_start,
            layout.three_end,
            three.transcript,
            three.gene,
            assembly,
        )
    } else {
        ReadingFrame::unknown()
    };

    // skip to the first complete codon
    let offset = if frame == 0 { 0 } else { 3 - usize::from(frame) };

    let translator = Translator {
        sequence,
        positions,
        layout,
        five: ResolvedPartner {
            gene: five.gene,
            transcript: five.transcript,
            frame: frame_5,
        },
        three: ResolvedPartner {
            gene: three.gene,
            transcript: three.transcript,
            frame: frame_3,
        },
        start_codon,
        assembly,
        phase: Phase::SeekingStart,
        inside_indel: false,
        inside_intron: false,
        frame_shift: 0,
        bases_from_5: 0,
        bases_from_3: 0,
        codon: Vec::with_capacity(3),
        reference_codon: Vec::with_capacity(3),
        peptide: String::new(),
    };
    translator.run(layout.five_start + offset)
}
