//! Reading frame of the first transcribed base relative to a transcript's coding exons.

use crate::annotation::{Gene, Transcript};
use crate::contig::Position;
use crate::sequence::{Assembly, reverse_complement};
use crate::strand::Strand;

const START_CODON: &[u8; 3] = b"ATG";

/// Outcome of [`get_reading_frame`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct ReadingFrame {
    /// Frame (0, 1 or 2) of the first transcribed base, None if it cannot be determined.
    pub frame: Option<u8>,
    /// Index of the first coding exon in transcription order, if the transcript has one.
    pub start_exon: Option<usize>,
}

impl ReadingFrame {
    #[must_use]
    pub fn unknown() -> Self {
        Self::default()
    }
}

/// Whether the coding region of `transcript.exons[exon]` begins with ATG on the gene's strand.
fn has_start_codon(transcript: &Transcript, exon: usize, gene: &Gene, assembly: &Assembly) -> bool {
    let Some(cds) = transcript.exons[exon].coding_region else {
        return false;
    };
    match gene.strand {
        Strand::Forward => assembly
            .substring(gene.contig, cds.start, 3)
            .is_some_and(|codon| codon.eq_ignore_ascii_case(START_CODON)),
        Strand::Reverse => assembly
            .substring(gene.contig, cds.end - 2, 3)
            .is_some_and(|codon| reverse_complement(codon).eq_ignore_ascii_case(START_CODON)),
    }
}

/// Determine the reading frame of `transcribed_bases[from]`.
///
/// `transcribed_bases` maps each character of a fusion transcript to its
/// genomic position (None for inserted or control characters); only
/// `from..=to` is considered. The frame is derived from the first base in that
/// range that falls into a coding exon, counting the coding lengths of all
/// exons skipped since the start codon, and then stepped back to `from` over
/// the bases that have a genomic position.
///
/// The frame is None when the transcript is unknown or non-coding, when its
/// annotated start codon is not ATG, or when no base lies in a coding exon.
pub fn get_reading_frame(
    transcribed_bases: &[Option<Position>],
    from: usize,
    to: usize,
    transcript: Option<&Transcript>,
    gene: &Gene,
    assembly: &Assembly,
) -> ReadingFrame {
    let Some(transcript) = transcript else {
        return ReadingFrame::unknown();
    };

    // exon containing the start codon
    let start_exon = transcript
        .first_exon(gene.strand)
        .and_then(|first| {
            transcript
                .exons_from(first, gene.strand)
                .find(|(_, exon)| exon.is_coding())
        })
        .map(|(index, _)| index);
    let Some(start_exon) = start_exon else {
        return ReadingFrame::unknown();
    };

    let mut result = ReadingFrame {
        frame: None,
        start_exon: Some(start_exon),
    };

    // a coding region that does not begin with ATG is mis-annotated
    if !has_start_codon(transcript, start_exon, gene, assembly) {
        return result;
    }

    let last = to.min(transcribed_bases.len().saturating_sub(1));
    let mut skipped_coding_bases: Position = 0;
    let mut found: Option<(usize, Position)> = None;
    for (_, exon) in transcript.exons_from(start_exon, gene.strand) {
        let Some(cds) = exon.coding_region else {
            continue;
        };
        let hit = (from..=last).find_map(|position| {
            transcribed_bases[position]
                .filter(|&genomic| cds.contains(genomic))
                .map(|genomic| (position, genomic))
        });
        match hit {
            Some((position, genomic)) => {
                let offset = match gene.strand {
                    Strand::Forward => genomic - cds.start,
                    Strand::Reverse => cds.end - genomic,
                };
                found = Some((position, (skipped_coding_bases + offset) % 3));
                break;
            }
            None => skipped_coding_bases += cds.len(),
        }
    }

    // the fusion transcript does not overlap any coding region
    let Some((coding_base, frame)) = found else {
        return result;
    };

    // step back to the first transcribed base, skipping control characters and insertions
    let mut frame = u8::try_from(frame).unwrap_or(0);
    for position in (from..coding_base).rev() {
        if transcribed_bases[position].is_some() {
            frame = (frame + 2) % 3;
        }
    }

    result.frame = Some(frame);
    result
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::annotation::{CodingRegion, Exon, GeneAnnotation, TranscriptId};

    fn exon(start: Position, end: Position, cds: Option<(Position, Position)>) -> Exon {
        Exon {
            start,
            end,
            coding_region: cds.map(|(start, end)| CodingRegion { start, end }),
        }
    }

    fn setup(strand: Strand, exons: Vec<Exon>) -> (GeneAnnotation, TranscriptId) {
        let mut annotation = GeneAnnotation::new();
        let gene = annotation
            .add_gene(Gene {
                id: "G".to_string(),
                name: "G".to_string(),
                contig: 0,
                start: 0,
                end: 1000,
                strand,
                is_protein_coding: true,
            })
            .unwrap();
        let tx = annotation.add_transcript(gene, "T", exons).unwrap();
        (annotation, tx)
    }

    /// 1 kb of C with the given motifs placed at 0-based offsets.
    fn assembly_with(motifs: &[(usize, &[u8])]) -> Assembly {
        let mut seq = vec![b'C'; 1000];
        for (offset, motif) in motifs {
            seq[*offset..*offset + motif.len()].copy_from_slice(motif);
        }
        let mut assembly = Assembly::new();
        assembly.insert(0, seq);
        assembly
    }

    fn positions(values: &[i32]) -> Vec<Option<Position>> {
        values.iter().map(|&v| (v >= 0).then_some(v)).collect()
    }

    fn frame_of(
        strand: Strand,
        exons: Vec<Exon>,
        assembly: &Assembly,
        bases: &[Option<Position>],
    ) -> ReadingFrame {
        let (annotation, tx) = setup(strand, exons);
        let transcript = annotation.transcript(tx);
        let gene = annotation.gene(transcript.gene);
        get_reading_frame(bases, 0, bases.len() - 1, Some(transcript), gene, assembly)
    }

    #[test]
    fn unknown_transcript() {
        let (annotation, tx) = setup(Strand::Forward, vec![exon(100, 200, Some((100, 200)))]);
        let gene = annotation.gene(annotation.transcript(tx).gene);
        let result = get_reading_frame(&[Some(100)], 0, 0, None, gene, &Assembly::new());
        assert_eq!(result, ReadingFrame::unknown());
    }

    #[test]
    fn non_coding_transcript() {
        let assembly = assembly_with(&[(100, b"ATG")]);
        let result = frame_of(
            Strand::Forward,
            vec![exon(100, 200, None), exon(300, 400, None)],
            &assembly,
            &positions(&[100, 101]),
        );
        assert_eq!(result.frame, None);
        assert_eq!(result.start_exon, None);
    }

    #[test]
    fn missing_start_codon() {
        let assembly = assembly_with(&[(100, b"ATC")]);
        let result = frame_of(
            Strand::Forward,
            vec![exon(100, 200, Some((100, 200)))],
            &assembly,
            &positions(&[100, 101, 102]),
        );
        assert_eq!(result.frame, None);
        assert_eq!(result.start_exon, Some(0));
    }

    #[test]
    fn forward_first_coding_exon() {
        let assembly = assembly_with(&[(110, b"ATG")]);
        let exons = vec![exon(50, 60, None), exon(100, 200, Some((110, 200)))];
        for (first, expected) in [(110, 0), (111, 1), (112, 2), (113, 0), (120, 1)] {
            let result = frame_of(
                Strand::Forward,
                exons.clone(),
                &assembly,
                &positions(&[first, first + 1]),
            );
            assert_eq!(result.frame, Some(expected), "first base at {first}");
            assert_eq!(result.start_exon, Some(1));
        }
    }

    #[test]
    fn forward_skipped_exons_shift_frame() {
        let assembly = assembly_with(&[(103, b"ATG")]);
        // first exon contributes 7 coding bases
        let exons = vec![exon(100, 109, Some((103, 109))), exon(200, 220, Some((200, 220)))];
        let result = frame_of(Strand::Forward, exons.clone(), &assembly, &positions(&[203, 204]));
        assert_eq!(result.frame, Some(1));

        // two leading bases outside any coding exon step the frame back twice
        let result = frame_of(Strand::Forward, exons, &assembly, &positions(&[50, 51, 203]));
        assert_eq!(result.frame, Some(2));
    }

    #[test]
    fn control_characters_do_not_count() {
        let assembly = assembly_with(&[(103, b"ATG")]);
        let exons = vec![exon(100, 109, Some((103, 109))), exon(200, 220, Some((200, 220)))];
        let result = frame_of(Strand::Forward, exons, &assembly, &positions(&[-1, 51, -1, 203]));
        assert_eq!(result.frame, Some(0));
    }

    #[test]
    fn reverse_strand() {
        // reverse complement of CAT is ATG
        let assembly = assembly_with(&[(148, b"CAT")]);
        let exons = vec![exon(100, 150, Some((100, 150)))];
        for (first, expected) in [(150, 0), (149, 1), (148, 2), (147, 0), (146, 1)] {
            let result = frame_of(
                Strand::Reverse,
                exons.clone(),
                &assembly,
                &positions(&[first, first - 1]),
            );
            assert_eq!(result.frame, Some(expected), "first base at {first}");
        }
    }

    #[test]
    fn reverse_strand_walks_exons_backwards() {
        let assembly = assembly_with(&[(498, b"CAT")]);
        // start codon exon is the last one; it contributes 11 coding bases
        let exons = vec![exon(100, 150, Some((100, 150))), exon(480, 600, Some((490, 500)))];
        let result = frame_of(Strand::Reverse, exons, &assembly, &positions(&[150, 149]));
        assert_eq!(result.start_exon, Some(1));
        assert_eq!(result.frame, Some(2));
    }

    #[test]
    fn no_overlap_with_coding_region() {
        let assembly = assembly_with(&[(110, b"ATG")]);
        let result = frame_of(
            Strand::Forward,
            vec![exon(100, 200, Some((110, 200)))],
            &assembly,
            &positions(&[300, 301, -1]),
        );
        assert_eq!(result.frame, None);
        assert_eq!(result.start_exon, Some(0));
    }

    #[test]
    fn start_codon_outside_assembly() {
        let assembly = assembly_with(&[]);
        let result = frame_of(
            Strand::Reverse,
            vec![exon(0, 1, Some((0, 1)))],
            &assembly,
            &positions(&[0]),
        );
        assert_eq!(result.frame, None);
    }
}
