//! Partition of an annotated fusion transcript into its 5′ part, non-template
//! insert and 3′ part.
//!
//! `|` marks the junction; a second `|` closes a run of non-template bases.
//! `...` marks sequence that is not part of the reconstructed transcript.

const JUNCTION: u8 = b'|';
const GAP: &[u8] = b"...";

/// Inclusive index ranges within the transcript string.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TranscriptLayout {
    pub five_start: usize,
    pub five_end: usize,
    /// Number of bases between the two junction markers.
    pub non_template_len: usize,
    pub three_start: usize,
    pub three_end: usize,
}

fn find_from(haystack: &[u8], needle: &[u8], from: usize) -> Option<usize> {
    haystack
        .get(from..)?
        .windows(needle.len())
        .position(|window| window == needle)
        .map(|index| index + from)
}

impl TranscriptLayout {
    /// Locate the 5′ and 3′ parts. None if there is no junction or it is the first character.
    #[must_use]
    pub fn parse(sequence: &[u8]) -> Option<Self> {
        let junction = sequence.iter().position(|&c| c == JUNCTION)?;
        if junction == 0 {
            return None;
        }
        let five_end = junction - 1;

        // last gap that starts at or before the end of the 5′ part
        let five_start = sequence[..sequence.len().min(five_end + GAP.len())]
            .windows(GAP.len())
            .rposition(|window| window == GAP)
            .map_or(0, |index| index + GAP.len());

        let non_template_len = sequence
            .get(five_end + 2..)
            .and_then(|rest| rest.iter().position(|&c| c == JUNCTION))
            .unwrap_or(0);

        let mut three_start = five_end + 2;
        if non_template_len > 0 {
            three_start += non_template_len + 1;
        }

        let three_end = find_from(sequence, GAP, three_start)
            .map_or(sequence.len().saturating_sub(1), |index| index.saturating_sub(1));

        Some(Self {
            five_start,
            five_end,
            non_template_len,
            three_start,
            three_end,
        })
    }

    /// Whether `index` belongs to the 5′ part or anything before it.
    #[must_use]
    pub fn is_five_prime(&self, index: usize) -> bool {
        index <= self.five_end
    }

    /// Whether `index` belongs to the 3′ part or anything after it.
    #[must_use]
    pub fn is_three_prime(&self, index: usize) -> bool {
        index >= self.three_start
    }
}
