//! Reading frame classification of a predicted fusion peptide.

use std::fmt;

/// Reading frame status of a fusion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FrameStatus {
    /// No peptide was predicted.
    Unknown,
    /// A stop codon before the junction leaves nothing reliable to fuse.
    StopCodon,
    OutOfFrame,
    InFrame,
}

impl FrameStatus {
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Unknown => ".",
            Self::StopCodon => "stop-codon",
            Self::OutOfFrame => "out-of-frame",
            Self::InFrame => "in-frame",
        }
    }
}

impl fmt::Display for FrameStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Classify a peptide produced by [`get_fusion_peptide_sequence`](super::get_fusion_peptide_sequence).
///
/// The 5′ side is usable when an uppercase amino acid follows the last stop
/// codon before the last junction marker; the fusion is in frame when the 3′
/// side then contains at least one uppercase amino acid.
#[must_use]
pub fn is_in_frame(peptide: &str) -> FrameStatus {
    if peptide == "." {
        return FrameStatus::Unknown;
    }

    let bytes = peptide.as_bytes();
    let junction = bytes.iter().rposition(|&c| c == b'|').unwrap_or(bytes.len());
    let stop = bytes[..junction].iter().rposition(|&c| c == b'*');
    let five_prime = &bytes[stop.map_or(0, |s| s + 1)..junction];

    if !five_prime.iter().any(u8::is_ascii_uppercase) {
        return if stop.is_some() {
            FrameStatus::StopCodon
        } else {
            FrameStatus::OutOfFrame
        };
    }

    if bytes[junction..].iter().any(u8::is_ascii_uppercase) {
        FrameStatus::InFrame
    } else {
        FrameStatus::OutOfFrame
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn no_peptide() {
        assert_eq!(is_in_frame("."), FrameStatus::Unknown);
        assert_eq!(is_in_frame(".").to_string(), ".");
    }

    #[test]
    fn in_frame() {
        assert_eq!(is_in_frame("MK|PGK"), FrameStatus::InFrame);
        assert_eq!(is_in_frame("Mk|pG"), FrameStatus::InFrame);
        // 5′ side recovers after an early stop codon
        assert_eq!(is_in_frame("MK*AB|PG"), FrameStatus::InFrame);
        // only the last junction marker counts
        assert_eq!(is_in_frame("MK|g|P"), FrameStatus::InFrame);
    }

    #[test]
    fn stop_codon_before_junction() {
        assert_eq!(is_in_frame("M*|PG"), FrameStatus::StopCodon);
        assert_eq!(is_in_frame("MK*ab|PG"), FrameStatus::StopCodon);
        assert_eq!(is_in_frame("M*|PG").as_str(), "stop-codon");
    }

    #[test]
    fn out_of_frame() {
        assert_eq!(is_in_frame("MK|pgk"), FrameStatus::OutOfFrame);
        assert_eq!(is_in_frame("mk|PG"), FrameStatus::OutOfFrame);
        assert_eq!(is_in_frame("MK|"), FrameStatus::OutOfFrame);
        assert_eq!(is_in_frame("MK|p*"), FrameStatus::OutOfFrame);
        assert_eq!(is_in_frame(""), FrameStatus::OutOfFrame);
        assert_eq!(is_in_frame("MK|pgk").to_string(), "out-of-frame");
    }

    #[test]
    fn without_junction_nothing_is_fused() {
        assert_eq!(is_in_frame("MKPG"), FrameStatus::OutOfFrame);
        assert_eq!(is_in_frame("MK*"), FrameStatus::StopCodon);
    }
}
