//! Codon translation using the standard genetic code.

/// Amino acid reported for a codon that cannot be translated.
pub const UNTRANSLATABLE: u8 = b'?';

/// Stop codon symbol.
pub const STOP: u8 = b'*';

/// Codon families whose third base is irrelevant (fourfold degenerate sites).
/// Matched on the first two bases alone, so a partial codon of one of these
/// families still translates.
const FOURFOLD_FAMILIES: [([u8; 2], u8); 8] = [
    (*b"GC", b'A'),
    (*b"GG", b'G'),
    (*b"CT", b'L'),
    (*b"CC", b'P'),
    (*b"CG", b'R'),
    (*b"TC", b'S'),
    (*b"AC", b'T'),
    (*b"GT", b'V'),
];

/// Standard genetic code (NCBI translation table 1).
///
/// Indexed by 6-bit codon encoding: A=0, C=1, G=2, T=3.
/// Index = first*16 + second*4 + third.
#[rustfmt::skip]
const STANDARD_TABLE: [u8; 64] = [
    b'K', b'N', b'K', b'N',  // AA*: AAA=K, AAC=N, AAG=K, AAT=N
    b'T', b'T', b'T', b'T',  // AC*
    b'R', b'S', b'R', b'S',  // AG*: AGA=R, AGC=S, AGG=R, AGT=S
    b'I', b'I', b'M', b'I',  // AT*: ATA=I, ATC=I, ATG=M, ATT=I
    b'Q', b'H', b'Q', b'H',  // CA*: CAA=Q, CAC=H, CAG=Q, CAT=H
    b'P', b'P', b'P', b'P',  // CC*
    b'R', b'R', b'R', b'R',  // CG*
    b'L', b'L', b'L', b'L',  // CT*
    b'E', b'D', b'E', b'D',  // GA*: GAA=E, GAC=D, GAG=E, GAT=D
    b'A', b'A', b'A', b'A',  // GC*
    b'G', b'G', b'G', b'G',  // GG*
    b'V', b'V', b'V', b'V',  // GT*
    b'*', b'Y', b'*', b'Y',  // TA*: TAA=*, TAC=Y, TAG=*, TAT=Y
    b'S', b'S', b'S', b'S',  // TC*
    b'*', b'C', b'W', b'C',  // TG*: TGA=*, TGC=C, TGG=W, TGT=C
    b'L', b'F', b'L', b'F',  // TT*: TTA=L, TTC=F, TTG=L, TTT=F
];

fn base_to_index(b: u8) -> Option<usize> {
    match b.to_ascii_uppercase() {
        b'A' => Some(0),
        b'C' => Some(1),
        b'G' => Some(2),
        b'T' => Some(3),
        _ => None,
    }
}

/// Translate a codon to a single-letter amino acid (case-insensitive).
///
/// Returns [`UNTRANSLATABLE`] for anything that is neither a complete
/// `ACGT` triplet nor a prefix of a fourfold degenerate family.
#[must_use]
pub fn dna_to_protein(codon: &[u8]) -> u8 {
    if codon.len() >= 2 {
        let prefix = [codon[0].to_ascii_uppercase(), codon[1].to_ascii_uppercase()];
        if let Some(&(_, amino_acid)) = FOURFOLD_FAMILIES.iter().find(|(p, _)| *p == prefix) {
            return amino_acid;
        }
    }
    if codon.len() != 3 {
        return UNTRANSLATABLE;
    }
    match (
        base_to_index(codon[0]),
        base_to_index(codon[1]),
        base_to_index(codon[2]),
    ) {
        (Some(a), Some(b), Some(c)) => STANDARD_TABLE[a * 16 + b * 4 + c],
        _ => UNTRANSLATABLE,
    }
}
