// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Nucleotide and protein sequence helpers: complementing, validation,
//! the standard genetic code, and amino acid names.

use crate::config::AminoAcidCode;

/// A DNA base
pub type Base = u8;
/// An amino acid, as its one-letter code (`*` for stop, `X` for unknown)
pub type AminoAcid = u8;
/// A biological sequence
pub type Sequence = Vec<u8>;

/// Amino acid used for a codon that cannot be translated.
pub const UNKNOWN_AMINO_ACID: AminoAcid = b'X';
pub const STOP: AminoAcid = b'*';

/// Complement of a single base; anything unknown becomes `N`.
pub fn complement(base: Base) -> Base {
    match base {
        b'A' | b'a' => b'T',
        b'C' | b'c' => b'G',
        b'G' | b'g' => b'C',
        b'T' | b't' | b'U' | b'u' => b'A',
        _ => b'N',
    }
}

pub fn reverse_complement(seq: &[u8]) -> Sequence {
    seq.iter().rev().map(|&b| complement(b)).collect()
}

/// Whether `seq` consists of `A`, `C`, `G`, `T` and `N` only.
pub fn is_valid_nucleotides(seq: &[u8]) -> bool {
    seq.iter().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T' | b'N'))
}

/// Whether `seq` contains only unambiguous bases.
pub fn is_unambiguous(seq: &[u8]) -> bool {
    seq.iter().all(|b| matches!(b, b'A' | b'C' | b'G' | b'T'))
}

fn base_to_index(b: Base) -> Option<usize> {
    match b {
        b'A' | b'a' => Some(0),
        b'C' | b'c' => Some(1),
        b'G' | b'g' => Some(2),
        b'T' | b't' | b'U' | b'u' => Some(3),
        _ => None,
    }
}

// Indexed by A=0, C=1, G=2, T=3 as first*16 + second*4 + third.
#[rustfmt::skip]
const STANDARD_CODE: [AminoAcid; 64] = [
    b'K', b'N', b'K', b'N',
    b'T', b'T', b'T', b'T',
    b'R', b'S', b'R', b'S',
    b'I', b'I', b'M', b'I',
    b'Q', b'H', b'Q', b'H',
    b'P', b'P', b'P', b'P',
    b'R', b'R', b'R', b'R',
    b'L', b'L', b'L', b'L',
    b'E', b'D', b'E', b'D',
    b'A', b'A', b'A', b'A',
    b'G', b'G', b'G', b'G',
    b'V', b'V', b'V', b'V',
    b'*', b'Y', b'*', b'Y',
    b'S', b'S', b'S', b'S',
    b'*', b'C', b'W', b'C',
    b'L', b'F', b'L', b'F',
];

/// Translate one codon with the standard genetic code.
///
/// Returns `None` for codons that are too short or contain a base other
/// than `A`, `C`, `G`, `T`/`U`.
pub fn translate_codon(codon: &[u8]) -> Option<AminoAcid> {
    if codon.len() < 3 {
        return None;
    }
    let i0 = base_to_index(codon[0])?;
    let i1 = base_to_index(codon[1])?;
    let i2 = base_to_index(codon[2])?;
    Some(STANDARD_CODE[i0 * 16 + i1 * 4 + i2])
}

/// Translate a nucleotide sequence codon by codon.
///
/// Untranslatable codons become `X`; a trailing partial codon is dropped.
pub fn translate(seq: &[u8]) -> Vec<AminoAcid> {
    seq.chunks_exact(3)
        .map(|c| translate_codon(c).unwrap_or(UNKNOWN_AMINO_ACID))
        .collect()
}

/// Three-letter name of an amino acid; stop stays `*`.
pub fn three_letter(aa: AminoAcid) -> &'static str {
    match aa {
        b'A' => "Ala",
        b'R' => "Arg",
        b'N' => "Asn",
        b'D' => "Asp",
        b'C' => "Cys",
        b'Q' => "Gln",
        b'E' => "Glu",
        b'G' => "Gly",
        b'H' => "His",
        b'I' => "Ile",
        b'L' => "Leu",
        b'K' => "Lys",
        b'M' => "Met",
        b'F' => "Phe",
        b'P' => "Pro",
        b'S' => "Ser",
        b'T' => "Thr",
        b'W' => "Trp",
        b'Y' => "Tyr",
        b'V' => "Val",
        b'U' => "Sec",
        b'*' => "*",
        _ => "Xaa",
    }
}

/// Render a run of amino acids with the requested code.
pub fn amino_acid_string(aas: &[AminoAcid], code: AminoAcidCode) -> String {
    match code {
        AminoAcidCode::OneLetter => aas.iter().map(|&a| a as char).collect(),
        AminoAcidCode::ThreeLetter => aas.iter().map(|&a| three_letter(a)).collect(),
    }
}
