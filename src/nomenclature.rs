// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Rendering of changes in HGVS-style nucleotide (`c.`/`n.`) and protein
//! (`p.`) nomenclature.
//!
//! ```
//! use bio_varanno::config::AminoAcidCode;
//! use bio_varanno::nomenclature::{AaPos, ProteinChange};
//! let change = ProteinChange::Substitution {
//!     at: AaPos::new(b'W', 24),
//!     alt: b'C',
//! };
//! assert_eq!(change.render(AminoAcidCode::ThreeLetter), "p.Trp24Cys");
//! assert_eq!(change.render(AminoAcidCode::OneLetter), "p.W24C");
//! ```

use std::fmt::Write;

use crate::config::AminoAcidCode;
use crate::projector::NtPosition;
use crate::sequence::{amino_acid_string, AminoAcid};

/// Deleted sequences longer than this are written as their length.
pub const MAX_DELETED_SEQ_LEN: usize = 10;

/// Nucleotide-level change with positions in nomenclature numbering.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NtChange {
    Substitution {
        at: NtPosition,
        ref_base: u8,
        alt_base: u8,
    },
    Deletion {
        first: NtPosition,
        last: NtPosition,
        deleted: Vec<u8>,
    },
    Insertion {
        before: NtPosition,
        after: NtPosition,
        inserted: Vec<u8>,
    },
    Duplication {
        first: NtPosition,
        last: NtPosition,
    },
    Delins {
        first: NtPosition,
        last: NtPosition,
        inserted: Vec<u8>,
    },
}

fn nt_range(first: &NtPosition, last: &NtPosition) -> String {
    if first == last {
        first.to_string()
    } else {
        format!("{}_{}", first, last)
    }
}

impl NtChange {
    /// Render with the given coordinate prefix, `c` or `n`.
    pub fn render(&self, prefix: char) -> String {
        let body = match self {
            NtChange::Substitution {
                at,
                ref_base,
                alt_base,
            } => format!("{}{}>{}", at, *ref_base as char, *alt_base as char),
            NtChange::Deletion {
                first,
                last,
                deleted,
            } => {
                if deleted.len() <= MAX_DELETED_SEQ_LEN {
                    format!("{}del{}", nt_range(first, last), String::from_utf8_lossy(deleted))
                } else {
                    format!("{}del{}", nt_range(first, last), deleted.len())
                }
            }
            NtChange::Insertion {
                before,
                after,
                inserted,
            } => format!("{}_{}ins{}", before, after, String::from_utf8_lossy(inserted)),
            NtChange::Duplication { first, last } => format!("{}dup", nt_range(first, last)),
            NtChange::Delins {
                first,
                last,
                inserted,
            } => format!(
                "{}delins{}",
                nt_range(first, last),
                String::from_utf8_lossy(inserted)
            ),
        };
        format!("{}.{}", prefix, body)
    }
}

/// An amino acid with its 1-based position in the protein.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq)]
pub struct AaPos {
    pub aa: AminoAcid,
    pub pos: isize,
}

/// Protein-level consequence.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProteinChange {
    /// `p.=`
    Unchanged,
    /// `p.?`
    Unknown,
    /// `p.0?`, the start codon is affected.
    NoProtein,
    /// `p.Trp24Cys`, `p.Trp24*`
    Substitution { at: AaPos, alt: AminoAcid },
    Deletion { first: AaPos, last: AaPos },
    Insertion {
        left: AaPos,
        right: AaPos,
        inserted: Vec<AminoAcid>,
    },
    Duplication { first: AaPos, last: AaPos },
    Delins {
        first: AaPos,
        last: AaPos,
        inserted: Vec<AminoAcid>,
    },
    /// `p.Arg97Profs*23`; the distance counts the first changed residue as
    /// 1 and includes the new stop, `None` when no stop is reached.
    Frameshift {
        at: AaPos,
        alt: Option<AminoAcid>,
        stop_distance: Option<isize>,
    },
    /// `p.*110Glnext*17`
    Extension {
        at: AaPos,
        alt: AminoAcid,
        stop_distance: Option<isize>,
    },
}

impl ProteinChange {
    pub fn render(&self, code: AminoAcidCode) -> String {
        let aa = |a: AminoAcid| amino_acid_string(&[a], code);
        let aas = |a: &[AminoAcid]| amino_acid_string(a, code);
        let point = |p: &AaPos| format!("{}{}", aa(p.aa), p.pos);
        let range = |f: &AaPos, l: &AaPos| {
            if f.pos == l.pos {
                point(f)
            } else {
                format!("{}_{}", point(f), point(l))
            }
        };
        let dist = |d: &Option<isize>| match d {
            Some(d) => d.to_string(),
            None => "?".to_owned(),
        };

        let mut s = String::from("p.");
        // writing into a String cannot fail
        let _ = match self {
            ProteinChange::Unchanged => write!(s, "="),
            ProteinChange::Unknown => write!(s, "?"),
            ProteinChange::NoProtein => write!(s, "0?"),
            ProteinChange::Substitution { at, alt } => write!(s, "{}{}", point(at), aa(*alt)),
            ProteinChange::Deletion { first, last } => write!(s, "{}del", range(first, last)),
            ProteinChange::Insertion {
                left,
                right,
                inserted,
            } => write!(s, "{}_{}ins{}", point(left), point(right), aas(inserted)),
            ProteinChange::Duplication { first, last } => write!(s, "{}dup", range(first, last)),
            ProteinChange::Delins {
                first,
                last,
                inserted,
            } => write!(s, "{}delins{}", range(first, last), aas(inserted)),
            ProteinChange::Frameshift {
                at,
                alt,
                stop_distance,
            } => match alt {
                Some(alt) => write!(s, "{}{}fs*{}", point(at), aa(*alt), dist(stop_distance)),
                None => write!(s, "{}fs*{}", point(at), dist(stop_distance)),
            },
            ProteinChange::Extension {
                at,
                alt,
                stop_distance,
            } => write!(s, "{}{}ext*{}", point(at), aa(*alt), dist(stop_distance)),
        };
        s
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn nt(base: isize) -> NtPosition {
        NtPosition {
            base,
            after_cds: false,
            offset: 0,
        }
    }

    #[test]
    fn nucleotide_changes() {
        let sub = NtChange::Substitution {
            at: nt(381),
            ref_base: b'A',
            alt_base: b'G',
        };
        assert_eq!(sub.render('c'), "c.381A>G");
        let del = NtChange::Deletion {
            first: nt(10),
            last: nt(12),
            deleted: b"ACG".to_vec(),
        };
        assert_eq!(del.render('c'), "c.10_12delACG");
        let long = NtChange::Deletion {
            first: nt(10),
            last: nt(21),
            deleted: vec![b'A'; 12],
        };
        assert_eq!(long.render('n'), "n.10_21del12");
        let ins = NtChange::Insertion {
            before: NtPosition {
                base: 50,
                after_cds: false,
                offset: 3,
            },
            after: NtPosition {
                base: 50,
                after_cds: false,
                offset: 4,
            },
            inserted: b"T".to_vec(),
        };
        assert_eq!(ins.render('c'), "c.50+3_50+4insT");
        let dup = NtChange::Duplication {
            first: nt(-5),
            last: nt(-5),
        };
        assert_eq!(dup.render('c'), "c.-5dup");
        let delins = NtChange::Delins {
            first: NtPosition {
                base: 3,
                after_cds: true,
                offset: 0,
            },
            last: NtPosition {
                base: 4,
                after_cds: true,
                offset: 0,
            },
            inserted: b"GG".to_vec(),
        };
        assert_eq!(delins.render('c'), "c.*3_*4delinsGG");
    }

    #[test]
    fn protein_changes() {
        let three = AminoAcidCode::ThreeLetter;
        let one = AminoAcidCode::OneLetter;
        assert_eq!(ProteinChange::Unchanged.render(three), "p.=");
        assert_eq!(ProteinChange::Unknown.render(three), "p.?");
        assert_eq!(ProteinChange::NoProtein.render(one), "p.0?");
        let stop = ProteinChange::Substitution {
            at: AaPos::new(b'W', 24),
            alt: b'*',
        };
        assert_eq!(stop.render(three), "p.Trp24*");
        let del = ProteinChange::Deletion {
            first: AaPos::new(b'K', 5),
            last: AaPos::new(b'K', 5),
        };
        assert_eq!(del.render(three), "p.Lys5del");
        let ins = ProteinChange::Insertion {
            left: AaPos::new(b'K', 5),
            right: AaPos::new(b'L', 6),
            inserted: b"GS".to_vec(),
        };
        assert_eq!(ins.render(three), "p.Lys5_Leu6insGlySer");
        let dup = ProteinChange::Duplication {
            first: AaPos::new(b'K', 5),
            last: AaPos::new(b'L', 6),
        };
        assert_eq!(dup.render(one), "p.K5_L6dup");
        let fs = ProteinChange::Frameshift {
            at: AaPos::new(b'R', 97),
            alt: Some(b'P'),
            stop_distance: Some(23),
        };
        assert_eq!(fs.render(three), "p.Arg97Profs*23");
        let fs = ProteinChange::Frameshift {
            at: AaPos::new(b'R', 97),
            alt: Some(b'P'),
            stop_distance: None,
        };
        assert_eq!(fs.render(one), "p.R97Pfs*?");
        let ext = ProteinChange::Extension {
            at: AaPos::new(b'*', 110),
            alt: b'Q',
            stop_distance: Some(17),
        };
        assert_eq!(ext.render(three), "p.*110Glnext*17");
    }
}
