// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Sequence changes on the genome.
//!
//! A [`GenomeVariant`](struct.GenomeVariant.html) is always kept in a
//! normalized form: common trailing bases of reference and alternative
//! allele are removed first, then common leading bases (advancing the
//! position). Insertions thus have an empty reference allele and
//! deletions an empty alternative allele.
//!
//! ```
//! # use bio_varanno::coord::ParseError;
//! # fn try_main() -> Result<(), ParseError> {
//! use bio_varanno::refdict::ReferenceDictionaryBuilder;
//! use bio_varanno::variant::{GenomeVariant, VariantKind};
//! let mut builder = ReferenceDictionaryBuilder::new();
//! builder.add_contig("chr1", 249_250_621);
//! let dict = builder.build();
//! let var = GenomeVariant::parse(dict, "chr1:6641050CA>CG")?;
//! assert_eq!(var.kind(), VariantKind::Snv);
//! assert_eq!(var.pos().pos(), 6641050);
//! assert_eq!(var.to_string(), "chr1:6641051A>G");
//! # Ok(())
//! # }
//! # fn main() { try_main().unwrap(); }
//! ```

use std::fmt::{self, Debug, Display, Formatter};
use std::sync::Arc;

use regex::Regex;
use strum_macros::{AsRefStr, Display as StrumDisplay};

use crate::coord::interval::GenomeInterval;
use crate::coord::pos::GenomePosition;
use crate::coord::{resolve_contig, ParseError};
use crate::refdict::ReferenceDictionary;
use crate::sequence::{is_valid_nucleotides, reverse_complement, Sequence};
use crate::strand::Strand;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Shape of a normalized sequence change.
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[derive(Debug, PartialEq, Eq, Clone, Copy, Hash, AsRefStr, StrumDisplay)]
pub enum VariantKind {
    /// One base replaced by another.
    Snv,
    /// Several bases replaced by the same number of bases.
    Mnv,
    Insertion,
    Deletion,
    /// Bases replaced by a different number of bases.
    Delins,
}

/// A normalized sequence change at a genomic position.
///
/// For insertions the position is the boundary in front of which the
/// alternative bases are inserted; otherwise it is the first replaced base.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct GenomeVariant {
    pos: GenomePosition,
    ref_bases: Sequence,
    alt_bases: Sequence,
}

impl GenomeVariant {
    /// Create a normalized variant; alleles are upper-cased and must consist
    /// of `A`, `C`, `G`, `T`, `N`. Reference and alternative must differ.
    pub fn new(pos: GenomePosition, ref_bases: &[u8], alt_bases: &[u8]) -> Result<Self, ParseError> {
        let ref_bases = ref_bases.to_ascii_uppercase();
        let alt_bases = alt_bases.to_ascii_uppercase();
        for allele in [&ref_bases, &alt_bases] {
            if !is_valid_nucleotides(allele) {
                return Err(ParseError::InvalidBases(
                    String::from_utf8_lossy(allele).into_owned(),
                ));
            }
        }
        if ref_bases == alt_bases {
            return Err(ParseError::BadFormat(format!(
                "reference and alternative allele are identical ({})",
                String::from_utf8_lossy(&ref_bases)
            )));
        }
        Ok(Self::normalized(pos, ref_bases, alt_bases))
    }

    fn normalized(mut pos: GenomePosition, mut ref_bases: Sequence, mut alt_bases: Sequence) -> Self {
        let suffix = ref_bases
            .iter()
            .rev()
            .zip(alt_bases.iter().rev())
            .take_while(|(r, a)| r == a)
            .count();
        ref_bases.truncate(ref_bases.len() - suffix);
        alt_bases.truncate(alt_bases.len() - suffix);

        let prefix = ref_bases
            .iter()
            .zip(alt_bases.iter())
            .take_while(|(r, a)| r == a)
            .count();
        ref_bases.drain(..prefix);
        alt_bases.drain(..prefix);
        pos += prefix as isize;

        GenomeVariant {
            pos,
            ref_bases,
            alt_bases,
        }
    }

    /// Parse `<contig>:<1-based position><ref>><alt>`, using `-` for an
    /// empty allele. An insertion is placed in front of the given position.
    pub fn parse(dict: Arc<ReferenceDictionary>, s: &str) -> Result<Self, ParseError> {
        lazy_static! {
            static ref CHANGE_RE: Regex =
                Regex::new(r"^(.+):(\d+)([A-Za-z]*|-)>([A-Za-z]*|-)$").unwrap();
        }

        let cap = CHANGE_RE
            .captures(s.trim())
            .ok_or_else(|| ParseError::BadFormat(s.to_owned()))?;
        let (chr, _) = resolve_contig(&dict, &cap[1])?;
        let pos = cap[2].parse::<isize>()?;
        if pos == 0 {
            return Err(ParseError::ZeroPosition(pos));
        }
        let allele = |m: &str| if m == "-" { Vec::new() } else { m.as_bytes().to_vec() };
        let pos = GenomePosition::new(dict, Strand::Forward, chr, pos - 1)?;
        Self::new(pos, &allele(&cap[3]), &allele(&cap[4]))
    }

    /// First affected base, or the insertion point.
    pub fn pos(&self) -> &GenomePosition {
        &self.pos
    }

    pub fn chr(&self) -> u32 {
        self.pos.chr()
    }

    pub fn strand(&self) -> Strand {
        self.pos.strand()
    }

    pub fn ref_bases(&self) -> &[u8] {
        &self.ref_bases
    }

    pub fn alt_bases(&self) -> &[u8] {
        &self.alt_bases
    }

    pub fn kind(&self) -> VariantKind {
        match (self.ref_bases.len(), self.alt_bases.len()) {
            (0, _) => VariantKind::Insertion,
            (_, 0) => VariantKind::Deletion,
            (1, 1) => VariantKind::Snv,
            (r, a) if r == a => VariantKind::Mnv,
            _ => VariantKind::Delins,
        }
    }

    /// Change in sequence length caused by the variant.
    pub fn length_change(&self) -> isize {
        self.alt_bases.len() as isize - self.ref_bases.len() as isize
    }

    /// The reference bases replaced by the variant; empty for insertions.
    pub fn genome_interval(&self) -> GenomeInterval {
        GenomeInterval::from_parts(
            &self.pos,
            self.pos.pos(),
            self.pos.pos() + self.ref_bases.len() as isize,
        )
    }

    /// The same change described on `strand`, with both alleles
    /// reverse-complemented when the strand flips.
    pub fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand() {
            return self.clone();
        }
        GenomeVariant {
            pos: self.genome_interval().with_strand(strand).begin_pos(),
            ref_bases: reverse_complement(&self.ref_bases),
            alt_bases: reverse_complement(&self.alt_bases),
        }
    }
}

fn allele_str(bases: &[u8]) -> String {
    if bases.is_empty() {
        "-".to_owned()
    } else {
        String::from_utf8_lossy(bases).into_owned()
    }
}

impl Debug for GenomeVariant {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("GenomeVariant")
            .field("pos", &self.pos)
            .field("ref", &allele_str(&self.ref_bases))
            .field("alt", &allele_str(&self.alt_bases))
            .finish()
    }
}

impl Display for GenomeVariant {
    /// Formats the variant on the forward strand in the 1-based text form
    /// accepted by `parse`.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        let fwd = self.with_strand(Strand::Forward);
        write!(
            f,
            "{}:{}{}>{}",
            fwd.pos.contig_name(),
            fwd.pos.pos() + 1,
            allele_str(&fwd.ref_bases),
            allele_str(&fwd.alt_bases)
        )
    }
}
