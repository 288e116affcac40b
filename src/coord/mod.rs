// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Coordinate primitives on the genome and inside a transcript.
//!
//! Genomic coordinates ([`GenomePosition`](pos/struct.GenomePosition.html)
//! and [`GenomeInterval`](interval/struct.GenomeInterval.html)) are tied to
//! a [`ReferenceDictionary`](../refdict/struct.ReferenceDictionary.html)
//! and a strand. Offsets are 0-based; intervals are half-open, like the
//! Rust `Range` and BED format. A position on the reverse strand counts
//! from the end of the contig, so flipping a base at offset `p` of a contig
//! of length `L` gives `L - p - 1`, and flipping an interval boundary `b`
//! gives `L - b`.
//!
//! Transcript-relative coordinates live in [`tx`](tx/index.html).
//!
//! ```
//! # use bio_varanno::coord::CoordError;
//! # fn try_main() -> Result<(), CoordError> {
//! use bio_varanno::coord::interval::GenomeInterval;
//! use bio_varanno::refdict::ReferenceDictionaryBuilder;
//! use bio_varanno::strand::Strand;
//! let mut builder = ReferenceDictionaryBuilder::new();
//! let chr1 = builder.add_contig("chr1", 1000);
//! let dict = builder.build();
//! let iv = GenomeInterval::new(dict.clone(), Strand::Forward, chr1, 100, 200)?;
//! let rev = iv.with_strand(Strand::Reverse);
//! assert_eq!((rev.begin(), rev.end()), (800, 900));
//! assert_eq!(rev.to_string(), "chr1:800-900(-)");
//! # Ok(())
//! # }
//! # fn main() { try_main().unwrap(); }
//! ```

use std::num::ParseIntError;
use std::sync::Arc;

use thiserror::Error;

use crate::refdict::ReferenceDictionary;

pub mod interval;
pub mod pos;
pub mod tx;

pub use self::interval::GenomeInterval;
pub use self::pos::GenomePosition;

/// Errors that arise when combining or creating coordinates.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CoordError {
    #[error("coordinates refer to different reference dictionaries")]
    DictionaryMismatch,
    #[error("coordinates lie on different contigs ({0} vs {1})")]
    ContigMismatch(u32, u32),
    #[error("coordinates lie on different strands")]
    StrandMismatch,
    #[error("unknown contig {0:?}")]
    UnknownContig(String),
    #[error("unknown contig id {0}")]
    UnknownContigId(u32),
    #[error("ending position {end} < starting position {begin}")]
    EndBeforeStart { begin: isize, end: isize },
}

/// Errors that arise in parsing coordinates and variants from text.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ParseError {
    #[error("malformed input {0:?}")]
    BadFormat(String),
    #[error("invalid bases {0:?}, expected only A, C, G, T or N")]
    InvalidBases(String),
    #[error("integer parsing error: {0}")]
    ParseInt(#[from] ParseIntError),
    #[error("position must be 1-based, got {0}")]
    ZeroPosition(isize),
    #[error(transparent)]
    Coord(#[from] CoordError),
}

// Resolve a contig name and its length against a dictionary.
pub(crate) fn resolve_contig(
    dict: &ReferenceDictionary,
    name: &str,
) -> Result<(u32, isize), CoordError> {
    let id = dict
        .contig_id(name)
        .ok_or_else(|| CoordError::UnknownContig(name.to_owned()))?;
    let len = dict
        .contig_length(id)
        .ok_or(CoordError::UnknownContigId(id))?;
    Ok((id, len))
}

pub(crate) fn contig_length(dict: &ReferenceDictionary, chr: u32) -> Result<isize, CoordError> {
    dict.contig_length(chr).ok_or(CoordError::UnknownContigId(chr))
}

pub(crate) fn check_same_dict(
    a: &Arc<ReferenceDictionary>,
    b: &Arc<ReferenceDictionary>,
) -> Result<(), CoordError> {
    if ReferenceDictionary::same_instance(a, b) {
        Ok(())
    } else {
        Err(CoordError::DictionaryMismatch)
    }
}

// Break a position display string into a reference name part and the
// "rest"
pub(crate) fn break_refid(s: &str) -> Result<(&str, &str), ParseError> {
    let breakpt = s
        .rfind(':')
        .ok_or_else(|| ParseError::BadFormat(s.to_owned()))?;
    let refid = &s[..breakpt];
    let rest = &s[(breakpt + 1)..];
    if refid.is_empty() || rest.is_empty() {
        return Err(ParseError::BadFormat(s.to_owned()));
    }
    Ok((refid, rest))
}
