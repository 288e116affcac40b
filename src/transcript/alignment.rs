// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Alignment of the exonic reference bases of a transcript against its
//! recorded sequence.
//!
//! Offsets on the reference side count the concatenated exon bases in
//! transcription order; offsets on the sequence side count the recorded
//! cDNA. Consecutive anchors delimit a segment that is either a match
//! (both sides advance by the same amount), a gap in the sequence (only
//! the reference advances) or an insertion in the sequence (only the
//! sequence advances).
//!
//! ```
//! use bio_varanno::transcript::alignment::{Alignment, Anchor};
//! // two reference bases at 10..12 are missing from the recorded sequence
//! let aln = Alignment::new(vec![
//!     Anchor::new(0, 0),
//!     Anchor::new(10, 10),
//!     Anchor::new(12, 10),
//!     Anchor::new(100, 98),
//! ]).unwrap();
//! assert_eq!(aln.ref_to_seq(5), Ok(5));
//! assert!(aln.ref_to_seq(11).is_err());
//! assert_eq!(aln.ref_to_seq(50), Ok(48));
//! assert_eq!(aln.seq_to_ref(48), Ok(50));
//! ```

use thiserror::Error;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AlignmentError {
    #[error("position {0} falls into an alignment gap")]
    InGap(isize),
    #[error("anchors must be non-decreasing on both sides")]
    Unordered,
    #[error("segment {0} advances both sides by different amounts")]
    Unbalanced(usize),
}

/// Pair of corresponding offsets on the reference and sequence side.
#[derive(new, Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Anchor {
    pub ref_pos: isize,
    pub seq_pos: isize,
}

/// Piecewise mapping between reference and sequence offsets.
///
/// Without anchors, or outside the anchored range, offsets map with the
/// shift of the nearest anchor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Alignment {
    anchors: Vec<Anchor>,
}

impl Alignment {
    pub fn new(anchors: Vec<Anchor>) -> Result<Self, AlignmentError> {
        for (i, pair) in anchors.windows(2).enumerate() {
            let dr = pair[1].ref_pos - pair[0].ref_pos;
            let ds = pair[1].seq_pos - pair[0].seq_pos;
            if dr < 0 || ds < 0 {
                return Err(AlignmentError::Unordered);
            }
            if dr != 0 && ds != 0 && dr != ds {
                return Err(AlignmentError::Unbalanced(i));
            }
        }
        Ok(Alignment { anchors })
    }

    /// Ungapped alignment of `len` bases.
    pub fn identity(len: isize) -> Self {
        Alignment {
            anchors: vec![Anchor::new(0, 0), Anchor::new(len, len)],
        }
    }

    pub fn anchors(&self) -> &[Anchor] {
        &self.anchors
    }

    /// Whether the recorded sequence differs in length or layout from the
    /// reference.
    pub fn has_gaps(&self) -> bool {
        self.anchors
            .windows(2)
            .any(|p| p[1].ref_pos - p[0].ref_pos != p[1].seq_pos - p[0].seq_pos)
    }

    /// Reference offset of the last anchor.
    pub fn ref_len(&self) -> isize {
        self.anchors.last().map_or(0, |a| a.ref_pos)
    }

    /// Sequence offset of the last anchor.
    pub fn seq_len(&self) -> isize {
        self.anchors.last().map_or(0, |a| a.seq_pos)
    }

    pub fn ref_to_seq(&self, pos: isize) -> Result<isize, AlignmentError> {
        map_through(&self.anchors, pos, |a| (a.ref_pos, a.seq_pos))
    }

    pub fn seq_to_ref(&self, pos: isize) -> Result<isize, AlignmentError> {
        map_through(&self.anchors, pos, |a| (a.seq_pos, a.ref_pos))
    }
}

// Map `pos` from the "from" side of the anchors to the "to" side.
fn map_through<F>(anchors: &[Anchor], pos: isize, sides: F) -> Result<isize, AlignmentError>
where
    F: Fn(&Anchor) -> (isize, isize),
{
    let k = anchors.partition_point(|a| sides(a).0 <= pos);
    if k == 0 {
        return Ok(anchors.first().map_or(pos, |a| {
            let (from, to) = sides(a);
            pos - from + to
        }));
    }
    let (from, to) = sides(&anchors[k - 1]);
    if k == anchors.len() {
        return Ok(pos - from + to);
    }
    let (next_from, next_to) = sides(&anchors[k]);
    if next_to == to && next_from > from {
        return Err(AlignmentError::InGap(pos));
    }
    Ok(pos - from + to)
}
