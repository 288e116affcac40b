// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Positions on a contig of a reference dictionary, e.g., base 6,641,049
//! on the forward strand of chromosome 1.

use std::cmp::Ordering;
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::ops::{AddAssign, SubAssign};
use std::sync::Arc;

use crate::coord::*;
use crate::refdict::ReferenceDictionary;
use crate::strand::Strand;

/// Position of a single base on a contig.
///
/// The offset is 0-based and counted on the position's own strand, so a
/// reverse-strand position counts from the 3' end of the forward contig.
///
/// The display format is _chr:pos(+/-)_ with the 0-based offset.
///
/// ```
/// # use bio_varanno::coord::CoordError;
/// # fn try_main() -> Result<(), CoordError> {
/// use bio_varanno::coord::pos::GenomePosition;
/// use bio_varanno::refdict::ReferenceDictionaryBuilder;
/// use bio_varanno::strand::Strand;
/// let mut builder = ReferenceDictionaryBuilder::new();
/// let chr4 = builder.add_contig("chrIV", 1_531_933);
/// let dict = builder.build();
/// let pos = GenomePosition::new(dict, Strand::Forward, chr4, 683946)?;
/// assert_eq!(pos.to_string(), "chrIV:683946(+)");
/// let rev = pos.with_strand(Strand::Reverse);
/// assert_eq!(rev.pos(), 1_531_933 - 683946 - 1);
/// assert_eq!(rev.with_strand(Strand::Forward), pos);
/// # Ok(())
/// # }
/// # fn main() { try_main().unwrap(); }
/// ```
#[derive(Clone)]
pub struct GenomePosition {
    dict: Arc<ReferenceDictionary>,
    strand: Strand,
    chr: u32,
    pos: isize,
    contig_len: isize,
}

impl GenomePosition {
    /// Construct a new position; the contig must be known to `dict`.
    pub fn new(
        dict: Arc<ReferenceDictionary>,
        strand: Strand,
        chr: u32,
        pos: isize,
    ) -> Result<Self, CoordError> {
        let contig_len = contig_length(&dict, chr)?;
        Ok(GenomePosition {
            dict,
            strand,
            chr,
            pos,
            contig_len,
        })
    }

    // Construct from parts already validated by another coordinate value.
    pub(crate) fn from_parts(
        dict: Arc<ReferenceDictionary>,
        strand: Strand,
        chr: u32,
        pos: isize,
        contig_len: isize,
    ) -> Self {
        GenomePosition {
            dict,
            strand,
            chr,
            pos,
            contig_len,
        }
    }

    /// Construct a position from a contig name or alias.
    pub fn with_contig_name(
        dict: Arc<ReferenceDictionary>,
        strand: Strand,
        name: &str,
        pos: isize,
    ) -> Result<Self, CoordError> {
        let (chr, contig_len) = resolve_contig(&dict, name)?;
        Ok(GenomePosition {
            dict,
            strand,
            chr,
            pos,
            contig_len,
        })
    }

    /// Parse the display format `chr:pos(+/-)` (0-based, strand optional).
    pub fn parse(dict: Arc<ReferenceDictionary>, s: &str) -> Result<Self, ParseError> {
        let (refid, rest) = break_refid(s)?;
        let (posstr, strand) = Strand::break_pos_strand(rest);
        let pos = posstr.parse::<isize>()?;
        Ok(Self::with_contig_name(dict, strand, refid, pos)?)
    }

    pub fn dict(&self) -> &Arc<ReferenceDictionary> {
        &self.dict
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    /// Numeric contig id.
    pub fn chr(&self) -> u32 {
        self.chr
    }

    /// Position on the contig (0-based, on `strand()`).
    pub fn pos(&self) -> isize {
        self.pos
    }

    pub fn contig_len(&self) -> isize {
        self.contig_len
    }

    /// Primary name of the contig.
    pub fn contig_name(&self) -> &str {
        self.dict.contig_name(self.chr).unwrap_or("?")
    }

    /// The same base, described on `strand`.
    pub fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand {
            return self.clone();
        }
        GenomePosition {
            dict: self.dict.clone(),
            strand,
            chr: self.chr,
            pos: self.contig_len - self.pos - 1,
            contig_len: self.contig_len,
        }
    }

    /// Slide the position by `delta` along its own strand.
    pub fn shifted(&self, delta: isize) -> Self {
        let mut res = self.clone();
        res += delta;
        res
    }

    /// Signed distance `self - other`, measured on the strand of `self`.
    pub fn difference_to(&self, other: &GenomePosition) -> Result<isize, CoordError> {
        self.check_compatible(other)?;
        Ok(self.pos - other.with_strand(self.strand).pos)
    }

    /// Check that both positions can be combined, i.e. share a dictionary
    /// instance and a contig.
    pub fn check_compatible(&self, other: &GenomePosition) -> Result<(), CoordError> {
        check_same_dict(&self.dict, &other.dict)?;
        if self.chr != other.chr {
            return Err(CoordError::ContigMismatch(self.chr, other.chr));
        }
        Ok(())
    }

    /// Whether `self` lies strictly before `other` when both are read on
    /// the strand of `self`.
    pub fn is_lt(&self, other: &GenomePosition) -> Result<bool, CoordError> {
        Ok(self.difference_to(other)? < 0)
    }

    pub fn is_gt(&self, other: &GenomePosition) -> Result<bool, CoordError> {
        Ok(self.difference_to(other)? > 0)
    }
}

impl AddAssign<isize> for GenomePosition {
    /// Slide the position downstream on its own strand.
    fn add_assign(&mut self, dist: isize) {
        self.pos += dist;
    }
}

impl SubAssign<isize> for GenomePosition {
    fn sub_assign(&mut self, dist: isize) {
        self.pos -= dist;
    }
}

impl PartialEq for GenomePosition {
    fn eq(&self, other: &Self) -> bool {
        ReferenceDictionary::same_instance(&self.dict, &other.dict)
            && self.chr == other.chr
            && self.strand == other.strand
            && self.pos == other.pos
    }
}

impl Eq for GenomePosition {}

impl Hash for GenomePosition {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chr.hash(state);
        self.strand.hash(state);
        self.pos.hash(state);
    }
}

impl PartialOrd for GenomePosition {
    /// Positions are only comparable on the same dictionary, contig and
    /// strand; everything else yields `None`.
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if !ReferenceDictionary::same_instance(&self.dict, &other.dict)
            || self.chr != other.chr
            || self.strand != other.strand
        {
            return None;
        }
        Some(self.pos.cmp(&other.pos))
    }
}

impl Debug for GenomePosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("GenomePosition")
            .field("chr", &self.chr)
            .field("strand", &self.strand)
            .field("pos", &self.pos)
            .finish()
    }
}

impl Display for GenomePosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:{}{}", self.contig_name(), self.pos, self.strand)
    }
}
