// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Contiguous region on a contig, e.g., chromosome 1
//! 6,640,062-6,649,339 on the forward strand.

use std::cmp::{max, min};
use std::fmt::{self, Debug, Display, Formatter};
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use regex::Regex;

use crate::coord::pos::GenomePosition;
use crate::coord::*;
use crate::refdict::ReferenceDictionary;
use crate::strand::Strand;

/// Half-open region `[begin, end)` on one contig and strand.
///
/// Both boundaries are offsets on the interval's own strand. Flipping the
/// strand maps `[b, e)` to `[L - e, L - b)` for a contig of length `L`, so
/// the same bases are covered.
///
/// The display format is _chr:begin-end(+/-)_.
#[derive(Clone)]
pub struct GenomeInterval {
    dict: Arc<ReferenceDictionary>,
    strand: Strand,
    chr: u32,
    begin: isize,
    end: isize,
    contig_len: isize,
}

impl GenomeInterval {
    /// Construct a new interval; requires `begin <= end` and a known contig.
    pub fn new(
        dict: Arc<ReferenceDictionary>,
        strand: Strand,
        chr: u32,
        begin: isize,
        end: isize,
    ) -> Result<Self, CoordError> {
        if end < begin {
            return Err(CoordError::EndBeforeStart { begin, end });
        }
        let contig_len = contig_length(&dict, chr)?;
        Ok(GenomeInterval {
            dict,
            strand,
            chr,
            begin,
            end,
            contig_len,
        })
    }

    // Construct from parts already validated by another coordinate value.
    pub(crate) fn from_parts(pos: &GenomePosition, begin: isize, end: isize) -> Self {
        GenomeInterval {
            dict: pos.dict().clone(),
            strand: pos.strand(),
            chr: pos.chr(),
            begin,
            end,
            contig_len: pos.contig_len(),
        }
    }

    /// Interval of `length` bases starting at `pos`, on the strand of `pos`.
    pub fn with_first_length(pos: &GenomePosition, length: isize) -> Result<Self, CoordError> {
        Self::new(
            pos.dict().clone(),
            pos.strand(),
            pos.chr(),
            pos.pos(),
            pos.pos() + length,
        )
    }

    /// Interval spanning from the base `begin` up to, excluding, `end`.
    pub fn from_positions(begin: &GenomePosition, end: &GenomePosition) -> Result<Self, CoordError> {
        begin.check_compatible(end)?;
        let end = end.with_strand(begin.strand());
        Self::new(
            begin.dict().clone(),
            begin.strand(),
            begin.chr(),
            begin.pos(),
            end.pos(),
        )
    }

    /// Parse the display format `chr:begin-end(+/-)`.
    pub fn parse(dict: Arc<ReferenceDictionary>, s: &str) -> Result<Self, ParseError> {
        lazy_static! {
            static ref INTERVAL_RE: Regex = Regex::new(r"^(.*):(\d+)-(\d+)(\([+-]\))?$").unwrap();
        }

        let cap = INTERVAL_RE
            .captures(s)
            .ok_or_else(|| ParseError::BadFormat(s.to_owned()))?;
        let (chr, _) = resolve_contig(&dict, &cap[1])?;
        let begin = cap[2].parse::<isize>()?;
        let end = cap[3].parse::<isize>()?;
        let strand = match cap.get(4) {
            Some(m) if m.as_str() == "(-)" => Strand::Reverse,
            _ => Strand::Forward,
        };
        Ok(Self::new(dict, strand, chr, begin, end)?)
    }

    pub fn dict(&self) -> &Arc<ReferenceDictionary> {
        &self.dict
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn chr(&self) -> u32 {
        self.chr
    }

    /// First offset inside the interval (0-based, on `strand()`).
    pub fn begin(&self) -> isize {
        self.begin
    }

    /// First offset past the interval.
    pub fn end(&self) -> isize {
        self.end
    }

    pub fn length(&self) -> isize {
        self.end - self.begin
    }

    pub fn is_empty(&self) -> bool {
        self.begin == self.end
    }

    pub fn contig_len(&self) -> isize {
        self.contig_len
    }

    /// First base of the interval.
    pub fn begin_pos(&self) -> GenomePosition {
        self.pos_at(self.begin)
    }

    /// The position just past the interval; for an empty interval this is
    /// the same as `begin_pos()`.
    pub fn end_pos(&self) -> GenomePosition {
        self.pos_at(self.end)
    }

    fn pos_at(&self, offset: isize) -> GenomePosition {
        GenomePosition::from_parts(
            self.dict.clone(),
            self.strand,
            self.chr,
            offset,
            self.contig_len,
        )
    }

    /// The same region described on `strand`.
    pub fn with_strand(&self, strand: Strand) -> Self {
        if strand == self.strand {
            return self.clone();
        }
        GenomeInterval {
            dict: self.dict.clone(),
            strand,
            chr: self.chr,
            begin: self.contig_len - self.end,
            end: self.contig_len - self.begin,
            contig_len: self.contig_len,
        }
    }

    /// Extend the interval by `padding` bases on both sides.
    pub fn with_more_padding(&self, padding: isize) -> Self {
        self.with_more_padding_asym(padding, padding)
    }

    /// Extend by `upstream` bases before `begin` and `downstream` after `end`.
    pub fn with_more_padding_asym(&self, upstream: isize, downstream: isize) -> Self {
        GenomeInterval {
            begin: self.begin - upstream,
            end: self.end + downstream,
            ..self.clone()
        }
    }

    fn check_same_contig(&self, dict: &Arc<ReferenceDictionary>, chr: u32) -> Result<(), CoordError> {
        check_same_dict(&self.dict, dict)?;
        if self.chr != chr {
            return Err(CoordError::ContigMismatch(self.chr, chr));
        }
        Ok(())
    }

    /// Whether the base at `pos` is covered.
    pub fn contains(&self, pos: &GenomePosition) -> Result<bool, CoordError> {
        self.check_same_contig(pos.dict(), pos.chr())?;
        let pos = pos.with_strand(self.strand).pos();
        Ok(self.begin <= pos && pos < self.end)
    }

    /// Whether `other` lies completely inside `self`.
    pub fn contains_interval(&self, other: &GenomeInterval) -> Result<bool, CoordError> {
        self.check_same_contig(&other.dict, other.chr)?;
        let other = other.with_strand(self.strand);
        Ok(self.begin <= other.begin && other.end <= self.end)
    }

    /// Whether the two intervals share at least one base.
    pub fn overlaps_with(&self, other: &GenomeInterval) -> Result<bool, CoordError> {
        self.check_same_contig(&other.dict, other.chr)?;
        let other = other.with_strand(self.strand);
        Ok(self.begin < other.end && other.begin < self.end)
    }

    /// Whether the interval ends at or before the base `pos` (reading on
    /// the strand of `self`), i.e. lies strictly to its left.
    pub fn is_left_of(&self, pos: &GenomePosition) -> Result<bool, CoordError> {
        self.check_same_contig(pos.dict(), pos.chr())?;
        Ok(self.end <= pos.with_strand(self.strand).pos())
    }

    /// Whether the interval starts after the base `pos`.
    pub fn is_right_of(&self, pos: &GenomePosition) -> Result<bool, CoordError> {
        self.check_same_contig(pos.dict(), pos.chr())?;
        Ok(self.begin > pos.with_strand(self.strand).pos())
    }

    /// Smallest interval covering both, on the strand of `self`.
    pub fn union(&self, other: &GenomeInterval) -> Result<GenomeInterval, CoordError> {
        self.check_same_contig(&other.dict, other.chr)?;
        let other = other.with_strand(self.strand);
        Ok(GenomeInterval {
            begin: min(self.begin, other.begin),
            end: max(self.end, other.end),
            ..self.clone()
        })
    }

    /// Common region of both intervals; an empty interval at the larger
    /// begin if they do not overlap.
    pub fn intersection(&self, other: &GenomeInterval) -> Result<GenomeInterval, CoordError> {
        self.check_same_contig(&other.dict, other.chr)?;
        let other = other.with_strand(self.strand);
        let begin = max(self.begin, other.begin);
        let end = max(begin, min(self.end, other.end));
        Ok(GenomeInterval {
            begin,
            end,
            ..self.clone()
        })
    }

    /// Number of bases covered by both intervals.
    pub fn overlap_length(&self, other: &GenomeInterval) -> Result<isize, CoordError> {
        Ok(self.intersection(other)?.length())
    }
}

impl PartialEq for GenomeInterval {
    fn eq(&self, other: &Self) -> bool {
        ReferenceDictionary::same_instance(&self.dict, &other.dict)
            && self.chr == other.chr
            && self.strand == other.strand
            && self.begin == other.begin
            && self.end == other.end
    }
}

impl Eq for GenomeInterval {}

impl Hash for GenomeInterval {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.chr.hash(state);
        self.strand.hash(state);
        self.begin.hash(state);
        self.end.hash(state);
    }
}

impl Debug for GenomeInterval {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.debug_struct("GenomeInterval")
            .field("chr", &self.chr)
            .field("strand", &self.strand)
            .field("begin", &self.begin)
            .field("end", &self.end)
            .finish()
    }
}

impl Display for GenomeInterval {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(
            f,
            "{}:{}-{}{}",
            self.dict.contig_name(self.chr).unwrap_or("?"),
            self.begin,
            self.end,
            self.strand
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::refdict::ReferenceDictionaryBuilder;

    fn dict() -> Arc<ReferenceDictionary> {
        let mut builder = ReferenceDictionaryBuilder::new();
        builder.add_contig("chrXVI", 948_066);
        builder.add_contig("chrV", 576_874);
        builder.build()
    }

    fn iv(dict: &Arc<ReferenceDictionary>, s: &str) -> GenomeInterval {
        GenomeInterval::parse(dict.clone(), s).unwrap()
    }

    #[test]
    fn display_and_parse() {
        let dict = dict();
        let rpl7b = iv(&dict, "chrXVI:173151-174702(+)");
        assert_eq!(rpl7b.length(), 174702 - 173151);
        assert_eq!(rpl7b.to_string(), "chrXVI:173151-174702(+)");
        assert_eq!(iv(&dict, &rpl7b.to_string()), rpl7b);
        assert!(GenomeInterval::parse(dict.clone(), "chrXVI:10-5").is_err());
        assert!(GenomeInterval::parse(dict, "chrXVI:10").is_err());
    }

    #[test]
    fn strand_flip_covers_same_bases() {
        let dict = dict();
        let a = iv(&dict, "chrV:166236-166885(+)");
        let r = a.with_strand(Strand::Reverse);
        assert_eq!(r.begin(), 576_874 - 166885);
        assert_eq!(r.length(), a.length());
        assert_eq!(r.with_strand(Strand::Forward), a);
        assert!(a.overlaps_with(&r).unwrap());
        assert!(a.contains_interval(&r).unwrap());
        let first = a.begin_pos();
        assert!(r.contains(&first).unwrap());
    }

    #[test]
    fn set_operations() {
        let dict = dict();
        let a = iv(&dict, "chrXVI:100-200(+)");
        let b = iv(&dict, "chrXVI:150-300(+)");
        let c = iv(&dict, "chrXVI:300-400(+)");
        assert_eq!(a.union(&c).unwrap().to_string(), "chrXVI:100-400(+)");
        assert_eq!(a.intersection(&b).unwrap().to_string(), "chrXVI:150-200(+)");
        assert!(a.intersection(&c).unwrap().is_empty());
        assert_eq!(a.overlap_length(&b).unwrap(), 50);
        assert!(!b.overlaps_with(&c).unwrap());
        assert!(a.is_left_of(&c.begin_pos()).unwrap());
        assert!(c.is_right_of(&a.begin_pos()).unwrap());
        assert!(!b.is_left_of(&a.begin_pos()).unwrap());
    }

    #[test]
    fn other_contig_is_an_error() {
        let dict = dict();
        let a = iv(&dict, "chrXVI:100-200(+)");
        let b = iv(&dict, "chrV:100-200(+)");
        assert_eq!(a.union(&b), Err(CoordError::ContigMismatch(0, 1)));
        let other = GenomeInterval::parse(super::tests::dict(), "chrXVI:100-200(+)").unwrap();
        assert_eq!(a.overlaps_with(&other), Err(CoordError::DictionaryMismatch));
    }

    #[test]
    fn padding() {
        let dict = dict();
        let a = iv(&dict, "chrXVI:100-200(+)");
        assert_eq!(a.with_more_padding(10).to_string(), "chrXVI:90-210(+)");
        assert_eq!(
            a.with_more_padding_asym(5, 0).to_string(),
            "chrXVI:95-200(+)"
        );
    }
}
