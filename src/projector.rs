// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Projection of positions between the genome, the transcript, the coding
//! sequence and the protein.
//!
//! Three offset spaces are involved for a transcript:
//!
//! * the genome, read on the transcript strand;
//! * the *raw* exonic offset, counting concatenated exon bases from the
//!   5' end of the first exon;
//! * the recorded transcript sequence, reached from the raw offset through
//!   the transcript's [`Alignment`](../transcript/alignment/struct.Alignment.html).
//!
//! CDS offsets are sequence offsets relative to the first base of the start
//! codon, and protein offsets are CDS offsets divided by three.
//!
//! ```
//! # fn try_main() -> Result<(), Box<dyn std::error::Error>> {
//! use bio_varanno::coord::interval::GenomeInterval;
//! use bio_varanno::coord::pos::GenomePosition;
//! use bio_varanno::projector::TranscriptProjector;
//! use bio_varanno::refdict::ReferenceDictionaryBuilder;
//! use bio_varanno::strand::Strand;
//! use bio_varanno::transcript::{TranscriptModel, TranscriptParts};
//! let mut builder = ReferenceDictionaryBuilder::new();
//! let chr1 = builder.add_contig("chr1", 10_000);
//! let dict = builder.build();
//! let iv = |b, e| GenomeInterval::new(dict.clone(), Strand::Forward, chr1, b, e);
//! let tx = TranscriptModel::build(TranscriptParts::new(
//!     "tx".to_owned(),
//!     "G".to_owned(),
//!     Strand::Forward,
//!     Some(iv(150, 350)?),
//!     vec![iv(100, 200)?, iv(300, 400)?],
//! ))?;
//! let projector = TranscriptProjector::new(&tx);
//! let pos = GenomePosition::new(dict.clone(), Strand::Forward, chr1, 310)?;
//! assert_eq!(projector.genome_to_transcript_pos(&pos)?.pos(), 110);
//! assert_eq!(projector.genome_to_cds_pos(&pos)?.pos(), 60);
//! assert_eq!(projector.nomenclature_pos(&pos)?.to_string(), "61");
//! let intronic = GenomePosition::new(dict, Strand::Forward, chr1, 205)?;
//! assert!(projector.genome_to_transcript_pos(&intronic).is_err());
//! assert_eq!(projector.nomenclature_pos(&intronic)?.to_string(), "50+6");
//! # Ok(())
//! # }
//! # fn main() { try_main().unwrap(); }
//! ```

use std::fmt::{self, Display, Formatter};

use thiserror::Error;

use crate::coord::pos::GenomePosition;
use crate::coord::tx::{CdsPosition, ProteinPosition, TranscriptInterval, TranscriptPosition};
use crate::coord::{check_same_dict, CoordError};
use crate::transcript::alignment::AlignmentError;
use crate::transcript::TranscriptModel;

/// A position that cannot be represented in the requested space.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ProjectionError {
    #[error("position {0} does not lie in an exon")]
    NotInExon(isize),
    #[error("position {0} falls into a gap of the transcript alignment")]
    InAlignmentGap(isize),
    #[error("position lies on another contig than transcript {0}")]
    ContigMismatch(String),
    #[error("offset {0} lies outside of the transcript")]
    OutOfRange(isize),
    #[error("transcript {0} is non-coding")]
    NonCoding(String),
    #[error("no exon with index {0}")]
    NoSuchExon(usize),
    #[error(transparent)]
    Coord(#[from] CoordError),
}

impl From<AlignmentError> for ProjectionError {
    fn from(err: AlignmentError) -> Self {
        match err {
            AlignmentError::InGap(pos) => ProjectionError::InAlignmentGap(pos),
            _ => ProjectionError::InAlignmentGap(-1),
        }
    }
}

/// Position in `c.`/`n.` nomenclature: a transcript base, a `*` flag for
/// bases past the stop codon, and a signed intronic offset.
///
/// `base` is already in nomenclature numbering, i.e. 1-based inside the
/// CDS, negative in the 5' UTR, and counted from the stop codon for `*`
/// positions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NtPosition {
    pub base: isize,
    pub after_cds: bool,
    pub offset: isize,
}

impl NtPosition {
    pub fn is_intronic(&self) -> bool {
        self.offset != 0
    }
}

impl Display for NtPosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        if self.after_cds {
            write!(f, "*")?;
        }
        write!(f, "{}", self.base)?;
        if self.offset > 0 {
            write!(f, "+{}", self.offset)?;
        } else if self.offset < 0 {
            write!(f, "{}", self.offset)?;
        }
        Ok(())
    }
}

/// Coordinate conversions for one transcript.
#[derive(Debug, Clone)]
pub struct TranscriptProjector<'a> {
    tx: &'a TranscriptModel,
    // raw offset of the first base of each exon
    exon_raw_starts: Vec<isize>,
    // sequence offsets of the CDS as [begin, end)
    cds_seq: Option<(isize, isize)>,
}

impl<'a> TranscriptProjector<'a> {
    pub fn new(tx: &'a TranscriptModel) -> Self {
        let mut exon_raw_starts = Vec::with_capacity(tx.exon_count());
        let mut acc = 0;
        for exon in tx.exon_regions() {
            exon_raw_starts.push(acc);
            acc += exon.length();
        }
        let mut projector = TranscriptProjector {
            tx,
            exon_raw_starts,
            cds_seq: None,
        };
        projector.cds_seq = tx.cds_region().and_then(|cds| {
            let begin = projector.seq_offset_at(cds.begin()).ok()?;
            let last = projector.seq_offset_at(cds.end() - 1).ok()?;
            Some((begin, last + 1))
        });
        projector
    }

    pub fn transcript(&self) -> &'a TranscriptModel {
        self.tx
    }

    // Offset of `pos` on the transcript strand.
    fn tx_strand_offset(&self, pos: &GenomePosition) -> Result<isize, ProjectionError> {
        let region = self.tx.tx_region();
        check_same_dict(region.dict(), pos.dict())?;
        if region.chr() != pos.chr() {
            return Err(ProjectionError::ContigMismatch(self.tx.accession().to_owned()));
        }
        Ok(pos.with_strand(self.tx.strand()).pos())
    }

    /// Index of the exon containing the transcript-strand offset `p`.
    pub(crate) fn exon_index_at(&self, p: isize) -> Option<usize> {
        let exons = self.tx.exon_regions();
        let k = exons.partition_point(|e| e.begin() <= p);
        if k > 0 && p < exons[k - 1].end() {
            Some(k - 1)
        } else {
            None
        }
    }

    /// Index of the intron containing the transcript-strand offset `p`;
    /// intron `i` lies between exon `i` and exon `i + 1`.
    pub(crate) fn intron_index_at(&self, p: isize) -> Option<usize> {
        let exons = self.tx.exon_regions();
        let k = exons.partition_point(|e| e.begin() <= p);
        if k > 0 && k < exons.len() && p >= exons[k - 1].end() {
            Some(k - 1)
        } else {
            None
        }
    }

    /// Raw exonic offset of the transcript-strand offset `p`, extended
    /// linearly beyond both ends of the transcript.
    fn raw_offset_at(&self, p: isize) -> Result<isize, ProjectionError> {
        let region = self.tx.tx_region();
        if p < region.begin() {
            return Ok(p - region.begin());
        }
        if p >= region.end() {
            return Ok(self.tx.exon_total_length() + p - region.end());
        }
        let i = self.exon_index_at(p).ok_or(ProjectionError::NotInExon(p))?;
        Ok(self.exon_raw_starts[i] + p - self.tx.exon_regions()[i].begin())
    }

    /// Sequence offset of the transcript-strand offset `p`.
    pub(crate) fn seq_offset_at(&self, p: isize) -> Result<isize, ProjectionError> {
        let raw = self.raw_offset_at(p)?;
        Ok(self.tx.alignment().ref_to_seq(raw)?)
    }

    /// Transcript-strand genome offset of the sequence offset `s`.
    pub(crate) fn genome_offset_at(&self, s: isize) -> Result<isize, ProjectionError> {
        let raw = self.tx.alignment().seq_to_ref(s)?;
        if raw < 0 || raw >= self.tx.exon_total_length() {
            return Err(ProjectionError::OutOfRange(s));
        }
        let i = self.exon_raw_starts.partition_point(|&start| start <= raw) - 1;
        Ok(self.tx.exon_regions()[i].begin() + raw - self.exon_raw_starts[i])
    }

    /// Sequence offsets `[begin, end)` of the CDS.
    pub fn cds_seq_range(&self) -> Result<(isize, isize), ProjectionError> {
        self.cds_seq
            .ok_or_else(|| ProjectionError::NonCoding(self.tx.accession().to_owned()))
    }

    pub fn genome_to_transcript_pos(
        &self,
        pos: &GenomePosition,
    ) -> Result<TranscriptPosition, ProjectionError> {
        let p = self.tx_strand_offset(pos)?;
        if !(self.tx.tx_region().begin() <= p && p < self.tx.tx_region().end()) {
            return Err(ProjectionError::NotInExon(p));
        }
        Ok(TranscriptPosition::new(
            self.tx.accession_arc().clone(),
            self.seq_offset_at(p)?,
        ))
    }

    /// Genomic position (on the transcript strand) of a transcript base.
    pub fn transcript_to_genome_pos(
        &self,
        pos: &TranscriptPosition,
    ) -> Result<GenomePosition, ProjectionError> {
        let p = self.genome_offset_at(pos.pos())?;
        Ok(self.tx.tx_region().begin_pos().shifted(p - self.tx.tx_region().begin()))
    }

    pub fn transcript_to_cds_pos(&self, pos: &TranscriptPosition) -> Result<CdsPosition, ProjectionError> {
        let (begin, _) = self.cds_seq_range()?;
        Ok(CdsPosition::new(self.tx.accession_arc().clone(), pos.pos() - begin))
    }

    pub fn cds_to_transcript_pos(&self, pos: &CdsPosition) -> Result<TranscriptPosition, ProjectionError> {
        let (begin, _) = self.cds_seq_range()?;
        Ok(TranscriptPosition::new(
            self.tx.accession_arc().clone(),
            pos.pos() + begin,
        ))
    }

    pub fn genome_to_cds_pos(&self, pos: &GenomePosition) -> Result<CdsPosition, ProjectionError> {
        self.transcript_to_cds_pos(&self.genome_to_transcript_pos(pos)?)
    }

    pub fn cds_to_genome_pos(&self, pos: &CdsPosition) -> Result<GenomePosition, ProjectionError> {
        self.transcript_to_genome_pos(&self.cds_to_transcript_pos(pos)?)
    }

    /// Amino acid containing the CDS base, with the base's codon phase.
    pub fn cds_to_protein_pos(&self, pos: &CdsPosition) -> ProteinPosition {
        let (codon, frame) = pos.codon_and_frame();
        ProteinPosition::new(self.tx.accession_arc().clone(), codon, frame)
    }

    pub fn genome_to_protein_pos(&self, pos: &GenomePosition) -> Result<ProteinPosition, ProjectionError> {
        Ok(self.cds_to_protein_pos(&self.genome_to_cds_pos(pos)?))
    }

    /// Index (0-based, transcription order) of the exon containing `pos`.
    pub fn locate_exon(&self, pos: &GenomePosition) -> Result<Option<usize>, ProjectionError> {
        Ok(self.exon_index_at(self.tx_strand_offset(pos)?))
    }

    /// Index of the intron containing `pos`.
    pub fn locate_intron(&self, pos: &GenomePosition) -> Result<Option<usize>, ProjectionError> {
        Ok(self.intron_index_at(self.tx_strand_offset(pos)?))
    }

    /// Sequence range covered by exon `i`.
    pub fn exon_tx_range(&self, i: usize) -> Result<TranscriptInterval, ProjectionError> {
        let exon = self
            .tx
            .exon_regions()
            .get(i)
            .ok_or(ProjectionError::NoSuchExon(i))?;
        let begin = self.seq_offset_at(exon.begin())?;
        let last = self.seq_offset_at(exon.end() - 1)?;
        Ok(TranscriptInterval::new(
            self.tx.accession_arc().clone(),
            begin,
            last + 1,
        ))
    }

    /// Nomenclature number of the sequence offset `s` (`c.` numbering for
    /// coding transcripts, `n.` otherwise).
    pub(crate) fn nt_number(&self, s: isize) -> (isize, bool) {
        match self.cds_seq {
            Some((begin, end)) => {
                let c = s - begin;
                if c < 0 {
                    (c, false)
                } else if s < end {
                    (c + 1, false)
                } else {
                    (s - end + 1, true)
                }
            }
            None => {
                if s < 0 {
                    (s, false)
                } else {
                    (s + 1, false)
                }
            }
        }
    }

    /// Nomenclature position of the transcript-strand offset `p`.
    pub(crate) fn nt_position_at(&self, p: isize) -> Result<NtPosition, ProjectionError> {
        let (anchor, offset) = match self.intron_index_at(p) {
            Some(i) => {
                let exons = self.tx.exon_regions();
                let donor = exons[i].end() - 1;
                let acceptor = exons[i + 1].begin();
                if p - donor <= acceptor - p {
                    (donor, p - donor)
                } else {
                    (acceptor, p - acceptor)
                }
            }
            None => (p, 0),
        };
        let (base, after_cds) = self.nt_number(self.seq_offset_at(anchor)?);
        Ok(NtPosition {
            base,
            after_cds,
            offset,
        })
    }

    /// Position in `c.`/`n.` nomenclature, including intronic offsets and
    /// positions up- or downstream of the transcript.
    pub fn nomenclature_pos(&self, pos: &GenomePosition) -> Result<NtPosition, ProjectionError> {
        self.nt_position_at(self.tx_strand_offset(pos)?)
    }
}
