// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Transcript models: exon and CDS layout of one transcript on the genome,
//! together with its recorded cDNA sequence.
//!
//! All regions of a [`TranscriptModel`](struct.TranscriptModel.html) are
//! stored on the strand of the transcript, so ascending coordinates follow
//! the direction of transcription and the first exon is the 5'-most one.
//!
//! ```
//! # use bio_varanno::transcript::TranscriptError;
//! # fn try_main() -> Result<(), TranscriptError> {
//! use bio_varanno::coord::interval::GenomeInterval;
//! use bio_varanno::refdict::ReferenceDictionaryBuilder;
//! use bio_varanno::strand::Strand;
//! use bio_varanno::transcript::{TranscriptModel, TranscriptParts};
//! let mut builder = ReferenceDictionaryBuilder::new();
//! let chr1 = builder.add_contig("chr1", 10_000);
//! let dict = builder.build();
//! let iv = |b, e| GenomeInterval::new(dict.clone(), Strand::Forward, chr1, b, e);
//! let parts = TranscriptParts::new(
//!     "NM_0001.1".to_owned(),
//!     "GENE".to_owned(),
//!     Strand::Reverse,
//!     Some(iv(150, 450)?),
//!     vec![iv(100, 200)?, iv(400, 500)?],
//! );
//! let tx = TranscriptModel::build(parts)?;
//! assert_eq!(tx.exon_count(), 2);
//! // first exon in transcription order is the right-most one on chr1
//! assert_eq!(tx.exon_regions()[0].to_string(), "chr1:9500-9600(-)");
//! assert_eq!(tx.tx_region().with_strand(Strand::Forward).to_string(), "chr1:100-500(+)");
//! assert_eq!(tx.exon_total_length(), 200);
//! # Ok(())
//! # }
//! # fn main() { try_main().unwrap(); }
//! ```

pub mod alignment;

use std::collections::{BTreeMap, BTreeSet};
use std::sync::Arc;

use thiserror::Error;

use crate::coord::interval::GenomeInterval;
use crate::coord::CoordError;
use crate::sequence::Sequence;
use crate::strand::Strand;

use self::alignment::{Alignment, AlignmentError};

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TranscriptError {
    #[error("transcript {0} has no exons")]
    NoExons(String),
    #[error("transcript {0} has an empty exon")]
    EmptyExon(String),
    #[error("exons of transcript {0} overlap")]
    OverlappingExons(String),
    #[error("CDS of transcript {0} does not start and end in exons")]
    CdsOutsideExons(String),
    #[error("invalid alignment: {0}")]
    Alignment(#[from] AlignmentError),
    #[error(transparent)]
    Coord(#[from] CoordError),
}

/// Raw ingredients of a transcript, as delivered by a database parser.
///
/// Regions may be given on either strand and exons in any order;
/// [`TranscriptModel::build`](struct.TranscriptModel.html#method.build)
/// normalizes them.
#[derive(new, Debug, Clone)]
pub struct TranscriptParts {
    pub accession: String,
    pub gene_symbol: String,
    pub strand: Strand,
    /// `None` for non-coding transcripts.
    pub cds_region: Option<GenomeInterval>,
    pub exon_regions: Vec<GenomeInterval>,
    #[new(default)]
    pub gene_id: String,
    #[new(default)]
    pub alt_gene_ids: BTreeMap<String, String>,
    /// Recorded cDNA, 5' to 3'.
    #[new(default)]
    pub sequence: Sequence,
    /// Required only when the recorded sequence has indels against the
    /// reference.
    #[new(default)]
    pub alignment: Option<Alignment>,
    #[new(default)]
    pub support_level: i32,
    #[new(default)]
    pub tags: BTreeSet<String>,
}

/// Immutable transcript with its genomic layout.
#[derive(Debug, Clone)]
pub struct TranscriptModel {
    accession: Arc<str>,
    gene_symbol: String,
    gene_id: String,
    alt_gene_ids: BTreeMap<String, String>,
    strand: Strand,
    tx_region: GenomeInterval,
    cds_region: Option<GenomeInterval>,
    exon_regions: Vec<GenomeInterval>,
    sequence: Sequence,
    alignment: Alignment,
    support_level: i32,
    tags: BTreeSet<String>,
}

impl TranscriptModel {
    /// Validate and normalize `parts` into a transcript.
    ///
    /// The transcript region is the span from the first to the last exon.
    pub fn build(parts: TranscriptParts) -> Result<Self, TranscriptError> {
        let TranscriptParts {
            accession,
            gene_symbol,
            strand,
            cds_region,
            exon_regions,
            gene_id,
            alt_gene_ids,
            sequence,
            alignment,
            support_level,
            tags,
        } = parts;

        let first = exon_regions
            .first()
            .ok_or_else(|| TranscriptError::NoExons(accession.clone()))?
            .clone();
        let mut exons = Vec::with_capacity(exon_regions.len());
        for exon in exon_regions.iter() {
            first.begin_pos().check_compatible(&exon.begin_pos())?;
            if exon.is_empty() {
                return Err(TranscriptError::EmptyExon(accession));
            }
            exons.push(exon.with_strand(strand));
        }
        exons.sort_by_key(|e| e.begin());
        if exons.windows(2).any(|w| w[0].end() > w[1].begin()) {
            return Err(TranscriptError::OverlappingExons(accession));
        }

        let tx_region = exons[0].union(&exons[exons.len() - 1])?;

        let cds_region = match cds_region {
            Some(cds) if !cds.is_empty() => {
                first.begin_pos().check_compatible(&cds.begin_pos())?;
                let cds = cds.with_strand(strand);
                let first_in_exon = exons.iter().any(|e| e.begin() <= cds.begin() && cds.begin() < e.end());
                let last_in_exon = exons.iter().any(|e| e.begin() < cds.end() && cds.end() <= e.end());
                if !first_in_exon || !last_in_exon {
                    return Err(TranscriptError::CdsOutsideExons(accession));
                }
                Some(cds)
            }
            _ => None,
        };

        let exon_total: isize = exons.iter().map(|e| e.length()).sum();
        let alignment = alignment.unwrap_or_else(|| Alignment::identity(exon_total));
        if !sequence.is_empty() && sequence.len() as isize != alignment.seq_len() {
            warn!(
                "transcript {}: sequence length {} differs from the {} bases implied by its exons",
                accession,
                sequence.len(),
                alignment.seq_len()
            );
        }

        Ok(TranscriptModel {
            accession: Arc::from(accession),
            gene_symbol,
            gene_id,
            alt_gene_ids,
            strand,
            tx_region,
            cds_region,
            exon_regions: exons,
            sequence: sequence.to_ascii_uppercase(),
            alignment,
            support_level,
            tags,
        })
    }

    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// Shared handle to the accession, used by transcript coordinates.
    pub fn accession_arc(&self) -> &Arc<str> {
        &self.accession
    }

    pub fn gene_symbol(&self) -> &str {
        &self.gene_symbol
    }

    pub fn gene_id(&self) -> &str {
        &self.gene_id
    }

    /// Alternative gene identifiers keyed by namespace, e.g. `HGNC_ID`.
    pub fn alt_gene_ids(&self) -> &BTreeMap<String, String> {
        &self.alt_gene_ids
    }

    pub fn strand(&self) -> Strand {
        self.strand
    }

    pub fn chr(&self) -> u32 {
        self.tx_region.chr()
    }

    /// Span from the first to the last exon, on the transcript strand.
    pub fn tx_region(&self) -> &GenomeInterval {
        &self.tx_region
    }

    /// Coding region on the transcript strand, including the stop codon.
    pub fn cds_region(&self) -> Option<&GenomeInterval> {
        self.cds_region.as_ref()
    }

    /// Exons on the transcript strand, in transcription order.
    pub fn exon_regions(&self) -> &[GenomeInterval] {
        &self.exon_regions
    }

    pub fn exon_count(&self) -> usize {
        self.exon_regions.len()
    }

    /// Introns on the transcript strand, in transcription order.
    pub fn intron_regions(&self) -> Vec<GenomeInterval> {
        self.exon_regions
            .windows(2)
            .map(|w| {
                GenomeInterval::from_parts(&w[0].end_pos(), w[0].end(), w[1].begin())
            })
            .collect()
    }

    pub fn exon_total_length(&self) -> isize {
        self.exon_regions.iter().map(|e| e.length()).sum()
    }

    pub fn sequence(&self) -> &[u8] {
        &self.sequence
    }

    pub fn alignment(&self) -> &Alignment {
        &self.alignment
    }

    pub fn support_level(&self) -> i32 {
        self.support_level
    }

    pub fn tags(&self) -> &BTreeSet<String> {
        &self.tags
    }

    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.contains(tag)
    }

    pub fn is_coding(&self) -> bool {
        self.cds_region.is_some()
    }
}

impl PartialEq for TranscriptModel {
    fn eq(&self, other: &Self) -> bool {
        self.accession == other.accession
    }
}

impl Eq for TranscriptModel {}
