// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Annotation of variants against all transcripts of a genome.
//!
//! ```
//! # fn try_main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use bio_varanno::annotator::VariantAnnotator;
//! use bio_varanno::config::AnnotationOptions;
//! use bio_varanno::coord::interval::GenomeInterval;
//! use bio_varanno::effect::VariantEffect;
//! use bio_varanno::refdict::ReferenceDictionaryBuilder;
//! use bio_varanno::strand::Strand;
//! use bio_varanno::transcript::{TranscriptModel, TranscriptParts};
//! let mut builder = ReferenceDictionaryBuilder::new();
//! let chr1 = builder.add_contig("chr1", 100_000);
//! let dict = builder.build();
//! let iv = |b, e| GenomeInterval::new(dict.clone(), Strand::Forward, chr1, b, e);
//! let tx = TranscriptModel::build(TranscriptParts::new(
//!     "NR_0001.1".to_owned(),
//!     "RNA1".to_owned(),
//!     Strand::Forward,
//!     None,
//!     vec![iv(1000, 2000)?],
//! ))?;
//! let annotator = VariantAnnotator::from_transcripts(
//!     dict,
//!     vec![Arc::new(tx)],
//!     AnnotationOptions::default(),
//! );
//! let annos = annotator.annotate_change("chr1:2500A>C")?;
//! let best = annos.highest_impact_annotation().unwrap();
//! assert_eq!(best.most_severe_effect(), Some(VariantEffect::DownstreamGeneVariant));
//! assert_eq!(best.distance(), Some(500));
//! # Ok(())
//! # }
//! # fn main() { try_main().unwrap(); }
//! ```

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::annotation::{Annotation, VariantAnnotations};
use crate::chromosome::{build_chromosome_map, Chromosome};
use crate::classify::classify;
use crate::config::AnnotationOptions;
use crate::coord::check_same_dict;
use crate::effect::VariantEffect;
use crate::error::AnnotationError;
use crate::refdict::ReferenceDictionary;
use crate::strand::Strand;
use crate::transcript::TranscriptModel;
use crate::variant::GenomeVariant;

/// Annotates variants against an immutable transcript index.
///
/// The annotator holds no mutable state and can be shared between threads.
#[derive(Debug, Clone)]
pub struct VariantAnnotator {
    dict: Arc<ReferenceDictionary>,
    chromosomes: BTreeMap<u32, Chromosome>,
    options: AnnotationOptions,
}

impl VariantAnnotator {
    pub fn new(
        dict: Arc<ReferenceDictionary>,
        chromosomes: BTreeMap<u32, Chromosome>,
        options: AnnotationOptions,
    ) -> Self {
        VariantAnnotator {
            dict,
            chromosomes,
            options,
        }
    }

    /// Index `transcripts` by contig and build an annotator on them.
    pub fn from_transcripts<I>(dict: Arc<ReferenceDictionary>, transcripts: I, options: AnnotationOptions) -> Self
    where
        I: IntoIterator<Item = Arc<TranscriptModel>>,
    {
        Self::new(dict, build_chromosome_map(transcripts), options)
    }

    pub fn dict(&self) -> &Arc<ReferenceDictionary> {
        &self.dict
    }

    pub fn chromosomes(&self) -> &BTreeMap<u32, Chromosome> {
        &self.chromosomes
    }

    pub fn options(&self) -> &AnnotationOptions {
        &self.options
    }

    /// Parse a `<contig>:<1-based position><ref>><alt>` change and
    /// annotate it.
    pub fn annotate_change(&self, change: &str) -> Result<VariantAnnotations, AnnotationError> {
        let variant = GenomeVariant::parse(self.dict.clone(), change)?;
        self.annotate(&variant)
    }

    /// Annotate `variant` on every overlapping transcript, or on its
    /// nearest neighbors when it overlaps none.
    ///
    /// Transcripts on which the variant cannot be projected are skipped.
    pub fn annotate(&self, variant: &GenomeVariant) -> Result<VariantAnnotations, AnnotationError> {
        check_same_dict(&self.dict, variant.pos().dict())?;

        let chrom = match self.chromosomes.get(&variant.chr()) {
            Some(chrom) => chrom,
            None => {
                trace!("no transcripts on the contig of {}", variant);
                let annos = vec![Annotation::intergenic(variant.clone())];
                return Ok(VariantAnnotations::new(
                    variant.clone(),
                    annos,
                    self.options.selection,
                ));
            }
        };

        let fwd = variant.with_strand(Strand::Forward);
        let begin = fwd.pos().pos();
        let end = begin + fwd.ref_bases().len() as isize;
        let (qb, qe) = if begin == end {
            (begin - 1, begin + 1)
        } else {
            (begin, end)
        };
        let res = chrom.query(qb, qe);
        trace!(
            "{}: {} overlapping transcripts, left neighbor {:?}, right neighbor {:?}",
            variant,
            res.overlapping.len(),
            res.left.map(|tx| tx.accession()),
            res.right.map(|tx| tx.accession())
        );

        let annos = if !res.overlapping.is_empty() {
            res.overlapping
                .into_iter()
                .filter_map(|tx| self.classify_on(variant, tx))
                .collect()
        } else {
            self.annotate_between(variant, res.left, res.right)
        };
        Ok(VariantAnnotations::new(
            variant.clone(),
            annos,
            self.options.selection,
        ))
    }

    fn classify_on(&self, variant: &GenomeVariant, tx: &Arc<TranscriptModel>) -> Option<Annotation> {
        match classify(variant, tx, &self.options) {
            Ok(anno) => Some(anno),
            Err(err) => {
                debug!("skipping transcript {} for {}: {}", tx.accession(), variant, err);
                None
            }
        }
    }

    /// Up- and downstream annotations on the neighbors of a variant that
    /// overlaps no transcript; a single intergenic annotation on the closer
    /// neighbor if both are too far away.
    fn annotate_between(
        &self,
        variant: &GenomeVariant,
        left: Option<&Arc<TranscriptModel>>,
        right: Option<&Arc<TranscriptModel>>,
    ) -> Vec<Annotation> {
        let mut nearby = Vec::new();
        let mut intergenic: Option<Annotation> = None;
        for tx in left.into_iter().chain(right) {
            let anno = match self.classify_on(variant, tx) {
                Some(anno) => anno,
                None => continue,
            };
            if anno.effects().contains(&VariantEffect::IntergenicVariant) {
                let closer = match &intergenic {
                    Some(best) => anno.distance() < best.distance(),
                    None => true,
                };
                if closer {
                    intergenic = Some(anno);
                }
            } else {
                nearby.push(anno);
            }
        }
        if nearby.is_empty() {
            nearby.push(intergenic.unwrap_or_else(|| Annotation::intergenic(variant.clone())));
        }
        nearby
    }
}
