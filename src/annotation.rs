// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Result types: the annotation of a variant on one transcript, and the
//! ranked annotations of a variant on all relevant transcripts.

use std::collections::BTreeSet;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

use strum_macros::{AsRefStr, Display as StrumDisplay};

use crate::config::AnnotationSelection;
use crate::effect::{PutativeImpact, VariantEffect};
use crate::transcript::TranscriptModel;
use crate::variant::GenomeVariant;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Caveats attached to an annotation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, StrumDisplay)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnnotationMessage {
    /// The reference allele differs from the transcript sequence.
    #[strum(serialize = "REF_DOES_NOT_MATCH_TRANSCRIPT")]
    RefDoesNotMatchTranscript,
    /// The CDS has no start codon, no stop codon, or a length that is not
    /// a multiple of three.
    #[strum(serialize = "TRANSCRIPT_INCOMPLETE")]
    TranscriptIncomplete,
    /// The variant was moved to its most 3' position before describing it.
    #[strum(serialize = "THREE_PRIME_SHIFTED")]
    ThreePrimeShifted,
    /// Ambiguous bases prevented translation of the affected codons.
    #[strum(serialize = "PROTEIN_CHANGE_UNDETERMINED")]
    ProteinChangeUndetermined,
}

/// Exon or intron of the transcript the variant starts in, 0-based.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnnotationLocation {
    Exon { rank: usize, total: usize },
    Intron { rank: usize, total: usize },
}

impl Display for AnnotationLocation {
    /// 1-based, e.g. `exon3` or `intron2`.
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        match self {
            AnnotationLocation::Exon { rank, .. } => write!(f, "exon{}", rank + 1),
            AnnotationLocation::Intron { rank, .. } => write!(f, "intron{}", rank + 1),
        }
    }
}

/// Consequence of a variant on one transcript.
#[derive(Debug, Clone)]
pub struct Annotation {
    pub(crate) variant: GenomeVariant,
    pub(crate) transcript: Option<Arc<TranscriptModel>>,
    pub(crate) effects: BTreeSet<VariantEffect>,
    pub(crate) coding_change: Option<String>,
    pub(crate) protein_change: Option<String>,
    pub(crate) messages: BTreeSet<AnnotationMessage>,
    pub(crate) location: Option<AnnotationLocation>,
    pub(crate) distance: Option<isize>,
}

impl Annotation {
    pub(crate) fn new(variant: GenomeVariant, transcript: Option<Arc<TranscriptModel>>) -> Self {
        Annotation {
            variant,
            transcript,
            effects: BTreeSet::new(),
            coding_change: None,
            protein_change: None,
            messages: BTreeSet::new(),
            location: None,
            distance: None,
        }
    }

    /// An intergenic annotation without a reference transcript.
    pub(crate) fn intergenic(variant: GenomeVariant) -> Self {
        let mut anno = Annotation::new(variant, None);
        anno.effects.insert(VariantEffect::IntergenicVariant);
        anno
    }

    pub fn variant(&self) -> &GenomeVariant {
        &self.variant
    }

    pub fn transcript(&self) -> Option<&Arc<TranscriptModel>> {
        self.transcript.as_ref()
    }

    /// All effects, most severe first.
    pub fn effects(&self) -> &BTreeSet<VariantEffect> {
        &self.effects
    }

    pub fn most_severe_effect(&self) -> Option<VariantEffect> {
        self.effects.iter().next().copied()
    }

    pub fn putative_impact(&self) -> PutativeImpact {
        self.most_severe_effect()
            .map_or(PutativeImpact::Modifier, |e| e.impact())
    }

    /// Nucleotide change, e.g. `c.381A>G`.
    pub fn coding_change(&self) -> Option<&str> {
        self.coding_change.as_deref()
    }

    /// Protein change, e.g. `p.Lys127Arg`.
    pub fn protein_change(&self) -> Option<&str> {
        self.protein_change.as_deref()
    }

    pub fn messages(&self) -> &BTreeSet<AnnotationMessage> {
        &self.messages
    }

    pub fn location(&self) -> Option<AnnotationLocation> {
        self.location
    }

    /// Distance to the transcript for up-, downstream and intergenic
    /// annotations.
    pub fn distance(&self) -> Option<isize> {
        self.distance
    }

    /// `SYMBOL:ACCESSION:exonN:c.…:p.…`, leaving out missing parts.
    pub fn to_annotation_string(&self) -> String {
        let mut parts: Vec<String> = Vec::new();
        if let Some(tx) = &self.transcript {
            parts.push(tx.gene_symbol().to_owned());
            parts.push(tx.accession().to_owned());
        }
        if let Some(loc) = &self.location {
            parts.push(loc.to_string());
        }
        if let Some(c) = &self.coding_change {
            parts.push(c.clone());
        }
        if let Some(p) = &self.protein_change {
            parts.push(p.clone());
        }
        parts.join(":")
    }

    // Ranking: most severe effect first, then accession.
    pub(crate) fn sort_key(&self) -> (u32, &str) {
        (
            self.most_severe_effect()
                .map_or(u32::MAX, |e| e.priority()),
            self.transcript.as_ref().map_or("", |t| t.accession()),
        )
    }
}

/// All annotations of one variant, most severe first, together with the
/// selection the annotator was configured with.
#[derive(Debug, Clone)]
pub struct VariantAnnotations {
    variant: GenomeVariant,
    annotations: Vec<Annotation>,
    selection: AnnotationSelection,
}

impl VariantAnnotations {
    /// Rank `annotations` by severity and accession.
    pub(crate) fn new(
        variant: GenomeVariant,
        mut annotations: Vec<Annotation>,
        selection: AnnotationSelection,
    ) -> Self {
        annotations.sort_by(|a, b| a.sort_key().cmp(&b.sort_key()));
        VariantAnnotations {
            variant,
            annotations,
            selection,
        }
    }

    pub fn selection(&self) -> AnnotationSelection {
        self.selection
    }

    /// The annotations chosen by the configured selection.
    pub fn selected(&self) -> &[Annotation] {
        self.select(self.selection)
    }

    pub fn variant(&self) -> &GenomeVariant {
        &self.variant
    }

    pub fn all(&self) -> &[Annotation] {
        &self.annotations
    }

    pub fn highest_impact_annotation(&self) -> Option<&Annotation> {
        self.annotations.first()
    }

    pub fn highest_impact_effect(&self) -> Option<VariantEffect> {
        self.highest_impact_annotation()
            .and_then(|a| a.most_severe_effect())
    }

    /// The annotations of interest; the best-only view is a prefix of the
    /// full list.
    pub fn select(&self, selection: AnnotationSelection) -> &[Annotation] {
        match selection {
            AnnotationSelection::All => &self.annotations,
            AnnotationSelection::BestOnly => &self.annotations[..self.annotations.len().min(1)],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.annotations.is_empty()
    }

    pub fn len(&self) -> usize {
        self.annotations.len()
    }
}
