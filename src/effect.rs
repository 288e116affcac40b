// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Functional consequences of a variant on a transcript.
//!
//! Effects are totally ordered by severity: the declaration order of
//! [`VariantEffect`](enum.VariantEffect.html) is the ranking, most severe
//! first, and [`VariantEffect::priority`](enum.VariantEffect.html#method.priority)
//! exposes it as a number starting at 1.
//!
//! ```rust
//! use bio_varanno::effect::{PutativeImpact, VariantEffect};
//!
//! assert!(VariantEffect::StopGained < VariantEffect::MissenseVariant);
//! assert_eq!(VariantEffect::MissenseVariant.to_string(), "missense_variant");
//! assert_eq!(VariantEffect::FivePrimeUtrExonVariant.as_ref(), "5_prime_UTR_exon_variant");
//! assert_eq!(VariantEffect::FrameshiftVariant.impact(), PutativeImpact::High);
//! ```

use strum_macros::{AsRefStr, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Sequence Ontology term describing one consequence, most severe first.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum VariantEffect {
    /// The variant removes the whole transcript.
    #[strum(serialize = "transcript_ablation")]
    TranscriptAblation,
    #[strum(serialize = "exon_loss_variant")]
    ExonLossVariant,
    #[strum(serialize = "frameshift_insertion")]
    FrameshiftInsertion,
    #[strum(serialize = "frameshift_deletion")]
    FrameshiftDeletion,
    #[strum(serialize = "frameshift_duplication")]
    FrameshiftDuplication,
    #[strum(serialize = "frameshift_variant")]
    FrameshiftVariant,
    #[strum(serialize = "stop_gained")]
    StopGained,
    #[strum(serialize = "stop_lost")]
    StopLost,
    #[strum(serialize = "start_lost")]
    StartLost,
    #[strum(serialize = "splice_acceptor_variant")]
    SpliceAcceptorVariant,
    #[strum(serialize = "splice_donor_variant")]
    SpliceDonorVariant,
    /// In-frame insertion that does not start at a codon boundary.
    #[strum(serialize = "disruptive_inframe_insertion")]
    DisruptiveInframeInsertion,
    #[strum(serialize = "disruptive_inframe_deletion")]
    DisruptiveInframeDeletion,
    #[strum(serialize = "inframe_insertion")]
    InframeInsertion,
    #[strum(serialize = "inframe_deletion")]
    InframeDeletion,
    #[strum(serialize = "inframe_duplication")]
    InframeDuplication,
    /// In-frame change of several amino acids that is neither a pure
    /// insertion nor a pure deletion.
    #[strum(serialize = "protein_altering_variant")]
    ProteinAlteringVariant,
    #[strum(serialize = "missense_variant")]
    MissenseVariant,
    #[strum(serialize = "splice_region_variant")]
    SpliceRegionVariant,
    /// A new `ATG` appears in the 5' UTR.
    #[strum(serialize = "5_prime_UTR_premature_start_codon_gain_variant")]
    FivePrimeUtrPrematureStartCodonGainVariant,
    #[strum(serialize = "stop_retained_variant")]
    StopRetainedVariant,
    #[strum(serialize = "start_retained_variant")]
    StartRetainedVariant,
    #[strum(serialize = "synonymous_variant")]
    SynonymousVariant,
    /// Change in the CDS whose protein consequence cannot be determined.
    #[strum(serialize = "coding_sequence_variant")]
    CodingSequenceVariant,
    #[strum(serialize = "coding_transcript_intron_variant")]
    CodingTranscriptIntronVariant,
    #[strum(serialize = "5_prime_UTR_exon_variant")]
    FivePrimeUtrExonVariant,
    #[strum(serialize = "3_prime_UTR_exon_variant")]
    ThreePrimeUtrExonVariant,
    #[strum(serialize = "5_prime_UTR_intron_variant")]
    FivePrimeUtrIntronVariant,
    #[strum(serialize = "3_prime_UTR_intron_variant")]
    ThreePrimeUtrIntronVariant,
    #[strum(serialize = "non_coding_transcript_exon_variant")]
    NonCodingTranscriptExonVariant,
    #[strum(serialize = "non_coding_transcript_intron_variant")]
    NonCodingTranscriptIntronVariant,
    #[strum(serialize = "upstream_gene_variant")]
    UpstreamGeneVariant,
    #[strum(serialize = "downstream_gene_variant")]
    DownstreamGeneVariant,
    #[strum(serialize = "intergenic_variant")]
    IntergenicVariant,
}

/// Coarse grouping of effects, as used in VCF `ANN` fields.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, AsRefStr, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum PutativeImpact {
    #[strum(serialize = "HIGH")]
    High,
    #[strum(serialize = "MODERATE")]
    Moderate,
    #[strum(serialize = "LOW")]
    Low,
    #[strum(serialize = "MODIFIER")]
    Modifier,
}

impl VariantEffect {
    /// All effects, most severe first.
    pub const ALL: [VariantEffect; 34] = [
        VariantEffect::TranscriptAblation,
        VariantEffect::ExonLossVariant,
        VariantEffect::FrameshiftInsertion,
        VariantEffect::FrameshiftDeletion,
        VariantEffect::FrameshiftDuplication,
        VariantEffect::FrameshiftVariant,
        VariantEffect::StopGained,
        VariantEffect::StopLost,
        VariantEffect::StartLost,
        VariantEffect::SpliceAcceptorVariant,
        VariantEffect::SpliceDonorVariant,
        VariantEffect::DisruptiveInframeInsertion,
        VariantEffect::DisruptiveInframeDeletion,
        VariantEffect::InframeInsertion,
        VariantEffect::InframeDeletion,
        VariantEffect::InframeDuplication,
        VariantEffect::ProteinAlteringVariant,
        VariantEffect::MissenseVariant,
        VariantEffect::SpliceRegionVariant,
        VariantEffect::FivePrimeUtrPrematureStartCodonGainVariant,
        VariantEffect::StopRetainedVariant,
        VariantEffect::StartRetainedVariant,
        VariantEffect::SynonymousVariant,
        VariantEffect::CodingSequenceVariant,
        VariantEffect::CodingTranscriptIntronVariant,
        VariantEffect::FivePrimeUtrExonVariant,
        VariantEffect::ThreePrimeUtrExonVariant,
        VariantEffect::FivePrimeUtrIntronVariant,
        VariantEffect::ThreePrimeUtrIntronVariant,
        VariantEffect::NonCodingTranscriptExonVariant,
        VariantEffect::NonCodingTranscriptIntronVariant,
        VariantEffect::UpstreamGeneVariant,
        VariantEffect::DownstreamGeneVariant,
        VariantEffect::IntergenicVariant,
    ];

    /// Severity rank, 1 for the most severe effect.
    pub fn priority(self) -> u32 {
        self as u32 + 1
    }

    pub fn impact(self) -> PutativeImpact {
        use self::VariantEffect::*;
        match self {
            TranscriptAblation | ExonLossVariant | FrameshiftInsertion | FrameshiftDeletion
            | FrameshiftDuplication | FrameshiftVariant | StopGained | StopLost | StartLost
            | SpliceAcceptorVariant | SpliceDonorVariant => PutativeImpact::High,
            DisruptiveInframeInsertion | DisruptiveInframeDeletion | InframeInsertion
            | InframeDeletion | InframeDuplication | ProteinAlteringVariant | MissenseVariant => {
                PutativeImpact::Moderate
            }
            SpliceRegionVariant | FivePrimeUtrPrematureStartCodonGainVariant
            | StopRetainedVariant | StartRetainedVariant | SynonymousVariant => PutativeImpact::Low,
            _ => PutativeImpact::Modifier,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ordering_matches_priority() {
        for (i, effect) in VariantEffect::ALL.iter().enumerate() {
            assert_eq!(effect.priority() as usize, i + 1);
        }
        for pair in VariantEffect::ALL.windows(2) {
            assert!(pair[0] < pair[1]);
        }
        assert_eq!(VariantEffect::IntergenicVariant.priority(), 34);
    }

    #[test]
    fn names() {
        assert_eq!(VariantEffect::FrameshiftInsertion.to_string(), "frameshift_insertion");
        assert_eq!(VariantEffect::InframeDeletion.as_ref(), "inframe_deletion");
        assert_eq!(
            VariantEffect::FivePrimeUtrPrematureStartCodonGainVariant.to_string(),
            "5_prime_UTR_premature_start_codon_gain_variant"
        );
        assert_eq!(PutativeImpact::Moderate.to_string(), "MODERATE");
    }

    #[test]
    fn impacts_are_monotone() {
        for pair in VariantEffect::ALL.windows(2) {
            assert!(pair[0].impact() <= pair[1].impact());
        }
    }
}
