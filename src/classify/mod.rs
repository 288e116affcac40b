// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Classification of a variant against a single transcript.
//!
//! [`classify`](fn.classify.html) places the variant relative to the
//! transcript (outside, spanning it, in an intron, across an exon
//! boundary, or inside one exon), derives the set of
//! [`VariantEffect`](../effect/enum.VariantEffect.html)s and renders the
//! `c.`/`n.` and `p.` descriptions.
//!
//! ```
//! # fn try_main() -> Result<(), Box<dyn std::error::Error>> {
//! use std::sync::Arc;
//! use bio_varanno::classify::classify;
//! use bio_varanno::config::AnnotationOptions;
//! use bio_varanno::coord::interval::GenomeInterval;
//! use bio_varanno::effect::VariantEffect;
//! use bio_varanno::refdict::ReferenceDictionaryBuilder;
//! use bio_varanno::strand::Strand;
//! use bio_varanno::transcript::{TranscriptModel, TranscriptParts};
//! use bio_varanno::variant::GenomeVariant;
//! let mut builder = ReferenceDictionaryBuilder::new();
//! let chr1 = builder.add_contig("chr1", 10_000);
//! let dict = builder.build();
//! let iv = |b, e| GenomeInterval::new(dict.clone(), Strand::Forward, chr1, b, e);
//! let mut parts = TranscriptParts::new(
//!     "tx".to_owned(),
//!     "GENE".to_owned(),
//!     Strand::Forward,
//!     Some(iv(102, 114)?),
//!     vec![iv(100, 120)?],
//! );
//! parts.sequence = b"CCATGAAATGGTAACCCCCC".to_vec();
//! let tx = Arc::new(TranscriptModel::build(parts)?);
//! let variant = GenomeVariant::parse(dict, "chr1:106A>G")?;
//! let anno = classify(&variant, &tx, &AnnotationOptions::default())?;
//! assert_eq!(anno.most_severe_effect(), Some(VariantEffect::MissenseVariant));
//! assert_eq!(anno.coding_change(), Some("c.4A>G"));
//! assert_eq!(anno.protein_change(), Some("p.Lys2Glu"));
//! # Ok(())
//! # }
//! # fn main() { try_main().unwrap(); }
//! ```

mod coding;
pub(crate) mod regions;

use std::collections::BTreeSet;
use std::sync::Arc;

use crate::annotation::{Annotation, AnnotationLocation, AnnotationMessage};
use crate::config::AnnotationOptions;
use crate::coord::check_same_dict;
use crate::effect::VariantEffect;
use crate::nomenclature::{NtChange, ProteinChange};
use crate::projector::{NtPosition, ProjectionError, TranscriptProjector};
use crate::sequence::Sequence;
use crate::transcript::TranscriptModel;
use crate::variant::{GenomeVariant, VariantKind};

use self::coding::{CodingChange, CodingOutcome};
use self::regions::{covered_exons, footprint, intron_effect, splice_effects, Footprint};

/// The variant on the transcript strand, as genomic offsets `[begin, end)`.
#[derive(Debug, Clone)]
struct Change {
    begin: isize,
    end: isize,
    ref_bases: Sequence,
    alt_bases: Sequence,
    kind: VariantKind,
}

impl Change {
    fn new(variant: &GenomeVariant) -> Self {
        let begin = variant.pos().pos();
        Change {
            begin,
            end: begin + variant.ref_bases().len() as isize,
            ref_bases: variant.ref_bases().to_vec(),
            alt_bases: variant.alt_bases().to_vec(),
            kind: variant.kind(),
        }
    }

    fn is_insertion(&self) -> bool {
        self.begin == self.end
    }

    /// Whether the change affects `[begin, end)`; an insertion has to lie
    /// strictly inside.
    fn overlaps(&self, begin: isize, end: isize) -> bool {
        if self.is_insertion() {
            begin < self.begin && self.begin < end
        } else {
            self.begin < end && begin < self.end
        }
    }
}

struct Classifier<'a> {
    tx: &'a TranscriptModel,
    proj: TranscriptProjector<'a>,
    cds: Option<(isize, isize)>,
    options: &'a AnnotationOptions,
}

/// Annotate `variant` with respect to `tx`.
///
/// Fails with a [`ProjectionError`](../projector/enum.ProjectionError.html)
/// when the variant lies on another contig or cannot be mapped onto the
/// recorded transcript sequence.
pub fn classify(
    variant: &GenomeVariant,
    tx: &Arc<TranscriptModel>,
    options: &AnnotationOptions,
) -> Result<Annotation, ProjectionError> {
    let region = tx.tx_region();
    check_same_dict(region.dict(), variant.pos().dict())?;
    if region.chr() != variant.chr() {
        return Err(ProjectionError::ContigMismatch(tx.accession().to_owned()));
    }

    let proj = TranscriptProjector::new(tx);
    let cds = if tx.is_coding() {
        Some(proj.cds_seq_range()?)
    } else {
        None
    };
    let classifier = Classifier {
        tx,
        proj,
        cds,
        options,
    };

    let change = Change::new(&variant.with_strand(tx.strand()));
    let mut anno = Annotation::new(variant.clone(), Some(Arc::clone(tx)));
    let (tb, te) = (region.begin(), region.end());
    if !change.overlaps(tb, te) {
        classifier.off_transcript(&change, &mut anno)?;
    } else if !change.is_insertion() && change.begin <= tb && te <= change.end {
        classifier.ablation(&change, &mut anno)?;
    } else {
        anno.location = classifier.location(change.begin.max(tb));
        match footprint(&classifier.proj, change.begin, change.end) {
            Footprint::Exonic(i) => classifier.exonic(&change, i, &mut anno)?,
            Footprint::Intronic(i) => classifier.intronic(&change, i, &mut anno)?,
            Footprint::Spanning => classifier.spanning(&change, &mut anno)?,
        }
    }
    Ok(anno)
}

impl<'a> Classifier<'a> {
    fn prefix(&self) -> char {
        if self.cds.is_some() {
            'c'
        } else {
            'n'
        }
    }

    fn render_protein(&self, change: &ProteinChange) -> String {
        change.render(self.options.amino_acid_code)
    }

    fn location(&self, p: isize) -> Option<AnnotationLocation> {
        let total = self.tx.exon_count();
        if let Some(rank) = self.proj.exon_index_at(p) {
            Some(AnnotationLocation::Exon { rank, total })
        } else {
            self.proj
                .intron_index_at(p)
                .map(|rank| AnnotationLocation::Intron {
                    rank,
                    total: total - 1,
                })
        }
    }

    /// Nucleotide change described through genomic positions, with
    /// intronic offsets where needed.
    fn genomic_nt_change(&self, change: &Change) -> Result<NtChange, ProjectionError> {
        let nt = |p: isize| self.proj.nt_position_at(p);
        let (begin, end) = (change.begin, change.end);
        Ok(match change.kind {
            VariantKind::Insertion => NtChange::Insertion {
                before: nt(begin - 1)?,
                after: nt(begin)?,
                inserted: change.alt_bases.clone(),
            },
            VariantKind::Snv => NtChange::Substitution {
                at: nt(begin)?,
                ref_base: change.ref_bases[0],
                alt_base: change.alt_bases[0],
            },
            VariantKind::Deletion => NtChange::Deletion {
                first: nt(begin)?,
                last: nt(end - 1)?,
                deleted: change.ref_bases.clone(),
            },
            VariantKind::Mnv | VariantKind::Delins => NtChange::Delins {
                first: nt(begin)?,
                last: nt(end - 1)?,
                inserted: change.alt_bases.clone(),
            },
        })
    }

    fn off_transcript(&self, change: &Change, anno: &mut Annotation) -> Result<(), ProjectionError> {
        let region = self.tx.tx_region();
        let upstream = change.end <= region.begin();
        let distance = if upstream {
            region.begin() - change.end + 1
        } else {
            change.begin - region.end() + 1
        };
        anno.distance = Some(distance);
        if distance > self.options.flank_len {
            anno.effects.insert(VariantEffect::IntergenicVariant);
            return Ok(());
        }
        anno.effects.insert(if upstream {
            VariantEffect::UpstreamGeneVariant
        } else {
            VariantEffect::DownstreamGeneVariant
        });
        anno.coding_change = Some(self.genomic_nt_change(change)?.render(self.prefix()));
        Ok(())
    }

    fn ablation(&self, change: &Change, anno: &mut Annotation) -> Result<(), ProjectionError> {
        anno.effects.insert(VariantEffect::TranscriptAblation);
        anno.coding_change = Some(self.genomic_nt_change(change)?.render(self.prefix()));
        if self.cds.is_some() {
            anno.protein_change = Some(self.render_protein(&ProteinChange::NoProtein));
        }
        Ok(())
    }

    fn intronic(&self, change: &Change, i: usize, anno: &mut Annotation) -> Result<(), ProjectionError> {
        let splice = splice_effects(self.tx, change.begin, change.end);
        anno.effects.extend(splice.iter().copied());
        anno.effects.insert(intron_effect(self.tx, i));
        anno.coding_change = Some(self.genomic_nt_change(change)?.render(self.prefix()));
        if self.cds.is_some() {
            let protein = if disrupts_splicing(&anno.effects) {
                ProteinChange::Unknown
            } else {
                ProteinChange::Unchanged
            };
            anno.protein_change = Some(self.render_protein(&protein));
        }
        Ok(())
    }

    /// Effects of the exonic bases `[begin, end)` of a change that also
    /// reaches beyond their exon.
    fn exonic_part_effects(
        &self,
        begin: isize,
        end: isize,
        effects: &mut BTreeSet<VariantEffect>,
    ) -> Result<(), ProjectionError> {
        let sb = self.proj.seq_offset_at(begin)?;
        let se = self.proj.seq_offset_at(end - 1)? + 1;
        match self.cds {
            None => {
                effects.insert(VariantEffect::NonCodingTranscriptExonVariant);
            }
            Some((cb, ce)) => {
                if sb < cb {
                    effects.insert(VariantEffect::FivePrimeUtrExonVariant);
                }
                if se > ce {
                    effects.insert(VariantEffect::ThreePrimeUtrExonVariant);
                }
                if sb < ce && cb < se {
                    effects.insert(VariantEffect::CodingSequenceVariant);
                    if sb < cb + 3 {
                        effects.insert(VariantEffect::StartLost);
                    }
                    if ce - 3 < se {
                        effects.insert(VariantEffect::StopLost);
                    }
                }
            }
        }
        Ok(())
    }

    fn spanning(&self, change: &Change, anno: &mut Annotation) -> Result<(), ProjectionError> {
        let (begin, end) = (change.begin, change.end);
        anno.effects.extend(splice_effects(self.tx, begin, end));
        if !covered_exons(self.tx, begin, end).is_empty() {
            anno.effects.insert(VariantEffect::ExonLossVariant);
        }

        // an insertion only spans when it sits on an exon/intron boundary
        let (first, last) = if change.is_insertion() {
            (begin - 1, begin + 1)
        } else {
            (begin, end)
        };
        let exons = self.tx.exon_regions();
        if !change.is_insertion() {
            for exon in exons {
                let (xb, xe) = (first.max(exon.begin()), last.min(exon.end()));
                if xb < xe {
                    self.exonic_part_effects(xb, xe, &mut anno.effects)?;
                }
            }
        }
        for (i, pair) in exons.windows(2).enumerate() {
            if first < pair[1].begin() && pair[0].end() < last {
                anno.effects.insert(intron_effect(self.tx, i));
            }
        }

        anno.coding_change = Some(self.genomic_nt_change(change)?.render(self.prefix()));
        if self.cds.is_some() {
            let protein = if anno.effects.contains(&VariantEffect::StartLost) {
                ProteinChange::NoProtein
            } else if disrupts_splicing(&anno.effects)
                || anno.effects.iter().any(|e| {
                    matches!(
                        e,
                        VariantEffect::ExonLossVariant
                            | VariantEffect::CodingSequenceVariant
                            | VariantEffect::StopLost
                    )
                })
            {
                ProteinChange::Unknown
            } else {
                ProteinChange::Unchanged
            };
            anno.protein_change = Some(self.render_protein(&protein));
        }
        Ok(())
    }

    fn exonic(&self, change: &Change, k: usize, anno: &mut Annotation) -> Result<(), ProjectionError> {
        anno.effects.extend(splice_effects(self.tx, change.begin, change.end));

        let ins = change.is_insertion();
        let sb = if ins {
            self.proj.seq_offset_at(change.begin - 1)? + 1
        } else {
            self.proj.seq_offset_at(change.begin)?
        };
        let se = if ins {
            sb
        } else {
            self.proj.seq_offset_at(change.end - 1)? + 1
        };
        if se - sb != change.ref_bases.len() as isize {
            // the change overlaps an indel between transcript and genome
            return Err(ProjectionError::InAlignmentGap(change.begin));
        }

        let seq = self.tx.sequence();
        let seq_len = seq.len() as isize;
        let seq_covers = se <= seq_len;
        let ref_matches = seq_covers && seq[sb as usize..se as usize] == change.ref_bases[..];
        if seq_covers && !ins && !ref_matches {
            anno.messages.insert(AnnotationMessage::RefDoesNotMatchTranscript);
        }

        // 3'-most placement within the exon, with the bases it removes or adds
        let shifted = if ref_matches {
            let limit = self.proj.exon_tx_range(k)?.end().min(seq_len) as usize;
            match change.kind {
                VariantKind::Deletion => {
                    let to = shift_deletion(seq, sb as usize, se as usize, limit);
                    Some((to as isize, seq[to..to + change.ref_bases.len()].to_vec()))
                }
                VariantKind::Insertion => {
                    let mut alt = change.alt_bases.clone();
                    let to = shift_insertion(seq, sb as usize, &mut alt, limit);
                    Some((to as isize, alt))
                }
                _ => None,
            }
        } else {
            None
        };
        // duplications are recognized at the 3'-most placement
        let is_dup = ins
            && match &shifted {
                Some((to, alt)) => is_dup_at(seq, *to, alt),
                None => is_dup_at(seq, sb, &change.alt_bases),
            };

        // placement used for the description only
        let (mut db, mut de) = (sb, se);
        let mut ref_bases = change.ref_bases.clone();
        let mut alt_bases = change.alt_bases.clone();
        if let Some((to, bases)) = shifted {
            if self.options.shift_3prime && to != sb {
                anno.messages.insert(AnnotationMessage::ThreePrimeShifted);
                de += to - sb;
                db = to;
                if ins {
                    alt_bases = bases;
                } else {
                    ref_bases = bases;
                }
            }
        }

        let n = alt_bases.len() as isize;
        let nt = |s: isize| {
            let (base, after_cds) = self.proj.nt_number(s);
            NtPosition {
                base,
                after_cds,
                offset: 0,
            }
        };
        let nt_change = match change.kind {
            VariantKind::Insertion if is_dup_at(seq, db, &alt_bases) => NtChange::Duplication {
                first: nt(db - n),
                last: nt(db - 1),
            },
            VariantKind::Insertion => NtChange::Insertion {
                before: nt(db - 1),
                after: nt(db),
                inserted: alt_bases.clone(),
            },
            VariantKind::Snv => NtChange::Substitution {
                at: nt(db),
                ref_base: ref_bases[0],
                alt_base: alt_bases[0],
            },
            VariantKind::Deletion => NtChange::Deletion {
                first: nt(db),
                last: nt(de - 1),
                deleted: ref_bases.clone(),
            },
            VariantKind::Mnv | VariantKind::Delins => NtChange::Delins {
                first: nt(db),
                last: nt(de - 1),
                inserted: alt_bases.clone(),
            },
        };
        anno.coding_change = Some(nt_change.render(self.prefix()));

        let cds = match self.cds {
            None => {
                anno.effects.insert(VariantEffect::NonCodingTranscriptExonVariant);
                return Ok(());
            }
            Some(cds) => cds,
        };
        // effects follow the change as given, the protein change follows
        // the described placement
        let edit = CodingChange {
            begin: sb,
            end: se,
            alt: &change.alt_bases,
            kind: change.kind,
            is_dup,
        };
        let (part, mut outcome) = cds_consequence(seq, cds, &edit);
        if part == CdsPart::Coding && (db, de) != (sb, se) {
            let described = CodingChange {
                begin: db,
                end: de,
                alt: &alt_bases,
                ..edit
            };
            if let (CdsPart::Coding, shifted) = cds_consequence(seq, cds, &described) {
                outcome.protein = shifted.protein;
            }
        }
        anno.effects.extend(outcome.effects);
        anno.messages.extend(outcome.messages);
        anno.protein_change = Some(self.render_protein(&outcome.protein));
        Ok(())
    }
}

/// Part of a coding transcript a change of the sequence falls into.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CdsPart {
    FivePrimeUtr,
    ThreePrimeUtr,
    /// Starts in the 5' UTR and reaches into the CDS.
    StartLoss,
    Coding,
}

fn cds_consequence(seq: &[u8], cds: (isize, isize), edit: &CodingChange) -> (CdsPart, CodingOutcome) {
    let (cb, ce) = cds;
    let seq_len = seq.len() as isize;
    let (b, e) = (edit.begin, edit.end);
    let ins = b == e;
    let outcome = |effects: Vec<VariantEffect>, protein: ProteinChange| CodingOutcome {
        effects,
        protein,
        messages: Vec::new(),
    };
    if (ins && b <= cb) || (!ins && e <= cb) {
        let mut effects = vec![VariantEffect::FivePrimeUtrExonVariant];
        if e <= seq_len
            && cb <= seq_len
            && gains_start_codon(seq, cb as usize, b as usize, e as usize, edit.alt)
        {
            effects.push(VariantEffect::FivePrimeUtrPrematureStartCodonGainVariant);
        }
        (CdsPart::FivePrimeUtr, outcome(effects, ProteinChange::Unchanged))
    } else if b >= ce {
        (
            CdsPart::ThreePrimeUtr,
            outcome(vec![VariantEffect::ThreePrimeUtrExonVariant], ProteinChange::Unchanged),
        )
    } else if b < cb {
        (
            CdsPart::StartLoss,
            outcome(
                vec![VariantEffect::FivePrimeUtrExonVariant, VariantEffect::StartLost],
                ProteinChange::NoProtein,
            ),
        )
    } else {
        let mut res = if e <= seq_len && ce <= seq_len {
            coding::analyze(seq, cds, edit)
        } else {
            coding::without_sequence(edit)
        };
        if e > ce {
            res.effects.push(VariantEffect::ThreePrimeUtrExonVariant);
        }
        (CdsPart::Coding, res)
    }
}

fn disrupts_splicing(effects: &BTreeSet<VariantEffect>) -> bool {
    effects.contains(&VariantEffect::SpliceDonorVariant)
        || effects.contains(&VariantEffect::SpliceAcceptorVariant)
}

/// Move a deletion of `seq[begin..end)` 3' while the sequence allows it,
/// without passing `limit`; returns the new begin.
fn shift_deletion(seq: &[u8], mut begin: usize, mut end: usize, limit: usize) -> usize {
    while end < limit && seq[begin] == seq[end] {
        begin += 1;
        end += 1;
    }
    begin
}

/// Move an insertion in front of `seq[at]` 3', rotating the inserted
/// bases along; returns the new insertion point.
fn shift_insertion(seq: &[u8], mut at: usize, inserted: &mut Sequence, limit: usize) -> usize {
    while at < limit && !inserted.is_empty() && inserted[0] == seq[at] {
        inserted.rotate_left(1);
        at += 1;
    }
    at
}

/// Whether the `alt` bases inserted in front of `seq[at]` repeat the bases
/// right before it.
fn is_dup_at(seq: &[u8], at: isize, alt: &[u8]) -> bool {
    let n = alt.len() as isize;
    n > 0 && n <= at && at <= seq.len() as isize && seq[(at - n) as usize..at as usize] == *alt
}

/// Whether replacing `seq[begin..end)` by `alt` adds an `ATG` to the
/// 5' UTR `seq[..cds_begin]`.
fn gains_start_codon(seq: &[u8], cds_begin: usize, begin: usize, end: usize, alt: &[u8]) -> bool {
    let count = |s: &[u8]| s.windows(3).filter(|w| *w == b"ATG").count();
    let mut utr = seq[..begin].to_vec();
    utr.extend_from_slice(alt);
    utr.extend_from_slice(&seq[end..cds_begin]);
    count(&utr) > count(&seq[..cds_begin])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::interval::GenomeInterval;
    use crate::refdict::{ReferenceDictionary, ReferenceDictionaryBuilder};
    use crate::strand::Strand;
    use crate::transcript::TranscriptParts;

    fn dict() -> Arc<ReferenceDictionary> {
        let mut builder = ReferenceDictionaryBuilder::new();
        builder.add_contig("chr1", 10_000);
        builder.build()
    }

    // 50 bases 5' UTR, ATG AAA TGG (GCT x 63) TAA, 49 bases 3' UTR
    fn sequence() -> Vec<u8> {
        let mut seq = b"C".repeat(50);
        seq.extend_from_slice(b"ATGAAATGG");
        seq.extend_from_slice(&b"GCT".repeat(63));
        seq.extend_from_slice(b"TAA");
        seq.extend_from_slice(&b"C".repeat(49));
        seq
    }

    // Exons 100-200, 300-400, 500-600 and CDS 150-551 on the transcript
    // strand; a reverse transcript is mirrored onto the forward strand.
    fn tx(dict: &Arc<ReferenceDictionary>, strand: Strand) -> Arc<TranscriptModel> {
        let iv = |b: isize, e: isize| {
            GenomeInterval::new(dict.clone(), strand, 0, b, e)
                .unwrap()
                .with_strand(Strand::Forward)
        };
        let mut parts = TranscriptParts::new(
            "tx".to_owned(),
            "GENE".to_owned(),
            strand,
            Some(iv(150, 551)),
            vec![iv(100, 200), iv(300, 400), iv(500, 600)],
        );
        parts.sequence = sequence();
        Arc::new(TranscriptModel::build(parts).unwrap())
    }

    fn run(dict: &Arc<ReferenceDictionary>, tx: &Arc<TranscriptModel>, change: &str) -> Annotation {
        let variant = GenomeVariant::parse(dict.clone(), change).unwrap();
        classify(&variant, tx, &AnnotationOptions::default()).unwrap()
    }

    fn effects(anno: &Annotation) -> Vec<VariantEffect> {
        anno.effects().iter().copied().collect()
    }

    #[test]
    fn coding_substitutions() {
        let dict = dict();
        let tx = tx(&dict, Strand::Forward);

        let anno = run(&dict, &tx, "chr1:154A>G");
        assert_eq!(effects(&anno), vec![VariantEffect::MissenseVariant]);
        assert_eq!(anno.coding_change(), Some("c.4A>G"));
        assert_eq!(anno.protein_change(), Some("p.Lys2Glu"));
        assert_eq!(anno.location(), Some(AnnotationLocation::Exon { rank: 0, total: 3 }));

        let anno = run(&dict, &tx, "chr1:162T>C");
        assert_eq!(effects(&anno), vec![VariantEffect::SynonymousVariant]);
        assert_eq!(anno.coding_change(), Some("c.12T>C"));
        assert_eq!(anno.protein_change(), Some("p.="));

        let anno = run(&dict, &tx, "chr1:159G>A");
        assert_eq!(effects(&anno), vec![VariantEffect::StopGained]);
        assert_eq!(anno.protein_change(), Some("p.Trp3*"));

        let anno = run(&dict, &tx, "chr1:549T>C");
        assert_eq!(effects(&anno), vec![VariantEffect::StopLost]);
        assert_eq!(anno.coding_change(), Some("c.199T>C"));
        assert_eq!(anno.protein_change(), Some("p.*67Glnext*?"));
    }

    #[test]
    fn coding_indels() {
        let dict = dict();
        let tx = tx(&dict, Strand::Forward);

        let anno = run(&dict, &tx, "chr1:164C>-");
        assert_eq!(effects(&anno), vec![VariantEffect::FrameshiftDeletion]);
        assert_eq!(anno.coding_change(), Some("c.14delC"));
        assert_eq!(anno.protein_change(), Some("p.Ala5Valfs*?"));

        let anno = run(&dict, &tx, "chr1:157->A");
        assert_eq!(effects(&anno), vec![VariantEffect::FrameshiftDuplication]);
        assert_eq!(anno.coding_change(), Some("c.6dup"));
        assert_eq!(anno.protein_change(), Some("p.Trp3Metfs*?"));

        let anno = run(&dict, &tx, "chr1:157TGG>-");
        assert_eq!(effects(&anno), vec![VariantEffect::InframeDeletion]);
        assert_eq!(anno.coding_change(), Some("c.7_9delTGG"));
        assert_eq!(anno.protein_change(), Some("p.Trp3del"));

        // shifted to the 3' end of the GCT repeat within the first exon
        let anno = run(&dict, &tx, "chr1:163->GCT");
        assert_eq!(effects(&anno), vec![VariantEffect::InframeDuplication]);
        assert_eq!(anno.coding_change(), Some("c.48_50dup"));
        assert_eq!(anno.protein_change(), Some("p.Ala17dup"));
        assert!(anno.messages().contains(&AnnotationMessage::ThreePrimeShifted));
    }

    #[test]
    fn without_shifting() {
        let dict = dict();
        let tx = tx(&dict, Strand::Forward);
        let variant = GenomeVariant::parse(dict, "chr1:163->GCT").unwrap();
        let options = AnnotationOptions::default().with_shift_3prime(false);
        let anno = classify(&variant, &tx, &options).unwrap();
        // the inserted bases repeat the preceding codon
        assert_eq!(anno.coding_change(), Some("c.10_12dup"));
        assert!(anno.messages().is_empty());
        assert_eq!(effects(&anno), vec![VariantEffect::InframeDuplication]);
        assert_eq!(anno.protein_change(), Some("p.Ala4dup"));
    }

    #[test]
    fn shifting_keeps_utr_insertion_out_of_the_start_codon() {
        let dict = dict();
        let tx = tx(&dict, Strand::Forward);
        // an A in front of the ATG slides onto the A of the start codon
        let variant = GenomeVariant::parse(dict, "chr1:151->A").unwrap();

        let shifted = classify(&variant, &tx, &AnnotationOptions::default()).unwrap();
        assert_eq!(shifted.coding_change(), Some("c.1dup"));
        assert!(shifted.messages().contains(&AnnotationMessage::ThreePrimeShifted));

        let options = AnnotationOptions::default().with_shift_3prime(false);
        let unshifted = classify(&variant, &tx, &options).unwrap();
        assert_eq!(unshifted.coding_change(), Some("c.-1_1insA"));

        for anno in [&shifted, &unshifted] {
            assert_eq!(effects(anno), vec![VariantEffect::FivePrimeUtrExonVariant]);
            assert_eq!(anno.protein_change(), Some("p.="));
        }
    }

    #[test]
    fn introns_and_splice_sites() {
        let dict = dict();
        let tx = tx(&dict, Strand::Forward);

        let anno = run(&dict, &tx, "chr1:206A>G");
        assert_eq!(
            effects(&anno),
            vec![
                VariantEffect::SpliceRegionVariant,
                VariantEffect::CodingTranscriptIntronVariant
            ]
        );
        assert_eq!(anno.coding_change(), Some("c.50+6A>G"));
        assert_eq!(anno.protein_change(), Some("p.="));
        assert_eq!(anno.location(), Some(AnnotationLocation::Intron { rank: 0, total: 2 }));

        let anno = run(&dict, &tx, "chr1:201G>A");
        assert_eq!(anno.most_severe_effect(), Some(VariantEffect::SpliceDonorVariant));
        assert_eq!(anno.coding_change(), Some("c.50+1G>A"));
        assert_eq!(anno.protein_change(), Some("p.?"));

        let anno = run(&dict, &tx, "chr1:196AAAAAAAAAA>-");
        assert_eq!(
            effects(&anno),
            vec![
                VariantEffect::SpliceDonorVariant,
                VariantEffect::CodingSequenceVariant,
                VariantEffect::CodingTranscriptIntronVariant
            ]
        );
        assert_eq!(anno.coding_change(), Some("c.46_50+5delAAAAAAAAAA"));
        assert_eq!(anno.protein_change(), Some("p.?"));
    }

    #[test]
    fn outside_the_transcript() {
        let dict = dict();
        let tx = tx(&dict, Strand::Forward);

        let anno = run(&dict, &tx, "chr1:91A>G");
        assert_eq!(effects(&anno), vec![VariantEffect::UpstreamGeneVariant]);
        assert_eq!(anno.distance(), Some(10));
        assert_eq!(anno.coding_change(), Some("c.-60A>G"));
        assert_eq!(anno.protein_change(), None);

        let anno = run(&dict, &tx, "chr1:5001A>G");
        assert_eq!(effects(&anno), vec![VariantEffect::IntergenicVariant]);
        assert_eq!(anno.distance(), Some(4401));

        let deletion = format!("chr1:91{}>-", "A".repeat(520));
        let anno = run(&dict, &tx, &deletion);
        assert_eq!(effects(&anno), vec![VariantEffect::TranscriptAblation]);
        assert_eq!(anno.protein_change(), Some("p.0?"));
    }

    #[test]
    fn utr_changes() {
        let dict = dict();
        let tx = tx(&dict, Strand::Forward);

        let anno = run(&dict, &tx, "chr1:121C>A");
        assert_eq!(effects(&anno), vec![VariantEffect::FivePrimeUtrExonVariant]);
        assert_eq!(anno.coding_change(), Some("c.-30C>A"));
        assert_eq!(anno.protein_change(), Some("p.="));

        let anno = run(&dict, &tx, "chr1:121->ATG");
        assert!(anno
            .effects()
            .contains(&VariantEffect::FivePrimeUtrPrematureStartCodonGainVariant));

        let anno = run(&dict, &tx, "chr1:561C>T");
        assert_eq!(effects(&anno), vec![VariantEffect::ThreePrimeUtrExonVariant]);
        assert_eq!(anno.coding_change(), Some("c.*10C>T"));
    }

    #[test]
    fn reverse_strand() {
        let dict = dict();
        let tx = tx(&dict, Strand::Reverse);
        // transcript-strand base 153 is forward base 9846
        let anno = run(&dict, &tx, "chr1:9847T>C");
        assert_eq!(effects(&anno), vec![VariantEffect::MissenseVariant]);
        assert_eq!(anno.coding_change(), Some("c.4A>G"));
        assert_eq!(anno.protein_change(), Some("p.Lys2Glu"));
        assert_eq!(anno.variant().strand(), Strand::Forward);
    }

    #[test]
    fn reference_mismatch_is_reported() {
        let dict = dict();
        let tx = tx(&dict, Strand::Forward);
        let anno = run(&dict, &tx, "chr1:154C>G");
        assert!(anno
            .messages()
            .contains(&AnnotationMessage::RefDoesNotMatchTranscript));
        assert_eq!(anno.coding_change(), Some("c.4C>G"));
    }

    #[test]
    fn noncoding_transcript() {
        let dict = dict();
        let iv = |b, e| GenomeInterval::new(dict.clone(), Strand::Forward, 0, b, e).unwrap();
        let tx = Arc::new(
            TranscriptModel::build(TranscriptParts::new(
                "nc".to_owned(),
                "RNA".to_owned(),
                Strand::Forward,
                None,
                vec![iv(100, 200), iv(300, 400)],
            ))
            .unwrap(),
        );
        let anno = run(&dict, &tx, "chr1:111A>G");
        assert_eq!(effects(&anno), vec![VariantEffect::NonCodingTranscriptExonVariant]);
        assert_eq!(anno.coding_change(), Some("n.11A>G"));
        assert_eq!(anno.protein_change(), None);

        let anno = run(&dict, &tx, "chr1:250A>G");
        assert_eq!(effects(&anno), vec![VariantEffect::NonCodingTranscriptIntronVariant]);
        assert_eq!(anno.coding_change(), Some("n.100+50A>G"));
        let anno = run(&dict, &tx, "chr1:251A>G");
        assert_eq!(anno.coding_change(), Some("n.101-50A>G"));
    }

    #[test]
    fn shifting_helpers() {
        let seq = b"CAAAG";
        assert_eq!(shift_deletion(seq, 1, 2, 5), 3);
        let mut ins = b"A".to_vec();
        assert_eq!(shift_insertion(seq, 1, &mut ins, 5), 4);
        let mut ins = b"AC".to_vec();
        assert_eq!(shift_insertion(b"ACACG", 0, &mut ins, 5), 4);
        assert_eq!(ins, b"AC".to_vec());
        assert!(gains_start_codon(b"CCCCCATG", 5, 2, 3, b"ATG"));
        assert!(!gains_start_codon(b"CCCCCATG", 5, 2, 3, b"G"));
    }
}
