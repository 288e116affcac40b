// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Protein-level consequences of changes inside the coding sequence.
//!
//! All offsets are offsets into the recorded transcript sequence.

use crate::annotation::AnnotationMessage;
use crate::effect::VariantEffect;
use crate::nomenclature::{AaPos, ProteinChange};
use crate::sequence::{translate, translate_codon, AminoAcid, STOP, UNKNOWN_AMINO_ACID};
use crate::variant::VariantKind;

/// Effects, protein change and caveats of a coding change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(super) struct CodingOutcome {
    pub effects: Vec<VariantEffect>,
    pub protein: ProteinChange,
    pub messages: Vec<AnnotationMessage>,
}

impl CodingOutcome {
    fn new(effect: VariantEffect, protein: ProteinChange) -> Self {
        CodingOutcome {
            effects: vec![effect],
            protein,
            messages: Vec::new(),
        }
    }

    fn undetermined(effect: VariantEffect) -> Self {
        CodingOutcome {
            effects: vec![effect],
            protein: ProteinChange::Unknown,
            messages: vec![AnnotationMessage::ProteinChangeUndetermined],
        }
    }
}

/// A change of the sequence range `[begin, end)` to `alt`.
#[derive(Debug, Clone, Copy)]
pub(super) struct CodingChange<'a> {
    pub begin: isize,
    pub end: isize,
    pub alt: &'a [u8],
    pub kind: VariantKind,
    /// The inserted bases repeat the bases right before the insertion.
    pub is_dup: bool,
}

impl<'a> CodingChange<'a> {
    fn delta(&self) -> isize {
        self.alt.len() as isize - (self.end - self.begin)
    }

    fn is_insertion(&self) -> bool {
        self.begin == self.end
    }

    fn frameshift_effect(&self) -> VariantEffect {
        if self.is_dup {
            return VariantEffect::FrameshiftDuplication;
        }
        match self.kind {
            VariantKind::Insertion => VariantEffect::FrameshiftInsertion,
            VariantKind::Deletion => VariantEffect::FrameshiftDeletion,
            _ => VariantEffect::FrameshiftVariant,
        }
    }
}

/// Whether `cds` starts with `ATG`, ends with a stop codon and consists of
/// whole codons.
pub(super) fn is_complete_cds(cds: &[u8]) -> bool {
    cds.len() >= 6
        && cds.len() % 3 == 0
        && cds.starts_with(b"ATG")
        && translate_codon(&cds[cds.len() - 3..]) == Some(STOP)
}

/// Outcome when the transcript sequence cannot be used for translation.
pub(super) fn without_sequence(change: &CodingChange) -> CodingOutcome {
    let effect = if change.delta() % 3 != 0 {
        change.frameshift_effect()
    } else {
        VariantEffect::CodingSequenceVariant
    };
    CodingOutcome {
        effects: vec![effect],
        protein: ProteinChange::Unknown,
        messages: vec![AnnotationMessage::TranscriptIncomplete],
    }
}

/// Classify a change starting inside the CDS `[cds.0, cds.1)` of `seq`.
pub(super) fn analyze(seq: &[u8], cds: (isize, isize), change: &CodingChange) -> CodingOutcome {
    let (cb, ce) = (cds.0 as usize, cds.1 as usize);
    if !is_complete_cds(&seq[cb..ce]) {
        return without_sequence(change);
    }
    let (b, e) = (change.begin as usize, change.end as usize);
    let ref_tail = &seq[cb..];
    let mut alt_tail = seq[cb..b].to_vec();
    alt_tail.extend_from_slice(change.alt);
    alt_tail.extend_from_slice(&seq[e..]);

    let c_b = b - cb;
    let touches_start = if change.is_insertion() {
        0 < c_b && c_b < 3
    } else {
        c_b < 3
    };
    if touches_start && !alt_tail.starts_with(b"ATG") {
        return CodingOutcome::new(VariantEffect::StartLost, ProteinChange::NoProtein);
    }

    if change.delta() % 3 != 0 {
        frameshift(ref_tail, &alt_tail, c_b, ce - cb, change)
    } else {
        in_frame(ref_tail, &alt_tail, c_b, e - cb, change)
    }
}

fn stop_distance(prot: &[AminoAcid], from: usize) -> Option<isize> {
    prot.get(from..)?
        .iter()
        .position(|&aa| aa == STOP)
        .map(|d| d as isize + 1)
}

fn frameshift(
    ref_tail: &[u8],
    alt_tail: &[u8],
    c_b: usize,
    cds_len: usize,
    change: &CodingChange,
) -> CodingOutcome {
    let effect = change.frameshift_effect();
    let ref_prot = translate(ref_tail);
    let alt_prot = translate(alt_tail);
    let last = cds_len / 3 - 1;

    let i = match (c_b / 3..=last).find(|&i| ref_prot.get(i) != alt_prot.get(i)) {
        Some(i) => i,
        None => {
            return CodingOutcome::new(VariantEffect::StopRetainedVariant, ProteinChange::Unchanged)
        }
    };
    let ref_aa = ref_prot[i];
    let at = AaPos::new(ref_aa, i as isize + 1);
    let alt_aa = match alt_prot.get(i) {
        Some(&aa) => aa,
        None => {
            let protein = ProteinChange::Frameshift {
                at,
                alt: None,
                stop_distance: None,
            };
            return CodingOutcome::new(effect, protein);
        }
    };
    if ref_aa == UNKNOWN_AMINO_ACID || alt_aa == UNKNOWN_AMINO_ACID {
        return CodingOutcome::undetermined(effect);
    }

    if ref_aa == STOP {
        let protein = ProteinChange::Extension {
            at,
            alt: alt_aa,
            stop_distance: stop_distance(&alt_prot, i),
        };
        let mut outcome = CodingOutcome::new(effect, protein);
        outcome.effects.push(VariantEffect::StopLost);
        return outcome;
    }
    if alt_aa == STOP {
        let mut outcome = CodingOutcome::new(effect, ProteinChange::Substitution { at, alt: STOP });
        outcome.effects.push(VariantEffect::StopGained);
        return outcome;
    }
    let protein = ProteinChange::Frameshift {
        at,
        alt: Some(alt_aa),
        stop_distance: stop_distance(&alt_prot, i),
    };
    CodingOutcome::new(effect, protein)
}

fn in_frame(
    ref_tail: &[u8],
    alt_tail: &[u8],
    c_b: usize,
    c_e: usize,
    change: &CodingChange,
) -> CodingOutcome {
    // codon-aligned window around the changed bases
    let wb = c_b - c_b % 3;
    let we = (c_e + 2) / 3 * 3;
    let alt_we = (we as isize + change.delta()) as usize;
    if we > ref_tail.len() || alt_we > alt_tail.len() {
        return CodingOutcome::new(VariantEffect::CodingSequenceVariant, ProteinChange::Unknown);
    }
    let ref_aa = translate(&ref_tail[wb..we]);
    let alt_aa = translate(&alt_tail[wb..alt_we]);
    if ref_aa.contains(&UNKNOWN_AMINO_ACID) || alt_aa.contains(&UNKNOWN_AMINO_ACID) {
        return CodingOutcome::undetermined(VariantEffect::CodingSequenceVariant);
    }

    let pre = ref_aa
        .iter()
        .zip(alt_aa.iter())
        .take_while(|(r, a)| r == a)
        .count();
    let suf = ref_aa[pre..]
        .iter()
        .rev()
        .zip(alt_aa[pre..].iter().rev())
        .take_while(|(r, a)| r == a)
        .count();
    let r = &ref_aa[pre..ref_aa.len() - suf];
    let mut a = &alt_aa[pre..alt_aa.len() - suf];
    // 0-based index of the first changed amino acid
    let f = wb / 3 + pre;
    let pos = |i: usize| i as isize + 1;

    if r.is_empty() && a.is_empty() {
        let effect = if ref_aa.contains(&STOP) {
            VariantEffect::StopRetainedVariant
        } else if wb == 0 {
            VariantEffect::StartRetainedVariant
        } else {
            VariantEffect::SynonymousVariant
        };
        return CodingOutcome::new(effect, ProteinChange::Unchanged);
    }
    if f == 0 {
        return CodingOutcome::new(VariantEffect::StartLost, ProteinChange::NoProtein);
    }

    if let Some(k) = r.iter().position(|&aa| aa == STOP) {
        if !a.contains(&STOP) {
            // translation runs on into the 3' UTR
            let alt_prot = translate(&alt_tail[wb..]);
            let j = pre + k;
            let protein = match alt_prot.get(j) {
                Some(&alt) => ProteinChange::Extension {
                    at: AaPos::new(STOP, pos(f + k)),
                    alt,
                    stop_distance: stop_distance(&alt_prot, j),
                },
                None => ProteinChange::Unknown,
            };
            return CodingOutcome::new(VariantEffect::StopLost, protein);
        }
    }

    let mut stop_gained = false;
    if let Some(k) = a.iter().position(|&aa| aa == STOP) {
        if k == 0 && !r.is_empty() {
            let protein = ProteinChange::Substitution {
                at: AaPos::new(r[0], pos(f)),
                alt: STOP,
            };
            return CodingOutcome::new(VariantEffect::StopGained, protein);
        }
        a = &a[..=k];
        stop_gained = true;
    }

    let disruptive = c_b % 3 != 0;
    let (effect, protein) = if r.len() == 1 && a.len() == 1 {
        (
            VariantEffect::MissenseVariant,
            ProteinChange::Substitution {
                at: AaPos::new(r[0], pos(f)),
                alt: a[0],
            },
        )
    } else if r.is_empty() {
        let ref_prot = translate(ref_tail);
        let n = a.len();
        if f >= n && ref_prot[f - n..f] == *a {
            (
                VariantEffect::InframeDuplication,
                ProteinChange::Duplication {
                    first: AaPos::new(ref_prot[f - n], pos(f - n)),
                    last: AaPos::new(ref_prot[f - 1], pos(f - 1)),
                },
            )
        } else {
            let effect = if disruptive {
                VariantEffect::DisruptiveInframeInsertion
            } else {
                VariantEffect::InframeInsertion
            };
            (
                effect,
                ProteinChange::Insertion {
                    left: AaPos::new(ref_prot[f - 1], pos(f - 1)),
                    right: AaPos::new(ref_prot[f], pos(f)),
                    inserted: a.to_vec(),
                },
            )
        }
    } else {
        let first = AaPos::new(r[0], pos(f));
        let last = AaPos::new(r[r.len() - 1], pos(f + r.len() - 1));
        if a.is_empty() {
            let effect = if disruptive {
                VariantEffect::DisruptiveInframeDeletion
            } else {
                VariantEffect::InframeDeletion
            };
            (effect, ProteinChange::Deletion { first, last })
        } else {
            let effect = match change.kind {
                _ if change.delta() == 0 => VariantEffect::MissenseVariant,
                VariantKind::Deletion if disruptive => VariantEffect::DisruptiveInframeDeletion,
                VariantKind::Deletion => VariantEffect::InframeDeletion,
                VariantKind::Insertion if disruptive => VariantEffect::DisruptiveInframeInsertion,
                VariantKind::Insertion => VariantEffect::InframeInsertion,
                _ => VariantEffect::ProteinAlteringVariant,
            };
            (
                effect,
                ProteinChange::Delins {
                    first,
                    last,
                    inserted: a.to_vec(),
                },
            )
        }
    };

    let mut outcome = CodingOutcome::new(effect, protein);
    if stop_gained {
        outcome.effects.push(VariantEffect::StopGained);
    }
    outcome
}
