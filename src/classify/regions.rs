// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Decision tables for locating a variant relative to the exon/intron
//! structure of a transcript.
//!
//! All offsets here are genomic offsets on the transcript strand.

use crate::effect::VariantEffect;
use crate::projector::TranscriptProjector;
use crate::transcript::TranscriptModel;

/// Which side of an intron a window is anchored at.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Boundary {
    /// First intronic base after an exon.
    ExonEnd,
    /// First exonic base after an intron.
    ExonBegin,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum SpliceSite {
    Donor,
    Acceptor,
    Region,
}

#[derive(Debug, Clone, Copy)]
struct SpliceWindow {
    site: SpliceSite,
    anchor: Boundary,
    from: isize,
    to: isize,
}

/// Windows `[anchor + from, anchor + to)` around every intron.
const SPLICE_WINDOWS: [SpliceWindow; 4] = [
    SpliceWindow {
        site: SpliceSite::Donor,
        anchor: Boundary::ExonEnd,
        from: 0,
        to: 2,
    },
    SpliceWindow {
        site: SpliceSite::Acceptor,
        anchor: Boundary::ExonBegin,
        from: -2,
        to: 0,
    },
    SpliceWindow {
        site: SpliceSite::Region,
        anchor: Boundary::ExonEnd,
        from: -3,
        to: 8,
    },
    SpliceWindow {
        site: SpliceSite::Region,
        anchor: Boundary::ExonBegin,
        from: -8,
        to: 3,
    },
];

/// Whether a change of `[begin, end)` touches `[wb, we)`. An insertion
/// (`begin == end`) touches the window only if both flanking bases lie in
/// it.
pub(crate) fn touches(begin: isize, end: isize, wb: isize, we: isize) -> bool {
    if begin == end {
        wb < begin && begin < we
    } else {
        begin < we && wb < end
    }
}

/// Splice effects of a change of `[begin, end)`.
///
/// Donor and acceptor hits are reported; the splice region effect is only
/// added when neither site itself is hit.
pub(crate) fn splice_effects(tx: &TranscriptModel, begin: isize, end: isize) -> Vec<VariantEffect> {
    let exons = tx.exon_regions();
    let (mut donor, mut acceptor, mut region) = (false, false, false);
    for pair in exons.windows(2) {
        for w in SPLICE_WINDOWS.iter() {
            let anchor = match w.anchor {
                Boundary::ExonEnd => pair[0].end(),
                Boundary::ExonBegin => pair[1].begin(),
            };
            if touches(begin, end, anchor + w.from, anchor + w.to) {
                match w.site {
                    SpliceSite::Donor => donor = true,
                    SpliceSite::Acceptor => acceptor = true,
                    SpliceSite::Region => region = true,
                }
            }
        }
    }
    let mut effects = Vec::new();
    if donor {
        effects.push(VariantEffect::SpliceDonorVariant);
    }
    if acceptor {
        effects.push(VariantEffect::SpliceAcceptorVariant);
    }
    if region && !donor && !acceptor {
        effects.push(VariantEffect::SpliceRegionVariant);
    }
    effects
}

/// Effect for a variant inside intron `i`, depending on whether the intron
/// lies in the 5' UTR, the CDS or the 3' UTR.
pub(crate) fn intron_effect(tx: &TranscriptModel, i: usize) -> VariantEffect {
    let exons = tx.exon_regions();
    match tx.cds_region() {
        None => VariantEffect::NonCodingTranscriptIntronVariant,
        Some(cds) => {
            if exons[i + 1].begin() <= cds.begin() {
                VariantEffect::FivePrimeUtrIntronVariant
            } else if exons[i].end() >= cds.end() {
                VariantEffect::ThreePrimeUtrIntronVariant
            } else {
                VariantEffect::CodingTranscriptIntronVariant
            }
        }
    }
}

/// Where the bases changed by a variant lie.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Footprint {
    /// All bases (for insertions: both flanking bases) in exon `i`.
    Exonic(usize),
    /// All bases in intron `i`.
    Intronic(usize),
    /// Crossing an exon/intron or transcript boundary.
    Spanning,
}

pub(crate) fn footprint(proj: &TranscriptProjector, begin: isize, end: isize) -> Footprint {
    let (first, last) = if begin == end {
        (begin - 1, begin)
    } else {
        (begin, end - 1)
    };
    match (proj.exon_index_at(first), proj.exon_index_at(last)) {
        (Some(a), Some(b)) if a == b => return Footprint::Exonic(a),
        _ => (),
    }
    match (proj.intron_index_at(first), proj.intron_index_at(last)) {
        (Some(a), Some(b)) if a == b => Footprint::Intronic(a),
        _ => Footprint::Spanning,
    }
}

/// Indices of exons completely covered by `[begin, end)`.
pub(crate) fn covered_exons(tx: &TranscriptModel, begin: isize, end: isize) -> Vec<usize> {
    tx.exon_regions()
        .iter()
        .enumerate()
        .filter(|(_, e)| begin <= e.begin() && e.end() <= end)
        .map(|(i, _)| i)
        .collect()
}
