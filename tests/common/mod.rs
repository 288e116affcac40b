// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

#![allow(dead_code)]

use std::sync::Arc;

use bio_varanno::coord::interval::GenomeInterval;
use bio_varanno::refdict::{ReferenceDictionary, ReferenceDictionaryBuilder};
use bio_varanno::strand::Strand;
use bio_varanno::transcript::alignment::{Alignment, Anchor};
use bio_varanno::transcript::{TranscriptModel, TranscriptParts};

pub const CHR1: u32 = 0;
pub const SYNTH: u32 = 1;
pub const SYNTH_LEN: isize = 10_000;

pub fn init_logging() {
    let _ = env_logger::builder().is_test(true).try_init();
}

/// hg19-like dictionary with a small synthetic contig for coding tests.
pub fn dict() -> Arc<ReferenceDictionary> {
    let mut builder = ReferenceDictionaryBuilder::new();
    let chr1 = builder.add_contig("chr1", 249_250_621);
    builder.add_alias(chr1, "1");
    builder.add_contig("synth", SYNTH_LEN);
    builder.add_contig("chrM", 16_571);
    builder.build()
}

/// uc001anx.3 (KLHL21), forward strand, without recorded sequence.
pub fn uc001anx3(dict: &Arc<ReferenceDictionary>) -> Arc<TranscriptModel> {
    let iv = |b, e| GenomeInterval::new(dict.clone(), Strand::Forward, CHR1, b, e).unwrap();
    let exons = [
        (6640062, 6640196),
        (6640600, 6641359),
        (6645978, 6646090),
        (6646754, 6646847),
        (6647264, 6647351),
        (6647537, 6647692),
        (6648119, 6648251),
        (6648337, 6648502),
        (6648815, 6648896),
        (6648975, 6649046),
        (6649188, 6649339),
    ];
    let mut parts = TranscriptParts::new(
        "uc001anx.3".to_owned(),
        "KLHL21".to_owned(),
        Strand::Forward,
        Some(iv(6640669, 6649272)),
        exons.iter().map(|&(b, e)| iv(b, e)).collect(),
    );
    parts.gene_id = "ENSG00000162413".to_owned();
    Arc::new(TranscriptModel::build(parts).unwrap())
}

/// 50 bases 5' UTR, `ATG AAA TGG (GCT x 63) TAA`, 49 bases 3' UTR.
pub fn coding_sequence() -> Vec<u8> {
    let mut seq = b"C".repeat(50);
    seq.extend_from_slice(b"ATGAAATGG");
    seq.extend_from_slice(&b"GCT".repeat(63));
    seq.extend_from_slice(b"TAA");
    seq.extend_from_slice(&b"C".repeat(49));
    seq
}

/// Coding transcript on the synthetic contig with exons 100-200, 300-400,
/// 500-600 and CDS 150-551, counted 5' to 3' on `strand`.
pub fn coding_tx(dict: &Arc<ReferenceDictionary>, accession: &str, strand: Strand) -> Arc<TranscriptModel> {
    let mut parts = coding_parts(dict, accession, strand);
    parts.sequence = coding_sequence();
    Arc::new(TranscriptModel::build(parts).unwrap())
}

/// Forward strand variant of [`coding_tx`] whose recorded `sequence` is
/// placed against the exons by `anchors`.
pub fn aligned_tx(
    dict: &Arc<ReferenceDictionary>,
    accession: &str,
    sequence: Vec<u8>,
    anchors: Vec<Anchor>,
) -> Arc<TranscriptModel> {
    let mut parts = coding_parts(dict, accession, Strand::Forward);
    parts.sequence = sequence;
    parts.alignment = Some(Alignment::new(anchors).unwrap());
    Arc::new(TranscriptModel::build(parts).unwrap())
}

fn coding_parts(dict: &Arc<ReferenceDictionary>, accession: &str, strand: Strand) -> TranscriptParts {
    let iv = |b: isize, e: isize| {
        GenomeInterval::new(dict.clone(), strand, SYNTH, b, e)
            .unwrap()
            .with_strand(Strand::Forward)
    };
    TranscriptParts::new(
        accession.to_owned(),
        "GENE".to_owned(),
        strand,
        Some(iv(150, 551)),
        vec![iv(100, 200), iv(300, 400), iv(500, 600)],
    )
}

/// 1-based forward position of the transcript-strand offset `p` on the
/// synthetic contig.
pub fn synth_pos(strand: Strand, p: isize) -> isize {
    match strand {
        Strand::Forward => p + 1,
        Strand::Reverse => SYNTH_LEN - p,
    }
}
