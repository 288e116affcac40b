// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

mod common;

use std::sync::Arc;
use std::thread;

use pretty_assertions::assert_eq;

use bio_varanno::annotation::{AnnotationLocation, AnnotationMessage};
use bio_varanno::config::{AminoAcidCode, AnnotationSelection};
use bio_varanno::coord::pos::GenomePosition;
use bio_varanno::effect::PutativeImpact;
use bio_varanno::interval_array::IntervalArray;
use bio_varanno::projector::TranscriptProjector;
use bio_varanno::strand::Strand;
use bio_varanno::{AnnotationError, AnnotationOptions, VariantAnnotator, VariantEffect};

use bio_varanno::transcript::alignment::Anchor;

use common::{aligned_tx, coding_sequence, coding_tx, dict, synth_pos, uc001anx3, SYNTH};

fn annotator(options: AnnotationOptions) -> VariantAnnotator {
    common::init_logging();
    let dict = dict();
    let transcripts = vec![
        uc001anx3(&dict),
        coding_tx(&dict, "NM_F", Strand::Forward),
        coding_tx(&dict, "NM_R", Strand::Reverse),
    ];
    VariantAnnotator::from_transcripts(dict, transcripts, options)
}

fn effects(annotator: &VariantAnnotator, change: &str) -> Vec<VariantEffect> {
    let annos = annotator.annotate_change(change).unwrap();
    annos.all()[0].effects().iter().copied().collect()
}

#[test]
fn klhl21_exonic_position() {
    let annotator = annotator(AnnotationOptions::default());
    let annos = annotator.annotate_change("chr1:6641050A>G").unwrap();
    assert_eq!(annos.len(), 1);
    let anno = annos.highest_impact_annotation().unwrap();
    assert_eq!(anno.transcript().unwrap().accession(), "uc001anx.3");
    assert_eq!(anno.coding_change(), Some("c.381A>G"));
    assert_eq!(anno.location(), Some(AnnotationLocation::Exon { rank: 1, total: 11 }));
    // no recorded sequence, so the protein change cannot be predicted
    assert_eq!(anno.protein_change(), Some("p.?"));
    assert!(anno.messages().contains(&AnnotationMessage::TranscriptIncomplete));
    assert_eq!(
        anno.to_annotation_string(),
        "KLHL21:uc001anx.3:exon2:c.381A>G:p.?"
    );

    // the same change through the contig alias
    let aliased = annotator.annotate_change("1:6641050A>G").unwrap();
    assert_eq!(aliased.all()[0].coding_change(), Some("c.381A>G"));
}

#[test]
fn klhl21_upstream() {
    let annotator = annotator(AnnotationOptions::default());
    let annos = annotator.annotate_change("chr1:6640001A>G").unwrap();
    let anno = annos.highest_impact_annotation().unwrap();
    assert_eq!(anno.most_severe_effect(), Some(VariantEffect::UpstreamGeneVariant));
    assert_eq!(anno.distance(), Some(62));
    assert_eq!(anno.coding_change(), Some("c.-265A>G"));
    assert_eq!(anno.putative_impact(), PutativeImpact::Modifier);
}

#[test]
fn missense_on_both_strands() {
    let annotator = annotator(AnnotationOptions::default());

    let annos = annotator.annotate_change("synth:154A>G").unwrap();
    assert_eq!(annos.len(), 1);
    let anno = &annos.all()[0];
    assert_eq!(anno.to_annotation_string(), "GENE:NM_F:exon1:c.4A>G:p.Lys2Glu");
    assert_eq!(anno.putative_impact(), PutativeImpact::Moderate);

    // same transcript offset, mirrored onto the reverse strand
    let change = format!("synth:{}T>C", synth_pos(Strand::Reverse, 153));
    let annos = annotator.annotate_change(&change).unwrap();
    assert_eq!(annos.len(), 1);
    assert_eq!(
        annos.all()[0].to_annotation_string(),
        "GENE:NM_R:exon1:c.4A>G:p.Lys2Glu"
    );
}

#[test]
fn one_letter_amino_acids() {
    let options = AnnotationOptions::default().with_amino_acid_code(AminoAcidCode::OneLetter);
    let annotator = annotator(options);
    let annos = annotator.annotate_change("synth:154A>G").unwrap();
    assert_eq!(annos.all()[0].protein_change(), Some("p.K2E"));
}

#[test]
fn synonymous_and_stop() {
    let annotator = annotator(AnnotationOptions::default());
    assert_eq!(
        effects(&annotator, "synth:162T>C"),
        vec![VariantEffect::SynonymousVariant]
    );
    let annos = annotator.annotate_change("synth:162T>C").unwrap();
    assert_eq!(annos.all()[0].protein_change(), Some("p.="));
    assert_eq!(annos.all()[0].putative_impact(), PutativeImpact::Low);

    assert_eq!(effects(&annotator, "synth:159G>A"), vec![VariantEffect::StopGained]);
    assert_eq!(effects(&annotator, "synth:549T>C"), vec![VariantEffect::StopLost]);
}

#[test]
fn reverse_strand_indels_and_introns() {
    let annotator = annotator(AnnotationOptions::default());

    let change = format!("synth:{}G>-", synth_pos(Strand::Reverse, 163));
    let anno = annotator.annotate_change(&change).unwrap().all()[0].clone();
    assert_eq!(anno.transcript().unwrap().accession(), "NM_R");
    assert_eq!(
        anno.effects().iter().copied().collect::<Vec<_>>(),
        vec![VariantEffect::FrameshiftDeletion]
    );
    assert_eq!(anno.coding_change(), Some("c.14delC"));
    assert_eq!(anno.protein_change(), Some("p.Ala5Valfs*?"));

    let change = format!("synth:{}T>C", synth_pos(Strand::Reverse, 205));
    let anno = annotator.annotate_change(&change).unwrap().all()[0].clone();
    assert_eq!(anno.coding_change(), Some("c.50+6A>G"));
    assert_eq!(anno.location(), Some(AnnotationLocation::Intron { rank: 0, total: 2 }));
    assert_eq!(anno.most_severe_effect(), Some(VariantEffect::SpliceRegionVariant));

    let change = format!("synth:{}T>C", synth_pos(Strand::Reverse, 90));
    let annos = annotator.annotate_change(&change).unwrap();
    let anno = annos.highest_impact_annotation().unwrap();
    assert_eq!(anno.transcript().unwrap().accession(), "NM_R");
    assert_eq!(anno.most_severe_effect(), Some(VariantEffect::UpstreamGeneVariant));
    assert_eq!(anno.distance(), Some(10));
    assert_eq!(anno.coding_change(), Some("c.-60A>G"));
}

#[test]
fn shifting_can_be_disabled() {
    let annotator = annotator(AnnotationOptions::default());
    let anno = annotator.annotate_change("synth:163->GCT").unwrap().all()[0].clone();
    assert_eq!(anno.coding_change(), Some("c.48_50dup"));
    assert!(anno.messages().contains(&AnnotationMessage::ThreePrimeShifted));

    let annotator = self::annotator(AnnotationOptions::default().with_shift_3prime(false));
    let anno = annotator.annotate_change("synth:163->GCT").unwrap().all()[0].clone();
    assert_eq!(anno.coding_change(), Some("c.10_12dup"));
}

#[test]
fn frame_arithmetic() {
    let dict = dict();
    let tx = coding_tx(&dict, "NM_F", Strand::Forward);
    let proj = TranscriptProjector::new(&tx);
    let pos = |p| GenomePosition::new(dict.clone(), Strand::Forward, SYNTH, p).unwrap();

    let cds = proj.genome_to_cds_pos(&pos(153)).unwrap();
    assert_eq!(cds.pos(), 3);
    assert_eq!(cds.codon_and_frame(), (1, 0));

    // first base of the second exon is the 51st coding base
    let aa = proj.genome_to_protein_pos(&pos(300)).unwrap();
    assert_eq!((aa.pos(), aa.frame()), (16, 2));
    assert_eq!(aa.to_string(), "NM_F:p.17");

    let tx = coding_tx(&dict, "NM_R", Strand::Reverse);
    let proj = TranscriptProjector::new(&tx);
    let cds = proj
        .genome_to_cds_pos(&pos(synth_pos(Strand::Reverse, 300) - 1))
        .unwrap();
    assert_eq!(cds.codon_and_frame(), (16, 2));
}

#[test]
fn best_only_is_prefix_of_all() {
    let annotator = annotator(AnnotationOptions::default());
    for change in ["chr1:6641050A>G", "synth:154A>G", "synth:5000A>G", "chrM:100A>G"] {
        let annos = annotator.annotate_change(change).unwrap();
        let best = annos.select(AnnotationSelection::BestOnly);
        assert_eq!(best.len(), 1);
        let min = annos
            .all()
            .iter()
            .filter_map(|a| a.most_severe_effect())
            .min();
        assert_eq!(best[0].most_severe_effect(), min);
    }
}

#[test]
fn configured_selection() {
    common::init_logging();
    let dict = dict();
    let transcripts = vec![
        coding_tx(&dict, "NM_F", Strand::Forward),
        coding_tx(&dict, "NM_G", Strand::Forward),
    ];

    let options = AnnotationOptions::default().with_selection(AnnotationSelection::BestOnly);
    let annotator = VariantAnnotator::from_transcripts(dict.clone(), transcripts.clone(), options);
    let annos = annotator.annotate_change("synth:154A>G").unwrap();
    assert_eq!(annos.selection(), AnnotationSelection::BestOnly);
    assert_eq!(annos.all().len(), 2);
    assert_eq!(annos.selected().len(), 1);
    assert_eq!(
        annos.selected()[0].to_annotation_string(),
        annos.all()[0].to_annotation_string()
    );

    let annotator = VariantAnnotator::from_transcripts(dict, transcripts, AnnotationOptions::default());
    let annos = annotator.annotate_change("synth:154A>G").unwrap();
    assert_eq!(annos.selection(), AnnotationSelection::All);
    assert_eq!(annos.selected().len(), 2);
}

#[test]
fn cdna_with_extra_bases() {
    common::init_logging();
    let dict = dict();
    // three bases of the cDNA are missing from the genome at exonic offset 20
    let mut sequence = coding_sequence();
    sequence.splice(20..20, b"GGG".iter().copied());
    let anchors = vec![
        Anchor::new(0, 0),
        Anchor::new(20, 20),
        Anchor::new(20, 23),
        Anchor::new(300, 303),
    ];
    let tx = aligned_tx(&dict, "NM_INS", sequence, anchors);
    let annotator = VariantAnnotator::from_transcripts(dict, vec![tx], AnnotationOptions::default());

    let annos = annotator.annotate_change("synth:154A>G").unwrap();
    assert_eq!(annos.len(), 1);
    assert_eq!(
        annos.all()[0].to_annotation_string(),
        "GENE:NM_INS:exon1:c.4A>G:p.Lys2Glu"
    );

    // 5' of the extra bases the distance to the start codon grows by three
    let anno = annotator.annotate_change("synth:111C>G").unwrap().all()[0].clone();
    assert_eq!(anno.coding_change(), Some("c.-43C>G"));
    assert_eq!(anno.most_severe_effect(), Some(VariantEffect::FivePrimeUtrExonVariant));
    let anno = annotator.annotate_change("synth:131C>G").unwrap().all()[0].clone();
    assert_eq!(anno.coding_change(), Some("c.-20C>G"));
}

#[test]
fn cdna_with_missing_bases() {
    common::init_logging();
    let dict = dict();
    // genomic bases at exonic offsets 60 and 61 are absent from the cDNA
    let mut sequence = coding_sequence();
    sequence.drain(60..62);
    let anchors = vec![
        Anchor::new(0, 0),
        Anchor::new(60, 60),
        Anchor::new(62, 60),
        Anchor::new(300, 298),
    ];
    let transcripts = vec![
        coding_tx(&dict, "NM_F", Strand::Forward),
        aligned_tx(&dict, "NM_GAP", sequence, anchors),
    ];
    let annotator = VariantAnnotator::from_transcripts(dict, transcripts, AnnotationOptions::default());

    // a change in the missing bases cannot be described on NM_GAP
    let annos = annotator.annotate_change("synth:161C>T").unwrap();
    assert_eq!(annos.len(), 1);
    assert_eq!(
        annos.all()[0].to_annotation_string(),
        "GENE:NM_F:exon1:c.11C>T:p.Ala4Val"
    );

    // elsewhere both transcripts are annotated
    let annos = annotator.annotate_change("synth:154A>G").unwrap();
    let mut coding: Vec<_> = annos
        .all()
        .iter()
        .map(|a| (a.transcript().unwrap().accession().to_owned(), a.coding_change().map(str::to_owned)))
        .collect();
    coding.sort();
    assert_eq!(
        coding,
        vec![
            ("NM_F".to_owned(), Some("c.4A>G".to_owned())),
            ("NM_GAP".to_owned(), Some("c.4A>G".to_owned())),
        ]
    );
}

#[test]
fn between_and_outside_genes() {
    let annotator = annotator(AnnotationOptions::default());

    // far from both synthetic transcripts: a single intergenic record
    let annos = annotator.annotate_change("synth:5000A>G").unwrap();
    assert_eq!(annos.len(), 1);
    assert_eq!(annos.highest_impact_effect(), Some(VariantEffect::IntergenicVariant));

    // contig without transcripts
    let annos = annotator.annotate_change("chrM:100A>G").unwrap();
    assert_eq!(annos.len(), 1);
    assert!(annos.all()[0].transcript().is_none());
    assert_eq!(annos.highest_impact_effect(), Some(VariantEffect::IntergenicVariant));
}

#[test]
fn per_variant_errors() {
    let annotator = annotator(AnnotationOptions::default());
    assert_eq!(
        annotator.annotate_change("chr99:10A>G").unwrap_err(),
        AnnotationError::UnknownContig("chr99".to_owned())
    );
    assert!(matches!(
        annotator.annotate_change("synth:10A>A"),
        Err(AnnotationError::Malformed(_))
    ));
    assert!(matches!(
        annotator.annotate_change("synth 10 A G"),
        Err(AnnotationError::Malformed(_))
    ));
    // later variants are unaffected
    assert!(annotator.annotate_change("synth:154A>G").is_ok());
}

#[test]
fn empty_interval_array() {
    let array: IntervalArray<(isize, isize)> = IntervalArray::new(Vec::new(), |&iv| iv);
    assert!(array.is_empty());
    let res = array.query_interval(10, 20);
    assert!(res.overlapping.is_empty());
    assert_eq!(res.left, None);
    assert_eq!(res.right, None);
}

#[test]
fn shared_between_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<VariantAnnotator>();

    let annotator = Arc::new(annotator(AnnotationOptions::default()));
    let handles: Vec<_> = ["synth:154A>G", "synth:162T>C", "chr1:6641050A>G"]
        .iter()
        .map(|&change| {
            let annotator = annotator.clone();
            thread::spawn(move || {
                annotator
                    .annotate_change(change)
                    .unwrap()
                    .highest_impact_effect()
            })
        })
        .collect();
    let results: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert_eq!(
        results,
        vec![
            Some(VariantEffect::MissenseVariant),
            Some(VariantEffect::SynonymousVariant),
            Some(VariantEffect::CodingSequenceVariant),
        ]
    );
}
