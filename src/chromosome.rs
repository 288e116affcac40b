// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Per-contig transcript index.

use std::collections::BTreeMap;
use std::sync::Arc;

use crate::interval_array::{IntervalArray, QueryResult};
use crate::strand::Strand;
use crate::transcript::TranscriptModel;

/// All transcripts of one contig, indexed by their forward-strand span.
#[derive(Debug, Clone)]
pub struct Chromosome {
    id: u32,
    transcripts: IntervalArray<Arc<TranscriptModel>>,
}

impl Chromosome {
    pub fn new(id: u32, transcripts: Vec<Arc<TranscriptModel>>) -> Self {
        Chromosome {
            id,
            transcripts: IntervalArray::new(transcripts, forward_span),
        }
    }

    pub fn id(&self) -> u32 {
        self.id
    }

    pub fn transcripts(&self) -> &IntervalArray<Arc<TranscriptModel>> {
        &self.transcripts
    }

    pub fn transcript_count(&self) -> usize {
        self.transcripts.len()
    }

    /// Transcripts overlapping the forward-strand range `[begin, end)`,
    /// plus the nearest transcript on each side.
    pub fn query(&self, begin: isize, end: isize) -> QueryResult<'_, Arc<TranscriptModel>> {
        self.transcripts.query_interval(begin, end)
    }
}

fn forward_span(tx: &Arc<TranscriptModel>) -> (isize, isize) {
    let region = tx.tx_region().with_strand(Strand::Forward);
    (region.begin(), region.end())
}

/// Group transcripts by contig and index each group.
pub fn build_chromosome_map<I>(transcripts: I) -> BTreeMap<u32, Chromosome>
where
    I: IntoIterator<Item = Arc<TranscriptModel>>,
{
    let mut by_contig: BTreeMap<u32, Vec<Arc<TranscriptModel>>> = BTreeMap::new();
    for tx in transcripts {
        by_contig.entry(tx.chr()).or_default().push(tx);
    }
    by_contig
        .into_iter()
        .map(|(id, txs)| {
            debug!("indexed {} transcripts on contig {}", txs.len(), id);
            (id, Chromosome::new(id, txs))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::coord::interval::GenomeInterval;
    use crate::refdict::ReferenceDictionaryBuilder;
    use crate::transcript::TranscriptParts;

    #[test]
    fn transcripts_are_grouped_by_contig() {
        let mut builder = ReferenceDictionaryBuilder::new();
        let chr1 = builder.add_contig("chr1", 10_000);
        let chr2 = builder.add_contig("chr2", 10_000);
        let dict = builder.build();
        let tx = |acc: &str, chr: u32, strand: Strand, b: isize, e: isize| {
            let exon = GenomeInterval::new(dict.clone(), Strand::Forward, chr, b, e).unwrap();
            Arc::new(
                TranscriptModel::build(TranscriptParts::new(
                    acc.to_owned(),
                    "G".to_owned(),
                    strand,
                    None,
                    vec![exon],
                ))
                .unwrap(),
            )
        };
        let map = build_chromosome_map(vec![
            tx("a", chr1, Strand::Forward, 100, 200),
            tx("b", chr2, Strand::Forward, 100, 200),
            tx("c", chr1, Strand::Reverse, 500, 900),
        ]);
        assert_eq!(map.len(), 2);
        let c1 = &map[&chr1];
        assert_eq!(c1.transcript_count(), 2);
        let res = c1.query(600, 601);
        assert_eq!(res.overlapping.len(), 1);
        assert_eq!(res.overlapping[0].accession(), "c");
        assert_eq!(res.left.map(|t| t.accession()), Some("a"));
        assert!(res.right.is_none());
    }
}
