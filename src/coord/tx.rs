// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Positions relative to a transcript: in the recorded transcript
//! sequence (`n.`), in the coding sequence (`c.`), and in the protein
//! (`p.`). All offsets are 0-based; `Display` prints the 1-based
//! nomenclature number.

use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

/// Offset into the transcript (cDNA) sequence.
#[derive(new, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TranscriptPosition {
    accession: Arc<str>,
    pos: isize,
}

impl TranscriptPosition {
    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn pos(&self) -> isize {
        self.pos
    }

    pub fn shifted(&self, delta: isize) -> Self {
        TranscriptPosition::new(self.accession.clone(), self.pos + delta)
    }
}

impl Display for TranscriptPosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:n.{}", self.accession, self.pos + 1)
    }
}

/// Half-open range of transcript offsets.
#[derive(new, Debug, Clone, PartialEq, Eq, Hash)]
pub struct TranscriptInterval {
    accession: Arc<str>,
    begin: isize,
    end: isize,
}

impl TranscriptInterval {
    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn begin(&self) -> isize {
        self.begin
    }

    pub fn end(&self) -> isize {
        self.end
    }

    pub fn length(&self) -> isize {
        self.end - self.begin
    }
}

/// Offset into the coding sequence; 0 is the A of the start codon.
///
/// Offsets in the 5' UTR are negative, offsets past the stop codon are
/// greater than or equal to the CDS length.
#[derive(new, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CdsPosition {
    accession: Arc<str>,
    pos: isize,
}

impl CdsPosition {
    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn pos(&self) -> isize {
        self.pos
    }

    /// Codon index and phase (0, 1 or 2) of this base.
    pub fn codon_and_frame(&self) -> (isize, isize) {
        (self.pos.div_euclid(3), self.pos.rem_euclid(3))
    }
}

impl Display for CdsPosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:c.{}", self.accession, self.pos + 1)
    }
}

/// Half-open range of CDS offsets.
#[derive(new, Debug, Clone, PartialEq, Eq, Hash)]
pub struct CdsInterval {
    accession: Arc<str>,
    begin: isize,
    end: isize,
}

impl CdsInterval {
    pub fn accession(&self) -> &str {
        &self.accession
    }

    pub fn begin(&self) -> isize {
        self.begin
    }

    pub fn end(&self) -> isize {
        self.end
    }
}

/// Amino acid offset in the protein, with the phase inside the codon.
#[derive(new, Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProteinPosition {
    accession: Arc<str>,
    pos: isize,
    frame: isize,
}

impl ProteinPosition {
    pub fn accession(&self) -> &str {
        &self.accession
    }

    /// 0-based amino acid index.
    pub fn pos(&self) -> isize {
        self.pos
    }

    /// Position of the base inside its codon (0, 1 or 2).
    pub fn frame(&self) -> isize {
        self.frame
    }
}

impl Display for ProteinPosition {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "{}:p.{}", self.accession, self.pos + 1)
    }
}
