// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Options controlling how variants are annotated and rendered.
//!
//! ```
//! use bio_varanno::config::{AminoAcidCode, AnnotationOptions, AnnotationSelection};
//! let opts = AnnotationOptions::default()
//!     .with_amino_acid_code(AminoAcidCode::OneLetter)
//!     .with_selection(AnnotationSelection::BestOnly);
//! assert_eq!(opts.flank_len, 1000);
//! assert!(opts.shift_3prime);
//! ```

use strum_macros::{AsRefStr, Display};

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default size of the upstream and downstream windows around a transcript.
pub const DEFAULT_FLANK_LEN: isize = 1000;

/// Amino acid naming in protein-level nomenclature.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum AminoAcidCode {
    /// `p.W24C`
    OneLetter,
    /// `p.Trp24Cys`
    #[default]
    ThreeLetter,
}

/// Which annotations of a variant a caller is interested in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, AsRefStr, Display)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
#[cfg_attr(feature = "clap", derive(clap::ValueEnum))]
pub enum AnnotationSelection {
    /// Only the highest-impact annotation.
    BestOnly,
    #[default]
    All,
}

#[derive(Debug, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct AnnotationOptions {
    pub amino_acid_code: AminoAcidCode,
    pub selection: AnnotationSelection,
    /// Shift exonic insertions and deletions to their most 3' position
    /// within the exon before describing them.
    pub shift_3prime: bool,
    /// Distance up to which a variant outside a transcript is reported as
    /// upstream or downstream of it.
    pub flank_len: isize,
}

impl Default for AnnotationOptions {
    fn default() -> Self {
        AnnotationOptions {
            amino_acid_code: AminoAcidCode::default(),
            selection: AnnotationSelection::default(),
            shift_3prime: true,
            flank_len: DEFAULT_FLANK_LEN,
        }
    }
}

impl AnnotationOptions {
    pub fn with_amino_acid_code(mut self, code: AminoAcidCode) -> Self {
        self.amino_acid_code = code;
        self
    }

    pub fn with_selection(mut self, selection: AnnotationSelection) -> Self {
        self.selection = selection;
        self
    }

    pub fn with_shift_3prime(mut self, shift: bool) -> Self {
        self.shift_3prime = shift;
        self
    }

    pub fn with_flank_len(mut self, flank_len: isize) -> Self {
        self.flank_len = flank_len;
        self
    }
}
