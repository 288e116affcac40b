// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Strand information for coordinates and transcripts.
//!
//! Every coordinate in this crate lives on a definite strand. Transcript
//! models keep all of their intervals on the transcript's own strand, so
//! that "5' to 3'" is always "ascending offset".

use std::fmt::{self, Display, Formatter};
use std::ops::Neg;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Strand of a coordinate, interval or transcript.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Strand {
    Forward,
    Reverse,
}

impl Strand {
    /// Returns a `Strand` for the given char.
    ///
    /// The mapping is as follows:
    ///     * '+', 'f', or 'F' becomes `Strand::Forward`
    ///     * '-', 'r', or 'R' becomes `Strand::Reverse`
    ///     * Any other inputs will return an `Err(StrandError::InvalidChar)`
    ///
    /// Unknown strands ('.', '?') are rejected: nothing in the annotation
    /// engine can work without knowing which way a transcript is read.
    pub fn from_char(strand_char: &char) -> Result<Strand, StrandError> {
        match *strand_char {
            '+' | 'f' | 'F' => Ok(Strand::Forward),
            '-' | 'r' | 'R' => Ok(Strand::Reverse),
            invalid => Err(StrandError::InvalidChar(invalid)),
        }
    }

    /// Opposite strand.
    pub fn reverse(self) -> Self {
        match self {
            Strand::Forward => Strand::Reverse,
            Strand::Reverse => Strand::Forward,
        }
    }

    /// Symbol denoting the strand, `+` or `-` as in BED and GFF files.
    pub fn symbol(self) -> &'static str {
        match self {
            Strand::Forward => "+",
            Strand::Reverse => "-",
        }
    }

    /// Strand obtained by reading `other` relative to `self`: a reverse
    /// strand flips, a forward strand keeps.
    pub fn product(self, other: Strand) -> Strand {
        match self {
            Strand::Forward => other,
            Strand::Reverse => other.reverse(),
        }
    }

    /// Parse a strand designator from the end of a location display
    /// string, e.g. `chr1:100-200(+)`. Returns the rest of the string and
    /// the strand; a missing designator means forward.
    pub(crate) fn break_pos_strand(posstr: &str) -> (&str, Self) {
        if let Some(pos) = posstr.strip_suffix("(+)") {
            (pos, Strand::Forward)
        } else if let Some(pos) = posstr.strip_suffix("(-)") {
            (pos, Strand::Reverse)
        } else {
            (posstr, Strand::Forward)
        }
    }
}

impl Default for Strand {
    fn default() -> Self {
        Strand::Forward
    }
}

impl Neg for Strand {
    type Output = Strand;

    fn neg(self) -> Strand {
        self.reverse()
    }
}

impl Display for Strand {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        write!(f, "({})", self.symbol())
    }
}

impl FromStr for Strand {
    type Err = StrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "+" | "(+)" => Ok(Strand::Forward),
            "-" | "(-)" => Ok(Strand::Reverse),
            _ => {
                let c = s.chars().next().unwrap_or(' ');
                Strand::from_char(&c)
            }
        }
    }
}

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StrandError {
    #[error("character {0:?} can not be converted to a Strand")]
    InvalidChar(char),
}
