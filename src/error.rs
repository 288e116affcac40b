// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Errors reported for a single variant by the annotator.
//!
//! Errors of the individual layers are re-exported here for convenience.

use thiserror::Error;

pub use crate::coord::{CoordError, ParseError};
pub use crate::projector::ProjectionError;
pub use crate::transcript::alignment::AlignmentError;
pub use crate::transcript::TranscriptError;

/// Failure to annotate one variant; other variants are unaffected.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum AnnotationError {
    /// The change description could not be parsed or has invalid alleles.
    #[error("malformed variant: {0}")]
    Malformed(ParseError),
    #[error("contig {0:?} is not part of the reference dictionary")]
    UnknownContig(String),
    /// The variant was built against another reference dictionary.
    #[error(transparent)]
    Coord(#[from] CoordError),
}

impl From<ParseError> for AnnotationError {
    fn from(err: ParseError) -> Self {
        match err {
            ParseError::Coord(CoordError::UnknownContig(name)) => AnnotationError::UnknownContig(name),
            err => AnnotationError::Malformed(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_contig_is_lifted() {
        let err = ParseError::Coord(CoordError::UnknownContig("chrZ".to_owned()));
        assert_eq!(
            AnnotationError::from(err),
            AnnotationError::UnknownContig("chrZ".to_owned())
        );
        let err = ParseError::BadFormat("x".to_owned());
        assert!(matches!(AnnotationError::from(err), AnnotationError::Malformed(_)));
    }
}
