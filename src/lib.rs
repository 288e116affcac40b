// Copyright 2026 The bio-varanno developers.
// Licensed under the MIT license (http://opensource.org/licenses/MIT)
// This file may not be copied, modified, or distributed
// except according to those terms.

//! Transcript-based functional annotation of small genomic variants.
//!
//! A [`VariantAnnotator`](annotator/struct.VariantAnnotator.html) is built
//! from a [`ReferenceDictionary`](refdict/struct.ReferenceDictionary.html)
//! and a set of [`TranscriptModel`](transcript/struct.TranscriptModel.html)s.
//! For each [`GenomeVariant`](variant/struct.GenomeVariant.html) it finds
//! the affected transcripts, classifies the consequence on each of them as
//! a set of [`VariantEffect`](effect/enum.VariantEffect.html)s and renders
//! `c.`/`n.`/`p.` descriptions, most severe annotation first.

#[macro_use]
extern crate lazy_static;
#[macro_use]
extern crate derive_new;
#[macro_use]
extern crate log;

pub mod annotation;
pub mod annotator;
pub mod chromosome;
pub mod classify;
pub mod config;
pub mod coord;
pub mod effect;
pub mod error;
pub mod interval_array;
pub mod nomenclature;
pub mod projector;
pub mod refdict;
pub mod sequence;
pub mod strand;
pub mod transcript;
pub mod variant;

pub use crate::annotation::{Annotation, VariantAnnotations};
pub use crate::annotator::VariantAnnotator;
pub use crate::config::AnnotationOptions;
pub use crate::effect::VariantEffect;
pub use crate::error::AnnotationError;
pub use crate::variant::GenomeVariant;
