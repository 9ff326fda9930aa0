//! Core domain model for tunescout.
//!
//! This crate defines the tune record, the attribute filters produced from
//! natural-language requests, the normalized in-memory corpus with its frozen
//! tag vocabulary, and the text rendering of tunes for downstream prompts.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod corpus;
pub mod error;
pub mod model;
pub mod render;

pub use corpus::{CorpusDescription, ModePolicy, TuneCorpus, Vocabulary};
pub use error::{CorpusError, Result};
pub use model::{AttributeFilter, TuneId, TuneRecord};
