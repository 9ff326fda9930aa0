//! Natural-language tune retrieval for tunescout.
//!
//! Turns a free-text request into attribute filters through a
//! [`QueryTranslator`], ranks the pre-encoded corpus for each filter, and
//! renders the selected tunes as reference material for a downstream
//! music-dialogue prompt.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod config;
pub mod error;
pub mod service;
pub mod translate;

pub use config::Config;
pub use error::{RetrievalError, RetrievalResult, TranslateError, TranslateResult};
pub use service::{render_references, FilterRanking, RankedResult, RetrievalService};
pub use translate::{
    parse_translation, NullTranslator, OpenAiTranslator, QueryTranslator, Translation,
};
