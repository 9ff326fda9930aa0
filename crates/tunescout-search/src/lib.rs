//! Tag search for tunescout.
//!
//! Encodes tunes and filters as multi-hot vectors over the corpus vocabulary
//! and ranks the pre-encoded corpus by Jaccard similarity.

#![deny(unsafe_code)]
#![warn(missing_debug_implementations)]

pub mod encoder;
pub mod error;
pub mod ranker;

pub use encoder::{AttributeEncoder, EncodedMatrix, EncodedVector, Encoding};
pub use error::{SearchError, SearchResult};
pub use ranker::{jaccard, score, top_k, Ranked, SimilarityRanker, DEFAULT_TOP_K};
