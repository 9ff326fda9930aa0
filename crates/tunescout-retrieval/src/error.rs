//! Error types for query translation and retrieval.

use thiserror::Error;
use tunescout_core::CorpusError;
use tunescout_search::SearchError;

/// Failures of the natural-language translation step.
///
/// [`RetrievalService`](crate::RetrievalService) recovers every one of these
/// into "no references"; they never reach its caller.
#[derive(Debug, Error)]
pub enum TranslateError {
    /// No credential was configured for the translator.
    #[error("no API key configured for {source_name}")]
    MissingApiKey { source_name: String },

    /// The translator's server failed (5xx).
    #[error("HTTP error from {source_name}: {message}")]
    Http {
        source_name: String,
        message: String,
    },

    /// The translator rejected the request (4xx other than 429).
    #[error("request rejected by {source_name} ({status}): {message}")]
    Rejected {
        source_name: String,
        status: u16,
        message: String,
    },

    /// The translator returned a rate-limit response.
    #[error("rate limited by {source_name}")]
    RateLimited { source_name: String },

    /// An error propagated from `reqwest`.
    #[error("request error: {0}")]
    Request(#[from] reqwest::Error),

    /// The response envelope could not be decoded.
    #[error("parse error from {source_name}: {message}")]
    Parse {
        source_name: String,
        message: String,
    },

    /// The response carried no completion text.
    #[error("empty response from {source_name}")]
    EmptyResponse { source_name: String },

    /// The completion text was neither a filter list nor "Not applicable".
    #[error("unparsable translation {content:?}: {message}")]
    Unparsable { content: String, message: String },
}

impl TranslateError {
    /// Returns `true` when the error is transient and the request may
    /// succeed if retried.
    pub fn is_transient(&self) -> bool {
        match self {
            Self::Http { .. } | Self::RateLimited { .. } => true,
            Self::Request(e) => e.is_timeout() || e.is_connect(),
            _ => false,
        }
    }
}

pub type TranslateResult<T> = std::result::Result<T, TranslateError>;

/// Failures that [`RetrievalService`](crate::RetrievalService) propagates.
#[derive(Debug, Error)]
pub enum RetrievalError {
    #[error("corpus error: {0}")]
    Corpus(#[from] CorpusError),

    #[error("search error: {0}")]
    Search(#[from] SearchError),

    /// The ranker selected a row the corpus does not have.
    #[error("ranked row {index} is outside the corpus of {len} tunes")]
    RowOutOfRange { index: usize, len: usize },

    #[error("invalid configuration: {0}")]
    Config(String),
}

pub type RetrievalResult<T> = std::result::Result<T, RetrievalError>;
