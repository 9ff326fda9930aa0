use thiserror::Error;

#[derive(Debug, Error)]
pub enum SearchError {
    /// A query vector was encoded against a different vocabulary than the
    /// corpus matrix.
    #[error("query has {found} dimensions but the corpus matrix has {expected}")]
    DimensionMismatch { expected: usize, found: usize },
}

pub type SearchResult<T> = std::result::Result<T, SearchError>;
