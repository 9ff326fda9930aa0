use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum CorpusError {
    #[error("failed to read corpus {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The source is not a JSON array of tune records carrying the required
    /// columns (`name`, `type`, `mode`, `meter`, `abc`, `tune_id`).
    #[error("failed to parse corpus: {0}")]
    Parse(#[from] serde_json::Error),

    #[error("malformed mode in row {row} ({name:?}): raw mode field is empty")]
    MalformedMode { row: usize, name: String },
}

pub type Result<T> = std::result::Result<T, CorpusError>;
