//! The normalized, read-only tune corpus.
//!
//! Loading parses the source, removes duplicates, splits the raw mode field
//! into key and mode, normalizes names, and freezes the tag vocabulary.
//! Nothing mutates the corpus after [`TuneCorpus::load`] returns.

pub mod dedup;
pub mod description;
pub mod source;
pub mod vocabulary;

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::{CorpusError, Result};
use crate::model::TuneRecord;

pub use description::CorpusDescription;
pub use source::RawTune;
pub use vocabulary::Vocabulary;

/// What to do with a row whose raw mode field is empty.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModePolicy {
    /// Abort the load with [`CorpusError::MalformedMode`].
    #[default]
    Fail,
    /// Drop the row and log a warning.
    Skip,
}

#[derive(Debug, Clone)]
pub struct TuneCorpus {
    tunes: Vec<TuneRecord>,
    vocabulary: Vocabulary,
}

impl TuneCorpus {
    /// Load a corpus from a JSON file.
    ///
    /// # Errors
    ///
    /// Returns [`CorpusError::Io`] if the file cannot be read,
    /// [`CorpusError::Parse`] if it lacks the required columns, and
    /// [`CorpusError::MalformedMode`] under [`ModePolicy::Fail`].
    pub fn load(path: &Path, policy: ModePolicy) -> Result<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CorpusError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let corpus = Self::from_json_str(&content, policy)?;
        log::info!("Loaded {} tunes from {}", corpus.len(), path.display());
        Ok(corpus)
    }

    /// Parse a corpus from JSON text.
    pub fn from_json_str(json: &str, policy: ModePolicy) -> Result<Self> {
        let rows = source::parse_rows(json)?;
        Self::from_rows(rows, policy)
    }

    /// Build a corpus from already-parsed rows.
    pub fn from_rows(rows: Vec<RawTune>, policy: ModePolicy) -> Result<Self> {
        let raw_count = rows.len();
        let unique = dedup::dedupe(rows.into_iter().enumerate().collect());
        log::debug!(
            "De-duplication kept {} of {} rows",
            unique.len(),
            raw_count
        );

        let mut tunes = Vec::with_capacity(unique.len());
        for (row, raw) in unique {
            let record = TuneRecord::from_raw(
                raw.tune_id,
                &raw.name,
                raw.tune_type,
                &raw.mode,
                raw.meter,
                raw.abc,
            );
            match (record, policy) {
                (Some(tune), _) => tunes.push(tune),
                (None, ModePolicy::Fail) => {
                    return Err(CorpusError::MalformedMode {
                        row,
                        name: raw.name,
                    });
                }
                (None, ModePolicy::Skip) => {
                    log::warn!("Skipping row {} ({:?}): empty mode field", row, raw.name);
                }
            }
        }

        if tunes.is_empty() {
            log::warn!("Corpus is empty; every query will return no tunes");
        }

        let vocabulary = Vocabulary::from_tunes(&tunes);
        log::info!(
            "Corpus ready: {} tunes, {} vocabulary terms",
            tunes.len(),
            vocabulary.len()
        );
        Ok(Self { tunes, vocabulary })
    }

    pub fn len(&self) -> usize {
        self.tunes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tunes.is_empty()
    }

    pub fn get(&self, index: usize) -> Option<&TuneRecord> {
        self.tunes.get(index)
    }

    /// Tunes in stable insertion order.
    pub fn iter(&self) -> impl Iterator<Item = &TuneRecord> {
        self.tunes.iter()
    }

    pub fn tunes(&self) -> &[TuneRecord] {
        &self.tunes
    }

    pub fn vocabulary(&self) -> &Vocabulary {
        &self.vocabulary
    }

    pub fn distinct_types(&self) -> Vec<String> {
        vocabulary::distinct(self.tunes.iter().map(TuneRecord::tune_type))
    }

    pub fn distinct_keys(&self) -> Vec<String> {
        vocabulary::distinct(self.tunes.iter().map(TuneRecord::key))
    }

    pub fn distinct_modes(&self) -> Vec<String> {
        vocabulary::distinct(self.tunes.iter().map(TuneRecord::mode))
    }

    pub fn distinct_meters(&self) -> Vec<String> {
        vocabulary::distinct(self.tunes.iter().map(TuneRecord::meter))
    }

    pub fn describe(&self) -> CorpusDescription {
        CorpusDescription {
            tune_count: self.len(),
            types: self.distinct_types(),
            keys: self.distinct_keys(),
            modes: self.distinct_modes(),
            meters: self.distinct_meters(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const SAMPLE: &str = r#"[
        {"tune_id": "1", "name": "Kesh, The", "type": "jig", "mode": "Gmajor", "meter": "6/8", "abc": "GAG GAB"},
        {"tune_id": "2", "name": "Drowsy Maggie", "type": "reel", "mode": "Edorian", "meter": "4/4", "abc": "E2BE dEBE"},
        {"tune_id": "2", "name": "Drowsy Maggie (2)", "type": "reel", "mode": "Edorian", "meter": "4/4", "abc": "E2BE dEBE|"},
        {"tune_id": "3", "name": "Rights Of Man, The", "type": "hornpipe", "mode": "Eminor", "meter": "4/4", "abc": "GA|B2A2"}
    ]"#;

    fn create_temp_json(content: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(content.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_load_from_file() {
        let file = create_temp_json(SAMPLE);
        let corpus = TuneCorpus::load(file.path(), ModePolicy::Fail).unwrap();
        assert_eq!(corpus.len(), 3);
        let names: Vec<&str> = corpus.iter().map(TuneRecord::name).collect();
        assert_eq!(names, vec!["The Kesh", "Drowsy Maggie", "The Rights Of Man"]);
    }

    #[test]
    fn test_load_missing_file() {
        let result = TuneCorpus::load(Path::new("/nonexistent/tunes.json"), ModePolicy::Fail);
        assert!(matches!(result, Err(CorpusError::Io { .. })));
    }

    #[test]
    fn test_load_invalid_json() {
        let file = create_temp_json("not json");
        let result = TuneCorpus::load(file.path(), ModePolicy::Fail);
        assert!(matches!(result, Err(CorpusError::Parse(_))));
    }

    #[test]
    fn test_key_and_mode_split() {
        let corpus = TuneCorpus::from_json_str(SAMPLE, ModePolicy::Fail).unwrap();
        let kesh = corpus.get(0).unwrap();
        assert_eq!(kesh.key(), "G");
        assert_eq!(kesh.mode(), "major");
    }

    #[test]
    fn test_vocabulary_from_type_mode_meter() {
        let corpus = TuneCorpus::from_json_str(SAMPLE, ModePolicy::Fail).unwrap();
        let terms: Vec<&str> = corpus.vocabulary().iter().collect();
        assert_eq!(
            terms,
            vec!["jig", "reel", "hornpipe", "major", "dorian", "minor", "6/8", "4/4"]
        );
        // Keys are not tags.
        assert!(!corpus.vocabulary().contains("G"));
    }

    #[test]
    fn test_describe() {
        let corpus = TuneCorpus::from_json_str(SAMPLE, ModePolicy::Fail).unwrap();
        let description = corpus.describe();
        assert_eq!(description.tune_count, 3);
        assert_eq!(description.keys, vec!["G", "E"]);
        assert_eq!(description.meters, vec!["6/8", "4/4"]);
    }

    #[test]
    fn test_empty_mode_fails_load() {
        let json = r#"[
            {"tune_id": 1, "name": "Good", "type": "jig", "mode": "Dmajor", "meter": "6/8", "abc": "A"},
            {"tune_id": 2, "name": "Bad", "type": "jig", "mode": "", "meter": "6/8", "abc": "B"}
        ]"#;
        let err = TuneCorpus::from_json_str(json, ModePolicy::Fail).unwrap_err();
        match err {
            CorpusError::MalformedMode { row, name } => {
                assert_eq!(row, 1);
                assert_eq!(name, "Bad");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_empty_mode_skipped() {
        let json = r#"[
            {"tune_id": 1, "name": "Good", "type": "jig", "mode": "Dmajor", "meter": "6/8", "abc": "A"},
            {"tune_id": 2, "name": "Bad", "type": "slide", "mode": "", "meter": "12/8", "abc": "B"}
        ]"#;
        let corpus = TuneCorpus::from_json_str(json, ModePolicy::Skip).unwrap();
        assert_eq!(corpus.len(), 1);
        assert!(!corpus.vocabulary().contains("slide"));
    }

    #[test]
    fn test_empty_corpus() {
        let corpus = TuneCorpus::from_json_str("[]", ModePolicy::Fail).unwrap();
        assert!(corpus.is_empty());
        assert!(corpus.vocabulary().is_empty());
    }

    #[test]
    fn test_mode_policy_deserialize() {
        let policy: ModePolicy = serde_json::from_str(r#""skip""#).unwrap();
        assert_eq!(policy, ModePolicy::Skip);
        assert_eq!(ModePolicy::default(), ModePolicy::Fail);
    }
}
