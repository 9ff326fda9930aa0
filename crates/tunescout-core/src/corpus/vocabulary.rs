use std::collections::HashMap;

use crate::model::TuneRecord;

/// The frozen set of tags observed in the corpus.
///
/// Terms are the distinct `type`, `mode` and `meter` values, in that column
/// order and then in order of first appearance. A value that occurs in more
/// than one column is a single term. Each term's position is its dimension in
/// encoded vectors.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Vocabulary {
    terms: Vec<String>,
    index: HashMap<String, usize>,
}

impl Vocabulary {
    /// Build the vocabulary from cleaned tune records.
    pub fn from_tunes(tunes: &[TuneRecord]) -> Self {
        let types = tunes.iter().map(TuneRecord::tune_type);
        let modes = tunes.iter().map(TuneRecord::mode);
        let meters = tunes.iter().map(TuneRecord::meter);
        Self::from_terms(types.chain(modes).chain(meters))
    }

    /// Build a vocabulary from arbitrary terms, dropping repeats.
    pub fn from_terms<'a>(terms: impl IntoIterator<Item = &'a str>) -> Self {
        let mut vocab = Self::default();
        for term in terms {
            if !vocab.index.contains_key(term) {
                vocab.index.insert(term.to_string(), vocab.terms.len());
                vocab.terms.push(term.to_string());
            }
        }
        vocab
    }

    pub fn len(&self) -> usize {
        self.terms.len()
    }

    pub fn is_empty(&self) -> bool {
        self.terms.is_empty()
    }

    pub fn contains(&self, term: &str) -> bool {
        self.index.contains_key(term)
    }

    /// Dimension assigned to `term`, if it is known.
    pub fn index_of(&self, term: &str) -> Option<usize> {
        self.index.get(term).copied()
    }

    pub fn term(&self, index: usize) -> Option<&str> {
        self.terms.get(index).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.terms.iter().map(String::as_str)
    }
}

/// Distinct values in order of first appearance.
pub(crate) fn distinct<'a>(values: impl IntoIterator<Item = &'a str>) -> Vec<String> {
    Vocabulary::from_terms(values).terms
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_terms_dedupes_in_order() {
        let vocab = Vocabulary::from_terms(["jig", "reel", "jig", "major"]);
        assert_eq!(vocab.iter().collect::<Vec<_>>(), vec!["jig", "reel", "major"]);
        assert_eq!(vocab.index_of("major"), Some(2));
        assert_eq!(vocab.term(1), Some("reel"));
    }

    #[test]
    fn test_unknown_term() {
        let vocab = Vocabulary::from_terms(["jig"]);
        assert!(!vocab.contains("polka"));
        assert_eq!(vocab.index_of("polka"), None);
        assert_eq!(vocab.term(5), None);
    }

    #[test]
    fn test_empty() {
        let vocab = Vocabulary::default();
        assert!(vocab.is_empty());
        assert_eq!(vocab.len(), 0);
    }

    #[test]
    fn test_distinct() {
        assert_eq!(distinct(["b", "a", "b"]), vec!["b".to_string(), "a".to_string()]);
    }
}
