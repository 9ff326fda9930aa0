use serde::Serialize;

use crate::model::ids::TuneId;

/// Suffix some tune databases use to sort titles ("Cooley's, The").
const TRAILING_ARTICLE: &str = ", The";

/// A single tune in the corpus.
///
/// `key` and `mode` are always derived together from the raw mode field
/// ("Dmajor" → "D" + "major"), so they have no independent setters. All
/// attribute fields are opaque categorical strings compared by exact
/// equality.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TuneRecord {
    id: TuneId,
    name: String,
    #[serde(rename = "type")]
    tune_type: String,
    key: String,
    mode: String,
    meter: String,
    abc: String,
}

impl TuneRecord {
    /// Build a record from raw source fields.
    ///
    /// Returns `None` when `raw_mode` is empty and therefore cannot be split
    /// into a key and a mode. The name is normalized with
    /// [`normalize_name`].
    #[must_use]
    pub fn from_raw(
        id: TuneId,
        name: &str,
        tune_type: impl Into<String>,
        raw_mode: &str,
        meter: impl Into<String>,
        abc: impl Into<String>,
    ) -> Option<Self> {
        let (key, mode) = split_mode(raw_mode)?;
        Some(Self {
            id,
            name: normalize_name(name),
            tune_type: tune_type.into(),
            key: key.to_string(),
            mode: mode.to_string(),
            meter: meter.into(),
            abc: abc.into(),
        })
    }

    pub fn id(&self) -> &TuneId {
        &self.id
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Tune genre (jig, reel, hornpipe, ...).
    pub fn tune_type(&self) -> &str {
        &self.tune_type
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn mode(&self) -> &str {
        &self.mode
    }

    pub fn meter(&self) -> &str {
        &self.meter
    }

    /// The ABC notation body.
    pub fn abc(&self) -> &str {
        &self.abc
    }

    /// Key and mode joined as in an ABC `K:` field ("Dmajor").
    pub fn key_mode(&self) -> String {
        format!("{}{}", self.key, self.mode)
    }

    /// The categorical tags this tune contributes to similarity ranking.
    pub fn tags(&self) -> [&str; 3] {
        [&self.tune_type, &self.mode, &self.meter]
    }
}

/// Split a raw mode field into key (first character) and mode (the rest).
///
/// Splits on the first Unicode scalar so that a non-ASCII key never lands
/// inside a code point.
#[must_use]
pub fn split_mode(raw_mode: &str) -> Option<(&str, &str)> {
    let first = raw_mode.chars().next()?;
    Some(raw_mode.split_at(first.len_utf8()))
}

/// Move a trailing ", The" to the front of a tune name.
#[must_use]
pub fn normalize_name(name: &str) -> String {
    match name.strip_suffix(TRAILING_ARTICLE) {
        Some(stem) => format!("The {stem}"),
        None => name.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tune(raw_mode: &str) -> Option<TuneRecord> {
        TuneRecord::from_raw(TuneId::new("1"), "Cooley's, The", "reel", raw_mode, "4/4", "|:EBBA B2EB|")
    }

    #[test]
    fn test_split_mode_major() {
        assert_eq!(split_mode("Dmajor"), Some(("D", "major")));
    }

    #[test]
    fn test_split_mode_single_char() {
        assert_eq!(split_mode("G"), Some(("G", "")));
    }

    #[test]
    fn test_split_mode_empty() {
        assert_eq!(split_mode(""), None);
    }

    #[test]
    fn test_split_mode_non_ascii_key() {
        assert_eq!(split_mode("Édorian"), Some(("É", "dorian")));
    }

    #[test]
    fn test_normalize_name_trailing_the() {
        assert_eq!(normalize_name("Cooley's, The"), "The Cooley's");
    }

    #[test]
    fn test_normalize_name_unchanged() {
        assert_eq!(normalize_name("Drowsy Maggie"), "Drowsy Maggie");
        assert_eq!(normalize_name("The Kesh"), "The Kesh");
    }

    #[test]
    fn test_from_raw_derives_key_and_mode() {
        let tune = tune("Eminor").unwrap();
        assert_eq!(tune.key(), "E");
        assert_eq!(tune.mode(), "minor");
        assert_eq!(tune.key_mode(), "Eminor");
        assert_eq!(tune.name(), "The Cooley's");
        assert_eq!(tune.tags(), ["reel", "minor", "4/4"]);
    }

    #[test]
    fn test_from_raw_rejects_empty_mode() {
        assert!(tune("").is_none());
    }
}
