//! Raw tune rows as they appear in the corpus source.

use serde::Deserialize;

use crate::model::TuneId;

/// One row of a TheSession-style `tunes.json` dump.
///
/// Only the columns the corpus needs are declared; extra keys such as
/// `setting_id`, `date` and `username` are ignored. A missing column fails
/// deserialization of the whole source.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct RawTune {
    pub tune_id: TuneId,
    pub name: String,
    #[serde(rename = "type")]
    pub tune_type: String,
    /// Key and mode in one field, e.g. "Dmajor".
    pub mode: String,
    pub meter: String,
    pub abc: String,
}

/// Parse a JSON array of raw tune rows.
pub fn parse_rows(json: &str) -> serde_json::Result<Vec<RawTune>> {
    serde_json::from_str(json)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_session_row() {
        let json = r#"[{
            "tune_id": "1",
            "setting_id": "1",
            "name": "Cooley's, The",
            "type": "reel",
            "meter": "4/4",
            "mode": "Edorian",
            "abc": "|:D2|EBBA B2EB|",
            "date": "2001-05-14 21:58:10",
            "username": "Jeremy"
        }]"#;
        let rows = parse_rows(json).unwrap();
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].tune_id, TuneId::new("1"));
        assert_eq!(rows[0].tune_type, "reel");
        assert_eq!(rows[0].mode, "Edorian");
    }

    #[test]
    fn test_parse_missing_column() {
        let json = r#"[{"tune_id": 1, "name": "x", "type": "jig", "mode": "Dmajor", "abc": "A"}]"#;
        let err = parse_rows(json).unwrap_err();
        assert!(err.to_string().contains("meter"));
    }

    #[test]
    fn test_parse_not_an_array() {
        assert!(parse_rows(r#"{"tunes": []}"#).is_err());
    }
}
