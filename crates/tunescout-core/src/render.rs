//! Text rendering of tunes for downstream prompts.

use crate::model::TuneRecord;

/// One-sentence description of a tune's attributes.
pub fn describe_tune(tune: &TuneRecord) -> String {
    format!(
        "This tune is a {} in {} and {}.",
        tune.tune_type(),
        tune.key_mode(),
        tune.meter()
    )
}

/// The tune as an ABC header block: title, meter, key+mode, then the body.
///
/// Always ends with a newline.
pub fn notation_header(tune: &TuneRecord) -> String {
    format!(
        "T:{}\nM:{}\nK:{}\n{}\n",
        tune.name(),
        tune.meter(),
        tune.key_mode(),
        tune.abc()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::TuneId;

    fn kesh() -> TuneRecord {
        TuneRecord::from_raw(TuneId::new("55"), "Kesh, The", "jig", "Gmajor", "6/8", "GAG GAB|")
            .unwrap()
    }

    #[test]
    fn test_describe_tune() {
        assert_eq!(describe_tune(&kesh()), "This tune is a jig in Gmajor and 6/8.");
    }

    #[test]
    fn test_notation_header_line_order() {
        let block = notation_header(&kesh());
        let lines: Vec<&str> = block.lines().collect();
        assert_eq!(lines, vec!["T:The Kesh", "M:6/8", "K:Gmajor", "GAG GAB|"]);
        assert!(block.ends_with('\n'));
    }
}
