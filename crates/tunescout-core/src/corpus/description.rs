use serde::Serialize;
use std::fmt;

/// Summary of the corpus handed to the query translator so it can phrase
/// filters in the corpus's own vocabulary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CorpusDescription {
    pub tune_count: usize,
    pub types: Vec<String>,
    pub keys: Vec<String>,
    pub modes: Vec<String>,
    pub meters: Vec<String>,
}

impl fmt::Display for CorpusDescription {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(
            f,
            "The database contains {} tunes with attributes type, mode, and meter.",
            self.tune_count
        )?;
        writeln!(f, "The tune types are {}.", quoted_list(&self.types))?;
        writeln!(f, "The modes are {}.", quoted_list(&self.modes))?;
        write!(f, "The meters are {}.", quoted_list(&self.meters))
    }
}

fn quoted_list(values: &[String]) -> String {
    let quoted: Vec<String> = values.iter().map(|v| format!("'{v}'")).collect();
    format!("[{}]", quoted.join(", "))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display() {
        let description = CorpusDescription {
            tune_count: 2,
            types: vec!["jig".to_string(), "reel".to_string()],
            keys: vec!["D".to_string()],
            modes: vec!["major".to_string()],
            meters: vec!["6/8".to_string(), "4/4".to_string()],
        };
        let text = description.to_string();
        assert!(text.starts_with("The database contains 2 tunes"));
        assert!(text.contains("The tune types are ['jig', 'reel']."));
        assert!(text.contains("The modes are ['major']."));
        assert!(text.ends_with("The meters are ['6/8', '4/4']."));
    }
}
