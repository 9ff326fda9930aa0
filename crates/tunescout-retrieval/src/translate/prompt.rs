//! Chat prompt for query translation.

use serde::Serialize;
use tunescout_core::CorpusDescription;

use super::NOT_APPLICABLE;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    System,
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ChatMessage {
    pub role: Role,
    pub content: String,
}

impl ChatMessage {
    fn new(role: Role, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }
}

/// Worked examples shown before the real request: two that map to filters
/// and one that does not.
const EXAMPLES: &[(&str, &str)] = &[
    (
        "I want to rewrite this as a jig or a reel in 4/4 and Dminor.",
        r#"[{"type": "jig", "meter": "4/4", "mode": "minor"}]"#,
    ),
    ("Give me a slow hornpipe.", r#"[{"type": "hornpipe"}]"#),
    ("Make the song faster.", NOT_APPLICABLE),
];

pub fn system_prompt(corpus: &CorpusDescription) -> String {
    format!(
        "You are a highly advanced folk music retrieval system.\n\
         You are tasked with assisting a folk music musician in finding tunes in a database \
         for inspiration in composing new tunes or editing existing tunes.\n\
         You are given a natural language text and you must return prototypical object(s) \
         which we will use to rank the tunes by similarity in the database.\n\
         Answer with a JSON list of objects using only the keys \"type\", \"mode\" and \"meter\", \
         or with \"{NOT_APPLICABLE}\" if the text does not ask for tunes.\n\
         {corpus}"
    )
}

/// The full message list for translating `query`.
pub fn build_messages(corpus: &CorpusDescription, query: &str) -> Vec<ChatMessage> {
    let mut messages = Vec::with_capacity(EXAMPLES.len() * 2 + 2);
    messages.push(ChatMessage::new(Role::System, system_prompt(corpus)));
    for (request, answer) in EXAMPLES {
        messages.push(ChatMessage::new(Role::User, *request));
        messages.push(ChatMessage::new(Role::Assistant, *answer));
    }
    messages.push(ChatMessage::new(Role::User, query));
    messages
}

#[cfg(test)]
mod tests {
    use super::*;

    fn description() -> CorpusDescription {
        CorpusDescription {
            tune_count: 2,
            types: vec!["jig".to_string(), "polka".to_string()],
            keys: vec!["D".to_string()],
            modes: vec!["major".to_string()],
            meters: vec!["6/8".to_string(), "2/4".to_string()],
        }
    }

    #[test]
    fn test_system_prompt_embeds_corpus() {
        let prompt = system_prompt(&description());
        assert!(prompt.contains("The database contains 2 tunes"));
        assert!(prompt.contains("'polka'"));
        assert!(prompt.contains(NOT_APPLICABLE));
    }

    #[test]
    fn test_build_messages_layout() {
        let messages = build_messages(&description(), "Something in 2/4 please");
        assert_eq!(messages.len(), 8);
        assert_eq!(messages[0].role, Role::System);
        assert_eq!(messages[1].role, Role::User);
        assert_eq!(messages[2].role, Role::Assistant);
        assert_eq!(messages[6].content, NOT_APPLICABLE);
        let last = messages.last().unwrap();
        assert_eq!(last.role, Role::User);
        assert_eq!(last.content, "Something in 2/4 please");
    }

    #[test]
    fn test_role_serializes_lowercase() {
        let json = serde_json::to_value(ChatMessage::new(Role::Assistant, "hi")).unwrap();
        assert_eq!(json["role"], "assistant");
    }
}
