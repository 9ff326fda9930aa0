//! The natural-language → attribute-filter boundary.
//!
//! A [`QueryTranslator`] turns a free-text request into zero or more
//! [`AttributeFilter`]s, or reports that the request is not about finding
//! tunes at all.

pub mod openai;
pub mod prompt;

use async_trait::async_trait;
use serde_json::Value;
use tunescout_core::{AttributeFilter, CorpusDescription};

use crate::error::{TranslateError, TranslateResult};

pub use openai::OpenAiTranslator;

/// Marker the translator emits when a request maps to no filter.
pub const NOT_APPLICABLE: &str = "Not applicable.";

/// Outcome of translating a request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Translation {
    Filters(Vec<AttributeFilter>),
    /// The request does not call for reference tunes.
    NotApplicable,
}

#[async_trait]
pub trait QueryTranslator: Send + Sync {
    /// Translate `query` into filters phrased in the corpus's vocabulary.
    async fn translate(
        &self,
        query: &str,
        corpus: &CorpusDescription,
    ) -> TranslateResult<Translation>;
}

/// A translator for offline use: every request is "not applicable".
#[derive(Debug, Clone, Copy, Default)]
pub struct NullTranslator;

#[async_trait]
impl QueryTranslator for NullTranslator {
    async fn translate(
        &self,
        _query: &str,
        _corpus: &CorpusDescription,
    ) -> TranslateResult<Translation> {
        Ok(Translation::NotApplicable)
    }
}

/// Interpret a translator's completion text.
///
/// Backslashes are stripped first since chat models often escape the JSON
/// they return. A reply starting with "Not applicable" (quoted or not) maps
/// to [`Translation::NotApplicable`]. Otherwise the text, optionally inside a
/// Markdown code fence, must be a JSON array of filter objects or a single
/// filter object. Keys other than `type`, `mode` and `meter` are ignored.
pub fn parse_translation(content: &str) -> TranslateResult<Translation> {
    let cleaned = content.replace('\\', "");
    let body = strip_code_fence(cleaned.trim());

    if body
        .trim_matches('"')
        .to_ascii_lowercase()
        .starts_with("not applicable")
    {
        return Ok(Translation::NotApplicable);
    }

    let unparsable = |message: String| TranslateError::Unparsable {
        content: content.to_string(),
        message,
    };

    let value: Value = serde_json::from_str(body).map_err(|e| unparsable(e.to_string()))?;
    let objects = match value {
        Value::Array(items) => items,
        object @ Value::Object(_) => vec![object],
        other => return Err(unparsable(format!("expected filter objects, got {other}"))),
    };

    let filters = objects
        .into_iter()
        .map(serde_json::from_value::<AttributeFilter>)
        .collect::<Result<Vec<_>, _>>()
        .map_err(|e| unparsable(e.to_string()))?;

    Ok(Translation::Filters(filters))
}

fn strip_code_fence(text: &str) -> &str {
    let Some(rest) = text.strip_prefix("```") else {
        return text;
    };
    // Drop the info string ("json") on the opening fence line.
    let rest = rest.split_once('\n').map_or("", |(_, body)| body);
    rest.trim_end().strip_suffix("```").unwrap_or(rest).trim()
}
