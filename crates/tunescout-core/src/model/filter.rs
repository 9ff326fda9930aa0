use serde::{Deserialize, Serialize};
use std::fmt;

/// A partial attribute specification derived from a natural-language request.
///
/// Each present field is one tag to match against the corpus. A filter with
/// no fields set is valid and matches nothing; that is different from having
/// no filter at all.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AttributeFilter {
    #[serde(rename = "type", default, skip_serializing_if = "Option::is_none")]
    pub tune_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mode: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub meter: Option<String>,
}

impl AttributeFilter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn with_type(mut self, tune_type: impl Into<String>) -> Self {
        self.tune_type = Some(tune_type.into());
        self
    }

    #[must_use]
    pub fn with_mode(mut self, mode: impl Into<String>) -> Self {
        self.mode = Some(mode.into());
        self
    }

    #[must_use]
    pub fn with_meter(mut self, meter: impl Into<String>) -> Self {
        self.meter = Some(meter.into());
        self
    }

    /// The present values in `type`, `mode`, `meter` order.
    pub fn tags(&self) -> Vec<&str> {
        [&self.tune_type, &self.mode, &self.meter]
            .into_iter()
            .filter_map(|v| v.as_deref())
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tune_type.is_none() && self.mode.is_none() && self.meter.is_none()
    }
}

impl fmt::Display for AttributeFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = [
            ("type", &self.tune_type),
            ("mode", &self.mode),
            ("meter", &self.meter),
        ]
        .into_iter()
        .filter_map(|(label, value)| value.as_ref().map(|v| format!("{label}={v}")))
        .collect();

        if parts.is_empty() {
            write!(f, "{{}}")
        } else {
            write!(f, "{{{}}}", parts.join(", "))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tags_in_field_order() {
        let filter = AttributeFilter::new().with_meter("4/4").with_type("jig");
        assert_eq!(filter.tags(), vec!["jig", "4/4"]);
    }

    #[test]
    fn test_empty_filter() {
        let filter = AttributeFilter::new();
        assert!(filter.is_empty());
        assert!(filter.tags().is_empty());
        assert_eq!(filter.to_string(), "{}");
    }

    #[test]
    fn test_deserialize_partial() {
        let filter: AttributeFilter = serde_json::from_str(r#"{"type": "hornpipe"}"#).unwrap();
        assert_eq!(filter, AttributeFilter::new().with_type("hornpipe"));
    }

    #[test]
    fn test_deserialize_ignores_other_keys() {
        let filter: AttributeFilter =
            serde_json::from_str(r#"{"type": "jig", "key": "D", "meter": "6/8"}"#).unwrap();
        assert_eq!(filter.tags(), vec!["jig", "6/8"]);
    }

    #[test]
    fn test_display() {
        let filter = AttributeFilter::new().with_type("jig").with_mode("minor");
        assert_eq!(filter.to_string(), "{type=jig, mode=minor}");
    }
}
