use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Identifier of a tune in the source database.
///
/// TheSession dumps encode tune ids as JSON strings, other exports as
/// numbers; both deserialize to the same textual id. The id is only ever
/// compared for equality during de-duplication.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
pub struct TuneId(String);

impl TuneId {
    #[must_use]
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for TuneId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for TuneId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

impl<'de> Deserialize<'de> for TuneId {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum RawId {
            Text(String),
            Number(u64),
        }

        Ok(match RawId::deserialize(deserializer)? {
            RawId::Text(s) => Self(s),
            RawId::Number(n) => Self(n.to_string()),
        })
    }
}
