//! Language and voice pairings.

use serde::{Deserialize, Serialize};

/// A spoken language with the locale code used for recognition and the
/// text-to-speech voice used for replies.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Language {
    /// Display name, e.g. "English".
    pub name: String,
    /// Locale code, e.g. "en-US".
    pub code: String,
    /// Voice id, optionally engine-prefixed (e.g. "rime.spore").
    pub voice: String,
}

impl Language {
    pub fn new(name: impl Into<String>, code: impl Into<String>, voice: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            code: code.into(),
            voice: voice.into(),
        }
    }

    /// Engine part of an engine-prefixed voice id.
    pub fn engine(&self) -> Option<&str> {
        self.voice.split_once('.').map(|(engine, _)| engine)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_flat() {
        let lang = Language::new("English", "en-US", "rime.spore");
        assert_eq!(
            serde_json::to_value(&lang).unwrap(),
            serde_json::json!({"name": "English", "code": "en-US", "voice": "rime.spore"})
        );
    }

    #[test]
    fn test_engine() {
        assert_eq!(Language::new("English", "en-US", "rime.spore").engine(), Some("rime"));
        assert_eq!(Language::new("English", "en-US", "alloy").engine(), None);
    }
}
