//! SWML document rendering.
//!
//! The voice platform fetches a SWML document describing the call flow. For
//! an AI agent that is an `answer` verb followed by an `ai` verb carrying the
//! prompt, languages and the SWAIG function table.

mod swaig;

pub use swaig::{FunctionResult, SwaigArgument, SwaigFunction, SwaigRequest};

use crate::agent::Language;
use serde::Serialize;
use serde_json::{Map, Value};

const SWML_VERSION: &str = "1.0.0";

/// A complete SWML document.
#[derive(Debug, Clone, Serialize)]
pub struct SwmlDocument {
    pub version: String,
    pub sections: Sections,
}

#[derive(Debug, Clone, Serialize)]
pub struct Sections {
    pub main: Vec<Verb>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Verb {
    Answer(Map<String, Value>),
    Ai(Box<AiVerb>),
}

/// Configuration of the `ai` verb.
#[derive(Debug, Clone, Default, Serialize)]
pub struct AiVerb {
    pub prompt: AiPrompt,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub languages: Vec<Language>,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub hints: Vec<String>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub params: Map<String, Value>,
    #[serde(skip_serializing_if = "Map::is_empty")]
    pub global_data: Map<String, Value>,
    #[serde(rename = "SWAIG", skip_serializing_if = "Option::is_none")]
    pub swaig: Option<SwaigBlock>,
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct AiPrompt {
    pub pom: Value,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwaigBlock {
    pub defaults: SwaigDefaults,
    pub functions: Vec<SwaigFunction>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SwaigDefaults {
    pub web_hook_url: String,
}

impl SwaigBlock {
    /// Build the block, or `None` when there are no functions to declare.
    pub fn new(web_hook_url: &str, functions: Vec<SwaigFunction>) -> Option<Self> {
        if functions.is_empty() {
            return None;
        }
        Some(Self {
            defaults: SwaigDefaults {
                web_hook_url: web_hook_url.to_string(),
            },
            functions,
        })
    }
}

impl SwmlDocument {
    /// Wrap an `ai` verb in an answer-then-ai document.
    pub fn ai(ai: AiVerb) -> Self {
        Self {
            version: SWML_VERSION.to_string(),
            sections: Sections {
                main: vec![Verb::Answer(Map::new()), Verb::Ai(Box::new(ai))],
            },
        }
    }

    /// The `ai` verb, if present.
    pub fn ai_verb(&self) -> Option<&AiVerb> {
        self.sections.main.iter().find_map(|verb| match verb {
            Verb::Ai(ai) => Some(ai.as_ref()),
            _ => None,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_minimal_document_shape() {
        let doc = SwmlDocument::ai(AiVerb {
            prompt: AiPrompt {
                pom: json!([{"title": "role", "body": "hi"}]),
            },
            ..Default::default()
        });

        assert_eq!(
            serde_json::to_value(&doc).unwrap(),
            json!({
                "version": "1.0.0",
                "sections": {"main": [
                    {"answer": {}},
                    {"ai": {"prompt": {"pom": [{"title": "role", "body": "hi"}]}}}
                ]}
            })
        );
    }

    #[test]
    fn test_swaig_block() {
        assert!(SwaigBlock::new("http://x/swaig", vec![]).is_none());

        let function = SwaigFunction::new("f", "does f", json!({"type": "object"}));
        let block = SwaigBlock::new("http://x/swaig", vec![function]).unwrap();
        assert_eq!(
            serde_json::to_value(&block).unwrap(),
            json!({
                "defaults": {"web_hook_url": "http://x/swaig"},
                "functions": [{"function": "f", "description": "does f", "parameters": {"type": "object"}}]
            })
        );
    }

    #[test]
    fn test_ai_verb_lookup() {
        let doc = SwmlDocument::ai(AiVerb {
            hints: vec!["search".to_string()],
            ..Default::default()
        });
        assert_eq!(doc.ai_verb().unwrap().hints, ["search"]);
    }
}
