//! SWAIG wire types: function definitions, webhook requests and results.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A function the AI may call, as declared in the SWML `SWAIG` block.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SwaigFunction {
    pub function: String,
    pub description: String,
    pub parameters: Value,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub web_hook_url: Option<String>,
}

impl SwaigFunction {
    pub fn new(function: impl Into<String>, description: impl Into<String>, parameters: Value) -> Self {
        Self {
            function: function.into(),
            description: description.into(),
            parameters,
            web_hook_url: None,
        }
    }
}

/// Incoming function call from the platform.
#[derive(Debug, Clone, Deserialize)]
pub struct SwaigRequest {
    pub function: String,
    #[serde(default)]
    pub argument: SwaigArgument,
    #[serde(default)]
    pub call_id: Option<String>,
}

/// Arguments as delivered by the platform: pre-parsed objects plus the raw
/// JSON text.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct SwaigArgument {
    #[serde(default)]
    pub parsed: Vec<Value>,
    #[serde(default)]
    pub raw: Option<String>,
}

impl SwaigRequest {
    /// Function arguments as a JSON object.
    ///
    /// Uses the first parsed object, then falls back to the raw text, then to
    /// an empty object.
    pub fn args(&self) -> Value {
        if let Some(first @ Value::Object(_)) = self.argument.parsed.first() {
            return first.clone();
        }
        if let Some(raw) = &self.argument.raw {
            if let Ok(value @ Value::Object(_)) = serde_json::from_str::<Value>(raw) {
                return value;
            }
        }
        Value::Object(Map::new())
    }
}

/// Result of a function call, returned to the platform.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FunctionResult {
    pub response: String,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub action: Vec<Value>,
}

impl FunctionResult {
    pub fn new(response: impl Into<String>) -> Self {
        Self {
            response: response.into(),
            action: Vec::new(),
        }
    }

    /// Attach a platform action (e.g. `{"say": "..."}`).
    pub fn with_action(mut self, action: Value) -> Self {
        self.action.push(action);
        self
    }
}
