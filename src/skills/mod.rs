//! Skills: named capability modules that contribute functions, prompt text,
//! hints and global data to an agent.
//!
//! A skill is instantiated from a JSON parameter map. Instantiation is where
//! parameters get validated, so a skill that loads is ready to execute.

mod registry;
pub mod web_search;

pub use registry::{SkillFactory, SkillRegistry};
pub use web_search::WebSearchSkill;

use crate::agent::PromptSection;
use crate::error::Result;
use crate::swml::{FunctionResult, SwaigFunction};
use async_trait::async_trait;
use serde_json::{Map, Value};

/// A capability that can be attached to an agent.
#[async_trait]
pub trait Skill: Send + Sync {
    /// Registry name of the skill (e.g. "web_search").
    fn name(&self) -> &str;

    /// Short human-readable description.
    fn description(&self) -> &str;

    /// Functions the AI may call. Webhook URLs are filled in by the agent.
    fn functions(&self) -> Vec<SwaigFunction>;

    /// Speech recognition hints.
    fn hints(&self) -> Vec<String> {
        Vec::new()
    }

    /// Data made available to the AI for the whole call.
    fn global_data(&self) -> Map<String, Value> {
        Map::new()
    }

    /// Prompt sections appended after the agent's own sections.
    fn prompt_sections(&self) -> Vec<PromptSection> {
        Vec::new()
    }

    /// Execute one of this skill's functions.
    async fn execute(&self, function: &str, args: &Value) -> Result<FunctionResult>;
}
