//! Skill lookup by name.

use super::{Skill, WebSearchSkill};
use crate::error::{FranklinError, Result};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use std::sync::Arc;

/// Constructor for a skill from its parameter map.
pub type SkillFactory = fn(&Map<String, Value>) -> Result<Arc<dyn Skill>>;

/// Maps skill names to their constructors.
#[derive(Clone)]
pub struct SkillRegistry {
    factories: BTreeMap<String, SkillFactory>,
}

impl SkillRegistry {
    /// An empty registry.
    pub fn new() -> Self {
        Self {
            factories: BTreeMap::new(),
        }
    }

    /// A registry with every built-in skill.
    pub fn builtin() -> Self {
        let mut registry = Self::new();
        registry.register(WebSearchSkill::NAME, web_search);
        registry
    }

    /// Register (or replace) a skill constructor.
    pub fn register(&mut self, name: &str, factory: SkillFactory) {
        self.factories.insert(name.to_string(), factory);
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.contains_key(name)
    }

    /// Registered skill names, sorted.
    pub fn names(&self) -> Vec<&str> {
        self.factories.keys().map(String::as_str).collect()
    }

    /// Instantiate a skill by name.
    pub fn create(&self, name: &str, params: &Map<String, Value>) -> Result<Arc<dyn Skill>> {
        let factory = self
            .factories
            .get(name)
            .ok_or_else(|| FranklinError::SkillNotFound(name.to_string()))?;
        factory(params)
    }
}

fn web_search(params: &Map<String, Value>) -> Result<Arc<dyn Skill>> {
    Ok(Arc::new(WebSearchSkill::from_params(params)?))
}

impl Default for SkillRegistry {
    fn default() -> Self {
        Self::builtin()
    }
}

impl std::fmt::Debug for SkillRegistry {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SkillRegistry")
            .field("skills", &self.names())
            .finish()
    }
}
