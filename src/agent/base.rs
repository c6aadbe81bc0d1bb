//! The agent: static configuration plus function dispatch.

use super::{Language, Prompt, PromptSection};
use crate::config::Settings;
use crate::error::{FranklinError, Result};
use crate::server::BasicAuth;
use crate::skills::{Skill, SkillRegistry};
use crate::swml::{AiPrompt, AiVerb, FunctionResult, SwaigBlock, SwaigFunction, SwmlDocument};
use serde_json::{Map, Value};
use std::sync::Arc;
use tracing::{debug, info, instrument, warn};

/// A skill attached to an agent, with the parameters it was loaded with.
#[derive(Clone)]
pub struct LoadedSkill {
    name: String,
    params: Map<String, Value>,
    skill: Arc<dyn Skill>,
}

impl LoadedSkill {
    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn params(&self) -> &Map<String, Value> {
        &self.params
    }

    pub fn skill(&self) -> &Arc<dyn Skill> {
        &self.skill
    }

    fn function_names(&self) -> Vec<String> {
        self.skill
            .functions()
            .into_iter()
            .map(|f| f.function)
            .collect()
    }
}

/// A conversational agent served over HTTP.
///
/// Configuration is accumulated with the `prompt_add_section`,
/// `add_language` and `add_skill` family of methods; `run` then serves the
/// agent until the process is interrupted.
pub struct AgentBase {
    name: String,
    route: String,
    prompt: Prompt,
    languages: Vec<Language>,
    hints: Vec<String>,
    params: Map<String, Value>,
    skills: Vec<LoadedSkill>,
    registry: SkillRegistry,
    settings: Settings,
    auth: BasicAuth,
}

impl AgentBase {
    /// Create an agent with default settings.
    pub fn new(name: &str) -> Self {
        Self::with_settings(name, &Settings::default())
    }

    /// Create an agent using server and auth settings.
    ///
    /// Missing auth values default to the agent name as user and a random
    /// password.
    pub fn with_settings(name: &str, settings: &Settings) -> Self {
        let auth = BasicAuth::from_settings(&settings.auth, name);
        Self {
            name: name.to_string(),
            route: normalize_route(&settings.server.route),
            prompt: Prompt::new(),
            languages: Vec::new(),
            hints: Vec::new(),
            params: Map::new(),
            skills: Vec::new(),
            registry: SkillRegistry::builtin(),
            settings: settings.clone(),
            auth,
        }
    }

    /// Replace the registry used by `add_skill`.
    pub fn with_registry(mut self, registry: SkillRegistry) -> Self {
        self.registry = registry;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    /// Route the SWML document is served at.
    pub fn route(&self) -> &str {
        &self.route
    }

    /// Route of the SWAIG webhook.
    pub fn swaig_route(&self) -> String {
        join_route(&self.route, "swaig")
    }

    pub fn settings(&self) -> &Settings {
        &self.settings
    }

    pub fn auth(&self) -> &BasicAuth {
        &self.auth
    }

    pub fn prompt(&self) -> &Prompt {
        &self.prompt
    }

    pub fn languages(&self) -> &[Language] {
        &self.languages
    }

    pub fn skills(&self) -> &[LoadedSkill] {
        &self.skills
    }

    /// Append a prompt section.
    pub fn prompt_add_section(&mut self, section: PromptSection) -> &mut Self {
        self.prompt.add_section(section);
        self
    }

    /// Register a language/voice pairing.
    pub fn add_language(&mut self, language: Language) -> &mut Self {
        self.languages.push(language);
        self
    }

    /// Add a speech recognition hint.
    pub fn add_hint(&mut self, hint: impl Into<String>) -> &mut Self {
        self.hints.push(hint.into());
        self
    }

    /// Set an `ai` verb parameter (e.g. `end_of_speech_timeout`).
    pub fn set_param(&mut self, key: impl Into<String>, value: Value) -> &mut Self {
        self.params.insert(key.into(), value);
        self
    }

    /// Load a skill by name.
    ///
    /// `params` is recorded exactly as given. The skill validates it while
    /// loading, so an invalid configuration fails here rather than mid-call.
    #[instrument(skip(self, params))]
    pub fn add_skill(&mut self, name: &str, params: Map<String, Value>) -> Result<&mut Self> {
        let skill = self.registry.create(name, &params)?;
        let functions: Vec<String> = skill.functions().into_iter().map(|f| f.function).collect();

        let already_loaded = self
            .skills
            .iter()
            .any(|loaded| loaded.name == name && loaded.function_names() == functions);
        if already_loaded {
            warn!("Skill '{}' is already loaded", name);
            return Ok(self);
        }

        let clash = self
            .skills
            .iter()
            .flat_map(LoadedSkill::function_names)
            .find(|f| functions.contains(f));
        if let Some(function) = clash {
            return Err(FranklinError::skill(
                name,
                format!("function '{}' is already registered", function),
            ));
        }

        info!(functions = ?functions, "Loaded skill '{}'", name);
        self.skills.push(LoadedSkill {
            name: name.to_string(),
            params,
            skill,
        });
        Ok(self)
    }

    pub fn has_skill(&self, name: &str) -> bool {
        self.skills.iter().any(|s| s.name == name)
    }

    /// Parameters the named skill was loaded with.
    pub fn skill_params(&self, name: &str) -> Option<&Map<String, Value>> {
        self.skills.iter().find(|s| s.name == name).map(LoadedSkill::params)
    }

    /// Every function declared by loaded skills.
    pub fn functions(&self) -> Vec<SwaigFunction> {
        self.skills
            .iter()
            .flat_map(|s| s.skill.functions())
            .collect()
    }

    /// Agent prompt followed by skill-contributed sections.
    pub fn full_prompt(&self) -> Prompt {
        self.prompt
            .sections()
            .iter()
            .cloned()
            .chain(self.skills.iter().flat_map(|s| s.skill.prompt_sections()))
            .collect()
    }

    /// Run a function on behalf of the platform.
    #[instrument(skip(self, args))]
    pub async fn execute_function(&self, function: &str, args: &Value) -> Result<FunctionResult> {
        let loaded = self
            .skills
            .iter()
            .find(|s| s.function_names().iter().any(|f| f == function))
            .ok_or_else(|| FranklinError::FunctionNotFound(function.to_string()))?;

        debug!("Dispatching to skill '{}'", loaded.name);
        loaded.skill.execute(function, args).await
    }

    /// Render the SWML document, pointing SWAIG calls at `web_hook_url`.
    pub fn render_swml(&self, web_hook_url: &str) -> SwmlDocument {
        let mut hints = self.hints.clone();
        for hint in self.skills.iter().flat_map(|s| s.skill.hints()) {
            if !hints.contains(&hint) {
                hints.push(hint);
            }
        }

        let mut global_data = Map::new();
        for skill in &self.skills {
            global_data.extend(skill.skill.global_data());
        }

        SwmlDocument::ai(AiVerb {
            prompt: AiPrompt {
                pom: self.full_prompt().to_pom(),
            },
            languages: self.languages.clone(),
            hints,
            params: self.params.clone(),
            global_data,
            swaig: SwaigBlock::new(web_hook_url, self.functions()),
        })
    }

    /// Serve the agent until interrupted.
    pub async fn run(self) -> Result<()> {
        if self.prompt.is_empty() {
            warn!("Agent '{}' has no prompt sections", self.name);
        }
        crate::server::serve(self).await
    }
}

/// Ensure a leading slash and no trailing slash (except for the root).
fn normalize_route(route: &str) -> String {
    let trimmed = route.trim().trim_matches('/');
    format!("/{}", trimmed)
}

fn join_route(base: &str, segment: &str) -> String {
    if base == "/" {
        format!("/{}", segment)
    } else {
        format!("{}/{}", base, segment)
    }
}
