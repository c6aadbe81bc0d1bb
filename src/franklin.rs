//! Franklin, the web search bot.

use crate::agent::{AgentBase, Language, PromptSection};
use crate::config::Settings;
use crate::error::Result;
use crate::skills::WebSearchSkill;
use serde_json::{json, Map, Value};
use tracing::debug;

pub const AGENT_NAME: &str = "franklin";

pub const API_KEY_VAR: &str = "GOOGLE_SEARCH_API_KEY";
pub const ENGINE_ID_VAR: &str = "GOOGLE_SEARCH_ENGINE_ID";

const ROLE: &str = "you are Franklin, the web search bot.";
const INSTRUCTION: &str = "Ask the user what they want to search for on the web";

/// Parameters for the web search skill, read from the environment.
///
/// Values are passed through untouched; an unset variable becomes `null`.
pub fn web_search_params<F>(env: F) -> Map<String, Value>
where
    F: Fn(&str) -> Option<String>,
{
    let api_key = env(API_KEY_VAR);
    let engine_id = env(ENGINE_ID_VAR);
    debug!(
        api_key_set = api_key.is_some(),
        search_engine_id_set = engine_id.is_some(),
        "Read search credentials"
    );

    let mut params = Map::new();
    params.insert("api_key".to_string(), json!(api_key));
    params.insert("search_engine_id".to_string(), json!(engine_id));
    params
}

/// Assemble the Franklin agent.
pub fn build_agent<F>(settings: &Settings, env: F) -> Result<AgentBase>
where
    F: Fn(&str) -> Option<String>,
{
    settings.validate()?;
    let mut agent = AgentBase::with_settings(AGENT_NAME, settings);

    agent
        .prompt_add_section(PromptSection::new("role").body(ROLE))
        .prompt_add_section(PromptSection::new("instructions").bullets([INSTRUCTION]))
        .add_language(Language::new("English", "en-US", "rime.spore"));

    agent.add_skill(WebSearchSkill::NAME, web_search_params(env))?;

    Ok(agent)
}

/// Environment lookup backed by the process environment.
pub fn process_env(key: &str) -> Option<String> {
    std::env::var(key).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FranklinError;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    fn franklin() -> AgentBase {
        build_agent(
            &Settings::default(),
            env(&[(API_KEY_VAR, "AIza-test"), (ENGINE_ID_VAR, "0123:abc")]),
        )
        .unwrap()
    }

    #[test]
    fn test_reserved_route_fails_to_build() {
        let mut settings = Settings::default();
        settings.server.route = "/health".to_string();
        let result = build_agent(&settings, env(&[(API_KEY_VAR, "k"), (ENGINE_ID_VAR, "cx")]));
        assert!(matches!(result, Err(FranklinError::Config(_))));
    }

    #[test]
    fn test_credentials_passed_verbatim() {
        for (key, cx) in [("AIza-test", "0123:abc"), (" spaced ", "x"), ("ключ", "引擎")] {
            let agent = build_agent(
                &Settings::default(),
                env(&[(API_KEY_VAR, key), (ENGINE_ID_VAR, cx)]),
            )
            .unwrap();

            let params = agent.skill_params("web_search").unwrap();
            assert_eq!(params.len(), 2);
            assert_eq!(params["api_key"], json!(key));
            assert_eq!(params["search_engine_id"], json!(cx));
        }
    }

    #[test]
    fn test_unset_credentials_are_null() {
        let params = web_search_params(env(&[(ENGINE_ID_VAR, "cx")]));
        assert_eq!(params["api_key"], Value::Null);
        assert_eq!(params["search_engine_id"], json!("cx"));

        let params = web_search_params(env(&[]));
        assert_eq!(params["api_key"], Value::Null);
        assert_eq!(params["search_engine_id"], Value::Null);
    }

    #[test]
    fn test_unset_credentials_fail_skill_load() {
        let err = build_agent(&Settings::default(), env(&[(API_KEY_VAR, "k")]))
            .err()
            .unwrap();
        assert!(matches!(err, FranklinError::Skill { skill, .. } if skill == "web_search"));
    }

    #[test]
    fn test_name_is_franklin() {
        assert_eq!(franklin().name(), "franklin");
    }

    #[test]
    fn test_single_language() {
        assert_eq!(
            franklin().languages(),
            [Language::new("English", "en-US", "rime.spore")]
        );
    }

    #[test]
    fn test_prompt_sections() {
        let agent = franklin();
        let prompt = agent.prompt();
        let titles: Vec<_> = prompt.sections().iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, ["role", "instructions"]);

        assert_eq!(prompt.section("role").unwrap().body, ROLE);

        let instructions = prompt.section("instructions").unwrap();
        assert_eq!(
            instructions.bullets,
            ["Ask the user what they want to search for on the web"]
        );
        assert!(instructions.body.is_empty());
    }

    #[test]
    fn test_exposes_web_search_function() {
        let functions = franklin().functions();
        assert_eq!(functions.len(), 1);
        assert_eq!(functions[0].function, "web_search");
    }
}
