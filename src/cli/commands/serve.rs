//! Serve command: run the agent's HTTP server.

use crate::agent::{Language, LoadedSkill};
use crate::cli::Output;
use crate::config::Settings;
use crate::franklin::{build_agent, process_env};

/// Build Franklin and serve it until Ctrl-C.
pub async fn run_serve(host: Option<String>, port: Option<u16>, mut settings: Settings) -> anyhow::Result<()> {
    if let Some(host) = host {
        settings.server.host = host;
    }
    if let Some(port) = port {
        settings.server.port = port;
    }

    let agent = build_agent(&settings, process_env)?;

    Output::header("Franklin");
    println!();
    Output::success(&format!(
        "Starting on http://{}:{}",
        settings.server.host, settings.server.port
    ));
    println!();
    println!("Endpoints:");
    Output::kv("SWML", &format!("GET|POST {}", agent.route()));
    Output::kv("SWAIG", &format!("POST     {}", agent.swaig_route()));
    Output::kv("Health", "GET      /health");
    println!();
    println!("Agent:");
    for language in agent.languages() {
        Output::kv("Language", &language_line(language));
    }
    for skill in agent.skills() {
        Output::kv("Skill", &skill_line(skill));
    }
    println!();
    Output::kv("Auth user", &agent.auth().user);
    if agent.auth().is_generated() {
        Output::kv("Auth password", &agent.auth().password);
        Output::warning("Password generated for this run. Set SWML_BASIC_AUTH_PASSWORD to keep it stable.");
    }
    println!();
    Output::info("Press Ctrl+C to stop the server.");

    agent.run().await?;

    Ok(())
}

fn language_line(language: &Language) -> String {
    match language.engine() {
        Some(engine) => format!("{} ({}), voice {} via {}", language.name, language.code, language.voice, engine),
        None => format!("{} ({}), voice {}", language.name, language.code, language.voice),
    }
}

/// Skill name, description and parameter keys. Values are never shown.
fn skill_line(skill: &LoadedSkill) -> String {
    let keys: Vec<&str> = skill.params().keys().map(String::as_str).collect();
    format!(
        "{} - {} [{}]",
        skill.name(),
        skill.skill().description(),
        keys.join(", ")
    )
}
