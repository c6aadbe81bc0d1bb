//! Commands that print what the agent would serve.

use crate::config::Settings;
use crate::franklin::{build_agent, process_env};
use crate::server::webhook_url;
use axum::http::HeaderMap;

/// Print the SWML document as the platform would receive it.
pub fn run_swml(settings: Settings) -> anyhow::Result<()> {
    let agent = build_agent(&settings, process_env)?;
    let url = webhook_url(&agent, &HeaderMap::new())?;
    let doc = agent.render_swml(&url);
    println!("{}", serde_json::to_string_pretty(&doc)?);
    Ok(())
}

/// Print the full prompt, skill sections included, as Markdown.
pub fn run_prompt(settings: Settings) -> anyhow::Result<()> {
    let agent = build_agent(&settings, process_env)?;
    println!("{}", agent.full_prompt().to_markdown());
    Ok(())
}
