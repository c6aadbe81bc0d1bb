//! Exec command: call an agent function without the platform.

use crate::cli::Output;
use crate::config::Settings;
use crate::franklin::{build_agent, process_env};
use anyhow::{bail, Context};
use serde_json::Value;

/// Run `function` with JSON `args` and print the result.
pub async fn run_exec(function: &str, args: &str, settings: Settings) -> anyhow::Result<()> {
    let args: Value = serde_json::from_str(args).context("--args must be valid JSON")?;
    if !args.is_object() {
        bail!("--args must be a JSON object, e.g. '{{\"query\": \"rust\"}}'");
    }

    let agent = build_agent(&settings, process_env)?;

    let spinner = Output::spinner(&format!("Running {}...", function));
    let result = agent.execute_function(function, &args).await;
    spinner.finish_and_clear();

    let result = result?;
    println!("{}", result.response);
    if !result.action.is_empty() {
        println!();
        Output::kv("Actions", &serde_json::to_string_pretty(&result.action)?);
    }

    Ok(())
}
