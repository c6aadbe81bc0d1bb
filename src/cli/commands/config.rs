//! Config command implementation.

use crate::cli::ConfigAction;
use crate::config::Settings;
use anyhow::Result;

/// Run the config command.
pub fn run_config(action: &ConfigAction, settings: Settings) -> Result<()> {
    match action {
        ConfigAction::Show => {
            println!("{}", show(settings)?);
        }

        ConfigAction::Path => {
            let config_path = Settings::default_config_path();
            println!("{}", config_path.display());
        }
    }

    Ok(())
}

/// Effective settings as TOML, with the password masked.
fn show(mut settings: Settings) -> Result<String> {
    if settings.auth.password.is_some() {
        settings.auth.password = Some("***".to_string());
    }
    toml::to_string_pretty(&settings).map_err(|e| anyhow::anyhow!("Failed to serialize config: {}", e))
}
