//! Configuration settings for Franklin.

use crate::error::{FranklinError, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// Routes served outside the agent's own route.
const RESERVED_ROUTES: [&str; 2] = ["/health", "/ready"];

/// Root configuration structure.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct Settings {
    pub general: GeneralSettings,
    pub server: ServerSettings,
    pub auth: AuthSettings,
}

/// General application settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GeneralSettings {
    /// Log level (trace, debug, info, warn, error).
    pub log_level: String,
}

impl Default for GeneralSettings {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
        }
    }
}

/// HTTP server settings.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ServerSettings {
    /// Address to bind to.
    pub host: String,
    /// Port to bind to.
    pub port: u16,
    /// Route the agent is mounted at.
    pub route: String,
    /// Externally reachable base URL, used for webhook URLs behind a proxy.
    pub public_url: Option<String>,
}

impl Default for ServerSettings {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 3000,
            route: "/".to_string(),
            public_url: None,
        }
    }
}

/// HTTP basic auth settings. Unset values are generated at startup.
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq)]
#[serde(default)]
pub struct AuthSettings {
    pub user: Option<String>,
    pub password: Option<String>,
}

impl Settings {
    /// Load settings from the default configuration file.
    pub fn load() -> Result<Self> {
        Self::load_from(None)
    }

    /// Load settings from a specific path, or default location if None.
    pub fn load_from(path: Option<&PathBuf>) -> Result<Self> {
        let config_path = match path {
            Some(p) => p.clone(),
            None => Self::default_config_path(),
        };

        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            let settings: Settings = toml::from_str(&content)?;
            settings.validate()?;
            Ok(settings)
        } else {
            Ok(Settings::default())
        }
    }

    /// Reject values the server cannot start with.
    pub fn validate(&self) -> Result<()> {
        let route = format!("/{}", self.server.route.trim().trim_matches('/'));
        if RESERVED_ROUTES.contains(&route.as_str()) {
            return Err(FranklinError::Config(format!(
                "server.route {} collides with a built-in endpoint",
                route
            )));
        }
        Ok(())
    }

    /// Save settings to a specific path.
    pub fn save_to(&self, path: &PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content =
            toml::to_string_pretty(self).map_err(|e| FranklinError::Config(e.to_string()))?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// Get the default configuration file path.
    pub fn default_config_path() -> PathBuf {
        dirs::config_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("franklin")
            .join("config.toml")
    }

    /// Expand shell variables in paths (e.g., ~).
    pub fn expand_path(path: &str) -> PathBuf {
        PathBuf::from(shellexpand::tilde(path).to_string())
    }

    /// Apply overrides from environment variables.
    ///
    /// Recognized: `PORT`, `SWML_BASIC_AUTH_USER`, `SWML_BASIC_AUTH_PASSWORD`
    /// and `SWML_PROXY_URL_BASE`. Empty values are ignored.
    pub fn apply_env<F>(&mut self, lookup: F) -> Result<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(port) = get("PORT") {
            self.server.port = port
                .trim()
                .parse()
                .map_err(|_| FranklinError::Config(format!("PORT is not a valid port: {}", port)))?;
        }
        if let Some(user) = get("SWML_BASIC_AUTH_USER") {
            self.auth.user = Some(user);
        }
        if let Some(password) = get("SWML_BASIC_AUTH_PASSWORD") {
            self.auth.password = Some(password);
        }
        if let Some(url) = get("SWML_PROXY_URL_BASE") {
            self.server.public_url = Some(url);
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn env(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let settings = Settings::default();
        assert_eq!(settings.server.host, "0.0.0.0");
        assert_eq!(settings.server.port, 3000);
        assert_eq!(settings.server.route, "/");
        assert!(settings.auth.user.is_none());
    }

    #[test]
    fn test_apply_env_overrides() {
        let mut settings = Settings::default();
        settings
            .apply_env(env(&[
                ("PORT", "8080"),
                ("SWML_BASIC_AUTH_USER", "alice"),
                ("SWML_BASIC_AUTH_PASSWORD", "secret"),
                ("SWML_PROXY_URL_BASE", "https://agent.example.com"),
            ]))
            .unwrap();

        assert_eq!(settings.server.port, 8080);
        assert_eq!(settings.auth.user.as_deref(), Some("alice"));
        assert_eq!(settings.auth.password.as_deref(), Some("secret"));
        assert_eq!(
            settings.server.public_url.as_deref(),
            Some("https://agent.example.com")
        );
    }

    #[test]
    fn test_apply_env_ignores_empty_values() {
        let mut settings = Settings::default();
        settings
            .apply_env(env(&[("PORT", ""), ("SWML_BASIC_AUTH_USER", "  ")]))
            .unwrap();
        assert_eq!(settings.server.port, 3000);
        assert!(settings.auth.user.is_none());
    }

    #[test]
    fn test_apply_env_rejects_bad_port() {
        let mut settings = Settings::default();
        let err = settings.apply_env(env(&[("PORT", "eighty")])).unwrap_err();
        assert!(matches!(err, FranklinError::Config(_)));
    }

    #[test]
    fn test_save_and_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut settings = Settings::default();
        settings.server.port = 4100;
        settings.server.route = "/franklin".to_string();
        settings.save_to(&path).unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded, settings);
    }

    #[test]
    fn test_partial_file_uses_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nport = 9000\n").unwrap();

        let loaded = Settings::load_from(Some(&path)).unwrap();
        assert_eq!(loaded.server.port, 9000);
        assert_eq!(loaded.server.host, "0.0.0.0");
        assert_eq!(loaded.general.log_level, "info");
    }

    #[test]
    fn test_reserved_route_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "[server]\nroute = \"/health/\"\n").unwrap();

        let err = Settings::load_from(Some(&path)).unwrap_err();
        assert!(matches!(err, FranklinError::Config(_)));

        let mut settings = Settings::default();
        settings.server.route = "ready".to_string();
        assert!(settings.validate().is_err());
        settings.server.route = "/healthcheck".to_string();
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn test_missing_file_is_default() {
        let path = PathBuf::from("/nonexistent/franklin/config.toml");
        assert_eq!(Settings::load_from(Some(&path)).unwrap(), Settings::default());
    }
}
