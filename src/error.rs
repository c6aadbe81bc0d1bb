//! Error types for Franklin.

use thiserror::Error;

/// Library-level error type for Franklin operations.
#[derive(Error, Debug)]
pub enum FranklinError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Skill '{skill}' failed to load: {reason}")]
    Skill { skill: String, reason: String },

    #[error("Unknown skill: {0}")]
    SkillNotFound(String),

    #[error("Function '{0}' not found")]
    FunctionNotFound(String),

    #[error("Search failed: {0}")]
    Search(String),

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Invalid URL: {0}")]
    Url(#[from] url::ParseError),
}

impl FranklinError {
    /// Shorthand for a skill setup failure.
    pub fn skill(skill: &str, reason: impl Into<String>) -> Self {
        FranklinError::Skill {
            skill: skill.to_string(),
            reason: reason.into(),
        }
    }
}

/// Result type alias for Franklin operations.
pub type Result<T> = std::result::Result<T, FranklinError>;
