//! Configuration module for Franklin.
//!
//! Handles loading settings from a TOML file and layering environment
//! overrides on top.

mod settings;

pub use settings::{AuthSettings, GeneralSettings, ServerSettings, Settings};
