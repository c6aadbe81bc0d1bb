//! Franklin - the web search bot
//!
//! A voice agent that answers questions with live web search.
//!
//! # Overview
//!
//! The voice platform asks this service for a SWML document describing the
//! agent (its prompt, languages and callable functions) and calls back over
//! the SWAIG webhook whenever the AI decides to run one of those functions.
//! Speech recognition and synthesis happen on the platform.
//!
//! # Architecture
//!
//! - `config` - Settings file and environment overrides
//! - `agent` - Agent configuration: prompt, languages, skills
//! - `skills` - Skill trait, registry and the `web_search` skill
//! - `swml` - SWML document and SWAIG wire types
//! - `server` - HTTP server with basic auth
//! - `franklin` - The Franklin agent definition
//!
//! # Example
//!
//! ```rust,no_run
//! use franklin::agent::{AgentBase, Language, PromptSection};
//! use serde_json::json;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let mut agent = AgentBase::new("librarian");
//!     agent
//!         .prompt_add_section(PromptSection::new("role").body("You help people find books."))
//!         .add_language(Language::new("English", "en-US", "rime.spore"));
//!
//!     let params = json!({"api_key": "...", "search_engine_id": "..."});
//!     agent.add_skill("web_search", params.as_object().cloned().unwrap_or_default())?;
//!
//!     agent.run().await?;
//!     Ok(())
//! }
//! ```

pub mod agent;
pub mod cli;
pub mod config;
pub mod error;
pub mod franklin;
pub mod server;
pub mod skills;
pub mod swml;

pub use error::{FranklinError, Result};
