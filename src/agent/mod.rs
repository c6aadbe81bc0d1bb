//! Agent framework.
//!
//! An agent is a name, a structured prompt, language/voice pairings and a
//! set of skills. It renders itself as a SWML document and executes skill
//! functions when the platform calls back.

mod base;
mod language;
mod prompt;

pub use base::{AgentBase, LoadedSkill};
pub use language::Language;
pub use prompt::{Prompt, PromptSection};
