//! CLI command implementations.

mod config;
mod exec;
mod inspect;
mod serve;

pub use config::run_config;
pub use exec::run_exec;
pub use inspect::{run_prompt, run_swml};
pub use serve::run_serve;
