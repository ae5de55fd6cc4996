//! Site configuration for nbpost
//!
//! Resolution order:
//! 1. CLI flags (highest priority)
//! 2. Environment variables (NBPOST_*)
//! 3. Config file (`nbpost.toml` or `--config`)
//! 4. Built-in defaults (lowest priority)

mod loader;
#[cfg(test)]
mod tests;
mod types;

pub use loader::{ConfigWarning, DEFAULT_CONFIG_FILE};
pub use types::{Config, FrontMatterDefaults};
