//! Host configuration: schema, loading, env substitution, and validation.
//!
//! Config files: `loom.json`, `loom.toml`, `loom.yaml` or `loom.yml`.
//! Searched in the project directory, then `~/.config/loom/`.
//!
//! Supports `${ENV_VAR}` substitution in the raw file text.

pub mod env_subst;
pub mod loader;
pub mod schema;
pub mod validate;

pub use {
    loader::{
        config_dir, discover_and_load, find_config_file, load_config, load_config_value,
        render_config, write_config,
    },
    schema::{AgentMap, CommandMap, LoomConfig, entry_is_disabled},
    validate::{Diagnostic, Severity, ValidationResult},
};
