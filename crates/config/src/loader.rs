use std::path::{Path, PathBuf};

use {
    loom_common::{Context, Error, Result},
    serde_json::Value,
    tracing::debug,
};

use crate::{env_subst::substitute_env, schema::LoomConfig};

/// Standard config file names, checked in order.
const CONFIG_FILENAMES: &[&str] = &["loom.json", "loom.toml", "loom.yaml", "loom.yml"];

/// Load config from the given path (any supported format).
pub fn load_config(path: &Path) -> Result<LoomConfig> {
    let value = load_config_value(path)?;
    LoomConfig::from_value(value).with_context(|| format!("invalid config {}", path.display()))
}

/// Read, env-substitute and parse a config file into a JSON value.
pub fn load_config_value(path: &Path) -> Result<Value> {
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("failed to read {}", path.display()))?;
    let raw = substitute_env(&raw);
    parse_config_value(&raw, path)
}

/// Discover and load config from standard locations.
///
/// Search order:
/// 1. `<project_dir>/loom.{json,toml,yaml,yml}`
/// 2. `~/.config/loom/loom.{json,toml,yaml,yml}`
///
/// Returns `LoomConfig::default()` only when no config file exists. A file
/// that is found but can't be loaded is an error.
pub fn discover_and_load(project_dir: &Path) -> Result<LoomConfig> {
    match find_config_file(project_dir) {
        Some(path) => {
            debug!(path = %path.display(), "loading config");
            load_config(&path)
        },
        None => {
            debug!("no config file found, using defaults");
            Ok(LoomConfig::default())
        },
    }
}

/// Find the first config file in standard locations.
pub fn find_config_file(project_dir: &Path) -> Option<PathBuf> {
    let local = CONFIG_FILENAMES
        .iter()
        .map(|name| project_dir.join(name))
        .find(|p| p.is_file());
    if local.is_some() {
        return local;
    }

    let global = config_dir()?;
    CONFIG_FILENAMES
        .iter()
        .map(|name| global.join(name))
        .find(|p| p.is_file())
}

/// Returns the user-global config directory (`~/.config/loom/`).
pub fn config_dir() -> Option<PathBuf> {
    directories::ProjectDirs::from("", "", "loom").map(|d| d.config_dir().to_path_buf())
}

/// Serialize `config` in the format implied by `path`'s extension and write it.
///
/// Creates parent directories if needed.
pub fn write_config(config: &LoomConfig, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent()
        && !parent.as_os_str().is_empty()
    {
        std::fs::create_dir_all(parent)?;
    }
    let rendered = render_config(config, extension(path))?;
    std::fs::write(path, rendered)?;
    debug!(path = %path.display(), "wrote config");
    Ok(())
}

/// Render `config` as text in the given format (`json`, `toml`, `yaml`/`yml`).
pub fn render_config(config: &LoomConfig, format: &str) -> Result<String> {
    match format {
        "json" => Ok(serde_json::to_string_pretty(config)?),
        "toml" => toml::to_string_pretty(config).context("serialize config as toml"),
        "yaml" | "yml" => serde_yaml::to_string(config).context("serialize config as yaml"),
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}

fn extension(path: &Path) -> &str {
    path.extension().and_then(|e| e.to_str()).unwrap_or("json")
}

fn parse_config_value(raw: &str, path: &Path) -> Result<Value> {
    match extension(path) {
        "json" => Ok(serde_json::from_str(raw)?),
        "toml" => {
            let v: toml::Value = toml::from_str(raw).context("invalid toml")?;
            Ok(serde_json::to_value(v)?)
        },
        "yaml" | "yml" => {
            let v: serde_yaml::Value = serde_yaml::from_str(raw).context("invalid yaml")?;
            Ok(serde_json::to_value(v)?)
        },
        other => Err(Error::UnsupportedFormat(other.to_string())),
    }
}
