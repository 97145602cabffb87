use {
    loom_common::Result,
    loom_config::LoomConfig,
    tracing::{debug, info},
};

use crate::builtin::BuiltinCommand;

/// Placeholder replaced by the command argument.
pub const ARGUMENTS_PLACEHOLDER: &str = "$ARGUMENTS";

/// Merge `commands` into `config.command`, leaving existing names untouched.
///
/// Returns the names that were added.
pub fn register_commands(
    config: &mut LoomConfig,
    commands: &[BuiltinCommand],
) -> Result<Vec<String>> {
    let mut map = config.command.take().unwrap_or_default();
    let mut added = Vec::new();

    for command in commands {
        if map.contains_key(command.name) {
            debug!(command = command.name, "command entry already present, skipping");
            continue;
        }
        map.insert(command.name.to_string(), serde_json::to_value(command)?);
        added.push(command.name.to_string());
    }

    config.command = Some(map);
    info!(added = added.len(), "built-in command registration complete");
    Ok(added)
}

/// Substitute every `$ARGUMENTS` in `template` with `argument`.
pub fn render_template(template: &str, argument: &str) -> String {
    template.replace(ARGUMENTS_PLACEHOLDER, argument)
}
