use serde::Serialize;

/// A command shipped with loom. Serialized without `name`, which is the map
/// key in the configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BuiltinCommand {
    #[serde(skip)]
    pub name: &'static str,
    pub description: &'static str,
    /// Role that runs the command.
    pub agent: &'static str,
    /// Run as a subtask instead of in the caller's turn.
    pub subtask: bool,
    /// Body with `$ARGUMENTS` placeholders.
    pub template: &'static str,
}

pub const APPLY: BuiltinCommand = BuiltinCommand {
    name: "apply",
    description: "Execute plan-<request>.md via exec. Does nothing if the plan file does not exist.",
    agent: "exec",
    subtask: true,
    template: APPLY_TEMPLATE,
};

const APPLY_TEMPLATE: &str = "\
This is a `/apply` command. Run the plan, nothing else.

Argument: $ARGUMENTS

Treat the argument as the plan name and load `plan-$ARGUMENTS.md`:

@plan-$ARGUMENTS.md

## Rules

1. If plan-$ARGUMENTS.md is missing or empty, reply exactly:
   No plan file found for '$ARGUMENTS' (expected plan-$ARGUMENTS.md).
   Then stop without using any tool.
2. Otherwise implement the plan steps in order, using tools only for those steps.
3. Ask at most two questions about an unclear step, then skip it and say so.
4. Never call other agents, never edit plan files, never add work the plan does not list.

## Reply

List every plan step as done, skipped (with the reason) or needs clarification,
followed by the files you changed.
";

/// Built-in commands in registration order.
pub fn builtin_commands() -> &'static [BuiltinCommand] {
    &[APPLY]
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn apply_entry_wire_shape() {
        let value = serde_json::to_value(APPLY).unwrap();
        assert!(value.get("name").is_none());
        assert_eq!(value["agent"], "exec");
        assert_eq!(value["subtask"], true);
        assert_eq!(
            value["description"],
            "Execute plan-<request>.md via exec. Does nothing if the plan file does not exist."
        );
        assert!(value["template"].as_str().unwrap().contains("@plan-$ARGUMENTS.md"));
    }
}
