//! Built-in slash commands and the `/apply` plan runner.

pub mod apply;
pub mod builtin;
pub mod registry;

pub use {
    apply::{
        ApplyOutcome, PlanExecutor, PlanLookup, apply, plan_file_name, plan_prompt, resolve_plan,
    },
    builtin::{APPLY, BuiltinCommand, builtin_commands},
    registry::{ARGUMENTS_PLACEHOLDER, register_commands, render_template},
};
