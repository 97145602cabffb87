//! Built-in agent roles and the registration pass that merges them into a
//! host configuration.
//!
//! Each role is an [`AgentDefinition`] that returns a complete
//! [`AgentDescriptor`] (tools, permissions, prompt) unless the host already
//! has an entry under that name. Only the primary orchestrator may delegate.

pub mod audit;
pub mod capability;
pub mod definition;
pub mod descriptor;
pub mod prompt;
pub mod registration;
pub mod roles;

pub use {
    audit::{CapabilityViolation, audit_capabilities},
    capability::{BashPolicy, CapabilityProfile, Permission, PermissionPolicy, ToolSet},
    definition::AgentDefinition,
    descriptor::{AgentDescriptor, AgentTier},
    registration::{
        DEFAULT_AGENT, RegistrationReport, builtin_definitions, register_agents,
        register_builtin_agents, skill_catalog,
    },
};
