//! Shared error definitions used across all loom crates.

pub mod error;

pub use error::{Error, FromMessage, Result, context::Context};
