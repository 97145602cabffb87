//! Built-in roles. Each module hard-codes one complete capability profile.

pub mod blackice;
pub mod blueprint;
pub mod cortex;
pub mod dataweaver;
pub mod exec;

pub use {
    blackice::Blackice, blueprint::Blueprint, cortex::Cortex, dataweaver::Dataweaver, exec::Exec,
};
