//! Security boundary for process execution.
//!
//! This module owns the program allowlist and the executor that enforces it.
//! Nothing else in the crate spawns processes.

mod allowlist;
pub mod executor;

pub use allowlist::ProgramAllowlist;
pub use executor::{AllowlistedExecutor, ExecOutput, Executor};
