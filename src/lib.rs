//! security-gate - blocks pull-request creation until security checks pass
//!
//! The gate sits in front of a shell tool. When the proposed command creates a
//! pull request (`gh pr create`), it runs a fixed battery of checks against the
//! repository and blocks the action if any of them fails:
//! - static analysis (`go vet`)
//! - security-focused lint (`golangci-lint`)
//! - secret/insecure pattern scan (`grep`)
//!
//! External programs are only ever launched through an allowlisted
//! [`security::Executor`]. Failure detail is stripped of terminal escape
//! sequences before it reaches the report.
//!
//! # Example
//!
//! ```no_run
//! use std::path::Path;
//! use security_gate::config::GateConfig;
//! use security_gate::gate;
//! use security_gate::security::AllowlistedExecutor;
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let config = GateConfig::default();
//!     let executor = AllowlistedExecutor::new(config.allowlist());
//!
//!     let verdict = gate::run(
//!         r#"{"command": "gh pr create --fill"}"#,
//!         Path::new("."),
//!         &config,
//!         &executor,
//!     )
//!     .await;
//!
//!     if !verdict.report.is_empty() {
//!         println!("{}", verdict.report);
//!     }
//!     std::process::exit(verdict.exit_code().into());
//! }
//! ```

pub mod config;
pub mod gate;
pub mod hook;
pub mod security;
pub mod utils;

// Re-export commonly used types
pub use config::{CheckSpec, ExitContract, GateConfig};
pub use gate::{CheckOutcome, Classification, Decision, GateVerdict};
pub use hook::HookEnv;
pub use security::{AllowlistedExecutor, Executor, ProgramAllowlist};
