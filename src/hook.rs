//! Hook environment: where the invocation payload and repository come from.

use std::path::PathBuf;

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::GateConfig;
use crate::gate::{self, GateVerdict};
use crate::security::Executor;

/// Environment variable carrying the tool invocation as JSON.
pub const TOOL_INPUT_VAR: &str = "CLAUDE_TOOL_INPUT";
/// Environment variable naming the repository to check.
pub const PROJECT_DIR_VAR: &str = "CLAUDE_PROJECT_DIR";

const EMPTY_INPUT: &str = "{}";

/// Inputs captured from the process environment once at startup.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HookEnv {
    pub tool_input: Option<String>,
    pub project_dir: Option<PathBuf>,
}

impl HookEnv {
    pub fn from_process() -> Self {
        Self {
            tool_input: std::env::var(TOOL_INPUT_VAR).ok(),
            project_dir: std::env::var_os(PROJECT_DIR_VAR).map(PathBuf::from),
        }
    }

    /// The invocation payload; a missing or empty variable reads as `{}`.
    pub fn invocation(&self) -> &str {
        match self.tool_input.as_deref() {
            Some(input) if !input.is_empty() => input,
            _ => EMPTY_INPUT,
        }
    }

    /// The repository directory, falling back to the current directory.
    pub fn repo_dir(&self) -> Result<PathBuf> {
        self.repo_dir_or(std::env::current_dir)
    }

    fn repo_dir_or(
        &self,
        current_dir: impl FnOnce() -> std::io::Result<PathBuf>,
    ) -> Result<PathBuf> {
        match &self.project_dir {
            Some(dir) if !dir.as_os_str().is_empty() => Ok(dir.clone()),
            _ => current_dir().context("could not determine working directory"),
        }
    }

    /// Run the gate for this environment.
    ///
    /// When the repository directory cannot be determined the command is
    /// allowed with a warning: an infrastructure fault must not block every
    /// shell command.
    pub async fn evaluate<E: Executor>(&self, config: &GateConfig, executor: &E) -> GateVerdict {
        self.evaluate_in(self.repo_dir(), config, executor).await
    }

    async fn evaluate_in<E: Executor>(
        &self,
        repo_dir: Result<PathBuf>,
        config: &GateConfig,
        executor: &E,
    ) -> GateVerdict {
        match repo_dir {
            Ok(dir) => gate::run(self.invocation(), &dir, config, executor).await,
            Err(e) => {
                warn!("Allowing command, working directory unavailable: {:#}", e);
                eprintln!("security-gate: {:#}", e);
                GateVerdict::not_gated()
            }
        }
    }
}
