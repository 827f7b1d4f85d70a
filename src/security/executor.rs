//! Allowlist-gated process execution.
//!
//! Every external program the gate runs goes through an [`Executor`]. The
//! production implementation, [`AllowlistedExecutor`], checks the program name
//! against a [`ProgramAllowlist`] before anything is spawned. Execution never
//! fails with an error: rejections and launch failures come back as an
//! [`ExecOutput`] with a non-zero exit code and a diagnostic in `output`.

use std::path::Path;
use std::process::Stdio;

use tokio::process::Command;
use tracing::{debug, warn};

use super::ProgramAllowlist;

/// Exit code reported when no real exit code is available
/// (rejected program, launch failure, killed by signal).
pub const SYNTHETIC_FAILURE_CODE: i32 = 1;

/// Combined output and exit code of one external program run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExecOutput {
    /// stdout followed by stderr, lossily decoded as UTF-8.
    pub output: String,
    pub exit_code: i32,
}

impl ExecOutput {
    pub fn new(output: impl Into<String>, exit_code: i32) -> Self {
        Self {
            output: output.into(),
            exit_code,
        }
    }

    /// Synthetic result for a program that is not on the allowlist.
    pub fn rejected(program: &str) -> Self {
        Self::new(
            format!("security-gate: blocked disallowed command {:?}", program),
            SYNTHETIC_FAILURE_CODE,
        )
    }

    /// Synthetic result for a program that could not be started.
    pub fn launch_failed(program: &str, err: &std::io::Error) -> Self {
        Self::new(
            format!("security-gate: failed to run {:?}: {}", program, err),
            SYNTHETIC_FAILURE_CODE,
        )
    }

    pub fn succeeded(&self) -> bool {
        self.exit_code == 0
    }
}

/// Capability to run an external program in a working directory.
pub trait Executor {
    fn execute(
        &self,
        program: &str,
        args: &[String],
        dir: &Path,
    ) -> impl Future<Output = ExecOutput>;
}

/// The only production [`Executor`]: refuses anything outside its allowlist.
#[derive(Debug, Clone)]
pub struct AllowlistedExecutor {
    allowlist: ProgramAllowlist,
}

impl AllowlistedExecutor {
    pub fn new(allowlist: ProgramAllowlist) -> Self {
        debug!(programs = ?allowlist.programs().collect::<Vec<_>>(), "Executor allowlist");
        Self { allowlist }
    }
}

impl Executor for AllowlistedExecutor {
    async fn execute(&self, program: &str, args: &[String], dir: &Path) -> ExecOutput {
        if !self.allowlist.permits(program) {
            warn!(program, "Rejected program outside the executor allowlist");
            return ExecOutput::rejected(program);
        }

        debug!(program, ?args, dir = %dir.display(), "Launching check program");

        let mut cmd = Command::new(program);
        cmd.args(args);
        cmd.current_dir(dir);
        cmd.stdin(Stdio::null());
        cmd.kill_on_drop(true);

        let res = match cmd.output().await {
            Ok(res) => res,
            Err(e) => {
                warn!(program, error = %e, "Failed to launch check program");
                return ExecOutput::launch_failed(program, &e);
            }
        };

        let exit_code = match res.status.code() {
            Some(code) => code,
            None => {
                warn!(program, status = %res.status, "Check program terminated without an exit code");
                SYNTHETIC_FAILURE_CODE
            }
        };

        ExecOutput::new(merge_output(&res.stdout, &res.stderr), exit_code)
    }
}

/// Merge stdout and stderr into one text, stdout first.
fn merge_output(stdout: &[u8], stderr: &[u8]) -> String {
    let mut merged = Vec::with_capacity(stdout.len() + stderr.len() + 1);
    merged.extend_from_slice(stdout);
    if !stderr.is_empty() {
        if !merged.is_empty() && merged.last() != Some(&b'\n') {
            merged.push(b'\n');
        }
        merged.extend_from_slice(stderr);
    }
    String::from_utf8_lossy(&merged).into_owned()
}
