//! The pull-request security gate.
//!
//! Classifies the invocation, runs the check battery when it is a PR
//! creation, and renders the verdict. Every failure is data; nothing here
//! returns an error.

pub mod checks;
pub mod classifier;
pub mod report;
pub mod sanitize;


use std::path::Path;

use tracing::{debug, info};

use crate::config::GateConfig;
use crate::security::Executor;

pub use checks::{CheckOutcome, run_checks};
pub use classifier::{Classification, classify};
pub use report::{Decision, GateVerdict, format};
pub use sanitize::sanitize;

/// Evaluate one raw invocation payload against the repository at `repo_dir`.
pub async fn run<E: Executor>(
    input: &str,
    repo_dir: &Path,
    config: &GateConfig,
    executor: &E,
) -> GateVerdict {
    let command = match classify(input) {
        Classification::NotGated => {
            debug!("Command not gated, allowing");
            return GateVerdict::not_gated();
        }
        Classification::Gated { command } => command,
    };

    info!(%command, repo = %repo_dir.display(), "PR creation detected, running checks");
    let outcomes = run_checks(config, repo_dir, executor).await;
    let verdict = format(&outcomes);

    let failed = outcomes.iter().filter(|o| !o.passed).count();
    info!(decision = ?verdict.decision, failed, "Security gate finished");
    verdict
}
