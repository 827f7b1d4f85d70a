//! Check orchestration: runs the configured battery and interprets results.

use std::path::Path;

use futures::future::join_all;
use serde::Serialize;
use tracing::{debug, info};

use crate::config::{CheckSpec, ExitContract, GateConfig, ScanExclusions};
use crate::security::{ExecOutput, Executor};

/// Verdict of one check for one invocation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub label: String,
    pub passed: bool,
    /// Failure detail (raw, unsanitized). Empty when the check passed.
    pub detail: String,
}

impl CheckOutcome {
    pub fn pass(label: &str) -> Self {
        Self {
            label: label.to_string(),
            passed: true,
            detail: String::new(),
        }
    }

    pub fn fail(label: &str, detail: impl Into<String>) -> Self {
        Self {
            label: label.to_string(),
            passed: false,
            detail: detail.into(),
        }
    }
}

/// Run every configured check against `repo_dir`.
///
/// All checks run regardless of earlier failures. They are driven
/// concurrently; outcomes come back in configuration order.
pub async fn run_checks<E: Executor>(
    config: &GateConfig,
    repo_dir: &Path,
    executor: &E,
) -> Vec<CheckOutcome> {
    join_all(
        config
            .checks
            .iter()
            .map(|spec| run_check(spec, &config.exclusions, repo_dir, executor)),
    )
    .await
}

async fn run_check<E: Executor>(
    spec: &CheckSpec,
    exclusions: &ScanExclusions,
    repo_dir: &Path,
    executor: &E,
) -> CheckOutcome {
    info!(check = %spec.label, program = %spec.program, "Running check");
    let out = executor.execute(&spec.program, &spec.args, repo_dir).await;
    let outcome = interpret(spec, exclusions, &out);
    info!(
        check = %spec.label,
        exit_code = out.exit_code,
        passed = outcome.passed,
        "Check finished"
    );
    outcome
}

/// Map a program's result onto a pass/fail outcome under the check's exit contract.
pub fn interpret(spec: &CheckSpec, exclusions: &ScanExclusions, out: &ExecOutput) -> CheckOutcome {
    match spec.contract {
        ExitContract::ZeroPasses => {
            if out.succeeded() {
                CheckOutcome::pass(&spec.label)
            } else {
                CheckOutcome::fail(&spec.label, out.output.trim())
            }
        }
        ExitContract::MatchesFail => interpret_scan(spec, exclusions, out),
    }
}

fn interpret_scan(spec: &CheckSpec, exclusions: &ScanExclusions, out: &ExecOutput) -> CheckOutcome {
    let text = out.output.trim();

    if !out.succeeded() {
        // No matches prints nothing. Output alongside a non-zero exit is an
        // error from the scanner or the executor, and fails closed.
        return if text.is_empty() {
            CheckOutcome::pass(&spec.label)
        } else {
            CheckOutcome::fail(&spec.label, text)
        };
    }

    let kept = filter_matches(&out.output, exclusions);
    if kept.is_empty() {
        CheckOutcome::pass(&spec.label)
    } else {
        CheckOutcome::fail(&spec.label, kept.join("\n"))
    }
}

/// Keep the match lines whose path is not excluded.
///
/// The path is the text before the first `:`; the matched content after it
/// never takes part in the decision.
pub fn filter_matches<'a>(output: &'a str, exclusions: &ScanExclusions) -> Vec<&'a str> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .filter(|line| {
            let path = match_path(line);
            let excluded = exclusions.excludes(path);
            if excluded {
                debug!(path, "Dropped excluded scan match");
            }
            !excluded
        })
        .collect()
}

fn match_path(line: &str) -> &str {
    match line.split_once(':') {
        Some((path, _)) => path,
        None => line,
    }
}
