//! Main entry point for the security gate hook.
//!
//! Reads the invocation from the environment, runs the gate against the
//! project directory, prints the report to stdout and exits with the verdict.

use std::process::ExitCode;

use security_gate::config::GateConfig;
use security_gate::hook::HookEnv;
use security_gate::security::AllowlistedExecutor;
use security_gate::utils;

#[tokio::main(flavor = "current_thread")]
async fn main() -> ExitCode {
    // Held until return so buffered log lines are flushed
    let _log_guard = utils::logger::init_logging();

    let env = HookEnv::from_process();
    let config = GateConfig::default();
    let executor = AllowlistedExecutor::new(config.allowlist());

    let verdict = env.evaluate(&config, &executor).await;
    if !verdict.report.is_empty() {
        println!("{}", verdict.report);
    }

    ExitCode::from(verdict.exit_code())
}
