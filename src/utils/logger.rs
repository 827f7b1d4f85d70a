//! Logging initialization and configuration.
//!
//! Standard output carries the gate report, so logs are written to files
//! instead. The directory is `SECURITY_GATE_LOG_DIR` when set, otherwise
//! `security-gate/logs` under the user's state directory (falling back to the
//! cache directory, then the system temp directory). Each run gets its own
//! file.
//!
//! # Configuration
//!
//! The log level can be controlled via the `RUST_LOG` environment variable:
//! - `RUST_LOG=debug` - Show debug and higher level logs
//! - `RUST_LOG=info` - Show info and higher level logs (default)
//! - `RUST_LOG=warn` - Show warnings and errors only
//! - `RUST_LOG=error` - Show errors only

use std::ffi::OsString;
use std::fs;
use std::path::PathBuf;

use chrono::Local;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Environment variable overriding the log directory.
pub const LOG_DIR_VAR: &str = "SECURITY_GATE_LOG_DIR";

/// Initialize the logging system.
///
/// Each run creates a new log file with a timestamp, e.g.:
/// `~/.local/state/security-gate/logs/security-gate.2024-12-06-14-30-25.log`
///
/// Returns the writer guard; keep it alive until exit so buffered lines are
/// flushed. Returns `None` (after a warning on stderr) when the log file
/// cannot be created; the gate runs without logs in that case.
pub fn init_logging() -> Option<WorkerGuard> {
    let log_dir = log_dir();

    if let Err(e) = fs::create_dir_all(&log_dir) {
        eprintln!("security-gate: warning: failed to create log directory: {}", e);
        return None;
    }

    let timestamp = Local::now().format("%Y-%m-%d-%H-%M-%S");
    let log_path = log_dir.join(format!("security-gate.{}.log", timestamp));

    let log_file = match fs::File::create(&log_path) {
        Ok(file) => file,
        Err(e) => {
            eprintln!("security-gate: warning: failed to create log file: {}", e);
            return None;
        }
    };

    let (non_blocking, guard) = tracing_appender::non_blocking(log_file);

    let file_layer = fmt::layer()
        .with_writer(non_blocking)
        .with_ansi(false)
        .with_target(true)
        .with_line_number(true);

    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info"));

    if let Err(e) = tracing_subscriber::registry()
        .with(env_filter)
        .with(file_layer)
        .try_init()
    {
        eprintln!("security-gate: warning: failed to install logger: {}", e);
        return None;
    }

    tracing::info!("Logging initialized - writing to {}", log_path.display());
    Some(guard)
}

fn log_dir() -> PathBuf {
    log_dir_from(std::env::var_os(LOG_DIR_VAR))
}

fn log_dir_from(override_dir: Option<OsString>) -> PathBuf {
    if let Some(dir) = override_dir.filter(|d| !d.is_empty()) {
        return PathBuf::from(dir);
    }

    dirs::state_dir()
        .or_else(dirs::cache_dir)
        .unwrap_or_else(std::env::temp_dir)
        .join("security-gate")
        .join("logs")
}
