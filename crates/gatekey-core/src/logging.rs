//! File-based logging setup.
//!
//! Logs roll daily under the gatekey home's `logs/` directory, filtered by
//! the `GATEKEY_LOG` env var (standard `EnvFilter` syntax). Nothing is
//! written to stdout or stderr, so the TUI stays clean. Logging is off
//! entirely when the env var is unset.

use anyhow::{Context, Result};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::EnvFilter;

use crate::config::paths;

/// Env var holding the log filter, e.g. `gatekey_core=debug`.
pub const LOG_ENV_VAR: &str = "GATEKEY_LOG";

/// Initializes file logging if `GATEKEY_LOG` is set.
///
/// Returns the appender guard; dropping it flushes buffered log lines, so
/// hold it for the lifetime of the process.
///
/// # Errors
/// Returns an error if the log directory cannot be created.
pub fn init() -> Result<Option<WorkerGuard>> {
    if std::env::var_os(LOG_ENV_VAR).is_none() {
        return Ok(None);
    }

    let dir = paths::log_dir();
    std::fs::create_dir_all(&dir)
        .with_context(|| format!("create log dir {}", dir.display()))?;

    let appender = tracing_appender::rolling::daily(&dir, "gatekey.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_env(LOG_ENV_VAR))
        .with_writer(writer)
        .with_ansi(false)
        .init();

    Ok(Some(guard))
}
