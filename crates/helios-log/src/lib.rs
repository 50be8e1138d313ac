//! Structured logging for the helios viewer.
//!
//! Installs a `tracing` subscriber with a human-readable console layer and,
//! in debug builds, a JSON file layer for post-mortem analysis. Library crates
//! log through the `log` facade, which `tracing-subscriber` picks up through
//! its `tracing-log` bridge.

use std::fs::File;
use std::path::{Path, PathBuf};

use helios_config::Config;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Filter used when neither `RUST_LOG` nor the config provides one.
pub const DEFAULT_FILTER: &str = "info,wgpu=warn,naga=warn";

/// Name of the JSON log written in debug builds.
pub const LOG_FILE_NAME: &str = "helios.log";

/// Resolve the filter directive: the config's `debug.log_level` when set,
/// otherwise [`DEFAULT_FILTER`].
pub fn filter_directive(config: Option<&Config>) -> String {
    match config {
        Some(config) if !config.debug.log_level.trim().is_empty() => {
            config.debug.log_level.trim().to_string()
        }
        _ => DEFAULT_FILTER.to_string(),
    }
}

/// Initialize the global tracing subscriber.
///
/// `RUST_LOG` wins over the config's level. When `debug_build` is set and
/// `log_dir` can be created, JSON records are also written to
/// [`LOG_FILE_NAME`] inside it, and that path is returned.
///
/// ```no_run
/// use helios_config::Config;
/// use helios_log::init_logging;
///
/// let config = Config::default();
/// init_logging(None, false, Some(&config));
/// ```
pub fn init_logging(
    log_dir: Option<&Path>,
    debug_build: bool,
    config: Option<&Config>,
) -> Option<PathBuf> {
    let env_filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(filter_directive(config)));

    let console_layer = fmt::layer()
        .with_target(true)
        .with_thread_names(true)
        .with_level(true)
        .with_timer(fmt::time::uptime());

    let subscriber = tracing_subscriber::registry()
        .with(env_filter)
        .with(console_layer);

    if debug_build
        && let Some(log_dir) = log_dir
        && let Some((log_file, path)) = create_log_file(log_dir)
    {
        let file_layer = fmt::layer()
            .with_writer(log_file)
            .with_ansi(false)
            .with_target(true)
            .with_timer(fmt::time::uptime())
            .json();
        subscriber.with(file_layer).init();
        tracing::info!(path = %path.display(), "Logging initialized with JSON file output");
        return Some(path);
    }

    subscriber.init();
    tracing::info!("Logging initialized");
    None
}

/// Create `log_dir` if needed and open a fresh [`LOG_FILE_NAME`] inside it.
///
/// Returns `None` when the directory or the file cannot be created; file
/// logging is then skipped.
pub fn create_log_file(log_dir: &Path) -> Option<(File, PathBuf)> {
    std::fs::create_dir_all(log_dir).ok()?;
    let path = log_dir.join(LOG_FILE_NAME);
    let file = File::create(&path).ok()?;
    Some((file, path))
}
