//! Log file setup.
//!
//! The terminal belongs to the UI, so events go to a daily rolling file in
//! the platform data directory and nowhere else.

use std::path::{Path, PathBuf};

use color_eyre::eyre::WrapErr;
use directories::ProjectDirs;
use plexus_config::LogSettings;
use tracing::warn;
use tracing_appender::{non_blocking::WorkerGuard, rolling};
use tracing_subscriber::{EnvFilter, Registry, fmt, layer::SubscriberExt, util::SubscriberInitExt};

const LOG_FILE: &str = "plexus.log";

/// Keeps the background writer alive; buffered lines are flushed on drop.
pub struct LoggingGuard {
    _guard: WorkerGuard,
    log_dir: PathBuf,
}

impl LoggingGuard {
    pub fn log_dir(&self) -> &Path {
        &self.log_dir
    }
}

/// Directory the log files are written to.
pub fn log_dir() -> Option<PathBuf> {
    ProjectDirs::from("", "", "plexus").map(|dirs| dirs.data_local_dir().join("logs"))
}

/// Install the global subscriber when logging is enabled.
pub fn init(settings: &LogSettings) -> color_eyre::Result<Option<LoggingGuard>> {
    if !settings.enabled {
        return Ok(None);
    }
    let Some(log_dir) = log_dir() else {
        return Ok(None);
    };
    std::fs::create_dir_all(&log_dir)
        .wrap_err_with(|| format!("failed to create log directory {}", log_dir.display()))?;

    let (filter, invalid) = match EnvFilter::try_new(&settings.level) {
        Ok(filter) => (filter, None),
        Err(err) => (EnvFilter::new("info"), Some(err)),
    };

    let appender = rolling::daily(&log_dir, LOG_FILE);
    let (writer, guard) = tracing_appender::non_blocking(appender);
    let layer = fmt::layer()
        .with_writer(writer)
        .with_ansi(false)
        .with_target(true);

    Registry::default()
        .with(filter)
        .with(layer)
        .try_init()
        .wrap_err("failed to install the log subscriber")?;

    if let Some(err) = invalid {
        warn!(level = %settings.level, %err, "invalid log filter, using info");
    }

    Ok(Some(LoggingGuard {
        _guard: guard,
        log_dir,
    }))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_disabled_installs_nothing() {
        let guard = init(&LogSettings::default()).unwrap();
        assert!(guard.is_none());
    }

    #[test]
    fn test_log_dir_is_app_specific() {
        if let Some(dir) = log_dir() {
            assert!(dir.ends_with("logs"));
        }
    }
}
