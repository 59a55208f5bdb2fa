//! Runtime configuration resolved from the hosting shell's environment.
//!
//! | variable             | meaning                         | default                      |
//! |----------------------|---------------------------------|------------------------------|
//! | `FARMBOOK_DB_PATH`   | slot database file              | `<tmp>/farmbook.sqlite3`     |
//! | `FARMBOOK_LOG_LEVEL` | `trace..error`                  | `debug` (debug) / `info`     |
//! | `FARMBOOK_LOG_DIR`   | absolute log directory          | unset: file logging disabled |
//!
//! Blank values count as unset.

use crate::logging::{default_log_level, init_logging};
use std::path::PathBuf;

pub const DB_PATH_ENV: &str = "FARMBOOK_DB_PATH";
pub const LOG_LEVEL_ENV: &str = "FARMBOOK_LOG_LEVEL";
pub const LOG_DIR_ENV: &str = "FARMBOOK_LOG_DIR";
const DEFAULT_DB_FILE_NAME: &str = "farmbook.sqlite3";

/// Resolved runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: PathBuf,
    pub log_level: String,
    pub log_dir: Option<PathBuf>,
}

impl AppConfig {
    /// Reads settings from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolves settings through `lookup`, applying defaults for missing or
    /// blank values.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let value = |name: &str| {
            lookup(name)
                .map(|raw| raw.trim().to_string())
                .filter(|raw| !raw.is_empty())
        };

        Self {
            db_path: value(DB_PATH_ENV)
                .map(PathBuf::from)
                .unwrap_or_else(|| std::env::temp_dir().join(DEFAULT_DB_FILE_NAME)),
            log_level: value(LOG_LEVEL_ENV).unwrap_or_else(|| default_log_level().to_string()),
            log_dir: value(LOG_DIR_ENV).map(PathBuf::from),
        }
    }

    /// Starts file logging when a log directory is configured.
    ///
    /// Returns `Ok(false)` and leaves logging off when `log_dir` is unset.
    ///
    /// # Errors
    /// Same as [`init_logging`].
    pub fn init_logging(&self) -> Result<bool, String> {
        let Some(log_dir) = self.log_dir.as_deref() else {
            return Ok(false);
        };
        init_logging(&self.log_level, &log_dir.to_string_lossy())?;
        Ok(true)
    }
}
