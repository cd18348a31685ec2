//! Runtime configuration resolved from the environment.
//!
//! | Variable | Meaning | Default |
//! |----------|---------|---------|
//! | `MONEYRISK_HOME` | data directory | platform data dir |
//! | `MONEYRISK_DB` | database file | `<data dir>/moneyrisk.db` |
//! | `MONEYRISK_LOG` | log filter directives | `RUST_LOG`, then `info` |
//! | `MONEYRISK_LOG_FILE` | log file path, or `stderr` | `<data dir>/moneyrisk.log` |

use std::path::{Path, PathBuf};

use crate::error::{Error, Result};

const DB_FILE: &str = "moneyrisk.db";
const LOG_FILE: &str = "moneyrisk.log";
const DEFAULT_LOG_FILTER: &str = "info";

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum LogTarget {
    Stderr,
    File(PathBuf),
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Config {
    pub(crate) data_dir: PathBuf,
    pub(crate) db_path: PathBuf,
    pub(crate) log_filter: String,
    pub(crate) log_target: LogTarget,
}

impl Config {
    pub(crate) fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Resolve configuration through `lookup`, which maps a variable name to
    /// its value. Empty values count as unset.
    pub(crate) fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let var = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let data_dir = match var("MONEYRISK_HOME") {
            Some(dir) => PathBuf::from(dir),
            None => default_data_dir()?,
        };
        let db_path = var("MONEYRISK_DB")
            .map(PathBuf::from)
            .unwrap_or_else(|| data_dir.join(DB_FILE));
        let log_filter = var("MONEYRISK_LOG")
            .or_else(|| var("RUST_LOG"))
            .unwrap_or_else(|| DEFAULT_LOG_FILTER.to_string());
        let log_target = match var("MONEYRISK_LOG_FILE") {
            Some(t) if t.eq_ignore_ascii_case("stderr") => LogTarget::Stderr,
            Some(path) => LogTarget::File(PathBuf::from(path)),
            None => LogTarget::File(data_dir.join(LOG_FILE)),
        };

        Ok(Self {
            data_dir,
            db_path,
            log_filter,
            log_target,
        })
    }

    /// Create the data directory and the parents of the database and log files.
    pub(crate) fn ensure_dirs(&self) -> Result<()> {
        create_dir(&self.data_dir)?;
        if let Some(parent) = self.db_path.parent() {
            create_dir(parent)?;
        }
        if let LogTarget::File(path) = &self.log_target {
            if let Some(parent) = path.parent() {
                create_dir(parent)?;
            }
        }
        Ok(())
    }
}

fn create_dir(dir: &Path) -> Result<()> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    std::fs::create_dir_all(dir).map_err(|e| {
        Error::Config(format!(
            "Failed to create directory {}: {e}",
            dir.display()
        ))
    })
}

fn default_data_dir() -> Result<PathBuf> {
    directories::ProjectDirs::from("com", "moneyrisk", "MoneyRisk")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .ok_or_else(|| Error::Config("Could not determine data directory".into()))
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
