//! Configuration for a processing run.
//!
//! The original tool resolved every path against the process working
//! directory; here the three working directories are held in an explicit
//! [`Config`] value passed into each operation, so no path state lives
//! outside it.

use crate::constants::{
    BASELINE_FILE_NAME, DATA_DIR_NAME, DIFF_DIR_NAME, INCOMING_FILE_NAME, OUTPUT_DIR_NAME,
    SOURCE_URL,
};
use crate::{Error, Result};
use std::path::{Path, PathBuf};
use tracing::info;

/// Resolved directories and source location for one run
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the baseline and incoming snapshots
    pub data_dir: PathBuf,

    /// Directory receiving the per-state artifacts
    pub output_dir: PathBuf,

    /// Directory receiving timestamped diff artifacts
    pub diff_dir: PathBuf,

    /// URL the source dataset is fetched from
    pub source_url: String,
}

impl Config {
    /// Resolve the standard directory layout beneath a base directory
    pub fn from_base_dir(base: &Path) -> Self {
        Self {
            data_dir: base.join(DATA_DIR_NAME),
            output_dir: base.join(OUTPUT_DIR_NAME),
            diff_dir: base.join(DIFF_DIR_NAME),
            source_url: SOURCE_URL.to_string(),
        }
    }

    /// Override the data directory
    pub fn with_data_dir(mut self, dir: PathBuf) -> Self {
        self.data_dir = dir;
        self
    }

    /// Override the output directory
    pub fn with_output_dir(mut self, dir: PathBuf) -> Self {
        self.output_dir = dir;
        self
    }

    /// Override the diff directory
    pub fn with_diff_dir(mut self, dir: PathBuf) -> Self {
        self.diff_dir = dir;
        self
    }

    /// Override the source URL
    pub fn with_source_url(mut self, url: impl Into<String>) -> Self {
        self.source_url = url.into();
        self
    }

    /// Path of the baseline snapshot
    pub fn baseline_path(&self) -> PathBuf {
        self.data_dir.join(BASELINE_FILE_NAME)
    }

    /// Path of the incoming (temporary) snapshot
    pub fn incoming_path(&self) -> PathBuf {
        self.data_dir.join(INCOMING_FILE_NAME)
    }

    /// Validate the configuration for consistency
    pub fn validate(&self) -> Result<()> {
        if self.source_url.trim().is_empty() {
            return Err(Error::configuration(
                "Source URL cannot be empty".to_string(),
            ));
        }

        for (name, dir) in [
            ("data", &self.data_dir),
            ("output", &self.output_dir),
            ("diff", &self.diff_dir),
        ] {
            if dir.as_os_str().is_empty() {
                return Err(Error::configuration(format!(
                    "{} directory path cannot be empty",
                    name
                )));
            }
        }

        Ok(())
    }

    /// Create the three working directories if they do not exist
    pub fn ensure_directories(&self) -> Result<()> {
        for dir in [&self.data_dir, &self.output_dir, &self.diff_dir] {
            std::fs::create_dir_all(dir).map_err(|e| {
                Error::io(format!("Failed to create directory '{}'", dir.display()), e)
            })?;
        }

        info!(
            "Directories ready: data={} output={} diff={}",
            self.data_dir.display(),
            self.output_dir.display(),
            self.diff_dir.display()
        );
        Ok(())
    }
}
