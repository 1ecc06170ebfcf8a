//! Command-line argument definitions for the municipio processor
//!
//! Defines the CLI surface using the clap derive API: `update`, `export`
//! and `search` subcommands plus shared verbosity handling.

use crate::{Error, Result};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// CLI arguments for the municipality dataset processor
///
/// Reconciles the Receita Federal municipality dataset against a local
/// baseline, partitions it by state into CSV/JSON/binary artifacts and
/// offers interactive lookup.
#[derive(Debug, Clone, Parser)]
#[command(
    name = "municipio-processor",
    version,
    about = "Reconcile and partition the Receita Federal municipality dataset",
    long_about = "Downloads the Receita Federal reference dataset of Brazilian \
                  municipalities, detects additions, removals and field-level changes \
                  against a previously saved baseline, partitions records by state into \
                  CSV, JSON and binary artifacts, and offers interactive lookup by \
                  state, name or municipality code."
)]
pub struct Args {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

/// Available subcommands
#[derive(Debug, Clone, Subcommand)]
pub enum Commands {
    /// Download the dataset and reconcile it against the saved baseline
    Update(UpdateArgs),
    /// Partition the baseline by state into CSV/JSON/binary artifacts
    Export(ExportArgs),
    /// Interactive lookup over the baseline dataset
    Search(SearchArgs),
}

/// Arguments for the update command
#[derive(Debug, Clone, Parser)]
pub struct UpdateArgs {
    /// Base directory the working directories are resolved beneath
    ///
    /// Defaults to the current directory. The data, output and diff
    /// directories are created under it if missing.
    #[arg(
        short = 'b',
        long = "base-dir",
        value_name = "PATH",
        help = "Base directory for the working directories"
    )]
    pub base_dir: Option<PathBuf>,

    /// Override the source dataset URL
    #[arg(
        long = "url",
        value_name = "URL",
        help = "Override the source dataset URL"
    )]
    pub url: Option<String>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the export command
#[derive(Debug, Clone, Parser)]
pub struct ExportArgs {
    /// Base directory the working directories are resolved beneath
    #[arg(
        short = 'b',
        long = "base-dir",
        value_name = "PATH",
        help = "Base directory for the working directories"
    )]
    pub base_dir: Option<PathBuf>,

    /// Baseline snapshot to export instead of the configured one
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Baseline CSV to export (defaults to the saved baseline)"
    )]
    pub input: Option<PathBuf>,

    /// Directory receiving the per-state artifacts
    #[arg(
        short = 'o',
        long = "output",
        value_name = "PATH",
        help = "Output directory for the per-state artifacts"
    )]
    pub output: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Arguments for the search command
#[derive(Debug, Clone, Parser)]
pub struct SearchArgs {
    /// Base directory the working directories are resolved beneath
    #[arg(
        short = 'b',
        long = "base-dir",
        value_name = "PATH",
        help = "Base directory for the working directories"
    )]
    pub base_dir: Option<PathBuf>,

    /// Baseline snapshot to query instead of the configured one
    #[arg(
        short = 'i',
        long = "input",
        value_name = "FILE",
        help = "Baseline CSV to query (defaults to the saved baseline)"
    )]
    pub input: Option<PathBuf>,

    /// Logging verbosity level
    #[arg(
        short = 'v',
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase logging verbosity (-v: info, -vv: debug, -vvv: trace)"
    )]
    pub verbose: u8,

    /// Suppress output except errors
    #[arg(short = 'q', long = "quiet", conflicts_with = "verbose")]
    pub quiet: bool,
}

/// Map verbosity flags to a log level the way every subcommand shares
fn log_level(verbose: u8, quiet: bool) -> &'static str {
    if quiet {
        "error"
    } else {
        match verbose {
            0 => "warn",
            1 => "info",
            2 => "debug",
            _ => "trace",
        }
    }
}

fn validate_base_dir(base_dir: &Option<PathBuf>) -> Result<()> {
    if let Some(dir) = base_dir {
        if !dir.exists() {
            return Err(Error::configuration(format!(
                "Base directory does not exist: {}",
                dir.display()
            )));
        }
        if !dir.is_dir() {
            return Err(Error::configuration(format!(
                "Base path is not a directory: {}",
                dir.display()
            )));
        }
    }
    Ok(())
}

fn validate_input(input: &Option<PathBuf>) -> Result<()> {
    if let Some(path) = input {
        if !path.is_file() {
            return Err(Error::configuration(format!(
                "Input file does not exist: {}",
                path.display()
            )));
        }
    }
    Ok(())
}

impl UpdateArgs {
    /// Validate the update command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_base_dir(&self.base_dir)?;
        if let Some(url) = &self.url {
            if url.trim().is_empty() {
                return Err(Error::configuration("URL cannot be empty".to_string()));
            }
        }
        Ok(())
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

impl ExportArgs {
    /// Validate the export command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_base_dir(&self.base_dir)?;
        validate_input(&self.input)
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}

impl SearchArgs {
    /// Validate the search command arguments for consistency
    pub fn validate(&self) -> Result<()> {
        validate_base_dir(&self.base_dir)?;
        validate_input(&self.input)
    }

    pub fn get_log_level(&self) -> &'static str {
        log_level(self.verbose, self.quiet)
    }
}
