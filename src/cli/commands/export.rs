//! Export command: partition the baseline by state into three formats

use colored::Colorize;
use std::time::Instant;

use super::shared::{format_elapsed, resolve_config, setup_logging};
use crate::app::services::{decoder, exporter};
use crate::cli::args::ExportArgs;
use crate::Result;

/// Run the export workflow
pub fn run_export(args: ExportArgs) -> Result<()> {
    args.validate()?;
    setup_logging(args.get_log_level())?;
    let started = Instant::now();

    let mut config = resolve_config(&args.base_dir);
    if let Some(output) = &args.output {
        config = config.with_output_dir(output.clone());
    }
    config.validate()?;
    config.ensure_directories()?;

    let baseline = args.input.clone().unwrap_or_else(|| config.baseline_path());

    println!("Reading and decoding the baseline...");
    let decoded = decoder::decode_file(&baseline)?;
    println!("Records decoded: {}", decoded.records.len());

    println!("\nGenerating per-state artifacts (CSV/JSON/BIN)...");
    let stats = exporter::export_partitions(&decoded.records, &config.output_dir)?;

    println!("\n{}", "===== SUMMARY =====".bold());
    println!("States written:    {}", stats.partitions_written);
    println!("Records exported:  {}", stats.records_exported);
    println!("Records filtered:  {}", stats.records_filtered);
    println!("Output directory:  {}", config.output_dir.display());
    println!("Elapsed:           {}", format_elapsed(started.elapsed()));

    Ok(())
}
