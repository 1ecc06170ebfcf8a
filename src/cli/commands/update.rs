//! Update command: download the dataset and reconcile it with the baseline
//!
//! First run saves the download as the baseline. Later runs download into a
//! temporary snapshot, diff it against the baseline and write a timestamped
//! diff artifact when differences exist. The temporary snapshot is removed
//! afterwards either way; the baseline itself is never replaced
//! automatically.

use colored::Colorize;
use tracing::{info, warn};

use super::shared::{resolve_config, setup_logging};
use crate::app::services::{decoder, differ, fetcher};
use crate::cli::args::UpdateArgs;
use crate::constants::DIFF_STAMP_FORMAT;
use crate::Result;

/// Run the update workflow
pub fn run_update(args: UpdateArgs) -> Result<()> {
    args.validate()?;
    setup_logging(args.get_log_level())?;

    let mut config = resolve_config(&args.base_dir);
    if let Some(url) = &args.url {
        config = config.with_source_url(url.clone());
    }
    config.validate()?;
    config.ensure_directories()?;

    let baseline = config.baseline_path();

    if !baseline.exists() {
        println!("No local baseline found. Downloading and saving as baseline...");
        fetcher::fetch_to_file(&config.source_url, &baseline)?;
        println!("Baseline saved: {}", baseline.display().to_string().green());
        return Ok(());
    }

    println!("Local baseline found. Downloading snapshot for comparison...");
    let incoming = config.incoming_path();
    fetcher::fetch_to_file(&config.source_url, &incoming)?;

    let old = decoder::decode_file(&baseline)?;
    let new = decoder::decode_file(&incoming)?;
    info!(
        "Comparing {} baseline records against {} incoming records",
        old.records.len(),
        new.records.len()
    );

    let report = differ::diff(&old.records, &new.records);

    if report.is_empty() {
        println!("{}", "No differences detected. Keeping current baseline.".green());
    } else {
        let stamp = chrono::Local::now().format(DIFF_STAMP_FORMAT);
        let diff_path = config.diff_dir.join(format!("diff_{}.csv", stamp));
        differ::write_diff_csv(&diff_path, &report)?;

        println!(
            "{} {} added, {} removed, {} changed",
            "Differences found:".yellow(),
            report.added.len(),
            report.removed.len(),
            report.changed.len()
        );
        println!("Diff artifact: {}", diff_path.display());
    }

    remove_snapshot(&incoming);
    Ok(())
}

/// Best-effort removal of the temporary snapshot; failure is not fatal
fn remove_snapshot(path: &std::path::Path) {
    if path.exists() {
        if let Err(e) = std::fs::remove_file(path) {
            warn!("Could not remove temporary snapshot '{}': {}", path.display(), e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_remove_snapshot_is_best_effort() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("municipios_tmp.csv");

        // Missing file: nothing to do, no panic
        remove_snapshot(&path);

        std::fs::write(&path, "7107;3550308;Sao Paulo;São Paulo;SP\n").unwrap();
        remove_snapshot(&path);
        assert!(!path.exists());
    }
}
