//! Snapshot reconciliation for the municipality dataset
//!
//! Compares two decoded snapshots by identity key and buckets the outcome
//! into additions, removals and field-level changes. Also writes the
//! timestamped diff artifact consumed by downstream review.

use std::collections::{HashMap, HashSet};
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::Municipality;
use crate::constants::DIFF_HEADER;
use crate::{Error, Result};

/// A record present in both snapshots whose compared fields differ
#[derive(Debug, Clone)]
pub struct ChangedRecord {
    /// Snapshot of the record in the baseline
    pub before: Municipality,
    /// Snapshot of the record in the incoming collection
    pub after: Municipality,
    /// Pipe-delimited field-change summary
    pub summary: String,
}

/// Outcome of comparing two snapshots
///
/// Bucket ordering follows the traversal order of the respective source
/// collection; consumers must not rely on it beyond that.
#[derive(Debug, Clone, Default)]
pub struct DiffReport {
    /// Keys present in the incoming snapshot only
    pub added: Vec<Municipality>,
    /// Keys present in the baseline only
    pub removed: Vec<Municipality>,
    /// Keys present in both with differing fields
    pub changed: Vec<ChangedRecord>,
}

impl DiffReport {
    /// True when the two snapshots reconcile completely
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty() && self.changed.is_empty()
    }

    /// Total number of rows the diff artifact will carry
    pub fn total(&self) -> usize {
        self.added.len() + self.removed.len() + self.changed.len()
    }
}

/// Index a snapshot by identity key, first occurrence winning on collisions
///
/// Later duplicates are dropped silently; they are not reported anywhere.
fn index_by_key(records: &[Municipality]) -> HashMap<String, &Municipality> {
    let mut index = HashMap::with_capacity(records.len());
    for record in records {
        index.entry(record.identity_key()).or_insert(record);
    }
    index
}

/// Compute the keyed three-way diff between a baseline and an incoming
/// snapshot
pub fn diff(old: &[Municipality], new: &[Municipality]) -> DiffReport {
    let old_index = index_by_key(old);
    let new_index = index_by_key(new);

    let mut report = DiffReport::default();
    let mut seen = HashSet::new();

    for record in new {
        let key = record.identity_key();
        if !seen.insert(key.clone()) {
            continue; // duplicate key, first occurrence already handled
        }
        match old_index.get(&key) {
            None => report.added.push(record.clone()),
            Some(previous) => {
                if !previous.reconciles_with(record) {
                    let summary = previous.field_changes(record);
                    debug!("Changed {}: {}", key, summary);
                    report.changed.push(ChangedRecord {
                        before: (*previous).clone(),
                        after: record.clone(),
                        summary,
                    });
                }
            }
        }
    }

    seen.clear();
    for record in old {
        let key = record.identity_key();
        if !seen.insert(key.clone()) {
            continue;
        }
        if !new_index.contains_key(&key) {
            report.removed.push(record.clone());
        }
    }

    info!(
        "Diff: {} added, {} removed, {} changed",
        report.added.len(),
        report.removed.len(),
        report.changed.len()
    );
    report
}

/// Write the diff artifact: `Tipo;TOM;IBGE;NomeTOM;NomeIBGE;UF;Obs`
///
/// `Obs` carries the field-change summary and is populated only on CHANGE
/// rows, which print the incoming snapshot's fields. Overwrites any existing
/// artifact at `path`.
pub fn write_diff_csv(path: &Path, report: &DiffReport) -> Result<()> {
    let file = std::fs::File::create(path)
        .map_err(|e| Error::io(format!("Failed to create diff file '{}'", path.display()), e))?;
    let mut out = std::io::BufWriter::new(file);

    let write_err =
        |e| Error::io(format!("Failed to write diff file '{}'", path.display()), e);

    writeln!(out, "{}", DIFF_HEADER).map_err(write_err)?;

    for m in &report.added {
        writeln!(
            out,
            "ADDITION;{};{};{};{};{};",
            m.tom_code, m.ibge_code, m.name_tom, m.name_ibge, m.state_code
        )
        .map_err(write_err)?;
    }

    for m in &report.removed {
        writeln!(
            out,
            "REMOVAL;{};{};{};{};{};",
            m.tom_code, m.ibge_code, m.name_tom, m.name_ibge, m.state_code
        )
        .map_err(write_err)?;
    }

    for change in &report.changed {
        let m = &change.after;
        writeln!(
            out,
            "CHANGE;{};{};{};{};{};{}",
            m.tom_code, m.ibge_code, m.name_tom, m.name_ibge, m.state_code, change.summary
        )
        .map_err(write_err)?;
    }

    out.flush().map_err(write_err)?;
    info!("Diff artifact written: {}", path.display());
    Ok(())
}
