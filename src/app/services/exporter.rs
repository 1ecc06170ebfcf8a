//! Per-state partitioning and artifact generation
//!
//! Filters extraterritorial entries, groups the remaining records by state
//! and serializes each group to three artifacts: a semicolon-delimited CSV,
//! an indented JSON document and a compact length-prefixed binary file.
//!
//! Writes carry no partial-write recovery; a failure mid-export aborts the
//! run and leaves already-written partitions intact, since re-running the
//! export regenerates every group from the unchanged source collection.

use std::collections::HashMap;
use std::io::Write;
use std::path::Path;
use tracing::{debug, info};

use crate::app::models::Municipality;
use crate::constants::{CSV_HEADER, PARTITION_FILE_STEM, RESERVED_STATE_CODE};
use crate::{Error, Result};

/// Statistics for one export run
#[derive(Debug, Clone, Default)]
pub struct ExportStats {
    /// Number of state partitions written (three artifacts each)
    pub partitions_written: usize,
    /// Records serialized across all partitions
    pub records_exported: usize,
    /// Records excluded by the reserved-state filter
    pub records_filtered: usize,
}

/// Drop records carrying the reserved extraterritorial state code
pub fn filter_valid(records: &[Municipality]) -> Vec<Municipality> {
    records
        .iter()
        .filter(|m| !m.state_code.eq_ignore_ascii_case(RESERVED_STATE_CODE))
        .cloned()
        .collect()
}

/// Group records by state code and order them for export
///
/// Groups are keyed by upper-case state code and returned in ascending key
/// order; within a group, records are ordered by case-insensitive preferred
/// name. Grouping never drops a record.
pub fn partition_by_state(records: &[Municipality]) -> Vec<(String, Vec<Municipality>)> {
    let mut groups: HashMap<String, Vec<Municipality>> = HashMap::new();
    for record in records {
        groups
            .entry(record.state_code.to_uppercase())
            .or_default()
            .push(record.clone());
    }

    let mut partitions: Vec<(String, Vec<Municipality>)> = groups.into_iter().collect();
    partitions.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
    for (_, group) in &mut partitions {
        group.sort_by(|a, b| {
            a.preferred_name()
                .to_lowercase()
                .cmp(&b.preferred_name().to_lowercase())
        });
    }
    partitions
}

/// Export the collection as per-state CSV/JSON/binary artifacts
///
/// Applies the reserved-state filter, then writes
/// `municipios_<UF>.{csv,json,bin}` into `out_dir`, overwriting existing
/// artifacts. Returns the run statistics.
pub fn export_partitions(records: &[Municipality], out_dir: &Path) -> Result<ExportStats> {
    let valid = filter_valid(records);
    let mut stats = ExportStats {
        records_filtered: records.len() - valid.len(),
        ..Default::default()
    };

    for (state, group) in partition_by_state(&valid) {
        info!("UF {}: {} municipalities", state, group.len());

        write_csv_partition(out_dir, &state, &group)?;
        write_json_partition(out_dir, &state, &group)?;
        write_binary_partition(out_dir, &state, &group)?;

        stats.partitions_written += 1;
        stats.records_exported += group.len();
    }

    info!(
        "Export complete: {} partitions, {} records ({} filtered)",
        stats.partitions_written, stats.records_exported, stats.records_filtered
    );
    Ok(stats)
}

fn partition_path(out_dir: &Path, state: &str, extension: &str) -> std::path::PathBuf {
    out_dir.join(format!("{}_{}.{}", PARTITION_FILE_STEM, state, extension))
}

fn write_csv_partition(out_dir: &Path, state: &str, group: &[Municipality]) -> Result<()> {
    let path = partition_path(out_dir, state, "csv");
    let mut content = String::with_capacity(64 * (group.len() + 1));
    content.push_str(CSV_HEADER);
    content.push('\n');
    for m in group {
        // Fields are assumed separator-free; no escaping is applied.
        content.push_str(&format!(
            "{};{};{};{};{}\n",
            m.tom_code, m.ibge_code, m.name_tom, m.name_ibge, m.state_code
        ));
    }

    std::fs::write(&path, content)
        .map_err(|e| Error::io(format!("Failed to write '{}'", path.display()), e))?;
    debug!("CSV artifact written: {}", path.display());
    Ok(())
}

fn write_json_partition(out_dir: &Path, state: &str, group: &[Municipality]) -> Result<()> {
    let path = partition_path(out_dir, state, "json");
    let json = serde_json::to_string_pretty(group)
        .map_err(|e| Error::serialization(format!("Failed to serialize UF {}", state), e))?;

    std::fs::write(&path, json)
        .map_err(|e| Error::io(format!("Failed to write '{}'", path.display()), e))?;
    debug!("JSON artifact written: {}", path.display());
    Ok(())
}

fn write_binary_partition(out_dir: &Path, state: &str, group: &[Municipality]) -> Result<()> {
    let path = partition_path(out_dir, state, "bin");
    let file = std::fs::File::create(&path)
        .map_err(|e| Error::io(format!("Failed to create '{}'", path.display()), e))?;
    let mut out = std::io::BufWriter::new(file);

    out.write_all(&encode_binary(group))
        .and_then(|_| out.flush())
        .map_err(|e| Error::io(format!("Failed to write '{}'", path.display()), e))?;
    debug!("Binary artifact written: {}", path.display());
    Ok(())
}

/// Encode a record group in the compact binary layout
///
/// Layout: `u32` little-endian record count, then per record five
/// length-prefixed (`u32` LE byte length) UTF-8 strings in the order
/// `tom_code, ibge_code, name_tom, name_ibge, state_code`. Empty fields are
/// zero-length strings; the format has no null marker.
pub fn encode_binary(group: &[Municipality]) -> Vec<u8> {
    fn push_str(buf: &mut Vec<u8>, value: &str) {
        buf.extend_from_slice(&(value.len() as u32).to_le_bytes());
        buf.extend_from_slice(value.as_bytes());
    }

    let mut buf = Vec::new();
    buf.extend_from_slice(&(group.len() as u32).to_le_bytes());
    for m in group {
        push_str(&mut buf, &m.tom_code);
        push_str(&mut buf, &m.ibge_code);
        push_str(&mut buf, &m.name_tom);
        push_str(&mut buf, &m.name_ibge);
        push_str(&mut buf, &m.state_code);
    }
    buf
}

/// Decode a binary artifact back into records
///
/// Counterpart of [`encode_binary`], used to verify written artifacts.
pub fn decode_binary(bytes: &[u8]) -> Result<Vec<Municipality>> {
    fn malformed(message: &str) -> Error {
        Error::io(
            format!("Malformed binary artifact: {}", message),
            std::io::Error::from(std::io::ErrorKind::InvalidData),
        )
    }

    fn take<'a>(bytes: &'a [u8], pos: &mut usize, len: usize) -> Result<&'a [u8]> {
        let end = pos
            .checked_add(len)
            .filter(|&end| end <= bytes.len())
            .ok_or_else(|| malformed("truncated field"))?;
        let slice = &bytes[*pos..end];
        *pos = end;
        Ok(slice)
    }

    fn read_u32(bytes: &[u8], pos: &mut usize) -> Result<u32> {
        let raw = take(bytes, pos, 4)?;
        Ok(u32::from_le_bytes([raw[0], raw[1], raw[2], raw[3]]))
    }

    fn read_string(bytes: &[u8], pos: &mut usize) -> Result<String> {
        let len = read_u32(bytes, pos)? as usize;
        let raw = take(bytes, pos, len)?;
        String::from_utf8(raw.to_vec()).map_err(|_| malformed("field is not valid UTF-8"))
    }

    let mut pos = 0;
    let count = read_u32(bytes, &mut pos)? as usize;
    let mut records = Vec::with_capacity(count);
    for _ in 0..count {
        let tom = read_string(bytes, &mut pos)?;
        let ibge = read_string(bytes, &mut pos)?;
        let name_tom = read_string(bytes, &mut pos)?;
        let name_ibge = read_string(bytes, &mut pos)?;
        let state = read_string(bytes, &mut pos)?;
        records.push(Municipality::from_fields(
            &tom, &ibge, &name_tom, &name_ibge, &state,
        ));
    }

    if pos != bytes.len() {
        return Err(malformed("trailing bytes after last record"));
    }
    Ok(records)
}
