//! Decoder for the semicolon-delimited municipality file
//!
//! The source file is published with inconsistent encodings: most snapshots
//! are UTF-8, older ones are Latin-1. The decoder reads strict UTF-8 first
//! and falls back to a byte-preserving Latin-1 decode when replacement
//! markers show up, so decoding never fails for any byte sequence.

use std::path::Path;
use tracing::{debug, info, warn};

use crate::app::models::Municipality;
use crate::constants::{FIELD_SEPARATOR, HEADER_TOKENS, MIN_FIELD_COUNT};
use crate::{Error, Result};

/// Character encodings the decoder can settle on
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceEncoding {
    /// Primary encoding, rejected when replacement markers appear
    Utf8,
    /// Byte-preserving fallback accepting every byte value
    Latin1,
}

/// Statistics collected while decoding one snapshot
#[derive(Debug, Clone, Default)]
pub struct DecodeStats {
    /// Total lines in the decoded text
    pub total_lines: usize,
    /// Whether a header line was detected and skipped
    pub header_skipped: bool,
    /// Records produced
    pub records_decoded: usize,
    /// Blank or short lines silently dropped
    pub lines_skipped: usize,
}

/// Decoded records plus statistics for one snapshot
#[derive(Debug, Clone)]
pub struct DecodeResult {
    pub records: Vec<Municipality>,
    pub stats: DecodeStats,
    pub encoding: SourceEncoding,
}

/// Decode a snapshot file into municipality records
///
/// An unreadable path is fatal; every per-line malformation is tolerated
/// and dropped.
pub fn decode_file(path: &Path) -> Result<DecodeResult> {
    info!("Decoding snapshot: {}", path.display());

    if !path.exists() {
        return Err(Error::file_not_found(path.display().to_string()));
    }

    let bytes = std::fs::read(path)
        .map_err(|e| Error::io(format!("Failed to read '{}'", path.display()), e))?;

    let result = decode_bytes(&bytes);
    info!(
        "Decoded {} records from {} lines ({} skipped, encoding {:?})",
        result.stats.records_decoded,
        result.stats.total_lines,
        result.stats.lines_skipped,
        result.encoding
    );
    Ok(result)
}

/// Decode raw snapshot bytes into municipality records
///
/// Infallible: the Latin-1 fallback accepts all byte values, and malformed
/// lines are dropped rather than raised.
pub fn decode_bytes(bytes: &[u8]) -> DecodeResult {
    let (text, encoding) = decode_text(bytes);
    let mut stats = DecodeStats::default();
    let mut records = Vec::new();

    let mut lines = text.lines();

    // Header heuristic: the first line is skipped when it carries a known
    // column-name token. Not a schema check.
    if let Some(first) = lines.next() {
        stats.total_lines += 1;
        if is_header_line(first) {
            stats.header_skipped = true;
            debug!("Header line skipped: {:?}", first);
        } else {
            parse_line(first, &mut records, &mut stats);
        }
    }

    for line in lines {
        stats.total_lines += 1;
        parse_line(line, &mut records, &mut stats);
    }

    DecodeResult {
        records,
        stats,
        encoding,
    }
}

/// Decode bytes as strict UTF-8, falling back to Latin-1 on replacement
/// markers in the first line or anywhere in the stream
fn decode_text(bytes: &[u8]) -> (String, SourceEncoding) {
    let (text, _, had_errors) = encoding_rs::UTF_8.decode(bytes);

    let first_line_damaged = text.lines().next().is_some_and(|l| l.contains('\u{FFFD}'));
    if had_errors || first_line_damaged {
        warn!("UTF-8 decode produced replacement markers, retrying as Latin-1");
        return (
            encoding_rs::mem::decode_latin1(bytes).into_owned(),
            SourceEncoding::Latin1,
        );
    }

    (text.into_owned(), SourceEncoding::Utf8)
}

fn is_header_line(line: &str) -> bool {
    let upper = line.to_uppercase();
    HEADER_TOKENS.iter().any(|token| upper.contains(token))
}

fn parse_line(line: &str, records: &mut Vec<Municipality>, stats: &mut DecodeStats) {
    let line = line.trim();
    if line.is_empty() {
        stats.lines_skipped += 1;
        return;
    }

    let fields: Vec<&str> = line.split(FIELD_SEPARATOR).collect();
    if fields.len() < MIN_FIELD_COUNT {
        stats.lines_skipped += 1;
        debug!("Dropped short line ({} fields): {:?}", fields.len(), line);
        return;
    }

    records.push(Municipality::from_fields(
        fields[0], fields[1], fields[2], fields[3], fields[4],
    ));
    stats.records_decoded += 1;
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    const SAMPLE: &str = "TOM;IBGE;NomeTOM;NomeIBGE;UF\n\
                          7107;3550308;Sao Paulo;São Paulo;SP\n\
                          6001;3304557;Rio de Janeiro;Rio de Janeiro;RJ\n";

    #[test]
    fn test_decode_skips_header() {
        let result = decode_bytes(SAMPLE.as_bytes());
        assert!(result.stats.header_skipped);
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].name_ibge, "São Paulo");
        assert_eq!(result.records[1].state_code, "RJ");
    }

    #[test]
    fn test_decode_without_header() {
        let input = "7107;3550308;Sao Paulo;São Paulo;SP\n";
        let result = decode_bytes(input.as_bytes());
        assert!(!result.stats.header_skipped);
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_header_detection_is_case_insensitive() {
        let input = "tom;ibge;nometom;nomeibge;uf\n7107;3550308;A;B;SP\n";
        let result = decode_bytes(input.as_bytes());
        assert!(result.stats.header_skipped);
        assert_eq!(result.records.len(), 1);
    }

    #[test]
    fn test_blank_and_short_lines_are_dropped() {
        let input = "7107;3550308;Sao Paulo;São Paulo;SP\n\
                     \n\
                     garbage;line\n\
                     6001;3304557;Rio de Janeiro;Rio de Janeiro;RJ\n";
        let result = decode_bytes(input.as_bytes());
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.stats.lines_skipped, 2);
        assert_eq!(result.stats.total_lines, 4);
    }

    #[test]
    fn test_records_keep_file_order_without_dedup() {
        let input = "1;100;First;First;SP\n1;100;Second;Second;SP\n";
        let result = decode_bytes(input.as_bytes());
        assert_eq!(result.records.len(), 2);
        assert_eq!(result.records[0].name_tom, "First");
        assert_eq!(result.records[1].name_tom, "Second");
    }

    #[test]
    fn test_latin1_fallback_recovers_accents() {
        // "São Paulo" with 0xE3 for 'ã': invalid as UTF-8
        let mut bytes = Vec::new();
        bytes.extend_from_slice(b"7107;3550308;Sao Paulo;S");
        bytes.push(0xE3);
        bytes.extend_from_slice(b"o Paulo;SP\n");

        let result = decode_bytes(&bytes);
        assert_eq!(result.encoding, SourceEncoding::Latin1);
        assert_eq!(result.records.len(), 1);
        assert_eq!(result.records[0].name_ibge, "São Paulo");
    }

    #[test]
    fn test_utf8_input_stays_utf8() {
        let result = decode_bytes(SAMPLE.as_bytes());
        assert_eq!(result.encoding, SourceEncoding::Utf8);
    }

    #[test]
    fn test_arbitrary_bytes_never_fail() {
        let bytes: Vec<u8> = (0u8..=255).collect();
        // Must decode without panicking regardless of content
        let _ = decode_bytes(&bytes);
    }

    #[test]
    fn test_decode_file_missing_path_is_fatal() {
        let temp = TempDir::new().unwrap();
        let missing = temp.path().join("nope.csv");
        let result = decode_file(&missing);
        assert!(matches!(result, Err(crate::Error::FileNotFound { .. })));
    }

    #[test]
    fn test_decode_file_reads_records() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("base.csv");
        std::fs::write(&path, SAMPLE).unwrap();

        let result = decode_file(&path).unwrap();
        assert_eq!(result.records.len(), 2);
    }
}
