//! End-to-end pipeline tests over temporary directories
//!
//! These exercise the decode -> diff -> export -> query flow with realistic
//! dataset fixtures, verifying the cross-component properties a consumer of
//! the artifacts depends on.

use municipio_processor::app::services::{decoder, differ, exporter, query};
use municipio_processor::app::services::query::QueryVerb;
use municipio_processor::Municipality;
use std::collections::HashSet;
use tempfile::TempDir;

const FIXTURE: &str = "TOM;IBGE;NomeTOM;NomeIBGE;UF\n\
                       001;3550308;Sao Paulo;São Paulo;sp\n\
                       002;3304557;Rio de Janeiro;Rio de Janeiro;RJ\n";

fn key_set(records: &[Municipality]) -> HashSet<String> {
    records.iter().map(|m| m.identity_key()).collect()
}

/// Purpose: validate the end-to-end scenario of decoding, partitioning and
/// the exact CSV artifact layout for a two-state fixture.
#[test]
fn test_decode_partition_and_csv_artifact() {
    let temp = TempDir::new().unwrap();
    let source = temp.path().join("municipios_base.csv");
    std::fs::write(&source, FIXTURE).unwrap();

    let decoded = decoder::decode_file(&source).unwrap();
    assert_eq!(decoded.records.len(), 2);

    let out_dir = temp.path().join("out");
    std::fs::create_dir(&out_dir).unwrap();
    let stats = exporter::export_partitions(&decoded.records, &out_dir).unwrap();
    assert_eq!(stats.partitions_written, 2);

    let sp_csv = std::fs::read_to_string(out_dir.join("municipios_SP.csv")).unwrap();
    let lines: Vec<&str> = sp_csv.lines().collect();
    assert_eq!(lines[0], "TOM;IBGE;NomeTOM;NomeIBGE;UF");
    assert_eq!(lines[1], "001;3550308;Sao Paulo;São Paulo;SP");
    assert_eq!(lines.len(), 2);

    let rj_csv = std::fs::read_to_string(out_dir.join("municipios_RJ.csv")).unwrap();
    assert_eq!(rj_csv.lines().count(), 2);
}

/// Purpose: the JSON artifact round-trips to an equal record set, ignoring
/// ordering.
#[test]
fn test_structured_artifact_round_trips() {
    let temp = TempDir::new().unwrap();
    let decoded = decoder::decode_bytes(FIXTURE.as_bytes());

    exporter::export_partitions(&decoded.records, temp.path()).unwrap();

    let mut recovered = Vec::new();
    for state in ["SP", "RJ"] {
        let json =
            std::fs::read_to_string(temp.path().join(format!("municipios_{}.json", state)))
                .unwrap();
        let group: Vec<Municipality> = serde_json::from_str(&json).unwrap();
        recovered.extend(group);
    }

    let expected: HashSet<Municipality> = decoded.records.iter().cloned().collect();
    let actual: HashSet<Municipality> = recovered.into_iter().collect();
    assert_eq!(expected, actual);
}

/// Purpose: the binary artifact round-trips through the provided reader.
#[test]
fn test_binary_artifact_round_trips() {
    let temp = TempDir::new().unwrap();
    let decoded = decoder::decode_bytes(FIXTURE.as_bytes());
    exporter::export_partitions(&decoded.records, temp.path()).unwrap();

    let bytes = std::fs::read(temp.path().join("municipios_SP.bin")).unwrap();
    let group = exporter::decode_binary(&bytes).unwrap();
    assert_eq!(group.len(), 1);
    assert_eq!(group[0].name_ibge, "São Paulo");
    assert_eq!(group[0].state_code, "SP");
}

/// Purpose: diff of a collection against itself is empty, for realistic and
/// degenerate inputs alike.
#[test]
fn test_self_diff_is_empty() {
    for input in [FIXTURE, "", "garbage\n\n;;;\n"] {
        let decoded = decoder::decode_bytes(input.as_bytes());
        assert!(differ::diff(&decoded.records, &decoded.records).is_empty());
    }
}

/// Purpose: added/removed are anti-symmetric under operand swap.
#[test]
fn test_diff_anti_symmetry() {
    let a = decoder::decode_bytes(FIXTURE.as_bytes()).records;
    let b = decoder::decode_bytes(
        "001;3550308;Sao Paulo;São Paulo;SP\n003;3106200;Belo Horizonte;Belo Horizonte;MG\n"
            .as_bytes(),
    )
    .records;

    let ab = differ::diff(&a, &b);
    let ba = differ::diff(&b, &a);
    assert_eq!(key_set(&ab.added), key_set(&ba.removed));
    assert_eq!(key_set(&ab.removed), key_set(&ba.added));
}

/// Purpose: an accent-only rename is a significant change and lands in the
/// diff artifact's Obs column.
#[test]
fn test_accent_change_reaches_diff_artifact() {
    let temp = TempDir::new().unwrap();
    let old = decoder::decode_bytes("001;3550308;Sao Paulo;São Paulo;SP\n".as_bytes()).records;
    let new = decoder::decode_bytes("001;3550308;Sao Paulo;Sao Paulo;SP\n".as_bytes()).records;

    let report = differ::diff(&old, &new);
    assert_eq!(report.changed.len(), 1);
    assert!(report.added.is_empty() && report.removed.is_empty());

    let diff_path = temp.path().join("diff_20250101_000000.csv");
    differ::write_diff_csv(&diff_path, &report).unwrap();

    let content = std::fs::read_to_string(&diff_path).unwrap();
    let change_row = content
        .lines()
        .find(|l| l.starts_with("CHANGE;"))
        .expect("change row present");
    assert!(change_row.contains("NomeIBGE: 'São Paulo' -> 'Sao Paulo'"));
}

/// Purpose: partition grouping never drops a non-reserved record, and the
/// reserved-state filter accounts for every excluded one.
#[test]
fn test_export_preserves_record_counts() {
    let input = "001;3550308;Sao Paulo;São Paulo;SP\n\
                 900;0000001;Consulado;Consulado;EX\n\
                 002;3304557;Rio de Janeiro;Rio de Janeiro;RJ\n\
                 003;3509502;Campinas;Campinas;SP\n\
                 901;0000002;Embaixada;Embaixada;ex\n";
    let records = decoder::decode_bytes(input.as_bytes()).records;

    let temp = TempDir::new().unwrap();
    let stats = exporter::export_partitions(&records, temp.path()).unwrap();
    assert_eq!(
        stats.records_exported + stats.records_filtered,
        records.len()
    );
    assert_eq!(stats.records_filtered, 2);
}

/// Purpose: within every exported partition, records are non-decreasing by
/// case-insensitive preferred name.
#[test]
fn test_partitions_are_ordered_by_preferred_name() {
    let input = "004;3552205;sorocaba;sorocaba;SP\n\
                 001;3550308;Sao Paulo;São Paulo;SP\n\
                 003;3509502;Campinas;Campinas;SP\n\
                 005;3543402;Ribeirao Preto;Ribeirão Preto;SP\n";
    let records = decoder::decode_bytes(input.as_bytes()).records;

    let temp = TempDir::new().unwrap();
    exporter::export_partitions(&records, temp.path()).unwrap();

    let csv = std::fs::read_to_string(temp.path().join("municipios_SP.csv")).unwrap();
    let names: Vec<String> = csv
        .lines()
        .skip(1)
        .map(|l| l.split(';').nth(3).unwrap().to_lowercase())
        .collect();

    let mut sorted = names.clone();
    sorted.sort();
    assert_eq!(names, sorted);
}

/// Purpose: query behavior over the filtered collection — exact state match,
/// wrong-shaped arguments, and source-order results.
#[test]
fn test_query_over_filtered_collection() {
    let input = "001;3550308;Sao Paulo;São Paulo;SP\n\
                 900;0000001;Consulado;Consulado;EX\n\
                 002;3304557;Rio de Janeiro;Rio de Janeiro;RJ\n\
                 003;3509502;Campinas;Campinas;SP\n";
    let decoded = decoder::decode_bytes(input.as_bytes());
    let valid = exporter::filter_valid(&decoded.records);

    let hits = query::run(QueryVerb::State, "SP", &valid);
    assert_eq!(hits.records.len(), 2);
    assert!(hits.records.iter().all(|m| m.state_code == "SP"));
    assert_eq!(hits.records[0].tom_code, "001");

    // Three-character argument: empty, not an error
    let hits = query::run(QueryVerb::State, "SPX", &valid);
    assert!(hits.records.is_empty());

    // The reserved state never surfaces, even when asked for directly
    let hits = query::run(QueryVerb::State, "EX", &valid);
    assert!(hits.records.is_empty());
}

/// Purpose: Latin-1 encoded input decodes to the same records as UTF-8
/// input.
#[test]
fn test_latin1_and_utf8_inputs_agree() {
    let utf8 = "001;3550308;Sao Paulo;São Paulo;SP\n";
    let latin1: Vec<u8> = utf8
        .chars()
        .map(|c| {
            let code = c as u32;
            assert!(code < 256, "fixture must stay within Latin-1");
            code as u8
        })
        .collect();

    let from_utf8 = decoder::decode_bytes(utf8.as_bytes());
    let from_latin1 = decoder::decode_bytes(&latin1);
    assert_eq!(from_utf8.records, from_latin1.records);
}
