//! Application constants for the municipio processor
//!
//! This module contains the dataset source location, directory layout
//! defaults, and format constants used throughout the application.

// =============================================================================
// Source Dataset
// =============================================================================

/// Published location of the Receita Federal municipality dataset
pub const SOURCE_URL: &str = "https://www.gov.br/receitafederal/dados/municipios.csv";

/// Field separator used by the source file and the per-state CSV artifacts
pub const FIELD_SEPARATOR: char = ';';

/// Number of columns a source line must provide to yield a record
pub const MIN_FIELD_COUNT: usize = 5;

/// Column-name tokens that identify a header line (matched case-insensitively)
pub const HEADER_TOKENS: &[&str] = &["IBGE", "UF"];

// =============================================================================
// Directory and File Layout
// =============================================================================

/// Directory holding the baseline and incoming snapshots
pub const DATA_DIR_NAME: &str = "dados_receita";

/// Directory receiving the per-state artifacts
pub const OUTPUT_DIR_NAME: &str = "mun_por_uf";

/// Directory receiving timestamped diff artifacts
pub const DIFF_DIR_NAME: &str = "diffs";

/// Baseline snapshot file name
pub const BASELINE_FILE_NAME: &str = "municipios_base.csv";

/// Incoming (freshly downloaded) snapshot file name
pub const INCOMING_FILE_NAME: &str = "municipios_tmp.csv";

/// Timestamp format for diff artifact names (sortable)
pub const DIFF_STAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

// =============================================================================
// Partitioning and Artifacts
// =============================================================================

/// State code marking extraterritorial/foreign entries, excluded from
/// partitioned output and queries
pub const RESERVED_STATE_CODE: &str = "EX";

/// Header row of the per-state and source CSV layout
pub const CSV_HEADER: &str = "TOM;IBGE;NomeTOM;NomeIBGE;UF";

/// Header row of the diff artifact
pub const DIFF_HEADER: &str = "Tipo;TOM;IBGE;NomeTOM;NomeIBGE;UF;Obs";

/// File-name stem of the per-state artifacts (`municipios_<UF>.<ext>`)
pub const PARTITION_FILE_STEM: &str = "municipios";

// =============================================================================
// Query Engine
// =============================================================================

/// Maximum number of records a single query returns
pub const MAX_QUERY_RESULTS: usize = 200;

/// Required length of a state-query argument
pub const STATE_CODE_LEN: usize = 2;
