//! Data model for the municipality reference dataset
//!
//! This module contains the [`Municipality`] record and its derived fields,
//! the identity key used to correlate records across snapshots, and the
//! reconciliation rules used by the differ.

use serde::{Deserialize, Serialize};

/// A single municipality entry from the Receita Federal dataset
///
/// All fields are trimmed on construction and never null; absent values are
/// carried as empty strings. The state code is normalized to upper-case.
/// Records are immutable once constructed; snapshot updates are modeled as
/// replacement collections, never in-place mutation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Municipality {
    /// Legacy internal municipality code (TOM)
    pub tom_code: String,

    /// Official 7-digit IBGE municipality code
    pub ibge_code: String,

    /// Municipality name as recorded in the TOM table
    pub name_tom: String,

    /// Municipality name as recorded by IBGE
    pub name_ibge: String,

    /// Two-letter state code, upper-case
    pub state_code: String,
}

fn sanitize(raw: &str) -> String {
    raw.trim().to_string()
}

/// Ordinal case-insensitive comparison; accents stay significant
fn eq_ignore_case(a: &str, b: &str) -> bool {
    a.to_lowercase() == b.to_lowercase()
}

impl Municipality {
    /// Construct a record from five raw string fields split from one line
    pub fn from_fields(
        tom_code: &str,
        ibge_code: &str,
        name_tom: &str,
        name_ibge: &str,
        state_code: &str,
    ) -> Self {
        Self {
            tom_code: sanitize(tom_code),
            ibge_code: sanitize(ibge_code),
            name_tom: sanitize(name_tom),
            name_ibge: sanitize(name_ibge),
            state_code: sanitize(state_code).to_uppercase(),
        }
    }

    /// The display name: IBGE name if present, else TOM name, else empty
    pub fn preferred_name(&self) -> &str {
        if !self.name_ibge.trim().is_empty() {
            &self.name_ibge
        } else if !self.name_tom.trim().is_empty() {
            &self.name_tom
        } else {
            ""
        }
    }

    /// Identity key used to correlate records across snapshots
    ///
    /// Keyed on the IBGE code when present, falling back to the TOM code.
    /// Two records sharing a key are the same logical municipality.
    pub fn identity_key(&self) -> String {
        if self.ibge_code.trim().is_empty() {
            format!("T:{}", self.tom_code)
        } else {
            format!("I:{}", self.ibge_code)
        }
    }

    /// Reconciliation equality: both names and the state compared
    /// case-insensitively
    ///
    /// Codes are not compared; this predicate only runs after key correlation
    /// has already matched them.
    pub fn reconciles_with(&self, other: &Municipality) -> bool {
        eq_ignore_case(&self.name_tom, &other.name_tom)
            && eq_ignore_case(&self.name_ibge, &other.name_ibge)
            && eq_ignore_case(&self.state_code, &other.state_code)
    }

    /// Pipe-delimited summary of the fields that differ between two snapshots
    ///
    /// One `"<Field>: '<old>' -> '<new>'"` entry per differing field among
    /// NomeTOM, NomeIBGE and UF, trimmed of trailing separators.
    pub fn field_changes(&self, other: &Municipality) -> String {
        let mut summary = String::new();
        if !eq_ignore_case(&self.name_tom, &other.name_tom) {
            summary.push_str(&format!(
                "NomeTOM: '{}' -> '{}' | ",
                self.name_tom, other.name_tom
            ));
        }
        if !eq_ignore_case(&self.name_ibge, &other.name_ibge) {
            summary.push_str(&format!(
                "NomeIBGE: '{}' -> '{}' | ",
                self.name_ibge, other.name_ibge
            ));
        }
        if !eq_ignore_case(&self.state_code, &other.state_code) {
            summary.push_str(&format!(
                "UF: '{}' -> '{}' | ",
                self.state_code, other.state_code
            ));
        }
        summary.trim_end_matches(|c| c == ' ' || c == '|').to_string()
    }
}
