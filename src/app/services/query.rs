//! Ad-hoc lookup over the valid record set
//!
//! Three query shapes — by state, by name substring, by exact code — each
//! capped at [`MAX_QUERY_RESULTS`] rows with a truncation flag. Results keep
//! the relative order of the underlying collection; nothing is resorted.

use std::str::FromStr;

use crate::app::models::Municipality;
use crate::constants::{MAX_QUERY_RESULTS, STATE_CODE_LEN};
use crate::{Error, Result};

/// Recognized query verbs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QueryVerb {
    /// Exact case-insensitive match on the state code
    State,
    /// Case-insensitive substring match on either name field
    Name,
    /// Exact case-insensitive match on the IBGE or TOM code
    Code,
}

impl FromStr for QueryVerb {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_lowercase().as_str() {
            "state" => Ok(QueryVerb::State),
            "name" => Ok(QueryVerb::Name),
            "code" => Ok(QueryVerb::Code),
            other => Err(Error::invalid_query(format!(
                "Unknown command '{}'. Available commands: state, name, code",
                other
            ))),
        }
    }
}

/// Bounded result of one query
#[derive(Debug, Clone, Default)]
pub struct QueryHits {
    /// Matching records in underlying collection order, at most
    /// [`MAX_QUERY_RESULTS`]
    pub records: Vec<Municipality>,
    /// True when more matches existed than were returned
    pub truncated: bool,
}

/// Run a query against the valid record collection
///
/// A wrong-shaped argument (state code not exactly two characters, blank
/// name or code) yields an empty result, not an error; only an unknown verb
/// is surfaced as [`Error::InvalidQuery`] by [`QueryVerb::from_str`].
pub fn run(verb: QueryVerb, argument: &str, records: &[Municipality]) -> QueryHits {
    let argument = argument.trim();

    let matches: Box<dyn Fn(&Municipality) -> bool> = match verb {
        QueryVerb::State => {
            if argument.chars().count() != STATE_CODE_LEN {
                return QueryHits::default();
            }
            let wanted = argument.to_lowercase();
            Box::new(move |m| m.state_code.to_lowercase() == wanted)
        }
        QueryVerb::Name => {
            if argument.is_empty() {
                return QueryHits::default();
            }
            let wanted = argument.to_lowercase();
            Box::new(move |m| {
                m.name_tom.to_lowercase().contains(&wanted)
                    || m.name_ibge.to_lowercase().contains(&wanted)
            })
        }
        QueryVerb::Code => {
            if argument.is_empty() {
                return QueryHits::default();
            }
            let wanted = argument.to_lowercase();
            Box::new(move |m| {
                m.ibge_code.to_lowercase() == wanted || m.tom_code.to_lowercase() == wanted
            })
        }
    };

    // Lazily bounded: one row past the cap decides the truncation flag
    let mut hits: Vec<Municipality> = records
        .iter()
        .filter(|m| matches(m))
        .take(MAX_QUERY_RESULTS + 1)
        .cloned()
        .collect();

    let truncated = hits.len() > MAX_QUERY_RESULTS;
    if truncated {
        hits.truncate(MAX_QUERY_RESULTS);
    }

    QueryHits {
        records: hits,
        truncated,
    }
}
