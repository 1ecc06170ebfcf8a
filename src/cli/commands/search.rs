//! Search command: interactive lookup over the baseline dataset
//!
//! A small read-eval-print loop bound to the query engine. Invalid verbs
//! print a message and keep the loop alive; only `exit`/`quit` (or EOF on
//! standard input) terminate it.

use colored::Colorize;
use std::str::FromStr;

use super::shared::{resolve_config, setup_logging};
use crate::app::services::{decoder, exporter, query};
use crate::app::services::query::QueryVerb;
use crate::cli::args::SearchArgs;
use crate::cli::input::{read_command, split_command};
use crate::constants::MAX_QUERY_RESULTS;
use crate::Result;

/// Run the interactive search loop
pub fn run_search(args: SearchArgs) -> Result<()> {
    args.validate()?;
    setup_logging(args.get_log_level())?;

    let config = resolve_config(&args.base_dir);
    let baseline = args.input.clone().unwrap_or_else(|| config.baseline_path());

    let decoded = decoder::decode_file(&baseline)?;
    let records = exporter::filter_valid(&decoded.records);
    println!("Loaded {} municipalities.", records.len());

    print_help();

    loop {
        let line = match read_command("\n> ")? {
            Some(line) => line,
            None => break, // EOF
        };
        if line.is_empty() {
            continue;
        }
        if line.eq_ignore_ascii_case("exit") || line.eq_ignore_ascii_case("quit") {
            break;
        }

        let (verb, argument) = split_command(&line);
        let verb = match QueryVerb::from_str(verb) {
            Ok(verb) => verb,
            Err(e) => {
                println!("{}", e.to_string().red());
                continue;
            }
        };

        let hits = query::run(verb, argument, &records);
        if hits.records.is_empty() {
            println!("No results.");
            continue;
        }

        for m in &hits.records {
            println!(
                "{:<2} | {:<7} | {:<6} | {}",
                m.state_code,
                m.ibge_code,
                m.tom_code,
                m.preferred_name()
            );
        }
        if hits.truncated {
            println!("(showing the first {} results only)", MAX_QUERY_RESULTS);
        }
    }

    Ok(())
}

fn print_help() {
    println!("\nCommands:");
    println!("  state <UF>       -> list every municipality of a state");
    println!("  name <part>      -> search by name fragment (TOM/IBGE)");
    println!("  code <IBGE|TOM>  -> search by exact code (e.g. 3550308)");
    println!("  exit             -> leave the search loop");
}
