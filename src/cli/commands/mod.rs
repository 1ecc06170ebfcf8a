//! Command implementations for the municipio processor CLI
//!
//! Each subcommand lives in its own module; `shared` carries the logging
//! setup and console helpers they have in common.

pub mod export;
pub mod search;
pub mod shared;
pub mod update;

use crate::cli::args::{Args, Commands};
use crate::Result;

/// Dispatch to the subcommand handler selected on the command line
pub fn run(args: Args) -> Result<()> {
    match args.command.expect("command presence checked by caller") {
        Commands::Update(update_args) => update::run_update(update_args),
        Commands::Export(export_args) => export::run_export(export_args),
        Commands::Search(search_args) => search::run_search(search_args),
    }
}
