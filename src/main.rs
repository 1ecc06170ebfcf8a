use clap::Parser;
use municipio_processor::cli::{args::Args, commands};
use std::process;

fn main() {
    let args = Args::parse();

    // If no subcommand was provided, show help and available commands
    if args.command.is_none() {
        show_help_and_commands();
        process::exit(0);
    }

    match commands::run(args) {
        Ok(()) => process::exit(0),
        Err(error) => {
            eprintln!("Error: {:#}", anyhow::Error::new(error));
            process::exit(1);
        }
    }
}

/// Show help information and available commands when no subcommand is provided
fn show_help_and_commands() {
    println!("Municipio Processor - Receita Federal Municipality Dataset Tool");
    println!("===============================================================");
    println!();
    println!("Reconcile the Receita Federal reference dataset of Brazilian");
    println!("municipalities against a local baseline and partition it by state.");
    println!();
    println!("USAGE:");
    println!("    municipio-processor <COMMAND> [OPTIONS]");
    println!();
    println!("COMMANDS:");
    println!("    update      Download the dataset and reconcile it with the baseline");
    println!("    export      Partition the baseline by state into CSV/JSON/BIN artifacts");
    println!("    search      Interactive lookup by state, name or municipality code");
    println!("    help        Show this help message or help for specific commands");
    println!();
    println!("OPTIONS:");
    println!("    -h, --help       Show help information");
    println!("    -V, --version    Show version information");
    println!();
    println!("EXAMPLES:");
    println!("    # First run: download and save the baseline:");
    println!("    municipio-processor update");
    println!();
    println!("    # Generate per-state artifacts into a custom directory:");
    println!("    municipio-processor export --output /path/to/artifacts");
    println!();
    println!("    # Look up municipalities interactively:");
    println!("    municipio-processor search");
    println!();
    println!("For detailed help on any command, use:");
    println!("    municipio-processor <COMMAND> --help");
}
