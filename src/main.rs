use clap::Parser;
use extdust::cli::{Cli, run_cli};
use extdust::output::OutputFormatter;
use std::process;

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run_cli(&cli) {
        OutputFormatter::error(&e);
        process::exit(1);
    }
}
