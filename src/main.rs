//! codeport CLI entry point.

use clap::Parser;
use codeport::cli::{self, Cli, Commands, EXIT_ERROR};
use codeport::logging::{self, Verbosity};

fn main() {
    let cli = Cli::parse();
    logging::init(Verbosity::from_flags(cli.verbose, cli.quiet));

    let result = match &cli.command {
        Commands::Convert(args) => cli::run_convert(args),
        Commands::Analyze(args) => cli::run_analyze(args),
    };

    let exit_code = match result {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            EXIT_ERROR
        }
    };

    std::process::exit(exit_code);
}
