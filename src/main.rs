// Entrypoint for the CLI application.
// - Keeps `main` small: parse flags, set up logging, hand off to `cli::run`.
// - Returns `anyhow::Result` so library errors surface with context.

mod cli;

use clap::Parser;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    let args = cli::Cli::parse();
    cli::init_tracing(&args);
    cli::run(args)
}
