//! Binary entry point for the `jelly` command-line tool.
//!
//! Parses arguments, initializes logging, and dispatches to the subcommand
//! implementations in [`jelly::cli`]. Exit code 0 on success; any
//! conformance, I/O or usage error exits non-zero.

use clap::Parser;
use tracing_subscriber::EnvFilter;

use jelly::cli::args::Cli;

fn init_logging(verbose: u8) {
    let default_level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose);
    if let Err(err) = jelly::cli::run(cli) {
        eprintln!("jelly: {err:#}");
        std::process::exit(1);
    }
}
