//! Binary entry point for the `lz4` command-line tool.
//!
//! 1. `clap` parses the arguments into [`Args`].
//! 2. A `tracing-subscriber` formatter is installed on stderr; its filter
//!    comes from `RUST_LOG` when set, else from `-v`/`-q`.
//! 3. [`run`] performs the operation and the exit code reports the outcome.

use std::process::ExitCode;

use clap::Parser;
use tracing::error;
use tracing_subscriber::EnvFilter;

use lz4::cli::args::Args;
use lz4::cli::run;
use lz4::config::Settings;

fn level_filter(verbosity: i32) -> &'static str {
    match verbosity {
        i32::MIN..=0 => "off",
        1 => "error",
        2 => "warn",
        3 => "info",
        4 => "debug",
        _ => "trace",
    }
}

fn init_logging(verbosity: i32) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(level_filter(verbosity)));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .without_time()
        .init();
}

fn main() -> ExitCode {
    let args = Args::parse();
    init_logging(args.verbosity());
    let settings = Settings::from_env();

    match run(&args, &settings) {
        Ok(_) => ExitCode::SUCCESS,
        Err(err) => {
            error!("{err:#}");
            ExitCode::FAILURE
        }
    }
}
