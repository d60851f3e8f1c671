//! `orrery` command line tool.
//!
//! Works on configuration documents in the block text format: syntax
//! checking, canonical formatting and dotted-path queries.

use clap::Parser;

mod cli;
mod commands;

use cli::{Cli, Command};

fn main() -> anyhow::Result<()> {
	let cli = Cli::parse();
	setup_tracing(cli.verbose);

	match cli.command {
		Command::Check { files } => commands::run_check(&files),
		Command::Fmt { file, write, check } => commands::run_fmt(&file, write, check),
		Command::Get { file, path, kind } => commands::run_get(&file, &path, kind),
	}
}

fn setup_tracing(verbose: bool) {
	use tracing_subscriber::EnvFilter;

	let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
		if verbose {
			EnvFilter::new("debug")
		} else {
			EnvFilter::new("info")
		}
	});

	tracing_subscriber::fmt()
		.with_env_filter(filter)
		.with_writer(std::io::stderr)
		.with_target(false)
		.init();
}
