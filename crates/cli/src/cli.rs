use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

/// Check, format and query configuration documents.
#[derive(Parser, Debug)]
#[command(name = "orrery")]
#[command(version, about)]
pub struct Cli {
	/// Verbose logging
	#[arg(short, long, global = true)]
	pub verbose: bool,

	#[command(subcommand)]
	pub command: Command,
}

#[derive(Subcommand, Debug)]
pub enum Command {
	/// Parse documents and report syntax errors
	Check {
		#[arg(required = true, value_name = "FILE")]
		files: Vec<PathBuf>,
	},
	/// Rewrite a document in canonical layout
	Fmt {
		#[arg(value_name = "FILE")]
		file: PathBuf,

		/// Write the result back to the file instead of stdout
		#[arg(short, long, conflicts_with = "check")]
		write: bool,

		/// Exit with an error if the file is not already formatted
		#[arg(long)]
		check: bool,
	},
	/// Print the value or block at a dotted path such as `Body.Orbit.eccentricity`
	Get {
		#[arg(value_name = "FILE")]
		file: PathBuf,

		#[arg(value_name = "PATH")]
		path: String,

		/// Decode the value as this type and print it normalized
		#[arg(long = "as", value_name = "TYPE")]
		kind: Option<ValueKind>,
	},
}

/// Scalar types `get --as` can decode.
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ValueKind {
	Bool,
	Int,
	Float,
	Color,
	Color32,
	Vector2,
	Vector3,
	Vector4,
	Quaternion,
	Curve,
}
