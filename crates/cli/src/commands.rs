use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, bail};
use orrery_node::{Node, ParseError, parse};
use orrery_scalar::{
	Color, Color32, Curve, Quaternion, Scalar, ScalarError, Vector2, Vector3, Vector4,
};

use crate::cli::ValueKind;


/// Block and value counts of a parsed document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
	pub blocks: usize,
	pub values: usize,
}

impl Summary {
	fn of(node: &Node) -> Self {
		node.children().iter().fold(
			Self {
				blocks: 0,
				values: node.entries().len(),
			},
			|acc, child| {
				let inner = Self::of(child);
				Self {
					blocks: acc.blocks + 1 + inner.blocks,
					values: acc.values + inner.values,
				}
			},
		)
	}
}

/// What a dotted path points at.
#[derive(Debug, PartialEq, Eq)]
pub enum Lookup<'a> {
	/// Every value under the final key, in document order.
	Values(Vec<&'a str>),
	Block(&'a Node),
}

pub fn summarize(text: &str) -> Result<Summary, ParseError> {
	parse(text).map(|root| Summary::of(&root))
}

/// Renders `text` in canonical layout.
pub fn format(text: &str) -> Result<String, ParseError> {
	parse(text).map(|root| root.render_document())
}

/// Resolves `path` below `root`.
///
/// All segments but the last name blocks. The last one names a key, or a
/// block when the parent holds no value under it.
pub fn lookup<'a>(root: &'a Node, path: &str) -> Option<Lookup<'a>> {
	let (parent, last) = match path.rsplit_once('.') {
		Some((parent, last)) => (root.find(parent)?, last),
		None => (root, path),
	};
	if parent.has_value(last) {
		return Some(Lookup::Values(parent.values(last).collect()));
	}
	parent.node(last).map(Lookup::Block)
}

/// Decodes `raw` as `kind` and re-encodes it.
pub fn normalize(kind: ValueKind, raw: &str) -> Result<String, ScalarError> {
	fn round_trip<T: Scalar>(raw: &str) -> Result<String, ScalarError> {
		T::decode(raw).map(|value| value.encode())
	}

	match kind {
		ValueKind::Bool => round_trip::<bool>(raw),
		ValueKind::Int => round_trip::<i64>(raw),
		ValueKind::Float => round_trip::<f64>(raw),
		ValueKind::Color => round_trip::<Color>(raw),
		ValueKind::Color32 => round_trip::<Color32>(raw),
		ValueKind::Vector2 => round_trip::<Vector2>(raw),
		ValueKind::Vector3 => round_trip::<Vector3>(raw),
		ValueKind::Vector4 => round_trip::<Vector4>(raw),
		ValueKind::Quaternion => round_trip::<Quaternion>(raw),
		ValueKind::Curve => round_trip::<Curve>(raw),
	}
}

fn read(path: &Path) -> anyhow::Result<String> {
	fs::read_to_string(path).with_context(|| format!("failed to read {}", path.display()))
}

fn read_document(path: &Path) -> anyhow::Result<Node> {
	let text = read(path)?;
	parse(&text).with_context(|| format!("failed to parse {}", path.display()))
}

pub fn run_check(files: &[PathBuf]) -> anyhow::Result<()> {
	let mut failed = 0;
	for file in files {
		let text = read(file)?;
		match summarize(&text) {
			Ok(summary) => {
				tracing::debug!(file = %file.display(), blocks = summary.blocks, values = summary.values, "parsed");
				println!("{}: ok", file.display());
			}
			Err(err) => {
				failed += 1;
				eprintln!("{}:{err}", file.display());
			}
		}
	}
	if failed > 0 {
		bail!("{failed} of {} files failed to parse", files.len());
	}
	Ok(())
}

pub fn run_fmt(file: &Path, write: bool, check: bool) -> anyhow::Result<()> {
	let text = read(file)?;
	let formatted = format(&text).with_context(|| format!("failed to parse {}", file.display()))?;

	if check {
		if formatted != text {
			bail!("{} is not formatted", file.display());
		}
		return Ok(());
	}
	if write {
		if formatted != text {
			fs::write(file, &formatted).with_context(|| format!("failed to write {}", file.display()))?;
			tracing::info!(file = %file.display(), "reformatted");
		}
		return Ok(());
	}
	print!("{formatted}");
	Ok(())
}

pub fn run_get(file: &Path, path: &str, kind: Option<ValueKind>) -> anyhow::Result<()> {
	let root = read_document(file)?;
	let Some(found) = lookup(&root, path) else {
		bail!("{path} not found in {}", file.display());
	};

	match (found, kind) {
		(Lookup::Values(values), None) => {
			for value in values {
				println!("{value}");
			}
		}
		(Lookup::Values(values), Some(kind)) => {
			for value in values {
				let normalized = normalize(kind, value).with_context(|| format!("{path} = {value}"))?;
				println!("{normalized}");
			}
		}
		(Lookup::Block(block), Some(ValueKind::Curve)) => {
			let keys = block.values("key").collect::<Vec<_>>().join("\n");
			let curve = Curve::decode(&keys).with_context(|| format!("{path} is not a curve"))?;
			println!("{}", curve.encode());
		}
		(Lookup::Block(_), Some(kind)) => bail!("{path} is a block, not a {kind:?} value"),
		(Lookup::Block(block), None) => print!("{block}"),
	}
	Ok(())
}
