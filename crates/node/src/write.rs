use std::fmt::{self, Write};

use crate::Node;

impl fmt::Display for Node {
	/// Writes the node as a named block with tab indentation.
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write_block(f, self, 0)
	}
}

impl Node {
	/// Renders the values and children of a document root without an enclosing block.
	pub fn render_document(&self) -> String {
		let mut out = String::new();
		// fmt::Write for String never fails
		let _ = write_contents(&mut out, self, 0);
		out
	}
}

fn indent<W: Write>(out: &mut W, depth: usize) -> fmt::Result {
	for _ in 0..depth {
		out.write_char('\t')?;
	}
	Ok(())
}

fn write_block<W: Write>(out: &mut W, node: &Node, depth: usize) -> fmt::Result {
	indent(out, depth)?;
	writeln!(out, "{}", node.name())?;
	indent(out, depth)?;
	out.write_str("{\n")?;
	write_contents(out, node, depth + 1)?;
	indent(out, depth)?;
	out.write_str("}\n")
}

fn write_contents<W: Write>(out: &mut W, node: &Node, depth: usize) -> fmt::Result {
	for (key, value) in node.entries() {
		indent(out, depth)?;
		if value.is_empty() {
			writeln!(out, "{key} =")?;
		} else {
			writeln!(out, "{key} = {value}")?;
		}
	}
	for child in node.children() {
		write_block(out, child, depth)?;
	}
	Ok(())
}
