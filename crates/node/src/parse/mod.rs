//! # Reader
//!
//! Parses the block text format into a [`Node`] tree.
//!
//! ```text
//! document = item*
//! item     = key "=" value | name "{" item* "}"
//! comment  = "//" any* end-of-line
//! ```
//!
//! A value runs from `=` to the end of its line, a closing `}` or a comment,
//! and is trimmed. A block name may be followed by its `{` on a later line.
//! Whitespace and comments are insignificant outside values.

use crate::Node;


/// Blocks nested deeper than this are rejected instead of recursing further.
const MAX_NESTING: usize = 512;

/// A syntax error with its 1-based source position.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("{line}:{column}: {message}")]
pub struct ParseError {
	pub line: usize,
	pub column: usize,
	pub message: String,
}

/// Parses `input` into an unnamed root holding the top-level values and blocks.
///
/// # Errors
///
/// Returns a [`ParseError`] for a stray `}`, an unclosed block, a name
/// followed by neither `=` nor `{`, or an empty key.
pub fn parse(input: &str) -> Result<Node, ParseError> {
	let mut parser = Parser::new(input);
	let mut root = Node::default();
	parser.parse_items(&mut root, None, 0)?;
	Ok(root)
}

struct Parser<'a> {
	rest: &'a str,
	line: usize,
	column: usize,
}

impl<'a> Parser<'a> {
	fn new(input: &'a str) -> Self {
		Self {
			rest: input,
			line: 1,
			column: 1,
		}
	}

	fn peek(&self) -> Option<char> {
		self.rest.chars().next()
	}

	fn next(&mut self) -> Option<char> {
		let ch = self.peek()?;
		self.rest = &self.rest[ch.len_utf8()..];
		if ch == '\n' {
			self.line += 1;
			self.column = 1;
		} else {
			self.column += 1;
		}
		Some(ch)
	}

	fn at_comment(&self) -> bool {
		self.rest.starts_with("//")
	}

	fn position(&self) -> (usize, usize) {
		(self.line, self.column)
	}

	/// Skips whitespace, line breaks and comments.
	fn skip_trivia(&mut self) {
		loop {
			match self.peek() {
				Some(ch) if ch.is_whitespace() => {
					self.next();
				}
				Some('/') if self.at_comment() => {
					while self.peek().is_some_and(|ch| ch != '\n') {
						self.next();
					}
				}
				_ => break,
			}
		}
	}

	/// Consumes text up to a line break, a comment, the end of input or any of `stops`.
	fn take_until(&mut self, stops: &[char]) -> &'a str {
		let start = self.rest;
		let mut len = 0;
		while let Some(ch) = self.peek() {
			if ch == '\n' || stops.contains(&ch) || self.at_comment() {
				break;
			}
			self.next();
			len += ch.len_utf8();
		}
		&start[..len]
	}

	fn error_at(&self, (line, column): (usize, usize), message: impl Into<String>) -> ParseError {
		ParseError {
			line,
			column,
			message: message.into(),
		}
	}

	/// Parses items into `node` up to its closing brace, or to the end of input for the root.
	///
	/// `open` holds the position of the block name for nested blocks.
	fn parse_items(
		&mut self,
		node: &mut Node,
		open: Option<(usize, usize)>,
		depth: usize,
	) -> Result<(), ParseError> {
		loop {
			self.skip_trivia();
			match self.peek() {
				None => {
					return match open {
						Some(at) => Err(self.error_at(at, format!("unclosed block `{}`", node.name()))),
						None => Ok(()),
					};
				}
				Some('}') => {
					if open.is_none() {
						return Err(self.error_at(self.position(), "unexpected `}`"));
					}
					self.next();
					return Ok(());
				}
				Some(_) => self.parse_item(node, depth)?,
			}
		}
	}

	fn parse_item(&mut self, node: &mut Node, depth: usize) -> Result<(), ParseError> {
		let start = self.position();
		let head = self.take_until(&['=', '{', '}']).trim_end();

		match self.peek() {
			Some('=') => {
				if head.is_empty() {
					return Err(self.error_at(start, "missing key before `=`"));
				}
				self.next();
				let value = self.take_until(&['}']).trim();
				node.add_value(head, value);
				Ok(())
			}
			Some('{') => self.parse_block(node, head, start, depth),
			_ => {
				self.skip_trivia();
				if self.peek() == Some('{') {
					self.parse_block(node, head, start, depth)
				} else {
					Err(self.error_at(start, format!("expected `=` or `{{` after `{head}`")))
				}
			}
		}
	}

	fn parse_block(
		&mut self,
		parent: &mut Node,
		name: &str,
		start: (usize, usize),
		depth: usize,
	) -> Result<(), ParseError> {
		if depth >= MAX_NESTING {
			return Err(self.error_at(start, "blocks nested too deeply"));
		}
		self.next();
		let mut child = Node::new(name);
		self.parse_items(&mut child, Some(start), depth + 1)?;
		parent.add_node(child);
		Ok(())
	}
}
