//! Configuration document tree.
//!
//! A [`Node`] is one block of a configuration document: a name, an ordered
//! list of `key = value` pairs and an ordered list of child blocks. Keys and
//! child names may repeat. Singular lookups return the first match and the
//! plural accessors yield every match in document order.
//!
//! ```text
//! Body
//! {
//! 	name = Kerbin
//! 	Orbit
//! 	{
//! 		referenceBody = Sun
//! 		eccentricity = 0.05
//! 	}
//! }
//! ```
//!
//! [`parse`] reads this format into an unnamed root node, and the
//! [`Display`](std::fmt::Display) implementation on [`Node`] writes it back.

mod node;
mod parse;
mod write;

pub use node::Node;
pub use parse::{ParseError, parse};
