//! Text codecs for scalar configuration values.
//!
//! Every type a document can store in a single `key = value` line implements
//! [`Scalar`]. Decoding trims surrounding whitespace; compound values split
//! their components on commas, spaces and tabs.

mod color;
mod curve;
mod error;
mod math;

pub use color::{Color, Color32};
pub use curve::{Curve, CurveKey};
pub use error::ScalarError;
pub use math::{Quaternion, Vector2, Vector3, Vector4};

#[cfg(test)]
mod tests;

/// A value with a textual representation.
pub trait Scalar: Sized {
	/// Parses a value from document text.
	///
	/// # Errors
	///
	/// Returns [`ScalarError::Invalid`] if `text` is not a valid encoding.
	fn decode(text: &str) -> Result<Self, ScalarError>;

	/// Formats the value so that [`Scalar::decode`] reproduces it.
	fn encode(&self) -> String;

	/// Whether the value counts as present when deciding to merge into it.
	fn is_set(&self) -> bool {
		true
	}
}

macro_rules! impl_number {
	($($ty:ty),* $(,)?) => {$(
		impl Scalar for $ty {
			fn decode(text: &str) -> Result<Self, ScalarError> {
				text.trim()
					.parse()
					.map_err(|_| ScalarError::invalid(stringify!($ty), text))
			}

			fn encode(&self) -> String {
				self.to_string()
			}
		}
	)*};
}

impl_number!(i8, i16, i32, i64, u8, u16, u32, u64, usize, f32, f64);

/// Parses a boolean flag.
///
/// Accepts `true`/`false`, `yes`/`no`, `on`/`off` and `1`/`0`, ignoring case.
pub fn parse_bool(text: &str) -> Option<bool> {
	const TRUE: [&str; 4] = ["true", "yes", "on", "1"];
	const FALSE: [&str; 4] = ["false", "no", "off", "0"];
	let text = text.trim();
	if TRUE.iter().any(|t| t.eq_ignore_ascii_case(text)) {
		Some(true)
	} else if FALSE.iter().any(|f| f.eq_ignore_ascii_case(text)) {
		Some(false)
	} else {
		None
	}
}

impl Scalar for bool {
	fn decode(text: &str) -> Result<Self, ScalarError> {
		parse_bool(text).ok_or_else(|| ScalarError::invalid("bool", text))
	}

	fn encode(&self) -> String {
		self.to_string()
	}
}

impl Scalar for String {
	fn decode(text: &str) -> Result<Self, ScalarError> {
		Ok(text.to_string())
	}

	fn encode(&self) -> String {
		self.clone()
	}
}

impl<T: Scalar> Scalar for Option<T> {
	fn decode(text: &str) -> Result<Self, ScalarError> {
		T::decode(text).map(Some)
	}

	fn encode(&self) -> String {
		self.as_ref().map(Scalar::encode).unwrap_or_default()
	}

	fn is_set(&self) -> bool {
		self.is_some()
	}
}

/// Splits compound text into its non-empty components.
pub(crate) fn components<'a>(text: &'a str, separators: &'a [char]) -> impl Iterator<Item = &'a str> {
	text.split(separators).filter(|part| !part.is_empty())
}

pub(crate) const COMPONENT_SEPARATORS: &[char] = &[',', ' ', '\t'];

/// Decodes exactly `N` components, or `None` when the arity differs.
pub(crate) fn decode_array<T: Scalar, const N: usize>(text: &str) -> Result<Option<[T; N]>, ScalarError> {
	let parts: Vec<&str> = components(text, COMPONENT_SEPARATORS).collect();
	if parts.len() != N {
		return Ok(None);
	}
	let values = parts
		.into_iter()
		.map(T::decode)
		.collect::<Result<Vec<_>, _>>()?;
	Ok(<[T; N]>::try_from(values).ok())
}
