use crate::{COMPONENT_SEPARATORS, Scalar, ScalarError, components};

/// Linear RGBA color with `f32` channels.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Color {
	pub r: f32,
	pub g: f32,
	pub b: f32,
	pub a: f32,
}

/// RGBA color with byte channels.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Color32 {
	pub r: u8,
	pub g: u8,
	pub b: u8,
	pub a: u8,
}

impl Color {
	pub const WHITE: Self = Self::new(1.0, 1.0, 1.0, 1.0);
	pub const BLACK: Self = Self::new(0.0, 0.0, 0.0, 1.0);
	pub const RED: Self = Self::new(1.0, 0.0, 0.0, 1.0);

	pub const fn new(r: f32, g: f32, b: f32, a: f32) -> Self {
		Self { r, g, b, a }
	}

	pub const fn rgb(r: f32, g: f32, b: f32) -> Self {
		Self::new(r, g, b, 1.0)
	}
}

impl Color32 {
	pub const WHITE: Self = Self::new(255, 255, 255, 255);

	pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
		Self { r, g, b, a }
	}
}

impl From<Color32> for Color {
	fn from(c: Color32) -> Self {
		let channel = |v: u8| f32::from(v) / 255.0;
		Self::new(channel(c.r), channel(c.g), channel(c.b), channel(c.a))
	}
}

/// Decodes 3 or 4 channels, with `opaque` filling a missing alpha.
///
/// Any other channel count yields `None`.
fn decode_channels<T: Scalar + Copy>(text: &str, opaque: T) -> Result<Option<[T; 4]>, ScalarError> {
	let parts: Vec<&str> = components(text, COMPONENT_SEPARATORS).collect();
	if !matches!(parts.len(), 3 | 4) {
		return Ok(None);
	}
	let mut channels = [opaque; 4];
	for (slot, part) in channels.iter_mut().zip(parts) {
		*slot = T::decode(part)?;
	}
	Ok(Some(channels))
}

impl Scalar for Color {
	fn decode(text: &str) -> Result<Self, ScalarError> {
		Ok(match decode_channels(text, 1.0_f32)? {
			Some([r, g, b, a]) => Self::new(r, g, b, a),
			None => Self::WHITE,
		})
	}

	fn encode(&self) -> String {
		format!("{},{},{},{}", self.r, self.g, self.b, self.a)
	}
}

impl Scalar for Color32 {
	fn decode(text: &str) -> Result<Self, ScalarError> {
		Ok(match decode_channels(text, u8::MAX)? {
			Some([r, g, b, a]) => Self::new(r, g, b, a),
			None => Self::WHITE,
		})
	}

	fn encode(&self) -> String {
		format!("{},{},{},{}", self.r, self.g, self.b, self.a)
	}
}
