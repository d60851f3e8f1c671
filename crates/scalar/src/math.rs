use crate::{Scalar, ScalarError, decode_array};

/// Implements [`Scalar`] for a fixed-arity `f64` vector.
///
/// Text with the wrong number of components decodes to the fallback value;
/// a component that is not a number is an error.
macro_rules! impl_vector {
	($name:ident, $fallback:expr, $arity:literal, [$($field:ident),+]) => {
		impl Scalar for $name {
			fn decode(text: &str) -> Result<Self, ScalarError> {
				Ok(match decode_array::<f64, $arity>(text)? {
					Some([$($field),+]) => Self { $($field),+ },
					None => $fallback,
				})
			}

			fn encode(&self) -> String {
				[$(self.$field.encode()),+].join(",")
			}
		}
	};
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector2 {
	pub x: f64,
	pub y: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector3 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Vector4 {
	pub x: f64,
	pub y: f64,
	pub z: f64,
	pub w: f64,
}

/// Rotation stored as `x, y, z, w`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Quaternion {
	pub x: f64,
	pub y: f64,
	pub z: f64,
	pub w: f64,
}

impl Vector2 {
	pub const ZERO: Self = Self::new(0.0, 0.0);

	pub const fn new(x: f64, y: f64) -> Self {
		Self { x, y }
	}
}

impl Vector3 {
	pub const ZERO: Self = Self::new(0.0, 0.0, 0.0);

	pub const fn new(x: f64, y: f64, z: f64) -> Self {
		Self { x, y, z }
	}
}

impl Vector4 {
	pub const ZERO: Self = Self::new(0.0, 0.0, 0.0, 0.0);

	pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
		Self { x, y, z, w }
	}
}

impl Quaternion {
	pub const IDENTITY: Self = Self::new(0.0, 0.0, 0.0, 1.0);

	pub const fn new(x: f64, y: f64, z: f64, w: f64) -> Self {
		Self { x, y, z, w }
	}
}

impl Default for Quaternion {
	fn default() -> Self {
		Self::IDENTITY
	}
}

impl_vector!(Vector2, Vector2::ZERO, 2, [x, y]);
impl_vector!(Vector3, Vector3::ZERO, 3, [x, y, z]);
impl_vector!(Vector4, Vector4::ZERO, 4, [x, y, z, w]);
impl_vector!(Quaternion, Quaternion::IDENTITY, 4, [x, y, z, w]);
