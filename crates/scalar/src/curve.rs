use crate::{Scalar, ScalarError, components};

const KEY_SEPARATORS: &[char] = &[' ', ',', ';', '\t'];

/// One control point of a [`Curve`].
///
/// Tangents are slopes (value per unit of position).
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct CurveKey {
	pub position: f32,
	pub value: f32,
	pub tangent_in: f32,
	pub tangent_out: f32,
}

impl CurveKey {
	pub const fn new(position: f32, value: f32) -> Self {
		Self::with_tangents(position, value, 0.0, 0.0)
	}

	pub const fn with_tangents(position: f32, value: f32, tangent_in: f32, tangent_out: f32) -> Self {
		Self {
			position,
			value,
			tangent_in,
			tangent_out,
		}
	}
}

impl Scalar for CurveKey {
	/// Decodes `position value` or `position value in out`.
	fn decode(text: &str) -> Result<Self, ScalarError> {
		let parts: Vec<&str> = components(text, KEY_SEPARATORS).collect();
		let number = |i: usize| f32::decode(parts[i]);
		let key = match parts.len() {
			2 => Self::new(number(0)?, number(1)?),
			4 => Self::with_tangents(number(0)?, number(1)?, number(2)?, number(3)?),
			found => {
				return Err(ScalarError::CurveArity {
					line: text.trim().to_string(),
					found,
				});
			}
		};
		if !key.position.is_finite() {
			return Err(ScalarError::invalid("finite curve key position", parts[0]));
		}
		Ok(key)
	}

	fn encode(&self) -> String {
		if self.tangent_in == 0.0 && self.tangent_out == 0.0 {
			format!("{} {}", self.position, self.value)
		} else {
			format!(
				"{} {} {} {}",
				self.position, self.value, self.tangent_in, self.tangent_out
			)
		}
	}
}

/// Piecewise cubic Hermite curve, keys sorted by position.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Curve {
	keys: Vec<CurveKey>,
}

impl Curve {
	pub fn new(keys: impl IntoIterator<Item = CurveKey>) -> Self {
		let mut curve = Self::default();
		for key in keys {
			curve.add(key);
		}
		curve
	}

	/// Inserts `key` after any existing keys at the same position.
	///
	/// Keys are ordered by [`f32::total_cmp`], so a NaN position sorts to an
	/// end instead of breaking the order.
	pub fn add(&mut self, key: CurveKey) {
		let at = self
			.keys
			.partition_point(|k| k.position.total_cmp(&key.position).is_le());
		self.keys.insert(at, key);
	}

	pub fn keys(&self) -> &[CurveKey] {
		&self.keys
	}

	pub fn is_empty(&self) -> bool {
		self.keys.is_empty()
	}

	/// Samples the curve at `position`.
	///
	/// Positions outside the key range clamp to the first or last value. An
	/// empty curve evaluates to zero and a NaN position evaluates to NaN.
	pub fn evaluate(&self, position: f32) -> f32 {
		let (Some(first), Some(last)) = (self.keys.first(), self.keys.last()) else {
			return 0.0;
		};
		if position.is_nan() {
			return f32::NAN;
		}
		if position <= first.position {
			return first.value;
		}
		if position >= last.position {
			return last.value;
		}

		let next = self.keys.partition_point(|k| k.position.total_cmp(&position).is_le());
		let (Some(&a), Some(&b)) = (next.checked_sub(1).and_then(|i| self.keys.get(i)), self.keys.get(next))
		else {
			return last.value;
		};
		let span = b.position - a.position;
		if span <= 0.0 {
			return b.value;
		}

		let t = (position - a.position) / span;
		let (t2, t3) = (t * t, t * t * t);
		let h00 = 2.0 * t3 - 3.0 * t2 + 1.0;
		let h10 = t3 - 2.0 * t2 + t;
		let h01 = -2.0 * t3 + 3.0 * t2;
		let h11 = t3 - t2;
		h00 * a.value + h10 * span * a.tangent_out + h01 * b.value + h11 * span * b.tangent_in
	}
}

impl Scalar for Curve {
	/// Decodes one key per non-blank line.
	fn decode(text: &str) -> Result<Self, ScalarError> {
		let keys = text
			.lines()
			.filter(|line| !line.trim().is_empty())
			.map(CurveKey::decode)
			.collect::<Result<Vec<_>, _>>()?;
		Ok(Self::new(keys))
	}

	fn encode(&self) -> String {
		self.keys
			.iter()
			.map(Scalar::encode)
			.collect::<Vec<_>>()
			.join("\n")
	}

	fn is_set(&self) -> bool {
		!self.keys.is_empty()
	}
}
