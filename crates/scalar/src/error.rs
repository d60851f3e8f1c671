/// Failure to decode a scalar from document text.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ScalarError {
	#[error("invalid {expected}: {text:?}")]
	Invalid { expected: &'static str, text: String },
	#[error("curve key {line:?} needs 2 or 4 components, found {found}")]
	CurveArity { line: String, found: usize },
}

impl ScalarError {
	pub(crate) fn invalid(expected: &'static str, text: &str) -> Self {
		Self::Invalid {
			expected,
			text: text.to_string(),
		}
	}
}
