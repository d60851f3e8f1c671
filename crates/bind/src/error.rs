use orrery_scalar::ScalarError;

use crate::short_type_name;

/// Failure while hydrating a target from a document.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum HydrateError {
	/// A required binding found neither a value nor a node under its key.
	#[error("{type_name}: missing required field `{key}`")]
	MissingRequiredField { type_name: &'static str, key: &'static str },
	/// The scalar codec rejected the raw text.
	#[error("{type_name}.{key}: cannot decode {raw:?}")]
	MalformedScalar {
		type_name: &'static str,
		key: &'static str,
		raw: String,
		#[source]
		source: ScalarError,
	},
	#[error("{type_name}.{key}: dictionaries cannot be merged")]
	UnsupportedMergeTarget { type_name: &'static str, key: &'static str },
	/// A name-dispatched element names a type the resolver does not know.
	#[error("{key}: no registered type named `{attempted}`")]
	TypeResolutionFailure { key: &'static str, attempted: String },
	/// The key is present with the wrong shape, e.g. a value where a block was expected.
	#[error("{type_name}.{key}: expected {expected}")]
	ShapeMismatch {
		type_name: &'static str,
		key: &'static str,
		expected: &'static str,
	},
	#[error("document nested deeper than {limit} levels")]
	DepthExceeded { limit: usize },
	/// Raised by a [`HydrateHooks`](crate::HydrateHooks) implementation.
	#[error("{type_name}: {message}")]
	Hook { type_name: &'static str, message: String },
	/// A failure below the root, with the dotted path to the block that failed.
	#[error("at `{path}`: {source}")]
	Nested {
		path: String,
		#[source]
		source: Box<HydrateError>,
	},
}

impl HydrateError {
	/// Builds a [`HydrateError::Hook`] attributed to `T`.
	pub fn hook<T: ?Sized>(message: impl Into<String>) -> Self {
		Self::Hook {
			type_name: short_type_name::<T>(),
			message: message.into(),
		}
	}

	/// Prepends `segment` to the error path, keeping a single `Nested` layer.
	pub(crate) fn nest(self, segment: &str) -> Self {
		match self {
			Self::Nested { path, source } => Self::Nested {
				path: format!("{segment}.{path}"),
				source,
			},
			other => Self::Nested {
				path: segment.to_string(),
				source: Box::new(other),
			},
		}
	}

	/// The innermost error, without any path wrapping.
	pub fn root_cause(&self) -> &HydrateError {
		match self {
			Self::Nested { source, .. } => source.root_cause(),
			other => other,
		}
	}

	/// Key of the binding that failed, if the failure is tied to one.
	pub fn key(&self) -> Option<&'static str> {
		match self.root_cause() {
			Self::MissingRequiredField { key, .. }
			| Self::MalformedScalar { key, .. }
			| Self::UnsupportedMergeTarget { key, .. }
			| Self::TypeResolutionFailure { key, .. }
			| Self::ShapeMismatch { key, .. } => Some(*key),
			_ => None,
		}
	}

	/// Dotted path from the hydrated root to the failing field, e.g. `Body.Mods[1].radius`.
	pub fn path(&self) -> String {
		let prefix = match self {
			Self::Nested { path, .. } => Some(path.as_str()),
			_ => None,
		};
		match (prefix, self.key()) {
			(Some(prefix), Some(key)) => format!("{prefix}.{key}"),
			(Some(prefix), None) => prefix.to_string(),
			(None, Some(key)) => key.to_string(),
			(None, None) => String::new(),
		}
	}
}
