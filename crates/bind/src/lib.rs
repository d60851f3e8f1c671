//! Declarative binding of configuration documents onto typed objects.
//!
//! A target type describes how its fields map onto a [`Node`] by
//! implementing [`Bindable`]. The [`Hydrator`] walks the document, decoding
//! scalar values with [`Scalar`], recursing into nested blocks and building
//! collections, either replacing fields or merging into what is already
//! there.
//!
//! ```ignore
//! #[derive(Default)]
//! struct Orbit {
//! 	reference_body: String,
//! 	eccentricity: f64,
//! 	color: Color,
//! }
//!
//! impl Bindable for Orbit {
//! 	fn bind(b: &mut BindingBuilder<Self>) {
//! 		b.value("referenceBody", |o| &mut o.reference_body);
//! 		b.value("eccentricity", |o| &mut o.eccentricity);
//! 		b.value("color", |o| &mut o.color).optional();
//! 	}
//! }
//!
//! let orbit: Orbit = orrery_bind::hydrate(&node)?;
//! ```
//!
//! Elements whose concrete type is named by the document (`Mods { AltitudeAlpha {} }`)
//! are built through a [`TypeResolver`] handed to the [`Hydrator`].

mod binding;
mod builtin;
mod error;
mod field;
mod hydrate;
mod registry;
mod resolver;

pub use binding::{
	Bindable, Binding, BindingBuilder, BindingDescriptor, BindingTable, CollectionKind, HydrateHooks,
	NameSignificance, Phase, Shape,
};
pub use error::HydrateError;
pub use field::NodeTarget;
pub use hydrate::{DEFAULT_MAX_DEPTH, HydrateOptions, HydrationContext, Hydrator};
pub use indexmap::IndexMap;
pub use orrery_node::Node;
pub use orrery_scalar::{
	Color, Color32, Curve, CurveKey, Quaternion, Scalar, ScalarError, Vector2, Vector3, Vector4,
};
pub use registry::BindingRegistry;
pub use resolver::{Constructible, Identified, Polymorphic, TypeResolver};

/// Builds a `T` from `node` with the global registry and default options.
///
/// # Errors
///
/// See [`Hydrator::hydrate`].
pub fn hydrate<T: Bindable>(node: &Node) -> Result<T, HydrateError> {
	Hydrator::new().hydrate(node)
}

/// Populates `target` from `node` with the global registry and default options.
///
/// # Errors
///
/// See [`Hydrator::hydrate_into`].
pub fn hydrate_into<T: Bindable>(target: &mut T, node: &Node) -> Result<(), HydrateError> {
	Hydrator::new().hydrate_into(target, node)
}

/// Short type name used in errors and logs: `orbit::Orbit<f64>` becomes `Orbit`.
pub(crate) fn short_type_name<T: ?Sized>() -> &'static str {
	let full = std::any::type_name::<T>();
	let base = full.split('<').next().unwrap_or(full);
	base.rsplit("::").next().unwrap_or(base)
}
