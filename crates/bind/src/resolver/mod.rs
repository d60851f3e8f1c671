//! Name-to-constructor lookup for polymorphic elements.
//!
//! Documents name concrete types by block name (`Mods { AltitudeAlpha {} }`)
//! or by a discriminator value. The host registers every concrete type under
//! the trait-object family it belongs to; the hydrator only ever resolves
//! single names and never enumerates the table.

use std::any::{Any, TypeId};

use orrery_node::Node;
use rustc_hash::FxHashMap as HashMap;

use crate::binding::Bindable;
use crate::error::HydrateError;
use crate::hydrate::HydrationContext;
use crate::short_type_name;

#[cfg(test)]
mod tests;

/// Downcasting support for trait objects stored in polymorphic fields.
///
/// Blanket-implemented for every `'static` type, so a family trait only needs
/// `trait PqsMod: Polymorphic {}`.
pub trait Polymorphic: Any {
	fn as_any(&self) -> &dyn Any;
	fn as_any_mut(&mut self) -> &mut dyn Any;
}

impl<T: Any> Polymorphic for T {
	fn as_any(&self) -> &dyn Any {
		self
	}

	fn as_any_mut(&mut self) -> &mut dyn Any {
		self
	}
}

/// Element families whose instances carry a name that patches can address.
///
/// Implemented on the family trait object, e.g. `impl Identified for dyn PqsMod`.
/// See [`BindingBuilder::list_by_identity`](crate::BindingBuilder::list_by_identity).
pub trait Identified {
	fn identity(&self) -> Option<&str>;
}

trait Factory<E: ?Sized>: Send + Sync {
	fn construct(&self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<Box<E>, HydrateError>;
	fn is_instance(&self, existing: &E) -> bool;
	fn merge_into(&self, existing: &mut E, node: &Node, hx: &mut HydrationContext<'_>) -> Result<bool, HydrateError>;
}

struct Concrete<C, E: ?Sized> {
	upcast: fn(C) -> Box<E>,
}

impl<C: Bindable, E: ?Sized + Polymorphic> Factory<E> for Concrete<C, E> {
	fn construct(&self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<Box<E>, HydrateError> {
		let value: C = hx.construct(node)?;
		Ok((self.upcast)(value))
	}

	fn is_instance(&self, existing: &E) -> bool {
		Polymorphic::as_any(existing).is::<C>()
	}

	fn merge_into(&self, existing: &mut E, node: &Node, hx: &mut HydrationContext<'_>) -> Result<bool, HydrateError> {
		match Polymorphic::as_any_mut(existing).downcast_mut::<C>() {
			Some(concrete) => hx.hydrate_into(concrete, node).map(|()| true),
			None => Ok(false),
		}
	}
}

/// A registered concrete type of the family `E`.
pub struct Constructible<E: ?Sized> {
	name: Box<str>,
	concrete: &'static str,
	factory: Box<dyn Factory<E>>,
}

impl<E: ?Sized> Constructible<E> {
	/// Name the type is registered under.
	pub fn name(&self) -> &str {
		&self.name
	}

	/// Short name of the concrete Rust type.
	pub fn concrete_type(&self) -> &'static str {
		self.concrete
	}

	/// Builds a fresh instance hydrated from `node`.
	pub fn construct(&self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<Box<E>, HydrateError> {
		self.factory.construct(node, hx)
	}

	/// Whether `existing` is an instance of this concrete type.
	pub fn is_instance(&self, existing: &E) -> bool {
		self.factory.is_instance(existing)
	}

	/// Hydrates `existing` in place. Returns `false` without touching it if it
	/// is a different concrete type.
	pub fn merge_into(&self, existing: &mut E, node: &Node, hx: &mut HydrationContext<'_>) -> Result<bool, HydrateError> {
		self.factory.merge_into(existing, node, hx)
	}
}

impl<E: ?Sized> std::fmt::Debug for Constructible<E> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Constructible")
			.field("name", &self.name)
			.field("concrete", &self.concrete)
			.finish_non_exhaustive()
	}
}

struct Family<E: ?Sized> {
	by_name: HashMap<Box<str>, Constructible<E>>,
}

/// Host-populated table of constructible types, grouped by family.
#[derive(Default)]
pub struct TypeResolver {
	families: HashMap<TypeId, Box<dyn Any + Send + Sync>>,
}

impl TypeResolver {
	pub fn new() -> Self {
		Self::default()
	}

	/// Registers `C` as a member of the family `E` under `name`.
	///
	/// Registering a name twice replaces the earlier entry.
	///
	/// ```ignore
	/// resolver.register::<dyn PqsMod, AltitudeAlpha>("AltitudeAlpha", |m| Box::new(m));
	/// ```
	pub fn register<E, C>(&mut self, name: impl Into<Box<str>>, upcast: fn(C) -> Box<E>) -> &mut Self
	where
		E: ?Sized + Polymorphic,
		C: Bindable,
	{
		let name = name.into();
		let family = self
			.families
			.entry(TypeId::of::<E>())
			.or_insert_with(|| {
				Box::new(Family::<E> {
					by_name: HashMap::default(),
				})
			});
		let Some(family) = family.downcast_mut::<Family<E>>() else {
			return self;
		};

		let entry = Constructible {
			name: name.clone(),
			concrete: short_type_name::<C>(),
			factory: Box::new(Concrete { upcast }),
		};
		if let Some(previous) = family.by_name.insert(name, entry) {
			tracing::warn!(
				family = short_type_name::<E>(),
				name = previous.name(),
				replaced = previous.concrete_type(),
				"type registration replaced"
			);
		}
		self
	}

	/// Looks up `name` in the family `E`.
	pub fn resolve<E: ?Sized + 'static>(&self, name: &str) -> Option<&Constructible<E>> {
		self.families
			.get(&TypeId::of::<E>())?
			.downcast_ref::<Family<E>>()?
			.by_name
			.get(name)
	}

	pub fn contains<E: ?Sized + 'static>(&self, name: &str) -> bool {
		self.resolve::<E>(name).is_some()
	}

	/// Number of types registered in the family `E`.
	pub fn len<E: ?Sized + 'static>(&self) -> usize {
		self.families
			.get(&TypeId::of::<E>())
			.and_then(|family| family.downcast_ref::<Family<E>>())
			.map_or(0, |family| family.by_name.len())
	}
}

impl std::fmt::Debug for TypeResolver {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("TypeResolver")
			.field("families", &self.families.len())
			.finish()
	}
}

/// Registers concrete types under their own names.
///
/// ```ignore
/// register_types!(&mut resolver, dyn PqsMod => [AltitudeAlpha, FlattenAreaTangential]);
/// ```
#[macro_export]
macro_rules! register_types {
	($resolver:expr, $family:ty => [$($concrete:ident),* $(,)?]) => {{
		let resolver: &mut $crate::TypeResolver = $resolver;
		$(
			resolver.register::<$family, $concrete>(
				stringify!($concrete),
				|value| ::std::boxed::Box::new(value) as ::std::boxed::Box<$family>,
			);
		)*
	}};
}
