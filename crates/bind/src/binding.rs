//! Per-type binding declarations.
//!
//! A [`Bindable`] type lists its bindings once, in [`Bindable::bind`]. The
//! registry turns that declaration into a [`BindingTable`] split by
//! [`Phase`], which the hydrator walks for every document it applies.

use indexmap::IndexMap;
use orrery_node::Node;
use orrery_scalar::Scalar;

use crate::error::HydrateError;
use crate::field::{
	DispatchListField, FieldBinding, ListField, MapField, NestedField, NodeTarget, ValueField, VariantField,
};
use crate::resolver::{Identified, Polymorphic};
use crate::short_type_name;

/// A type that can be populated from a document node.
pub trait Bindable: Default + 'static {
	/// Declares the bindings of this type, in application order.
	fn bind(bindings: &mut BindingBuilder<Self>);
}

/// Callbacks around the post-apply phase.
///
/// Registered with [`BindingBuilder::hooks`]; both default to doing nothing.
pub trait HydrateHooks: Bindable {
	/// Runs after pre-apply bindings and before post-apply bindings.
	fn on_pre_hydrate(&mut self, node: &Node) -> Result<(), HydrateError> {
		let _ = node;
		Ok(())
	}

	/// Runs after every binding has been applied.
	fn on_post_hydrate(&mut self, node: &Node) -> Result<(), HydrateError> {
		let _ = node;
		Ok(())
	}
}

/// When a binding is applied relative to the pre-hydrate hook.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Phase {
	Pre,
	Post,
}

/// How collection elements find their concrete type.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NameSignificance {
	/// Every child builds the declared element type.
	None,
	/// The child's name is looked up in the type resolver.
	ByTypeName,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CollectionKind {
	Sequence,
	/// Keyed by child name, in document order.
	Dictionary,
}

/// What a binding expects to find under its key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Shape {
	Scalar,
	/// A child block. `dispatch` names the value holding the concrete type, if any.
	Nested { dispatch: Option<&'static str> },
	Collection {
		kind: CollectionKind,
		significance: NameSignificance,
	},
}

/// Policy for one field binding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BindingDescriptor {
	/// Name of the declaring type, used in errors.
	pub owner: &'static str,
	pub key: &'static str,
	pub optional: bool,
	/// Edit the existing field value instead of replacing it.
	pub merge: bool,
	pub phase: Phase,
	pub shape: Shape,
	/// Joins every value under the key with this separator before decoding.
	pub join: Option<&'static str>,
	/// Whether the current field value is consulted for presence and merge decisions.
	pub eager_children: bool,
}

impl BindingDescriptor {
	fn new(owner: &'static str, key: &'static str, shape: Shape) -> Self {
		Self {
			owner,
			key,
			optional: false,
			merge: false,
			phase: Phase::Post,
			shape,
			join: None,
			eager_children: true,
		}
	}

	pub fn optional(&mut self) -> &mut Self {
		self.optional = true;
		self
	}

	pub fn merge(&mut self) -> &mut Self {
		self.merge = true;
		self
	}

	pub fn pre_apply(&mut self) -> &mut Self {
		self.phase = Phase::Pre;
		self
	}

	pub fn join(&mut self, separator: &'static str) -> &mut Self {
		self.join = Some(separator);
		self
	}

	/// Always build fresh values, ignoring whatever the field currently holds.
	///
	/// Only this binding is affected. Bindings of the nested type keep their
	/// own policy and declare `lazy_children` themselves if needed.
	pub fn lazy_children(&mut self) -> &mut Self {
		self.eager_children = false;
		self
	}

	/// Whether an already-populated field should be edited in place.
	pub(crate) fn merges(&self) -> bool {
		self.merge && self.eager_children
	}
}

/// A descriptor paired with the accessor that reads and writes its field.
pub struct Binding<T> {
	descriptor: BindingDescriptor,
	pub(crate) field: Box<dyn FieldBinding<T>>,
}

impl<T> Binding<T> {
	pub fn descriptor(&self) -> &BindingDescriptor {
		&self.descriptor
	}
}

impl<T> std::fmt::Debug for Binding<T> {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("Binding")
			.field("descriptor", &self.descriptor)
			.finish_non_exhaustive()
	}
}

pub(crate) type HookFn<T> = fn(&mut T, &Node) -> Result<(), HydrateError>;

pub(crate) struct Hooks<T> {
	pub pre: Option<HookFn<T>>,
	pub post: Option<HookFn<T>>,
}

impl<T> Default for Hooks<T> {
	fn default() -> Self {
		Self { pre: None, post: None }
	}
}

/// Collects the bindings declared by [`Bindable::bind`].
///
/// Each method appends a binding and returns its descriptor so policies can
/// be chained: `b.value("color", |o| &mut o.color).optional();`.
pub struct BindingBuilder<T> {
	owner: &'static str,
	bindings: Vec<Binding<T>>,
	hooks: Hooks<T>,
}

impl<T: Bindable> BindingBuilder<T> {
	fn new() -> Self {
		Self {
			owner: short_type_name::<T>(),
			bindings: Vec::new(),
			hooks: Hooks::default(),
		}
	}

	fn push(&mut self, key: &'static str, shape: Shape, field: impl FieldBinding<T> + 'static) -> &mut BindingDescriptor {
		self.bindings.push(Binding {
			descriptor: BindingDescriptor::new(self.owner, key, shape),
			field: Box::new(field),
		});
		let last = self.bindings.len() - 1;
		&mut self.bindings[last].descriptor
	}

	/// Binds a scalar decoded from `key = value`.
	pub fn value<V: Scalar + 'static>(&mut self, key: &'static str, access: fn(&mut T) -> &mut V) -> &mut BindingDescriptor {
		self.push(key, Shape::Scalar, ValueField { access })
	}

	/// Binds a nested object hydrated from the child block `key`.
	pub fn node<N: NodeTarget>(&mut self, key: &'static str, access: fn(&mut T) -> &mut N) -> &mut BindingDescriptor {
		self.push(key, Shape::Nested { dispatch: None }, NestedField { access })
	}

	/// Binds a polymorphic object whose concrete type is named by the
	/// `discriminator` value inside the child block `key`.
	pub fn variant<E: ?Sized + Polymorphic>(
		&mut self,
		key: &'static str,
		discriminator: &'static str,
		access: fn(&mut T) -> &mut Option<Box<E>>,
	) -> &mut BindingDescriptor {
		self.push(
			key,
			Shape::Nested {
				dispatch: Some(discriminator),
			},
			VariantField { access, discriminator },
		)
	}

	/// Binds a sequence built from every child of the block `key`.
	pub fn list<E: Bindable>(&mut self, key: &'static str, access: fn(&mut T) -> &mut Vec<E>) -> &mut BindingDescriptor {
		self.push(
			key,
			Shape::Collection {
				kind: CollectionKind::Sequence,
				significance: NameSignificance::None,
			},
			ListField { access },
		)
	}

	/// Binds a sequence whose element types are named by the children of the block `key`.
	pub fn list_by_name<E: ?Sized + Polymorphic>(
		&mut self,
		key: &'static str,
		access: fn(&mut T) -> &mut Vec<Box<E>>,
	) -> &mut BindingDescriptor {
		self.push(
			key,
			Shape::Collection {
				kind: CollectionKind::Sequence,
				significance: NameSignificance::ByTypeName,
			},
			DispatchListField { access, identity: None },
		)
	}

	/// Like [`list_by_name`](Self::list_by_name), but a merging child with a
	/// `name` value edits the existing element of that identity, and an
	/// `index` value further requires its position among same-typed elements.
	/// A named child matching nothing is appended.
	pub fn list_by_identity<E: ?Sized + Polymorphic + Identified>(
		&mut self,
		key: &'static str,
		access: fn(&mut T) -> &mut Vec<Box<E>>,
	) -> &mut BindingDescriptor {
		self.push(
			key,
			Shape::Collection {
				kind: CollectionKind::Sequence,
				significance: NameSignificance::ByTypeName,
			},
			DispatchListField {
				access,
				identity: Some(<E as Identified>::identity as fn(&E) -> Option<&str>),
			},
		)
	}

	/// Binds a map keyed by the child names of the block `key`.
	pub fn map<E: Bindable>(
		&mut self,
		key: &'static str,
		access: fn(&mut T) -> &mut IndexMap<String, E>,
	) -> &mut BindingDescriptor {
		self.push(
			key,
			Shape::Collection {
				kind: CollectionKind::Dictionary,
				significance: NameSignificance::None,
			},
			MapField { access },
		)
	}

	/// Runs the [`HydrateHooks`] of `T` during hydration.
	pub fn hooks(&mut self)
	where
		T: HydrateHooks,
	{
		self.hooks = Hooks {
			pre: Some(T::on_pre_hydrate as HookFn<T>),
			post: Some(T::on_post_hydrate as HookFn<T>),
		};
	}
}

/// The bindings of one type, split by phase in declaration order.
pub struct BindingTable<T> {
	type_name: &'static str,
	pre: Vec<Binding<T>>,
	post: Vec<Binding<T>>,
	hooks: Hooks<T>,
}

impl<T: Bindable> BindingTable<T> {
	/// Runs the declaration of `T`.
	pub fn build() -> Self {
		let mut builder = BindingBuilder::new();
		T::bind(&mut builder);
		let (pre, post): (Vec<_>, Vec<_>) = builder
			.bindings
			.into_iter()
			.partition(|binding| binding.descriptor.phase == Phase::Pre);
		Self {
			type_name: builder.owner,
			pre,
			post,
			hooks: builder.hooks,
		}
	}
}

impl<T> BindingTable<T> {
	pub fn type_name(&self) -> &'static str {
		self.type_name
	}

	pub fn pre_apply(&self) -> &[Binding<T>] {
		&self.pre
	}

	pub fn post_apply(&self) -> &[Binding<T>] {
		&self.post
	}

	/// Looks up a binding by key in either phase.
	pub fn find(&self, key: &str) -> Option<&Binding<T>> {
		self.pre
			.iter()
			.chain(&self.post)
			.find(|binding| binding.descriptor.key == key)
	}

	pub fn len(&self) -> usize {
		self.pre.len() + self.post.len()
	}

	pub fn is_empty(&self) -> bool {
		self.len() == 0
	}

	pub(crate) fn hooks(&self) -> &Hooks<T> {
		&self.hooks
	}
}
