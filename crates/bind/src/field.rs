//! Field accessors, one per binding shape.
//!
//! Each accessor owns a plain `fn(&mut T) -> &mut V` projection and applies
//! the child node found under its key. Presence checks happen in the
//! hydrator before [`FieldBinding::apply`] runs.

use std::borrow::Cow;

use indexmap::IndexMap;
use orrery_node::Node;
use orrery_scalar::Scalar;
use smallvec::{SmallVec, smallvec};

use crate::binding::{Bindable, BindingDescriptor};
use crate::error::HydrateError;
use crate::hydrate::HydrationContext;
use crate::resolver::{Constructible, Polymorphic};

pub(crate) trait FieldBinding<T>: Send + Sync {
	/// Whether the field currently holds a value a merge could build on.
	fn is_set(&self, target: &mut T) -> bool;

	/// Writes the field from `node`, which is known to contain `desc.key`.
	fn apply(
		&self,
		desc: &BindingDescriptor,
		target: &mut T,
		node: &Node,
		hx: &mut HydrationContext<'_>,
	) -> Result<(), HydrateError>;
}

/// A field filled from a child block.
///
/// Implemented for every [`Bindable`] type, `Option` of one, and for raw
/// [`Node`] fields that keep the block as-is.
pub trait NodeTarget: 'static {
	fn is_set(&self) -> bool;

	/// Replaces the field with a value built from `node`. On error the field is untouched.
	fn replace_from(&mut self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<(), HydrateError>;

	/// Applies `node` on top of the current value.
	fn merge_from(&mut self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<(), HydrateError>;
}

impl<T: Bindable> NodeTarget for T {
	fn is_set(&self) -> bool {
		true
	}

	fn replace_from(&mut self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<(), HydrateError> {
		*self = hx.construct(node)?;
		Ok(())
	}

	fn merge_from(&mut self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<(), HydrateError> {
		hx.hydrate_into(self, node)
	}
}

impl<T: Bindable> NodeTarget for Option<T> {
	fn is_set(&self) -> bool {
		self.is_some()
	}

	fn replace_from(&mut self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<(), HydrateError> {
		*self = Some(hx.construct(node)?);
		Ok(())
	}

	fn merge_from(&mut self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<(), HydrateError> {
		match self {
			Some(current) => hx.hydrate_into(current, node),
			None => self.replace_from(node, hx),
		}
	}
}

impl NodeTarget for Node {
	fn is_set(&self) -> bool {
		true
	}

	fn replace_from(&mut self, node: &Node, _hx: &mut HydrationContext<'_>) -> Result<(), HydrateError> {
		*self = node.clone();
		Ok(())
	}

	fn merge_from(&mut self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<(), HydrateError> {
		self.replace_from(node, hx)
	}
}

impl NodeTarget for Option<Node> {
	fn is_set(&self) -> bool {
		self.is_some()
	}

	fn replace_from(&mut self, node: &Node, _hx: &mut HydrationContext<'_>) -> Result<(), HydrateError> {
		*self = Some(node.clone());
		Ok(())
	}

	fn merge_from(&mut self, node: &Node, hx: &mut HydrationContext<'_>) -> Result<(), HydrateError> {
		self.replace_from(node, hx)
	}
}

fn shape_mismatch(desc: &BindingDescriptor, expected: &'static str) -> HydrateError {
	HydrateError::ShapeMismatch {
		type_name: desc.owner,
		key: desc.key,
		expected,
	}
}

fn element_segment(key: &str, index: usize) -> Cow<'static, str> {
	Cow::Owned(format!("{key}[{index}]"))
}

pub(crate) struct ValueField<T, V> {
	pub access: fn(&mut T) -> &mut V,
}

impl<T: 'static, V: Scalar + 'static> FieldBinding<T> for ValueField<T, V> {
	fn is_set(&self, target: &mut T) -> bool {
		(self.access)(target).is_set()
	}

	fn apply(
		&self,
		desc: &BindingDescriptor,
		target: &mut T,
		node: &Node,
		_hx: &mut HydrationContext<'_>,
	) -> Result<(), HydrateError> {
		let raw = match (desc.join, node.value(desc.key)) {
			(_, None) => return Err(shape_mismatch(desc, "a value")),
			(Some(separator), Some(_)) => Cow::Owned(node.values(desc.key).collect::<Vec<_>>().join(separator)),
			(None, Some(first)) => Cow::Borrowed(first),
		};
		match V::decode(&raw) {
			Ok(value) => {
				*(self.access)(target) = value;
				Ok(())
			}
			Err(source) => Err(HydrateError::MalformedScalar {
				type_name: desc.owner,
				key: desc.key,
				raw: raw.into_owned(),
				source,
			}),
		}
	}
}

pub(crate) struct NestedField<T, N> {
	pub access: fn(&mut T) -> &mut N,
}

impl<T: 'static, N: NodeTarget> FieldBinding<T> for NestedField<T, N> {
	fn is_set(&self, target: &mut T) -> bool {
		(self.access)(target).is_set()
	}

	fn apply(
		&self,
		desc: &BindingDescriptor,
		target: &mut T,
		node: &Node,
		hx: &mut HydrationContext<'_>,
	) -> Result<(), HydrateError> {
		let Some(child) = node.node(desc.key) else {
			return Err(shape_mismatch(desc, "a block"));
		};
		let field = (self.access)(target);
		let merge = desc.merges() && field.is_set();
		hx.descend(desc.key, |hx| {
			if merge {
				field.merge_from(child, hx)
			} else {
				field.replace_from(child, hx)
			}
		})
	}
}

pub(crate) struct VariantField<T, E: ?Sized> {
	pub access: fn(&mut T) -> &mut Option<Box<E>>,
	pub discriminator: &'static str,
}

impl<T: 'static, E: ?Sized + Polymorphic> FieldBinding<T> for VariantField<T, E> {
	fn is_set(&self, target: &mut T) -> bool {
		(self.access)(target).is_some()
	}

	fn apply(
		&self,
		desc: &BindingDescriptor,
		target: &mut T,
		node: &Node,
		hx: &mut HydrationContext<'_>,
	) -> Result<(), HydrateError> {
		let Some(child) = node.node(desc.key) else {
			return Err(shape_mismatch(desc, "a block"));
		};
		let Some(type_name) = child.value(self.discriminator) else {
			return Err(HydrateError::MissingRequiredField {
				type_name: desc.owner,
				key: self.discriminator,
			}
			.nest(desc.key));
		};
		let Some(ctor) = hx.resolve::<E>(desc, type_name)? else {
			return Ok(());
		};

		let field = (self.access)(target);
		hx.descend(desc.key, |hx| {
			if desc.merges()
				&& let Some(current) = field.as_deref_mut()
				&& ctor.merge_into(current, child, hx)?
			{
				return Ok(());
			}
			*field = Some(ctor.construct(child, hx)?);
			Ok(())
		})
	}
}

pub(crate) struct ListField<T, E> {
	pub access: fn(&mut T) -> &mut Vec<E>,
}

impl<T: 'static, E: Bindable> FieldBinding<T> for ListField<T, E> {
	fn is_set(&self, target: &mut T) -> bool {
		!(self.access)(target).is_empty()
	}

	fn apply(
		&self,
		desc: &BindingDescriptor,
		target: &mut T,
		node: &Node,
		hx: &mut HydrationContext<'_>,
	) -> Result<(), HydrateError> {
		let Some(source) = node.node(desc.key) else {
			return Err(shape_mismatch(desc, "a block"));
		};
		let items = (self.access)(target);

		if desc.merges() && !items.is_empty() {
			for (index, child) in source.children().iter().enumerate() {
				hx.descend(element_segment(desc.key, index), |hx| match items.get_mut(index) {
					Some(current) => hx.hydrate_into(current, child),
					None => {
						items.push(hx.construct(child)?);
						Ok(())
					}
				})?;
			}
			return Ok(());
		}

		let mut fresh = Vec::with_capacity(source.children().len());
		for (index, child) in source.children().iter().enumerate() {
			fresh.push(hx.descend(element_segment(desc.key, index), |hx| hx.construct::<E>(child))?);
		}
		*items = fresh;
		Ok(())
	}
}

/// Child values naming the existing element a patch edits.
const PATCH_NAME_KEY: &str = "name";
const PATCH_INDEX_KEY: &str = "index";

pub(crate) struct DispatchListField<T, E: ?Sized> {
	pub access: fn(&mut T) -> &mut Vec<Box<E>>,
	/// Set for families whose elements patches can address by name.
	pub identity: Option<fn(&E) -> Option<&str>>,
}

impl<T, E: ?Sized> DispatchListField<T, E> {
	/// Picks the existing element `child` edits: the first not yet edited
	/// instance of `ctor`'s type that matches the child's name and index.
	fn select(
		&self,
		desc: &BindingDescriptor,
		items: &[Box<E>],
		edited: &[bool],
		ctor: &Constructible<E>,
		child: &Node,
	) -> Result<Option<usize>, HydrateError> {
		let (name, position) = match self.identity {
			Some(_) => (child.value(PATCH_NAME_KEY), patch_index(desc, child)?),
			None => (None, None),
		};
		let slot = items
			.iter()
			.enumerate()
			.filter(|&(_, item)| ctor.is_instance(&**item))
			.enumerate()
			.find(|&(nth, (i, item))| {
				!edited[i]
					&& name.is_none_or(|name| {
						self.identity.and_then(|identity| identity(&**item)) == Some(name)
							&& position.is_none_or(|position| position == nth)
					})
			})
			.map(|(_, (i, _))| i);
		if let Some(name) = name
			&& slot.is_none()
		{
			tracing::trace!(key = desc.key, name, "no element with this identity, appending");
		}
		Ok(slot)
	}
}

fn patch_index(desc: &BindingDescriptor, child: &Node) -> Result<Option<usize>, HydrateError> {
	let Some(raw) = child.value(PATCH_INDEX_KEY) else {
		return Ok(None);
	};
	usize::decode(raw)
		.map(Some)
		.map_err(|source| HydrateError::MalformedScalar {
			type_name: desc.owner,
			key: PATCH_INDEX_KEY,
			raw: raw.to_string(),
			source,
		})
}

impl<T: 'static, E: ?Sized + Polymorphic> FieldBinding<T> for DispatchListField<T, E> {
	fn is_set(&self, target: &mut T) -> bool {
		!(self.access)(target).is_empty()
	}

	fn apply(
		&self,
		desc: &BindingDescriptor,
		target: &mut T,
		node: &Node,
		hx: &mut HydrationContext<'_>,
	) -> Result<(), HydrateError> {
		let Some(source) = node.node(desc.key) else {
			return Err(shape_mismatch(desc, "a block"));
		};
		let items = (self.access)(target);

		if desc.merges() && !items.is_empty() {
			// each existing element is edited at most once per pass
			let mut edited: SmallVec<[bool; 16]> = smallvec![false; items.len()];
			for (index, child) in source.children().iter().enumerate() {
				let Some(ctor) = hx.resolve::<E>(desc, child.name())? else {
					continue;
				};
				// appended elements are never patch targets in the same pass
				let existing = edited.len();
				hx.descend(element_segment(desc.key, index), |hx| {
					match self.select(desc, &items[..existing], &edited, ctor, child)? {
						Some(i) => {
							edited[i] = true;
							ctor.merge_into(&mut *items[i], child, hx).map(drop)
						}
						None => {
							items.push(ctor.construct(child, hx)?);
							Ok(())
						}
					}
				})?;
			}
			return Ok(());
		}

		let mut fresh = Vec::with_capacity(source.children().len());
		for (index, child) in source.children().iter().enumerate() {
			let Some(ctor) = hx.resolve::<E>(desc, child.name())? else {
				continue;
			};
			fresh.push(hx.descend(element_segment(desc.key, index), |hx| ctor.construct(child, hx))?);
		}
		*items = fresh;
		Ok(())
	}
}

pub(crate) struct MapField<T, E> {
	pub access: fn(&mut T) -> &mut IndexMap<String, E>,
}

impl<T: 'static, E: Bindable> FieldBinding<T> for MapField<T, E> {
	fn is_set(&self, target: &mut T) -> bool {
		!(self.access)(target).is_empty()
	}

	fn apply(
		&self,
		desc: &BindingDescriptor,
		target: &mut T,
		node: &Node,
		hx: &mut HydrationContext<'_>,
	) -> Result<(), HydrateError> {
		let Some(source) = node.node(desc.key) else {
			return Err(shape_mismatch(desc, "a block"));
		};
		if desc.merge {
			return Err(HydrateError::UnsupportedMergeTarget {
				type_name: desc.owner,
				key: desc.key,
			});
		}

		let mut fresh = IndexMap::with_capacity(source.children().len());
		for child in source.children() {
			let segment = format!("{}.{}", desc.key, child.name());
			let value = hx.descend(segment, |hx| hx.construct::<E>(child))?;
			fresh.insert(child.name().to_string(), value);
		}
		*(self.access)(target) = fresh;
		Ok(())
	}
}
