//! The hydration engine.
//!
//! [`Hydrator`] carries the configuration of a run: the registry that
//! supplies binding tables, the resolver for name-dispatched elements and
//! the [`HydrateOptions`]. Each top-level call opens a fresh
//! [`HydrationContext`] that tracks the document path being applied.
//!
//! For every binding of the target type the engine checks presence first:
//! a key with neither a value nor a block leaves the field untouched when
//! the binding is optional, or when it merges into a value that is already
//! set, and fails with [`HydrateError::MissingRequiredField`] otherwise.

use std::borrow::Cow;

use orrery_node::Node;

use crate::binding::{Bindable, Binding, BindingDescriptor};
use crate::error::HydrateError;
use crate::registry::BindingRegistry;
use crate::resolver::{Constructible, TypeResolver};


/// Default nesting limit for [`HydrateOptions::max_depth`].
pub const DEFAULT_MAX_DEPTH: usize = 64;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HydrateOptions {
	/// Fail on name-dispatched elements the resolver does not know, instead of skipping them.
	pub strict_types: bool,
	/// Deepest block nesting applied below the root.
	pub max_depth: usize,
}

impl Default for HydrateOptions {
	fn default() -> Self {
		Self {
			strict_types: false,
			max_depth: DEFAULT_MAX_DEPTH,
		}
	}
}

impl HydrateOptions {
	pub fn strict(mut self) -> Self {
		self.strict_types = true;
		self
	}

	pub fn with_max_depth(mut self, max_depth: usize) -> Self {
		self.max_depth = max_depth;
		self
	}
}

/// Entry point for applying documents to [`Bindable`] targets.
#[derive(Debug, Clone, Copy)]
pub struct Hydrator<'r> {
	registry: &'r BindingRegistry,
	resolver: Option<&'r TypeResolver>,
	options: HydrateOptions,
}

impl Default for Hydrator<'_> {
	fn default() -> Self {
		Self::new()
	}
}

impl<'r> Hydrator<'r> {
	/// A hydrator over the global registry, without a type resolver.
	pub fn new() -> Self {
		Self {
			registry: BindingRegistry::global(),
			resolver: None,
			options: HydrateOptions::default(),
		}
	}

	pub fn with_resolver(mut self, resolver: &'r TypeResolver) -> Self {
		self.resolver = Some(resolver);
		self
	}

	pub fn with_registry(mut self, registry: &'r BindingRegistry) -> Self {
		self.registry = registry;
		self
	}

	pub fn with_options(mut self, options: HydrateOptions) -> Self {
		self.options = options;
		self
	}

	pub fn options(&self) -> HydrateOptions {
		self.options
	}

	/// Builds a default `T` and applies `node` to it.
	///
	/// # Errors
	///
	/// Returns the first [`HydrateError`] raised by any binding or hook. The
	/// partially built value is discarded.
	pub fn hydrate<T: Bindable>(&self, node: &Node) -> Result<T, HydrateError> {
		self.context().construct(node)
	}

	/// Applies `node` to an existing `target`.
	///
	/// # Errors
	///
	/// Returns the first [`HydrateError`] raised by any binding or hook.
	/// Bindings applied before the failure keep the values they wrote.
	pub fn hydrate_into<T: Bindable>(&self, target: &mut T, node: &Node) -> Result<(), HydrateError> {
		self.context().hydrate_into(target, node)
	}

	pub(crate) fn context(&self) -> HydrationContext<'r> {
		HydrationContext {
			registry: self.registry,
			resolver: self.resolver,
			options: self.options,
			path: Vec::new(),
		}
	}
}

/// State of one top-level hydration call.
pub struct HydrationContext<'h> {
	registry: &'h BindingRegistry,
	resolver: Option<&'h TypeResolver>,
	options: HydrateOptions,
	path: Vec<Cow<'static, str>>,
}

impl<'h> HydrationContext<'h> {
	pub fn options(&self) -> HydrateOptions {
		self.options
	}

	/// Current position below the root, e.g. `Body.Mods[1]`.
	pub fn path(&self) -> String {
		self.path.join(".")
	}

	pub fn depth(&self) -> usize {
		self.path.len()
	}

	/// Builds a default `T` and applies `node` to it.
	pub fn construct<T: Bindable>(&mut self, node: &Node) -> Result<T, HydrateError> {
		let mut target = T::default();
		self.hydrate_into(&mut target, node)?;
		Ok(target)
	}

	/// Applies every binding of `T`, running hooks between the phases.
	pub fn hydrate_into<T: Bindable>(&mut self, target: &mut T, node: &Node) -> Result<(), HydrateError> {
		let table = self.registry.table::<T>();
		tracing::trace!(
			type_name = table.type_name(),
			node = node.name(),
			path = %self.path(),
			"hydrating"
		);

		for binding in table.pre_apply() {
			self.resolve_binding(binding, target, node)?;
		}
		if let Some(hook) = table.hooks().pre {
			hook(target, node)?;
		}
		for binding in table.post_apply() {
			self.resolve_binding(binding, target, node)?;
		}
		if let Some(hook) = table.hooks().post {
			hook(target, node)?;
		}
		Ok(())
	}

	fn resolve_binding<T: Bindable>(&mut self, binding: &Binding<T>, target: &mut T, node: &Node) -> Result<(), HydrateError> {
		let desc = binding.descriptor();
		if !node.has_node(desc.key) && !node.has_value(desc.key) {
			let keep_existing = desc.merges() && binding.field.is_set(target);
			if !desc.optional && !keep_existing {
				return Err(HydrateError::MissingRequiredField {
					type_name: desc.owner,
					key: desc.key,
				});
			}
			tracing::trace!(type_name = desc.owner, key = desc.key, "absent, left as is");
			return Ok(());
		}

		tracing::trace!(type_name = desc.owner, key = desc.key, shape = ?desc.shape, "applying");
		binding.field.apply(desc, target, node, self)
	}

	/// Runs `f` one level deeper, under `segment`.
	///
	/// Errors from `f` gain `segment` as a path prefix.
	pub(crate) fn descend<R>(
		&mut self,
		segment: impl Into<Cow<'static, str>>,
		f: impl FnOnce(&mut Self) -> Result<R, HydrateError>,
	) -> Result<R, HydrateError> {
		let segment = segment.into();
		if self.path.len() >= self.options.max_depth {
			return Err(HydrateError::DepthExceeded {
				limit: self.options.max_depth,
			}
			.nest(&segment));
		}

		self.path.push(segment);
		let result = f(self);
		let segment = self.path.pop().unwrap_or_default();
		result.map_err(|err| err.nest(&segment))
	}

	/// Resolves a name-dispatched element type.
	///
	/// `Ok(None)` means the element is skipped.
	pub(crate) fn resolve<E: ?Sized + 'static>(
		&self,
		desc: &BindingDescriptor,
		name: &str,
	) -> Result<Option<&'h Constructible<E>>, HydrateError> {
		if let Some(found) = self.resolver.and_then(|resolver| resolver.resolve::<E>(name)) {
			return Ok(Some(found));
		}
		if self.options.strict_types {
			return Err(HydrateError::TypeResolutionFailure {
				key: desc.key,
				attempted: name.to_string(),
			});
		}
		tracing::warn!(
			type_name = desc.owner,
			key = desc.key,
			attempted = name,
			path = %self.path(),
			"no registered type, skipping element"
		);
		Ok(None)
	}
}
