//! Process-wide cache of binding tables.

use std::any::{Any, TypeId};
use std::sync::{Arc, LazyLock};

use parking_lot::RwLock;
use rustc_hash::FxHashMap as HashMap;

use crate::binding::{Bindable, BindingTable};

static GLOBAL: LazyLock<BindingRegistry> = LazyLock::new(BindingRegistry::new);

/// Lazily built [`BindingTable`]s, keyed by target type.
///
/// Tables are built outside the lock. When two threads build the same table
/// concurrently, the first one inserted is kept and returned to both.
#[derive(Default)]
pub struct BindingRegistry {
	tables: RwLock<HashMap<TypeId, Arc<dyn Any + Send + Sync>>>,
}

impl BindingRegistry {
	pub fn new() -> Self {
		Self::default()
	}

	/// The registry shared by [`hydrate`](crate::hydrate) and [`Hydrator::new`](crate::Hydrator::new).
	pub fn global() -> &'static BindingRegistry {
		&GLOBAL
	}

	/// Returns the table for `T`, building it on first use.
	pub fn table<T: Bindable>(&self) -> Arc<BindingTable<T>> {
		let id = TypeId::of::<T>();
		let cached = self.tables.read().get(&id).cloned();
		if let Some(table) = cached
			&& let Ok(table) = table.downcast::<BindingTable<T>>()
		{
			return table;
		}

		let built = Arc::new(BindingTable::<T>::build());
		tracing::debug!(
			type_name = built.type_name(),
			pre = built.pre_apply().len(),
			post = built.post_apply().len(),
			"built binding table"
		);
		let stored = self
			.tables
			.write()
			.entry(id)
			.or_insert_with(|| built.clone() as Arc<dyn Any + Send + Sync>)
			.clone();
		stored.downcast::<BindingTable<T>>().unwrap_or(built)
	}

	/// Number of cached tables.
	pub fn len(&self) -> usize {
		self.tables.read().len()
	}

	pub fn is_empty(&self) -> bool {
		self.tables.read().is_empty()
	}
}

impl std::fmt::Debug for BindingRegistry {
	fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
		f.debug_struct("BindingRegistry").field("tables", &self.len()).finish()
	}
}
