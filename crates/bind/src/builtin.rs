//! Bindings for value types that span several lines of a block.

use orrery_scalar::Curve;

use crate::binding::{Bindable, BindingBuilder};

/// A curve block lists one `key = position value [in out]` line per key.
///
/// ```text
/// heightCurve
/// {
/// 	key = 0 0
/// 	key = 1 1 0.5 0.5
/// }
/// ```
impl Bindable for Curve {
	fn bind(b: &mut BindingBuilder<Self>) {
		b.value("key", |curve| curve).join("\n").optional();
	}
}
