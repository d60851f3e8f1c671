/// One block of a configuration document.
///
/// Values and children are append-only and keep insertion order. Lookups are
/// exact, case-sensitive string matches.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Node {
	name: String,
	values: Vec<(String, String)>,
	children: Vec<Node>,
}

impl Node {
	/// Creates an empty node with the given name.
	pub fn new(name: impl Into<String>) -> Self {
		Self {
			name: name.into(),
			..Self::default()
		}
	}

	pub fn name(&self) -> &str {
		&self.name
	}

	/// Returns `true` if at least one value is stored under `key`.
	pub fn has_value(&self, key: &str) -> bool {
		self.values.iter().any(|(k, _)| k == key)
	}

	/// Returns `true` if at least one child is named `name`.
	pub fn has_node(&self, name: &str) -> bool {
		self.children.iter().any(|child| child.name == name)
	}

	/// First value stored under `key`.
	pub fn value(&self, key: &str) -> Option<&str> {
		self.values
			.iter()
			.find(|(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// Every value stored under `key`, in document order.
	///
	/// The yielded values borrow from the node only, so they outlive `key`.
	pub fn values<'a, 'k>(&'a self, key: &'k str) -> impl Iterator<Item = &'a str> + use<'a, 'k> {
		self.values
			.iter()
			.filter(move |(k, _)| k == key)
			.map(|(_, v)| v.as_str())
	}

	/// First child named `name`.
	pub fn node(&self, name: &str) -> Option<&Node> {
		self.children.iter().find(|child| child.name == name)
	}

	/// Every child named `name`, in document order.
	pub fn nodes<'a, 'k>(&'a self, name: &'k str) -> impl Iterator<Item = &'a Node> + use<'a, 'k> {
		self.children.iter().filter(move |child| child.name == name)
	}

	pub fn add_value(&mut self, key: impl Into<String>, value: impl Into<String>) -> &mut Self {
		self.values.push((key.into(), value.into()));
		self
	}

	/// Appends `child` and returns a handle to it.
	pub fn add_node(&mut self, child: Node) -> &mut Node {
		self.children.push(child);
		let last = self.children.len() - 1;
		&mut self.children[last]
	}

	pub fn with_value(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
		self.add_value(key, value);
		self
	}

	pub fn with_node(mut self, child: Node) -> Self {
		self.children.push(child);
		self
	}

	/// All `(key, value)` pairs in document order.
	pub fn entries(&self) -> &[(String, String)] {
		&self.values
	}

	pub fn children(&self) -> &[Node] {
		&self.children
	}

	pub fn is_empty(&self) -> bool {
		self.values.is_empty() && self.children.is_empty()
	}

	/// Resolves a dotted path of child names starting below this node.
	///
	/// Each segment takes the first child with that name. An empty path
	/// resolves to `self`.
	pub fn find(&self, path: &str) -> Option<&Node> {
		if path.is_empty() {
			return Some(self);
		}
		path.split('.').try_fold(self, |node, segment| node.node(segment))
	}
}
