//! Property descriptors.

use std::fmt;
use std::sync::Arc;

/// How many values a property holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Cardinality {
	/// Exactly zero or one value.
	Single,
	/// An ordered collection of values.
	Many,
}

/// Shared handle to a property descriptor.
///
/// Descriptors are supplied by the object model and treated as immutable
/// values; the journal only stores them for display and for addressing the
/// mutation handler.
pub type PropertyRef = Arc<PropertyDef>;

/// Descriptor of one mutable property on a managed type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PropertyDef {
	/// Name of the owning type, for display.
	pub owner: String,
	/// Property name, unique within the owning type.
	pub name: String,
	pub cardinality: Cardinality,
}

impl PropertyDef {
	pub fn new(owner: &str, name: &str, cardinality: Cardinality) -> PropertyRef {
		Arc::new(Self {
			owner: owner.to_string(),
			name: name.to_string(),
			cardinality,
		})
	}

	/// Descriptor for a single-valued property.
	pub fn single(owner: &str, name: &str) -> PropertyRef {
		Self::new(owner, name, Cardinality::Single)
	}

	/// Descriptor for a multi-valued property.
	pub fn many(owner: &str, name: &str) -> PropertyRef {
		Self::new(owner, name, Cardinality::Many)
	}

	/// Returns `true` if the property holds a collection.
	#[inline]
	pub fn is_many(&self) -> bool {
		self.cardinality == Cardinality::Many
	}
}

impl fmt::Display for PropertyDef {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "{}.{}", self.owner, self.name)
	}
}
