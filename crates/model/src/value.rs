//! Opaque property values.

use std::fmt;

use crate::ids::ObjId;

/// A property value as the journal sees it.
///
/// The journal never interprets values; it only stores them, compares them, and
/// hands them back to the model. Strict `==` on [`Value`] is the identity check
/// used to drop self-assignments; the object model's looser logical equality
/// lives on [`MutationHandler::values_equal`].
///
/// [`MutationHandler::values_equal`]: crate::MutationHandler::values_equal
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
	/// Absent value. Setting a property to `None` clears it.
	#[default]
	None,
	Bool(bool),
	Int(i64),
	Float(f64),
	Str(String),
	/// Reference to another managed object.
	Object(ObjId),
}

impl Value {
	/// Returns `true` if this is the absent value.
	#[inline]
	pub fn is_none(&self) -> bool {
		matches!(self, Value::None)
	}

	/// Returns `true` if this value holds anything at all.
	#[inline]
	pub fn is_some(&self) -> bool {
		!self.is_none()
	}
}

impl fmt::Display for Value {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			Value::None => write!(f, "<none>"),
			Value::Bool(v) => write!(f, "{v}"),
			Value::Int(v) => write!(f, "{v}"),
			Value::Float(v) => write!(f, "{v}"),
			Value::Str(v) => write!(f, "{v:?}"),
			Value::Object(id) => write!(f, "{id}"),
		}
	}
}

impl From<&str> for Value {
	fn from(v: &str) -> Self {
		Value::Str(v.to_string())
	}
}

impl From<String> for Value {
	fn from(v: String) -> Self {
		Value::Str(v)
	}
}

impl From<i64> for Value {
	fn from(v: i64) -> Self {
		Value::Int(v)
	}
}

impl From<bool> for Value {
	fn from(v: bool) -> Self {
		Value::Bool(v)
	}
}

impl From<ObjId> for Value {
	fn from(v: ObjId) -> Self {
		Value::Object(v)
	}
}
