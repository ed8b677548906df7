//! The mutation handler contract.
//!
//! A [`MutationHandler`] is the journal's only way to touch a managed object:
//! every replayed edit resolves to one call on this trait. The object model
//! owns the implementation; the journal owns nothing but handles.

use thiserror::Error;

use crate::ids::ObjId;
use crate::property::PropertyRef;
use crate::value::Value;

/// Errors reported by a mutation handler.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum MutationError {
	/// The object handle does not resolve to a live object.
	#[error("unknown object {0}")]
	UnknownObject(ObjId),

	/// The object exists but is currently deleted.
	#[error("object {0} is deleted")]
	ObjectDeleted(ObjId),

	/// Undelete was requested for an object that is not deleted.
	#[error("object {0} is not deleted")]
	NotDeleted(ObjId),

	/// The property is not defined on the object's type.
	#[error("unknown property {property} on object {object}")]
	UnknownProperty {
		object: ObjId,
		/// Display name of the property that failed to resolve.
		property: String,
	},

	/// A single-valued accessor was used on a collection property, or vice
	/// versa.
	#[error("property {property} has the wrong cardinality for this access")]
	CardinalityMismatch { property: String },

	/// The value to remove is not present in the collection.
	#[error("value not present in {property}")]
	ValueNotPresent { property: String },

	/// An insertion index is past the end of the collection.
	#[error("index {index} out of range for {property} (len {len})")]
	IndexOutOfRange {
		property: String,
		index: usize,
		len: usize,
	},
}

/// Capability to perform and reverse property mutations on managed objects.
///
/// Implementations perform the mutation immediately and synchronously; the
/// journal relies on a successful return meaning the object graph has already
/// changed. Old/new values recorded around these calls are captured by the
/// caller *before* the mutation takes effect.
pub trait MutationHandler {
	/// Reads the current value of a single-valued property.
	fn get_value(&self, object: ObjId, property: &PropertyRef) -> Result<Value, MutationError>;

	/// Writes a single-valued property. `Value::None` clears it.
	fn set_value(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: &Value,
	) -> Result<(), MutationError>;

	/// Inserts a value into a multi-valued property, appending when `index`
	/// is `None`.
	fn add_value(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: &Value,
		index: Option<usize>,
	) -> Result<(), MutationError>;

	/// Removes the first occurrence of a value from a multi-valued property.
	fn remove_value(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: &Value,
	) -> Result<(), MutationError>;

	/// Deletes an object. The handler must retain whatever it needs to honor
	/// a later [`undelete_object`] with `restore = true`.
	///
	/// [`undelete_object`]: Self::undelete_object
	fn delete_object(&mut self, object: ObjId) -> Result<(), MutationError>;

	/// Brings a deleted object back. With `restore` set, the object's property
	/// values from before the deletion are reinstated; otherwise it comes back
	/// blank.
	fn undelete_object(&mut self, object: ObjId, restore: bool) -> Result<(), MutationError>;

	/// The object model's logical equality between two property values.
	///
	/// Defaults to strict equality. Models with richer value semantics (for
	/// example case-folded names or normalized references) may loosen this.
	fn values_equal(&self, a: &Value, b: &Value) -> bool {
		a == b
	}

	/// Returns `true` for values with clone semantics.
	///
	/// Such values are copied rather than shared when assigned, so an
	/// equality check between old and new cannot prove the assignment was a
	/// no-op. The journal treats them as always changed.
	fn is_cloned_value(&self, _value: &Value) -> bool {
		false
	}
}
