//! In-memory reference implementation of the mutation handler contract.
//!
//! [`MemoryModel`] is a deliberately small object store: enough model to drive
//! the journal end-to-end in tests and demos, with the one piece of real
//! bookkeeping the contract demands — deletion keeps the object's state around
//! so a later undelete can restore it.

use rustc_hash::{FxHashMap, FxHashSet};
use tracing::trace;

use crate::handler::{MutationError, MutationHandler};
use crate::ids::ObjId;
use crate::property::PropertyRef;
use crate::value::Value;

/// Storage for one property on one object.
#[derive(Debug, Clone)]
enum Slot {
	Single(Value),
	Many(Vec<Value>),
}

/// One managed object: a class name and its populated slots, keyed by
/// property name.
#[derive(Debug, Clone)]
struct ManagedObject {
	class: String,
	/// Deleted objects keep their slots as the undelete tombstone.
	deleted: bool,
	slots: FxHashMap<String, Slot>,
}

/// In-memory managed-object store.
#[derive(Debug, Default)]
pub struct MemoryModel {
	objects: FxHashMap<ObjId, ManagedObject>,
	/// Classes whose instances are treated as clone-semantics values.
	clone_classes: FxHashSet<String>,
	next_id: u64,
}

impl MemoryModel {
	/// Creates an empty store.
	pub fn new() -> Self {
		Self::default()
	}

	/// Instantiates a new object of the given class and returns its handle.
	pub fn create_object(&mut self, class: &str) -> ObjId {
		self.next_id += 1;
		let id = ObjId(self.next_id);
		self.objects.insert(
			id,
			ManagedObject {
				class: class.to_string(),
				deleted: false,
				slots: FxHashMap::default(),
			},
		);
		trace!(%id, class, "object created");
		id
	}

	/// Marks a class as clone-semantics: values referencing its instances are
	/// reported as always-changed by [`MutationHandler::is_cloned_value`].
	pub fn mark_clone_class(&mut self, class: &str) {
		self.clone_classes.insert(class.to_string());
	}

	/// Returns `true` if the handle resolves to an object, deleted or not.
	pub fn contains(&self, object: ObjId) -> bool {
		self.objects.contains_key(&object)
	}

	/// Returns `true` if the object exists and is currently deleted.
	pub fn is_deleted(&self, object: ObjId) -> bool {
		self.objects.get(&object).is_some_and(|o| o.deleted)
	}

	/// Reads a single-valued slot directly, for inspection in tests.
	pub fn value_of(&self, object: ObjId, property: &PropertyRef) -> Option<&Value> {
		match self.objects.get(&object)?.slots.get(&property.name)? {
			Slot::Single(value) => Some(value),
			Slot::Many(_) => None,
		}
	}

	/// Reads a multi-valued slot directly, for inspection in tests.
	pub fn list_of(&self, object: ObjId, property: &PropertyRef) -> Option<&[Value]> {
		match self.objects.get(&object)?.slots.get(&property.name)? {
			Slot::Single(_) => None,
			Slot::Many(values) => Some(values),
		}
	}

	fn live(&self, object: ObjId) -> Result<&ManagedObject, MutationError> {
		let obj = self
			.objects
			.get(&object)
			.ok_or(MutationError::UnknownObject(object))?;
		if obj.deleted {
			return Err(MutationError::ObjectDeleted(object));
		}
		Ok(obj)
	}

	fn live_mut(&mut self, object: ObjId) -> Result<&mut ManagedObject, MutationError> {
		let obj = self
			.objects
			.get_mut(&object)
			.ok_or(MutationError::UnknownObject(object))?;
		if obj.deleted {
			return Err(MutationError::ObjectDeleted(object));
		}
		Ok(obj)
	}
}

fn require_single(property: &PropertyRef) -> Result<(), MutationError> {
	if property.is_many() {
		return Err(MutationError::CardinalityMismatch {
			property: property.to_string(),
		});
	}
	Ok(())
}

fn require_many(property: &PropertyRef) -> Result<(), MutationError> {
	if !property.is_many() {
		return Err(MutationError::CardinalityMismatch {
			property: property.to_string(),
		});
	}
	Ok(())
}

impl MutationHandler for MemoryModel {
	fn get_value(&self, object: ObjId, property: &PropertyRef) -> Result<Value, MutationError> {
		require_single(property)?;
		let obj = self.live(object)?;
		match obj.slots.get(&property.name) {
			Some(Slot::Single(value)) => Ok(value.clone()),
			Some(Slot::Many(_)) => Err(MutationError::CardinalityMismatch {
				property: property.to_string(),
			}),
			None => Ok(Value::None),
		}
	}

	fn set_value(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: &Value,
	) -> Result<(), MutationError> {
		require_single(property)?;
		let obj = self.live_mut(object)?;
		if value.is_none() {
			obj.slots.remove(&property.name);
		} else {
			obj.slots
				.insert(property.name.clone(), Slot::Single(value.clone()));
		}
		trace!(%object, property = %property, %value, "set");
		Ok(())
	}

	fn add_value(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: &Value,
		index: Option<usize>,
	) -> Result<(), MutationError> {
		require_many(property)?;
		let obj = self.live_mut(object)?;
		let slot = obj
			.slots
			.entry(property.name.clone())
			.or_insert_with(|| Slot::Many(Vec::new()));
		let Slot::Many(values) = slot else {
			return Err(MutationError::CardinalityMismatch {
				property: property.to_string(),
			});
		};
		match index {
			Some(index) if index > values.len() => {
				return Err(MutationError::IndexOutOfRange {
					property: property.to_string(),
					index,
					len: values.len(),
				});
			}
			Some(index) => values.insert(index, value.clone()),
			None => values.push(value.clone()),
		}
		trace!(%object, property = %property, %value, ?index, "add");
		Ok(())
	}

	fn remove_value(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: &Value,
	) -> Result<(), MutationError> {
		require_many(property)?;
		let obj = self.live_mut(object)?;
		let values = match obj.slots.get_mut(&property.name) {
			Some(Slot::Many(values)) => values,
			_ => {
				return Err(MutationError::ValueNotPresent {
					property: property.to_string(),
				});
			}
		};
		let Some(pos) = values.iter().position(|v| v == value) else {
			return Err(MutationError::ValueNotPresent {
				property: property.to_string(),
			});
		};
		values.remove(pos);
		trace!(%object, property = %property, %value, "remove");
		Ok(())
	}

	fn delete_object(&mut self, object: ObjId) -> Result<(), MutationError> {
		let obj = self.live_mut(object)?;
		obj.deleted = true;
		trace!(%object, "object deleted");
		Ok(())
	}

	fn undelete_object(&mut self, object: ObjId, restore: bool) -> Result<(), MutationError> {
		let obj = self
			.objects
			.get_mut(&object)
			.ok_or(MutationError::UnknownObject(object))?;
		if !obj.deleted {
			return Err(MutationError::NotDeleted(object));
		}
		obj.deleted = false;
		if !restore {
			obj.slots.clear();
		}
		trace!(%object, restore, "object undeleted");
		Ok(())
	}

	fn is_cloned_value(&self, value: &Value) -> bool {
		match value {
			Value::Object(id) => self
				.objects
				.get(id)
				.is_some_and(|o| self.clone_classes.contains(&o.class)),
			_ => false,
		}
	}
}

#[cfg(test)]
mod tests {
	use super::*;
	use crate::property::PropertyDef;

	#[test]
	fn set_then_get_round_trips() {
		let mut model = MemoryModel::new();
		let name = PropertyDef::single("Class", "name");
		let obj = model.create_object("Class");

		model.set_value(obj, &name, &Value::from("A")).unwrap();
		assert_eq!(model.get_value(obj, &name).unwrap(), Value::from("A"));

		model.set_value(obj, &name, &Value::None).unwrap();
		assert_eq!(model.get_value(obj, &name).unwrap(), Value::None);
	}

	#[test]
	fn unset_property_reads_as_none() {
		let mut model = MemoryModel::new();
		let name = PropertyDef::single("Class", "name");
		let obj = model.create_object("Class");
		assert_eq!(model.get_value(obj, &name).unwrap(), Value::None);
	}

	#[test]
	fn add_respects_index_and_remove_takes_first_match() {
		let mut model = MemoryModel::new();
		let tags = PropertyDef::many("Class", "tags");
		let obj = model.create_object("Class");

		model.add_value(obj, &tags, &Value::from("b"), None).unwrap();
		model
			.add_value(obj, &tags, &Value::from("a"), Some(0))
			.unwrap();
		assert_eq!(
			model.list_of(obj, &tags).unwrap(),
			&[Value::from("a"), Value::from("b")]
		);

		model.remove_value(obj, &tags, &Value::from("a")).unwrap();
		assert_eq!(model.list_of(obj, &tags).unwrap(), &[Value::from("b")]);

		let err = model
			.remove_value(obj, &tags, &Value::from("a"))
			.unwrap_err();
		assert!(matches!(err, MutationError::ValueNotPresent { .. }));
	}

	#[test]
	fn add_past_end_is_rejected() {
		let mut model = MemoryModel::new();
		let tags = PropertyDef::many("Class", "tags");
		let obj = model.create_object("Class");

		let err = model
			.add_value(obj, &tags, &Value::from("x"), Some(1))
			.unwrap_err();
		assert!(matches!(err, MutationError::IndexOutOfRange { .. }));
	}

	#[test]
	fn cardinality_is_enforced() {
		let mut model = MemoryModel::new();
		let name = PropertyDef::single("Class", "name");
		let tags = PropertyDef::many("Class", "tags");
		let obj = model.create_object("Class");

		assert!(matches!(
			model.add_value(obj, &name, &Value::from("x"), None),
			Err(MutationError::CardinalityMismatch { .. })
		));
		assert!(matches!(
			model.get_value(obj, &tags),
			Err(MutationError::CardinalityMismatch { .. })
		));
	}

	#[test]
	fn delete_keeps_state_for_restore() {
		let mut model = MemoryModel::new();
		let name = PropertyDef::single("Class", "name");
		let obj = model.create_object("Class");
		model.set_value(obj, &name, &Value::from("A")).unwrap();

		model.delete_object(obj).unwrap();
		assert!(model.is_deleted(obj));
		assert!(matches!(
			model.get_value(obj, &name),
			Err(MutationError::ObjectDeleted(_))
		));

		model.undelete_object(obj, true).unwrap();
		assert_eq!(model.get_value(obj, &name).unwrap(), Value::from("A"));
	}

	#[test]
	fn undelete_without_restore_comes_back_blank() {
		let mut model = MemoryModel::new();
		let name = PropertyDef::single("Class", "name");
		let obj = model.create_object("Class");
		model.set_value(obj, &name, &Value::from("A")).unwrap();

		model.delete_object(obj).unwrap();
		model.undelete_object(obj, false).unwrap();
		assert_eq!(model.get_value(obj, &name).unwrap(), Value::None);
	}

	#[test]
	fn undelete_of_live_object_is_an_error() {
		let mut model = MemoryModel::new();
		let obj = model.create_object("Class");
		assert!(matches!(
			model.undelete_object(obj, true),
			Err(MutationError::NotDeleted(_))
		));
	}

	#[test]
	fn clone_classes_mark_object_values() {
		let mut model = MemoryModel::new();
		model.mark_clone_class("Expression");
		let expr = model.create_object("Expression");
		let plain = model.create_object("Class");

		assert!(model.is_cloned_value(&Value::Object(expr)));
		assert!(!model.is_cloned_value(&Value::Object(plain)));
		assert!(!model.is_cloned_value(&Value::from("text")));
	}
}
