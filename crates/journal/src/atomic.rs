//! Atomic edits: the smallest replayable unit.
//!
//! One atomic edit records one property mutation on one managed object with
//! enough data to invert itself. Edits are *terminal*: they never absorb each
//! other, which pins replay granularity at the single-property level.

use quill_model::{MutationError, MutationHandler, ObjId, PropertyRef, Value};
use tracing::trace;

/// A reversible record of one property mutation.
///
/// Replay goes through the mutation handler, never through object internals.
/// A died edit keeps its variant but has dropped every object/value
/// reference; replaying it is a no-op.
#[derive(Debug)]
pub enum AtomicEdit {
	/// An object was instantiated.
	Create(CreateEdit),
	/// A single-valued property changed.
	Set(SetEdit),
	/// A value was inserted into a multi-valued property.
	Add(AddEdit),
	/// A value was taken out of a multi-valued property.
	Remove(RemoveEdit),
}

impl AtomicEdit {
	pub fn create(object: ObjId) -> Self {
		AtomicEdit::Create(CreateEdit {
			object: Some(object),
		})
	}

	pub fn set(object: ObjId, property: PropertyRef, old: Value, new: Value) -> Self {
		AtomicEdit::Set(SetEdit {
			object: Some(object),
			property: Some(property),
			old,
			new,
		})
	}

	pub fn add(object: ObjId, property: PropertyRef, value: Value, index: Option<usize>) -> Self {
		AtomicEdit::Add(AddEdit {
			object: Some(object),
			property: Some(property),
			value,
			index,
		})
	}

	pub fn remove(object: ObjId, property: PropertyRef, value: Value) -> Self {
		AtomicEdit::Remove(RemoveEdit {
			object: Some(object),
			property: Some(property),
			value,
		})
	}

	/// The mutated object, or `None` once the edit has died.
	pub fn object(&self) -> Option<ObjId> {
		match self {
			AtomicEdit::Create(e) => e.object,
			AtomicEdit::Set(e) => e.object,
			AtomicEdit::Add(e) => e.object,
			AtomicEdit::Remove(e) => e.object,
		}
	}

	/// The mutated property. `None` for Create edits and for died edits.
	pub fn property(&self) -> Option<&PropertyRef> {
		match self {
			AtomicEdit::Create(_) => None,
			AtomicEdit::Set(e) => e.property.as_ref(),
			AtomicEdit::Add(e) => e.property.as_ref(),
			AtomicEdit::Remove(e) => e.property.as_ref(),
		}
	}

	/// Short tag for logging.
	pub fn kind(&self) -> &'static str {
		match self {
			AtomicEdit::Create(_) => "create",
			AtomicEdit::Set(_) => "set",
			AtomicEdit::Add(_) => "add",
			AtomicEdit::Remove(_) => "remove",
		}
	}

	/// Whether this edit represents an observable state change worth keeping.
	pub fn is_significant(&self, handler: &impl MutationHandler) -> bool {
		match self {
			AtomicEdit::Create(_) | AtomicEdit::Add(_) | AtomicEdit::Remove(_) => true,
			AtomicEdit::Set(e) => e.is_significant(handler),
		}
	}

	/// Reverses the recorded mutation through the handler.
	pub fn undo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		trace!(kind = self.kind(), object = ?self.object(), "undo edit");
		match self {
			AtomicEdit::Create(e) => e.undo(handler),
			AtomicEdit::Set(e) => e.undo(handler),
			AtomicEdit::Add(e) => e.undo(handler),
			AtomicEdit::Remove(e) => e.undo(handler),
		}
	}

	/// Re-applies the recorded mutation through the handler.
	pub fn redo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		trace!(kind = self.kind(), object = ?self.object(), "redo edit");
		match self {
			AtomicEdit::Create(e) => e.redo(handler),
			AtomicEdit::Set(e) => e.redo(handler),
			AtomicEdit::Add(e) => e.redo(handler),
			AtomicEdit::Remove(e) => e.redo(handler),
		}
	}

	/// Attempts to merge another edit into this one.
	///
	/// Atomic edits are terminal and never coalesce; this hook exists so a
	/// transaction can offer absorption before falling back to a plain
	/// append.
	pub fn absorb(&mut self, _other: &AtomicEdit) -> bool {
		false
	}

	/// Drops every object/value reference held by this edit. Idempotent.
	pub fn die(&mut self) {
		match self {
			AtomicEdit::Create(e) => e.die(),
			AtomicEdit::Set(e) => e.die(),
			AtomicEdit::Add(e) => e.die(),
			AtomicEdit::Remove(e) => e.die(),
		}
	}
}

/// Record of an object instantiation.
#[derive(Debug)]
pub struct CreateEdit {
	object: Option<ObjId>,
}

impl CreateEdit {
	fn undo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		let Some(object) = self.object else {
			return Ok(());
		};
		handler.delete_object(object)
	}

	/// The handler, not the journal, remembers what the undeleter restores.
	fn redo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		let Some(object) = self.object else {
			return Ok(());
		};
		handler.undelete_object(object, true)
	}

	fn die(&mut self) {
		self.object = None;
	}
}

/// Record of a single-valued property change.
#[derive(Debug)]
pub struct SetEdit {
	object: Option<ObjId>,
	property: Option<PropertyRef>,
	old: Value,
	new: Value,
}

impl SetEdit {
	fn is_significant(&self, handler: &impl MutationHandler) -> bool {
		if self.old == self.new {
			return false;
		}
		if self.old.is_none() {
			return true;
		}
		// Clone-semantics values are copied on assignment, so equality
		// between old and new cannot prove a no-op.
		!(handler.values_equal(&self.old, &self.new) && !handler.is_cloned_value(&self.new))
	}

	fn undo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		let (Some(object), Some(property)) = (self.object, self.property.as_ref()) else {
			return Ok(());
		};
		handler.set_value(object, property, &self.old)
	}

	fn redo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		let (Some(object), Some(property)) = (self.object, self.property.as_ref()) else {
			return Ok(());
		};
		handler.set_value(object, property, &self.new)
	}

	fn die(&mut self) {
		self.object = None;
		self.property = None;
		self.old = Value::None;
		self.new = Value::None;
	}
}

/// Record of an insertion into a multi-valued property.
#[derive(Debug)]
pub struct AddEdit {
	object: Option<ObjId>,
	property: Option<PropertyRef>,
	value: Value,
	index: Option<usize>,
}

impl AddEdit {
	fn undo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		let (Some(object), Some(property)) = (self.object, self.property.as_ref()) else {
			return Ok(());
		};
		handler.remove_value(object, property, &self.value)
	}

	fn redo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		let (Some(object), Some(property)) = (self.object, self.property.as_ref()) else {
			return Ok(());
		};
		handler.add_value(object, property, &self.value, self.index)
	}

	fn die(&mut self) {
		self.object = None;
		self.property = None;
		self.value = Value::None;
	}
}

/// Record of a removal from a multi-valued property.
///
/// The removal position is not recorded, so undo re-adds at the end of the
/// collection.
#[derive(Debug)]
pub struct RemoveEdit {
	object: Option<ObjId>,
	property: Option<PropertyRef>,
	value: Value,
}

impl RemoveEdit {
	fn undo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		let (Some(object), Some(property)) = (self.object, self.property.as_ref()) else {
			return Ok(());
		};
		handler.add_value(object, property, &self.value, None)
	}

	fn redo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		let (Some(object), Some(property)) = (self.object, self.property.as_ref()) else {
			return Ok(());
		};
		handler.remove_value(object, property, &self.value)
	}

	fn die(&mut self) {
		self.object = None;
		self.property = None;
		self.value = Value::None;
	}
}
