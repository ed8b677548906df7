//! Capture-before-mutate glue between the object model and the journal.
//!
//! The mutation layer must submit each edit with the old value captured
//! *before* the mutation took effect. [`Recorder`] packages that protocol:
//! read, mutate, submit — in that order, submitting only when the mutation
//! actually happened.

use quill_model::{MutationError, ObjId, PropertyRef, Value};

use crate::atomic::AtomicEdit;
use crate::host::JournalHost;
use crate::manager::UndoManager;

/// Performs mutations through a host and journals each one.
pub struct Recorder<'a, H: JournalHost> {
	journal: &'a mut UndoManager,
	host: &'a mut H,
}

impl<'a, H: JournalHost> Recorder<'a, H> {
	pub fn new(journal: &'a mut UndoManager, host: &'a mut H) -> Self {
		Self { journal, host }
	}

	/// Journals the instantiation of an object the host has already created.
	pub fn created(&mut self, object: ObjId) {
		self.journal.submit(AtomicEdit::create(object), self.host);
	}

	/// Sets a single-valued property, journaling the previous value.
	pub fn set(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: Value,
	) -> Result<(), MutationError> {
		let old = self.host.get_value(object, property)?;
		self.host.set_value(object, property, &value)?;
		self.journal
			.submit(AtomicEdit::set(object, property.clone(), old, value), self.host);
		Ok(())
	}

	/// Inserts into a multi-valued property, journaling the insertion.
	pub fn add(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: Value,
		index: Option<usize>,
	) -> Result<(), MutationError> {
		self.host.add_value(object, property, &value, index)?;
		self.journal
			.submit(AtomicEdit::add(object, property.clone(), value, index), self.host);
		Ok(())
	}

	/// Removes from a multi-valued property, journaling the removal.
	pub fn remove(
		&mut self,
		object: ObjId,
		property: &PropertyRef,
		value: Value,
	) -> Result<(), MutationError> {
		self.host.remove_value(object, property, &value)?;
		self.journal
			.submit(AtomicEdit::remove(object, property.clone(), value), self.host);
		Ok(())
	}
}
