//! Compound edits: named, ordered transactions of atomic edits.

use std::fmt;

use quill_model::{MutationError, MutationHandler};
use tracing::{trace, warn};

use crate::atomic::AtomicEdit;

/// Identifies one compound edit within a journal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct EditId(pub u64);

impl fmt::Display for EditId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "t{}", self.0)
	}
}

/// How a recording came to exist.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RecordingOrigin {
	/// Opened by an explicit start call.
	Explicit,
	/// Auto-opened to absorb edits arriving outside a declared transaction,
	/// to be labeled by the next explicit start call.
	Anticipated,
	/// Defensive fallback when anticipation is off and an orphan edit
	/// arrives.
	Unidentified,
}

/// One logical transaction: an ordered list of atomic edits and a label.
///
/// Edits may only be appended while the transaction is in progress. Undo
/// walks the children strictly last-to-first (a later edit may depend on
/// state produced by an earlier one); redo walks them strictly first-to-last.
#[derive(Debug)]
pub struct CompoundEdit {
	id: EditId,
	label: String,
	origin: RecordingOrigin,
	edits: Vec<AtomicEdit>,
	in_progress: bool,
}

impl CompoundEdit {
	/// Opens a new transaction.
	pub fn new(id: EditId, label: impl Into<String>) -> Self {
		Self::with_origin(id, label.into(), RecordingOrigin::Explicit)
	}

	pub(crate) fn with_origin(id: EditId, label: String, origin: RecordingOrigin) -> Self {
		Self {
			id,
			label,
			origin,
			edits: Vec::new(),
			in_progress: true,
		}
	}

	pub fn id(&self) -> EditId {
		self.id
	}

	pub fn label(&self) -> &str {
		&self.label
	}

	pub fn origin(&self) -> RecordingOrigin {
		self.origin
	}

	/// The recorded atomic edits, in application order.
	pub fn edits(&self) -> &[AtomicEdit] {
		&self.edits
	}

	pub fn len(&self) -> usize {
		self.edits.len()
	}

	pub fn is_empty(&self) -> bool {
		self.edits.is_empty()
	}

	pub fn is_in_progress(&self) -> bool {
		self.in_progress
	}

	/// Adopts a pending anticipated recording under an explicit label.
	pub(crate) fn relabel(&mut self, label: &str) {
		self.label = label.to_string();
		self.origin = RecordingOrigin::Explicit;
	}

	/// Appends an atomic edit. Fails (and disposes the edit) once the
	/// transaction has ended.
	///
	/// Absorption is offered both ways before appending so richer edit kinds
	/// could coalesce; atomic edits are terminal, so today this always falls
	/// through to a plain append.
	pub fn append(&mut self, mut edit: AtomicEdit) -> bool {
		if !self.in_progress {
			warn!(id = %self.id, label = %self.label, "append to a closed transaction ignored");
			edit.die();
			return false;
		}
		if let Some(last) = self.edits.last_mut() {
			if last.absorb(&edit) {
				edit.die();
				return true;
			}
			if edit.absorb(last) {
				if let Some(mut superseded) = self.edits.pop() {
					superseded.die();
				}
				self.edits.push(edit);
				return true;
			}
		}
		trace!(id = %self.id, kind = edit.kind(), len = self.edits.len() + 1, "edit appended");
		self.edits.push(edit);
		true
	}

	/// Closes the transaction. Irreversible.
	pub fn end(&mut self) {
		self.in_progress = false;
	}

	/// A transaction is significant iff any child is.
	pub fn is_significant(&self, handler: &impl MutationHandler) -> bool {
		self.edits.iter().any(|edit| edit.is_significant(handler))
	}

	/// Unwinds the transaction, strictly LIFO.
	///
	/// Stops at the first failing child; the caller is responsible for
	/// treating a partial unwind as fatal.
	pub fn undo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		debug_assert!(!self.in_progress, "undo of an in-progress transaction");
		for edit in self.edits.iter().rev() {
			edit.undo(handler)?;
		}
		Ok(())
	}

	/// Re-applies the transaction, strictly FIFO.
	pub fn redo(&self, handler: &mut impl MutationHandler) -> Result<(), MutationError> {
		debug_assert!(!self.in_progress, "redo of an in-progress transaction");
		for edit in self.edits.iter() {
			edit.redo(handler)?;
		}
		Ok(())
	}

	/// Disposes all children, last-to-first, then empties the transaction.
	pub fn die(&mut self) {
		for edit in self.edits.iter_mut().rev() {
			edit.die();
		}
		self.edits.clear();
	}
}
