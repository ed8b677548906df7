//! Host trait connecting the journal to the object model.

use quill_model::{MemoryModel, MutationHandler};

/// Everything the journal needs from its embedder.
///
/// The mutation half comes from [`MutationHandler`]; this trait adds the
/// observer notifications the manager emits at transaction boundaries. All
/// notifications default to no-ops so a bare model can be used as a host
/// directly.
pub trait JournalHost: MutationHandler {
	/// A recording was explicitly stopped.
	fn notify_recording_stopped(&mut self, _label: &str) {}

	/// A transaction was undone.
	fn notify_undone(&mut self, _label: &str) {}

	/// A transaction was redone.
	fn notify_redone(&mut self, _label: &str) {}

	/// Undo was requested with nothing before the cursor.
	fn notify_nothing_to_undo(&mut self) {}

	/// Redo was requested with nothing after the cursor.
	fn notify_nothing_to_redo(&mut self) {}

	/// A replay failure forced the whole history to be discarded. Callers
	/// should stop offering undo/redo until a fresh editing context exists.
	fn notify_history_discarded(&mut self) {}
}

impl JournalHost for MemoryModel {}
