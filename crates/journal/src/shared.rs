//! Lock-guarded journal handle for shared use.
//!
//! The journal assumes a single logical editing timeline. [`SharedJournal`]
//! makes that safe to hand to multiple owners: every public operation is one
//! critical section on the manager's own lock, so concurrent callers
//! serialize rather than race. This is safe-for-concurrent-access, not
//! concurrent editing.

use std::sync::Arc;

use parking_lot::Mutex;

use crate::atomic::AtomicEdit;
use crate::compound::EditId;
use crate::error::JournalError;
use crate::host::JournalHost;
use crate::manager::{JournalConfig, UndoManager};

/// Cloneable handle to one journal.
#[derive(Clone, Default)]
pub struct SharedJournal {
	inner: Arc<Mutex<UndoManager>>,
}

impl SharedJournal {
	pub fn new() -> Self {
		Self::default()
	}

	pub fn with_config(config: JournalConfig) -> Self {
		Self {
			inner: Arc::new(Mutex::new(UndoManager::with_config(config))),
		}
	}

	pub fn start_recording(&self, label: &str) -> Option<EditId> {
		self.inner.lock().start_recording(label)
	}

	pub fn stop_recording(&self, host: &mut impl JournalHost, id: EditId) -> bool {
		self.inner.lock().stop_recording(host, id)
	}

	pub fn submit(&self, edit: AtomicEdit, host: &mut impl JournalHost) {
		self.inner.lock().submit(edit, host);
	}

	pub fn undo(&self, host: &mut impl JournalHost) -> Result<(), JournalError> {
		self.inner.lock().undo(host)
	}

	pub fn redo(&self, host: &mut impl JournalHost) -> Result<(), JournalError> {
		self.inner.lock().redo(host)
	}

	pub fn can_undo(&self) -> bool {
		self.inner.lock().can_undo()
	}

	pub fn can_redo(&self) -> bool {
		self.inner.lock().can_redo()
	}

	pub fn set_enabled(&self, enabled: bool) {
		self.inner.lock().set_enabled(enabled);
	}

	pub fn set_anticipated_recording(&self, anticipation: bool) {
		self.inner.lock().set_anticipated_recording(anticipation);
	}

	pub fn clear(&self) {
		self.inner.lock().clear();
	}

	/// Runs a closure under the journal lock, for multi-step sequences that
	/// must not interleave with other callers.
	pub fn with<R>(&self, f: impl FnOnce(&mut UndoManager) -> R) -> R {
		f(&mut self.inner.lock())
	}
}
