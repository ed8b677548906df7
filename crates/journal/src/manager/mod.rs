//! The journal itself: a linear history of transactions plus a cursor.
//!
//! The [`UndoManager`] routes incoming atomic edits into the currently open
//! transaction (or an implicitly created one) and drives undo/redo traversal
//! over the closed ones. The host is passed into each operation rather than
//! stored, so the journal owns nothing but its log.
//!
//! # Architecture
//!
//! ```text
//! UndoManager                     JournalHost (object model implements)
//! ┌───────────────────┐           ┌────────────────────────────┐
//! │ history: Vec<...> │           │ set_value()/add_value()/…  │
//! │ next (cursor)     │◄─────────►│ delete/undelete_object()   │
//! │ open recording    │           │ values_equal()             │
//! │                   │           │ notify_*()                 │
//! │ submit()          │           └────────────────────────────┘
//! │ start/stop        │
//! │ undo()/redo()     │
//! └───────────────────┘
//! ```
//!
//! Edits before `next` have been applied; edits at and after it are available
//! for redo. Opening a recording truncates everything after the cursor.

use tracing::{trace, warn};

use crate::atomic::AtomicEdit;
use crate::compound::{CompoundEdit, EditId, RecordingOrigin};
use crate::error::{Blocked, HistoryLost, JournalError, ReplayDirection};
use crate::host::JournalHost;

/// Label given to recordings opened as a defensive fallback, when an edit
/// arrives outside any declared transaction and anticipation is off.
pub const UNIDENTIFIED_LABEL: &str = "<unidentified>";

/// Construction-time journal modes.
#[derive(Debug, Clone, Copy)]
pub struct JournalConfig {
	/// Master switch. While off, submissions and undo/redo are ignored.
	pub enabled: bool,
	/// Absorb orphan edits into an unlabeled recording that the next
	/// explicit start call adopts, instead of falling back to the
	/// unidentified sentinel.
	pub anticipated_recording: bool,
}

impl Default for JournalConfig {
	fn default() -> Self {
		Self {
			enabled: true,
			anticipated_recording: true,
		}
	}
}

/// Transactional edit journal with a single editing timeline.
#[derive(Debug)]
pub struct UndoManager {
	/// Closed and open transactions, oldest first.
	history: Vec<CompoundEdit>,
	/// Cursor separating applied edits (`..next`) from redoable ones.
	next: usize,
	/// Index of the transaction currently accepting edits, if any. An open
	/// recording always sits at the end of `history` with `next` just past
	/// it.
	open: Option<usize>,
	enabled: bool,
	anticipation: bool,
	undo_in_progress: bool,
	redo_in_progress: bool,
	next_edit_id: u64,
}

impl Default for UndoManager {
	fn default() -> Self {
		Self::new()
	}
}

impl UndoManager {
	/// Creates a journal with the default modes (enabled, anticipation on).
	pub fn new() -> Self {
		Self::with_config(JournalConfig::default())
	}

	pub fn with_config(config: JournalConfig) -> Self {
		Self {
			history: Vec::new(),
			next: 0,
			open: None,
			enabled: config.enabled,
			anticipation: config.anticipated_recording,
			undo_in_progress: false,
			redo_in_progress: false,
			next_edit_id: 0,
		}
	}

	pub fn is_enabled(&self) -> bool {
		self.enabled
	}

	/// Enables or disables the journal. Does not close an open recording;
	/// it only gates new submissions and undo/redo.
	pub fn set_enabled(&mut self, enabled: bool) {
		if self.enabled != enabled {
			trace!(enabled, "journal enabled flag changed");
		}
		self.enabled = enabled;
	}

	pub fn set_anticipated_recording(&mut self, anticipation: bool) {
		self.anticipation = anticipation;
	}

	/// Returns `true` while any recording (explicit or implicit) is open.
	pub fn is_recording(&self) -> bool {
		self.open.is_some()
	}

	/// The transaction currently accepting edits, if any.
	pub fn recording(&self) -> Option<&CompoundEdit> {
		self.open.and_then(|index| self.history.get(index))
	}

	/// All transactions, oldest first, including any open recording.
	pub fn history(&self) -> &[CompoundEdit] {
		&self.history
	}

	pub fn history_len(&self) -> usize {
		self.history.len()
	}

	/// Number of transactions currently applied (the cursor position).
	pub fn cursor(&self) -> usize {
		self.next
	}

	pub fn can_undo(&self) -> bool {
		self.enabled
			&& !self.undo_in_progress
			&& !self.redo_in_progress
			&& !self.blocking_recording()
			&& self.next > 0
	}

	pub fn can_redo(&self) -> bool {
		self.enabled
			&& !self.undo_in_progress
			&& !self.redo_in_progress
			&& !self.blocking_recording()
			&& self.next < self.history.len()
	}

	/// An open anticipated recording does not block undo/redo; it is
	/// force-stopped on the way through. Anything else open does.
	fn blocking_recording(&self) -> bool {
		match self.recording() {
			Some(edit) => edit.origin() != RecordingOrigin::Anticipated,
			None => false,
		}
	}

	fn alloc_id(&mut self) -> EditId {
		self.next_edit_id += 1;
		EditId(self.next_edit_id)
	}

	/// Starts an explicitly labeled recording.
	///
	/// A pending anticipated recording is adopted and relabeled instead of
	/// opening a fresh one. If an explicit recording is already open, it is
	/// kept as the container for subsequent edits (nested start calls are
	/// tolerated, not an error) and its id is returned. Returns `None` while
	/// the journal is disabled.
	pub fn start_recording(&mut self, label: &str) -> Option<EditId> {
		if !self.enabled {
			trace!(label, "start_recording ignored: journal disabled");
			return None;
		}
		if let Some(index) = self.open {
			let Some(edit) = self.history.get_mut(index) else {
				return None;
			};
			if self.anticipation && edit.origin() == RecordingOrigin::Anticipated {
				trace!(id = %edit.id(), label, edits = edit.len(), "anticipated recording adopted");
				edit.relabel(label);
				return Some(edit.id());
			}
			warn!(open = %edit.label(), label, "recording already in progress, aggregating");
			return Some(edit.id());
		}
		Some(self.open_recording(label.to_string(), RecordingOrigin::Explicit))
	}

	/// Stops the open recording.
	///
	/// Stopping when nothing is open, or stopping anything other than the
	/// open recording, is a bookkeeping mistake: logged and ignored, never
	/// propagated.
	pub fn stop_recording(&mut self, host: &mut impl JournalHost, id: EditId) -> bool {
		let Some(index) = self.open else {
			warn!(%id, "stop_recording ignored: no recording in progress");
			return false;
		};
		let Some(edit) = self.history.get_mut(index) else {
			return false;
		};
		if edit.id() != id {
			warn!(%id, open = %edit.id(), "stop_recording ignored: not the open recording");
			return false;
		}
		edit.end();
		let label = edit.label().to_string();
		let empty = edit.is_empty();
		self.open = None;
		if empty {
			// A transaction that recorded nothing is not worth an undo step.
			if let Some(mut dropped) = self.history.pop() {
				dropped.die();
			}
			self.next = self.history.len();
			trace!(%id, "empty transaction dropped");
		}
		trace!(%id, label = %label, history = self.history.len(), "recording stopped");
		host.notify_recording_stopped(&label);
		true
	}

	/// Accepts one atomic edit from the mutation layer.
	///
	/// The edit is disposed without reaching the history while the journal
	/// is disabled, while a replay is in flight (the inverse mutations of an
	/// undo/redo must not journal themselves), or when it is not
	/// significant. Otherwise it is routed into the open recording, opening
	/// an implicit one first if necessary.
	pub fn submit(&mut self, mut edit: AtomicEdit, host: &mut impl JournalHost) {
		if !self.enabled {
			edit.die();
			return;
		}
		if self.undo_in_progress || self.redo_in_progress {
			trace!(kind = edit.kind(), "edit dropped: replay in progress");
			edit.die();
			return;
		}
		if !edit.is_significant(&*host) {
			trace!(kind = edit.kind(), object = ?edit.object(), "insignificant edit dropped");
			edit.die();
			return;
		}
		if self.open.is_none() {
			if self.anticipation {
				let id = self.open_recording(String::new(), RecordingOrigin::Anticipated);
				trace!(%id, "anticipated recording opened");
			} else {
				warn!(
					kind = edit.kind(),
					object = ?edit.object(),
					"mutation outside a declared transaction, recording as unidentified"
				);
				self.open_recording(UNIDENTIFIED_LABEL.to_string(), RecordingOrigin::Unidentified);
			}
		}
		let Some(index) = self.open else {
			edit.die();
			return;
		};
		if let Some(open) = self.history.get_mut(index) {
			open.append(edit);
		}
	}

	/// Undoes the transaction immediately before the cursor.
	///
	/// An open anticipated recording is force-stopped first; any other open
	/// recording blocks. A replay failure discards the entire history:
	/// partial rollback would leave objects in an indeterminate state
	/// relative to the remaining log.
	pub fn undo(&mut self, host: &mut impl JournalHost) -> Result<(), JournalError> {
		self.check_replay_guards()?;
		self.force_stop_anticipated();
		if self.next == 0 {
			host.notify_nothing_to_undo();
			return Err(Blocked::NothingToUndo.into());
		}

		let index = self.next - 1;
		self.undo_in_progress = true;
		let outcome = match self.history.get(index) {
			Some(edit) => {
				trace!(
					id = %edit.id(),
					label = %edit.label(),
					edits = edit.len(),
					cursor = self.next,
					"undo: replaying transaction"
				);
				edit.undo(host).map(|()| edit.label().to_string())
			}
			None => Ok(String::new()),
		};
		match outcome {
			Ok(label) => {
				self.next = index;
				self.undo_in_progress = false;
				trace!(cursor = self.next, "undo: done");
				host.notify_undone(&label);
				Ok(())
			}
			Err(source) => Err(self.replay_failed(host, ReplayDirection::Undo, index, source)),
		}
	}

	/// Redoes the transaction at the cursor.
	///
	/// A closed anticipated edit sitting at the cursor is redone like any
	/// other transaction.
	pub fn redo(&mut self, host: &mut impl JournalHost) -> Result<(), JournalError> {
		self.check_replay_guards()?;
		if self.next >= self.history.len() {
			host.notify_nothing_to_redo();
			return Err(Blocked::NothingToRedo.into());
		}

		let index = self.next;
		self.redo_in_progress = true;
		let outcome = match self.history.get(index) {
			Some(edit) => {
				trace!(
					id = %edit.id(),
					label = %edit.label(),
					edits = edit.len(),
					cursor = self.next,
					"redo: replaying transaction"
				);
				edit.redo(host).map(|()| edit.label().to_string())
			}
			None => Ok(String::new()),
		};
		match outcome {
			Ok(label) => {
				self.next = index + 1;
				self.redo_in_progress = false;
				trace!(cursor = self.next, "redo: done");
				host.notify_redone(&label);
				Ok(())
			}
			Err(source) => Err(self.replay_failed(host, ReplayDirection::Redo, index, source)),
		}
	}

	/// Releases the whole history and resets the cursor. The enabled and
	/// anticipation modes are kept.
	pub fn clear(&mut self) {
		trace!(dropped = self.history.len(), "journal cleared");
		self.reset();
	}

	fn check_replay_guards(&self) -> Result<(), Blocked> {
		if !self.enabled {
			return Err(Blocked::Disabled);
		}
		if self.undo_in_progress || self.redo_in_progress {
			return Err(Blocked::ReplayRunning);
		}
		if self.blocking_recording() {
			return Err(Blocked::RecordingOpen);
		}
		Ok(())
	}

	fn force_stop_anticipated(&mut self) {
		let Some(index) = self.open else {
			return;
		};
		if let Some(edit) = self.history.get_mut(index) {
			if edit.origin() == RecordingOrigin::Anticipated {
				trace!(id = %edit.id(), edits = edit.len(), "anticipated recording force-stopped");
				edit.end();
				self.open = None;
			}
		}
	}

	fn open_recording(&mut self, label: String, origin: RecordingOrigin) -> EditId {
		self.truncate_redo_tail();
		let id = self.alloc_id();
		trace!(%id, label = %label, ?origin, history = self.history.len() + 1, "recording opened");
		self.history.push(CompoundEdit::with_origin(id, label, origin));
		self.open = Some(self.history.len() - 1);
		self.next = self.history.len();
		id
	}

	/// Standard undo-log semantics: opening a new recording invalidates
	/// everything after the cursor.
	fn truncate_redo_tail(&mut self) {
		if self.next >= self.history.len() {
			return;
		}
		let mut dropped = self.history.split_off(self.next);
		for edit in dropped.iter_mut().rev() {
			edit.die();
		}
		trace!(cleared = dropped.len(), "redo tail cleared");
	}

	fn replay_failed(
		&mut self,
		host: &mut impl JournalHost,
		direction: ReplayDirection,
		index: usize,
		source: quill_model::MutationError,
	) -> JournalError {
		let label = self
			.history
			.get(index)
			.map(|edit| edit.label().to_string())
			.unwrap_or_default();
		warn!(%direction, label = %label, error = %source, "replay failed, discarding edit history");
		self.reset();
		host.notify_history_discarded();
		HistoryLost {
			direction,
			label,
			source,
		}
		.into()
	}

	fn reset(&mut self) {
		for edit in self.history.iter_mut().rev() {
			edit.die();
		}
		self.history.clear();
		self.next = 0;
		self.open = None;
		self.undo_in_progress = false;
		self.redo_in_progress = false;
	}
}
