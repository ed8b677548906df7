//! Journal error types.
//!
//! Expected declines and terminal failures are deliberately separate types:
//! a [`Blocked`] outcome is routine bookkeeping the caller may ignore, while
//! [`HistoryLost`] means the edit history is gone and the session should stop
//! offering undo/redo.

use std::fmt;

use quill_model::MutationError;
use thiserror::Error;

/// Expected reasons an undo/redo request is declined.
///
/// None of these indicate corruption; the journal state is unchanged apart
/// from an anticipated recording possibly having been closed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum Blocked {
	/// The journal is disabled.
	#[error("the journal is disabled")]
	Disabled,

	/// The cursor is at the start of the history.
	#[error("nothing to undo")]
	NothingToUndo,

	/// The cursor is at the end of the history.
	#[error("nothing to redo")]
	NothingToRedo,

	/// An explicit recording is still open.
	#[error("a recording is still in progress")]
	RecordingOpen,

	/// An undo or redo is already running.
	#[error("an undo or redo is already in progress")]
	ReplayRunning,
}

/// Which way a failed replay was walking the history.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplayDirection {
	Undo,
	Redo,
}

impl fmt::Display for ReplayDirection {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		match self {
			ReplayDirection::Undo => write!(f, "undo"),
			ReplayDirection::Redo => write!(f, "redo"),
		}
	}
}

/// Terminal replay failure.
///
/// An inverse mutation failed mid-transaction, so the object graph can no
/// longer be trusted to match the remaining log. By the time this error is
/// returned the entire history has already been discarded.
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{direction} of {label:?} failed, edit history discarded")]
pub struct HistoryLost {
	pub direction: ReplayDirection,
	/// Label of the transaction whose replay failed.
	pub label: String,
	#[source]
	pub source: MutationError,
}

/// Any failure reported by [`UndoManager::undo`] / [`UndoManager::redo`].
///
/// [`UndoManager::undo`]: crate::UndoManager::undo
/// [`UndoManager::redo`]: crate::UndoManager::redo
#[derive(Debug, Clone, PartialEq, Error)]
pub enum JournalError {
	#[error(transparent)]
	Blocked(#[from] Blocked),
	#[error(transparent)]
	HistoryLost(#[from] HistoryLost),
}

impl JournalError {
	/// Returns `true` for expected declines, `false` for terminal failures.
	pub fn is_blocked(&self) -> bool {
		matches!(self, JournalError::Blocked(_))
	}
}
