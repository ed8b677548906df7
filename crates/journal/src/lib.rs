#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Transactional edit journal for managed-object models.
//!
//! Every mutation performed on a managed object is recorded as a reversible
//! [`AtomicEdit`], aggregated into a labeled [`CompoundEdit`] transaction,
//! and replayed backward (undo) or forward (redo) by the [`UndoManager`].
//! Replay never re-derives state from a snapshot: each step is a point
//! mutation played against live objects through the model's mutation
//! handler.
//!
//! # Main Types
//!
//! - [`UndoManager`] - The journal: linear history of transactions plus a
//!   cursor separating done from undone
//! - [`CompoundEdit`] - One labeled transaction, replayed LIFO on undo and
//!   FIFO on redo
//! - [`AtomicEdit`] - One reversible property mutation
//! - [`JournalHost`] - What the embedder provides: mutations plus observer
//!   notifications
//! - [`Recorder`] - Capture-before-mutate submission glue
//! - [`SharedJournal`] - Lock-guarded handle for shared use

pub mod atomic;
pub mod compound;
pub mod error;
pub mod host;
pub mod manager;
pub mod recorder;
pub mod shared;

pub use atomic::AtomicEdit;
pub use compound::{CompoundEdit, EditId, RecordingOrigin};
pub use error::{Blocked, HistoryLost, JournalError, ReplayDirection};
pub use host::JournalHost;
pub use manager::{JournalConfig, UNIDENTIFIED_LABEL, UndoManager};
pub use recorder::Recorder;
pub use shared::SharedJournal;
