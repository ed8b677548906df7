//! Identifier types for managed objects.

use std::fmt;

/// Identifies one managed object for the lifetime of an editing session.
///
/// Handles are cheap to copy and carry no ownership: holding an [`ObjId`] does
/// not keep the object alive, and a handle may outlive its object (lookups
/// through the model report such staleness as errors).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ObjId(pub u64);

impl fmt::Display for ObjId {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		write!(f, "#{}", self.0)
	}
}
