#![cfg_attr(test, allow(unused_crate_dependencies))]
//! Managed-object model contract consumed by the edit journal.
//!
//! The journal never touches object internals. Everything it does to a managed
//! object goes through the [`MutationHandler`] trait defined here, addressed by
//! opaque [`ObjId`] handles and [`PropertyRef`] descriptors.
//!
//! # Main Types
//!
//! - [`MutationHandler`] - The capability boundary: getter/setter/adder/remover
//!   plus object delete/undelete
//! - [`Value`] - Opaque property value as the journal sees it
//! - [`PropertyDef`] - Immutable descriptor of a mutable property
//! - [`MemoryModel`] - In-memory reference implementation for tests and demos

pub mod handler;
pub mod ids;
/// Reference in-memory object store implementing the handler contract.
pub mod memory;
pub mod property;
pub mod value;

pub use handler::{MutationError, MutationHandler};
pub use ids::ObjId;
pub use memory::MemoryModel;
pub use property::{Cardinality, PropertyDef, PropertyRef};
pub use value::Value;
