//! Batch hierarchical creation engine
//!
//! Turns a single request describing many new entities (some of them children
//! of other entities in the same request, before any of them exist) into an
//! ordered sequence of creation calls: builds a dependency graph over
//! caller-chosen temporary identifiers, rejects cyclic and dangling
//! references, creates parents before children while translating temp ids
//! into the real ids assigned by the host, and reports one outcome per item
//! in the caller's original order.

mod batch;
mod graph;
mod item;
mod outcome;
mod registry;
mod schedule;

pub use batch::{Batch, batch_create};
pub use item::{BatchItem, ItemKind};
pub use outcome::{BatchResult, ItemOutcome};
