//! Bridge API for creating entities inside the host productivity application
//!
//! This module owns the caller-facing surface of the automation bridge's
//! creation path: the `EntityCreator` capability seam through which single
//! entities are physically created, and the batch engine that turns one
//! request describing many interdependent entities into an ordered sequence
//! of capability calls.

pub mod batch;
pub mod capability;

pub use batch::{Batch, BatchItem, BatchResult, ItemKind, ItemOutcome, batch_create};
pub use capability::{CreateResponse, EntityCreator};
