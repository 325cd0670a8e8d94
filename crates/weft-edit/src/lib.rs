//! Weft Edit
//!
//! Structural mutations over a [`weft_workflow::FlowDefinition`]: insert,
//! delete, and rename steps while keeping every cross-reference
//! consistent. Each operation takes the current definition by reference
//! and returns a fresh one (or a structured [`EditError`]); inputs are
//! never mutated and a failed operation commits nothing.

mod error;
mod ops;

pub use error::EditError;
pub use ops::{Insertion, delete, insert_below, insert_between, rename};
