//! Weft Store
//!
//! The single-writer state holder behind the editor: the current
//! [`Workflow`], the selected flow, and the derived [`FlowGraph`], which
//! is recomputed by one private refresh path after every write. All
//! mutations are clone-edit-swap, so a reader never observes a partially
//! mutated document and a failed edit commits nothing. There are no
//! hidden caches; the graph is always a pure function of the held
//! document and selection.

mod error;
mod store;

pub use error::StoreError;
pub use store::WorkflowStore;

pub use weft_graph::FlowGraph;
pub use weft_workflow::Workflow;
