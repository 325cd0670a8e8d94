//! Weft Graph
//!
//! Pure projections of a [`weft_workflow::FlowDefinition`] into the shapes
//! the editor renders: a positioned node list with a labeled edge list
//! ([`layout`]), plus derived views (reachable-step ordering, action
//! usage). Nothing here mutates a document; the same input always
//! produces the same output.

mod layout;
mod successor;
mod views;

pub use layout::{
  COLUMN_WIDTH, FlowLayout, LayoutEdge, LayoutNode, Position, ROW_HEIGHT, layout,
};
pub use successor::{primary_successor, successors};
pub use views::{FlowGraph, action_resources, action_usage, parse_workflow, reachable_order};
