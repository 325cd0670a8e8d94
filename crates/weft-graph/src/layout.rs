use std::collections::HashSet;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use weft_workflow::{FlowDefinition, Step};

use crate::successor::{primary_successor, successors};

/// Horizontal distance between branch columns, in canvas pixels.
pub const COLUMN_WIDTH: i64 = 600;
/// Vertical distance between rows, in canvas pixels.
pub const ROW_HEIGHT: i64 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Position {
  pub x: i64,
  pub y: i64,
}

/// One renderable node: a step plus its assigned canvas position.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutNode {
  pub id: String,
  pub step: Step,
  pub position: Position,
}

/// One renderable transition. `label` is `None` for a plain `Next` edge,
/// `"Default"`, `"Choice {n}"` (1-indexed), or `"Catch"` otherwise.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LayoutEdge {
  pub id: String,
  pub source: String,
  pub target: String,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub label: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowLayout {
  pub nodes: Vec<LayoutNode>,
  pub edges: Vec<LayoutEdge>,
}

/// Assign a canvas position to every step and derive the edge list.
///
/// Depth-first from `StartAt` at the origin: the primary successor
/// (`Next`, or a Choice's `Default`) goes directly below, every other
/// successor one column further right on the next row. Two steps
/// computed to the same coordinate shift the later one rightward until
/// the slot is free. Steps unreachable from `StartAt` (including steps
/// only reachable through a cycle back to a visited step) are placed on
/// one fresh row below the deepest visited row, left to right, so every
/// entry of `States` gets exactly one node.
///
/// A missing or dangling `StartAt` yields an empty layout, not an error,
/// and successors that name no state draw no edge.
pub fn layout(def: &FlowDefinition) -> FlowLayout {
  if !def.has_start() {
    return FlowLayout::default();
  }

  let mut positions: IndexMap<String, Position> = IndexMap::new();
  let mut occupied: HashSet<(i64, i64)> = HashSet::new();
  place(def, &def.start_at, 0, 0, &mut positions, &mut occupied);

  // Row index below everything the traversal reached.
  let spill_row = positions
    .values()
    .map(|p| p.y / ROW_HEIGHT)
    .max()
    .unwrap_or(-1)
    + 1;
  let spill_y = spill_row * ROW_HEIGHT;
  let mut column = 0;
  for id in def.states.keys() {
    if !positions.contains_key(id) {
      let mut x = column * COLUMN_WIDTH;
      while occupied.contains(&(x, spill_y)) {
        x += COLUMN_WIDTH;
      }
      positions.insert(id.clone(), Position { x, y: spill_y });
      occupied.insert((x, spill_y));
      column += 1;
    }
  }

  let mut nodes = Vec::with_capacity(def.states.len());
  let mut edges: Vec<LayoutEdge> = Vec::new();
  for (id, step) in &def.states {
    nodes.push(LayoutNode {
      id: id.clone(),
      step: step.clone(),
      position: positions[id.as_str()],
    });

    for target in successors(step) {
      if !def.states.contains_key(&target) {
        continue;
      }
      if edges
        .iter()
        .any(|edge| edge.source == *id && edge.target == target)
      {
        continue;
      }
      edges.push(LayoutEdge {
        id: format!("e-{id}-{target}"),
        label: edge_label(step, &target),
        source: id.clone(),
        target,
      });
    }
  }

  FlowLayout { nodes, edges }
}

fn place(
  def: &FlowDefinition,
  id: &str,
  x: i64,
  y: i64,
  positions: &mut IndexMap<String, Position>,
  occupied: &mut HashSet<(i64, i64)>,
) {
  if !def.states.contains_key(id) || positions.contains_key(id) {
    return;
  }

  let mut x = x;
  while occupied.contains(&(x, y)) {
    x += COLUMN_WIDTH;
  }
  positions.insert(id.to_string(), Position { x, y });
  occupied.insert((x, y));

  let step = &def.states[id];
  let succs = successors(step);
  let primary = primary_successor(step);

  if let Some(primary) = primary
    && succs.iter().any(|s| s == primary)
  {
    place(def, primary, x, y + ROW_HEIGHT, positions, occupied);
  }

  let mut branch = 1;
  for succ in &succs {
    if Some(succ.as_str()) != primary {
      place(
        def,
        succ,
        x + COLUMN_WIDTH * branch,
        y + ROW_HEIGHT,
        positions,
        occupied,
      );
      branch += 1;
    }
  }
}

fn edge_label(step: &Step, target: &str) -> Option<String> {
  if step.next() == Some(target) {
    // Plain Next is the common case; it renders unlabeled.
    return None;
  }
  if step.default_branch() == Some(target) {
    return Some("Default".to_string());
  }
  if let Some(index) = step.choices().iter().position(|rule| rule.next == target) {
    return Some(format!("Choice {}", index + 1));
  }
  if step.catchers().iter().any(|catcher| catcher.next == target) {
    return Some("Catch".to_string());
  }
  None
}
