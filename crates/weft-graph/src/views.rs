use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use weft_workflow::{FlowDefinition, Resource, StepKind, Workflow, local_key};

use crate::layout::{FlowLayout, LayoutEdge, LayoutNode, layout};
use crate::successor::{primary_successor, successors};

/// The editor's per-flow projection: the layout plus which flow it came
/// from. An unknown flow key, a resource that is not a flow, or no
/// selection at all yields the empty graph.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FlowGraph {
  pub nodes: Vec<LayoutNode>,
  pub edges: Vec<LayoutEdge>,
  pub flow_name: Option<String>,
  pub start_at: Option<String>,
}

/// Project the named flow of `workflow` into a renderable graph.
pub fn parse_workflow(workflow: &Workflow, flow_key: Option<&str>) -> FlowGraph {
  let Some(flow) = flow_key.and_then(|key| workflow.flow(key)) else {
    return FlowGraph::default();
  };

  let definition = &flow.definition;
  if !definition.has_start() {
    return FlowGraph {
      flow_name: Some(flow.name.clone()),
      ..FlowGraph::default()
    };
  }

  let FlowLayout { nodes, edges } = layout(definition);
  FlowGraph {
    nodes,
    edges,
    flow_name: Some(flow.name.clone()),
    start_at: Some(definition.start_at.clone()),
  }
}

/// Depth-first preorder of the steps reachable from `StartAt`, primary
/// successor first, in the order the layout walks them.
pub fn reachable_order(def: &FlowDefinition) -> Vec<String> {
  let mut order = Vec::new();
  if def.has_start() {
    visit(def, &def.start_at, &mut order);
  }
  order
}

fn visit(def: &FlowDefinition, id: &str, order: &mut Vec<String>) {
  if !def.states.contains_key(id) || order.iter().any(|seen| seen == id) {
    return;
  }
  order.push(id.to_string());

  let step = &def.states[id];
  let succs = successors(step);
  let primary = primary_successor(step);
  if let Some(primary) = primary
    && succs.iter().any(|s| s == primary)
  {
    visit(def, primary, order);
  }
  for succ in &succs {
    if Some(succ.as_str()) != primary {
      visit(def, succ, order);
    }
  }
}

/// Every action-template resource of the workflow, in document order.
pub fn action_resources(workflow: &Workflow) -> IndexMap<&str, &Resource> {
  workflow
    .resources
    .iter()
    .filter(|(_, resource)| resource.is_action())
    .map(|(key, resource)| (key.as_str(), resource))
    .collect()
}

/// How many Action steps of the named flow reference each action
/// resource, keyed by resource key. Action names that resolve to no
/// resource (built-ins, typos) are not counted.
pub fn action_usage(workflow: &Workflow, flow_key: &str) -> IndexMap<String, usize> {
  let mut usage = IndexMap::new();
  let Some(flow) = workflow.flow(flow_key) else {
    return usage;
  };

  let actions = action_resources(workflow);
  for step in flow.definition.states.values() {
    if let StepKind::Action { action_name, .. } = &step.kind
      && !action_name.is_empty()
    {
      let key = local_key(action_name);
      if actions.contains_key(key) {
        *usage.entry(key.to_string()).or_insert(0) += 1;
      }
    }
  }
  usage
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn workflow() -> Workflow {
    serde_json::from_value(json!({
      "name": "acme",
      "description": "",
      "resources": {
        "get-ticket": {
          "type": "Action::Http",
          "properties": { "name": "get-ticket", "definition": { "method": "GET" } }
        },
        "main_flow": {
          "type": "Flow",
          "properties": {
            "name": "main_flow",
            "definition": {
              "StartAt": "A",
              "States": {
                "A": { "Type": "Action", "ActionName": "acme:action:get-ticket", "Next": "B" },
                "B": { "Type": "Action", "ActionName": "acme:action:get-ticket", "Next": "C" },
                "C": { "Type": "Action", "ActionName": "common:action:LoadConfig", "Next": "D" },
                "D": { "Type": "Succeed" }
              }
            }
          }
        }
      }
    }))
    .expect("bad test workflow")
  }

  #[test]
  fn test_parse_workflow_selected_flow() {
    let wf = workflow();
    let graph = parse_workflow(&wf, Some("main_flow"));
    assert_eq!(graph.flow_name.as_deref(), Some("main_flow"));
    assert_eq!(graph.start_at.as_deref(), Some("A"));
    assert_eq!(graph.nodes.len(), 4);
    assert_eq!(graph.edges.len(), 3);
  }

  #[test]
  fn test_parse_workflow_no_selection() {
    let wf = workflow();
    assert_eq!(parse_workflow(&wf, None), FlowGraph::default());
    assert_eq!(parse_workflow(&wf, Some("ghost")), FlowGraph::default());
    // An action resource is not a flow.
    assert_eq!(parse_workflow(&wf, Some("get-ticket")), FlowGraph::default());
  }

  #[test]
  fn test_reachable_order_primary_first() {
    let def: FlowDefinition = serde_json::from_value(json!({
      "StartAt": "A",
      "States": {
        "A": {
          "Type": "Choice",
          "Choices": [{ "Variable": "$.x", "IsPresent": true, "Next": "C" }],
          "Default": "B"
        },
        "B": { "Type": "Pass", "Next": "D" },
        "C": { "Type": "Pass", "Next": "D" },
        "D": { "Type": "Succeed" },
        "E": { "Type": "Succeed" }
      }
    }))
    .unwrap();

    // Default branch (primary) is walked before the choice branch, and
    // the unreachable E does not appear.
    assert_eq!(reachable_order(&def), ["A", "B", "D", "C"]);
  }

  #[test]
  fn test_action_usage_counts_per_resource() {
    let wf = workflow();
    let usage = action_usage(&wf, "main_flow");
    assert_eq!(usage.len(), 1);
    assert_eq!(usage["get-ticket"], 2);
  }
}
