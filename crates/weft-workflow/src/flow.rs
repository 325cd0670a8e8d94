use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::step::Step;

/// A flow's state machine: the initial step plus the step map.
///
/// `States` preserves insertion order so a document survives an
/// import/export cycle byte-for-byte in key order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct FlowDefinition {
  /// Identifier of the initial step. A flow that lacks one (or names a
  /// step that does not exist) is tolerated; it just renders empty.
  #[serde(default, skip_serializing_if = "String::is_empty")]
  pub start_at: String,
  #[serde(default)]
  pub states: IndexMap<String, Step>,
}

impl FlowDefinition {
  /// Whether `StartAt` names an existing step. A flow without a valid
  /// start is not renderable, which is non-fatal: it lays out empty.
  pub fn has_start(&self) -> bool {
    self.states.contains_key(&self.start_at)
  }

  pub fn step(&self, id: &str) -> Option<&Step> {
    self.states.get(id)
  }

  pub fn step_mut(&mut self, id: &str) -> Option<&mut Step> {
    self.states.get_mut(id)
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_definition_round_trip_preserves_state_order() {
    let raw = r#"{
      "StartAt": "001.First",
      "States": {
        "001.First": { "Type": "Pass", "Next": "000.Zeroth" },
        "000.Zeroth": { "Type": "Succeed" }
      }
    }"#;

    let def: FlowDefinition = serde_json::from_str(raw).unwrap();
    assert!(def.has_start());

    let keys: Vec<&str> = def.states.keys().map(String::as_str).collect();
    assert_eq!(keys, ["001.First", "000.Zeroth"]);

    let out = serde_json::to_string(&def).unwrap();
    let reparsed: FlowDefinition = serde_json::from_str(&out).unwrap();
    assert_eq!(def, reparsed);
    let reparsed_keys: Vec<&str> = reparsed.states.keys().map(String::as_str).collect();
    assert_eq!(reparsed_keys, ["001.First", "000.Zeroth"]);
  }

  #[test]
  fn test_dangling_start_is_not_renderable() {
    let def: FlowDefinition =
      serde_json::from_str(r#"{"StartAt": "missing", "States": {}}"#).unwrap();
    assert!(!def.has_start());
  }

  #[test]
  fn test_missing_start_at_parses() {
    let def: FlowDefinition =
      serde_json::from_str(r#"{"States": {"A": {"Type": "Succeed"}}}"#).unwrap();
    assert!(!def.has_start());
    // The absent field does not materialize on export.
    let out = serde_json::to_value(&def).unwrap();
    assert!(!out.as_object().unwrap().contains_key("StartAt"));
  }
}
