use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::ImportError;
use crate::name::local_key;
use crate::resource::{FlowProperties, JobSpecProperties, Resource};

/// The template format version stamped on new documents.
pub const TEMPLATE_VERSION: &str = "2024-05-01";

/// The top-level workflow document.
///
/// `name` doubles as the namespace prefix of generated fully-qualified
/// names. Resource keys are unique by construction (map semantics) and
/// their insertion order is preserved through an import/export cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Workflow {
  pub name: String,
  #[serde(default)]
  pub description: String,
  #[serde(default = "default_template_version")]
  pub template_version: String,
  pub resources: IndexMap<String, Resource>,
}

fn default_template_version() -> String {
  TEMPLATE_VERSION.to_string()
}

impl Workflow {
  /// Import a document from raw JSON.
  ///
  /// Only the minimal shape is validated here: a JSON object with a
  /// string `name` and an object `resources`. Resources the editor does
  /// not understand are kept as [`Resource::Other`] rather than rejected.
  pub fn from_json_str(input: &str) -> Result<Workflow, ImportError> {
    let value: Value = serde_json::from_str(input)?;
    let Some(object) = value.as_object() else {
      return Err(ImportError::NotAnObject);
    };
    if !object.get("name").is_some_and(Value::is_string) {
      return Err(ImportError::MissingName);
    }
    if !object.get("resources").is_some_and(Value::is_object) {
      return Err(ImportError::MissingResources);
    }
    Ok(serde_json::from_value(value)?)
  }

  /// Export as compact JSON, key order as inserted.
  pub fn to_json_string(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string(self)
  }

  /// Export as pretty-printed JSON, key order as inserted.
  pub fn to_json_string_pretty(&self) -> Result<String, serde_json::Error> {
    serde_json::to_string_pretty(self)
  }

  /// The namespace segment used in generated fully-qualified names.
  pub fn namespace(&self) -> &str {
    &self.name
  }

  /// Resource keys of every flow, in document order.
  pub fn flow_keys(&self) -> Vec<&str> {
    self
      .resources
      .iter()
      .filter(|(_, resource)| resource.as_flow().is_some())
      .map(|(key, _)| key.as_str())
      .collect()
  }

  pub fn flow(&self, key: &str) -> Option<&FlowProperties> {
    self.resources.get(key)?.as_flow()
  }

  pub fn flow_mut(&mut self, key: &str) -> Option<&mut FlowProperties> {
    self.resources.get_mut(key)?.as_flow_mut()
  }

  /// The job spec bound to `flow_key`, if any: the first one whose
  /// `flow_name` reference resolves to that resource key.
  pub fn job_spec_for_flow(&self, flow_key: &str) -> Option<(&str, &JobSpecProperties)> {
    self.resources.iter().find_map(|(key, resource)| {
      let spec = resource.as_job_spec()?;
      (local_key(&spec.flow_name) == flow_key).then_some((key.as_str(), spec))
    })
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  const DOC: &str = r#"{
    "name": "acme-support",
    "description": "Ticket escalation",
    "template_version": "2024-05-01",
    "resources": {
      "escalate": {
        "type": "JobSpec",
        "properties": {
          "name": "escalate",
          "event_source": "support",
          "event_type": "ticket.StatusChanged",
          "flow_name": "acme-support:flow:escalate_flow"
        }
      },
      "escalate_flow": {
        "type": "Flow",
        "properties": {
          "name": "escalate_flow",
          "definition": {
            "StartAt": "001.LoadConfig",
            "States": {
              "001.LoadConfig": {
                "Type": "Action",
                "ActionName": "common:action:LoadConfig",
                "Parameters": { "scope": "acme-support_settings" },
                "ResultPath": "$.config",
                "Next": "002.End"
              },
              "002.End": { "Type": "Succeed", "Message": "done" }
            }
          }
        }
      },
      "post-to-webhook": {
        "type": "Action::Http",
        "properties": {
          "name": "post-to-webhook",
          "definition": { "method": "POST", "url": "{{$.endpoint}}" }
        }
      }
    }
  }"#;

  #[test]
  fn test_import_and_lookups() {
    let workflow = Workflow::from_json_str(DOC).expect("import failed");
    assert_eq!(workflow.name, "acme-support");
    assert_eq!(workflow.flow_keys(), ["escalate_flow"]);

    let flow = workflow.flow("escalate_flow").unwrap();
    assert_eq!(flow.definition.start_at, "001.LoadConfig");

    let (spec_key, spec) = workflow.job_spec_for_flow("escalate_flow").unwrap();
    assert_eq!(spec_key, "escalate");
    assert_eq!(spec.event_type, "ticket.StatusChanged");
    assert!(workflow.job_spec_for_flow("other_flow").is_none());
  }

  #[test]
  fn test_round_trip_preserves_resource_order() {
    let workflow = Workflow::from_json_str(DOC).unwrap();
    let exported = workflow.to_json_string().unwrap();
    let reimported = Workflow::from_json_str(&exported).unwrap();
    assert_eq!(workflow, reimported);

    let keys: Vec<&str> = reimported.resources.keys().map(String::as_str).collect();
    assert_eq!(keys, ["escalate", "escalate_flow", "post-to-webhook"]);
  }

  #[test]
  fn test_import_rejects_minimal_shape_violations() {
    assert!(matches!(
      Workflow::from_json_str("not json"),
      Err(ImportError::Syntax(_))
    ));
    assert!(matches!(
      Workflow::from_json_str("[1, 2]"),
      Err(ImportError::NotAnObject)
    ));
    assert!(matches!(
      Workflow::from_json_str(r#"{"resources": {}}"#),
      Err(ImportError::MissingName)
    ));
    assert!(matches!(
      Workflow::from_json_str(r#"{"name": 7, "resources": {}}"#),
      Err(ImportError::MissingName)
    ));
    assert!(matches!(
      Workflow::from_json_str(r#"{"name": "x"}"#),
      Err(ImportError::MissingResources)
    ));
  }

  #[test]
  fn test_import_tolerates_unknown_resources() {
    let doc = r#"{
      "name": "x",
      "resources": {
        "mystery": { "type": "Config::Scope", "properties": { "name": "s" } },
        "scalar": 42
      }
    }"#;
    let workflow = Workflow::from_json_str(doc).unwrap();
    assert_eq!(workflow.resources.len(), 2);
    assert!(workflow.flow_keys().is_empty());
  }
}
