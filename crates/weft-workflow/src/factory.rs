//! Factories for brand-new documents and resources.
//!
//! Every factory output satisfies the data-model invariants and is
//! immediately renderable: the scaffolded flow chains a config-loading
//! action into a terminal success step, and the job spec references the
//! flow by fully-qualified name.

use indexmap::IndexMap;
use serde_json::json;

use crate::flow::FlowDefinition;
use crate::name::{LOAD_CONFIG_ACTION, flow_fqn, normalize_namespace};
use crate::resource::{
  FlowProperties, HttpActionProperties, JobSpecProperties, KnownResource, Resource,
};
use crate::step::{Step, StepKind};
use crate::workflow::{TEMPLATE_VERSION, Workflow};

/// Resource key of the placeholder webhook action seeded into new
/// workflows.
const PLACEHOLDER_ACTION_KEY: &str = "post-to-webhook";

/// A minimal flow resource: load config, then succeed.
pub fn new_flow_resource(flow_key: &str, config_scope: &str) -> KnownResource {
  let mut states = IndexMap::new();
  states.insert(
    "001.LoadConfig".to_string(),
    Step {
      comment: Some("Load settings from config".to_string()),
      kind: StepKind::Action {
        action_name: LOAD_CONFIG_ACTION.to_string(),
        parameters: IndexMap::from([("scope".to_string(), json!(config_scope))]),
        result_path: Some("$.config".to_string()),
        next: Some("002.End".to_string()),
        catch: None,
      },
    },
  );
  states.insert(
    "002.End".to_string(),
    Step {
      comment: Some("End of the workflow".to_string()),
      kind: StepKind::Succeed {
        message: Some("Workflow finished successfully.".to_string()),
      },
    },
  );

  KnownResource::Flow {
    properties: FlowProperties {
      name: flow_key.to_string(),
      definition: FlowDefinition {
        start_at: "001.LoadConfig".to_string(),
        states,
      },
    },
  }
}

/// A job spec binding `event_source`/`event_type` to the flow named by
/// `flow_name` (fully qualified).
pub fn new_job_spec(
  jobspec_name: &str,
  event_source: &str,
  event_type: &str,
  flow_name: &str,
) -> KnownResource {
  KnownResource::JobSpec {
    properties: JobSpecProperties {
      name: jobspec_name.to_string(),
      event_source: event_source.to_string(),
      event_type: event_type.to_string(),
      flow_name: flow_name.to_string(),
    },
  }
}

/// The scaffold installed when the user adds a new HTTP action.
pub fn default_http_action(name: &str) -> KnownResource {
  KnownResource::ActionHttp {
    properties: HttpActionProperties {
      name: name.to_string(),
      definition: json!({
        "method": "GET",
        "path": "/api/v2/example",
        "connectionName": "example_connection",
        "headers": [{ "key": "Content-Type", "value": "application/json" }],
      }),
    },
  }
}

/// A complete new workflow: one job spec, the flow it triggers, and a
/// placeholder webhook action. The user-entered `name` is normalized into
/// the namespace.
pub fn new_workflow(
  name: &str,
  description: &str,
  jobspec_name: &str,
  event_source: &str,
  event_type: &str,
) -> Workflow {
  let namespace = normalize_namespace(name);
  let flow_key = format!("{jobspec_name}_flow");
  let config_scope = format!("{namespace}_settings");

  let mut resources = IndexMap::new();
  resources.insert(
    jobspec_name.to_string(),
    Resource::from(new_job_spec(
      jobspec_name,
      event_source,
      event_type,
      &flow_fqn(&namespace, &flow_key),
    )),
  );
  resources.insert(
    flow_key.clone(),
    Resource::from(new_flow_resource(&flow_key, &config_scope)),
  );
  resources.insert(
    PLACEHOLDER_ACTION_KEY.to_string(),
    Resource::from(KnownResource::ActionHttp {
      properties: HttpActionProperties {
        name: PLACEHOLDER_ACTION_KEY.to_string(),
        definition: json!({
          "method": "POST",
          "requestBody": { "data": "{{$.data}}" },
          "url": "{{$.endpoint}}",
        }),
      },
    }),
  );

  Workflow {
    name: namespace,
    description: description.to_string(),
    template_version: TEMPLATE_VERSION.to_string(),
    resources,
  }
}

#[cfg(test)]
mod tests {
  use super::*;
  use crate::name::local_key;

  #[test]
  fn test_new_workflow_is_internally_consistent() {
    let workflow = new_workflow(
      "Acme Support",
      "Escalation demo",
      "escalate",
      "support",
      "ticket.StatusChanged",
    );

    assert_eq!(workflow.name, "acme-support");
    assert_eq!(workflow.flow_keys(), ["escalate_flow"]);

    // The job spec's weak reference resolves back to the flow resource.
    let (spec_key, spec) = workflow.job_spec_for_flow("escalate_flow").unwrap();
    assert_eq!(spec_key, "escalate");
    assert_eq!(spec.flow_name, "acme-support:flow:escalate_flow");
    assert_eq!(local_key(&spec.flow_name), "escalate_flow");

    let flow = workflow.flow("escalate_flow").unwrap();
    assert!(flow.definition.has_start());
    let start = flow.definition.step(&flow.definition.start_at).unwrap();
    assert_eq!(start.next(), Some("002.End"));
    assert!(flow.definition.step("002.End").is_some());
  }

  #[test]
  fn test_new_flow_resource_chains_config_into_succeed() {
    let KnownResource::Flow { properties } = new_flow_resource("f", "acme_settings") else {
      panic!("expected a flow resource");
    };
    let def = &properties.definition;
    assert_eq!(def.states.len(), 2);

    let StepKind::Action {
      action_name,
      parameters,
      ..
    } = &def.step("001.LoadConfig").unwrap().kind
    else {
      panic!("expected the config-loading action");
    };
    assert_eq!(action_name, LOAD_CONFIG_ACTION);
    assert_eq!(parameters["scope"], "acme_settings");
  }

  #[test]
  fn test_default_http_action_scaffold() {
    let KnownResource::ActionHttp { properties } = default_http_action("get-ticket") else {
      panic!("expected an http action");
    };
    assert_eq!(properties.name, "get-ticket");
    assert_eq!(properties.definition["method"], "GET");
  }
}
