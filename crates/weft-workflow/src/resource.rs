use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::flow::FlowDefinition;

/// A named entity inside a workflow.
///
/// Known resource kinds parse into their typed shape; anything else is
/// preserved verbatim in [`Resource::Other`] so an import never fails on a
/// resource the editor does not understand, and export round-trips it
/// untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Resource {
  Known(KnownResource),
  Other(Value),
}

/// The resource kinds the editor can open, tagged by `type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum KnownResource {
  /// A state machine (see [`FlowDefinition`]).
  Flow { properties: FlowProperties },

  /// A trigger binding: event source/type pointing at a flow by
  /// fully-qualified name.
  JobSpec { properties: JobSpecProperties },

  /// A reusable HTTP call template referenced from Action steps.
  #[serde(rename = "Action::Http")]
  ActionHttp { properties: HttpActionProperties },
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FlowProperties {
  pub name: String,
  pub definition: FlowDefinition,
}

/// `flow_name` is a weak reference (`namespace:flow:key`), never an object
/// reference; deleting the flow it points at leaves the job spec dangling
/// unless the caller removes both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JobSpecProperties {
  pub name: String,
  pub event_source: String,
  pub event_type: String,
  pub flow_name: String,
}

/// HTTP templates are round-tripped as free-form JSON: method, endpoint
/// (literal path/URL or dynamic-path expression), headers, request body.
/// Forms own the shape; the core only stores it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HttpActionProperties {
  pub name: String,
  pub definition: Value,
}

impl Resource {
  pub fn as_flow(&self) -> Option<&FlowProperties> {
    match self {
      Resource::Known(KnownResource::Flow { properties }) => Some(properties),
      _ => None,
    }
  }

  pub fn as_flow_mut(&mut self) -> Option<&mut FlowProperties> {
    match self {
      Resource::Known(KnownResource::Flow { properties }) => Some(properties),
      _ => None,
    }
  }

  pub fn as_job_spec(&self) -> Option<&JobSpecProperties> {
    match self {
      Resource::Known(KnownResource::JobSpec { properties }) => Some(properties),
      _ => None,
    }
  }

  pub fn as_http_action(&self) -> Option<&HttpActionProperties> {
    match self {
      Resource::Known(KnownResource::ActionHttp { properties }) => Some(properties),
      _ => None,
    }
  }

  /// Whether this is any action-template kind.
  pub fn is_action(&self) -> bool {
    matches!(self, Resource::Known(KnownResource::ActionHttp { .. }))
  }
}

impl From<KnownResource> for Resource {
  fn from(known: KnownResource) -> Self {
    Resource::Known(known)
  }
}
