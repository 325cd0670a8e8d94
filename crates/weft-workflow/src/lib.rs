//! Weft Workflow
//!
//! This crate contains the serializable workflow document model for Weft.
//! A [`Workflow`] owns named resources: flows (state machines of typed
//! steps), job specs (trigger bindings pointing at a flow by
//! fully-qualified name), and reusable HTTP action templates.
//!
//! Documents can be loaded from:
//! - JSON import (pasted or uploaded by the user)
//! - The remote registry (as JSON bundles)
//!
//! Everything here is plain data. Graph projection lives in `weft-graph`,
//! structural mutations in `weft-edit`.

mod condition;
mod error;
mod factory;
mod flow;
mod id;
mod name;
mod placeholder;
mod resource;
mod step;
mod workflow;

pub use condition::{CONDITION_OPERATORS, ChoiceRule, Condition, encode, operator_default};
pub use error::ImportError;
pub use factory::{default_http_action, new_flow_resource, new_job_spec, new_workflow};
pub use flow::FlowDefinition;
pub use id::next_step_id;
pub use name::{LOAD_CONFIG_ACTION, action_fqn, flow_fqn, local_key, normalize_namespace};
pub use placeholder::extract_placeholders;
pub use resource::{
  FlowProperties, HttpActionProperties, JobSpecProperties, KnownResource, Resource,
};
pub use step::{Catcher, Step, StepKind, StepType};
pub use workflow::{TEMPLATE_VERSION, Workflow};
