use indexmap::IndexMap;
use tracing::{debug, info};
use weft_edit as edit;
use weft_graph::{FlowGraph, action_usage, parse_workflow};
use weft_workflow::{
  FlowDefinition, JobSpecProperties, Resource, Step, StepType, Workflow, default_http_action,
  flow_fqn, new_flow_resource, new_job_spec,
};

use crate::error::StoreError;

/// The editor's single writer.
///
/// Callers apply one operation at a time and read the refreshed state
/// afterwards; chaining operations on a stale snapshot is not possible
/// because every mutation goes through the held document.
#[derive(Debug, Default)]
pub struct WorkflowStore {
  workflow: Option<Workflow>,
  selected_flow: Option<String>,
  graph: FlowGraph,
}

impl WorkflowStore {
  pub fn new() -> Self {
    Self::default()
  }

  /// Replace the held document, selecting its first flow.
  pub fn load(&mut self, workflow: Workflow) {
    info!(workflow = %workflow.name, "workflow loaded");
    self.selected_flow = workflow.flow_keys().first().map(|key| key.to_string());
    self.workflow = Some(workflow);
    self.refresh();
  }

  pub fn clear(&mut self) {
    self.workflow = None;
    self.selected_flow = None;
    self.refresh();
  }

  pub fn workflow(&self) -> Option<&Workflow> {
    self.workflow.as_ref()
  }

  /// The derived graph of the selected flow; empty when nothing is
  /// loaded or selected.
  pub fn graph(&self) -> &FlowGraph {
    &self.graph
  }

  pub fn selected_flow(&self) -> Option<&str> {
    self.selected_flow.as_deref()
  }

  pub fn flow_keys(&self) -> Vec<String> {
    self
      .workflow
      .as_ref()
      .map(|workflow| {
        workflow
          .flow_keys()
          .into_iter()
          .map(str::to_string)
          .collect()
      })
      .unwrap_or_default()
  }

  pub fn select_flow(&mut self, flow_key: &str) -> Result<(), StoreError> {
    let workflow = self.workflow.as_ref().ok_or(StoreError::NoWorkflow)?;
    if workflow.flow(flow_key).is_none() {
      return Err(StoreError::UnknownFlow(flow_key.to_string()));
    }
    debug!(flow = %flow_key, "flow selected");
    self.selected_flow = Some(flow_key.to_string());
    self.refresh();
    Ok(())
  }

  /// Insert a step of `ty` on the `source_id` → `target_id` edge of the
  /// selected flow. Returns the allocated identifier.
  pub fn insert_between(
    &mut self,
    source_id: &str,
    target_id: &str,
    ty: StepType,
  ) -> Result<String, StoreError> {
    let (flow_key, definition) = self.selected()?;
    let inserted = edit::insert_between(definition, source_id, target_id, ty)?;
    info!(flow = %flow_key, step = %inserted.new_id, "step inserted");
    self.commit_definition(&flow_key, inserted.definition);
    Ok(inserted.new_id)
  }

  /// Insert a step of `ty` directly below `source_id` in the selected
  /// flow. Returns the allocated identifier.
  pub fn insert_below(&mut self, source_id: &str, ty: StepType) -> Result<String, StoreError> {
    let (flow_key, definition) = self.selected()?;
    let inserted = edit::insert_below(definition, source_id, ty)?;
    info!(flow = %flow_key, step = %inserted.new_id, "step inserted below");
    self.commit_definition(&flow_key, inserted.definition);
    Ok(inserted.new_id)
  }

  pub fn rename_step(&mut self, old_id: &str, new_id: &str) -> Result<(), StoreError> {
    let (flow_key, definition) = self.selected()?;
    let renamed = edit::rename(definition, old_id, new_id)?;
    info!(flow = %flow_key, from = %old_id, to = %new_id, "step renamed");
    self.commit_definition(&flow_key, renamed);
    Ok(())
  }

  pub fn delete_step(&mut self, node_id: &str) -> Result<(), StoreError> {
    let (flow_key, definition) = self.selected()?;
    let remaining = edit::delete(definition, node_id)?;
    info!(flow = %flow_key, step = %node_id, "step deleted");
    self.commit_definition(&flow_key, remaining);
    Ok(())
  }

  /// Replace a step wholesale. This is the path form edits take.
  pub fn update_step(&mut self, node_id: &str, step: Step) -> Result<(), StoreError> {
    let (flow_key, definition) = self.selected()?;
    if !definition.states.contains_key(node_id) {
      return Err(edit::EditError::UnknownStep(node_id.to_string()).into());
    }
    let mut definition = definition.clone();
    definition.states.insert(node_id.to_string(), step);
    debug!(flow = %flow_key, step = %node_id, "step updated");
    self.commit_definition(&flow_key, definition);
    Ok(())
  }

  /// Add a factory flow plus the job spec that triggers it, and select
  /// the new flow. Existing resources under either key are replaced.
  pub fn add_flow(
    &mut self,
    flow_key: &str,
    jobspec_name: &str,
    event_source: &str,
    event_type: &str,
  ) -> Result<(), StoreError> {
    let workflow = self.workflow.as_mut().ok_or(StoreError::NoWorkflow)?;
    let namespace = workflow.name.clone();
    let config_scope = format!("{namespace}_settings");

    workflow.resources.insert(
      jobspec_name.to_string(),
      Resource::from(new_job_spec(
        jobspec_name,
        event_source,
        event_type,
        &flow_fqn(&namespace, flow_key),
      )),
    );
    workflow.resources.insert(
      flow_key.to_string(),
      Resource::from(new_flow_resource(flow_key, &config_scope)),
    );

    info!(flow = %flow_key, jobspec = %jobspec_name, "flow added");
    self.selected_flow = Some(flow_key.to_string());
    self.refresh();
    Ok(())
  }

  /// Remove a flow resource and every job spec bound to it.
  pub fn delete_flow(&mut self, flow_key: &str) -> Result<(), StoreError> {
    let workflow = self.workflow.as_mut().ok_or(StoreError::NoWorkflow)?;
    if workflow.flow(flow_key).is_none() {
      return Err(StoreError::UnknownFlow(flow_key.to_string()));
    }

    let fqn = flow_fqn(&workflow.name, flow_key);
    workflow.resources.retain(|key, resource| {
      if key == flow_key {
        return false;
      }
      resource
        .as_job_spec()
        .is_none_or(|spec| spec.flow_name != fqn)
    });

    info!(flow = %flow_key, "flow deleted");
    if self.selected_flow.as_deref() == Some(flow_key) {
      self.selected_flow = workflow.flow_keys().first().map(|key| key.to_string());
    }
    self.refresh();
    Ok(())
  }

  /// Add the default HTTP action scaffold under `action_key`.
  pub fn add_action(&mut self, action_key: &str) -> Result<(), StoreError> {
    let workflow = self.workflow.as_mut().ok_or(StoreError::NoWorkflow)?;
    workflow.resources.insert(
      action_key.to_string(),
      Resource::from(default_http_action(action_key)),
    );
    info!(action = %action_key, "action added");
    self.refresh();
    Ok(())
  }

  /// Replace an existing action resource.
  pub fn update_action(&mut self, action_key: &str, resource: Resource) -> Result<(), StoreError> {
    let workflow = self.workflow.as_mut().ok_or(StoreError::NoWorkflow)?;
    if !workflow.resources.contains_key(action_key) {
      return Err(StoreError::UnknownResource(action_key.to_string()));
    }
    workflow
      .resources
      .insert(action_key.to_string(), resource);
    debug!(action = %action_key, "action updated");
    self.refresh();
    Ok(())
  }

  pub fn delete_action(&mut self, action_key: &str) -> Result<(), StoreError> {
    let workflow = self.workflow.as_mut().ok_or(StoreError::NoWorkflow)?;
    if workflow.resources.shift_remove(action_key).is_none() {
      return Err(StoreError::UnknownResource(action_key.to_string()));
    }
    info!(action = %action_key, "action deleted");
    self.refresh();
    Ok(())
  }

  /// Update the document's display metadata. Fully-qualified names keep
  /// the existing namespace; renaming those is a separate concern.
  pub fn set_metadata(&mut self, name: &str, description: &str) -> Result<(), StoreError> {
    let workflow = self.workflow.as_mut().ok_or(StoreError::NoWorkflow)?;
    workflow.name = name.to_string();
    workflow.description = description.to_string();
    self.refresh();
    Ok(())
  }

  /// The job spec bound to the selected flow, if any.
  pub fn job_spec_details(&self) -> Option<(&str, &JobSpecProperties)> {
    let workflow = self.workflow.as_ref()?;
    workflow.job_spec_for_flow(self.selected_flow.as_deref()?)
  }

  /// Action-usage counts for the selected flow.
  pub fn action_usage(&self) -> IndexMap<String, usize> {
    match (&self.workflow, &self.selected_flow) {
      (Some(workflow), Some(flow_key)) => action_usage(workflow, flow_key),
      _ => IndexMap::new(),
    }
  }

  fn selected(&self) -> Result<(String, &FlowDefinition), StoreError> {
    let workflow = self.workflow.as_ref().ok_or(StoreError::NoWorkflow)?;
    let flow_key = self
      .selected_flow
      .clone()
      .ok_or(StoreError::NoFlowSelected)?;
    let flow = workflow
      .flow(&flow_key)
      .ok_or_else(|| StoreError::UnknownFlow(flow_key.clone()))?;
    Ok((flow_key, &flow.definition))
  }

  fn commit_definition(&mut self, flow_key: &str, definition: FlowDefinition) {
    if let Some(workflow) = self.workflow.as_mut()
      && let Some(flow) = workflow.flow_mut(flow_key)
    {
      flow.definition = definition;
    }
    self.refresh();
  }

  fn refresh(&mut self) {
    self.graph = match (&self.workflow, &self.selected_flow) {
      (Some(workflow), Some(flow_key)) => parse_workflow(workflow, Some(flow_key.as_str())),
      _ => FlowGraph::default(),
    };
  }
}
