use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use chrono::Utc;
use serde_json::Value;
use weft_workflow::Workflow;

use crate::error::RegistryError;
use crate::registry::RegistryApi;
use crate::types::{Bundle, Integration, IntegrationDraft};

#[derive(Default)]
struct State {
  integrations: Vec<Integration>,
  /// Bundles per integration, oldest first.
  bundles: HashMap<String, Vec<Bundle>>,
  /// Config values keyed by (integration, scope).
  configs: HashMap<(String, String), Value>,
}

/// In-memory registry used by tests and local development.
#[derive(Default)]
pub struct InMemoryRegistry {
  state: Mutex<State>,
}

impl InMemoryRegistry {
  pub fn new() -> Self {
    Self::default()
  }
}

#[async_trait]
impl RegistryApi for InMemoryRegistry {
  async fn list_integrations(&self) -> Result<Vec<Integration>, RegistryError> {
    let state = self.state.lock().map_err(poisoned)?;
    Ok(state.integrations.clone())
  }

  async fn get_integration(&self, name: &str) -> Result<Integration, RegistryError> {
    let state = self.state.lock().map_err(poisoned)?;
    state
      .integrations
      .iter()
      .find(|integration| integration.name == name)
      .cloned()
      .ok_or_else(|| RegistryError::NotFound(name.to_string()))
  }

  async fn create_integration(
    &self,
    draft: IntegrationDraft,
  ) -> Result<Integration, RegistryError> {
    let mut state = self.state.lock().map_err(poisoned)?;
    if state
      .integrations
      .iter()
      .any(|integration| integration.name == draft.name)
    {
      return Err(RegistryError::Conflict(draft.name));
    }

    let integration = Integration {
      name: draft.name,
      description: draft.description,
    };
    state.integrations.push(integration.clone());
    Ok(integration)
  }

  async fn latest_bundle(&self, integration: &str) -> Result<Option<Bundle>, RegistryError> {
    let state = self.state.lock().map_err(poisoned)?;
    Ok(
      state
        .bundles
        .get(integration)
        .and_then(|bundles| bundles.last().cloned()),
    )
  }

  async fn save_bundle(
    &self,
    integration: &str,
    workflow: &Workflow,
  ) -> Result<Bundle, RegistryError> {
    let document =
      serde_json::to_value(workflow).map_err(|e| RegistryError::Transport(e.to_string()))?;

    let bundle = Bundle {
      uuid: uuid::Uuid::new_v4().to_string(),
      created_at: Utc::now(),
      template_version: workflow.template_version.clone(),
      workflow: document,
    };

    let mut state = self.state.lock().map_err(poisoned)?;
    state
      .bundles
      .entry(integration.to_string())
      .or_default()
      .push(bundle.clone());
    Ok(bundle)
  }

  async fn get_config(&self, integration: &str, scope: &str) -> Result<Value, RegistryError> {
    let state = self.state.lock().map_err(poisoned)?;
    state
      .configs
      .get(&(integration.to_string(), scope.to_string()))
      .cloned()
      .ok_or_else(|| RegistryError::NotFound(format!("{integration}/{scope}")))
  }

  async fn put_config(
    &self,
    integration: &str,
    scope: &str,
    value: Value,
  ) -> Result<(), RegistryError> {
    let mut state = self.state.lock().map_err(poisoned)?;
    state
      .configs
      .insert((integration.to_string(), scope.to_string()), value);
    Ok(())
  }
}

fn poisoned<T>(_: std::sync::PoisonError<T>) -> RegistryError {
  RegistryError::Transport("registry state poisoned".to_string())
}
