use async_trait::async_trait;
use serde_json::Value;
use weft_workflow::Workflow;

use crate::error::RegistryError;
use crate::types::{Bundle, Integration, IntegrationDraft};

/// Remote registry operations the editor relies on.
///
/// Implementations own transport, endpoints, and auth entirely; the
/// editor only ever exchanges whole values across this trait and never
/// retries on its own.
#[async_trait]
pub trait RegistryApi: Send + Sync {
  /// List all integrations visible to the current account.
  async fn list_integrations(&self) -> Result<Vec<Integration>, RegistryError>;

  /// Get a single integration by name.
  async fn get_integration(&self, name: &str) -> Result<Integration, RegistryError>;

  /// Register a new integration.
  async fn create_integration(
    &self,
    draft: IntegrationDraft,
  ) -> Result<Integration, RegistryError>;

  /// The most recently uploaded bundle of an integration, if any.
  async fn latest_bundle(&self, integration: &str) -> Result<Option<Bundle>, RegistryError>;

  /// Upload a workflow document as a new bundle revision.
  async fn save_bundle(
    &self,
    integration: &str,
    workflow: &Workflow,
  ) -> Result<Bundle, RegistryError>;

  /// Read a config scope's value.
  async fn get_config(&self, integration: &str, scope: &str) -> Result<Value, RegistryError>;

  /// Create or replace a config scope's value.
  async fn put_config(
    &self,
    integration: &str,
    scope: &str,
    value: Value,
  ) -> Result<(), RegistryError>;
}
