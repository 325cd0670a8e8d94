//! Integration tests for the in-memory registry against the
//! [`RegistryApi`] boundary, plus a stub host client.

use async_trait::async_trait;
use serde_json::{Value, json};
use weft_registry::{
  HostClient, InMemoryRegistry, IntegrationDraft, RegistryApi, RegistryError,
};
use weft_workflow::new_workflow;

fn draft(name: &str) -> IntegrationDraft {
  IntegrationDraft {
    name: name.to_string(),
    description: String::new(),
  }
}

#[tokio::test]
async fn test_integration_crud() {
  let registry = InMemoryRegistry::new();
  assert!(registry.list_integrations().await.unwrap().is_empty());

  let created = registry.create_integration(draft("acme")).await.unwrap();
  assert_eq!(created.name, "acme");
  assert_eq!(registry.get_integration("acme").await.unwrap(), created);

  let err = registry.create_integration(draft("acme")).await.unwrap_err();
  assert!(matches!(err, RegistryError::Conflict(name) if name == "acme"));

  let err = registry.get_integration("ghost").await.unwrap_err();
  assert!(matches!(err, RegistryError::NotFound(_)));
}

#[tokio::test]
async fn test_bundle_upload_and_latest() {
  let registry = InMemoryRegistry::new();
  let workflow = new_workflow("Acme", "demo", "spec", "support", "ticket.Created");

  assert!(registry.latest_bundle("acme").await.unwrap().is_none());

  let first = registry.save_bundle("acme", &workflow).await.unwrap();
  let second = registry.save_bundle("acme", &workflow).await.unwrap();
  assert_ne!(first.uuid, second.uuid);

  let latest = registry.latest_bundle("acme").await.unwrap().unwrap();
  assert_eq!(latest.uuid, second.uuid);
  assert_eq!(latest.workflow["name"], "acme");
  assert_eq!(latest.template_version, workflow.template_version);
}

#[tokio::test]
async fn test_config_scopes() {
  let registry = InMemoryRegistry::new();

  let err = registry.get_config("acme", "settings").await.unwrap_err();
  assert!(matches!(err, RegistryError::NotFound(_)));

  registry
    .put_config("acme", "settings", json!({ "debug_webhook_endpoint": "https://example.test" }))
    .await
    .unwrap();
  let value = registry.get_config("acme", "settings").await.unwrap();
  assert_eq!(value["debug_webhook_endpoint"], "https://example.test");

  // Scopes are isolated per integration.
  let err = registry.get_config("other", "settings").await.unwrap_err();
  assert!(matches!(err, RegistryError::NotFound(_)));
}

/// A host client that answers from canned data, the way UI tests stub
/// the platform.
struct StubHost;

#[async_trait]
impl HostClient for StubHost {
  async fn init(&self) -> Result<(), RegistryError> {
    Ok(())
  }

  async fn get(&self, key: &str) -> Result<Value, RegistryError> {
    match key {
      "currentUser.locale" => Ok(json!("en-US")),
      _ => Err(RegistryError::NotFound(key.to_string())),
    }
  }

  async fn request(&self, url: &str, _options: Value) -> Result<Value, RegistryError> {
    Ok(json!({ "requested": url }))
  }

  async fn invoke(&self, action: &str, _args: Vec<Value>) -> Result<Value, RegistryError> {
    Ok(json!({ "invoked": action }))
  }
}

#[tokio::test]
async fn test_host_client_boundary_is_object_safe() {
  let host: Box<dyn HostClient> = Box::new(StubHost);
  host.init().await.unwrap();
  assert_eq!(host.get("currentUser.locale").await.unwrap(), json!("en-US"));
  assert_eq!(
    host.request("/api/v2/integrations", json!({})).await.unwrap()["requested"],
    "/api/v2/integrations"
  );
  assert_eq!(
    host.invoke("resize", vec![json!({ "height": 600 })]).await.unwrap()["invoked"],
    "resize"
  );
}
