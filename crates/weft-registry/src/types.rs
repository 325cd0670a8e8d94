use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A registered integration: the namespace workflows are published under.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Integration {
  pub name: String,
  #[serde(default)]
  pub description: String,
}

/// Input for creating an integration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IntegrationDraft {
  pub name: String,
  #[serde(default)]
  pub description: String,
}

/// One uploaded revision of a workflow document.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Bundle {
  pub uuid: String,
  pub created_at: DateTime<Utc>,
  pub template_version: String,
  /// The workflow document as uploaded, verbatim.
  pub workflow: Value,
}
