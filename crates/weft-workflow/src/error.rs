use thiserror::Error;

/// Failures of the minimal import shape gate.
///
/// Deeper structural problems (a step with a bad shape, a dangling
/// successor) are deliberately not errors here: malformed resources
/// degrade to `Resource::Other` and dangling references are tolerated by
/// every consumer.
#[derive(Debug, Error)]
pub enum ImportError {
  #[error("invalid JSON format: {0}")]
  Syntax(#[from] serde_json::Error),

  #[error("workflow document must be a JSON object")]
  NotAnObject,

  #[error("workflow is missing a string \"name\" field")]
  MissingName,

  #[error("workflow is missing a \"resources\" object")]
  MissingResources,
}
