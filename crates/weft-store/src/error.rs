use thiserror::Error;
use weft_edit::EditError;

#[derive(Debug, Error)]
pub enum StoreError {
  #[error("no workflow is loaded")]
  NoWorkflow,

  #[error("no flow is selected")]
  NoFlowSelected,

  #[error("flow not found: {0}")]
  UnknownFlow(String),

  #[error("resource not found: {0}")]
  UnknownResource(String),

  #[error(transparent)]
  Edit(#[from] EditError),
}
