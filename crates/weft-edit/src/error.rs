use thiserror::Error;

/// Expected, recoverable mutation failures. The caller surfaces these to
/// the user; the definition they were invoked on is left untouched.
#[derive(Debug, Error)]
pub enum EditError {
  #[error("step not found: {0}")]
  UnknownStep(String),

  #[error("a step with the id \"{0}\" already exists")]
  DuplicateId(String),

  #[error("choice step \"{0}\" needs a Default path before it can be deleted")]
  NoDefaultPath(String),

  #[error("cannot insert below choice step \"{0}\": the branch to redirect is ambiguous")]
  ChoiceInsertBelow(String),
}
