use thiserror::Error;

/// Error type for registry operations.
#[derive(Debug, Error)]
pub enum RegistryError {
  /// The requested record was not found.
  #[error("not found: {0}")]
  NotFound(String),

  /// A record with the same identity already exists.
  #[error("already exists: {0}")]
  Conflict(String),

  /// The transport below the boundary failed.
  #[error("transport error: {0}")]
  Transport(String),
}
