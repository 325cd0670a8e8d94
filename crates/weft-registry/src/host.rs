use async_trait::async_trait;
use serde_json::Value;

use crate::error::RegistryError;

/// The host platform's injected client object.
///
/// The surrounding application runs inside a host iframe and talks to the
/// platform through a client singleton; the editor sees only this trait
/// so the core stays pure and testable without a host.
#[async_trait]
pub trait HostClient: Send + Sync {
  /// Complete the iframe handshake. Called once before anything else.
  async fn init(&self) -> Result<(), RegistryError>;

  /// Read a context value (current user, locale, theme, ...).
  async fn get(&self, key: &str) -> Result<Value, RegistryError>;

  /// Proxy an HTTP request through the host.
  async fn request(&self, url: &str, options: Value) -> Result<Value, RegistryError>;

  /// Invoke a host-side action (resize, notify, ...).
  async fn invoke(&self, action: &str, args: Vec<Value>) -> Result<Value, RegistryError>;
}
