//! Fully-qualified resource names.
//!
//! Resources reference each other by name, never by object reference:
//! `namespace:kind:key`, where the namespace is the owning workflow's
//! name. Built-in actions live under the `common` namespace.

/// The built-in config-loading action every scaffolded flow starts with.
pub const LOAD_CONFIG_ACTION: &str = "common:action:LoadConfig";

/// `namespace:flow:key` for a flow resource.
pub fn flow_fqn(namespace: &str, flow_key: &str) -> String {
  format!("{namespace}:flow:{flow_key}")
}

/// `namespace:action:key` for an action resource.
pub fn action_fqn(namespace: &str, action_key: &str) -> String {
  format!("{namespace}:action:{action_key}")
}

/// The local resource key of a fully-qualified name (its last segment).
/// Returns the input unchanged when it carries no namespace.
pub fn local_key(fqn: &str) -> &str {
  fqn.rsplit(':').next().unwrap_or(fqn)
}

/// Normalize a user-entered workflow name into a namespace: trimmed,
/// lowercased, whitespace runs collapsed to `-`.
pub fn normalize_namespace(name: &str) -> String {
  name
    .split_whitespace()
    .collect::<Vec<_>>()
    .join("-")
    .to_lowercase()
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_fqn_shapes() {
    assert_eq!(flow_fqn("acme", "ticket_flow"), "acme:flow:ticket_flow");
    assert_eq!(action_fqn("acme", "get-ticket"), "acme:action:get-ticket");
  }

  #[test]
  fn test_local_key() {
    assert_eq!(local_key("acme:flow:ticket_flow"), "ticket_flow");
    assert_eq!(local_key("common:action:LoadConfig"), "LoadConfig");
    assert_eq!(local_key("bare-name"), "bare-name");
  }

  #[test]
  fn test_normalize_namespace() {
    assert_eq!(normalize_namespace("  Acme  Support "), "acme-support");
    assert_eq!(normalize_namespace("plain"), "plain");
    assert_eq!(normalize_namespace("   "), "");
  }
}
