//! Dynamic-path placeholder extraction.
//!
//! Action parameters and HTTP templates embed `{{$.path}}` expressions
//! that reference runtime data. The editor surfaces them as suggested
//! parameter keys in the `path.$` convention.

use std::collections::BTreeSet;

use serde_json::Value;

/// Collect every `{{$.path}}` placeholder reachable in `data`, converted
/// to `path.$` form, deduplicated and sorted.
pub fn extract_placeholders(data: &Value) -> Vec<String> {
  let mut found = BTreeSet::new();
  walk(data, &mut found);
  found.into_iter().collect()
}

fn walk(value: &Value, found: &mut BTreeSet<String>) {
  match value {
    Value::String(text) => scan(text, found),
    Value::Array(items) => {
      for item in items {
        walk(item, found);
      }
    }
    Value::Object(entries) => {
      for item in entries.values() {
        walk(item, found);
      }
    }
    _ => {}
  }
}

fn scan(text: &str, found: &mut BTreeSet<String>) {
  let mut rest = text;
  while let Some(start) = rest.find("{{$.") {
    rest = &rest[start + 4..];
    let Some(end) = rest.find("}}") else {
      return;
    };
    let path = &rest[..end];
    if !path.is_empty() && !path.contains('}') {
      found.insert(format!("{path}.$"));
    }
    rest = &rest[end + 2..];
  }
}
