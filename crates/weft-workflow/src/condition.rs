//! Comparison conditions and the operator/value codec used by the editor.
//!
//! A condition is stored structurally as `Variable` plus exactly one
//! operator key (`StringEquals`, `NumericLessThan`, ...). Edit forms work
//! with a normalized `(operator, value)` pair instead; [`Condition::decode`]
//! and [`encode`] translate between the two without ever corrupting
//! in-progress user input.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// The fixed operator vocabulary, in decode priority order.
pub const CONDITION_OPERATORS: [&str; 25] = [
  "StringEquals",
  "StringEqualsPath",
  "StringLessThan",
  "StringGreaterThan",
  "StringLessThanEquals",
  "StringGreaterThanEquals",
  "NumericEquals",
  "NumericEqualsPath",
  "NumericLessThan",
  "NumericLessThanPath",
  "NumericGreaterThan",
  "NumericGreaterThanPath",
  "NumericLessThanEquals",
  "NumericLessThanEqualsPath",
  "NumericGreaterThanEquals",
  "NumericGreaterThanEqualsPath",
  "BooleanEquals",
  "BooleanEqualsPath",
  "TimestampEquals",
  "TimestampLessThan",
  "TimestampGreaterThan",
  "TimestampLessThanEquals",
  "TimestampGreaterThanEquals",
  "IsPresent",
  "IsNull",
];

/// Keys that can never be treated as an operator during fallback decode.
const RESERVED_KEYS: [&str; 4] = ["Variable", "Next", "And", "Or"];

/// A single comparison against a path into the flow's runtime data.
///
/// Well-formed data carries exactly one operator in `tests`; the open map
/// keeps documents with unknown operators editable instead of unparsable.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Condition {
  #[serde(
    rename = "Variable",
    default,
    skip_serializing_if = "String::is_empty"
  )]
  pub variable: String,
  #[serde(flatten)]
  pub tests: Map<String, Value>,
}

impl Condition {
  /// Normalize to an `(operator, value)` pair for editing.
  ///
  /// Scans the vocabulary in order and returns the first operator present;
  /// falls back to the first non-reserved key, and finally to
  /// `("StringEquals", "")` when the condition carries no operator at all.
  pub fn decode(&self) -> (&str, Value) {
    for op in CONDITION_OPERATORS {
      if let Some(value) = self.tests.get(op) {
        return (op, value.clone());
      }
    }
    if let Some((key, value)) = self
      .tests
      .iter()
      .find(|(key, _)| !RESERVED_KEYS.contains(&key.as_str()))
    {
      return (key.as_str(), value.clone());
    }
    (CONDITION_OPERATORS[0], Value::String(String::new()))
  }

  /// Rebuild the condition with only `Variable` plus `op` at its default
  /// value. Used when the user switches operators in the form.
  pub fn with_operator(&self, op: &str) -> Condition {
    let (_, previous) = self.decode();
    let mut tests = Map::new();
    tests.insert(op.to_string(), operator_default(op, &previous));
    Condition {
      variable: self.variable.clone(),
      tests,
    }
  }

  /// Replace the current operator's value with `raw` under the coercion
  /// policy of [`encode`].
  pub fn with_value(&self, raw: &str) -> Condition {
    let (op, _) = self.decode();
    let op = op.to_string();
    let mut tests = self.tests.clone();
    tests.insert(op.clone(), encode(&op, raw));
    Condition {
      variable: self.variable.clone(),
      tests,
    }
  }
}

/// Coerce raw form input into the value shape `op` expects.
///
/// Numeric operators parse as numbers, but invalid or empty input is kept
/// as the raw string rather than collapsing to `0`, so partial typing
/// survives a save/reload cycle. Boolean operators accept only the
/// literals `true`/`false` (case-insensitive); anything else is kept raw
/// for the same reason. All other operators store the string as-is.
pub fn encode(op: &str, raw: &str) -> Value {
  if op.contains("Numeric") {
    let trimmed = raw.trim();
    if let Ok(n) = trimmed.parse::<i64>() {
      return Value::from(n);
    }
    if let Ok(f) = trimmed.parse::<f64>()
      && let Some(n) = serde_json::Number::from_f64(f)
    {
      return Value::Number(n);
    }
    return Value::String(raw.to_string());
  }
  if op.contains("Boolean") {
    return match raw.to_ascii_lowercase().as_str() {
      "true" => Value::Bool(true),
      "false" => Value::Bool(false),
      _ => Value::String(raw.to_string()),
    };
  }
  Value::String(raw.to_string())
}

/// The value installed when the operator changes: presence checks get
/// `true`, numeric-valued conditions stay numeric, everything else resets
/// to the empty string.
pub fn operator_default(op: &str, previous: &Value) -> Value {
  if op == "IsPresent" || op == "IsNull" {
    return Value::Bool(true);
  }
  if previous.is_number() {
    return Value::from(0);
  }
  Value::String(String::new())
}

/// One branch of a Choice step: a successor plus either a single inline
/// condition or an `And`/`Or` combination of conditions.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ChoiceRule {
  #[serde(rename = "Next")]
  pub next: String,
  #[serde(rename = "And", skip_serializing_if = "Option::is_none")]
  pub and: Option<Vec<Condition>>,
  #[serde(rename = "Or", skip_serializing_if = "Option::is_none")]
  pub or: Option<Vec<Condition>>,
  #[serde(flatten)]
  pub condition: Condition,
}

impl ChoiceRule {
  /// A rule is a single condition when it carries no `And`/`Or` list.
  pub fn is_single_condition(&self) -> bool {
    self.and.is_none() && self.or.is_none()
  }
}
