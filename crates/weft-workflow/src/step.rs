use indexmap::IndexMap;
use serde::{Deserialize, Serialize};
use serde_json::{Value, json};

use crate::condition::ChoiceRule;

/// One state in a flow's state machine.
///
/// `Comment` is the only attribute shared by every step kind; the rest of
/// the payload is kind-specific and tagged by `Type` on the wire.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Step {
  #[serde(rename = "Comment", skip_serializing_if = "Option::is_none")]
  pub comment: Option<String>,
  #[serde(flatten)]
  pub kind: StepKind,
}

/// Kind-specific step payload.
///
/// Successor fields (`Next`, `Default`, a choice rule's `Next`, a catcher's
/// `Next`) hold step identifiers. An identifier that names no entry in the
/// flow's `States` is tolerated everywhere: the edge is simply not drawn.
/// The empty string is the "present but unset" sentinel written when a
/// deleted step had no onward target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "Type")]
pub enum StepKind {
  /// Invoke a reusable action (an `Action::Http` resource or a built-in
  /// `common:` action) with the given parameters.
  #[serde(rename_all = "PascalCase")]
  Action {
    #[serde(default)]
    action_name: String,
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    parameters: IndexMap<String, Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
    /// Ordered error handlers; first matching pattern wins at run time.
    #[serde(skip_serializing_if = "Option::is_none")]
    catch: Option<Vec<Catcher>>,
  },

  /// Branch on runtime data. `Default` is taken when no rule matches and
  /// is also the sole re-wire anchor when the step is deleted.
  #[serde(rename_all = "PascalCase")]
  Choice {
    #[serde(default)]
    choices: Vec<ChoiceRule>,
    #[serde(skip_serializing_if = "Option::is_none")]
    default: Option<String>,
  },

  /// Inject a literal result into the data at `ResultPath`.
  #[serde(rename_all = "PascalCase")]
  Pass {
    #[serde(skip_serializing_if = "Option::is_none")]
    result: Option<Value>,
    #[serde(skip_serializing_if = "Option::is_none")]
    result_path: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
  },

  #[serde(rename_all = "PascalCase")]
  Wait {
    #[serde(default)]
    seconds: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    next: Option<String>,
  },

  /// Terminal success.
  #[serde(rename_all = "PascalCase")]
  Succeed {
    #[serde(skip_serializing_if = "Option::is_none")]
    message: Option<String>,
  },

  /// Terminal failure.
  #[serde(rename_all = "PascalCase")]
  Fail {
    #[serde(skip_serializing_if = "Option::is_none")]
    error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    cause: Option<String>,
  },
}

/// One entry of an Action step's `Catch` list.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct Catcher {
  #[serde(default)]
  pub error_equals: Vec<String>,
  #[serde(skip_serializing_if = "Option::is_none")]
  pub result_path: Option<String>,
  pub next: String,
}

/// Fieldless step-kind selector used when scaffolding new steps.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum StepType {
  Action,
  Choice,
  Pass,
  Wait,
  Succeed,
  Fail,
}

impl StepType {
  pub fn is_terminal(self) -> bool {
    matches!(self, StepType::Succeed | StepType::Fail)
  }
}

impl Step {
  /// Build the default-initialized step the editor inserts for `ty`.
  ///
  /// Non-terminal kinds point at `next` (a Choice via its `Default` slot);
  /// pass the empty string when the new step has no onward target yet.
  pub fn template(ty: StepType, next: &str) -> Step {
    let (comment, kind) = match ty {
      StepType::Action => (
        "New Action Step",
        StepKind::Action {
          action_name: String::new(),
          parameters: IndexMap::new(),
          result_path: None,
          next: Some(next.to_string()),
          catch: None,
        },
      ),
      StepType::Choice => (
        "New Choice Step",
        StepKind::Choice {
          choices: Vec::new(),
          default: Some(next.to_string()),
        },
      ),
      StepType::Pass => (
        "New Pass Step",
        StepKind::Pass {
          result: Some(json!({})),
          result_path: Some("$.".to_string()),
          next: Some(next.to_string()),
        },
      ),
      StepType::Wait => (
        "New Wait Step",
        StepKind::Wait {
          seconds: 10,
          next: Some(next.to_string()),
        },
      ),
      StepType::Succeed => (
        "New Success Step",
        StepKind::Succeed {
          message: Some("Workflow finished successfully.".to_string()),
        },
      ),
      StepType::Fail => (
        "New Fail Step",
        StepKind::Fail {
          error: Some("Workflow failed".to_string()),
          cause: Some("An unexpected error occurred.".to_string()),
        },
      ),
    };

    Step {
      comment: Some(comment.to_string()),
      kind,
    }
  }

  pub fn step_type(&self) -> StepType {
    match self.kind {
      StepKind::Action { .. } => StepType::Action,
      StepKind::Choice { .. } => StepType::Choice,
      StepKind::Pass { .. } => StepType::Pass,
      StepKind::Wait { .. } => StepType::Wait,
      StepKind::Succeed { .. } => StepType::Succeed,
      StepKind::Fail { .. } => StepType::Fail,
    }
  }

  /// The step's plain `Next` slot, if the kind has one. Includes the
  /// empty-string sentinel; callers that want a real successor filter it.
  pub fn next(&self) -> Option<&str> {
    match &self.kind {
      StepKind::Action { next, .. }
      | StepKind::Pass { next, .. }
      | StepKind::Wait { next, .. } => next.as_deref(),
      _ => None,
    }
  }

  pub fn next_mut(&mut self) -> Option<&mut String> {
    match &mut self.kind {
      StepKind::Action { next, .. }
      | StepKind::Pass { next, .. }
      | StepKind::Wait { next, .. } => next.as_mut(),
      _ => None,
    }
  }

  /// Point the step's plain `Next` slot at `to`, creating it if the kind
  /// has one but it is currently absent. No-op for kinds without `Next`.
  pub fn set_next(&mut self, to: &str) {
    match &mut self.kind {
      StepKind::Action { next, .. }
      | StepKind::Pass { next, .. }
      | StepKind::Wait { next, .. } => *next = Some(to.to_string()),
      _ => {}
    }
  }

  pub fn choices(&self) -> &[ChoiceRule] {
    match &self.kind {
      StepKind::Choice { choices, .. } => choices,
      _ => &[],
    }
  }

  pub fn choices_mut(&mut self) -> Option<&mut Vec<ChoiceRule>> {
    match &mut self.kind {
      StepKind::Choice { choices, .. } => Some(choices),
      _ => None,
    }
  }

  pub fn default_branch(&self) -> Option<&str> {
    match &self.kind {
      StepKind::Choice { default, .. } => default.as_deref(),
      _ => None,
    }
  }

  pub fn default_branch_mut(&mut self) -> Option<&mut String> {
    match &mut self.kind {
      StepKind::Choice { default, .. } => default.as_mut(),
      _ => None,
    }
  }

  pub fn catchers(&self) -> &[Catcher] {
    match &self.kind {
      StepKind::Action {
        catch: Some(catchers),
        ..
      } => catchers,
      _ => &[],
    }
  }

  pub fn catchers_mut(&mut self) -> Option<&mut Vec<Catcher>> {
    match &mut self.kind {
      StepKind::Action {
        catch: Some(catchers),
        ..
      } => Some(catchers),
      _ => None,
    }
  }
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn test_step_round_trip() {
    let raw = r#"{
      "Comment": "Load settings from config",
      "Type": "Action",
      "ActionName": "common:action:LoadConfig",
      "Parameters": { "scope": "acme_settings" },
      "ResultPath": "$.config",
      "Next": "002.End"
    }"#;

    let step: Step = serde_json::from_str(raw).expect("failed to parse step");
    assert_eq!(step.step_type(), StepType::Action);
    assert_eq!(step.next(), Some("002.End"));

    let out = serde_json::to_value(&step).expect("failed to serialize step");
    assert_eq!(out["Type"], "Action");
    assert_eq!(out["ActionName"], "common:action:LoadConfig");
    assert_eq!(out["Parameters"]["scope"], "acme_settings");
  }

  #[test]
  fn test_terminal_steps_have_no_next() {
    let succeed: Step = serde_json::from_str(r#"{"Type": "Succeed", "Message": "done"}"#).unwrap();
    assert_eq!(succeed.next(), None);
    assert!(succeed.step_type().is_terminal());

    let fail: Step = serde_json::from_str(r#"{"Type": "Fail", "Error": "boom"}"#).unwrap();
    assert_eq!(fail.next(), None);
    assert!(fail.step_type().is_terminal());
  }

  #[test]
  fn test_template_points_at_target() {
    let action = Step::template(StepType::Action, "B");
    assert_eq!(action.next(), Some("B"));
    assert_eq!(action.comment.as_deref(), Some("New Action Step"));

    let choice = Step::template(StepType::Choice, "B");
    assert_eq!(choice.next(), None);
    assert_eq!(choice.default_branch(), Some("B"));

    let succeed = Step::template(StepType::Succeed, "B");
    assert_eq!(succeed.next(), None);
  }

  #[test]
  fn test_absent_optional_fields_stay_absent() {
    let step: Step = serde_json::from_str(r#"{"Type": "Pass", "Next": "B"}"#).unwrap();
    let out = serde_json::to_value(&step).unwrap();
    let obj = out.as_object().unwrap();
    assert!(!obj.contains_key("Comment"));
    assert!(!obj.contains_key("Result"));
    assert!(!obj.contains_key("ResultPath"));
  }
}
