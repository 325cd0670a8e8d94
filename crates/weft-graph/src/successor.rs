use weft_workflow::Step;

/// Every step identifier `step` can transition to, deduplicated, in
/// first-seen order: plain `Next`, then each choice rule's `Next`, the
/// choice `Default`, and each catcher's `Next`.
///
/// This is the single source of truth for "what can this step transition
/// to"; layout and the mutation engine both go through it so the two
/// never disagree about the graph. Existence of the returned identifiers
/// in the flow's `States` is the caller's concern, and the empty-string
/// "present but unset" sentinel is never a successor.
pub fn successors(step: &Step) -> Vec<String> {
  let mut out: Vec<String> = Vec::new();
  let mut push = |id: &str| {
    if !id.is_empty() && !out.iter().any(|seen| seen == id) {
      out.push(id.to_string());
    }
  };

  if let Some(next) = step.next() {
    push(next);
  }
  for rule in step.choices() {
    push(&rule.next);
  }
  if let Some(default) = step.default_branch() {
    push(default);
  }
  for catcher in step.catchers() {
    push(&catcher.next);
  }

  out
}

/// The successor the layout places directly below a step: its `Next`, or
/// a Choice step's `Default`.
pub fn primary_successor(step: &Step) -> Option<&str> {
  step
    .next()
    .filter(|id| !id.is_empty())
    .or_else(|| step.default_branch().filter(|id| !id.is_empty()))
}

#[cfg(test)]
mod tests {
  use super::*;
  use serde_json::json;

  fn step(value: serde_json::Value) -> Step {
    serde_json::from_value(value).expect("bad test step")
  }

  #[test]
  fn test_plain_next() {
    let pass = step(json!({ "Type": "Pass", "Next": "B" }));
    assert_eq!(successors(&pass), ["B"]);
    assert_eq!(primary_successor(&pass), Some("B"));
  }

  #[test]
  fn test_choice_collects_rules_and_default() {
    let choice = step(json!({
      "Type": "Choice",
      "Choices": [
        { "Variable": "$.a", "IsPresent": true, "Next": "B" },
        { "Variable": "$.b", "StringEquals": "x", "Next": "C" }
      ],
      "Default": "D"
    }));
    assert_eq!(successors(&choice), ["B", "C", "D"]);
    assert_eq!(primary_successor(&choice), Some("D"));
  }

  #[test]
  fn test_action_catch_targets_included() {
    let action = step(json!({
      "Type": "Action",
      "ActionName": "a",
      "Next": "B",
      "Catch": [
        { "ErrorEquals": ["Timeout"], "Next": "H" },
        { "ErrorEquals": ["Other"], "Next": "B" }
      ]
    }));
    assert_eq!(successors(&action), ["B", "H"]);
  }

  #[test]
  fn test_duplicates_collapse() {
    let choice = step(json!({
      "Type": "Choice",
      "Choices": [
        { "Variable": "$.a", "IsPresent": true, "Next": "B" },
        { "Variable": "$.b", "IsPresent": true, "Next": "B" }
      ],
      "Default": "B"
    }));
    assert_eq!(successors(&choice), ["B"]);
  }

  #[test]
  fn test_terminal_and_sentinel() {
    let succeed = step(json!({ "Type": "Succeed" }));
    assert!(successors(&succeed).is_empty());
    assert_eq!(primary_successor(&succeed), None);

    // The unset sentinel is not a transition.
    let orphan = step(json!({ "Type": "Pass", "Next": "" }));
    assert!(successors(&orphan).is_empty());
    assert_eq!(primary_successor(&orphan), None);
  }
}
