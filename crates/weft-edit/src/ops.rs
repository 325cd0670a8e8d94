use weft_graph::successors;
use weft_workflow::{FlowDefinition, Step, StepType, next_step_id};

use crate::error::EditError;

/// Result of an insert operation: the new definition plus the identifier
/// allocated for the inserted step.
#[derive(Debug, Clone)]
pub struct Insertion {
  pub definition: FlowDefinition,
  pub new_id: String,
}

/// Insert a scaffolded step of `ty` on the edge from `source_id` to
/// `target_id`.
///
/// The new step points at `target_id`; exactly one successor slot of the
/// source that currently equals `target_id` is redirected to the new
/// step: plain `Next` first, else the first matching choice rule, else
/// the `Default` slot. A source that does not target `target_id` keeps
/// all its slots: the step is still inserted, nothing is rewired, and the
/// caller sees it on the spill row.
pub fn insert_between(
  def: &FlowDefinition,
  source_id: &str,
  target_id: &str,
  ty: StepType,
) -> Result<Insertion, EditError> {
  if !def.states.contains_key(source_id) {
    return Err(EditError::UnknownStep(source_id.to_string()));
  }

  let mut definition = def.clone();
  let new_id = next_step_id(definition.states.keys().map(String::as_str));
  definition
    .states
    .insert(new_id.clone(), Step::template(ty, target_id));

  if let Some(source) = definition.states.get_mut(source_id) {
    rewire_one_slot(source, target_id, &new_id);
  }

  Ok(Insertion { definition, new_id })
}

/// Insert a scaffolded step of `ty` directly after `source_id`.
///
/// The new step inherits the source's current `Next` (the unset sentinel
/// when it has none) and the source's `Next` is redirected to it. Choice
/// sources are rejected: which branch to redirect is ambiguous.
pub fn insert_below(
  def: &FlowDefinition,
  source_id: &str,
  ty: StepType,
) -> Result<Insertion, EditError> {
  let Some(source) = def.states.get(source_id) else {
    return Err(EditError::UnknownStep(source_id.to_string()));
  };
  if source.step_type() == StepType::Choice {
    return Err(EditError::ChoiceInsertBelow(source_id.to_string()));
  }
  let inherited = source.next().unwrap_or("").to_string();

  let mut definition = def.clone();
  let new_id = next_step_id(definition.states.keys().map(String::as_str));
  definition
    .states
    .insert(new_id.clone(), Step::template(ty, &inherited));

  if let Some(source) = definition.states.get_mut(source_id) {
    source.set_next(&new_id);
  }

  Ok(Insertion { definition, new_id })
}

/// Move the step at `old_id` to `new_id`, keeping its position in the
/// state map, and rewrite every reference to it: `StartAt`, plain `Next`,
/// choice rules, `Default`, and catcher targets.
pub fn rename(
  def: &FlowDefinition,
  old_id: &str,
  new_id: &str,
) -> Result<FlowDefinition, EditError> {
  if old_id == new_id {
    return Ok(def.clone());
  }
  if def.states.contains_key(new_id) {
    return Err(EditError::DuplicateId(new_id.to_string()));
  }
  if !def.states.contains_key(old_id) {
    return Err(EditError::UnknownStep(old_id.to_string()));
  }

  let mut definition = def.clone();
  definition.states = definition
    .states
    .into_iter()
    .map(|(id, step)| {
      if id == old_id {
        (new_id.to_string(), step)
      } else {
        (id, step)
      }
    })
    .collect();

  if definition.start_at == old_id {
    definition.start_at = new_id.to_string();
  }

  for step in definition.states.values_mut() {
    if step.next() == Some(old_id) {
      step.set_next(new_id);
    }
    if let Some(default) = step.default_branch_mut()
      && default.as_str() == old_id
    {
      *default = new_id.to_string();
    }
    if let Some(choices) = step.choices_mut() {
      for rule in choices.iter_mut() {
        if rule.next == old_id {
          rule.next = new_id.to_string();
        }
      }
    }
    if let Some(catchers) = step.catchers_mut() {
      for catcher in catchers.iter_mut() {
        if catcher.next == old_id {
          catcher.next = new_id.to_string();
        }
      }
    }
  }

  Ok(definition)
}

/// Remove the step at `node_id`, re-pointing every parent at the removed
/// step's onward target.
///
/// The target is a Choice step's `Default` (its absence is a
/// [`EditError::NoDefaultPath`] failure, since there is no unambiguous
/// rewire) or the step's `Next`; with no target, parents get the
/// empty-string sentinel so the slot stays present. `StartAt` follows the
/// target when it pointed at the removed step. Catcher targets are left
/// alone: a dangling catch reference is tolerated by every consumer.
pub fn delete(def: &FlowDefinition, node_id: &str) -> Result<FlowDefinition, EditError> {
  let Some(doomed) = def.states.get(node_id) else {
    return Err(EditError::UnknownStep(node_id.to_string()));
  };

  let target: Option<String> = if doomed.step_type() == StepType::Choice {
    match doomed.default_branch().filter(|id| !id.is_empty()) {
      Some(default) => Some(default.to_string()),
      None => return Err(EditError::NoDefaultPath(node_id.to_string())),
    }
  } else {
    doomed.next().filter(|id| !id.is_empty()).map(str::to_string)
  };
  let rewire_to = target.clone().unwrap_or_default();

  let mut definition = def.clone();
  for (id, step) in definition.states.iter_mut() {
    if id == node_id || !successors(step).iter().any(|s| s == node_id) {
      continue;
    }
    if step.next() == Some(node_id) {
      step.set_next(&rewire_to);
    }
    if let Some(default) = step.default_branch_mut()
      && default.as_str() == node_id
    {
      *default = rewire_to.clone();
    }
    if let Some(choices) = step.choices_mut() {
      for rule in choices.iter_mut() {
        if rule.next == node_id {
          rule.next = rewire_to.clone();
        }
      }
    }
  }

  if definition.start_at == node_id
    && let Some(target) = &target
  {
    definition.start_at = target.clone();
  }
  definition.states.shift_remove(node_id);

  Ok(definition)
}

/// Redirect the first successor slot of `source` equal to `from` to `to`:
/// plain `Next`, else the first matching choice rule, else `Default`.
fn rewire_one_slot(source: &mut Step, from: &str, to: &str) {
  if source.next() == Some(from) {
    source.set_next(to);
    return;
  }
  if source.choices().iter().any(|rule| rule.next == from) {
    if let Some(choices) = source.choices_mut()
      && let Some(rule) = choices.iter_mut().find(|rule| rule.next == from)
    {
      rule.next = to.to_string();
    }
    return;
  }
  if let Some(default) = source.default_branch_mut()
    && default.as_str() == from
  {
    *default = to.to_string();
  }
}
