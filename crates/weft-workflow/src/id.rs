/// Allocate a fresh step identifier from the ids already in a flow.
///
/// Identifiers follow the `NNN.Some.Name` convention: the numeric prefix
/// of each id's first dot-segment is parsed (ids without one are ignored,
/// not rejected), the maximum is incremented, and the result is formatted
/// as a zero-padded 3-digit prefix with a fixed suffix, e.g.
/// `"004.New.Step"`. Uniqueness is only guaranteed against that
/// convention; a hand-written id that happens to collide with the suffix
/// is not detected.
pub fn next_step_id<'a>(existing: impl IntoIterator<Item = &'a str>) -> String {
  let max = existing
    .into_iter()
    .filter_map(|id| {
      let segment = id.split('.').next().unwrap_or(id);
      let digits: String = segment.chars().take_while(char::is_ascii_digit).collect();
      digits.parse::<u64>().ok()
    })
    .max()
    .unwrap_or(0);

  format!("{:03}.New.Step", max + 1)
}
