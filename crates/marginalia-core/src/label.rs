pub const OPEN_LEAD: &str = "{{";
pub const OPEN_TRAIL: &str = ":";
pub const CLOSE_TOKEN: &str = ":}}";

/// Labels are one or more lowercase ASCII letters, nothing else.
pub fn is_valid_label(label: &str) -> bool {
    !label.is_empty() && label.bytes().all(|byte| byte.is_ascii_lowercase())
}

/// Label of an opening delimiter: the matched text minus the leading `{{`
/// and the trailing `:`.
pub(crate) fn label_of(opening: &str) -> &str {
    &opening[OPEN_LEAD.len()..opening.len() - OPEN_TRAIL.len()]
}

/// Byte length of the opening delimiter for `label`.
pub(crate) fn opening_len(label: &str) -> usize {
    OPEN_LEAD.len() + label.len() + OPEN_TRAIL.len()
}
