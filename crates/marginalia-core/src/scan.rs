use once_cell::sync::Lazy;
use regex::Regex;

use crate::label::CLOSE_TOKEN;

/// Opening delimiter: `{{`, one or more lowercase ASCII letters, `:`.
static OPENING: Lazy<Regex> = Lazy::new(|| Regex::new(r"\{\{[a-z]+:").expect("opening pattern"));

/// One delimiter match: where it starts and the text it matched.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Occurrence {
    pub position: usize,
    pub text: String,
}

/// Every opening delimiter in `source`, left to right, non-overlapping.
/// Matching state lives in the iterator, so concurrent scans of independent
/// documents never share a cursor.
pub(crate) fn scan_openings(source: &str) -> Vec<Occurrence> {
    OPENING
        .find_iter(source)
        .map(|m| Occurrence {
            position: m.start(),
            text: m.as_str().to_string(),
        })
        .collect()
}

/// Every `:}}` closing literal in `source`, left to right, non-overlapping.
pub(crate) fn scan_closings(source: &str) -> Vec<Occurrence> {
    source
        .match_indices(CLOSE_TOKEN)
        .map(|(position, text)| Occurrence {
            position,
            text: text.to_string(),
        })
        .collect()
}
