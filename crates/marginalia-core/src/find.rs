use std::error::Error;
use std::fmt;

use crate::bracket::{BracketKind, find_close, merge};
use crate::label::{CLOSE_TOKEN, is_valid_label, label_of, opening_len};
use crate::scan::{scan_closings, scan_openings};
use crate::span::Span;

/// One well-formed `{{label: ... :}}` occurrence.
///
/// `span` covers the whole construct, opening brace to final closing brace;
/// `content` is the text strictly between the delimiters, nested tags of any
/// label included verbatim.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Tag {
    pub label: String,
    pub span: Span,
    pub content: String,
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum FindError {
    UnclosedTag { label: String, position: usize },
}

impl fmt::Display for FindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FindError::UnclosedTag { .. } => write!(f, "closing token not found"),
        }
    }
}

impl Error for FindError {}

/// Finds the first `{{label: ... :}}` in `source`.
///
/// All openings and closings are collected up front and matched by nesting
/// depth, so tags of other labels inside the body are skipped whole and stay
/// part of `content` for a later pass. `Ok(None)` means no opening with this
/// label exists; an opening without a balanced close is an error the caller
/// decides how to recover from. A stray closing delimiter with no opener is
/// never selected and survives untouched.
pub fn find_tag(source: &str, label: &str) -> Result<Option<Tag>, FindError> {
    if !is_valid_label(label) {
        return Ok(None);
    }
    let brackets = merge(scan_openings(source), scan_closings(source));
    let Some(index) = brackets
        .iter()
        .position(|bracket| bracket.kind == BracketKind::Open && label_of(&bracket.text) == label)
    else {
        return Ok(None);
    };

    let opening = &brackets[index];
    let close = find_close(&brackets[index..]).ok_or_else(|| FindError::UnclosedTag {
        label: label.to_string(),
        position: opening.position,
    })?;

    let content_start = opening.position + opening_len(label);
    Ok(Some(Tag {
        label: label.to_string(),
        span: Span {
            start: opening.position,
            end: close.position + CLOSE_TOKEN.len(),
        },
        content: source[content_start..close.position].to_string(),
    }))
}
