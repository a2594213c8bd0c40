use crate::diagnostic::{Diagnostic, DiagnosticSeverity, E_NOTE_UNCLOSED};
use crate::find::{FindError, Tag, find_tag};
use crate::label::opening_len;
use crate::source_map::SourceMap;
use crate::span::Span;

pub struct RewriteResult {
    pub output: String,
    pub replaced: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Replaces every `{{label: ... :}}` in `source`, leftmost first.
///
/// The document is re-scanned from scratch after every splice: replacement
/// text rarely has the span's length, so every offset downstream of a
/// mutation is stale the moment it happens. An opening without a close stops
/// this label, keeps the replacements already made, and surfaces as a
/// diagnostic instead of an error.
pub fn rewrite(
    source: &str,
    label: &str,
    mut replace: impl FnMut(&Tag) -> String,
) -> RewriteResult {
    let mut output = source.to_string();
    let mut replaced = 0usize;
    let mut diagnostics = Vec::new();

    loop {
        match find_tag(&output, label) {
            Ok(Some(tag)) => {
                let replacement = replace(&tag);
                output.replace_range(tag.span.start..tag.span.end, &replacement);
                replaced += 1;
            }
            Ok(None) => break,
            Err(err) => {
                let FindError::UnclosedTag { position, .. } = &err;
                let span = Span {
                    start: *position,
                    end: *position + opening_len(label),
                };
                let range = SourceMap::new(&output).range(span);
                diagnostics.push(Diagnostic::new(
                    range,
                    DiagnosticSeverity::Error,
                    E_NOTE_UNCLOSED,
                    err.to_string(),
                ));
                break;
            }
        }
    }

    RewriteResult {
        output,
        replaced,
        diagnostics,
    }
}
