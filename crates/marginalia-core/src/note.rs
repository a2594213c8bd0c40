use std::collections::{HashMap, HashSet};

use ammonia::Builder;

use crate::diagnostic::{Diagnostic, DiagnosticSeverity, W_NOTE_UNKNOWN};
use crate::label::label_of;
use crate::rewrite::rewrite;
use crate::scan::scan_openings;
use crate::source_map::SourceMap;
use crate::span::Span;

/// One recognized tag kind: its label and the markup its occurrences expand
/// to. The render function receives the tag's start offset, which keys the
/// toggle ids so they stay unique within a document.
#[derive(Clone, Copy)]
pub struct NoteKind {
    pub label: &'static str,
    pub render: fn(offset: usize, content: &str) -> String,
}

/// `{{sn: ... :}}` — numbered sidenote with the Tufte toggle markup.
pub const SIDENOTE: NoteKind = NoteKind {
    label: "sn",
    render: render_sidenote,
};

/// `{{mn: ... :}}` — unnumbered margin note, circled-plus toggle.
pub const MARGIN_NOTE: NoteKind = NoteKind {
    label: "mn",
    render: render_margin_note,
};

/// The registry, in processing order. Sidenotes run first, so a margin note
/// nested in a sidenote body survives that pass verbatim and is expanded by
/// the next one.
pub fn builtin_kinds() -> &'static [NoteKind] {
    &[SIDENOTE, MARGIN_NOTE]
}

fn render_sidenote(offset: usize, content: &str) -> String {
    format!(
        "<label for=\"sn_{offset}\" class=\"margin-toggle sidenote-number\"></label>\
         <input type=\"checkbox\" id=\"sn_{offset}\" class=\"margin-toggle\" />\
         <span class=\"sidenote\">{content}</span>"
    )
}

fn render_margin_note(offset: usize, content: &str) -> String {
    format!(
        "<label for=\"mn_{offset}\" class=\"margin-toggle\">&#8853;</label>\
         <input type=\"checkbox\" id=\"mn_{offset}\" class=\"margin-toggle\" />\
         <span class=\"marginnote\">{content}</span>"
    )
}

pub struct ExpandResult {
    pub output: String,
    pub replaced: usize,
    pub diagnostics: Vec<Diagnostic>,
}

/// Expands every registered note kind in `source`, content passed through
/// verbatim.
pub fn expand(source: &str) -> ExpandResult {
    expand_with_kinds(source, builtin_kinds(), false)
}

/// Like [`expand`], but note content is cleaned through an inline-markup
/// allow-list before it lands inside the note template.
pub fn expand_sanitized(source: &str) -> ExpandResult {
    expand_with_kinds(source, builtin_kinds(), true)
}

/// Runs the substitution driver once per kind, in order, over the
/// progressively rewritten document. A malformed tag stops its own label
/// only; the other kinds still run, and everything observed lands in
/// `diagnostics` rather than an error.
pub fn expand_with_kinds(source: &str, kinds: &[NoteKind], sanitize: bool) -> ExpandResult {
    let mut output = source.to_string();
    let mut replaced = 0usize;
    let mut diagnostics = Vec::new();

    for kind in kinds {
        let render = kind.render;
        let result = if sanitize {
            rewrite(&output, kind.label, |tag| {
                render(tag.span.start, &clean_inline(&tag.content))
            })
        } else {
            rewrite(&output, kind.label, |tag| render(tag.span.start, &tag.content))
        };
        output = result.output;
        replaced += result.replaced;
        diagnostics.extend(result.diagnostics);
    }

    warn_unknown_labels(&output, kinds, &mut diagnostics);

    ExpandResult {
        output,
        replaced,
        diagnostics,
    }
}

/// Openings that survive every pass with a label nobody registered stay raw
/// in the output; flag them so the author finds the typo.
fn warn_unknown_labels(output: &str, kinds: &[NoteKind], diagnostics: &mut Vec<Diagnostic>) {
    let openings = scan_openings(output);
    if openings.is_empty() {
        return;
    }
    let known: HashSet<&str> = kinds.iter().map(|kind| kind.label).collect();
    let map = SourceMap::new(output);
    for opening in openings {
        let label = label_of(&opening.text);
        if known.contains(label) {
            continue;
        }
        let span = Span {
            start: opening.position,
            end: opening.position + opening.text.len(),
        };
        diagnostics.push(Diagnostic::new(
            map.range(span),
            DiagnosticSeverity::Warning,
            W_NOTE_UNKNOWN,
            format!("no note kind registered for `{}`", label),
        ));
    }
}

fn clean_inline(content: &str) -> String {
    let tags: HashSet<&'static str> = [
        "a", "abbr", "b", "br", "cite", "code", "em", "i", "kbd", "s", "small", "span", "strong",
        "sub", "sup", "u",
    ]
    .iter()
    .copied()
    .collect();

    let mut generic_attributes = HashSet::new();
    generic_attributes.insert("class");

    let mut tag_attributes = HashMap::new();
    tag_attributes.insert("a", ["href", "title"].iter().copied().collect());
    tag_attributes.insert("abbr", ["title"].iter().copied().collect());

    Builder::new()
        .tags(tags)
        .generic_attributes(generic_attributes)
        .tag_attributes(tag_attributes)
        .clean(content)
        .to_string()
}
