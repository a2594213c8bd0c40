mod bracket;
mod diagnostic;
mod find;
mod label;
mod note;
mod rewrite;
mod scan;
mod source_map;
mod span;

pub use diagnostic::{Diagnostic, DiagnosticSeverity, E_NOTE_UNCLOSED, W_NOTE_UNKNOWN};
pub use find::{FindError, Tag, find_tag};
pub use label::is_valid_label;
pub use note::{
    ExpandResult, MARGIN_NOTE, NoteKind, SIDENOTE, builtin_kinds, expand, expand_sanitized,
    expand_with_kinds,
};
pub use rewrite::{RewriteResult, rewrite};
pub use source_map::{Position, Range, SourceMap};
pub use span::{Span, SpanError};
