use crate::scan::Occurrence;

#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub(crate) enum BracketKind {
    Open,
    Close,
}

/// A delimiter occurrence tagged as opening or closing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub(crate) struct Bracket {
    pub position: usize,
    pub text: String,
    pub kind: BracketKind,
}

/// Merges openings and closings into one position-ordered sequence.
///
/// The sort is stable, so an opening keeps its place ahead of a closing on
/// equal positions. The delimiter shapes allow exactly one overlap, the
/// degenerate `{{xx:}}` where the opening's trailing `:` doubles as the
/// closing's lead; such a closing cannot close anything and is dropped so
/// the opening surfaces as unclosed. Openings never overlap each other, so
/// checking against the most recent opening's end is enough.
pub(crate) fn merge(openings: Vec<Occurrence>, closings: Vec<Occurrence>) -> Vec<Bracket> {
    let mut brackets = Vec::with_capacity(openings.len() + closings.len());
    brackets.extend(openings.into_iter().map(|occ| Bracket {
        position: occ.position,
        text: occ.text,
        kind: BracketKind::Open,
    }));
    brackets.extend(closings.into_iter().map(|occ| Bracket {
        position: occ.position,
        text: occ.text,
        kind: BracketKind::Close,
    }));
    brackets.sort_by_key(|bracket| bracket.position);

    let mut open_end = 0usize;
    brackets.retain(|bracket| match bracket.kind {
        BracketKind::Open => {
            open_end = bracket.position + bracket.text.len();
            true
        }
        BracketKind::Close => bracket.position >= open_end,
    });
    brackets
}

/// The bracket that closes `brackets[0]`, skipping balanced nested pairs.
///
/// Walks the remainder with an integer depth counter, never recursion. Depth
/// counting is label-agnostic: any opening deepens the nesting, which is what
/// lets a tag of another kind inside the body be skipped as one opaque unit.
/// `None` means the sequence ran out before the opening was closed.
pub(crate) fn find_close(brackets: &[Bracket]) -> Option<&Bracket> {
    let mut depth = 1usize;
    for bracket in brackets.iter().skip(1) {
        match bracket.kind {
            BracketKind::Open => depth += 1,
            BracketKind::Close if depth == 1 => return Some(bracket),
            BracketKind::Close => depth -= 1,
        }
    }
    None
}
