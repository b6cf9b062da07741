use crate::parsing::{inline::InlineState, token::Nesting};

/// Turns `\n` into a `softbreak`, or a `hardbreak` when the line ended with
/// two or more spaces. Trailing spaces of the line and leading spaces of the
/// next line are dropped.
pub fn tokenize(state: &mut InlineState<'_>, silent: bool) -> bool {
    if state.byte_at(state.pos) != Some(b'\n') {
        return false;
    }

    if !silent {
        let trimmed = state.pending.trim_end_matches(' ').len();
        let trailing = state.pending.len() - trimmed;
        state.pending.truncate(trimmed);

        if trailing >= 2 {
            state.push("hardbreak", "br", Nesting::Leaf);
        } else {
            state.push("softbreak", "br", Nesting::Leaf);
        }
    }

    state.pos += 1;
    while state.byte_at(state.pos) == Some(b' ') {
        state.pos += 1;
    }
    true
}
